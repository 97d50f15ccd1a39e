// src/services/inventory_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::{
        auth::User,
        inventory::{
            MovementType, NewProduct, Product, ProductBalance, RecentMovement, StockMovement,
            Supplier,
        },
    },
};

#[derive(Clone)]
pub struct InventoryService {
    inventory_repo: InventoryRepository,
    pool: SqlitePool,
}

impl InventoryService {
    pub fn new(inventory_repo: InventoryRepository, pool: SqlitePool) -> Self {
        Self {
            inventory_repo,
            pool,
        }
    }

    // --- CREATE PRODUCT (com estoque de abertura) ---
    //
    // Um produto nunca pode existir com estoque "fantasma": se há estoque
    // inicial, ele entra como movimentação de abertura NA MESMA transação
    // que cria o produto.
    pub async fn create_product(
        &self,
        business_id: Uuid,
        acting_user: &User,
        new_product: &NewProduct,
        opening_stock: i64,
    ) -> Result<Product, AppError> {
        if opening_stock < 0 {
            return Err(AppError::InvalidQuantity(opening_stock));
        }

        let mut tx = self.pool.begin().await?;

        // 1. Cria o produto de catálogo (SKU único dentro do tenant)
        let product = self
            .inventory_repo
            .create_product(&mut *tx, business_id, new_product)
            .await?;

        // 2. Estoque de abertura, se houver
        if opening_stock > 0 {
            self.inventory_repo
                .record_movement(
                    &mut *tx,
                    product.id,
                    acting_user.id,
                    opening_stock,
                    MovementType::In,
                    "opening",
                    None,
                )
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "📦 Produto '{}' ({}) criado com abertura de {} unidade(s).",
            product.name,
            product.sku,
            opening_stock
        );

        Ok(product)
    }

    // --- AJUSTE MANUAL ---
    //
    // Correção de inventário: o gerente conta a prateleira e lança a
    // diferença com o sinal que for. A quantidade carrega o sinal explícito.
    pub async fn adjust_stock(
        &self,
        business_id: Uuid,
        acting_user: &User,
        product_id: Uuid,
        qty: i64,
    ) -> Result<StockMovement, AppError> {
        if qty == 0 {
            return Err(AppError::InvalidQuantity(qty));
        }

        // Produto de outro tenant responde como inexistente
        self.inventory_repo
            .find_product(&self.pool, business_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;

        self.inventory_repo
            .record_movement(
                &self.pool,
                product_id,
                acting_user.id,
                qty,
                MovementType::Adjust,
                "manual",
                None,
            )
            .await
    }

    // --- FORNECEDORES ---

    pub async fn create_supplier(
        &self,
        business_id: Uuid,
        name: &str,
        phone: Option<&str>,
        location: Option<&str>,
    ) -> Result<Supplier, AppError> {
        self.inventory_repo
            .create_supplier(&self.pool, business_id, name, phone, location)
            .await
    }

    pub async fn list_suppliers(&self, business_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        self.inventory_repo.list_suppliers(business_id).await
    }

    // --- LEITURAS ---

    pub async fn list_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        self.inventory_repo.list_products(business_id).await
    }

    /// Saldo de UM produto. "Não encontrado" nunca se confunde com saldo
    /// zero: produto inexistente (ou de outro tenant) é erro, não 0.
    pub async fn product_balance(
        &self,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<i64, AppError> {
        self.inventory_repo
            .find_product(&self.pool, business_id, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;

        self.inventory_repo
            .product_balance(&self.pool, product_id)
            .await
    }

    pub async fn stock_balances(&self, business_id: Uuid) -> Result<Vec<ProductBalance>, AppError> {
        self.inventory_repo.stock_balances(business_id).await
    }

    pub async fn recent_movements(
        &self,
        business_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentMovement>, AppError> {
        self.inventory_repo.recent_movements(business_id, limit).await
    }
}
