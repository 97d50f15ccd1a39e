// src/db/inventory_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::inventory::{
        MovementType, NewProduct, Product, ProductBalance, RecentMovement, StockMovement, Supplier,
    },
};

// Repositório do catálogo e do livro-razão de estoque.
//
// O livro-razão (stock_movements) é append-only: este repositório só tem
// INSERT e SELECT para ele — não existe UPDATE nem DELETE de movimentação
// em lugar nenhum do código.
#[derive(Clone)]
pub struct InventoryRepository {
    pool: SqlitePool,
}

impl InventoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---
    // Catálogo: produtos
    // ---

    /// Cria um produto de catálogo (sem estoque — a abertura é um movimento à parte).
    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        new_product: &NewProduct,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products
                (id, business_id, sku, name, category, unit, barcode,
                 reorder_point, expiry_date, unit_price, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(&new_product.sku)
        .bind(&new_product.name)
        .bind(&new_product.category)
        .bind(&new_product.unit)
        .bind(&new_product.barcode)
        .bind(new_product.reorder_point)
        .bind(new_product.expiry_date)
        .bind(new_product.unit_price)
        .bind(Utc::now())
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::SkuAlreadyExists(new_product.sku.clone());
                }
            }
            e.into()
        })
    }

    /// Busca um produto JÁ ESCOPADO pelo tenant. Produto de outro
    /// estabelecimento responde como inexistente (None).
    pub async fn find_product<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND business_id = $2",
        )
        .bind(product_id)
        .bind(business_id)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn find_product_by_sku<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        sku: &str,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 AND sku = $2",
        )
        .bind(business_id)
        .bind(sku)
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    pub async fn list_products(&self, business_id: Uuid) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE business_id = $1 ORDER BY name ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    // ---
    // Catálogo: fornecedores
    // ---

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        name: &str,
        phone: Option<&str>,
        location: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (id, business_id, name, phone, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(name)
        .bind(phone)
        .bind(location)
        .fetch_one(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn find_supplier<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        supplier_id: Uuid,
    ) -> Result<Option<Supplier>, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let supplier = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE id = $1 AND business_id = $2",
        )
        .bind(supplier_id)
        .bind(business_id)
        .fetch_optional(executor)
        .await?;
        Ok(supplier)
    }

    pub async fn list_suppliers(&self, business_id: Uuid) -> Result<Vec<Supplier>, AppError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE business_id = $1 ORDER BY name ASC",
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(suppliers)
    }

    // ---
    // Livro-razão: escrita
    // ---

    /// Registra uma movimentação no livro-razão. Só INSERT: a linha nunca
    /// mais é tocada. O chamador já validou produto/tenant e qty != 0.
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        user_id: Uuid,
        qty: i64,
        movement_type: MovementType,
        source: &str,
        unit_cost: Option<f64>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements
                (id, product_id, user_id, qty, movement_type, source, unit_cost, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(product_id)
        .bind(user_id)
        .bind(qty)
        .bind(movement_type)
        .bind(source)
        .bind(unit_cost)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    // ---
    // Livro-razão: leituras derivadas
    // ---

    /// Saldo de um produto = soma com sinal de TODOS os seus movimentos.
    /// Esta é a única fonte de "estoque em mãos" — não existe contador paralelo.
    pub async fn product_balance<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let balance = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(qty), 0) FROM stock_movements WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(executor)
        .await?;
        Ok(balance)
    }

    /// Saldos de todos os produtos do estabelecimento.
    /// LEFT JOIN de propósito: produto sem nenhum movimento aparece com 0.
    pub async fn stock_balances(&self, business_id: Uuid) -> Result<Vec<ProductBalance>, AppError> {
        let balances = sqlx::query_as::<_, ProductBalance>(
            r#"
            SELECT
                p.id AS product_id,
                p.sku,
                p.name,
                p.reorder_point,
                COALESCE(SUM(m.qty), 0) AS stock
            FROM products p
            LEFT JOIN stock_movements m ON m.product_id = p.id
            WHERE p.business_id = $1
            GROUP BY p.id
            ORDER BY p.name ASC
            "#,
        )
        .bind(business_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(balances)
    }

    /// As N movimentações mais recentes do estabelecimento, da mais nova
    /// para a mais antiga, já com SKU/nome do produto para exibição.
    pub async fn recent_movements(
        &self,
        business_id: Uuid,
        limit: i64,
    ) -> Result<Vec<RecentMovement>, AppError> {
        let movements = sqlx::query_as::<_, RecentMovement>(
            r#"
            SELECT
                p.sku,
                p.name,
                m.movement_type,
                m.qty,
                m.source,
                m.created_at
            FROM stock_movements m
            JOIN products p ON p.id = m.product_id
            WHERE p.business_id = $1
            ORDER BY m.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(business_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    /// Histórico de saídas (OUT) de um produto, em ordem cronológica.
    /// É a matéria-prima da projeção de demanda.
    pub async fn out_movements(&self, product_id: Uuid) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT * FROM stock_movements
            WHERE product_id = $1 AND movement_type = 'OUT'
            ORDER BY created_at ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }
}
