// src/services/operations_service.rs

use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{InventoryRepository, OperationsRepository},
    models::{
        auth::User,
        inventory::{MovementType, NewProduct},
        operations::{
            Purchase, PurchaseLine, Sale, SaleLine, SyncPayload, SyncReport,
        },
    },
};

// O "montador de transações": traduz uma operação de negócio (venda,
// compra, sincronização) num conjunto coerente de escritas — cabeçalho,
// itens e movimentações de estoque — dentro de UMA transação.
//
// Ou tudo fica visível junto, ou nada fica.
#[derive(Clone)]
pub struct OperationsService {
    operations_repo: OperationsRepository,
    inventory_repo: InventoryRepository,
    pool: SqlitePool,
}

impl OperationsService {
    pub fn new(
        operations_repo: OperationsRepository,
        inventory_repo: InventoryRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            operations_repo,
            inventory_repo,
            pool,
        }
    }

    // --- VENDA ---
    pub async fn record_sale(
        &self,
        business_id: Uuid,
        acting_user: &User,
        lines: &[SaleLine],
    ) -> Result<Sale, AppError> {
        let mut tx = self.pool.begin().await?;

        let sale = self
            .insert_sale(&mut tx, business_id, acting_user, lines)
            .await?;
        // Qualquer linha inválida acima aborta aqui: o drop do `tx` sem
        // commit desfaz tudo, inclusive o cabeçalho já inserido.

        tx.commit().await?;

        tracing::info!(
            "🧾 Venda {} registrada ({} item(ns), total {:.2}).",
            sale.id,
            lines.len(),
            sale.total_amount
        );

        Ok(sale)
    }

    // --- COMPRA ---
    pub async fn record_purchase(
        &self,
        business_id: Uuid,
        acting_user: &User,
        supplier_id: Option<Uuid>,
        lines: &[PurchaseLine],
    ) -> Result<Purchase, AppError> {
        let mut tx = self.pool.begin().await?;

        let purchase = self
            .insert_purchase(&mut tx, business_id, acting_user, supplier_id, lines)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "🚚 Compra {} registrada ({} item(ns), total {:.2}).",
            purchase.id,
            lines.len(),
            purchase.total_cost
        );

        Ok(purchase)
    }

    // --- SINCRONIZAÇÃO OFFLINE ---
    //
    // O lote inteiro roda numa transação só: nunca sobra cabeçalho de
    // venda/compra sem as suas movimentações.
    //
    // Produtos são idempotentes por SKU (skip-on-conflict, não upsert).
    // Vendas e compras são aplicadas incondicionalmente: reenviar o mesmo
    // lote conta em dobro. A chave de idempotência por transação ficou de
    // fora por enquanto — limitação conhecida do protocolo de sync.
    pub async fn sync_batch(
        &self,
        business_id: Uuid,
        acting_user: &User,
        payload: &SyncPayload,
    ) -> Result<SyncReport, AppError> {
        let mut report = SyncReport::default();
        let mut tx = self.pool.begin().await?;

        for p in &payload.products {
            let known = self
                .inventory_repo
                .find_product_by_sku(&mut *tx, business_id, &p.sku)
                .await?;
            if known.is_some() {
                continue;
            }

            let new_product = NewProduct {
                sku: p.sku.clone(),
                name: p.name.clone(),
                category: None,
                unit: "unit".to_string(),
                barcode: p.barcode.clone(),
                reorder_point: p.reorder_point,
                expiry_date: None,
                unit_price: 0.0,
            };
            self.inventory_repo
                .create_product(&mut *tx, business_id, &new_product)
                .await?;
            report.products += 1;
        }

        for s in &payload.sales {
            self.insert_sale(&mut tx, business_id, acting_user, &s.items)
                .await?;
            report.sales += 1;
        }

        for p in &payload.purchases {
            self.insert_purchase(&mut tx, business_id, acting_user, None, &p.items)
                .await?;
            report.purchases += 1;
        }

        tx.commit().await?;

        tracing::info!(
            "🔄 Sync aplicado: {} produto(s), {} venda(s), {} compra(s).",
            report.products,
            report.sales,
            report.purchases
        );

        Ok(report)
    }

    // ---
    // Miolo compartilhado entre a operação avulsa e o lote de sync.
    // Sempre roda dentro da transação do chamador.
    // ---

    async fn insert_sale(
        &self,
        tx: &mut SqliteConnection,
        business_id: Uuid,
        acting_user: &User,
        lines: &[SaleLine],
    ) -> Result<Sale, AppError> {
        // Valida TODAS as linhas antes de escrever qualquer coisa
        self.check_sale_lines(tx, business_id, lines).await?;

        let total_amount: f64 = lines.iter().map(|l| l.qty as f64 * l.unit_price).sum();

        let sale = self
            .operations_repo
            .create_sale(&mut *tx, business_id, acting_user.id, total_amount)
            .await?;

        for line in lines {
            self.operations_repo
                .add_sale_item(&mut *tx, sale.id, line.product_id, line.qty, line.unit_price)
                .await?;

            // Saída de estoque: quantidade negada, uma movimentação por linha
            self.inventory_repo
                .record_movement(
                    &mut *tx,
                    line.product_id,
                    acting_user.id,
                    -line.qty.abs(),
                    MovementType::Out,
                    "sale",
                    None,
                )
                .await?;
        }

        Ok(sale)
    }

    async fn insert_purchase(
        &self,
        tx: &mut SqliteConnection,
        business_id: Uuid,
        acting_user: &User,
        supplier_id: Option<Uuid>,
        lines: &[PurchaseLine],
    ) -> Result<Purchase, AppError> {
        if lines.is_empty() {
            return Err(AppError::EmptyLineItems);
        }

        // Fornecedor (se informado) precisa existir E ser deste tenant
        if let Some(supplier_id) = supplier_id {
            self.inventory_repo
                .find_supplier(&mut *tx, business_id, supplier_id)
                .await?
                .ok_or(AppError::SupplierNotFound(supplier_id))?;
        }

        for line in lines {
            if line.qty <= 0 {
                return Err(AppError::InvalidQuantity(line.qty));
            }
            self.inventory_repo
                .find_product(&mut *tx, business_id, line.product_id)
                .await?
                .ok_or(AppError::ProductNotFound(line.product_id))?;
        }

        let total_cost: f64 = lines.iter().map(|l| l.qty as f64 * l.unit_cost).sum();

        let purchase = self
            .operations_repo
            .create_purchase(
                &mut *tx,
                business_id,
                acting_user.id,
                supplier_id,
                total_cost,
            )
            .await?;

        for line in lines {
            self.operations_repo
                .add_purchase_item(
                    &mut *tx,
                    purchase.id,
                    line.product_id,
                    line.qty,
                    line.unit_cost,
                )
                .await?;

            // Entrada de estoque carregando o custo unitário pago
            self.inventory_repo
                .record_movement(
                    &mut *tx,
                    line.product_id,
                    acting_user.id,
                    line.qty.abs(),
                    MovementType::In,
                    "purchase",
                    Some(line.unit_cost),
                )
                .await?;
        }

        Ok(purchase)
    }

    async fn check_sale_lines(
        &self,
        tx: &mut SqliteConnection,
        business_id: Uuid,
        lines: &[SaleLine],
    ) -> Result<(), AppError> {
        if lines.is_empty() {
            return Err(AppError::EmptyLineItems);
        }

        for line in lines {
            if line.qty <= 0 {
                return Err(AppError::InvalidQuantity(line.qty));
            }
            // Produto de fora do tenant falha a operação INTEIRA
            self.inventory_repo
                .find_product(&mut *tx, business_id, line.product_id)
                .await?
                .ok_or(AppError::ProductNotFound(line.product_id))?;
        }

        Ok(())
    }
}
