// src/db/operations_repo.rs

use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::operations::{Purchase, PurchaseItem, Sale, SaleItem},
};

// Cabeçalhos e itens de venda/compra. As movimentações de estoque
// correspondentes ficam no InventoryRepository — o serviço de operações
// é quem garante que tudo entra na mesma transação.
#[derive(Clone)]
pub struct OperationsRepository {
    pool: SqlitePool,
}

impl OperationsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        user_id: Uuid,
        total_amount: f64,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (id, business_id, user_id, total_amount, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(user_id)
        .bind(total_amount)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    pub async fn add_sale_item<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        product_id: Uuid,
        qty: i64,
        unit_price: f64,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (id, sale_id, product_id, qty, unit_price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(sale_id)
        .bind(product_id)
        .bind(qty)
        .bind(unit_price)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn create_purchase<'e, E>(
        &self,
        executor: E,
        business_id: Uuid,
        user_id: Uuid,
        supplier_id: Option<Uuid>,
        total_cost: f64,
    ) -> Result<Purchase, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let purchase = sqlx::query_as::<_, Purchase>(
            r#"
            INSERT INTO purchases (id, business_id, user_id, supplier_id, total_cost, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(business_id)
        .bind(user_id)
        .bind(supplier_id)
        .bind(total_cost)
        .bind(Utc::now())
        .fetch_one(executor)
        .await?;
        Ok(purchase)
    }

    pub async fn add_purchase_item<'e, E>(
        &self,
        executor: E,
        purchase_id: Uuid,
        product_id: Uuid,
        qty: i64,
        unit_cost: f64,
    ) -> Result<PurchaseItem, AppError>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let item = sqlx::query_as::<_, PurchaseItem>(
            r#"
            INSERT INTO purchase_items (id, purchase_id, product_id, qty, unit_cost)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(purchase_id)
        .bind(product_id)
        .bind(qty)
        .bind(unit_cost)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }
}
