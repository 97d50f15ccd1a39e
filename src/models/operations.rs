// src/models/operations.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Venda
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub qty: i64,
    pub unit_price: f64,
}

// Uma linha de venda vinda do caixa: (produto, qty > 0, preço praticado)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qty: i64,

    #[validate(range(min = 0.0, message = "O preço não pode ser negativo."))]
    pub unit_price: f64,
}

// ---
// 2. Compra (espelho da venda, para entrada de estoque)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub id: Uuid,
    pub business_id: Uuid,
    pub user_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub product_id: Uuid,
    pub qty: i64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLine {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub qty: i64,

    #[validate(range(min = 0.0, message = "O custo não pode ser negativo."))]
    pub unit_cost: f64,
}

// ---
// 3. Sincronização offline
// ---
// Clientes offline-first acumulam operações localmente e reenviam tudo
// num único lote ao reconectar.

// Produto criado offline: só os campos que o caixa conhece.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SyncProduct {
    #[validate(length(min = 1, max = 64, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório."))]
    pub name: String,

    pub barcode: Option<String>,

    #[serde(default)]
    pub reorder_point: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SyncSale {
    pub items: Vec<SaleLine>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SyncPurchase {
    pub items: Vec<PurchaseLine>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SyncPayload {
    #[serde(default)]
    pub products: Vec<SyncProduct>,

    #[serde(default)]
    pub sales: Vec<SyncSale>,

    #[serde(default)]
    pub purchases: Vec<SyncPurchase>,
}

// Contagem de entidades criadas por categoria
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
pub struct SyncReport {
    pub products: u32,
    pub sales: u32,
    pub purchases: u32,
}
