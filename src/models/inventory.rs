// src/models/inventory.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Produto (catálogo)
// ---
// Apenas o catálogo: o saldo NÃO mora aqui. Estoque em mãos é sempre
// derivado do livro-razão (stock_movements).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub business_id: Uuid,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub unit: String,
    pub barcode: Option<String>,
    pub reorder_point: i64,
    pub expiry_date: Option<NaiveDate>,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
}

// Dados de catálogo para criar um produto. Entrada dos serviços, já
// validada na borda (handler ou lote de sync).
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    // Ex.: "unit", "kg", "L"
    pub unit: String,
    pub barcode: Option<String>,
    pub reorder_point: i64,
    pub expiry_date: Option<NaiveDate>,
    pub unit_price: f64,
}

// ---
// 2. Fornecedor
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupplierPayload {
    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório."))]
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
}

// ---
// 3. Movimentação de estoque (o livro-razão)
// ---

// IN e abertura entram positivos, OUT entra negativo,
// ADJUST carrega o sinal que o gerente informou.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    In,
    Out,
    Adjust,
}

// Registro imutável: nunca é atualizado nem apagado depois de criado.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub qty: i64,
    pub movement_type: MovementType,
    pub source: String, // "sale", "purchase", "opening", "manual"
    pub unit_cost: Option<f64>,
    pub created_at: DateTime<Utc>,
}

// ---
// 4. Leituras derivadas do livro-razão
// ---

// Saldo de um produto (LEFT JOIN: produto sem movimento responde 0)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductBalance {
    pub product_id: Uuid,
    pub sku: String,
    pub name: String,
    pub reorder_point: i64,
    pub stock: i64,
}

// Movimentação recente, já com a identidade do produto para exibição
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecentMovement {
    pub sku: String,
    pub name: String,
    pub movement_type: MovementType,
    pub qty: i64,
    pub source: String,
    pub created_at: DateTime<Utc>,
}
