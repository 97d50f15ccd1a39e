// src/handlers/inventory.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, TenantContext},
    models::inventory::NewProduct,
};

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, max = 64, message = "O SKU é obrigatório."))]
    pub sku: String,

    #[validate(length(min = 1, max = 200, message = "O nome é obrigatório."))]
    pub name: String,

    pub category: Option<String>,

    #[serde(default = "default_unit")]
    pub unit: String,

    pub barcode: Option<String>,

    #[validate(range(min = 0, message = "O ponto de reposição não pode ser negativo."))]
    #[serde(default)]
    pub reorder_point: i64,

    pub expiry_date: Option<NaiveDate>,

    #[validate(range(min = 0.0, message = "O preço não pode ser negativo."))]
    #[serde(default)]
    pub unit_price: f64,

    // Se > 0, vira uma movimentação de abertura na mesma transação
    #[validate(range(min = 0, message = "O estoque de abertura não pode ser negativo."))]
    #[serde(default)]
    pub opening_stock: i64,
}

fn default_unit() -> String {
    "unit".to_string()
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = crate::models::inventory::Product),
        (status = 409, description = "SKU já existe neste estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let new_product = NewProduct {
        sku: payload.sku,
        name: payload.name,
        category: payload.category,
        unit: payload.unit,
        barcode: payload.barcode,
        reorder_point: payload.reorder_point,
        expiry_date: payload.expiry_date,
        unit_price: payload.unit_price,
    };

    let product = app_state
        .inventory_service
        .create_product(tenant.0, &user.0, &new_product, payload.opening_stock)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Catálogo do estabelecimento", body = [crate::models::inventory::Product])),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.inventory_service.list_products(tenant.0).await?;

    Ok((StatusCode::OK, Json(products)))
}

// ---
// Fornecedores
// ---

#[utoipa::path(
    post,
    path = "/api/suppliers",
    request_body = crate::models::inventory::CreateSupplierPayload,
    responses((status = 201, description = "Fornecedor criado", body = crate::models::inventory::Supplier)),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Json(payload): Json<crate::models::inventory::CreateSupplierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let supplier = app_state
        .inventory_service
        .create_supplier(
            tenant.0,
            &payload.name,
            payload.phone.as_deref(),
            payload.location.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get,
    path = "/api/suppliers",
    responses((status = 200, description = "Fornecedores do estabelecimento", body = [crate::models::inventory::Supplier])),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = app_state.inventory_service.list_suppliers(tenant.0).await?;

    Ok((StatusCode::OK, Json(suppliers)))
}

// ---
// Estoque derivado do livro-razão
// ---

#[utoipa::path(
    get,
    path = "/api/stock",
    responses((status = 200, description = "Saldo de todos os produtos", body = [crate::models::inventory::ProductBalance])),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn stock_balances(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let balances = app_state.inventory_service.stock_balances(tenant.0).await?;

    Ok((StatusCode::OK, Json(balances)))
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BalanceResponse {
    pub product_id: Uuid,
    pub stock: i64,
}

#[utoipa::path(
    get,
    path = "/api/stock/{product_id}",
    params(("product_id" = Uuid, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Saldo do produto", body = BalanceResponse),
        (status = 404, description = "Produto não encontrado neste estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn product_balance(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let stock = app_state
        .inventory_service
        .product_balance(tenant.0, product_id)
        .await?;

    Ok((StatusCode::OK, Json(BalanceResponse { product_id, stock })))
}

// ---
// Ajuste manual de inventário
// ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockPayload {
    pub product_id: Uuid,

    // Sinal explícito: +3 achou sobra, -3 achou falta
    pub qty: i64,
}

#[utoipa::path(
    post,
    path = "/api/stock/adjust",
    request_body = AdjustStockPayload,
    responses(
        (status = 201, description = "Ajuste lançado no livro-razão", body = crate::models::inventory::StockMovement),
        (status = 400, description = "Quantidade zero"),
        (status = 404, description = "Produto não encontrado neste estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn adjust_stock(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<AdjustStockPayload>,
) -> Result<impl IntoResponse, AppError> {
    let movement = app_state
        .inventory_service
        .adjust_stock(tenant.0, &user.0, payload.product_id, payload.qty)
        .await?;

    Ok((StatusCode::CREATED, Json(movement)))
}

// ---
// Atividade recente
// ---

#[derive(Debug, Deserialize)]
pub struct ActivityParams {
    pub limit: Option<i64>,
}

#[utoipa::path(
    get,
    path = "/api/activity",
    params(("limit" = Option<i64>, Query, description = "Quantidade de movimentações (padrão 10)")),
    responses((status = 200, description = "Movimentações recentes", body = [crate::models::inventory::RecentMovement])),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn recent_activity(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Query(params): Query<ActivityParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let movements = app_state
        .inventory_service
        .recent_movements(tenant.0, limit)
        .await?;

    Ok((StatusCode::OK, Json(movements)))
}

// ---
// Projeção de demanda
// ---

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub days: Option<u32>,
}

#[utoipa::path(
    get,
    path = "/api/forecast/{product_id}",
    params(
        ("product_id" = Uuid, Path, description = "ID do produto"),
        ("days" = Option<u32>, Query, description = "Horizonte em dias (padrão 30)")
    ),
    responses(
        (status = 200, description = "Projeção de demanda", body = crate::models::forecast::DemandForecast),
        (status = 404, description = "Produto não encontrado neste estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "inventory"
)]
pub async fn product_forecast(
    State(app_state): State<AppState>,
    tenant: TenantContext,
    Path(product_id): Path<Uuid>,
    Query(params): Query<ForecastParams>,
) -> Result<impl IntoResponse, AppError> {
    let horizon_days = params.days.unwrap_or(30).clamp(1, 365);

    let forecast = app_state
        .forecast_service
        .forecast_demand(tenant.0, product_id, horizon_days)
        .await?;

    Ok((StatusCode::OK, Json(forecast)))
}
