// src/handlers/operations.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, TenantContext},
    models::operations::{PurchaseLine, SaleLine, SyncPayload},
};

// ---
// Payload: venda com N linhas
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSalePayload {
    #[validate(nested)]
    pub items: Vec<SaleLine>,
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = crate::models::operations::Sale),
        (status = 404, description = "Alguma linha referencia produto de fora do estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "operations"
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let sale = app_state
        .operations_service
        .record_sale(tenant.0, &user.0, &payload.items)
        .await?;

    Ok((StatusCode::CREATED, Json(sale)))
}

// ---
// Payload: compra com N linhas (fornecedor opcional)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchasePayload {
    pub supplier_id: Option<Uuid>,

    #[validate(nested)]
    pub items: Vec<PurchaseLine>,
}

#[utoipa::path(
    post,
    path = "/api/purchases",
    request_body = CreatePurchasePayload,
    responses(
        (status = 201, description = "Compra registrada", body = crate::models::operations::Purchase),
        (status = 404, description = "Produto ou fornecedor de fora do estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "operations"
)]
pub async fn create_purchase(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreatePurchasePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let purchase = app_state
        .operations_service
        .record_purchase(tenant.0, &user.0, payload.supplier_id, &payload.items)
        .await?;

    Ok((StatusCode::CREATED, Json(purchase)))
}

#[utoipa::path(
    post,
    path = "/api/sync",
    request_body = SyncPayload,
    responses(
        (status = 200, description = "Lote aplicado", body = crate::models::operations::SyncReport),
        (status = 404, description = "Alguma linha referencia produto de fora do estabelecimento")
    ),
    security(("bearer_auth" = [])),
    tag = "operations"
)]
pub async fn sync_batch(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<SyncPayload>,
) -> Result<impl IntoResponse, AppError> {
    let report = app_state
        .operations_service
        .sync_batch(tenant.0, &user.0, &payload)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}
