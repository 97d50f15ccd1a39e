// src/handlers/tenancy.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, TenantContext},
    models::tenancy::{Business, CreateBusinessPayload},
};

#[utoipa::path(
    post,
    path = "/api/businesses",
    request_body = CreateBusinessPayload,
    responses(
        (status = 201, description = "Estabelecimento criado", body = Business),
        (status = 409, description = "Nome já em uso")
    ),
    security(("bearer_auth" = [])),
    tag = "tenancy"
)]
pub async fn create_business(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateBusinessPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let business = app_state
        .tenancy_service
        .create_business_with_owner(&user.0, &payload.name)
        .await?;

    Ok((StatusCode::CREATED, Json(business)))
}

#[utoipa::path(
    get,
    path = "/api/businesses/me",
    responses((status = 200, description = "Estabelecimento do usuário", body = Business)),
    security(("bearer_auth" = [])),
    tag = "tenancy"
)]
pub async fn get_my_business(
    State(app_state): State<AppState>,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    let business = app_state.tenancy_service.get_business(tenant.0).await?;

    Ok((StatusCode::OK, Json(business)))
}
