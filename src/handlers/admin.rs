// src/handlers/admin.rs
//
// Administração de equipe: só gerentes enxergam e criam usuários.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::{AuthenticatedUser, TenantContext},
    models::auth::{CreateUserPayload, User, UserRole},
};

#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Usuários do estabelecimento", body = [User]),
        (status = 403, description = "Apenas gerentes")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
) -> Result<impl IntoResponse, AppError> {
    if !user.0.is_manager() {
        return Err(AppError::ManagerRoleRequired);
    }

    let users = app_state.auth_service.list_users(tenant.0).await?;

    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    post,
    path = "/api/admin/users",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 403, description = "Apenas gerentes"),
        (status = 409, description = "E-mail já registrado")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    tenant: TenantContext,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    // Sem papel explícito, entra como staff
    let role = payload.role.unwrap_or(UserRole::Staff);

    let new_user = app_state
        .auth_service
        .create_user(tenant.0, &user.0, &payload.email, &payload.password, role)
        .await?;

    Ok((StatusCode::CREATED, Json(new_user)))
}
