// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::auth::User};

// ---
// Guard de autenticação: valida o Bearer token e injeta o usuário
// nos extensions da requisição.
// ---
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request);
    let user = authenticate(&app_state, token).await?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// ---
// Guard de tenancy: além de autenticar, exige que o usuário já tenha
// passado pelo onboarding (business_id presente). O tenant NUNCA vem de
// header ou de estado global — só do vínculo do próprio usuário.
// ---
pub async fn tenant_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&request);
    let user = authenticate(&app_state, token).await?;

    let business_id = user.business_id.ok_or(AppError::NoBusinessAssigned)?;

    request.extensions_mut().insert(TenantContext(business_id));
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

// Extrai o token Bearer do header de forma síncrona: o empréstimo da
// requisição termina aqui, antes de qualquer `.await`, evitando manter um
// `&Request` (que não é `Sync`) vivo através de um ponto de await.
fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|auth_header| auth_header.strip_prefix("Bearer "))
        .map(str::to_owned)
}

async fn authenticate(app_state: &AppState, token: Option<String>) -> Result<User, AppError> {
    let token = token.ok_or(AppError::InvalidToken)?;
    app_state.auth_service.validate_token(&token).await
}

// Extrator para obter o usuário autenticado diretamente nos handlers
#[derive(Clone)]
pub struct AuthenticatedUser(pub User);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthenticatedUser)
            .ok_or(AppError::InvalidToken)
    }
}

// Extrator do tenant (o estabelecimento do usuário autenticado)
#[derive(Clone, Copy)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<TenantContext>()
            .copied()
            .ok_or(AppError::NoBusinessAssigned)
    }
}
