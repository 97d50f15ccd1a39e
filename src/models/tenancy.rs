// src/models/tenancy.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// Business (O "Estabelecimento")
// ---
// A fronteira de isolamento: todo dado de catálogo e de transação
// pertence a exatamente um Business.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Business {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

// Dados para criar o estabelecimento no onboarding
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBusinessPayload {
    #[validate(length(min = 1, max = 160, message = "O nome é obrigatório."))]
    pub name: String,
}
