// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// As categorias seguem o que as operações do núcleo precisam distinguir:
// validação, não-encontrado/não-pertence, conflito e falha de armazenamento.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Quantidade zero (ou com sinal errado para a operação) numa movimentação
    #[error("Quantidade inválida: {0}")]
    InvalidQuantity(i64),

    #[error("A operação precisa de pelo menos um item")]
    EmptyLineItems,

    #[error("E-mail já existe")]
    EmailAlreadyExists,

    #[error("Já existe um estabelecimento com o nome '{0}'")]
    BusinessNameAlreadyExists(String),

    #[error("Já existe um produto com o SKU '{0}' neste estabelecimento")]
    SkuAlreadyExists(String),

    #[error("Credenciais inválidas")]
    InvalidCredentials,

    #[error("Token inválido")]
    InvalidToken,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("Usuário já pertence a um estabelecimento")]
    UserAlreadyOnboarded,

    // O usuário autenticado ainda não passou pelo onboarding
    #[error("Usuário não está vinculado a nenhum estabelecimento")]
    NoBusinessAssigned,

    #[error("Apenas gerentes podem executar esta operação")]
    ManagerRoleRequired,

    // "Não existe OU não é seu": nunca confundir com saldo zero.
    // Um produto de outro tenant responde exatamente como um inexistente.
    #[error("Produto {0} não encontrado neste estabelecimento")]
    ProductNotFound(Uuid),

    #[error("Fornecedor {0} não encontrado neste estabelecimento")]
    SupplierNotFound(Uuid),

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidQuantity(_) | AppError::EmptyLineItems => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            AppError::EmailAlreadyExists
            | AppError::BusinessNameAlreadyExists(_)
            | AppError::SkuAlreadyExists(_)
            | AppError::UserAlreadyOnboarded => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidCredentials | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::NoBusinessAssigned | AppError::ManagerRoleRequired => {
                (StatusCode::FORBIDDEN, self.to_string())
            }

            AppError::UserNotFound
            | AppError::ProductNotFound(_)
            | AppError::SupplierNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            // Todos os outros (DatabaseError, InternalServerError...) viram 500.
            // O `tracing` loga a mensagem detalhada; o cliente recebe algo genérico.
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
