// src/services/auth_service.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, User, UserRole},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    pool: SqlitePool,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, pool: SqlitePool) -> Self {
        Self {
            user_repo,
            jwt_secret,
            pool,
        }
    }

    /// Registra uma conta nova. O usuário nasce como gerente SEM
    /// estabelecimento — o onboarding (criar o Business) vem depois.
    pub async fn register_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        // O hashing é pesado de CPU, então sai da thread async
        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(&self.pool, None, email, &hashed_password, UserRole::Manager)
            .await?;

        tracing::info!("👤 Usuário {} registrado.", new_user.email);

        self.create_token(new_user.id)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();

        // Executa a verificação em uma thread separada
        let is_password_valid =
            tokio::task::spawn_blocking(move || verify(&password_clone, &password_hash_clone))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }

        self.create_token(user.id)
    }

    /// Decodifica o token e carrega o usuário correspondente (middleware).
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        self.user_repo
            .find_by_id(token_data.claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    // ---
    // Administração de equipe (exige papel de gerente)
    // ---

    /// Gerente cria um usuário da equipe no MESMO estabelecimento.
    pub async fn create_user(
        &self,
        business_id: Uuid,
        acting_user: &User,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<User, AppError> {
        if !acting_user.is_manager() {
            return Err(AppError::ManagerRoleRequired);
        }

        let password_clone = password.to_owned();
        let hashed_password =
            tokio::task::spawn_blocking(move || hash(&password_clone, bcrypt::DEFAULT_COST))
                .await
                .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(
                &self.pool,
                Some(business_id),
                email,
                &hashed_password,
                role,
            )
            .await?;

        tracing::info!(
            "👥 Gerente {} criou o usuário {} ({:?}).",
            acting_user.email,
            new_user.email,
            new_user.role
        );

        Ok(new_user)
    }

    pub async fn list_users(&self, business_id: Uuid) -> Result<Vec<User>, AppError> {
        self.user_repo.list_for_business(business_id).await
    }

    // Gera o JWT com validade de 24h
    fn create_token(&self, user_id: Uuid) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            exp: (now + chrono::Duration::hours(24)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}
