// src/services/tenancy_service.rs

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BusinessRepository, UserRepository},
    models::{auth::User, tenancy::Business},
};

#[derive(Clone)]
pub struct TenancyService {
    business_repo: BusinessRepository,
    user_repo: UserRepository,
    pool: SqlitePool, // Usamos a pool para iniciar transações
}

impl TenancyService {
    pub fn new(
        business_repo: BusinessRepository,
        user_repo: UserRepository,
        pool: SqlitePool,
    ) -> Self {
        Self {
            business_repo,
            user_repo,
            pool,
        }
    }

    /// LÓGICA DE NEGÓCIO: Cria um novo Estabelecimento e, atomicamente,
    /// vincula o usuário que o criou como seu primeiro membro (dono).
    pub async fn create_business_with_owner(
        &self,
        owner: &User,
        name: &str,
    ) -> Result<Business, AppError> {
        // Um usuário pertence a exatamente um estabelecimento
        if owner.business_id.is_some() {
            return Err(AppError::UserAlreadyOnboarded);
        }

        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria o Estabelecimento (nome único no sistema)
        let new_business = self.business_repo.create_business(&mut *tx, name).await?;

        // 3. Vincula o dono — se falhar, o estabelecimento é desfeito junto
        self.user_repo
            .assign_business(&mut *tx, owner.id, new_business.id)
            .await?;

        // 4. Commit
        tx.commit().await?;

        tracing::info!(
            "🏪 Estabelecimento '{}' criado por {}.",
            new_business.name,
            owner.email
        );

        Ok(new_business)
    }

    pub async fn get_business(&self, id: Uuid) -> Result<Business, AppError> {
        self.business_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NoBusinessAssigned)
    }
}
