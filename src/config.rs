// src/config.rs

use std::{env, str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    db::{BusinessRepository, InventoryRepository, OperationsRepository, UserRepository},
    services::{
        auth_service::AuthService, forecast_service::ForecastService,
        inventory_service::InventoryService, operations_service::OperationsService,
        tenancy_service::TenancyService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub auth_service: AuthService,
    pub tenancy_service: TenancyService,
    pub inventory_service: InventoryService,
    pub operations_service: OperationsService,
    pub forecast_service: ForecastService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // SQLite embutido: cria o arquivo se não existir e liga as FKs,
        // que o SQLite desliga por padrão.
        let options = SqliteConnectOptions::from_str(&database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::with_pool(db_pool, jwt_secret))
    }

    /// Monta o gráfico de dependências sobre uma pool já existente
    /// (os testes de integração usam isto com um banco em memória).
    pub fn with_pool(db_pool: SqlitePool, jwt_secret: String) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let business_repo = BusinessRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());
        let operations_repo = OperationsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo.clone(), jwt_secret, db_pool.clone());
        let tenancy_service =
            TenancyService::new(business_repo, user_repo, db_pool.clone());
        let inventory_service = InventoryService::new(inventory_repo.clone(), db_pool.clone());
        let operations_service =
            OperationsService::new(operations_repo, inventory_repo.clone(), db_pool.clone());
        let forecast_service = ForecastService::new(inventory_repo, db_pool.clone());

        Self {
            db_pool,
            auth_service,
            tenancy_service,
            inventory_service,
            operations_service,
            forecast_service,
        }
    }
}
