// tests/common/mod.rs
//
// Infra compartilhada dos testes de integração: banco SQLite em memória
// com as migrações aplicadas, e o fluxo completo de onboarding (registro
// da conta + criação do estabelecimento).

use std::str::FromStr;

use pdv_backend::config::AppState;
use pdv_backend::models::{auth::User, tenancy::Business};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub async fn test_state() -> AppState {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    // Uma conexão só: cada conexão de um ':memory:' teria um banco próprio
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!().run(&pool).await.unwrap();

    AppState::with_pool(pool, "segredo-de-teste".to_string())
}

/// Registra uma conta e cria um estabelecimento para ela, devolvendo o
/// usuário já vinculado (o mesmo caminho que o onboarding real percorre).
pub async fn onboard(state: &AppState, email: &str, business_name: &str) -> (Business, User) {
    let token = state
        .auth_service
        .register_user(email, "senha123")
        .await
        .unwrap();

    let user = state.auth_service.validate_token(&token).await.unwrap();

    let business = state
        .tenancy_service
        .create_business_with_owner(&user, business_name)
        .await
        .unwrap();

    // Recarrega: o vínculo com o estabelecimento acabou de ser gravado
    let user = state.auth_service.validate_token(&token).await.unwrap();
    assert_eq!(user.business_id, Some(business.id));

    (business, user)
}

pub async fn count(state: &AppState, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&state.db_pool)
        .await
        .unwrap()
}
