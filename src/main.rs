// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pdv_backend::config::AppState;
use pdv_backend::docs::ApiDoc;
use pdv_backend::handlers;
use pdv_backend::middleware::auth::{auth_guard, tenant_guard};

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário autenticado (ainda sem exigir estabelecimento)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Onboarding: criar o estabelecimento exige só autenticação;
    // consultar o próprio exige o vínculo completo.
    let business_routes = Router::new()
        .route("/", post(handlers::tenancy::create_business))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ))
        .merge(
            Router::new()
                .route("/me", get(handlers::tenancy::get_my_business))
                .layer(axum_middleware::from_fn_with_state(
                    app_state.clone(),
                    tenant_guard,
                )),
        );

    // Administração de equipe (gerente)
    let admin_routes = Router::new()
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Catálogo, estoque e projeção
    let inventory_routes = Router::new()
        .route(
            "/products",
            post(handlers::inventory::create_product).get(handlers::inventory::list_products),
        )
        .route(
            "/suppliers",
            post(handlers::inventory::create_supplier).get(handlers::inventory::list_suppliers),
        )
        .route("/stock", get(handlers::inventory::stock_balances))
        .route("/stock/adjust", post(handlers::inventory::adjust_stock))
        .route(
            "/stock/{product_id}",
            get(handlers::inventory::product_balance),
        )
        .route("/activity", get(handlers::inventory::recent_activity))
        .route(
            "/forecast/{product_id}",
            get(handlers::inventory::product_forecast),
        );

    // Vendas, compras e sincronização offline
    let operations_routes = Router::new()
        .route("/sales", post(handlers::operations::create_sale))
        .route("/purchases", post(handlers::operations::create_purchase))
        .route("/sync", post(handlers::operations::sync_batch));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/businesses", business_routes)
        .nest("/api/admin", admin_routes)
        .nest(
            "/api",
            inventory_routes.merge(operations_routes).layer(
                axum_middleware::from_fn_with_state(app_state.clone(), tenant_guard),
            ),
        )
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}

