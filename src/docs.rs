// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Admin ---
        handlers::admin::list_users,
        handlers::admin::create_user,

        // --- Tenancy ---
        handlers::tenancy::create_business,
        handlers::tenancy::get_my_business,

        // --- Inventory ---
        handlers::inventory::create_product,
        handlers::inventory::list_products,
        handlers::inventory::create_supplier,
        handlers::inventory::list_suppliers,
        handlers::inventory::stock_balances,
        handlers::inventory::product_balance,
        handlers::inventory::adjust_stock,
        handlers::inventory::recent_activity,
        handlers::inventory::product_forecast,

        // --- Operations ---
        handlers::operations::create_sale,
        handlers::operations::create_purchase,
        handlers::operations::sync_batch,
    ),
    components(
        schemas(
            models::auth::User,
            models::auth::UserRole,
            models::auth::AuthResponse,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::CreateUserPayload,
            models::tenancy::Business,
            models::tenancy::CreateBusinessPayload,
            models::inventory::Product,
            models::inventory::Supplier,
            models::inventory::CreateSupplierPayload,
            models::inventory::MovementType,
            models::inventory::StockMovement,
            models::inventory::ProductBalance,
            models::inventory::RecentMovement,
            models::operations::Sale,
            models::operations::SaleItem,
            models::operations::SaleLine,
            models::operations::Purchase,
            models::operations::PurchaseItem,
            models::operations::PurchaseLine,
            models::operations::SyncProduct,
            models::operations::SyncSale,
            models::operations::SyncPurchase,
            models::operations::SyncPayload,
            models::operations::SyncReport,
            models::forecast::DemandForecast,
            handlers::inventory::CreateProductPayload,
            handlers::inventory::AdjustStockPayload,
            handlers::inventory::BalanceResponse,
            handlers::operations::CreateSalePayload,
            handlers::operations::CreatePurchasePayload,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registro e login"),
        (name = "users", description = "Usuário autenticado"),
        (name = "admin", description = "Administração de equipe"),
        (name = "tenancy", description = "Onboarding do estabelecimento"),
        (name = "inventory", description = "Catálogo, estoque e projeção"),
        (name = "operations", description = "Vendas, compras e sincronização")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}
