pub mod auth_service;
pub mod forecast_service;
pub mod inventory_service;
pub mod operations_service;
pub mod tenancy_service;
