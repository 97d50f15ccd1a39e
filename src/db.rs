pub mod inventory_repo;
pub use inventory_repo::InventoryRepository;
pub mod operations_repo;
pub use operations_repo::OperationsRepository;
pub mod tenancy_repo;
pub use tenancy_repo::BusinessRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
