//! Infrastructure module - External concerns
//!
//! Configuration, logging setup, the PostgreSQL pool, and the repository
//! implementations including the paginated product query core.

pub mod catalog_repository;
pub mod config;
pub mod database_connection;
pub mod logging;
pub mod product_query;
pub mod product_repository;
pub mod review_repository;

pub use config::AppConfig;
pub use database_connection::DatabaseConnection;
pub use product_repository::PgProductRepository;
