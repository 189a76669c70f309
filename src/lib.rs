//! Shop Catalog - Product catalog service core
//!
//! This crate provides the storage and query core of a product catalog:
//! paginated, filterable product listings over PostgreSQL with image folding,
//! plus CRUD for categories, sub-categories, brands and reviews.

// Module declarations
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod utils;

// Re-export the types most callers need
pub use domain::catalog::{Brand, Category, Image, Product, ProductPage, Review, SubCategory};
pub use domain::filter::ProductFilter;
pub use domain::pagination::PageRequest;
pub use application::error::ServiceError;
