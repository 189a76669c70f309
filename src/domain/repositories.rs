//! Repository interfaces for the product catalog
//!
//! Contains trait definitions for data access patterns. Implementations
//! live in the infrastructure layer; use cases depend only on these traits.

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::{
    Brand, Category, Image, NewBrand, NewCategory, NewProduct, NewReview, NewSubCategory,
    Product, ProductRating, Review, SubCategory,
};
use crate::domain::filter::ProductFilter;
use crate::domain::pagination::PageRequest;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, product: &NewProduct) -> Result<Uuid>;
    /// Replaces the mutable product columns. Returns the number of rows hit.
    async fn update(&self, id: Uuid, product: &NewProduct) -> Result<u64>;
    async fn delete(&self, id: Uuid) -> Result<u64>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>>;
    /// One page of products under `filter`, plus the pre-join total count
    /// of the filtered set (0 when the page is empty).
    async fn list(&self, filter: &ProductFilter, page: &PageRequest) -> Result<(Vec<Product>, i64)>;
    async fn add_image(&self, product_id: Uuid, image: &Image) -> Result<Uuid>;
    async fn images(&self, product_id: Uuid) -> Result<Vec<Image>>;
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, category: &NewCategory) -> Result<Uuid>;
    async fn list(&self, page: &PageRequest) -> Result<Vec<Category>>;
    async fn featured(&self) -> Result<Vec<Category>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn update(&self, id: Uuid, category: &NewCategory) -> Result<u64>;
    async fn delete(&self, id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait SubCategoryRepository: Send + Sync {
    async fn create(&self, sub_category: &NewSubCategory) -> Result<Uuid>;
    async fn list_for_category(&self, category_id: Uuid, page: &PageRequest)
        -> Result<Vec<SubCategory>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>>;
    async fn find_by_slug(&self, slug: &str) -> Result<Option<SubCategory>>;
    /// Updates name, description and slug. The parent category is fixed.
    async fn update(&self, id: Uuid, sub_category: &NewSubCategory) -> Result<u64>;
    async fn delete(&self, id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait BrandRepository: Send + Sync {
    async fn create(&self, brand: &NewBrand) -> Result<Uuid>;
    async fn list(&self) -> Result<Vec<Brand>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Brand>>;
    async fn update(&self, id: Uuid, brand: &NewBrand) -> Result<u64>;
    async fn delete(&self, id: Uuid) -> Result<u64>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &NewReview) -> Result<Uuid>;
    async fn for_product(&self, product_id: Uuid) -> Result<Vec<Review>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>>;
    async fn rating(&self, product_id: Uuid) -> Result<ProductRating>;
}
