//! Catalog entities
//!
//! Query-result views and write models for products, categories,
//! sub-categories, brands and reviews. Products are assembled fresh from
//! SQL rows on every request and never cached or mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A product image reference. Owned by exactly one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Image {
    pub url: String,
    pub image_type: String,
}

/// Denormalized product projection as returned by the listing and lookup
/// queries: scalar columns plus joined display names, the folded image list
/// and the review aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub brand_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub featured: bool,
    pub slug: String,
    pub category_name: String,
    pub sub_category_name: String,
    pub brand_name: String,
    pub images: Vec<Image>,
    pub review_count: i64,
    pub average_rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Write model for creating or replacing a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub brand_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub featured: bool,
    pub slug: String,
}

/// One page of products together with the paging echo and the computed
/// page count.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub limit: u32,
    pub page: u32,
    pub max_pages: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub featured: bool,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub featured: bool,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SubCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubCategory {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBrand {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReview {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub title: String,
    pub content: String,
}

/// Review aggregate for a single product. Zero reviews yields `0` / `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ProductRating {
    pub average_rating: f64,
    pub review_count: i64,
}
