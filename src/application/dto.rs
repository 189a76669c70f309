//! Data Transfer Objects for the catalog use cases
//!
//! Input shapes accepted from callers. Slugs are never accepted from the
//! outside; the use cases derive them from the entity name.

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::catalog::{NewBrand, NewCategory, NewProduct, NewReview, NewSubCategory};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductDto {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub sub_category_id: Uuid,
    pub brand_id: Uuid,
    pub price: f64,
    pub quantity: i32,
    pub featured: bool,
}

impl CreateProductDto {
    pub fn into_new_product(self, slug: String) -> NewProduct {
        NewProduct {
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            brand_id: self.brand_id,
            price: self.price,
            quantity: self.quantity,
            featured: self.featured,
            slug,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategoryDto {
    pub name: String,
    pub description: String,
    pub featured: bool,
}

impl CreateCategoryDto {
    pub fn into_new_category(self, slug: String) -> NewCategory {
        NewCategory {
            name: self.name,
            description: self.description,
            featured: self.featured,
            slug,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubCategoryDto {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
}

impl CreateSubCategoryDto {
    pub fn into_new_sub_category(self, slug: String) -> NewSubCategory {
        NewSubCategory {
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            slug,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrandDto {
    pub name: String,
    pub description: String,
}

impl From<CreateBrandDto> for NewBrand {
    fn from(dto: CreateBrandDto) -> Self {
        NewBrand {
            name: dto.name,
            description: dto.description,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReviewDto {
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub rating: i32,
    pub title: String,
    pub content: String,
}

impl From<CreateReviewDto> for NewReview {
    fn from(dto: CreateReviewDto) -> Self {
        NewReview {
            product_id: dto.product_id,
            user_id: dto.user_id,
            rating: dto.rating,
            title: dto.title,
            content: dto.content,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AttachImageDto {
    pub url: String,
    pub image_type: String,
}
