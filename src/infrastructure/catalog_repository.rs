//! Postgres repositories for categories, sub-categories and brands
//!
//! Straight one-statement-per-operation data access over the taxonomy
//! tables.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{
    Brand, Category, NewBrand, NewCategory, NewSubCategory, SubCategory,
};
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::{BrandRepository, CategoryRepository, SubCategoryRepository};

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, category: &NewCategory) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO product_category (name, description, featured, slug)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.featured)
        .bind(&category.slug)
        .fetch_one(&self.pool)
        .await
        .context("error creating category")?;
        Ok(id)
    }

    async fn list(&self, page: &PageRequest) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, featured, slug
            FROM product_category
            ORDER BY name
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .context("error fetching categories")?;
        Ok(categories)
    }

    async fn featured(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, featured, slug
            FROM product_category
            WHERE featured = true
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("error fetching featured categories")?;
        Ok(categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, featured, slug FROM product_category WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching category")?;
        Ok(category)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, featured, slug FROM product_category WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching category by slug")?;
        Ok(category)
    }

    async fn update(&self, id: Uuid, category: &NewCategory) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE product_category
            SET name = $1, description = $2, featured = $3, slug = $4
            WHERE id = $5
            "#,
        )
        .bind(&category.name)
        .bind(&category.description)
        .bind(category.featured)
        .bind(&category.slug)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("error updating category")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM product_category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("error deleting category")?;
        Ok(result.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgSubCategoryRepository {
    pool: PgPool,
}

impl PgSubCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubCategoryRepository for PgSubCategoryRepository {
    async fn create(&self, sub_category: &NewSubCategory) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO product_sub_category (name, description, category_id, slug)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&sub_category.name)
        .bind(&sub_category.description)
        .bind(sub_category.category_id)
        .bind(&sub_category.slug)
        .fetch_one(&self.pool)
        .await
        .context("error creating sub-category")?;
        Ok(id)
    }

    async fn list_for_category(&self, category_id: Uuid, page: &PageRequest)
        -> Result<Vec<SubCategory>> {
        let sub_categories = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, description, category_id, slug
            FROM product_sub_category
            WHERE category_id = $1
            ORDER BY name
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(category_id)
        .bind(i64::from(page.limit()))
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .context("error fetching sub-categories")?;
        Ok(sub_categories)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<SubCategory>> {
        let sub_category = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, description, category_id, slug
            FROM product_sub_category
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching sub-category")?;
        Ok(sub_category)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<SubCategory>> {
        let sub_category = sqlx::query_as::<_, SubCategory>(
            r#"
            SELECT id, name, description, category_id, slug
            FROM product_sub_category
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching sub-category by slug")?;
        Ok(sub_category)
    }

    async fn update(&self, id: Uuid, sub_category: &NewSubCategory) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE product_sub_category
            SET name = $1, description = $2, slug = $3
            WHERE id = $4
            "#,
        )
        .bind(&sub_category.name)
        .bind(&sub_category.description)
        .bind(&sub_category.slug)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("error updating sub-category")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM product_sub_category WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("error deleting sub-category")?;
        Ok(result.rows_affected())
    }
}

#[derive(Clone)]
pub struct PgBrandRepository {
    pool: PgPool,
}

impl PgBrandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BrandRepository for PgBrandRepository {
    async fn create(&self, brand: &NewBrand) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "INSERT INTO product_brand (name, description) VALUES ($1, $2) RETURNING id",
        )
        .bind(&brand.name)
        .bind(&brand.description)
        .fetch_one(&self.pool)
        .await
        .context("error creating brand")?;
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Brand>> {
        let brands = sqlx::query_as::<_, Brand>(
            "SELECT id, name, description FROM product_brand ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .context("error fetching brands")?;
        Ok(brands)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Brand>> {
        let brand = sqlx::query_as::<_, Brand>(
            "SELECT id, name, description FROM product_brand WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching brand")?;
        Ok(brand)
    }

    async fn update(&self, id: Uuid, brand: &NewBrand) -> Result<u64> {
        let result =
            sqlx::query("UPDATE product_brand SET name = $1, description = $2 WHERE id = $3")
                .bind(&brand.name)
                .bind(&brand.description)
                .bind(id)
                .execute(&self.pool)
                .await
                .context("error updating brand")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM product_brand WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("error deleting brand")?;
        Ok(result.rows_affected())
    }
}
