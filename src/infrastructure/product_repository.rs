//! Postgres product repository
//!
//! Implements the product data access trait: the paginated listing path
//! (statement build -> streamed cursor -> row fold), single-product
//! lookups over the same projection, CRUD and image metadata.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::PgPool;
use tokio::time::timeout;
use uuid::Uuid;

use crate::domain::catalog::{Image, NewProduct, Product};
use crate::domain::filter::ProductFilter;
use crate::domain::pagination::PageRequest;
use crate::domain::repositories::ProductRepository;
use crate::infrastructure::product_query::{
    build_product_lookup_query, build_product_query, ProductKey, ProductRow, ProductRowFolder,
    PRODUCT_ORDER_NEWEST,
};

#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgProductRepository {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn fold_lookup(&self, key: ProductKey, stmt_value: LookupValue<'_>)
        -> Result<Option<Product>> {
        let stmt = build_product_lookup_query(key);
        let mut query = sqlx::query_as::<_, ProductRow>(&stmt);
        query = match stmt_value {
            LookupValue::Id(id) => query.bind(id),
            LookupValue::Slug(slug) => query.bind(slug.to_string()),
        };

        let mut folder = ProductRowFolder::new();
        let mut rows = query.fetch(&self.pool);
        while let Some(row) = rows.try_next().await.context("error scanning product rows")? {
            folder.push(row);
        }
        Ok(folder.into_products().into_iter().next())
    }
}

enum LookupValue<'a> {
    Id(Uuid),
    Slug(&'a str),
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, product: &NewProduct) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO products
                (name, description, category_id, sub_category_id, brand_id,
                 price, quantity, featured, slug)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.sub_category_id)
        .bind(product.brand_id)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.featured)
        .bind(&product.slug)
        .fetch_one(&self.pool)
        .await
        .context("error creating product")?;
        Ok(id)
    }

    async fn update(&self, id: Uuid, product: &NewProduct) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $1, description = $2, category_id = $3, sub_category_id = $4,
                brand_id = $5, price = $6, quantity = $7, featured = $8, slug = $9,
                updated_at = now()
            WHERE id = $10
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category_id)
        .bind(product.sub_category_id)
        .bind(product.brand_id)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.featured)
        .bind(&product.slug)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("error updating product")?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: Uuid) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("error deleting product")?;
        Ok(result.rows_affected())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
        self.fold_lookup(ProductKey::Id, LookupValue::Id(id)).await
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>> {
        self.fold_lookup(ProductKey::Slug, LookupValue::Slug(slug))
            .await
    }

    async fn list(&self, filter: &ProductFilter, page: &PageRequest)
        -> Result<(Vec<Product>, i64)> {
        let stmt = build_product_query(filter, PRODUCT_ORDER_NEWEST);
        let mut query = sqlx::query_as::<_, ProductRow>(&stmt)
            .bind(i64::from(page.limit()))
            .bind(page.offset());
        if let Some(value) = filter.bind_value() {
            query = query.bind(value);
        }

        let fold = async {
            let mut folder = ProductRowFolder::new();
            let mut rows = query.fetch(&self.pool);
            while let Some(row) = rows.try_next().await.context("error scanning product rows")? {
                folder.push(row);
            }
            Ok::<_, anyhow::Error>(folder)
        };
        let folder = timeout(self.query_timeout, fold)
            .await
            .map_err(|_| anyhow!("product listing query exceeded {:?}", self.query_timeout))??;

        let total_count = folder.total_count();
        Ok((folder.into_products(), total_count))
    }

    async fn add_image(&self, product_id: Uuid, image: &Image) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO product_images (product_id, image_type, url)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(product_id)
        .bind(&image.image_type)
        .bind(&image.url)
        .fetch_one(&self.pool)
        .await
        .context("error attaching product image")?;
        Ok(id)
    }

    async fn images(&self, product_id: Uuid) -> Result<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(
            "SELECT url, image_type FROM product_images WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .context("error fetching product images")?;
        Ok(images)
    }
}
