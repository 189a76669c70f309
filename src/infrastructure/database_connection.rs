//! Database connection and pool management
//!
//! This module handles PostgreSQL connections using sqlx and owns the
//! catalog schema migration.

use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::infrastructure::config::DatabaseConfig;

pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect(&config.connection_url())
            .await?;
        info!(
            host = %config.host,
            dbname = %config.dbname,
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the catalog tables and indexes if they do not exist.
    pub async fn migrate(&self) -> Result<()> {
        let statements = [
            r#"
            CREATE TABLE IF NOT EXISTS product_category (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                featured BOOLEAN NOT NULL DEFAULT FALSE,
                slug TEXT NOT NULL UNIQUE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS product_sub_category (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category_id UUID NOT NULL REFERENCES product_category (id) ON DELETE CASCADE,
                slug TEXT NOT NULL UNIQUE
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS product_brand (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT ''
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category_id UUID NOT NULL REFERENCES product_category (id),
                sub_category_id UUID NOT NULL REFERENCES product_sub_category (id),
                brand_id UUID NOT NULL REFERENCES product_brand (id),
                price DOUBLE PRECISION NOT NULL,
                quantity INTEGER NOT NULL DEFAULT 0,
                featured BOOLEAN NOT NULL DEFAULT FALSE,
                slug TEXT NOT NULL UNIQUE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS product_images (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                product_id UUID NOT NULL REFERENCES products (id) ON DELETE CASCADE,
                image_type TEXT NOT NULL,
                url TEXT NOT NULL
            )
            "#,
            r#"
            CREATE TABLE IF NOT EXISTS product_reviews (
                id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                product_id UUID NOT NULL REFERENCES products (id) ON DELETE CASCADE,
                user_id UUID NOT NULL,
                rating INTEGER NOT NULL,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_category_id ON products (category_id);
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_sub_category_id ON products (sub_category_id);
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_brand_id ON products (brand_id);
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_products_featured ON products (featured) WHERE featured;
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_product_images_product_id ON product_images (product_id);
            "#,
            r#"
            CREATE INDEX IF NOT EXISTS idx_product_reviews_product_id ON product_reviews (product_id);
            "#,
        ];

        for statement in statements {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("catalog schema is up to date");
        Ok(())
    }
}
