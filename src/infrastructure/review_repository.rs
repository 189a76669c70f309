//! Postgres review repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::catalog::{NewReview, ProductRating, Review};
use crate::domain::repositories::ReviewRepository;

#[derive(Clone)]
pub struct PgReviewRepository {
    pool: PgPool,
}

impl PgReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    async fn create(&self, review: &NewReview) -> Result<Uuid> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO product_reviews (product_id, user_id, rating, title, content)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(review.product_id)
        .bind(review.user_id)
        .bind(review.rating)
        .bind(&review.title)
        .bind(&review.content)
        .fetch_one(&self.pool)
        .await
        .context("error creating review")?;
        Ok(id)
    }

    async fn for_product(&self, product_id: Uuid) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, product_id, user_id, rating, title, content, created_at
            FROM product_reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .context("error fetching reviews")?;
        Ok(reviews)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Review>> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            SELECT id, product_id, user_id, rating, title, content, created_at
            FROM product_reviews
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("error fetching review")?;
        Ok(review)
    }

    /// Zero reviews reports an average of 0.0 rather than a NULL that the
    /// caller cannot decode.
    async fn rating(&self, product_id: Uuid) -> Result<ProductRating> {
        let rating = sqlx::query_as::<_, ProductRating>(
            r#"
            SELECT
                COALESCE(AVG(rating)::double precision, 0) AS average_rating,
                COUNT(*) AS review_count
            FROM product_reviews
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await
        .context("error fetching product rating")?;
        Ok(rating)
    }
}
