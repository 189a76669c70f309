//! Paginated product query construction and row folding
//!
//! The listing statement returns one row per product x image combination:
//! a denormalized product projection plus at most one image, annotated with
//! a window-function total count. Pagination happens in a CTE over the bare
//! products table, before the image join fans rows out, so LIMIT/OFFSET
//! count products rather than (product, image) pairs. The folder collapses
//! that fan-out back into unique products.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::catalog::{Image, Product};
use crate::domain::filter::ProductFilter;

/// Default trailing clause of the listing statement.
pub const PRODUCT_ORDER_NEWEST: &str = "ORDER BY p.created_at DESC";

const PRODUCT_PROJECTION: &str = r#"
    p.id,
    p.name,
    p.description,
    p.category_id,
    p.sub_category_id,
    p.brand_id,
    p.price,
    p.quantity,
    p.featured,
    p.slug,
    pc.name AS category_name,
    psc.name AS sub_category_name,
    pb.name AS brand_name,
    pi.url AS image_url,
    pi.image_type,
    pr.review_count,
    pr.average_rating,
    p.created_at,
    p.updated_at"#;

const PRODUCT_JOINS: &str = r#"
LEFT JOIN product_images pi ON p.id = pi.product_id
LEFT JOIN (
    SELECT
        product_id,
        COUNT(*) AS review_count,
        AVG(rating)::double precision AS average_rating
    FROM product_reviews
    GROUP BY product_id
) pr ON p.id = pr.product_id
LEFT JOIN product_sub_category psc ON p.sub_category_id = psc.id
LEFT JOIN product_category pc ON p.category_id = pc.id
LEFT JOIN product_brand pb ON p.brand_id = pb.id"#;

/// Builds the paginated listing statement. Bind order is fixed: `$1` limit,
/// `$2` offset, then the filter value as `$3` when the filter carries one.
/// `trailing` is appended verbatim (ordering of the final page).
pub fn build_product_query(filter: &ProductFilter, trailing: &str) -> String {
    let where_clause = match filter.predicate() {
        Some(predicate) => format!("WHERE {predicate}"),
        None => String::new(),
    };
    format!(
        r#"
WITH paginated_products AS (
    SELECT
        *,
        COUNT(*) OVER () AS total_count
    FROM products
    {where_clause}
    ORDER BY id
    LIMIT $1
    OFFSET $2
)
SELECT{PRODUCT_PROJECTION},
    p.total_count
FROM paginated_products p{PRODUCT_JOINS}
{trailing}
"#
    )
}

/// Column the single-product lookup matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductKey {
    Id,
    Slug,
}

/// Builds the unpaginated single-product statement over the same projection
/// (no window count). Binds exactly one parameter: the id or slug.
pub fn build_product_lookup_query(key: ProductKey) -> String {
    let column = match key {
        ProductKey::Id => "p.id",
        ProductKey::Slug => "p.slug",
    };
    format!(
        r#"
SELECT{PRODUCT_PROJECTION}
FROM products p{PRODUCT_JOINS}
WHERE {column} = $1
"#
    )
}

/// One flat result row. Joined columns are nullable: the image pair is NULL
/// for products without images, the aggregate is NULL for products without
/// reviews, and the name lookups are NULL for dangling references.
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
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
    pub category_name: Option<String>,
    pub sub_category_name: Option<String>,
    pub brand_name: Option<String>,
    pub image_url: Option<String>,
    pub image_type: Option<String>,
    pub review_count: Option<i64>,
    pub average_rating: Option<f64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Window-function total; absent on the lookup statement.
    #[sqlx(default)]
    pub total_count: Option<i64>,
}

impl ProductRow {
    fn image(&self) -> Option<Image> {
        match self.image_url.as_deref() {
            Some(url) if !url.is_empty() => Some(Image {
                url: url.to_string(),
                image_type: self.image_type.clone().unwrap_or_default(),
            }),
            _ => None,
        }
    }

    fn into_product(self) -> Product {
        let images = self.image().into_iter().collect();
        Product {
            id: self.id,
            name: self.name,
            description: self.description,
            category_id: self.category_id,
            sub_category_id: self.sub_category_id,
            brand_id: self.brand_id,
            price: self.price,
            quantity: self.quantity,
            featured: self.featured,
            slug: self.slug,
            category_name: self.category_name.unwrap_or_default(),
            sub_category_name: self.sub_category_name.unwrap_or_default(),
            brand_name: self.brand_name.unwrap_or_default(),
            images,
            review_count: self.review_count.unwrap_or(0),
            average_rating: self.average_rating.unwrap_or(0.0),
            created_at: self.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated_at: self.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

/// Folds the flat (product, image) cursor into unique products.
///
/// Output order is the first-appearance order of each product id, which is
/// the statement's trailing ORDER BY; an explicit key list keeps it
/// deterministic. Within a product, images keep join emission order.
#[derive(Debug, Default)]
pub struct ProductRowFolder {
    order: Vec<Uuid>,
    products: HashMap<Uuid, Product>,
    total_count: i64,
}

impl ProductRowFolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ProductRow) {
        if self.products.is_empty() {
            // Identical on every row of one result set.
            self.total_count = row.total_count.unwrap_or(0);
        }
        match self.products.get_mut(&row.id) {
            Some(existing) => {
                if let Some(image) = row.image() {
                    existing.images.push(image);
                }
            }
            None => {
                self.order.push(row.id);
                self.products.insert(row.id, row.into_product());
            }
        }
    }

    /// Pre-join total of the filtered product set; 0 when nothing was
    /// folded, so an empty page computes to zero pages.
    pub fn total_count(&self) -> i64 {
        self.total_count
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn into_products(self) -> Vec<Product> {
        let Self {
            order,
            mut products,
            ..
        } = self;
        order
            .into_iter()
            .filter_map(|id| products.remove(&id))
            .collect()
    }
}

/// Convenience wrapper folding an already-collected row set.
pub fn fold_product_rows(rows: Vec<ProductRow>) -> (Vec<Product>, i64) {
    let mut folder = ProductRowFolder::new();
    for row in rows {
        folder.push(row);
    }
    let total_count = folder.total_count();
    (folder.into_products(), total_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: Uuid, image: Option<(&str, &str)>, total_count: i64) -> ProductRow {
        ProductRow {
            id,
            name: "Ibuprofen 200mg".to_string(),
            description: "Pain relief".to_string(),
            category_id: Uuid::new_v4(),
            sub_category_id: Uuid::new_v4(),
            brand_id: Uuid::new_v4(),
            price: 4.99,
            quantity: 120,
            featured: false,
            slug: "ibuprofen-200mg".to_string(),
            category_name: Some("Medicine".to_string()),
            sub_category_name: Some("Pain Relief".to_string()),
            brand_name: Some("Generic".to_string()),
            image_url: image.map(|(url, _)| url.to_string()),
            image_type: image.map(|(_, kind)| kind.to_string()),
            review_count: Some(3),
            average_rating: Some(4.5),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            total_count: Some(total_count),
        }
    }

    #[test]
    fn folds_image_fanout_into_one_product() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            row(a, Some(("https://cdn/img1.png", "thumbnail")), 2),
            row(a, Some(("https://cdn/img2.png", "banner")), 2),
            row(b, None, 2),
        ];

        let (products, total_count) = fold_product_rows(rows);

        assert_eq!(total_count, 2);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, a);
        assert_eq!(
            products[0]
                .images
                .iter()
                .map(|i| i.url.as_str())
                .collect::<Vec<_>>(),
            ["https://cdn/img1.png", "https://cdn/img2.png"]
        );
        assert_eq!(products[1].id, b);
        assert!(products[1].images.is_empty());
    }

    #[test]
    fn empty_image_url_contributes_no_image() {
        let id = Uuid::new_v4();
        let mut bad = row(id, Some(("", "thumbnail")), 1);
        bad.image_type = Some("thumbnail".to_string());
        let (products, _) = fold_product_rows(vec![bad]);
        assert!(products[0].images.is_empty());
    }

    #[test]
    fn null_aggregates_fold_to_zero() {
        let id = Uuid::new_v4();
        let mut bare = row(id, None, 1);
        bare.review_count = None;
        bare.average_rating = None;
        bare.category_name = None;
        bare.sub_category_name = None;
        bare.brand_name = None;
        bare.created_at = None;
        bare.updated_at = None;

        let (products, _) = fold_product_rows(vec![bare]);
        let product = &products[0];
        assert_eq!(product.review_count, 0);
        assert_eq!(product.average_rating, 0.0);
        assert_eq!(product.category_name, "");
        assert_eq!(product.brand_name, "");
        assert_eq!(product.created_at, DateTime::UNIX_EPOCH);
    }

    #[test]
    fn empty_cursor_reports_zero_total() {
        let (products, total_count) = fold_product_rows(Vec::new());
        assert!(products.is_empty());
        assert_eq!(total_count, 0);
    }

    #[test]
    fn output_preserves_first_seen_order() {
        let ids: Vec<Uuid> = (0..8).map(|_| Uuid::new_v4()).collect();
        let mut rows = Vec::new();
        for id in &ids {
            rows.push(row(*id, Some(("https://cdn/a.png", "general")), 8));
            rows.push(row(*id, Some(("https://cdn/b.png", "general")), 8));
        }
        let (products, _) = fold_product_rows(rows);
        let folded_ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();
        assert_eq!(folded_ids, ids);
    }

    #[test]
    fn listing_statement_paginates_before_the_image_join() {
        let sql = build_product_query(&ProductFilter::All, PRODUCT_ORDER_NEWEST);

        let cte_end = sql.find("\n)").unwrap();
        let cte = &sql[..cte_end];
        assert!(cte.contains("COUNT(*) OVER () AS total_count"));
        assert!(cte.contains("LIMIT $1"));
        assert!(cte.contains("OFFSET $2"));
        assert!(!cte.contains("product_images"));

        let outer = &sql[cte_end..];
        assert!(outer.contains("LEFT JOIN product_images pi ON p.id = pi.product_id"));
        assert!(sql.trim_end().ends_with(PRODUCT_ORDER_NEWEST));
    }

    #[test]
    fn filter_predicate_lands_inside_the_cte() {
        let id = Uuid::new_v4();
        let sql = build_product_query(&ProductFilter::Brand(id), PRODUCT_ORDER_NEWEST);
        let where_at = sql.find("WHERE brand_id = $3").unwrap();
        let order_at = sql.find("ORDER BY id").unwrap();
        assert!(where_at < order_at);

        let unfiltered = build_product_query(&ProductFilter::All, PRODUCT_ORDER_NEWEST);
        assert!(!unfiltered.contains("WHERE"));
    }

    #[test]
    fn lookup_statement_binds_one_parameter() {
        let by_id = build_product_lookup_query(ProductKey::Id);
        assert!(by_id.contains("WHERE p.id = $1"));
        assert!(!by_id.contains("total_count"));
        assert!(!by_id.contains("$2"));

        let by_slug = build_product_lookup_query(ProductKey::Slug);
        assert!(by_slug.contains("WHERE p.slug = $1"));
    }
}
