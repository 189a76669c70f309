//! End-to-end tests of the listing pipeline pieces that run without a
//! database: statement construction, row folding and page-count math.

use chrono::Utc;
use proptest::prelude::*;
use rstest::rstest;
use uuid::Uuid;

use shop_catalog::domain::filter::ProductFilter;
use shop_catalog::domain::pagination::{max_pages, PageRequest};
use shop_catalog::infrastructure::product_query::{
    build_product_query, fold_product_rows, ProductRow, PRODUCT_ORDER_NEWEST,
};

fn synthetic_row(id: Uuid, image_no: Option<u32>, total_count: i64) -> ProductRow {
    ProductRow {
        id,
        name: format!("product-{id}"),
        description: "synthetic".to_string(),
        category_id: Uuid::new_v4(),
        sub_category_id: Uuid::new_v4(),
        brand_id: Uuid::new_v4(),
        price: 9.99,
        quantity: 5,
        featured: false,
        slug: format!("product-{id}"),
        category_name: Some("Category".to_string()),
        sub_category_name: Some("Sub".to_string()),
        brand_name: Some("Brand".to_string()),
        image_url: image_no.map(|n| format!("https://cdn.example/{id}/{n}.png")),
        image_type: image_no.map(|_| "general".to_string()),
        review_count: Some(1),
        average_rating: Some(4.0),
        created_at: Some(Utc::now()),
        updated_at: Some(Utc::now()),
        total_count: Some(total_count),
    }
}

#[tokio::test]
async fn three_row_scenario_folds_to_two_products() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let rows = vec![
        synthetic_row(a, Some(1), 2),
        synthetic_row(a, Some(2), 2),
        synthetic_row(b, None, 2),
    ];

    let (products, total_count) = fold_product_rows(rows);

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].images.len(), 2);
    assert!(products[0].images[0].url.ends_with("/1.png"));
    assert!(products[0].images[1].url.ends_with("/2.png"));
    assert_eq!(products[1].images.len(), 0);
    assert_eq!(max_pages(total_count, 10), 1);
}

#[rstest]
#[case(47, 10, 5)]
#[case(25, 10, 3)]
#[case(0, 10, 0)]
#[case(10, 10, 1)]
#[case(11, 10, 2)]
fn page_count_table(#[case] total: i64, #[case] limit: u32, #[case] expected: u32) {
    assert_eq!(max_pages(total, limit), expected);
}

#[rstest]
#[case(ProductFilter::All, 2)]
#[case(ProductFilter::Featured, 2)]
#[case(ProductFilter::Brand(Uuid::nil()), 3)]
#[case(ProductFilter::Category(Uuid::nil()), 3)]
#[case(ProductFilter::SubCategory(Uuid::nil()), 3)]
fn statement_parameter_count(#[case] filter: ProductFilter, #[case] expected: usize) {
    assert_eq!(filter.bind_count(), expected);

    let sql = build_product_query(&filter, PRODUCT_ORDER_NEWEST);
    assert!(sql.contains("LIMIT $1"));
    assert!(sql.contains("OFFSET $2"));
    assert_eq!(sql.contains("$3"), expected == 3);
}

#[test]
fn offset_follows_one_based_pages() {
    assert_eq!(PageRequest::new(20, 1).offset(), 0);
    assert_eq!(PageRequest::new(20, 4).offset(), 60);
}

proptest! {
    /// N distinct products with M image rows each fold to exactly N
    /// products with M images each, in first-seen order.
    #[test]
    fn fold_is_exhaustive_and_ordered(n in 1usize..12, m in 0u32..6) {
        let ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        let total = (n * 3) as i64;

        let mut rows = Vec::new();
        for id in &ids {
            if m == 0 {
                rows.push(synthetic_row(*id, None, total));
            } else {
                for image_no in 1..=m {
                    rows.push(synthetic_row(*id, Some(image_no), total));
                }
            }
        }

        let (products, total_count) = fold_product_rows(rows);

        prop_assert_eq!(products.len(), n);
        prop_assert_eq!(total_count, total);
        for (product, id) in products.iter().zip(&ids) {
            prop_assert_eq!(product.id, *id);
            prop_assert_eq!(product.images.len(), m as usize);
            for (index, image) in product.images.iter().enumerate() {
                prop_assert!(image.url.ends_with(&format!("/{}.png", index + 1)), "image url did not match expected suffix");
            }
        }
    }
}
