//! Benchmark for the product row folder hot path.

use chrono::Utc;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use uuid::Uuid;

use shop_catalog::infrastructure::product_query::{fold_product_rows, ProductRow};

fn rows_for(products: usize, images_per_product: u32) -> Vec<ProductRow> {
    let total = products as i64;
    let mut rows = Vec::with_capacity(products * images_per_product.max(1) as usize);
    for _ in 0..products {
        let id = Uuid::new_v4();
        for image_no in 0..images_per_product.max(1) {
            rows.push(ProductRow {
                id,
                name: "benchmark product".to_string(),
                description: "benchmark".to_string(),
                category_id: Uuid::new_v4(),
                sub_category_id: Uuid::new_v4(),
                brand_id: Uuid::new_v4(),
                price: 19.99,
                quantity: 3,
                featured: false,
                slug: "benchmark-product".to_string(),
                category_name: Some("Category".to_string()),
                sub_category_name: Some("Sub".to_string()),
                brand_name: Some("Brand".to_string()),
                image_url: Some(format!("https://cdn.example/{id}/{image_no}.png")),
                image_type: Some("general".to_string()),
                review_count: Some(12),
                average_rating: Some(4.2),
                created_at: Some(Utc::now()),
                updated_at: Some(Utc::now()),
                total_count: Some(total),
            });
        }
    }
    rows
}

fn bench_fold(c: &mut Criterion) {
    let mut group = c.benchmark_group("fold_product_rows");
    for (products, images) in [(100, 1), (100, 5), (1000, 3)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{products}x{images}")),
            &(products, images),
            |b, &(products, images)| {
                b.iter_batched(
                    || rows_for(products, images),
                    fold_product_rows,
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_fold);
criterion_main!(benches);
