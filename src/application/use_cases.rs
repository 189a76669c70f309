//! Application use cases for the product catalog
//!
//! Contains the catalog's business workflows: input validation, slug
//! derivation, not-found mapping and page assembly on top of the
//! repository traits.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::application::dto::{
    AttachImageDto, CreateBrandDto, CreateCategoryDto, CreateProductDto, CreateReviewDto,
    CreateSubCategoryDto,
};
use crate::application::error::{ServiceError, ServiceResult};
use crate::domain::catalog::{
    Brand, Category, Image, Product, ProductPage, ProductRating, Review, SubCategory,
};
use crate::domain::filter::ProductFilter;
use crate::domain::pagination::{max_pages, PageRequest};
use crate::domain::repositories::{
    BrandRepository, CategoryRepository, ProductRepository, ReviewRepository,
    SubCategoryRepository,
};
use crate::utils::slugify;

fn page_request(limit: u32, page: u32) -> ServiceResult<PageRequest> {
    if limit == 0 {
        return Err(ServiceError::invalid("limit must be positive"));
    }
    Ok(PageRequest::new(limit, page))
}

fn require_name(name: &str, what: &str) -> ServiceResult<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        return Err(ServiceError::invalid(format!(
            "{what} name must contain at least one alphanumeric character"
        )));
    }
    Ok(slug)
}

// ============================================================================
// Products
// ============================================================================

/// Use cases around products: the five paged listings, single lookups,
/// CRUD and image metadata.
pub struct ProductUseCases {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl ProductUseCases {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            products,
            categories,
        }
    }

    async fn list_page(&self, filter: ProductFilter, limit: u32, page: u32)
        -> ServiceResult<ProductPage> {
        let request = page_request(limit, page)?;
        let (products, total_count) = self.products.list(&filter, &request).await?;
        debug!(
            total_count,
            returned = products.len(),
            page = request.page(),
            "product page assembled"
        );
        Ok(ProductPage {
            products,
            limit: request.limit(),
            page: request.page(),
            max_pages: max_pages(total_count, request.limit()),
        })
    }

    pub async fn get_products(&self, limit: u32, page: u32) -> ServiceResult<ProductPage> {
        self.list_page(ProductFilter::All, limit, page).await
    }

    pub async fn get_featured_products(&self, limit: u32, page: u32) -> ServiceResult<ProductPage> {
        self.list_page(ProductFilter::Featured, limit, page).await
    }

    pub async fn get_products_by_category(
        &self,
        category_id: Uuid,
        limit: u32,
        page: u32,
    ) -> ServiceResult<ProductPage> {
        self.list_page(ProductFilter::Category(category_id), limit, page)
            .await
    }

    pub async fn get_products_by_sub_category(
        &self,
        sub_category_id: Uuid,
        limit: u32,
        page: u32,
    ) -> ServiceResult<ProductPage> {
        self.list_page(ProductFilter::SubCategory(sub_category_id), limit, page)
            .await
    }

    pub async fn get_products_by_brand(
        &self,
        brand_id: Uuid,
        limit: u32,
        page: u32,
    ) -> ServiceResult<ProductPage> {
        self.list_page(ProductFilter::Brand(brand_id), limit, page)
            .await
    }

    /// Resolves a category slug to its id, then pages through that category.
    pub async fn get_products_by_category_slug(
        &self,
        category_slug: &str,
        limit: u32,
        page: u32,
    ) -> ServiceResult<ProductPage> {
        let category = self
            .categories
            .find_by_slug(category_slug)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("category with slug {category_slug} not found"))
            })?;
        self.get_products_by_category(category.id, limit, page).await
    }

    pub async fn get_product(&self, id: Uuid) -> ServiceResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("product with id {id} not found")))
    }

    pub async fn get_product_by_slug(&self, slug: &str) -> ServiceResult<Product> {
        self.products
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("product with slug {slug} not found")))
    }

    pub async fn create_product(&self, dto: CreateProductDto) -> ServiceResult<Uuid> {
        let slug = require_name(&dto.name, "product")?;
        if dto.price < 0.0 {
            return Err(ServiceError::invalid("price cannot be negative"));
        }
        if dto.quantity < 0 {
            return Err(ServiceError::invalid("quantity cannot be negative"));
        }
        let id = self.products.create(&dto.into_new_product(slug)).await?;
        Ok(id)
    }

    pub async fn update_product(&self, id: Uuid, dto: CreateProductDto) -> ServiceResult<()> {
        let slug = require_name(&dto.name, "product")?;
        if dto.price < 0.0 {
            return Err(ServiceError::invalid("price cannot be negative"));
        }
        if dto.quantity < 0 {
            return Err(ServiceError::invalid("quantity cannot be negative"));
        }
        let updated = self.products.update(id, &dto.into_new_product(slug)).await?;
        if updated == 0 {
            return Err(ServiceError::not_found(format!(
                "product with id {id} not found"
            )));
        }
        Ok(())
    }

    pub async fn delete_product(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self.products.delete(id).await?;
        if deleted == 0 {
            return Err(ServiceError::not_found(format!(
                "product with id {id} not found"
            )));
        }
        Ok(())
    }

    /// Records image metadata for a product. The bytes themselves live in
    /// object storage; only the resulting URL is kept here.
    pub async fn attach_product_image(
        &self,
        product_id: Uuid,
        dto: AttachImageDto,
    ) -> ServiceResult<Uuid> {
        if dto.url.trim().is_empty() {
            return Err(ServiceError::invalid("image url cannot be empty"));
        }
        let image = Image {
            url: dto.url,
            image_type: dto.image_type,
        };
        let id = self.products.add_image(product_id, &image).await?;
        Ok(id)
    }

    pub async fn get_product_images(&self, product_id: Uuid) -> ServiceResult<Vec<Image>> {
        Ok(self.products.images(product_id).await?)
    }
}

// ============================================================================
// Categories and sub-categories
// ============================================================================

pub struct CategoryUseCases {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryUseCases {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    pub async fn create_category(&self, dto: CreateCategoryDto) -> ServiceResult<Uuid> {
        let slug = require_name(&dto.name, "category")?;
        Ok(self.categories.create(&dto.into_new_category(slug)).await?)
    }

    pub async fn get_categories(&self, limit: u32, page: u32) -> ServiceResult<Vec<Category>> {
        let request = page_request(limit, page)?;
        Ok(self.categories.list(&request).await?)
    }

    pub async fn get_featured_categories(&self) -> ServiceResult<Vec<Category>> {
        Ok(self.categories.featured().await?)
    }

    pub async fn get_category(&self, id: Uuid) -> ServiceResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("category with id {id} not found")))
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> ServiceResult<Category> {
        self.categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("category with slug {slug} not found")))
    }

    pub async fn update_category(&self, id: Uuid, dto: CreateCategoryDto) -> ServiceResult<()> {
        let slug = require_name(&dto.name, "category")?;
        let updated = self
            .categories
            .update(id, &dto.into_new_category(slug))
            .await?;
        if updated == 0 {
            return Err(ServiceError::not_found(format!(
                "category with id {id} not found"
            )));
        }
        Ok(())
    }

    pub async fn delete_category(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self.categories.delete(id).await?;
        if deleted == 0 {
            return Err(ServiceError::not_found(format!(
                "category with id {id} not found"
            )));
        }
        Ok(())
    }
}

pub struct SubCategoryUseCases {
    sub_categories: Arc<dyn SubCategoryRepository>,
}

impl SubCategoryUseCases {
    pub fn new(sub_categories: Arc<dyn SubCategoryRepository>) -> Self {
        Self { sub_categories }
    }

    pub async fn create_sub_category(&self, dto: CreateSubCategoryDto) -> ServiceResult<Uuid> {
        let slug = require_name(&dto.name, "sub-category")?;
        Ok(self
            .sub_categories
            .create(&dto.into_new_sub_category(slug))
            .await?)
    }

    pub async fn get_sub_categories(
        &self,
        category_id: Uuid,
        limit: u32,
        page: u32,
    ) -> ServiceResult<Vec<SubCategory>> {
        let request = page_request(limit, page)?;
        Ok(self
            .sub_categories
            .list_for_category(category_id, &request)
            .await?)
    }

    pub async fn get_sub_category(&self, id: Uuid) -> ServiceResult<SubCategory> {
        self.sub_categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("sub-category with id {id} not found")))
    }

    pub async fn get_sub_category_by_slug(&self, slug: &str) -> ServiceResult<SubCategory> {
        self.sub_categories
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found(format!("sub-category with slug {slug} not found"))
            })
    }

    pub async fn update_sub_category(
        &self,
        id: Uuid,
        dto: CreateSubCategoryDto,
    ) -> ServiceResult<()> {
        let slug = require_name(&dto.name, "sub-category")?;
        let updated = self
            .sub_categories
            .update(id, &dto.into_new_sub_category(slug))
            .await?;
        if updated == 0 {
            return Err(ServiceError::not_found(format!(
                "sub-category with id {id} not found"
            )));
        }
        Ok(())
    }

    pub async fn delete_sub_category(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self.sub_categories.delete(id).await?;
        if deleted == 0 {
            return Err(ServiceError::not_found(format!(
                "sub-category with id {id} not found"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Brands
// ============================================================================

pub struct BrandUseCases {
    brands: Arc<dyn BrandRepository>,
}

impl BrandUseCases {
    pub fn new(brands: Arc<dyn BrandRepository>) -> Self {
        Self { brands }
    }

    pub async fn create_brand(&self, dto: CreateBrandDto) -> ServiceResult<Uuid> {
        require_name(&dto.name, "brand")?;
        Ok(self.brands.create(&dto.into()).await?)
    }

    pub async fn get_brands(&self) -> ServiceResult<Vec<Brand>> {
        Ok(self.brands.list().await?)
    }

    pub async fn get_brand(&self, id: Uuid) -> ServiceResult<Brand> {
        self.brands
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("brand with id {id} not found")))
    }

    pub async fn update_brand(&self, id: Uuid, dto: CreateBrandDto) -> ServiceResult<()> {
        require_name(&dto.name, "brand")?;
        let updated = self.brands.update(id, &dto.into()).await?;
        if updated == 0 {
            return Err(ServiceError::not_found(format!(
                "brand with id {id} not found"
            )));
        }
        Ok(())
    }

    pub async fn delete_brand(&self, id: Uuid) -> ServiceResult<()> {
        let deleted = self.brands.delete(id).await?;
        if deleted == 0 {
            return Err(ServiceError::not_found(format!(
                "brand with id {id} not found"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Reviews
// ============================================================================

pub struct ReviewUseCases {
    reviews: Arc<dyn ReviewRepository>,
}

impl ReviewUseCases {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    pub async fn create_review(&self, dto: CreateReviewDto) -> ServiceResult<Uuid> {
        if !(1..=5).contains(&dto.rating) {
            return Err(ServiceError::invalid("rating must be between 1 and 5"));
        }
        if dto.title.trim().is_empty() {
            return Err(ServiceError::invalid("review title cannot be empty"));
        }
        Ok(self.reviews.create(&dto.into()).await?)
    }

    pub async fn get_reviews(&self, product_id: Uuid) -> ServiceResult<Vec<Review>> {
        Ok(self.reviews.for_product(product_id).await?)
    }

    pub async fn get_review(&self, id: Uuid) -> ServiceResult<Review> {
        self.reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("review with id {id} not found")))
    }

    pub async fn get_product_rating(&self, product_id: Uuid) -> ServiceResult<ProductRating> {
        Ok(self.reviews.rating(product_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use async_trait::async_trait;
    use crate::domain::catalog::NewReview;

    #[test]
    fn limit_zero_is_rejected() {
        assert!(matches!(
            page_request(0, 1),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn symbol_only_names_are_rejected() {
        assert!(require_name("  --- ", "product").is_err());
        assert_eq!(require_name("Vitamin C 500mg!", "product").unwrap(), "vitamin-c-500mg");
    }

    /// Stub that fails loudly if a use case reaches the repository; used to
    /// prove validation short-circuits before any data access.
    struct UnreachableReviews;

    #[async_trait]
    impl ReviewRepository for UnreachableReviews {
        async fn create(&self, _review: &NewReview) -> anyhow::Result<Uuid> {
            bail!("repository must not be reached")
        }
        async fn for_product(&self, _product_id: Uuid) -> anyhow::Result<Vec<Review>> {
            bail!("repository must not be reached")
        }
        async fn find_by_id(&self, _id: Uuid) -> anyhow::Result<Option<Review>> {
            bail!("repository must not be reached")
        }
        async fn rating(&self, _product_id: Uuid) -> anyhow::Result<ProductRating> {
            bail!("repository must not be reached")
        }
    }

    #[test]
    fn out_of_range_rating_is_rejected_before_data_access() {
        let use_cases = ReviewUseCases::new(Arc::new(UnreachableReviews));
        let dto = CreateReviewDto {
            product_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            rating: 9,
            title: "Great".to_string(),
            content: "Five stars would be enough".to_string(),
        };
        let err = tokio_test::block_on(use_cases.create_review(dto)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }
}
