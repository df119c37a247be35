//! Catalog endpoints with response caching.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use tracing::{debug, instrument};

use clementine_core::{CategoryId, ProductId};

use crate::error::Result;
use crate::models::{Category, Product};

use super::{ApiClient, ListResponse};

const CACHE_CAPACITY: u64 = 1000;
const CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

/// Cached catalog responses. Lists are shared via `Arc` so a cache hit
/// never deep-copies the product set.
#[derive(Clone)]
enum CacheValue {
    Category(Box<Category>),
    Categories(Arc<Vec<Category>>),
    Product(Box<Product>),
    Products(Arc<Vec<Product>>),
}

/// Client for categories and products.
///
/// Catalog reads are cached for 5 minutes; search is always live.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
    cache: Cache<String, CacheValue>,
}

impl CatalogClient {
    /// Create a catalog client sharing the given API client.
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(CACHE_TTL)
            .build();
        Self { api, cache }
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Arc<Vec<Category>>> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.cache.get(&cache_key).await {
            debug!("cache hit for categories");
            return Ok(categories);
        }

        let response: ListResponse<Category> = self.api.get_json("categories/").await?;
        let categories = Arc::new(response.into_vec());

        self.cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the category does not exist or the request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category(&self, id: CategoryId) -> Result<Category> {
        let cache_key = format!("category:{id}");

        if let Some(CacheValue::Category(category)) = self.cache.get(&cache_key).await {
            debug!("cache hit for category");
            return Ok(*category);
        }

        let category: Category = self.api.get_json(&format!("categories/{id}/")).await?;

        self.cache
            .insert(cache_key, CacheValue::Category(Box::new(category.clone())))
            .await;

        Ok(category)
    }

    /// Get the products belonging to a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn category_products(&self, id: CategoryId) -> Result<Arc<Vec<Product>>> {
        let cache_key = format!("category:{id}:products");

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("cache hit for category products");
            return Ok(products);
        }

        let response: ListResponse<Product> = self
            .api
            .get_json(&format!("categories/{id}/products/"))
            .await?;
        let products = Arc::new(response.into_vec());

        self.cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(&self) -> Result<Arc<Vec<Product>>> {
        let cache_key = "products".to_string();

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("cache hit for products");
            return Ok(products);
        }

        let response: ListResponse<Product> = self.api.get_json("products/").await?;
        let products = Arc::new(response.into_vec());

        self.cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the product does not exist or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.cache.get(&cache_key).await {
            debug!("cache hit for product");
            return Ok(*product);
        }

        let product: Product = self.api.get_json(&format!("products/{id}/")).await?;

        self.cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the featured products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Arc<Vec<Product>>> {
        let cache_key = "products:featured".to_string();

        if let Some(CacheValue::Products(products)) = self.cache.get(&cache_key).await {
            debug!("cache hit for featured products");
            return Ok(products);
        }

        let response: ListResponse<Product> = self.api.get_json("products/featured/").await?;
        let products = Arc::new(response.into_vec());

        self.cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Search products by name. Never cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("q", query)
            .finish();

        let response: ListResponse<Product> = self
            .api
            .get_json(&format!("products/search/?{encoded}"))
            .await?;
        Ok(response.into_vec())
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }
}
