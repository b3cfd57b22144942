use crate::api_client::{Auth, ResellerTransport};
use crate::error::{StoreError, StoreResult, UpstreamError};
use crate::models::{Category, Product};
use adel_shared::api::{CategoriesResponse, CategoryProductsResponse, ProductsResponse};
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogClient {
    api: Arc<dyn ResellerTransport>,
}

impl CatalogClient {
    pub fn new(api: Arc<dyn ResellerTransport>) -> Self {
        Self { api }
    }

    pub async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let value = self.api.get("/v1/category", Auth::Anonymous).await?;
        let resp: CategoriesResponse = serde_json::from_value(value).map_err(UpstreamError::from)?;
        if !resp.success {
            return Err(UpstreamError::Rejected.into());
        }

        non_empty(resp.categories.unwrap_or_default().into_iter().map(Category::from).collect())
    }

    pub async fn list_products_in_category(&self, category_id: i64) -> StoreResult<Vec<Product>> {
        let value = self
            .api
            .get(&format!("/v1/category/{}", category_id), Auth::Anonymous)
            .await?;
        let resp: CategoryProductsResponse =
            serde_json::from_value(value).map_err(UpstreamError::from)?;
        if !resp.success {
            return Err(UpstreamError::Rejected.into());
        }

        non_empty(resp.products.unwrap_or_default().into_iter().map(Product::from).collect())
    }

    /// Fetches the full product list and keeps the entries `filter` accepts.
    pub async fn list_all_products<F>(&self, filter: F) -> StoreResult<Vec<Product>>
    where
        F: Fn(&Product) -> bool,
    {
        let value = self.api.get("/v1/products", Auth::ApiKey).await?;
        let resp: ProductsResponse = serde_json::from_value(value).map_err(UpstreamError::from)?;
        if !resp.success {
            return Err(UpstreamError::Rejected.into());
        }

        let fetched: Vec<Product> = resp
            .products
            .unwrap_or_default()
            .into_iter()
            .map(Product::from)
            .collect();
        non_empty(fetched.iter().filter(|p| filter(p)).cloned().collect())
    }
}

/// Case-insensitive substring match on the product's category title.
/// A blank needle accepts everything.
pub fn category_title_contains(needle: &str) -> impl Fn(&Product) -> bool {
    let needle = needle.trim().to_lowercase();
    move |product: &Product| {
        needle.is_empty()
            || product
                .category_title
                .as_deref()
                .is_some_and(|title| title.to_lowercase().contains(&needle))
    }
}

fn non_empty<T>(items: Vec<T>) -> StoreResult<Vec<T>> {
    if items.is_empty() {
        Err(StoreError::EmptyResult)
    } else {
        Ok(items)
    }
}
