//! Wire shapes of the MZR GAMES reseller API.
//!
//! Every response carries a `success` flag. The payload fields next to it are
//! only present on some responses, so they are modeled as `Option` and the
//! caller decides what an absent field means.

use serde::{Deserialize, Serialize};

pub mod api {
    use super::*;
    use std::fmt;

    /// `GET /v1/category`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoriesResponse {
        #[serde(default)]
        pub success: bool,
        pub categories: Option<Vec<CategoryDto>>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct CategoryDto {
        pub id: i64,
        pub title: String,
        #[serde(default)]
        pub product_count: i64,
    }

    /// `GET /v1/category/{id}`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CategoryProductsResponse {
        #[serde(default)]
        pub success: bool,
        pub products: Option<Vec<CategoryProductDto>>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct CategoryProductDto {
        pub id: i64,
        pub title: String,
        pub unit_price: f64,
    }

    /// `GET /v1/products`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ProductsResponse {
        #[serde(default)]
        pub success: bool,
        pub products: Option<Vec<ProductDto>>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    pub struct ProductDto {
        pub id: i64,
        pub name: String,
        pub price: f64,
        pub category_title: Option<String>,
    }

    /// `GET /v1/getMe`
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AccountResponse {
        #[serde(default)]
        pub success: bool,
        pub balance: Option<f64>,
        pub currency: Option<String>,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PurchaseRequest {
        pub player_id: String,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PurchaseResponse {
        #[serde(default)]
        pub success: bool,
        pub order_id: Option<OrderRef>,
        pub message: Option<String>,
    }

    /// Order identifiers come back either as numbers or as strings.
    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(untagged)]
    pub enum OrderRef {
        Number(i64),
        Text(String),
    }

    impl fmt::Display for OrderRef {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                OrderRef::Number(n) => write!(f, "{}", n),
                OrderRef::Text(s) => f.write_str(s),
            }
        }
    }
}
