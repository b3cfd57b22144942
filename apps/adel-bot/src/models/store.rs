use adel_shared::api::{CategoryDto, CategoryProductDto, OrderRef, ProductDto, PurchaseResponse};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub product_count: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub unit_price: f64,
    /// Only the full product listing reports it.
    pub category_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    pub amount: f64,
    pub currency: String,
}

/// What the reseller said about a purchase. `accepted == false` is a normal
/// business outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOutcome {
    pub accepted: bool,
    pub order_id: Option<OrderRef>,
    pub status_message: Option<String>,
}

impl From<CategoryDto> for Category {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            product_count: dto.product_count,
        }
    }
}

impl From<CategoryProductDto> for Product {
    fn from(dto: CategoryProductDto) -> Self {
        Self {
            id: dto.id,
            title: dto.title,
            unit_price: dto.unit_price,
            category_title: None,
        }
    }
}

impl From<ProductDto> for Product {
    fn from(dto: ProductDto) -> Self {
        Self {
            id: dto.id,
            title: dto.name,
            unit_price: dto.price,
            category_title: dto.category_title,
        }
    }
}

impl From<PurchaseResponse> for PurchaseOutcome {
    fn from(resp: PurchaseResponse) -> Self {
        Self {
            accepted: resp.success,
            order_id: resp.order_id,
            status_message: resp.message.filter(|m| !m.trim().is_empty()),
        }
    }
}
