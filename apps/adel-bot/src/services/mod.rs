pub mod account_client;
pub mod catalog_client;
pub mod order_client;
pub mod pending_purchase;

pub use account_client::AccountClient;
pub use catalog_client::CatalogClient;
pub use order_client::OrderClient;
pub use pending_purchase::PendingPurchaseRegistry;
