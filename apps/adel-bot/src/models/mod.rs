pub mod session;
pub mod store;

pub use session::SessionId;
pub use store::{Balance, Category, Product, PurchaseOutcome};
