// Receipt Points - Core Library
// Exposes all modules for use in CLI, API server, and tests

pub mod error;
pub mod receipt;
pub mod validation;
pub mod scoring;
pub mod store;
pub mod config;

// Only compile the HTTP layer when the server feature is enabled
#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use error::{ConfigError, ValidationError};
pub use receipt::{price_to_cents, Item, Price, RawItem, RawReceipt, Receipt};
pub use validation::{parse_receipt, validate};
pub use scoring::{item_points, receipt_points, PointsBreakdown};
pub use store::{InMemoryPointsStore, PointsStore};
pub use config::ServerConfig;
#[cfg(feature = "server")]
pub use api::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
