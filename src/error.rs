// ⚠️ Error Types
// Typed failures for receipt validation and configuration loading

use thiserror::Error;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// Why a submitted receipt was rejected.
///
/// The HTTP layer collapses every variant into the same
/// "The receipt is invalid" response; the detail only reaches logs and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("malformed receipt JSON: {0}")]
    Malformed(String),

    #[error("retailer {0:?} contains characters outside [\\w\\s-&]")]
    Retailer(String),

    #[error("item {index}: shortDescription {value:?} contains characters outside [\\w\\s-&]")]
    ShortDescription { index: usize, value: String },

    #[error("item {index}: price {value:?} is not a D+.DD amount")]
    Price { index: usize, value: String },

    #[error("total {0:?} is not a D+.DD amount")]
    Total(String),

    #[error("receipt has no items")]
    NoItems,

    #[error("purchaseDate {0:?} is not a YYYY-MM-DD date")]
    PurchaseDate(String),

    #[error("purchaseTime {0:?} is not an HH:MM time")]
    PurchaseTime(String),
}

impl ValidationError {
    /// Name of the offending JSON field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Malformed(_) => "body",
            ValidationError::Retailer(_) => "retailer",
            ValidationError::ShortDescription { .. } => "items.shortDescription",
            ValidationError::Price { .. } => "items.price",
            ValidationError::Total(_) => "total",
            ValidationError::NoItems => "items",
            ValidationError::PurchaseDate(_) => "purchaseDate",
            ValidationError::PurchaseTime(_) => "purchaseTime",
        }
    }
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {0}")]
    InvalidValue(String),
}
