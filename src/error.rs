//! Error handling module for the cupcake wizard
//!
//! Provides centralized error types using thiserror. Library operations return
//! [`Result`]; the binary wraps these in `anyhow` at the process boundary.

use thiserror::Error;

/// Main error type for the cupcake wizard
#[derive(Error, Debug)]
pub enum CupcakeError {
    /// IO errors (terminal, share file, catalog file)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested quantity is not one the catalog sells
    #[error("Quantity {requested} is not offered (allowed: {allowed:?})")]
    InvalidQuantity { requested: u32, allowed: Vec<u32> },

    /// Requested pickup option does not exist
    #[error("Pickup option {index} does not exist ({available} options offered)")]
    InvalidPickup { index: usize, available: usize },

    /// Order total does not fit in a decimal
    #[error("Price for {quantity} cupcakes is too large to represent")]
    PriceOverflow { quantity: u32 },

    /// Catalog errors (loading, parsing, validation)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Step flow transition errors
    #[error("Flow transition error: {0}")]
    FlowTransition(String),

    /// Share hand-off errors
    #[error("Share failed: {0}")]
    Share(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for cupcake operations
pub type Result<T> = std::result::Result<T, CupcakeError>;

impl CupcakeError {
    /// Create a catalog error
    pub fn catalog(msg: impl Into<String>) -> Self {
        Self::Catalog(msg.into())
    }

    /// Create a share error
    pub fn share(msg: impl Into<String>) -> Self {
        Self::Share(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CupcakeError::catalog("no flavors");
        assert_eq!(err.to_string(), "Catalog error: no flavors");

        let err = CupcakeError::InvalidQuantity {
            requested: 7,
            allowed: vec![1, 6, 12],
        };
        assert_eq!(
            err.to_string(),
            "Quantity 7 is not offered (allowed: [1, 6, 12])"
        );

        let err = CupcakeError::PriceOverflow { quantity: 2 };
        assert_eq!(
            err.to_string(),
            "Price for 2 cupcakes is too large to represent"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CupcakeError = io_err.into();
        assert!(matches!(err, CupcakeError::Io(_)));
    }

    #[test]
    fn test_error_constructors() {
        assert!(matches!(CupcakeError::share("x"), CupcakeError::Share(_)));
        assert!(matches!(
            CupcakeError::terminal("x"),
            CupcakeError::Terminal(_)
        ));
    }
}
