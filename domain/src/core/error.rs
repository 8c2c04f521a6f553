//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// Only raised while assembling a [`Catalog`](crate::Catalog). The cart ledger,
/// conversation log and context builder are total: they never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProductId(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),
}
