//! Shopping cart ledger.
//!
//! - [`ledger::CartLedger`]: owns the selected (product, quantity) lines
//! - [`ledger::CartLine`]: one product-and-quantity row
//! - [`ledger::CartSnapshot`]: a read-only view with freshly derived totals

pub mod ledger;
