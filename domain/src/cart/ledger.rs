//! Cart ledger entities
//!
//! The ledger keeps at most one line per product id, in insertion order.
//! Totals are never stored: [`CartLedger::snapshot`] derives them from the
//! current lines every time.
//!
//! No operation here fails. Unknown product ids and decrements that would
//! take a line to zero are silent no-ops (the "floor guard"); only
//! [`CartLedger::remove`] deletes a line.

use crate::catalog::entities::Product;
use serde::{Deserialize, Serialize};

/// One product-and-quantity row (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    /// Always >= 1
    pub quantity: u32,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// price × quantity
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}

/// Read-only view of the cart handed to callers (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub subtotal: u64,
    pub item_count: u64,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == product_id)
    }
}

/// The shopper's cart (Aggregate)
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line or appends a new one with quantity 1.
    /// Returns the updated snapshot so the caller can decide whether to
    /// present the cart.
    pub fn add(&mut self, product: &Product) -> CartSnapshot {
        match self.position(&product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(1);
            }
            None => self.lines.push(CartLine::new(product.clone())),
        }
        self.snapshot()
    }

    /// Delete the line for `product_id`, if any.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Apply `delta` to the line's quantity.
    ///
    /// The change is applied only when the result stays >= 1; otherwise the
    /// line is left exactly as it was. Never removes a line.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        let Some(idx) = self.position(product_id) else {
            return;
        };
        let line = &mut self.lines[idx];
        let new_qty = i64::from(line.quantity).saturating_add(delta);
        if new_qty > 0
            && let Ok(qty) = u32::try_from(new_qty)
        {
            line.quantity = qty;
        }
    }

    /// Empty the ledger.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of price × quantity over the current lines.
    pub fn subtotal(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |acc, l| acc.saturating_add(l.line_total()))
    }

    /// Sum of quantities over the current lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            subtotal: self.subtotal(),
            item_count: self.item_count(),
        }
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.product.id == product_id)
    }
}
