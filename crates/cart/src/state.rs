//! Ordered cart contents and the pure state transitions.
//!
//! Every mutation here is a plain in-memory transformation with no side
//! effects; [`crate::store::CartStore`] wires persistence and change
//! notification around these methods.

use rust_decimal::Decimal;

use crate::line::{CartLine, Product, clamp_quantity, sanitize_requested_quantity};

/// The cart contents, in insertion order.
///
/// Lines are keyed by their `id`; an id appears at most once. The total is
/// derived on every read and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    lines: Vec<CartLine>,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a state from already-sanitized lines (hydration path).
    pub(crate) fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Add one unit of `product`.
    ///
    /// An existing line's quantity grows by one, saturating silently at
    /// the 99-unit cap; otherwise a new line with quantity 1 is appended.
    /// The existing line's add-time price is kept even if the catalog price
    /// has changed since.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.id == product.id) {
            line.quantity = clamp_quantity(line.quantity + 1);
        } else {
            self.lines.push(CartLine::first(product));
        }
    }

    /// Remove the line with the given id. Absent ids are a no-op.
    pub fn remove(&mut self, id: &str) {
        self.lines.retain(|l| l.id != id);
    }

    /// Set a line's quantity from a raw request.
    ///
    /// Non-finite requests keep the line's current quantity; anything else
    /// is rounded to the nearest integer and clamped to `1..=99`. Absent
    /// ids are a no-op.
    pub fn update_quantity(&mut self, id: &str, requested: f64) {
        let Some(line) = self.lines.iter_mut().find(|l| l.id == id) else {
            return;
        };
        if let Some(quantity) = sanitize_requested_quantity(requested) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// `Σ price × quantity` over the current lines, exact.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }
}
