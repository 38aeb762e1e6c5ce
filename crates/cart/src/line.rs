//! Cart line and product reference types.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Smallest quantity a cart line may hold.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a cart line may hold.
pub const MAX_QUANTITY: u32 = 99;

/// Clamp a quantity into the allowed `1..=99` range.
#[must_use]
pub const fn clamp_quantity(quantity: u32) -> u32 {
    if quantity < MIN_QUANTITY {
        MIN_QUANTITY
    } else if quantity > MAX_QUANTITY {
        MAX_QUANTITY
    } else {
        quantity
    }
}

/// Round and clamp a raw quantity request, as typed into a free-text field
/// or read back from a persisted snapshot.
///
/// Returns `None` when the request is not a finite number; the caller keeps
/// (or defaults) the quantity it already has.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn sanitize_requested_quantity(requested: f64) -> Option<u32> {
    if !requested.is_finite() {
        return None;
    }
    let rounded = requested.round();
    Some(if rounded <= f64::from(MIN_QUANTITY) {
        MIN_QUANTITY
    } else if rounded >= f64::from(MAX_QUANTITY) {
        MAX_QUANTITY
    } else {
        // rounded is within 1..=99 here, so the cast is exact
        rounded as u32
    })
}

/// A product reference as handed to the cart by the catalog UI.
///
/// `price` is the unit price at the moment the product is added; the cart
/// never refreshes it from the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Product {
    /// Create a product reference without an image.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image_url: None,
        }
    }

    /// Create a product reference from a raw float price as delivered by
    /// the catalog API. Non-finite prices are coerced to zero so bad
    /// upstream data cannot block the cart.
    #[must_use]
    pub fn with_f64_price(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self::new(id, name, Decimal::from_f64(price).unwrap_or_default())
    }
}

/// One product entry in the cart with its quantity.
///
/// ## Invariants
///
/// - `id` is unique across all lines of a cart
/// - `quantity` is always within `1..=99`
/// - `price` is the add-time snapshot, never a live catalog price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// The line created the first time a product is added.
    #[must_use]
    pub fn first(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            quantity: MIN_QUANTITY,
        }
    }

    /// Line subtotal, `price × quantity`, exact.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
