//! Persisted snapshot format and the hydration sanitizer.
//!
//! The cart is stored under a single slot as `{ "items": [...] }`. On read,
//! a legacy bare array at the slot is also accepted. Hydration never fails:
//! entries are sanitized field by field, and anything unusable is dropped
//! with a warning rather than aborting the load.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::line::{CartLine, MIN_QUANTITY, sanitize_requested_quantity};
use crate::state::CartState;

/// Wire shape written to storage: the full line list under an `items` key.
#[derive(Serialize)]
struct Snapshot<'a> {
    items: &'a [CartLine],
}

/// Serialize the full cart state for storage.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode(state: &CartState) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&Snapshot {
        items: state.lines(),
    })
}

/// Rebuild cart state from stored snapshot bytes.
///
/// Accepts both the current `{ "items": [...] }` shape and the legacy bare
/// array. Every entry is sanitized before it is accepted; unreadable bytes
/// hydrate to an empty cart.
#[must_use]
pub fn decode(bytes: &[u8]) -> CartState {
    let value: Value = match serde_json::from_slice(bytes) {
        Ok(value) => value,
        Err(e) => {
            warn!("discarding unreadable cart snapshot: {e}");
            return CartState::new();
        }
    };
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => {
                warn!("cart snapshot has no items array, starting empty");
                Vec::new()
            }
        },
        _ => {
            warn!("cart snapshot is neither an object nor an array, starting empty");
            Vec::new()
        }
    };
    CartState::from_lines(sanitize_items(items))
}

/// Coerce raw snapshot entries into valid cart lines.
///
/// Non-object entries and duplicate ids (first occurrence wins) are
/// dropped; every surviving line satisfies the [`CartLine`] invariants.
fn sanitize_items(items: Vec<Value>) -> Vec<CartLine> {
    let mut seen = HashSet::new();
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(map) = item else {
            warn!("dropping non-object cart snapshot entry");
            continue;
        };
        let id = coerce_text(map.get("id"));
        if !seen.insert(id.clone()) {
            warn!(%id, "dropping duplicate cart line from snapshot");
            continue;
        }
        lines.push(CartLine {
            id,
            name: coerce_text(map.get("name")),
            price: coerce_price(map.get("price")),
            image_url: map
                .get("imageUrl")
                .and_then(Value::as_str)
                .map(str::to_owned),
            quantity: coerce_quantity(map.get("quantity")),
        });
    }
    lines
}

/// Strings pass through; any other value becomes its JSON text
/// (`1` → `"1"`, `null` and missing fields → `"null"`).
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => Value::Null.to_string(),
    }
}

/// Numbers and numeric strings parse exactly; anything else is zero.
fn coerce_price(value: Option<&Value>) -> Decimal {
    match value {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => Some(Decimal::ZERO),
    }
    .unwrap_or_default()
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    text.parse()
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

/// Numeric (or numeric-string) quantities are rounded and clamped to
/// `1..=99`; anything else defaults to 1.
fn coerce_quantity(value: Option<&Value>) -> u32 {
    let requested = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    requested
        .and_then(sanitize_requested_quantity)
        .unwrap_or(MIN_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::Product;

    fn state_with(products: &[Product]) -> CartState {
        let mut state = CartState::new();
        for product in products {
            state.add(product);
        }
        state
    }

    #[test]
    fn test_encode_wraps_items_in_object() {
        let state = state_with(&[Product::new("p1", "Widget", Decimal::new(1999, 2))]);
        let bytes = encode(&state).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        let items = value.get("items").and_then(Value::as_array).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("id").unwrap(), "p1");
        assert_eq!(items[0].get("price").unwrap().as_f64().unwrap(), 19.99);
        // no image -> field omitted entirely
        assert!(items[0].get("imageUrl").is_none());
    }

    #[test]
    fn test_encode_uses_camel_case_image_url() {
        let mut product = Product::new("p1", "Widget", Decimal::ONE);
        product.image_url = Some("https://img.example/p1.jpg".into());
        let bytes = encode(&state_with(&[product])).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            value["items"][0]["imageUrl"],
            Value::String("https://img.example/p1.jpg".into())
        );
    }

    #[test]
    fn test_decode_round_trips_valid_state() {
        let mut product = Product::new("p1", "Widget", Decimal::new(1999, 2));
        product.image_url = Some("https://img.example/p1.jpg".into());
        let mut state = state_with(&[product, Product::new("p2", "Gadget", Decimal::new(500, 2))]);
        state.update_quantity("p1", 3.0);
        let decoded = decode(&encode(&state).unwrap());
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_accepts_legacy_bare_array() {
        let decoded = decode(br#"[{"id":"p1","name":"Widget","price":10,"quantity":2}]"#);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.lines()[0].quantity, 2);
        assert_eq!(decoded.lines()[0].price, Decimal::TEN);
    }

    #[test]
    fn test_decode_sanitizes_corrupted_entry() {
        let decoded = decode(br#"{"items":[{"id":1,"name":null,"price":"abc","quantity":-5}]}"#);
        assert_eq!(decoded.len(), 1);
        let line = &decoded.lines()[0];
        assert_eq!(line.id, "1");
        assert_eq!(line.name, "null");
        assert_eq!(line.price, Decimal::ZERO);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_decode_drops_non_object_entries() {
        let decoded = decode(br#"{"items":[42,"junk",{"id":"p1","name":"W","price":1,"quantity":1}]}"#);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.lines()[0].id, "p1");
    }

    #[test]
    fn test_decode_keeps_first_duplicate_id() {
        let decoded = decode(
            br#"{"items":[
                {"id":"p1","name":"First","price":1,"quantity":1},
                {"id":"p1","name":"Second","price":2,"quantity":2}
            ]}"#,
        );
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.lines()[0].name, "First");
    }

    #[test]
    fn test_decode_accepts_numeric_string_price() {
        let decoded = decode(br#"{"items":[{"id":"p1","name":"W","price":"12.50","quantity":1}]}"#);
        assert_eq!(decoded.lines()[0].price, Decimal::new(1250, 2));
    }

    #[test]
    fn test_decode_drops_non_string_image_url() {
        let decoded = decode(br#"{"items":[{"id":"p1","name":"W","price":1,"quantity":1,"imageUrl":7}]}"#);
        assert_eq!(decoded.lines()[0].image_url, None);
    }

    #[test]
    fn test_decode_unreadable_bytes_yield_empty_cart() {
        assert!(decode(b"not json at all").is_empty());
        assert!(decode(b"\"just a string\"").is_empty());
        assert!(decode(br#"{"cart":[]}"#).is_empty());
    }
}
