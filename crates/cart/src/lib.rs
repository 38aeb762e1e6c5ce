//! Lingonberry Cart - Shopping cart state core.
//!
//! This crate owns the cart contents for the Lingonberry storefront:
//! ordered lines with bounded quantities, snapshot-at-add-time prices,
//! exact decimal totals, and a sanitizing persistence protocol.
//!
//! # Architecture
//!
//! The crate performs no file or network I/O. Durable storage is reached
//! only through the [`SnapshotStore`] trait; callers inject whatever
//! backing slot they have (a browser storage bridge, a file, memory).
//! State transitions are pure methods on [`CartState`], so the cart rules
//! are testable without any storage at all; [`CartStore`] layers hydration,
//! persistence, and change notification on top.
//!
//! # Modules
//!
//! - [`line`] - Cart line and product reference types, quantity bounds
//! - [`state`] - Ordered cart contents and the pure transitions
//! - [`snapshot`] - Persisted wire format and the hydration sanitizer
//! - [`store`] - The store: hydrate once, mutate, persist, notify
//! - [`persist`] - The [`SnapshotStore`] contract and in-memory slot
//! - [`format`] - Display formatting for prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod format;
pub mod line;
pub mod persist;
pub mod snapshot;
pub mod state;
pub mod store;

pub use format::format_price_sek;
pub use line::{CartLine, MAX_QUANTITY, MIN_QUANTITY, Product};
pub use persist::{MemoryStore, SnapshotError, SnapshotStore};
pub use state::CartState;
pub use store::{CartStore, SubscriptionId};
