//! The cart store: hydrate once, mutate, persist, notify.
//!
//! A [`CartStore`] is explicitly constructed and injected wherever the UI
//! layer needs it; there is no ambient singleton. Each mutation applies the
//! pure [`CartState`] transition, then writes a best-effort snapshot and
//! invokes the registered subscribers synchronously.
//!
//! Two stores opened over the same storage slot (the multi-tab case) do not
//! reconcile: the last snapshot written wins. This matches the storage
//! layer's overwrite semantics and is accepted behavior.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::line::{CartLine, Product};
use crate::persist::SnapshotStore;
use crate::snapshot;
use crate::state::CartState;

/// Handle returned by [`CartStore::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartState)>;

/// Single source of truth for the cart contents.
pub struct CartStore<S: SnapshotStore> {
    state: CartState,
    storage: S,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<S: SnapshotStore> CartStore<S> {
    /// Open a store over `storage`, hydrating from its current snapshot.
    ///
    /// A missing snapshot is a normal first run; an unreadable one is
    /// logged and treated the same. Hydration never fails.
    pub fn open(storage: S) -> Self {
        let state = match storage.load() {
            Ok(Some(bytes)) => snapshot::decode(&bytes),
            Ok(None) => CartState::new(),
            Err(e) => {
                warn!("failed to load cart snapshot, starting empty: {e}");
                CartState::new()
            }
        };
        Self {
            state,
            storage,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The current cart state.
    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// The cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    /// The derived cart total, recomputed on every call.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.state.total()
    }

    /// Add one unit of `product` (see [`CartState::add`]).
    pub fn add(&mut self, product: &Product) {
        self.state.add(product);
        debug!(id = %product.id, "added product to cart");
        self.commit();
    }

    /// Remove the line with the given id (see [`CartState::remove`]).
    pub fn remove(&mut self, id: &str) {
        self.state.remove(id);
        debug!(%id, "removed cart line");
        self.commit();
    }

    /// Set a line's quantity from a raw request
    /// (see [`CartState::update_quantity`]).
    pub fn update_quantity(&mut self, id: &str, requested: f64) {
        self.state.update_quantity(id, requested);
        debug!(%id, requested, "updated cart quantity");
        self.commit();
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        self.state.clear();
        debug!("cleared cart");
        self.commit();
    }

    /// Consume the store and hand back its storage slot.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Register a callback invoked after every mutation with the new state.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a previously registered callback. Unknown ids are a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.listeners.retain(|(sid, _)| *sid != id);
    }

    /// Persist the full state best-effort, then notify subscribers.
    ///
    /// Storage failures must never break the mutation path: they are logged
    /// and swallowed, leaving the in-memory state authoritative until the
    /// next successful write.
    fn commit(&mut self) {
        match snapshot::encode(&self.state) {
            Ok(bytes) => {
                if let Err(e) = self.storage.save(&bytes) {
                    warn!("failed to persist cart snapshot: {e}");
                }
            }
            Err(e) => warn!("failed to encode cart snapshot: {e}"),
        }
        for (_, listener) in &mut self.listeners {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryStore;

    fn widget() -> Product {
        Product::new("p1", "Widget", Decimal::new(1000, 2))
    }

    #[test]
    fn test_open_with_empty_storage_starts_empty() {
        let store = CartStore::open(MemoryStore::new());
        assert!(store.state().is_empty());
        assert_eq!(store.total(), Decimal::ZERO);
    }

    #[test]
    fn test_mutation_writes_snapshot() {
        let mut store = CartStore::open(MemoryStore::new());
        store.add(&widget());
        let bytes = store.storage.snapshot().expect("snapshot written").to_vec();
        let hydrated = CartStore::open(MemoryStore::seeded(bytes));
        assert_eq!(hydrated.state(), store.state());
    }

    #[test]
    fn test_subscribers_run_after_each_mutation() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut store = CartStore::open(MemoryStore::new());
        let sink = Rc::clone(&seen);
        let id = store.subscribe(move |state: &CartState| {
            sink.borrow_mut().push(state.len());
        });

        store.add(&widget());
        store.add(&widget());
        store.clear();
        assert_eq!(*seen.borrow(), vec![1, 1, 0]);

        store.unsubscribe(id);
        store.add(&widget());
        assert_eq!(*seen.borrow(), vec![1, 1, 0]);
    }
}
