//! Reactive cart snapshot.
//!
//! [`CartStore`] holds the last cart the backend returned and publishes every
//! replacement through a `tokio::sync::watch` channel. It never edits the
//! cart itself: each operation calls the backend and stores whatever cart
//! comes back.
//!
//! # Concurrency
//!
//! Last write wins. If two mutations are in flight at once, the snapshot ends
//! up as whichever response resolved last, which may not reflect both
//! changes. Callers that need both applied should await one before issuing
//! the next, or call [`CartStore::load`] afterwards.

use tokio::sync::watch;
use tracing::{debug, instrument};

use tienda_core::{Cart, CartItemId, CartMutation, Decimal, ProductId};

use crate::api::Storefront;
use crate::error::ApiError;

/// Backend operations the cart store depends on.
///
/// [`Storefront`] implements this against the real API; tests substitute an
/// in-memory fake.
pub trait CartBackend: Send + Sync {
    /// Fetch the current cart.
    fn fetch_cart(&self) -> impl Future<Output = Result<Cart, ApiError>> + Send;

    /// Add `qty` of a product.
    fn add_item(
        &self,
        product_id: ProductId,
        qty: u32,
    ) -> impl Future<Output = Result<CartMutation, ApiError>> + Send;

    /// Set a line's quantity.
    fn update_item(
        &self,
        item_id: CartItemId,
        qty: u32,
    ) -> impl Future<Output = Result<CartMutation, ApiError>> + Send;

    /// Remove a line.
    fn remove_item(
        &self,
        item_id: CartItemId,
    ) -> impl Future<Output = Result<CartMutation, ApiError>> + Send;
}

impl CartBackend for Storefront {
    async fn fetch_cart(&self) -> Result<Cart, ApiError> {
        self.get_cart().await
    }

    async fn add_item(&self, product_id: ProductId, qty: u32) -> Result<CartMutation, ApiError> {
        self.add_to_cart(product_id, qty).await
    }

    async fn update_item(&self, item_id: CartItemId, qty: u32) -> Result<CartMutation, ApiError> {
        self.update_cart_item(item_id, qty).await
    }

    async fn remove_item(&self, item_id: CartItemId) -> Result<CartMutation, ApiError> {
        self.remove_cart_item(item_id).await
    }
}

/// Derived views over a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartSummary {
    /// Sum of line quantities; 0 when no cart is loaded.
    pub count: u64,
    /// Server-computed total; 0 when no cart is loaded.
    pub total: Decimal,
}

impl CartSummary {
    /// Compute the views for a snapshot.
    #[must_use]
    pub fn of(cart: Option<&Cart>) -> Self {
        cart.map_or_else(Self::default, |cart| Self {
            count: cart.item_count(),
            total: cart.total,
        })
    }
}

/// Cart snapshot synchronized with backend responses.
///
/// Owned by the application's composition root; create one per session.
pub struct CartStore<B> {
    backend: B,
    snapshot: watch::Sender<Option<Cart>>,
}

impl<B> std::fmt::Debug for CartStore<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("summary", &self.summary())
            .finish_non_exhaustive()
    }
}

impl<B> CartStore<B> {
    /// Create an empty store (no cart loaded).
    #[must_use]
    pub fn new(backend: B) -> Self {
        let (snapshot, _) = watch::channel(None);
        Self { backend, snapshot }
    }

    /// The backend this store calls.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Receive the snapshot now and on every replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Cart>> {
        self.snapshot.subscribe()
    }

    /// A copy of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Option<Cart> {
        self.snapshot.borrow().clone()
    }

    /// Total item count (sum of quantities), 0 when no cart is loaded.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.summary().count
    }

    /// Cart total as computed by the backend, 0 when no cart is loaded.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.summary().total
    }

    /// Both derived views at once.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(self.snapshot.borrow().as_ref())
    }

    /// Forget the snapshot (e.g. after logout) and notify subscribers.
    pub fn clear(&self) {
        self.snapshot.send_replace(None);
        debug!("Cart snapshot cleared");
    }

    fn replace(&self, cart: Cart) -> Cart {
        debug!(
            cart_id = %cart.id,
            lines = cart.items.len(),
            total = %cart.total,
            "Cart snapshot replaced"
        );
        self.snapshot.send_replace(Some(cart.clone()));
        cart
    }
}

impl<B: CartBackend> CartStore<B> {
    /// Fetch the cart and replace the snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails; the snapshot is unchanged.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<Cart, ApiError> {
        let cart = self.backend.fetch_cart().await?;
        Ok(self.replace(cart))
    }

    /// Add `qty` of a product and store the returned cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails; the snapshot is unchanged.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: ProductId, qty: u32) -> Result<Cart, ApiError> {
        let mutation = self.backend.add_item(product_id, qty).await?;
        Ok(self.replace(mutation.cart))
    }

    /// Set a line's quantity and store the returned cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails; the snapshot is unchanged.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn update(&self, item_id: CartItemId, qty: u32) -> Result<Cart, ApiError> {
        let mutation = self.backend.update_item(item_id, qty).await?;
        Ok(self.replace(mutation.cart))
    }

    /// Remove a line and store the returned cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the backend call fails; the snapshot is unchanged.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove(&self, item_id: CartItemId) -> Result<Cart, ApiError> {
        let mutation = self.backend.remove_item(item_id).await?;
        Ok(self.replace(mutation.cart))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use tienda_core::{CartId, CartItem, CartProduct};

    use super::*;

    /// In-memory backend that prices every product at 10 and answers the
    /// way the real backend does.
    struct FakeBackend {
        cart: Mutex<Cart>,
        next_item_id: Mutex<i64>,
        fail_with: Mutex<Option<String>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                cart: Mutex::new(Cart {
                    id: CartId::new(1),
                    items: Vec::new(),
                    total: Decimal::ZERO,
                }),
                next_item_id: Mutex::new(100),
                fail_with: Mutex::new(None),
            }
        }

        fn fail_next(&self, body: &str) {
            *self.fail_with.lock().expect("lock") = Some(body.to_string());
        }

        fn check_failure(&self) -> Result<(), ApiError> {
            match self.fail_with.lock().expect("lock").take() {
                Some(body) => Err(ApiError::RequestFailed {
                    status: StatusCode::BAD_REQUEST,
                    body,
                }),
                None => Ok(()),
            }
        }

        fn respond(&self, detail: &str, cart: &mut Cart) -> CartMutation {
            for item in &mut cart.items {
                item.subtotal = item.unit_price * Decimal::from(item.qty);
            }
            cart.total = cart.items.iter().map(|item| item.subtotal).sum();
            CartMutation {
                detail: detail.to_string(),
                cart: cart.clone(),
            }
        }
    }

    impl CartBackend for FakeBackend {
        async fn fetch_cart(&self) -> Result<Cart, ApiError> {
            self.check_failure()?;
            Ok(self.cart.lock().expect("lock").clone())
        }

        async fn add_item(&self, product_id: ProductId, qty: u32) -> Result<CartMutation, ApiError> {
            self.check_failure()?;
            let mut cart = self.cart.lock().expect("lock");
            if let Some(item) = cart.items.iter_mut().find(|i| i.product.id == product_id) {
                item.qty += qty;
            } else {
                let mut next = self.next_item_id.lock().expect("lock");
                *next += 1;
                cart.items.push(CartItem {
                    id: CartItemId::new(*next),
                    product: CartProduct {
                        id: product_id,
                        name: format!("Product {product_id}"),
                        price: Decimal::from(10),
                    },
                    qty,
                    unit_price: Decimal::from(10),
                    subtotal: Decimal::ZERO,
                });
            }
            Ok(self.respond("added", &mut cart))
        }

        async fn update_item(&self, item_id: CartItemId, qty: u32) -> Result<CartMutation, ApiError> {
            self.check_failure()?;
            let mut cart = self.cart.lock().expect("lock");
            if qty == 0 {
                cart.items.retain(|i| i.id != item_id);
                return Ok(self.respond("removed", &mut cart));
            }
            if let Some(item) = cart.items.iter_mut().find(|i| i.id == item_id) {
                item.qty = qty;
            }
            Ok(self.respond("updated", &mut cart))
        }

        async fn remove_item(&self, item_id: CartItemId) -> Result<CartMutation, ApiError> {
            self.check_failure()?;
            let mut cart = self.cart.lock().expect("lock");
            cart.items.retain(|i| i.id != item_id);
            Ok(self.respond("removed", &mut cart))
        }
    }

    #[test]
    fn test_empty_store_views_are_zero() {
        let store = CartStore::new(FakeBackend::new());

        assert!(store.snapshot().is_none());
        assert_eq!(store.count(), 0);
        assert_eq!(store.total(), Decimal::ZERO);
        assert_eq!(store.summary(), CartSummary::default());
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot() {
        let store = CartStore::new(FakeBackend::new());

        let cart = store.load().await.expect("load");

        assert_eq!(store.snapshot(), Some(cart));
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_add_stores_server_cart() {
        let store = CartStore::new(FakeBackend::new());

        store.add(ProductId::new(7), 2).await.expect("add");

        let server_cart = store.backend().cart.lock().expect("lock").clone();
        assert_eq!(store.snapshot(), Some(server_cart));
        assert_eq!(store.count(), 2);
        assert_eq!(store.total(), Decimal::from(20));
    }

    #[tokio::test]
    async fn test_count_sums_quantities_across_lines() {
        let store = CartStore::new(FakeBackend::new());

        store.add(ProductId::new(1), 2).await.expect("add");
        store.add(ProductId::new(2), 3).await.expect("add");
        store.add(ProductId::new(1), 1).await.expect("add");

        let cart = store.snapshot().expect("loaded");
        assert_eq!(cart.items.len(), 2);
        assert_eq!(store.count(), 6);
        assert_eq!(store.total(), Decimal::from(60));
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = CartStore::new(FakeBackend::new());
        let cart = store.add(ProductId::new(1), 1).await.expect("add");
        let item_id = cart.items.first().expect("line").id;

        store.update(item_id, 4).await.expect("update");
        assert_eq!(store.count(), 4);

        store.remove(item_id).await.expect("remove");
        assert_eq!(store.count(), 0);
        assert!(store.snapshot().expect("loaded").is_empty());
    }

    #[tokio::test]
    async fn test_update_to_zero_removes_line() {
        let store = CartStore::new(FakeBackend::new());
        let cart = store.add(ProductId::new(1), 3).await.expect("add");
        let item_id = cart.items.first().expect("line").id;

        let cart = store.update(item_id, 0).await.expect("update");
        assert!(cart.is_empty());
    }

    #[tokio::test]
    async fn test_failure_leaves_snapshot_untouched() {
        let store = CartStore::new(FakeBackend::new());
        store.add(ProductId::new(1), 1).await.expect("add");
        let before = store.snapshot();

        store.backend().fail_next("invalid_payload");
        let err = store.add(ProductId::new(2), 1).await.expect_err("should fail");

        assert_eq!(err.body(), Some("invalid_payload"));
        assert_eq!(store.snapshot(), before);
    }

    #[tokio::test]
    async fn test_subscribers_see_each_replacement() {
        let store = CartStore::new(FakeBackend::new());
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_none());

        store.add(ProductId::new(5), 2).await.expect("add");
        assert!(rx.has_changed().expect("sender alive"));
        assert_eq!(CartSummary::of(rx.borrow_and_update().as_ref()).count, 2);

        store.clear();
        assert!(rx.has_changed().expect("sender alive"));
        assert!(rx.borrow_and_update().is_none());
        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn test_independent_stores_do_not_share_state() {
        let first = CartStore::new(FakeBackend::new());
        let second = CartStore::new(FakeBackend::new());

        first.add(ProductId::new(1), 1).await.expect("add");

        assert_eq!(first.count(), 1);
        assert!(second.snapshot().is_none());
    }
}
