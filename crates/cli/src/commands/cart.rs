//! Cart commands.
//!
//! Each runs through a [`CartStore`] so the printed count and total are the
//! same derived views a long-lived client would show.

use serde::Serialize;

use tienda_core::{Cart, CartItemId, Decimal, ProductId};
use tienda_storefront::Storefront;
use tienda_storefront::store::CartStore;

use super::session::Session;
use super::{CliError, print_json};

#[derive(Serialize)]
struct CartView<'a> {
    cart: &'a Cart,
    count: u64,
    total: Decimal,
}

fn print_cart(store: &CartStore<Storefront>, cart: &Cart) -> Result<(), CliError> {
    let summary = store.summary();
    print_json(&CartView {
        cart,
        count: summary.count,
        total: summary.total,
    })
}

pub async fn show(session: &Session) -> Result<(), CliError> {
    let store = CartStore::new(session.storefront.clone());
    let cart = store.load().await?;
    print_cart(&store, &cart)
}

pub async fn add(session: &Session, product: ProductId, qty: u32) -> Result<(), CliError> {
    let store = CartStore::new(session.storefront.clone());
    let cart = store.add(product, qty).await?;
    print_cart(&store, &cart)
}

pub async fn update(session: &Session, item: CartItemId, qty: u32) -> Result<(), CliError> {
    let store = CartStore::new(session.storefront.clone());
    let cart = store.update(item, qty).await?;
    print_cart(&store, &cart)
}

pub async fn remove(session: &Session, item: CartItemId) -> Result<(), CliError> {
    let store = CartStore::new(session.storefront.clone());
    let cart = store.remove(item).await?;
    print_cart(&store, &cart)
}
