//! Customer commands: ping, current user, catalog and checkout.

use tienda_core::CheckoutRequest;

use super::session::Session;
use super::{CliError, print_json};

pub async fn ping(session: &Session) -> Result<(), CliError> {
    print_json(&session.storefront.ping().await?)
}

pub async fn me(session: &Session) -> Result<(), CliError> {
    print_json(&session.storefront.me().await?)
}

pub async fn products(session: &Session) -> Result<(), CliError> {
    print_json(&session.storefront.list_products().await?)
}

pub async fn checkout_summary(session: &Session) -> Result<(), CliError> {
    print_json(&session.storefront.checkout_summary().await?)
}

pub async fn checkout_confirm(
    session: &Session,
    request: &CheckoutRequest,
) -> Result<(), CliError> {
    print_json(&session.storefront.confirm_checkout(request).await?)
}
