//! Staff commands for products, images and orders.
//!
//! # Usage
//!
//! ```bash
//! export TIENDA_USERNAME=admin TIENDA_PASSWORD=...
//!
//! tienda admin products create --name "Mug" --slug mug --price 12.50 --stock 10
//! tienda admin products patch 7 --price 19.99
//! tienda admin products upload-main 7 ./mug.png
//! tienda admin orders status 12 paid
//! ```
//!
//! The backend answers 403 unless the logged-in user is staff.

use std::path::Path;

use tienda_admin::ImageUpload;
use tienda_core::{NewProduct, OrderId, OrderStatus, ProductId, ProductImageId, ProductPatch};

use super::session::Session;
use super::{CliError, print_json};

pub async fn list_products(session: &Session) -> Result<(), CliError> {
    print_json(&session.admin.list_products().await?)
}

pub async fn create_product(session: &Session, product: &NewProduct) -> Result<(), CliError> {
    print_json(&session.admin.create_product(product).await?)
}

pub async fn patch_product(
    session: &Session,
    id: ProductId,
    patch: &ProductPatch,
) -> Result<(), CliError> {
    print_json(&session.admin.patch_product(id, patch).await?)
}

pub async fn upload_main(session: &Session, id: ProductId, path: &Path) -> Result<(), CliError> {
    let upload = ImageUpload::from_path(path).await?;
    print_json(&session.admin.upload_main_image(id, upload).await?)
}

pub async fn upload_gallery(session: &Session, id: ProductId, path: &Path) -> Result<(), CliError> {
    let upload = ImageUpload::from_path(path).await?;
    print_json(&session.admin.upload_gallery_image(id, upload).await?)
}

pub async fn delete_image(session: &Session, image: ProductImageId) -> Result<(), CliError> {
    print_json(&session.admin.delete_gallery_image(image).await?)
}

pub async fn list_orders(session: &Session) -> Result<(), CliError> {
    print_json(&session.admin.list_orders().await?)
}

pub async fn update_order_status(
    session: &Session,
    id: OrderId,
    status: OrderStatus,
) -> Result<(), CliError> {
    print_json(&session.admin.update_order_status(id, status).await?)
}
