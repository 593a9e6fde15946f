//! Catalog types: products, gallery images, and admin product payloads.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, ProductImageId};
use super::validation::ValidationError;

/// Maximum product name length accepted by the backend.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum slug length accepted by the backend.
pub const MAX_SLUG_LENGTH: usize = 50;

/// A catalog product.
///
/// The public listing returns only the scalar fields; the admin endpoints add
/// the main image URL and the gallery, which default to absent/empty here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
    /// Main image URL (admin representation only).
    #[serde(default)]
    pub image: Option<String>,
    /// Gallery images (admin representation only).
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        self.is_active && self.stock > 0
    }
}

/// A gallery image attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ProductImageId,
    /// Image URL.
    pub image: String,
}

/// Payload for `POST /api/admin/products/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProduct {
    pub name: String,
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
    pub is_active: bool,
}

impl NewProduct {
    /// Check the payload against the backend's field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_slug(&self.slug)?;
        validate_price(self.price)
    }
}

/// Partial update for `PATCH /api/admin/products/{id}/`.
///
/// Only the fields that are set are sent, so
/// `ProductPatch::new().price(dec!(19.99))` serializes to `{"price":19.99}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// An empty patch; set fields with the builder methods.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    #[must_use]
    pub const fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub const fn stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    #[must_use]
    pub const fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Whether no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.is_active.is_none()
    }

    /// Check the set fields against the backend's field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPatch`] when nothing is set, otherwise
    /// the first field violation found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPatch);
        }
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(slug) = &self.slug {
            validate_slug(slug)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Blank { field: "name" });
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name",
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(())
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::Blank { field: "slug" });
    }
    if slug.len() > MAX_SLUG_LENGTH {
        return Err(ValidationError::TooLong {
            field: "slug",
            max: MAX_SLUG_LENGTH,
        });
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

fn validate_price(price: Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::NegativePrice);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Ceramic Mug".to_string(),
            slug: "ceramic-mug".to_string(),
            price: Decimal::new(1250, 2),
            stock: 10,
            is_active: true,
        }
    }

    #[test]
    fn test_public_listing_defaults_admin_fields() {
        let json = r#"{"id":3,"name":"Mug","slug":"mug","price":"12.50","stock":4,"is_active":true}"#;
        let product: Product = serde_json::from_str(json).expect("product");

        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(product.price, Decimal::new(1250, 2));
        assert!(product.image.is_none());
        assert!(product.images.is_empty());
        assert!(product.is_purchasable());
    }

    #[test]
    fn test_admin_product_with_gallery() {
        let json = r#"{"id":3,"name":"Mug","slug":"mug","price":"12.50","stock":0,"is_active":true,
            "image":"/media/products/main/mug.png",
            "images":[{"id":11,"image":"/media/products/gallery/a.png"}]}"#;
        let product: Product = serde_json::from_str(json).expect("product");

        assert_eq!(product.image.as_deref(), Some("/media/products/main/mug.png"));
        assert_eq!(product.images.len(), 1);
        assert!(!product.is_purchasable());
    }

    #[test]
    fn test_patch_serializes_only_set_fields() {
        let patch = ProductPatch::new().price(Decimal::new(1999, 2));
        assert_eq!(
            serde_json::to_string(&patch).expect("serialize"),
            r#"{"price":19.99}"#
        );

        let patch = ProductPatch::new().stock(3).is_active(false);
        assert_eq!(
            serde_json::to_value(&patch).expect("serialize"),
            serde_json::json!({"stock": 3, "is_active": false})
        );
    }

    #[test]
    fn test_new_product_price_is_a_number() {
        let value = serde_json::to_value(new_product()).expect("serialize");
        assert_eq!(value["price"], serde_json::json!(12.5));
        assert_eq!(value["slug"], "ceramic-mug");
    }

    #[test]
    fn test_patch_validation() {
        assert_eq!(ProductPatch::new().validate(), Err(ValidationError::EmptyPatch));
        assert_eq!(
            ProductPatch::new().name("  ").validate(),
            Err(ValidationError::Blank { field: "name" })
        );
        assert_eq!(
            ProductPatch::new().slug("no spaces").validate(),
            Err(ValidationError::InvalidSlug("no spaces".to_string()))
        );
        assert_eq!(
            ProductPatch::new().price(Decimal::new(-1, 0)).validate(),
            Err(ValidationError::NegativePrice)
        );
        assert!(ProductPatch::new().price(Decimal::ZERO).validate().is_ok());
        assert!(ProductPatch::new().slug("mug_2-xl").validate().is_ok());
    }

    #[test]
    fn test_new_product_validation() {
        assert!(new_product().validate().is_ok());

        let mut product = new_product();
        product.name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            product.validate(),
            Err(ValidationError::TooLong { field: "name", .. })
        ));

        let mut product = new_product();
        product.slug = String::new();
        assert_eq!(product.validate(), Err(ValidationError::Blank { field: "slug" }));
    }
}
