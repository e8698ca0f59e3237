//! Product catalog types and loader.
//!
//! The catalog is externally supplied and read-only to the engine. It is
//! loaded from a JSON file in the same camelCase shape the storefront ships
//! as `products.json`; when the file is missing or malformed the loader falls
//! back to a small embedded seed catalog so the engine always starts with
//! something to sell.

use std::path::Path;

use grindctrl_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A catalog product. Read-only to the engine; cart lines snapshot the fields
/// they need at add time instead of referencing these live values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    #[serde(default)]
    pub sku: Option<String>,
    pub category: String,
    #[serde(default)]
    pub featured: bool,
    pub images: Vec<String>,
    #[serde(default)]
    pub colors: Vec<ProductColor>,
    #[serde(default)]
    pub sizes: Vec<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Product {
    /// First image URL, used as the cart-line snapshot.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// Display name with the SKU appended when one exists, e.g.
    /// `Luxury Cropped Black T-Shirt (GC-TEE-01)`.
    #[must_use]
    pub fn name_with_sku(&self) -> String {
        match &self.sku {
            Some(sku) => format!("{} ({sku})", self.name),
            None => self.name.clone(),
        }
    }
}

/// A selectable product color: display name plus swatch value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductColor {
    pub name: String,
    pub value: String,
}

/// A catalog category tab. `filter: None` means "show everything".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub filter: Option<String>,
}

/// The loaded catalog snapshot: products plus category tabs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Catalog {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Load the catalog from a JSON file, falling back to the embedded seed
    /// catalog when the file is missing or malformed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(catalog) => catalog,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Malformed catalog; using seed data");
                    Self::seed()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read catalog; using seed data");
                Self::seed()
            }
        }
    }

    /// The embedded fallback catalog.
    #[must_use]
    pub fn seed() -> Self {
        let seed = include_str!("seed_catalog.json");
        // The embedded seed is validated by tests; a parse failure here is a
        // build defect, so degrade to an empty catalog rather than panic.
        serde_json::from_str(seed).unwrap_or_else(|e| {
            warn!(error = %e, "Embedded seed catalog failed to parse");
            Self::default()
        })
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products matching a category filter; `"all"` and unknown tabs with no
    /// filter return everything.
    #[must_use]
    pub fn products_in_category(&self, category_id: &str) -> Vec<&Product> {
        let filter = self
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .and_then(|c| c.filter.as_deref());

        match filter {
            Some(f) => self.products.iter().filter(|p| p.category == f).collect(),
            None => self.products.iter().collect(),
        }
    }
}
