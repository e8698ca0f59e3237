//! Commerce state: cart, wishlist, order draft, and checkout step.
//!
//! This is the single mutable core of the engine. Every mutation goes through
//! a method here, recomputes derived values on demand, and mirrors the cart
//! and wishlist into the persistent store write-through style - the view
//! layer never issues explicit save calls. There is exactly one
//! `CommerceState` per page session.

use grindctrl_core::{LineKey, PaymentMethod, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::checkout::{CheckoutStep, OrderDraft, ShippingForm};
use crate::error::{EngineError, Result};
use crate::store::{CART_KEY, Store, WISHLIST_KEY};

/// Options accompanying an add-to-cart intent.
#[derive(Debug, Clone)]
pub struct AddToCartOptions {
    /// Requested quantity; values below 1 are clamped to 1.
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl Default for AddToCartOptions {
    fn default() -> Self {
        Self {
            quantity: 1,
            size: None,
            color: None,
        }
    }
}

/// One size/color-specific quantity entry in the active cart.
///
/// Name, price, and image are snapshotted at add time; later catalog changes
/// do not affect existing lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub key: LineKey,
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
    pub size: Option<String>,
    pub color: Option<String>,
}

impl CartLine {
    /// Snapshotted price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        Price::new(self.price.amount() * Decimal::from(self.quantity))
    }

    /// Summary form used in the order payload, e.g. `Black Tee - M (2x)`.
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.size {
            Some(size) => format!("{} - {size} ({}x)", self.name, self.quantity),
            None => format!("{} ({}x)", self.name, self.quantity),
        }
    }
}

/// The mutable commerce state for one page session.
pub struct CommerceState {
    catalog: Catalog,
    cart: Vec<CartLine>,
    wishlist: Vec<ProductId>,
    draft: OrderDraft,
    checkout: Option<CheckoutStep>,
    store: Store,
}

impl CommerceState {
    /// Build the state over a catalog snapshot and persistent store, picking
    /// up any cart and wishlist persisted by an earlier session.
    #[must_use]
    pub fn new(catalog: Catalog, store: Store) -> Self {
        let cart = store.get(CART_KEY).unwrap_or_default();
        let wishlist = store.get(WISHLIST_KEY).unwrap_or_default();
        Self {
            catalog,
            cart,
            wishlist,
            draft: OrderDraft::default(),
            checkout: None,
            store,
        }
    }

    /// The current catalog snapshot.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The active cart lines, in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    /// The wishlist, in order of addition.
    #[must_use]
    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    /// The accumulated checkout draft.
    #[must_use]
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// The open checkout step, or `None` when checkout is closed.
    #[must_use]
    pub fn checkout_step(&self) -> Option<CheckoutStep> {
        self.checkout
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// If a line with the same (product, size, color) already exists its
    /// quantity is incremented; otherwise a new line snapshots the product's
    /// current name, price, and first image.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` when the product is not in the catalog.
    pub fn add_to_cart(&mut self, product_id: &ProductId, options: AddToCartOptions) -> Result<()> {
        let Some(product) = self.catalog.product(product_id) else {
            return Err(EngineError::NotFound(format!("product {product_id}")));
        };

        let quantity = options.quantity.max(1);
        let key = LineKey::compose(
            product_id,
            options.size.as_deref(),
            options.color.as_deref(),
        );

        if let Some(line) = self.cart.iter_mut().find(|l| l.key == key) {
            line.quantity += quantity;
        } else {
            self.cart.push(CartLine {
                key,
                product_id: product_id.clone(),
                name: product.name.clone(),
                price: product.price,
                image: product.primary_image().to_owned(),
                quantity,
                size: options.size,
                color: options.color,
            });
        }

        self.persist_cart();
        Ok(())
    }

    /// Remove a line unconditionally. No-op if absent.
    pub fn remove_from_cart(&mut self, key: &LineKey) {
        self.cart.retain(|l| &l.key != key);
        self.persist_cart();
    }

    /// Set a line's quantity exactly; zero removes the line. No-op if absent.
    pub fn set_cart_quantity(&mut self, key: &LineKey, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(key);
            return;
        }
        if let Some(line) = self.cart.iter_mut().find(|l| &l.key == key) {
            line.quantity = quantity;
            self.persist_cart();
        }
    }

    /// Adjust a line's quantity relative to its current stored value.
    ///
    /// The new quantity is always computed from authoritative state, never
    /// from a value baked into an earlier render - displayed quantities can
    /// go stale between renders. A result at or below zero removes the line.
    pub fn change_cart_quantity(&mut self, key: &LineKey, delta: i64) {
        let Some(current) = self
            .cart
            .iter()
            .find(|l| &l.key == key)
            .map(|l| l.quantity)
        else {
            return;
        };
        let next = i64::from(current).saturating_add(delta).max(0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to [0, u32]
        self.set_cart_quantity(key, next.min(i64::from(u32::MAX)) as u32);
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist_cart();
    }

    /// Sum of snapshotted price times quantity over all lines.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        Price::new(
            self.cart
                .iter()
                .map(|l| l.price.amount() * Decimal::from(l.quantity))
                .sum(),
        )
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.iter().map(|l| l.quantity).sum()
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Toggle a product's wishlist membership.
    ///
    /// Returns `true` when the net effect was an addition and `false` for a
    /// removal, so the caller can pick a success-vs-info notification.
    pub fn toggle_wishlist(&mut self, product_id: &ProductId) -> bool {
        let added = if let Some(pos) = self.wishlist.iter().position(|id| id == product_id) {
            self.wishlist.remove(pos);
            false
        } else {
            self.wishlist.push(product_id.clone());
            true
        };
        self.store.set(WISHLIST_KEY, &self.wishlist);
        added
    }

    /// Whether a product is currently wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.wishlist.contains(product_id)
    }

    // =========================================================================
    // Checkout wizard
    // =========================================================================

    /// Open the checkout wizard at the shipping step.
    ///
    /// The wizard always restarts from the top; the draft keeps any values
    /// from an earlier abandoned attempt in this session.
    ///
    /// # Errors
    ///
    /// `EngineError::EmptyCart` when there is nothing to check out.
    pub fn open_checkout(&mut self) -> Result<()> {
        if self.cart.is_empty() {
            return Err(EngineError::EmptyCart);
        }
        self.checkout = Some(CheckoutStep::Shipping);
        Ok(())
    }

    /// Submit the shipping form, advancing to the payment step.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidStep` outside the shipping step;
    /// `EngineError::Validation` with every failing field when the form is
    /// incomplete or malformed (the step does not advance).
    pub fn submit_shipping(&mut self, form: &ShippingForm) -> Result<()> {
        if self.checkout != Some(CheckoutStep::Shipping) {
            return Err(EngineError::InvalidStep);
        }
        form.validate()?;
        // Merge before advancing so the draft is current when step 2 renders
        self.draft.merge_shipping(form);
        self.checkout = Some(CheckoutStep::Payment);
        Ok(())
    }

    /// Submit the payment step, advancing to review. An untouched selector
    /// (`None`) falls back to cash on delivery.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidStep` outside the payment step.
    pub fn submit_payment(&mut self, method: Option<PaymentMethod>) -> Result<()> {
        if self.checkout != Some(CheckoutStep::Payment) {
            return Err(EngineError::InvalidStep);
        }
        self.draft.merge_payment(method);
        self.checkout = Some(CheckoutStep::Review);
        Ok(())
    }

    /// Step backward in the wizard. No-op at the shipping step or when
    /// checkout is closed.
    pub fn checkout_back(&mut self) {
        if let Some(step) = self.checkout {
            self.checkout = Some(step.back());
        }
    }

    /// Close the wizard without touching the draft.
    pub fn close_checkout(&mut self) {
        self.checkout = None;
    }

    fn persist_cart(&self) {
        self.store.set(CART_KEY, &self.cart);
    }
}
