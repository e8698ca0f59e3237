//! The engine facade for one page session.
//!
//! A `Session` is constructed explicitly - once per page session - and
//! handed to whatever needs it; there is no ambient global instance. It owns
//! the commerce state, the order history, and the delivery pipeline, and
//! exposes the user intents the view layer reports: cart and wishlist
//! mutations via [`Session::state_mut`], the checkout wizard, and the
//! post-purchase return/exchange flows.

use reqwest::Client;

use grindctrl_core::{OrderId, ProductId};
use rust_decimal::Decimal;

use crate::catalog::Catalog;
use crate::checkout::CheckoutStep;
use crate::config::{EngineConfig, WebhookConfig};
use crate::delivery::{Dispatcher, ORDER_SIMULATED_DELAY, REQUEST_SIMULATED_DELAY};
use crate::error::{EngineError, Result};
use crate::history::{self, OrderHistory};
use crate::loading::LoadingTracker;
use crate::payload::{self, ExchangeForm, ExchangeRequest, OrderRecord, ReturnForm, ReturnRequest};
use crate::state::CommerceState;
use crate::store::Store;

/// Loading-indicator task name for a pending order submission.
const ORDER_TASK: &str = "order";

/// One browsing session's engine instance.
pub struct Session {
    state: CommerceState,
    history: OrderHistory,
    dispatcher: Dispatcher,
    webhooks: WebhookConfig,
    loading: LoadingTracker,
}

impl Session {
    /// Build a session from configuration: open the persistent store, load
    /// the catalog (falling back to seed data), and pick up any persisted
    /// cart, wishlist, and order history.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let store = Store::open(&config.state_dir);
        let catalog = Catalog::load(&config.catalog_path);
        Self::with_parts(
            catalog,
            store,
            Dispatcher::new(Client::new()),
            config.webhooks.clone(),
        )
    }

    /// Build a session from explicit parts. Tests use this to inject a
    /// scripted dispatcher and a temporary store.
    #[must_use]
    pub fn with_parts(
        catalog: Catalog,
        store: Store,
        dispatcher: Dispatcher,
        webhooks: WebhookConfig,
    ) -> Self {
        let history = OrderHistory::load(store.clone());
        Self {
            state: CommerceState::new(catalog, store),
            history,
            dispatcher,
            webhooks,
            loading: LoadingTracker::new(),
        }
    }

    /// The commerce state (cart, wishlist, draft, checkout step).
    #[must_use]
    pub fn state(&self) -> &CommerceState {
        &self.state
    }

    /// Mutable commerce state for cart/wishlist/checkout intents.
    pub fn state_mut(&mut self) -> &mut CommerceState {
        &mut self.state
    }

    /// The recorded order history.
    #[must_use]
    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    /// The loading-indicator tracker.
    #[must_use]
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    /// Submit the reviewed order.
    ///
    /// Builds the wire payload from the draft and cart, attempts delivery,
    /// and on success records the completed order, clears the cart, and
    /// closes checkout. On delivery failure everything stays put - the cart
    /// is untouched and checkout remains at the review step so the user can
    /// resubmit manually.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidStep` outside the review step;
    /// `EngineError::Delivery` when every transport fails.
    pub async fn place_order(&mut self) -> Result<OrderRecord> {
        if self.state.checkout_step() != Some(CheckoutStep::Review) {
            return Err(EngineError::InvalidStep);
        }

        self.loading.begin(ORDER_TASK);
        let order = payload::build_order(self.state.draft(), self.state.cart());
        let delivered = self
            .dispatcher
            .deliver(
                self.webhooks.order_url.as_deref(),
                &order,
                ORDER_SIMULATED_DELAY,
            )
            .await;
        self.loading.finish(ORDER_TASK);

        if !delivered {
            return Err(EngineError::Delivery);
        }

        self.history.record(order.clone());
        self.state.clear_cart();
        self.state.close_checkout();
        Ok(order)
    }

    /// Orders matching the given contact details, for the return/exchange
    /// order pickers.
    #[must_use]
    pub fn lookup_orders(&self, phone: Option<&str>, email: Option<&str>) -> Vec<&OrderRecord> {
        self.history.find_by_phone_or_email(phone, email)
    }

    /// Signed price delta for exchanging an order against a product, for the
    /// exchange preview. `None` when either side is unknown.
    #[must_use]
    pub fn exchange_quote(&self, order_id: &OrderId, product_id: &ProductId) -> Option<Decimal> {
        let order = self.history.find_by_id(order_id)?;
        let product = self.state.catalog().product(product_id)?;
        Some(history::exchange_delta(order, product.price))
    }

    /// Submit a return request.
    ///
    /// The referenced order (when one was selected) is matched against the
    /// entered contact details; a cash-on-delivery original yields an
    /// automatic refund of its total, anything else stays at zero for manual
    /// resolution. The request payload is returned on successful delivery.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` for missing/malformed contact fields;
    /// `EngineError::Delivery` when every transport fails.
    pub async fn submit_return(&mut self, form: &ReturnForm) -> Result<ReturnRequest> {
        form.validate()?;

        let request = {
            let matched = form.order_id.as_ref().and_then(|id| {
                self.history
                    .find_by_phone_or_email(Some(&form.phone), Some(&form.email))
                    .into_iter()
                    .find(|o| &o.order_id == id)
            });
            payload::build_return(form, matched)
        };

        let delivered = self
            .dispatcher
            .deliver(
                self.webhooks.return_url.as_deref(),
                &request,
                REQUEST_SIMULATED_DELAY,
            )
            .await;

        if delivered {
            Ok(request)
        } else {
            Err(EngineError::Delivery)
        }
    }

    /// Submit an exchange request.
    ///
    /// The original order must match the entered contact details and the
    /// replacement product must exist in the catalog. The signed price
    /// difference is carried in the payload so the downstream handler can
    /// tell owed-by-customer from owed-to-customer.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` for missing/malformed contact fields;
    /// `EngineError::NotFound` when the order or product is unknown;
    /// `EngineError::Delivery` when every transport fails.
    pub async fn submit_exchange(&mut self, form: &ExchangeForm) -> Result<ExchangeRequest> {
        form.validate()?;

        let request = {
            let original = self
                .history
                .find_by_phone_or_email(Some(&form.phone), Some(&form.email))
                .into_iter()
                .find(|o| o.order_id == form.original_order_id)
                .ok_or_else(|| {
                    EngineError::NotFound(format!("order {}", form.original_order_id))
                })?;
            let product = self
                .state
                .catalog()
                .product(&form.new_product_id)
                .ok_or_else(|| {
                    EngineError::NotFound(format!("product {}", form.new_product_id))
                })?;
            payload::build_exchange(form, original, product)
        };

        let delivered = self
            .dispatcher
            .deliver(
                self.webhooks.exchange_url.as_deref(),
                &request,
                REQUEST_SIMULATED_DELAY,
            )
            .await;

        if delivered {
            Ok(request)
        } else {
            Err(EngineError::Delivery)
        }
    }
}
