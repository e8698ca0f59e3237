//! GrindCTRL Engine - Cart and order lifecycle for the storefront.
//!
//! This crate is the business core behind the storefront view layer: the
//! mutable commerce state (cart, wishlist, order draft), the three-step
//! checkout wizard, the resilient multi-transport webhook delivery used for
//! order submission and return/exchange requests, and the persisted order
//! history with phone/email matching.
//!
//! # Architecture
//!
//! - [`Session`] is the facade: one explicitly constructed instance per page
//!   session, wiring state, history, and delivery together. The view layer
//!   reports user intents as method calls and reads derived state back for
//!   re-render - a strict one-way flow with no rendering assumptions here.
//! - State lives in a local persistent store ([`store::Store`]) and is
//!   mirrored write-through after every mutation; there is no backend
//!   database.
//! - Orders are "submitted" by best-effort delivery to external webhook URLs
//!   ([`delivery::Dispatcher`]); nothing in this crate is fatal, and every
//!   failure degrades to an error value over a safe previous-valid state.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod delivery;
pub mod error;
pub mod history;
pub mod loading;
pub mod payload;
pub mod session;
pub mod state;
pub mod store;

pub use catalog::{Catalog, Category, Product, ProductColor};
pub use checkout::{CheckoutStep, OrderDraft, ShippingForm};
pub use config::{ConfigError, EngineConfig, WebhookConfig};
pub use delivery::{Dispatcher, Transport, TransportError};
pub use error::{EngineError, FieldError, Result};
pub use history::OrderHistory;
pub use loading::LoadingTracker;
pub use payload::{ExchangeForm, ExchangeRequest, OrderRecord, ReturnForm, ReturnRequest};
pub use session::Session;
pub use state::{AddToCartOptions, CartLine, CommerceState};
pub use store::Store;
