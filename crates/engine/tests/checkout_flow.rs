//! End-to-end engine scenarios: cart through checkout to a recorded order,
//! delivery failure handling, and the post-purchase return/exchange flows.
//!
//! Delivery is scripted through the `Transport` seam - no real network
//! traffic occurs in these tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use grindctrl_engine::catalog::Catalog;
use grindctrl_engine::delivery::{Dispatcher, Transport, TransportError};
use grindctrl_engine::payload::{ExchangeForm, ReturnForm};
use grindctrl_engine::state::AddToCartOptions;
use grindctrl_engine::store::Store;
use grindctrl_engine::{
    CheckoutStep, EngineError, Session, ShippingForm, WebhookConfig,
};
use rust_decimal::Decimal;

/// Transport scripted to succeed or fail, counting attempts.
struct Scripted {
    succeed: bool,
    attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for Scripted {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn send(&self, _url: &str, _body: &str) -> Result<(), TransportError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.succeed {
            Ok(())
        } else {
            Err(TransportError::Status(
                reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn webhooks() -> WebhookConfig {
    WebhookConfig {
        order_url: Some("https://hooks.example.com/orders".to_string()),
        return_url: Some("https://hooks.example.com/returns".to_string()),
        exchange_url: Some("https://hooks.example.com/exchanges".to_string()),
    }
}

/// Session over a temp store with a single scripted transport.
fn session_with(succeed: bool, store_dir: &std::path::Path) -> (Session, Arc<AtomicUsize>) {
    let attempts = Arc::new(AtomicUsize::new(0));
    let dispatcher = Dispatcher::with_transports(vec![Box::new(Scripted {
        succeed,
        attempts: Arc::clone(&attempts),
    })]);
    let session = Session::with_parts(
        Catalog::seed(),
        Store::open(store_dir),
        dispatcher,
        webhooks(),
    );
    (session, attempts)
}

fn shipping_form() -> ShippingForm {
    ShippingForm {
        first_name: "Sara".to_string(),
        last_name: "Adel".to_string(),
        email: "sara@example.com".to_string(),
        phone: "+201005550199".to_string(),
        address: "1 Tahrir Square".to_string(),
        city: "Cairo".to_string(),
        postal_code: "11511".to_string(),
        note: String::new(),
    }
}

/// Drive a full checkout for the seed product at quantity 2 (price 300.00).
async fn place_seed_order(session: &mut Session) -> grindctrl_engine::OrderRecord {
    let product_id = Catalog::seed().products.first().unwrap().id.clone();
    session
        .state_mut()
        .add_to_cart(
            &product_id,
            AddToCartOptions {
                quantity: 2,
                size: Some("M".to_string()),
                color: Some("Black".to_string()),
            },
        )
        .unwrap();

    assert_eq!(session.state().cart_total().wire(), "600.00");
    assert_eq!(session.state().cart_count(), 2);

    session.state_mut().open_checkout().unwrap();
    session.state_mut().submit_shipping(&shipping_form()).unwrap();
    // untouched selector defaults to cash on delivery
    session.state_mut().submit_payment(None).unwrap();
    session.place_order().await.unwrap()
}

#[tokio::test]
async fn cod_checkout_records_order_and_clears_cart() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, attempts) = session_with(true, dir.path());

    let order = place_seed_order(&mut session).await;

    assert_eq!(order.cod_amount, "600.00");
    assert_eq!(order.total, "600.00");
    assert_eq!(order.payment_method, "Cash on Delivery");
    assert_eq!(order.courier, "BOSTA");
    assert!(order.order_id.as_str().starts_with("GC-"));
    assert!(order.tracking_number.starts_with("TRK"));

    assert!(session.state().cart().is_empty(), "cart cleared on success");
    assert_eq!(session.state().checkout_step(), None, "checkout closed");
    assert_eq!(session.history().orders().len(), 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
    assert!(!session.loading().is_busy());
}

#[tokio::test]
async fn delivery_failure_keeps_cart_and_checkout_open() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _attempts) = session_with(false, dir.path());

    let product_id = Catalog::seed().products.first().unwrap().id.clone();
    session
        .state_mut()
        .add_to_cart(&product_id, AddToCartOptions::default())
        .unwrap();
    session.state_mut().open_checkout().unwrap();
    session.state_mut().submit_shipping(&shipping_form()).unwrap();
    session.state_mut().submit_payment(None).unwrap();

    let err = session.place_order().await.unwrap_err();
    assert!(matches!(err, EngineError::Delivery));

    // No retry happens automatically; everything stays put for a manual resubmit
    assert_eq!(session.state().cart().len(), 1);
    assert_eq!(session.state().checkout_step(), Some(CheckoutStep::Review));
    assert!(session.history().orders().is_empty(), "order not recorded");
}

#[tokio::test]
async fn place_order_outside_review_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, attempts) = session_with(true, dir.path());

    let err = session.place_order().await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidStep));
    assert_eq!(attempts.load(Ordering::SeqCst), 0, "nothing was sent");
}

#[tokio::test]
async fn order_history_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    {
        let (mut session, _) = session_with(true, dir.path());
        place_seed_order(&mut session).await;
    }

    // A fresh session over the same store sees the recorded order and the
    // emptied cart
    let (session, _) = session_with(true, dir.path());
    assert_eq!(session.history().orders().len(), 1);
    assert!(session.state().cart().is_empty());
}

#[tokio::test]
async fn exchange_to_cheaper_product_owes_customer_a_refund() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with(true, dir.path());

    // Original order totals 300.00 (quantity 1)
    let product_id = Catalog::seed().products.first().unwrap().id.clone();
    session
        .state_mut()
        .add_to_cart(&product_id, AddToCartOptions::default())
        .unwrap();
    session.state_mut().open_checkout().unwrap();
    session.state_mut().submit_shipping(&shipping_form()).unwrap();
    session.state_mut().submit_payment(None).unwrap();
    let original = session.place_order().await.unwrap();
    assert_eq!(original.total, "300.00");

    // Exchange against a 250.00 replacement: delta -50, refund 50
    let mut catalog = Catalog::seed();
    let mut replacement = catalog.products.first().unwrap().clone();
    replacement.id = grindctrl_core::ProductId::new("budget-tee");
    replacement.name = "Budget Tee".to_string();
    replacement.price = grindctrl_core::Price::new(Decimal::new(250, 0));
    catalog.products.push(replacement);

    let mut session = Session::with_parts(
        catalog,
        Store::open(dir.path()),
        Dispatcher::with_transports(vec![Box::new(Scripted {
            succeed: true,
            attempts: Arc::new(AtomicUsize::new(0)),
        })]),
        webhooks(),
    );

    let quote = session
        .exchange_quote(
            &original.order_id,
            &grindctrl_core::ProductId::new("budget-tee"),
        )
        .unwrap();
    assert_eq!(quote, Decimal::new(-50, 0));

    let request = session
        .submit_exchange(&ExchangeForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            note: String::new(),
            original_order_id: original.order_id.clone(),
            new_product_id: grindctrl_core::ProductId::new("budget-tee"),
        })
        .await
        .unwrap();

    assert_eq!(request.details.price_difference, Decimal::new(-50, 0));
    assert_eq!(request.details.refund_amount, Decimal::new(50, 0));
    assert_eq!(request.record.total, "250.00");

    // The signed difference survives serialization
    let wire = serde_json::to_value(&request).unwrap();
    let delta = wire
        .get("exchangeDetails")
        .and_then(|d| d.get("priceDifference"))
        .unwrap();
    assert!(delta.as_str().unwrap().starts_with('-'));
}

#[tokio::test]
async fn exchange_against_unknown_order_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with(true, dir.path());

    let err = session
        .submit_exchange(&ExchangeForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            note: String::new(),
            original_order_id: grindctrl_core::OrderId::new("GC-NOPE"),
            new_product_id: Catalog::seed().products.first().unwrap().id.clone(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn cod_return_refunds_full_total() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with(true, dir.path());

    let original = place_seed_order(&mut session).await;

    let request = session
        .submit_return(&ReturnForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            return_reason: "Wrong size".to_string(),
            order_id: Some(original.order_id.clone()),
        })
        .await
        .unwrap();

    assert_eq!(request.details.refund_amount, "600.00");
    assert_eq!(request.record.payment_method, "Refund to Customer");
    assert_eq!(request.details.original_payment_method, "Cash on Delivery");
    // The original order is untouched by the return
    assert_eq!(session.history().orders().len(), 1);
    assert_eq!(
        session.history().orders().first().unwrap().order_id,
        original.order_id
    );
}

#[tokio::test]
async fn return_with_mismatched_contact_details_finds_no_order() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with(true, dir.path());

    let original = place_seed_order(&mut session).await;

    // Different phone and email: the order id alone is not enough
    let request = session
        .submit_return(&ReturnForm {
            first_name: "Omar".to_string(),
            last_name: "Hassan".to_string(),
            email: "omar@example.com".to_string(),
            phone: "+209991112222".to_string(),
            address: "5 Nile Street".to_string(),
            city: "Giza".to_string(),
            return_reason: "Damaged".to_string(),
            order_id: Some(original.order_id.clone()),
        })
        .await
        .unwrap();

    assert_eq!(request.details.refund_amount, "0.00");
    assert!(request.details.original_order.is_none());
}

#[tokio::test]
async fn lookup_orders_unions_phone_and_email() {
    let dir = tempfile::tempdir().unwrap();
    let (mut session, _) = session_with(true, dir.path());

    let original = place_seed_order(&mut session).await;

    // Matched by both criteria, but listed once
    let matched = session.lookup_orders(Some("201005550199"), Some("SARA@EXAMPLE.COM"));
    assert_eq!(matched.len(), 1);
    assert_eq!(matched.first().unwrap().order_id, original.order_id);
}
