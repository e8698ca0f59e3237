//! Order history persistence and matching.
//!
//! Completed orders are appended to a persisted log and never edited or
//! removed. Customers have no accounts, so returns and exchanges locate past
//! orders by the contact details they re-enter: phone numbers compare by
//! digits only, emails case-insensitively. The price computations for
//! exchanges (signed delta) and returns (COD-only refund) also live here.

use grindctrl_core::{OrderId, PaymentMethod, Price};
use rust_decimal::Decimal;

use crate::payload::OrderRecord;
use crate::store::{ORDERS_KEY, Store};

/// Append-only log of completed orders, mirrored into the persistent store.
pub struct OrderHistory {
    orders: Vec<OrderRecord>,
    store: Store,
}

impl OrderHistory {
    /// Load the history persisted by earlier sessions.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let orders = store.get(ORDERS_KEY).unwrap_or_default();
        Self { orders, store }
    }

    /// All recorded orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[OrderRecord] {
        &self.orders
    }

    /// Append a completed order to the log. Existing entries are never
    /// touched.
    pub fn record(&mut self, order: OrderRecord) {
        self.orders.push(order);
        self.store.set(ORDERS_KEY, &self.orders);
    }

    /// Look up an order by its ID.
    #[must_use]
    pub fn find_by_id(&self, id: &OrderId) -> Option<&OrderRecord> {
        self.orders.iter().find(|o| &o.order_id == id)
    }

    /// Orders whose phone number matches, comparing digits only.
    #[must_use]
    pub fn find_by_phone(&self, phone: &str) -> Vec<&OrderRecord> {
        let wanted = digits(phone);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.orders
            .iter()
            .filter(|o| digits(&o.phone) == wanted)
            .collect()
    }

    /// Orders whose customer email matches, case-insensitively.
    #[must_use]
    pub fn find_by_email(&self, email: &str) -> Vec<&OrderRecord> {
        if email.trim().is_empty() {
            return Vec::new();
        }
        self.orders
            .iter()
            .filter(|o| o.customer_email.eq_ignore_ascii_case(email.trim()))
            .collect()
    }

    /// Union of phone and email matches, de-duplicated by Order ID - an
    /// order matched by both criteria appears exactly once.
    #[must_use]
    pub fn find_by_phone_or_email(
        &self,
        phone: Option<&str>,
        email: Option<&str>,
    ) -> Vec<&OrderRecord> {
        let mut matched: Vec<&OrderRecord> = phone.map_or_else(Vec::new, |p| self.find_by_phone(p));
        if let Some(e) = email {
            for order in self.find_by_email(e) {
                if !matched.iter().any(|m| m.order_id == order.order_id) {
                    matched.push(order);
                }
            }
        }
        matched
    }
}

/// Digit-only form of a phone string.
fn digits(s: &str) -> String {
    s.chars().filter(char::is_ascii_digit).collect()
}

/// The order's recorded total as a decimal; unparseable totals count as zero.
#[must_use]
pub fn order_total(order: &OrderRecord) -> Decimal {
    order.total.parse().unwrap_or(Decimal::ZERO)
}

/// Signed price delta for exchanging `order` against a product priced
/// `new_price`.
///
/// Positive: the customer owes the difference, collected on delivery of the
/// replacement. Negative: a refund of the magnitude is owed to the customer,
/// processed after the exchange completes. Zero: no payment change.
#[must_use]
pub fn exchange_delta(order: &OrderRecord, new_price: Price) -> Decimal {
    new_price.amount() - order_total(order)
}

/// Refund owed when `order` is returned.
///
/// Cash-on-delivery orders refund the recorded total (falling back to the COD
/// amount). Any other payment method yields zero - those refunds are resolved
/// manually.
#[must_use]
pub fn return_refund(order: &OrderRecord) -> Price {
    if order.payment_method != PaymentMethod::CashOnDelivery.label() {
        return Price::ZERO;
    }
    let amount = order
        .total
        .parse()
        .or_else(|_| order.cod_amount.parse())
        .unwrap_or(Decimal::ZERO);
    Price::new(amount)
}
