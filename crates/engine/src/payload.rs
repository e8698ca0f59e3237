//! Order and request payload construction.
//!
//! Everything sent over the delivery protocol is built here: the fixed-shape
//! order record (its serde renames are the wire contract - downstream
//! workflows key on the exact field names), the return/exchange request
//! envelopes, and the locally generated order IDs and tracking numbers. No
//! server assigns identifiers; they are minted at build time.

use chrono::{SecondsFormat, Utc};
use grindctrl_core::{Email, OrderId, OrderStatus, PaymentMethod, Price, ProductId};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::checkout::OrderDraft;
use crate::error::{EngineError, FieldError, Result};
use crate::history;
use crate::state::CartLine;

/// The single courier every order ships with.
pub const COURIER: &str = "BOSTA";

/// A completed order as persisted and as sent over the wire.
///
/// Field names are the exact contract expected by the order webhook; the
/// struct field names exist only on the Rust side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(rename = "Order ID")]
    pub order_id: OrderId,
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Customer Email")]
    pub customer_email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Note")]
    pub note: String,
    #[serde(rename = "COD Amount")]
    pub cod_amount: String,
    #[serde(rename = "Tracking Number")]
    pub tracking_number: String,
    #[serde(rename = "Courier")]
    pub courier: String,
    #[serde(rename = "Total")]
    pub total: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Status")]
    pub status: OrderStatus,
    #[serde(rename = "Payment Method")]
    pub payment_method: String,
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "Quantity")]
    pub quantity: String,
}

/// Kind tag carried by return/exchange payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestType {
    Return,
    Exchange,
}

/// A return request: an order-shaped record plus the return detail block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    #[serde(flatten)]
    pub record: OrderRecord,
    #[serde(rename = "requestType")]
    pub request_type: RequestType,
    #[serde(rename = "returnDetails")]
    pub details: ReturnDetails,
}

/// Detail block attached to a return request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnDetails {
    pub return_reason: String,
    pub original_order_id: Option<OrderId>,
    pub original_order: Option<OrderRecord>,
    pub refund_amount: String,
    pub refund_method: String,
    pub original_payment_method: String,
}

/// An exchange request: an order-shaped record plus the exchange detail block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRequest {
    #[serde(flatten)]
    pub record: OrderRecord,
    #[serde(rename = "requestType")]
    pub request_type: RequestType,
    #[serde(rename = "exchangeDetails")]
    pub details: ExchangeDetails,
}

/// Detail block attached to an exchange request.
///
/// `price_difference` keeps its sign: positive means the customer owes the
/// difference, negative means a refund is owed to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDetails {
    pub original_order_id: OrderId,
    pub original_product: String,
    pub original_price: Decimal,
    pub original_payment_method: String,
    pub new_product: ExchangeProduct,
    pub price_difference: Decimal,
    pub exchange_action: String,
    pub payment_required: Decimal,
    pub refund_amount: Decimal,
    pub customer_note: String,
}

/// The replacement product chosen in an exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeProduct {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
}

// =============================================================================
// ID generation
// =============================================================================

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

fn base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        let digit = BASE36_DIGITS
            .get((n % 36) as usize)
            .copied()
            .unwrap_or(b'0');
        out.push(digit);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Mint a new order ID: `GC-<base36 millisecond timestamp>-<6 random base36
/// chars>`, upper-cased.
#[must_use]
pub fn generate_order_id() -> OrderId {
    let mut rng = rand::rng();
    #[allow(clippy::cast_sign_loss)] // the clock is past 1970
    let timestamp = base36(Utc::now().timestamp_millis() as u64);
    let suffix: String = (0..6)
        .map(|_| {
            let i = rng.random_range(0..BASE36_DIGITS.len());
            BASE36_DIGITS.get(i).copied().unwrap_or(b'0') as char
        })
        .collect();
    OrderId::new(format!("GC-{timestamp}-{suffix}").to_uppercase())
}

/// Mint a tracking number: `TRK` plus a 9-digit zero-padded random integer.
#[must_use]
pub fn generate_tracking_number() -> String {
    let n = rand::rng().random_range(0..1_000_000_000_u32);
    format!("TRK{n:09}")
}

/// Current timestamp in ISO-8601 UTC with millisecond precision.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Builders
// =============================================================================

/// Build a new-order record from the checkout draft and cart.
///
/// The COD amount equals the total when paying cash on delivery and is zero
/// for prepaid methods.
#[must_use]
pub fn build_order(draft: &OrderDraft, cart: &[CartLine]) -> OrderRecord {
    let total = Price::new(
        cart.iter()
            .map(|l| l.price.amount() * Decimal::from(l.quantity))
            .sum(),
    );
    let payment = draft.payment_method();
    let cod_amount = if payment == PaymentMethod::CashOnDelivery {
        total
    } else {
        Price::ZERO
    };

    OrderRecord {
        order_id: generate_order_id(),
        customer_name: draft.customer_name(),
        customer_email: draft.email.clone().unwrap_or_default(),
        phone: draft.phone.clone().unwrap_or_default(),
        city: draft.city.clone().unwrap_or_default(),
        address: draft.address.clone().unwrap_or_default(),
        note: draft.note.clone().unwrap_or_default(),
        cod_amount: cod_amount.wire(),
        tracking_number: generate_tracking_number(),
        courier: COURIER.to_string(),
        total: total.wire(),
        date: now_iso(),
        status: OrderStatus::New,
        payment_method: payment.label().to_string(),
        product: cart
            .iter()
            .map(CartLine::summary)
            .collect::<Vec<_>>()
            .join(", "),
        quantity: cart.iter().map(|l| l.quantity).sum::<u32>().to_string(),
    }
}

/// Customer-entered return request fields.
#[derive(Debug, Clone, Default)]
pub struct ReturnForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub return_reason: String,
    /// Original order reference, when the customer selected one.
    pub order_id: Option<OrderId>,
}

impl ReturnForm {
    /// Validate the contact fields, collecting every failure.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` with one entry per failing field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = contact_field_errors(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.city,
        );
        if self.return_reason.trim().is_empty() {
            errors.push(FieldError::required("returnReason"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(errors))
        }
    }
}

/// Customer-entered exchange request fields.
#[derive(Debug, Clone)]
pub struct ExchangeForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub note: String,
    /// The order being exchanged from.
    pub original_order_id: OrderId,
    /// The replacement product.
    pub new_product_id: ProductId,
}

impl ExchangeForm {
    /// Validate the contact fields, collecting every failure.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` with one entry per failing field.
    pub fn validate(&self) -> Result<()> {
        let errors = contact_field_errors(
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.phone,
            &self.address,
            &self.city,
        );
        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(errors))
        }
    }
}

fn contact_field_errors(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
    address: &str,
    city: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    for (field, value) in [
        ("firstName", first_name),
        ("lastName", last_name),
        ("phone", phone),
        ("address", address),
        ("city", city),
    ] {
        if value.trim().is_empty() {
            errors.push(FieldError::required(field));
        }
    }
    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email address is required"));
    } else if Email::parse(email.trim()).is_err() {
        errors.push(FieldError::new(
            "email",
            "Please enter a valid email address",
        ));
    }
    errors
}

/// Build a return request from the form and the matched original order (when
/// one was found).
///
/// A cash-on-delivery original yields an automatic refund of its total; any
/// other original payment method leaves the refund at zero for manual
/// resolution.
#[must_use]
pub fn build_return(form: &ReturnForm, original: Option<&OrderRecord>) -> ReturnRequest {
    let mut refund = "0.00".to_string();
    let mut payment_method = "Return Request".to_string();
    let mut original_payment = "Unknown".to_string();

    if let Some(order) = original {
        original_payment = order.payment_method.clone();
        if order.payment_method == PaymentMethod::CashOnDelivery.label() {
            refund = history::return_refund(order).wire();
            payment_method = "Refund to Customer".to_string();
        }
    }

    let note = match original {
        Some(order) => format!(
            "Return Reason: {} | Original Order: {} | Original Payment: {original_payment} | \
             Refund Amount: {refund} EGP | Refund Method: Customer will be contacted for refund \
             arrangement",
            form.return_reason, order.order_id,
        ),
        None => format!("Return Reason: {}", form.return_reason),
    };

    let record = OrderRecord {
        order_id: form.order_id.clone().unwrap_or_else(generate_order_id),
        customer_name: format!("{} {}", form.first_name.trim(), form.last_name.trim()),
        customer_email: form.email.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        city: form.city.trim().to_owned(),
        address: form.address.trim().to_owned(),
        note,
        cod_amount: refund.clone(),
        tracking_number: String::new(),
        courier: String::new(),
        total: refund.clone(),
        date: now_iso(),
        status: OrderStatus::Return,
        payment_method: payment_method.clone(),
        product: original.map_or_else(|| "Return Request".to_string(), |o| o.product.clone()),
        quantity: original.map_or_else(|| "1".to_string(), |o| o.quantity.clone()),
    };

    ReturnRequest {
        record,
        request_type: RequestType::Return,
        details: ReturnDetails {
            return_reason: form.return_reason.clone(),
            original_order_id: form.order_id.clone(),
            original_order: original.cloned(),
            refund_amount: refund,
            refund_method: payment_method,
            original_payment_method: original_payment,
        },
    }
}

/// Build an exchange request from the form, the matched original order, and
/// the selected replacement product.
///
/// The signed price difference drives the payment semantics: positive means
/// the customer pays the difference on delivery, negative means a refund of
/// the magnitude after the exchange completes, zero means no payment change.
#[must_use]
pub fn build_exchange(
    form: &ExchangeForm,
    original: &OrderRecord,
    new_product: &Product,
) -> ExchangeRequest {
    let old_price = history::order_total(original);
    let new_price = new_product.price;
    let delta = history::exchange_delta(original, new_price);

    let (cod_amount, payment_method, exchange_action) = if delta > Decimal::ZERO {
        (
            Price::new(delta).wire(),
            "Exchange Payment Required".to_string(),
            format!(
                "Customer must pay additional {delta:.2} EGP | Payment will be collected on \
                 delivery of new item"
            ),
        )
    } else if delta < Decimal::ZERO {
        let refund = -delta;
        (
            "0.00".to_string(),
            "Exchange Refund".to_string(),
            format!(
                "Customer will receive {refund:.2} EGP refund | Refund will be processed after \
                 exchange completion"
            ),
        )
    } else {
        (
            "0.00".to_string(),
            "Exchange - Same Price".to_string(),
            "Exchange at same price | No additional payment required".to_string(),
        )
    };

    let sign = if delta >= Decimal::ZERO { "+" } else { "" };
    let note = format!(
        "Exchange Request | Original Order: {} | Original Product: {} | Original Price: \
         {old_price:.2} EGP | New Product: {} | New Price: {new_price:.2} EGP | Price Difference: \
         {sign}{delta:.2} EGP | Action Required: {exchange_action} | Customer Note: {}",
        original.order_id,
        original.product,
        new_product.name_with_sku(),
        form.note,
        new_price = new_price.amount(),
    );

    let record = OrderRecord {
        order_id: generate_order_id(),
        customer_name: format!("{} {}", form.first_name.trim(), form.last_name.trim()),
        customer_email: form.email.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        city: form.city.trim().to_owned(),
        address: form.address.trim().to_owned(),
        note,
        cod_amount,
        tracking_number: String::new(),
        courier: String::new(),
        total: new_price.wire(),
        date: now_iso(),
        status: OrderStatus::Exchange,
        payment_method,
        product: format!("{} (Exchange)", new_product.name_with_sku()),
        quantity: "1".to_string(),
    };

    ExchangeRequest {
        record,
        request_type: RequestType::Exchange,
        details: ExchangeDetails {
            original_order_id: original.order_id.clone(),
            original_product: original.product.clone(),
            original_price: old_price,
            original_payment_method: original.payment_method.clone(),
            new_product: ExchangeProduct {
                id: new_product.id.clone(),
                name: new_product.name.clone(),
                sku: new_product.sku.clone().unwrap_or_else(|| "n/a".to_string()),
                price: new_price.amount(),
            },
            price_difference: delta,
            exchange_action,
            payment_required: delta.max(Decimal::ZERO),
            refund_amount: (-delta).max(Decimal::ZERO),
            customer_note: form.note.clone(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use grindctrl_core::LineKey;

    fn line(price: i64, quantity: u32) -> CartLine {
        let product_id = ProductId::new("luxury-cropped-black-tee");
        CartLine {
            key: LineKey::compose(&product_id, Some("M"), Some("Black")),
            product_id,
            name: "Luxury Cropped Black T-Shirt".to_string(),
            price: Price::new(Decimal::new(price, 0)),
            image: String::new(),
            quantity,
            size: Some("M".to_string()),
            color: Some("Black".to_string()),
        }
    }

    fn draft() -> OrderDraft {
        let mut draft = OrderDraft::default();
        draft.merge_shipping(&crate::checkout::ShippingForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            postal_code: "11511".to_string(),
            note: String::new(),
        });
        draft.merge_payment(Some(PaymentMethod::CashOnDelivery));
        draft
    }

    #[test]
    fn test_order_id_format() {
        let id = generate_order_id();
        let id = id.as_str();
        assert!(id.starts_with("GC-"), "{id}");
        assert_eq!(id, id.to_uppercase(), "order ids are upper-cased");
        let parts: Vec<_> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts.get(2).unwrap().len(), 6);
    }

    #[test]
    fn test_tracking_number_format() {
        let tracking = generate_tracking_number();
        assert!(tracking.starts_with("TRK"));
        let digits = tracking.trim_start_matches("TRK");
        assert_eq!(digits.len(), 9);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_base36_known_values() {
        assert_eq!(base36(0), "0");
        assert_eq!(base36(35), "z");
        assert_eq!(base36(36), "10");
        assert_eq!(base36(1295), "zz");
    }

    #[test]
    fn test_build_order_cod_amount_equals_total() {
        let order = build_order(&draft(), &[line(300, 2)]);
        assert_eq!(order.total, "600.00");
        assert_eq!(order.cod_amount, "600.00");
        assert_eq!(order.courier, "BOSTA");
        assert_eq!(order.status, OrderStatus::New);
        assert_eq!(order.payment_method, "Cash on Delivery");
        assert_eq!(order.quantity, "2");
        assert_eq!(order.product, "Luxury Cropped Black T-Shirt - M (2x)");
    }

    #[test]
    fn test_build_order_prepaid_has_zero_cod() {
        let mut draft = draft();
        draft.merge_payment(Some(PaymentMethod::BankTransfer));
        let order = build_order(&draft, &[line(300, 2)]);
        assert_eq!(order.total, "600.00");
        assert_eq!(order.cod_amount, "0.00");
        assert_eq!(order.payment_method, "Bank Transfer");
    }

    #[test]
    fn test_wire_field_names_are_exact() {
        let order = build_order(&draft(), &[line(300, 1)]);
        let value = serde_json::to_value(&order).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "Order ID",
            "Customer Name",
            "Customer Email",
            "Phone",
            "City",
            "Address",
            "Note",
            "COD Amount",
            "Tracking Number",
            "Courier",
            "Total",
            "Date",
            "Status",
            "Payment Method",
            "Product",
            "Quantity",
        ] {
            assert!(object.contains_key(key), "missing wire field {key}");
        }
        assert_eq!(object.len(), 16);
        assert_eq!(object.get("Status").unwrap(), "New");
    }

    #[test]
    fn test_return_payload_wraps_record() {
        let order = build_order(&draft(), &[line(300, 1)]);
        let form = ReturnForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            return_reason: "Wrong size".to_string(),
            order_id: Some(order.order_id.clone()),
        };
        let request = build_return(&form, Some(&order));

        assert_eq!(request.record.status, OrderStatus::Return);
        // COD original: full total refunded
        assert_eq!(request.details.refund_amount, "300.00");
        assert_eq!(request.record.payment_method, "Refund to Customer");
        assert_eq!(request.record.tracking_number, "");
        assert_eq!(request.record.courier, "");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value.get("requestType").unwrap(), "return");
        // flattened record fields sit at the top level
        assert!(value.get("Order ID").is_some());
        assert!(value.get("returnDetails").is_some());
    }

    #[test]
    fn test_return_without_match_leaves_refund_at_zero() {
        let form = ReturnForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            return_reason: "Changed my mind".to_string(),
            order_id: None,
        };
        let request = build_return(&form, None);
        assert_eq!(request.details.refund_amount, "0.00");
        assert_eq!(request.record.payment_method, "Return Request");
        assert_eq!(request.record.product, "Return Request");
        assert!(request.record.order_id.as_str().starts_with("GC-"));
    }

    #[test]
    fn test_return_validation_requires_reason() {
        let form = ReturnForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            return_reason: String::new(),
            order_id: None,
        };
        let err = form.validate().unwrap_err();
        let fields: Vec<_> = err.field_errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["returnReason"]);
    }

    #[test]
    fn test_exchange_refund_direction() {
        let mut original = build_order(&draft(), &[line(300, 1)]);
        original.total = "300.00".to_string();

        let new_product = Product {
            id: ProductId::new("oversized-hoodie"),
            name: "Oversized Hoodie".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(250, 0)),
            original_price: None,
            sku: Some("GC-HD-01".to_string()),
            category: "hoodies".to_string(),
            featured: false,
            images: vec![],
            colors: vec![],
            sizes: vec![],
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            tags: vec![],
        };
        let form = ExchangeForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            note: String::new(),
            original_order_id: original.order_id.clone(),
            new_product_id: new_product.id.clone(),
        };

        let request = build_exchange(&form, &original, &new_product);
        // 250 - 300: refund of 50 owed to the customer, sign preserved
        assert_eq!(request.details.price_difference, Decimal::new(-50, 0));
        assert_eq!(request.details.refund_amount, Decimal::new(50, 0));
        assert_eq!(request.details.payment_required, Decimal::ZERO);
        assert_eq!(request.record.payment_method, "Exchange Refund");
        assert_eq!(request.record.cod_amount, "0.00");
        assert_eq!(request.record.total, "250.00");
        assert_eq!(request.record.product, "Oversized Hoodie (GC-HD-01) (Exchange)");
        assert_eq!(request.record.quantity, "1");
    }

    #[test]
    fn test_exchange_owed_by_customer() {
        let original = build_order(&draft(), &[line(300, 1)]);
        let new_product = Product {
            id: ProductId::new("premium-jacket"),
            name: "Premium Jacket".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(450, 0)),
            original_price: None,
            sku: None,
            category: "jackets".to_string(),
            featured: false,
            images: vec![],
            colors: vec![],
            sizes: vec![],
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            tags: vec![],
        };
        let form = ExchangeForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            note: "Please ship fast".to_string(),
            original_order_id: original.order_id.clone(),
            new_product_id: new_product.id.clone(),
        };

        let request = build_exchange(&form, &original, &new_product);
        assert_eq!(request.details.price_difference, Decimal::new(150, 0));
        assert_eq!(request.details.payment_required, Decimal::new(150, 0));
        assert_eq!(request.details.refund_amount, Decimal::ZERO);
        // positive delta is collected on delivery of the replacement
        assert_eq!(request.record.cod_amount, "150.00");
        assert_eq!(request.record.payment_method, "Exchange Payment Required");
        assert_eq!(request.details.new_product.sku, "n/a");
    }

    #[test]
    fn test_exchange_same_price() {
        let original = build_order(&draft(), &[line(300, 1)]);
        let new_product = Product {
            id: ProductId::new("white-tee"),
            name: "White Tee".to_string(),
            description: String::new(),
            price: Price::new(Decimal::new(300, 0)),
            original_price: None,
            sku: None,
            category: "tshirts".to_string(),
            featured: false,
            images: vec![],
            colors: vec![],
            sizes: vec![],
            in_stock: true,
            rating: 0.0,
            review_count: 0,
            tags: vec![],
        };
        let form = ExchangeForm {
            first_name: "Sara".to_string(),
            last_name: "Adel".to_string(),
            email: "sara@example.com".to_string(),
            phone: "+201005550199".to_string(),
            address: "1 Tahrir Square".to_string(),
            city: "Cairo".to_string(),
            note: String::new(),
            original_order_id: original.order_id.clone(),
            new_product_id: new_product.id.clone(),
        };

        let request = build_exchange(&form, &original, &new_product);
        assert_eq!(request.details.price_difference, Decimal::ZERO);
        assert_eq!(request.record.payment_method, "Exchange - Same Price");
        assert_eq!(request.record.cod_amount, "0.00");
    }
}
