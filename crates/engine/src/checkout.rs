//! Checkout wizard steps, forms, and the accumulated order draft.
//!
//! The wizard is a linear three-step machine: shipping details, payment
//! method, review. Each step's submitted fields are merged additively into
//! the [`OrderDraft`] before the step advances, so data entered at step 1
//! survives into step 3 (and into a reopened checkout within the same page
//! session).

use grindctrl_core::{Email, PaymentMethod, Phone};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, FieldError};

/// Maximum length of the order note, matching the form's character counter.
pub const MAX_NOTE_LENGTH: usize = 500;

/// One step of the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckoutStep {
    /// Step 1: shipping and contact details.
    Shipping,
    /// Step 2: payment method selection.
    Payment,
    /// Step 3: review and submit.
    Review,
}

impl CheckoutStep {
    /// 1-based position for progress display.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Shipping => 1,
            Self::Payment => 2,
            Self::Review => 3,
        }
    }

    /// The previous step; `Shipping` stays put.
    #[must_use]
    pub const fn back(self) -> Self {
        match self {
            Self::Shipping | Self::Payment => Self::Shipping,
            Self::Review => Self::Payment,
        }
    }
}

/// Shipping form as submitted from step 1.
#[derive(Debug, Clone, Default)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub note: String,
}

impl ShippingForm {
    /// Validate every field, collecting all failures rather than stopping at
    /// the first so the form can flag each offending input at once.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` carrying one `FieldError` per failing field.
    pub fn validate(&self) -> crate::error::Result<()> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("postalCode", &self.postal_code),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::required(field));
            }
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new("email", "Email address is required"));
        } else if Email::parse(self.email.trim()).is_err() {
            errors.push(FieldError::new(
                "email",
                "Please enter a valid email address",
            ));
        }

        if self.phone.trim().is_empty() {
            errors.push(FieldError::required("phone"));
        } else if Phone::parse(self.phone.trim()).is_err() {
            errors.push(FieldError::new("phone", "Please enter a valid phone number"));
        }

        if self.note.chars().count() > MAX_NOTE_LENGTH {
            errors.push(FieldError::new(
                "note",
                format!("Note must be at most {MAX_NOTE_LENGTH} characters"),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EngineError::Validation(errors))
        }
    }
}

/// Accumulated checkout form data, merged step by step.
///
/// Every field is optional: the draft starts empty and each wizard step fills
/// in its slice. Merging never clears a field - a later partial submission
/// only overwrites what it actually carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub note: Option<String>,
    pub payment_method: Option<PaymentMethod>,
}

impl OrderDraft {
    /// Merge a validated shipping form into the draft.
    pub fn merge_shipping(&mut self, form: &ShippingForm) {
        self.first_name = Some(form.first_name.trim().to_owned());
        self.last_name = Some(form.last_name.trim().to_owned());
        self.email = Some(form.email.trim().to_owned());
        self.phone = Some(form.phone.trim().to_owned());
        self.address = Some(form.address.trim().to_owned());
        self.city = Some(form.city.trim().to_owned());
        self.postal_code = Some(form.postal_code.trim().to_owned());
        if !form.note.trim().is_empty() {
            self.note = Some(form.note.trim().to_owned());
        }
    }

    /// Merge the payment step. `None` means the selector was never touched
    /// and the default (cash on delivery) applies.
    pub fn merge_payment(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = Some(method.unwrap_or_default());
    }

    /// Full customer name, e.g. `Sara Adel`.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default(),
        )
        .trim()
        .to_owned()
    }

    /// The selected payment method, defaulting to cash on delivery.
    #[must_use]
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method.unwrap_or_default()
    }
}
