//! Status and payment-method enums.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted order record.
///
/// `New` is the status of every freshly placed order; `Return` and `Exchange`
/// mark the request records sent through the same wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    New,
    Return,
    Exchange,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::New => write!(f, "New"),
            Self::Return => write!(f, "Return"),
            Self::Exchange => write!(f, "Exchange"),
        }
    }
}

/// Payment method selected at checkout.
///
/// Cash on delivery is the default and the only method with automatic refund
/// handling on returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    #[serde(rename = "transfer")]
    BankTransfer,
    #[serde(rename = "card")]
    Card,
}

impl PaymentMethod {
    /// Short machine code, as used by the payment selector.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::BankTransfer => "transfer",
            Self::Card => "card",
        }
    }

    /// Human-readable label, as carried in the order payload.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "Cash on Delivery",
            Self::BankTransfer => "Bank Transfer",
            Self::Card => "Credit Card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cod" => Ok(Self::CashOnDelivery),
            "transfer" => Ok(Self::BankTransfer),
            "card" => Ok(Self::Card),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
