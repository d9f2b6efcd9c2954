use serde::{Deserialize, Serialize};

use super::plan::PlanId;

/// Merchant name shown on the checkout widget.
pub const MERCHANT_NAME: &str = "FinSight AI";

/// Everything the payment widget needs to open a checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOrder {
    pub plan_id: PlanId,

    /// Price in the currency's smallest unit (price × 100, rounded)
    pub amount_minor: i64,

    pub currency: String,

    pub name: String,

    pub description: String,

    pub prefill: PaymentPrefill,
}

/// Customer details pre-filled into the widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentPrefill {
    pub name: String,
    pub email: String,
}

/// What the widget reported back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PaymentOutcome {
    Succeeded { payment_id: String },
    /// `description` is the gateway's own error text
    Failed { description: String },
    /// The user closed the widget
    Dismissed,
}
