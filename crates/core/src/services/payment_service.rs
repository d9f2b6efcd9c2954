use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::payment::{PaymentOrder, PaymentOutcome, PaymentPrefill, MERCHANT_NAME};
use crate::models::plan::{Plan, PlanId};
use crate::models::user::User;
use crate::services::pricing_service::PricingService;

/// Builds checkout requests for the payment widget and applies its results.
///
/// The widget itself (and the card handling behind it) is external; this
/// service only prepares the order and interprets the outcome.
pub struct PaymentService {
    pricing_service: PricingService,
}

impl PaymentService {
    pub fn new() -> Self {
        Self {
            pricing_service: PricingService::new(),
        }
    }

    /// Prepare an order for `plan` priced in `currency`.
    ///
    /// Free plans (or prices that round to zero minor units) cannot be checked out.
    pub fn create_order(
        &self,
        plan: &Plan,
        currency: &str,
        user: Option<&User>,
    ) -> Result<PaymentOrder, CoreError> {
        if plan.is_free() {
            return Err(CoreError::ValidationError(format!(
                "Plan '{}' is free and needs no payment",
                plan.name
            )));
        }

        let price = self.pricing_service.price_in(plan, currency);
        let amount_minor = self.pricing_service.to_minor_units(price);
        if amount_minor <= 0 {
            return Err(CoreError::ValidationError(format!(
                "Price of '{}' in {currency} rounds to zero",
                plan.name
            )));
        }

        let prefill = user
            .map(|u| PaymentPrefill {
                name: u.name.clone(),
                email: u.email.clone(),
            })
            .unwrap_or_default();

        Ok(PaymentOrder {
            plan_id: plan.id,
            amount_minor,
            currency: currency.trim().to_uppercase(),
            name: MERCHANT_NAME.to_string(),
            description: format!("Subscription for {}", plan.name),
            prefill,
        })
    }

    /// Apply the widget's result to the session user.
    ///
    /// Success switches the user to the ordered plan and returns it;
    /// dismissal changes nothing and returns `None`; failure returns the
    /// gateway's own description as `PaymentFailed`.
    pub fn apply_outcome(
        &self,
        order: &PaymentOrder,
        outcome: PaymentOutcome,
        user: &mut User,
    ) -> Result<Option<PlanId>, CoreError> {
        match outcome {
            PaymentOutcome::Succeeded { payment_id } => {
                info!(payment_id, plan = %order.plan_id, user = %user.id, "Payment succeeded");
                user.plan = order.plan_id;
                Ok(Some(order.plan_id))
            }
            PaymentOutcome::Failed { description } => {
                warn!(plan = %order.plan_id, %description, "Payment failed");
                Err(CoreError::PaymentFailed(description))
            }
            PaymentOutcome::Dismissed => Ok(None),
        }
    }
}

impl Default for PaymentService {
    fn default() -> Self {
        Self::new()
    }
}
