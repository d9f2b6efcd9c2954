use crate::models::currency;
use crate::models::plan::{self, LocalizedPlan, Plan, REFERENCE_CURRENCY};

/// Converts amounts between currencies of the static currency table and
/// localizes subscription prices.
///
/// Every rate is relative to USD, so a conversion is two hops:
/// from the source to USD, then from USD to the target. Unknown codes use a rate of 1 instead of failing.
pub struct PricingService;

impl PricingService {
    pub fn new() -> Self {
        Self
    }

    /// Convert `amount` from `from_currency` to `to_currency`.
    /// For example 99 INR converts to about 1.1856 USD (99 / 83.5).
    pub fn convert(&self, amount: f64, from_currency: &str, to_currency: &str) -> f64 {
        let from = from_currency.trim().to_uppercase();
        let to = to_currency.trim().to_uppercase();

        if from == to {
            return amount;
        }

        // Step 1: source to pivot
        let in_pivot = amount / currency::rate_to_pivot(&from).unwrap_or(1.0);

        // Step 2: pivot to target
        in_pivot * currency::rate_to_pivot(&to).unwrap_or(1.0)
    }

    /// Price of `plan` in `currency_code`. Free plans are 0 in every currency.
    pub fn price_in(&self, plan: &Plan, currency_code: &str) -> f64 {
        if plan.is_free() {
            return 0.0;
        }
        self.convert(plan.base_price, REFERENCE_CURRENCY, currency_code)
    }

    /// The whole catalog priced in `currency_code`.
    pub fn localized_plans(&self, currency_code: &str) -> Vec<LocalizedPlan> {
        let code = currency_code.trim().to_uppercase();
        plan::catalog()
            .into_iter()
            .map(|plan| {
                let price = self.price_in(&plan, &code);
                LocalizedPlan {
                    plan,
                    currency: code.clone(),
                    price,
                }
            })
            .collect()
    }

    /// Price in the currency's smallest unit, as the payment widget expects.
    pub fn to_minor_units(&self, price: f64) -> i64 {
        (price * 100.0).round() as i64
    }
}

impl Default for PricingService {
    fn default() -> Self {
        Self::new()
    }
}
