use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Currency in which every plan's base price is fixed.
pub const REFERENCE_CURRENCY: &str = "INR";

/// Subscription tier identifier, as stored on the user session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    #[default]
    Free,
    ProMonthly,
    ProYearly,
}

impl PlanId {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::ProMonthly => "pro_monthly",
            PlanId::ProYearly => "pro_yearly",
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PlanId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "free" => Ok(PlanId::Free),
            "pro_monthly" => Ok(PlanId::ProMonthly),
            "pro_yearly" => Ok(PlanId::ProYearly),
            other => Err(CoreError::ValidationError(format!("Unknown plan '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Yearly,
}

impl BillingPeriod {
    /// Short suffix shown next to a price ("/mo", "/yr").
    pub fn suffix(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "/mo",
            BillingPeriod::Yearly => "/yr",
        }
    }

    /// Label used on the checkout summary ("Billed Monthly").
    pub fn label(&self) -> &'static str {
        match self {
            BillingPeriod::Monthly => "Monthly",
            BillingPeriod::Yearly => "Yearly",
        }
    }
}

/// A catalog entry. `base_price` is always in [`REFERENCE_CURRENCY`];
/// converted prices are computed per request and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub id: PlanId,
    pub name: &'static str,
    pub base_price: f64,
    pub period: BillingPeriod,
    pub features: &'static [&'static str],
    pub recommended: bool,
}

impl Plan {
    pub fn is_free(&self) -> bool {
        self.id == PlanId::Free
    }
}

/// A plan with its price expressed in a display currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalizedPlan {
    pub plan: Plan,
    pub currency: String,
    pub price: f64,
}

/// The static plan catalog.
pub fn catalog() -> Vec<Plan> {
    vec![
        Plan {
            id: PlanId::Free,
            name: "Starter",
            base_price: 0.0,
            period: BillingPeriod::Monthly,
            features: &[
                "Basic Income & Expense Tracking",
                "Last 30 Days History",
                "Standard Charts",
                "Community Support",
            ],
            recommended: false,
        },
        Plan {
            id: PlanId::ProMonthly,
            name: "Pro Monthly",
            base_price: 99.0,
            period: BillingPeriod::Monthly,
            features: &[
                "AI Financial Insights",
                "Unlimited History",
                "Export to CSV/PDF",
                "Multi-currency Support",
                "Priority Support",
            ],
            recommended: false,
        },
        Plan {
            id: PlanId::ProYearly,
            name: "Pro Yearly",
            base_price: 999.0,
            period: BillingPeriod::Yearly,
            features: &[
                "All Pro Features",
                "Save ~15%",
                "Early Access to Beta Features",
                "Dedicated Account Manager",
            ],
            recommended: true,
        },
    ]
}

pub fn find_plan(id: PlanId) -> Option<Plan> {
    catalog().into_iter().find(|p| p.id == id)
}
