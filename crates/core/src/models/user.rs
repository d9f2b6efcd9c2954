use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::plan::PlanId;

/// The signed-in identity, as reported by the external identity provider.
///
/// The core reads it; the only field it ever changes is `plan`, after a
/// successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub plan: PlanId,
    pub member_since: DateTime<Utc>,
    #[serde(default)]
    pub picture: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        member_since: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            plan: PlanId::Free,
            member_since,
            picture: None,
        }
    }

    pub fn is_pro(&self) -> bool {
        self.plan != PlanId::Free
    }
}
