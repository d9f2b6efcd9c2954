use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::transaction::{Category, Transaction, TransactionType};
use crate::providers::registry::InsightsProviderRegistry;

/// Only this many transactions (from the front of the snapshot) go into a prompt.
pub const MAX_PROMPT_TRANSACTIONS: usize = 50;

pub const NO_TRANSACTIONS_MESSAGE: &str =
    "<li>Please add some transactions first so I can analyze your spending habits!</li>";

pub const NO_INSIGHTS_MESSAGE: &str = "<li>No insights available at the moment.</li>";

/// Compact per-transaction record sent to the model.
#[derive(Serialize)]
struct PromptRow {
    date: String,
    #[serde(rename = "type")]
    tx_type: TransactionType,
    amount: f64,
    category: Category,
}

/// Clears the in-flight flag when the request finishes, however it finishes.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CoreError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::InsightsInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Requests witty spending commentary from the configured text providers.
///
/// At most one request is in flight per service; a second concurrent call
/// fails with `InsightsInProgress` instead of queueing.
pub struct InsightsService {
    registry: InsightsProviderRegistry,
    in_flight: AtomicBool,
}

impl InsightsService {
    pub fn new(registry: InsightsProviderRegistry) -> Self {
        Self {
            registry,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub fn has_provider(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Build the model prompt from the first [`MAX_PROMPT_TRANSACTIONS`] transactions.
    pub fn build_prompt(&self, transactions: &[Transaction]) -> Result<String, CoreError> {
        let rows: Vec<PromptRow> = transactions
            .iter()
            .take(MAX_PROMPT_TRANSACTIONS)
            .map(|t| PromptRow {
                date: t.day().format("%Y-%m-%d").to_string(),
                tx_type: t.tx_type,
                amount: t.amount,
                category: t.category,
            })
            .collect();

        let data = serde_json::to_string(&rows)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize prompt data: {e}")))?;

        Ok(format!(
            "Analyze the following financial transaction history.\n\
             Provide 3 concise, actionable, and slightly witty financial insights or advice bullet points based on spending patterns.\n\
             Format the output as valid HTML list items (<li>) without the <ul> tags.\n\n\
             Data: {data}"
        ))
    }

    /// Generate insights for a snapshot.
    ///
    /// An empty snapshot short-circuits to [`NO_TRANSACTIONS_MESSAGE`] without
    /// a request. Providers are tried in registry order; the last error is
    /// returned if all fail.
    pub async fn generate(&self, transactions: &[Transaction]) -> Result<String, CoreError> {
        if transactions.is_empty() {
            return Ok(NO_TRANSACTIONS_MESSAGE.to_string());
        }

        let _guard = InFlightGuard::acquire(&self.in_flight)?;

        if self.registry.is_empty() {
            return Err(CoreError::NoProvider("insights".into()));
        }

        let prompt = self.build_prompt(transactions)?;
        let mut last_error = None;

        for provider in self.registry.providers() {
            debug!(provider = provider.name(), rows = transactions.len(), "Requesting insights");
            match provider.generate(&prompt).await {
                Ok(text) if text.trim().is_empty() => return Ok(NO_INSIGHTS_MESSAGE.to_string()),
                Ok(text) => return Ok(text),
                Err(e) => {
                    warn!(provider = provider.name(), error = %e, "Insights request failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider("insights".into())))
    }
}
