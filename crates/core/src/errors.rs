use thiserror::Error;

/// Unified error type for the entire finsight-core library.
/// Every fallible public function returns `Result<T, CoreError>`.
///
/// Aggregation and pricing never produce one of these; only validation,
/// session checks and the external collaborators (store, insights, payment)
/// can fail.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Session / Store ─────────────────────────────────────────────
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No provider configured for: {0}")]
    NoProvider(String),

    #[error("An insights request is already in progress")]
    InsightsInProgress,

    // ── Payment ─────────────────────────────────────────────────────
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    #[error("A checkout is already in progress")]
    CheckoutInProgress,

    // ── Serialization / File ────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Random source unavailable: {0}")]
    RandomSource(String),
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // The Gemini key travels in the query string; never let it reach a message.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
