// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use finsight_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("Amount is required".into());
        assert_eq!(err.to_string(), "Validation failed: Amount is required");
    }

    #[test]
    fn invalid_config() {
        let err = CoreError::InvalidConfig("bad window".into());
        assert_eq!(err.to_string(), "Invalid configuration: bad window");
    }

    #[test]
    fn unauthenticated() {
        assert_eq!(CoreError::Unauthenticated.to_string(), "Not signed in");
    }

    #[test]
    fn transaction_not_found() {
        let err = CoreError::TransactionNotFound("abc-123".into());
        assert_eq!(err.to_string(), "Transaction not found: abc-123");
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "Gemini".into(),
            message: "quota exceeded".into(),
        };
        assert_eq!(err.to_string(), "API error (Gemini): quota exceeded");
    }

    #[test]
    fn network_error() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn no_provider() {
        let err = CoreError::NoProvider("insights".into());
        assert_eq!(err.to_string(), "No provider configured for: insights");
    }

    #[test]
    fn in_progress_variants() {
        assert_eq!(
            CoreError::InsightsInProgress.to_string(),
            "An insights request is already in progress"
        );
        assert_eq!(
            CoreError::CheckoutInProgress.to_string(),
            "A checkout is already in progress"
        );
    }

    #[test]
    fn payment_failed() {
        let err = CoreError::PaymentFailed("Card declined".into());
        assert_eq!(err.to_string(), "Payment failed: Card declined");
    }

    #[test]
    fn serialization_variants() {
        assert_eq!(
            CoreError::Serialization("x".into()).to_string(),
            "Serialization error: x"
        );
        assert_eq!(
            CoreError::Deserialization("y".into()).to_string(),
            "Deserialization error: y"
        );
    }

    #[test]
    fn file_io() {
        let err = CoreError::FileIO("disk full".into());
        assert_eq!(err.to_string(), "File I/O error: disk full");
    }

    #[test]
    fn random_source() {
        let err = CoreError::RandomSource("no entropy".into());
        assert_eq!(err.to_string(), "Random source unavailable: no entropy");
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::FileIO(ref m) if m.contains("missing.csv")));
    }

    #[test]
    fn from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = parse_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_io() {
        fn read() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read(), Err(CoreError::FileIO(_))));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<CoreError>();
    }
}
