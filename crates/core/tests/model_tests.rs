use chrono::{NaiveDate, TimeZone, Utc};
use finsight_core::errors::CoreError;
use finsight_core::models::chart::{DailyBalance, DashboardData};
use finsight_core::models::currency::{self, CURRENCIES};
use finsight_core::models::payment::PaymentOutcome;
use finsight_core::models::plan::{self, BillingPeriod, PlanId};
use finsight_core::models::settings::{Settings, Theme, View, GEMINI_API_KEY_ENV, GEMINI_KEY};
use finsight_core::models::transaction::{
    Category, NewTransaction, Transaction, TransactionForm, TransactionType,
};
use finsight_core::models::user::User;
use std::collections::HashSet;
use std::str::FromStr;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  TransactionType
// ═══════════════════════════════════════════════════════════════════

mod transaction_type {
    use super::*;

    #[test]
    fn display_is_lowercase() {
        assert_eq!(TransactionType::Income.to_string(), "income");
        assert_eq!(TransactionType::Expense.to_string(), "expense");
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(TransactionType::from_str("INCOME").unwrap(), TransactionType::Income);
        assert_eq!(TransactionType::from_str(" expense ").unwrap(), TransactionType::Expense);
    }

    #[test]
    fn parse_unknown_is_validation_error() {
        let err = TransactionType::from_str("transfer").unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }

    #[test]
    fn serializes_as_lowercase_string() {
        assert_eq!(serde_json::to_string(&TransactionType::Income).unwrap(), "\"income\"");
        let back: TransactionType = serde_json::from_str("\"expense\"").unwrap();
        assert_eq!(back, TransactionType::Expense);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Category
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn all_has_ten_distinct_categories() {
        let set: HashSet<Category> = Category::ALL.into_iter().collect();
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn display_matches_serialized_name() {
        for c in Category::ALL {
            let json = serde_json::to_string(&c).unwrap();
            assert_eq!(json, format!("\"{c}\""));
        }
    }

    #[test]
    fn parse_round_trips_display() {
        for c in Category::ALL {
            assert_eq!(Category::from_str(c.as_str()).unwrap(), c);
        }
        assert_eq!(Category::from_str("groceries").unwrap(), Category::Groceries);
    }

    #[test]
    fn parse_unknown_fails() {
        assert!(Category::from_str("Travel").is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction / NewTransaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    fn sample() -> Transaction {
        Transaction::new(
            "abc",
            Utc.with_ymd_and_hms(2025, 1, 15, 23, 30, 0).unwrap(),
            42.5,
            TransactionType::Expense,
            Category::Groceries,
            "Weekly shop",
        )
    }

    #[test]
    fn day_uses_utc_calendar_date() {
        assert_eq!(sample().day(), d(2025, 1, 15));
    }

    #[test]
    fn signed_amount_follows_type() {
        let mut tx = sample();
        assert_eq!(tx.signed_amount(), -42.5);
        tx.tx_type = TransactionType::Income;
        assert_eq!(tx.signed_amount(), 42.5);
        assert!(tx.is_income());
        assert!(!tx.is_expense());
    }

    #[test]
    fn persisted_shape_uses_type_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Groceries");
        assert_eq!(json["amount"], 42.5);
        assert_eq!(json["description"], "Weekly shop");
        assert!(json.get("tx_type").is_none());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let json = r#"{"id":"x","date":"2025-01-15T10:00:00Z","amount":5.0,"type":"income","category":"Salary"}"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.description, "");
        assert_eq!(tx.tx_type, TransactionType::Income);
    }

    #[test]
    fn new_transaction_with_id_keeps_fields() {
        let new_tx = NewTransaction {
            date: Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap(),
            amount: 10.0,
            tx_type: TransactionType::Income,
            category: Category::Freelance,
            description: "Gig".into(),
        };
        let tx = new_tx.clone().with_id("id-1");
        assert_eq!(tx.id, "id-1");
        assert_eq!(tx.date, new_tx.date);
        assert_eq!(tx.amount, 10.0);
        assert_eq!(tx.category, Category::Freelance);
        assert_eq!(tx.description, "Gig");
    }

    #[test]
    fn form_defaults_to_expense_other() {
        let form = TransactionForm::default();
        assert_eq!(form.tx_type, TransactionType::Expense);
        assert_eq!(form.category, Category::Other);
        assert!(form.amount.is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Currency table
// ═══════════════════════════════════════════════════════════════════

mod currency_table {
    use super::*;

    #[test]
    fn has_forty_unique_codes() {
        let codes: HashSet<&str> = CURRENCIES.iter().map(|c| c.code).collect();
        assert_eq!(CURRENCIES.len(), 40);
        assert_eq!(codes.len(), 40);
    }

    #[test]
    fn pivot_has_rate_one() {
        assert_eq!(currency::rate_to_pivot(currency::PIVOT_CURRENCY), Some(1.0));
    }

    #[test]
    fn all_rates_positive() {
        assert!(CURRENCIES.iter().all(|c| c.rate_to_pivot > 0.0));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let inr = currency::find_currency("inr").unwrap();
        assert_eq!(inr.code, "INR");
        assert_eq!(inr.symbol, "₹");
        assert_eq!(inr.rate_to_pivot, 83.5);
    }

    #[test]
    fn unknown_code() {
        assert!(currency::find_currency("XYZ").is_none());
        assert!(!currency::is_supported("XYZ"));
        assert_eq!(currency::rate_to_pivot("XYZ"), None);
    }

    #[test]
    fn symbol_falls_back_to_dollar() {
        assert_eq!(currency::symbol_for("EUR"), "€");
        assert_eq!(currency::symbol_for("XYZ"), "$");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Plans
// ═══════════════════════════════════════════════════════════════════

mod plans {
    use super::*;

    #[test]
    fn catalog_has_three_plans_in_order() {
        let ids: Vec<PlanId> = plan::catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlanId::Free, PlanId::ProMonthly, PlanId::ProYearly]);
    }

    #[test]
    fn only_yearly_is_recommended() {
        let recommended: Vec<PlanId> = plan::catalog()
            .iter()
            .filter(|p| p.recommended)
            .map(|p| p.id)
            .collect();
        assert_eq!(recommended, vec![PlanId::ProYearly]);
    }

    #[test]
    fn base_prices_in_reference_currency() {
        assert_eq!(plan::REFERENCE_CURRENCY, "INR");
        assert_eq!(plan::find_plan(PlanId::Free).unwrap().base_price, 0.0);
        assert_eq!(plan::find_plan(PlanId::ProMonthly).unwrap().base_price, 99.0);
        assert_eq!(plan::find_plan(PlanId::ProYearly).unwrap().base_price, 999.0);
    }

    #[test]
    fn periods() {
        let yearly = plan::find_plan(PlanId::ProYearly).unwrap();
        assert_eq!(yearly.period, BillingPeriod::Yearly);
        assert_eq!(yearly.period.suffix(), "/yr");
        assert_eq!(BillingPeriod::Monthly.suffix(), "/mo");
        assert_eq!(BillingPeriod::Monthly.label(), "Monthly");
    }

    #[test]
    fn plan_id_string_forms() {
        assert_eq!(PlanId::ProMonthly.to_string(), "pro_monthly");
        assert_eq!(PlanId::from_str("pro_yearly").unwrap(), PlanId::ProYearly);
        assert!(PlanId::from_str("enterprise").is_err());
        assert_eq!(serde_json::to_string(&PlanId::Free).unwrap(), "\"free\"");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.currency, "USD");
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.view, View::Dashboard);
        assert_eq!(s.chart_window_days, 60);
        assert!(s.api_keys.is_empty());
        assert!(s.validate().is_ok());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let s = Settings::from_json(r#"{"currency":"eur","theme":"light"}"#).unwrap();
        assert_eq!(s.currency, "EUR");
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.view, View::Dashboard);
        assert_eq!(s.chart_window_days, 60);
    }

    #[test]
    fn normalize_rewrites_currency_to_table_code() {
        let mut s = Settings {
            currency: "  jpy ".into(),
            ..Settings::default()
        };
        s.normalize().unwrap();
        assert_eq!(s.currency, "JPY");
    }

    #[test]
    fn normalize_rejects_unknown_currency_unchanged() {
        let mut s = Settings {
            currency: "abc".into(),
            ..Settings::default()
        };
        assert!(matches!(s.normalize(), Err(CoreError::InvalidConfig(_))));
        assert_eq!(s.currency, "abc");
    }

    #[test]
    fn from_json_rejects_unknown_currency() {
        let err = Settings::from_json(r#"{"currency":"XYZ"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn from_json_rejects_unknown_theme() {
        let err = Settings::from_json(r#"{"theme":"sepia"}"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn validate_rejects_zero_window() {
        let s = Settings {
            chart_window_days: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn json_round_trip() {
        let mut s = Settings::default();
        s.view = View::Subscription;
        s.api_keys.insert(GEMINI_KEY.into(), "k".into());
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"currency":"INR","chart_window_days":30}"#).unwrap();

        let s = Settings::load_from_path(&path).unwrap();
        assert_eq!(s.currency, "INR");
        assert_eq!(s.chart_window_days, 30);
    }

    #[test]
    fn load_from_missing_path_is_file_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_from_path(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CoreError::FileIO(_)));
    }

    #[test]
    fn apply_env_fills_missing_key() {
        let mut s = Settings::default();
        s.apply_env_with(|k| (k == GEMINI_API_KEY_ENV).then(|| "from-env".to_string()));
        assert_eq!(s.api_key(GEMINI_KEY), Some("from-env"));
    }

    #[test]
    fn apply_env_keeps_configured_key() {
        let mut s = Settings::default();
        s.api_keys.insert(GEMINI_KEY.into(), "configured".into());
        s.apply_env_with(|_| Some("from-env".to_string()));
        assert_eq!(s.api_key(GEMINI_KEY), Some("configured"));
    }

    #[test]
    fn apply_env_ignores_blank_value() {
        let mut s = Settings::default();
        s.apply_env_with(|_| Some("   ".to_string()));
        assert_eq!(s.api_key(GEMINI_KEY), None);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  DashboardData / User / PaymentOutcome
// ═══════════════════════════════════════════════════════════════════

mod misc {
    use super::*;

    fn day(n: u32) -> DailyBalance {
        DailyBalance {
            date: d(2025, 1, n),
            label: format!("01-{n:02}"),
            balance: 0.0,
            income: 0.0,
            expense: 0.0,
        }
    }

    #[test]
    fn recent_days_takes_tail() {
        let data = DashboardData {
            daily: (1..=20).map(day).collect(),
            ..DashboardData::default()
        };
        let recent = data.recent_days(14);
        assert_eq!(recent.len(), 14);
        assert_eq!(recent[0].date, d(2025, 1, 7));
        assert_eq!(recent[13].date, d(2025, 1, 20));
    }

    #[test]
    fn recent_days_shorter_than_request() {
        let data = DashboardData {
            daily: (1..=3).map(day).collect(),
            ..DashboardData::default()
        };
        assert_eq!(data.recent_days(14).len(), 3);
    }

    #[test]
    fn new_user_is_on_free_plan() {
        let user = User::new("u1", "Ada", "ada@example.com", Utc::now());
        assert_eq!(user.plan, PlanId::Free);
        assert!(!user.is_pro());
        assert!(user.picture.is_none());
    }

    #[test]
    fn payment_outcome_is_tagged_by_status() {
        let json = serde_json::to_value(PaymentOutcome::Failed {
            description: "Card declined".into(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["description"], "Card declined");

        let back: PaymentOutcome = serde_json::from_str(r#"{"status":"dismissed"}"#).unwrap();
        assert_eq!(back, PaymentOutcome::Dismissed);
    }
}
