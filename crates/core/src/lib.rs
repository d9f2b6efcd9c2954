pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use chrono::{DateTime, NaiveDate, Utc};
use models::{
    chart::DashboardData,
    currency,
    payment::{PaymentOrder, PaymentOutcome},
    plan::{self, LocalizedPlan, PlanId},
    settings::{Settings, Theme, View, MAX_CHART_WINDOW_DAYS},
    transaction::{Category, Transaction, TransactionForm, TransactionType},
    user::User,
};
use providers::{
    registry::InsightsProviderRegistry, subscription::Subscription, traits::TransactionStore,
};
use services::{
    aggregation_service::AggregationService,
    demo_service::DemoDataService,
    export_service::{CsvExport, ExportService},
    insights_service::InsightsService,
    payment_service::PaymentService,
    pricing_service::PricingService,
    transaction_service::{TransactionService, TransactionSortOrder},
};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

use errors::CoreError;

/// Source of "now"; swapped out in tests.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Main entry point for the FinSight core library.
///
/// Holds the explicit application state the presentation layer renders:
/// settings, the session user, the latest store snapshot and every view
/// derived from it. Derived views are recomputed in full whenever a new
/// snapshot is applied.
#[must_use]
pub struct FinSight {
    settings: Settings,
    user: Option<User>,
    store: Arc<dyn TransactionStore>,
    subscription: Option<Subscription>,
    snapshot_rx: Option<watch::Receiver<Vec<Transaction>>>,
    transactions: Vec<Transaction>,
    dashboard: DashboardData,
    insights: String,
    pending_checkout: Option<PaymentOrder>,
    clock: Clock,
    aggregation_service: AggregationService,
    pricing_service: PricingService,
    transaction_service: TransactionService,
    export_service: ExportService,
    insights_service: InsightsService,
    payment_service: PaymentService,
    demo_service: DemoDataService,
}

impl std::fmt::Debug for FinSight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinSight")
            .field("settings", &self.settings)
            .field("user", &self.user.as_ref().map(|u| &u.id))
            .field("store", &self.store.name())
            .field("subscribed", &self.subscription.is_some())
            .field("transactions", &self.transactions.len())
            .field("pending_checkout", &self.pending_checkout.is_some())
            .finish()
    }
}

impl FinSight {
    /// Create a signed-out session backed by `store`.
    /// Settings are validated and normalized here, so a bad currency never reaches the views.
    pub fn new(mut settings: Settings, store: Arc<dyn TransactionStore>) -> Result<Self, CoreError> {
        settings.normalize()?;
        let clock: Clock = Arc::new(Utc::now);
        Ok(Self::build(settings, store, clock))
    }

    /// Replace the clock used for "today" and submission timestamps.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.recompute();
        self
    }

    // ── Session ─────────────────────────────────────────────────────

    /// Sign `user` in and start listening to their transactions.
    pub fn login(&mut self, user: User) -> Result<(), CoreError> {
        self.logout();

        let (tx, rx) = watch::channel(Vec::new());
        let subscription = self.store.subscribe(
            &user.id,
            Box::new(move |snapshot| {
                // Only the newest snapshot matters; a closed receiver is fine.
                let _ = tx.send(snapshot);
            }),
        )?;

        info!(user = %user.id, store = self.store.name(), "Signed in");
        self.user = Some(user);
        self.subscription = Some(subscription);
        self.snapshot_rx = Some(rx);
        self.sync();
        Ok(())
    }

    /// Sign out: tear down the store feed and clear all session state.
    pub fn logout(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        self.snapshot_rx = None;
        if let Some(user) = self.user.take() {
            info!(user = %user.id, "Signed out");
        }
        self.settings.view = View::Dashboard;
        self.insights.clear();
        self.pending_checkout = None;
        self.apply_snapshot(Vec::new());
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    // ── Snapshots & Derived Views ───────────────────────────────────

    /// Apply the most recent pushed snapshot, if a new one arrived.
    /// Intermediate snapshots are skipped. Returns whether anything changed.
    pub fn sync(&mut self) -> bool {
        let Some(rx) = self.snapshot_rx.as_mut() else {
            return false;
        };
        if !rx.has_changed().unwrap_or(false) {
            return false;
        }
        let snapshot = rx.borrow_and_update().clone();
        self.apply_snapshot(snapshot);
        true
    }

    /// Wait until the store pushes a new snapshot, then apply it.
    pub async fn wait_for_snapshot(&mut self) -> Result<(), CoreError> {
        let rx = self.snapshot_rx.as_mut().ok_or(CoreError::Unauthenticated)?;
        rx.changed()
            .await
            .map_err(|_| CoreError::Network("Snapshot feed closed".into()))?;
        // `changed` already marked the value as seen, so `sync` would skip it.
        let snapshot = rx.borrow_and_update().clone();
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// Replace the local snapshot and recompute every derived view.
    pub fn apply_snapshot(&mut self, transactions: Vec<Transaction>) {
        debug!(rows = transactions.len(), "Applying snapshot");
        self.transactions = transactions;
        self.recompute();
    }

    #[must_use]
    pub fn dashboard(&self) -> &DashboardData {
        &self.dashboard
    }

    /// Current snapshot, in store order (newest first).
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    #[must_use]
    pub fn transactions_by_type(&self, tx_type: TransactionType) -> Vec<&Transaction> {
        self.transaction_service.by_type(&self.transactions, tx_type)
    }

    #[must_use]
    pub fn transactions_by_category(&self, category: Category) -> Vec<&Transaction> {
        self.transaction_service.by_category(&self.transactions, category)
    }

    #[must_use]
    pub fn transactions_in_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<&Transaction> {
        self.transaction_service.in_range(&self.transactions, from, to)
    }

    #[must_use]
    pub fn search_transactions(&self, query: &str) -> Vec<&Transaction> {
        self.transaction_service.search(&self.transactions, query)
    }

    #[must_use]
    pub fn transactions_sorted(&self, order: TransactionSortOrder) -> Vec<&Transaction> {
        self.transaction_service.sorted(&self.transactions, order)
    }

    // ── Transaction Management ──────────────────────────────────────

    /// Validate the entry form and submit it to the store.
    /// Returns the store-assigned id; the new snapshot is applied before returning.
    pub async fn add_transaction(&mut self, form: &TransactionForm) -> Result<String, CoreError> {
        let owner = self.current_user_id()?;
        let new_tx = self.transaction_service.validate_form(form, (self.clock)())?;

        let store = Arc::clone(&self.store);
        let id = store.add(&owner, new_tx).await?;
        debug!(id, "Transaction added");
        self.sync();
        Ok(id)
    }

    /// Delete one of the current user's transactions.
    pub async fn remove_transaction(&mut self, id: &str) -> Result<(), CoreError> {
        let owner = self.current_user_id()?;

        let store = Arc::clone(&self.store);
        store.remove(&owner, id).await?;
        debug!(id, "Transaction removed");
        self.sync();
        Ok(())
    }

    /// Replace the local snapshot with generated demo history.
    /// Nothing is written to the store.
    pub fn load_demo_data(&mut self, days: u32) -> Result<usize, CoreError> {
        let transactions = self.demo_service.generate(days, (self.clock)())?;
        let count = transactions.len();
        info!(days, count, "Loaded demo data");
        self.apply_snapshot(transactions);
        Ok(count)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Set the display currency. Must be one of the supported codes.
    pub fn set_currency(&mut self, code: &str) -> Result<(), CoreError> {
        let info = currency::find_currency(code).ok_or_else(|| {
            CoreError::ValidationError(format!("Unsupported currency '{}'", code.trim()))
        })?;
        self.settings.currency = info.code.to_string();
        Ok(())
    }

    #[must_use]
    pub fn currency_symbol(&self) -> &'static str {
        currency::symbol_for(&self.settings.currency)
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.settings.theme = match self.settings.theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        };
        self.settings.theme
    }

    pub fn set_view(&mut self, view: View) {
        self.settings.view = view;
    }

    /// Change the daily-series window and recompute.
    pub fn set_chart_window(&mut self, days: u32) -> Result<(), CoreError> {
        if days == 0 || days > MAX_CHART_WINDOW_DAYS {
            return Err(CoreError::ValidationError(format!(
                "Chart window of {days} days must be between 1 and {MAX_CHART_WINDOW_DAYS}"
            )));
        }
        self.settings.chart_window_days = days;
        self.aggregation_service = AggregationService::with_window(days);
        self.recompute();
        Ok(())
    }

    /// Set an API key for a provider (e.g., "gemini").
    /// Rebuilds the provider registry so the new key takes effect immediately.
    pub fn set_api_key(&mut self, provider: String, key: String) {
        self.settings.api_keys.insert(provider, key);
        self.rebuild_insights();
    }

    /// Remove an API key. Returns whether one was present.
    pub fn remove_api_key(&mut self, provider: &str) -> bool {
        let removed = self.settings.api_keys.remove(provider).is_some();
        if removed {
            self.rebuild_insights();
        }
        removed
    }

    // ── Pricing ─────────────────────────────────────────────────────

    /// Every plan priced in the display currency.
    #[must_use]
    pub fn localized_plans(&self) -> Vec<LocalizedPlan> {
        self.pricing_service.localized_plans(&self.settings.currency)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Render the current snapshot as CSV in the display currency.
    pub fn export_csv(&self) -> Result<CsvExport, CoreError> {
        if self.transactions.is_empty() {
            return Err(CoreError::ValidationError("No transactions to export".into()));
        }
        Ok(self.export_service.export(
            &self.transactions,
            &self.settings.currency,
            self.today(),
        ))
    }

    // ── AI Insights ─────────────────────────────────────────────────

    /// Ask the configured provider for commentary on the current snapshot.
    /// On failure the previous text is kept.
    pub async fn refresh_insights(&mut self) -> Result<&str, CoreError> {
        let text = self.insights_service.generate(&self.transactions).await?;
        self.insights = text;
        Ok(&self.insights)
    }

    #[must_use]
    pub fn insights(&self) -> &str {
        &self.insights
    }

    #[must_use]
    pub fn is_loading_insights(&self) -> bool {
        self.insights_service.is_loading()
    }

    #[must_use]
    pub fn insights_available(&self) -> bool {
        self.insights_service.has_provider()
    }

    // ── Subscription Checkout ───────────────────────────────────────

    /// Prepare a checkout for `plan_id` in the display currency.
    /// Only one checkout may be open at a time.
    pub fn begin_checkout(&mut self, plan_id: PlanId) -> Result<PaymentOrder, CoreError> {
        let user = self.user.as_ref().ok_or(CoreError::Unauthenticated)?;
        if self.pending_checkout.is_some() {
            return Err(CoreError::CheckoutInProgress);
        }
        let plan = plan::find_plan(plan_id)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown plan '{plan_id}'")))?;

        let order = self
            .payment_service
            .create_order(&plan, &self.settings.currency, Some(user))?;
        info!(plan = %plan_id, amount_minor = order.amount_minor, currency = %order.currency, "Checkout opened");
        self.pending_checkout = Some(order.clone());
        Ok(order)
    }

    /// Apply the widget's outcome to the open checkout.
    /// The checkout is closed whatever the outcome.
    pub fn complete_checkout(&mut self, outcome: PaymentOutcome) -> Result<Option<PlanId>, CoreError> {
        let order = self
            .pending_checkout
            .take()
            .ok_or_else(|| CoreError::ValidationError("No checkout in progress".into()))?;
        let user = self.user.as_mut().ok_or(CoreError::Unauthenticated)?;
        self.payment_service.apply_outcome(&order, outcome, user)
    }

    #[must_use]
    pub fn pending_checkout(&self) -> Option<&PaymentOrder> {
        self.pending_checkout.as_ref()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn today(&self) -> NaiveDate {
        (self.clock)().date_naive()
    }

    fn current_user_id(&self) -> Result<String, CoreError> {
        self.user
            .as_ref()
            .map(|u| u.id.clone())
            .ok_or(CoreError::Unauthenticated)
    }

    fn recompute(&mut self) {
        self.dashboard = self
            .aggregation_service
            .build_dashboard(&self.transactions, self.today());
    }

    fn rebuild_insights(&mut self) {
        let registry = InsightsProviderRegistry::new_with_defaults(&self.settings.api_keys);
        self.insights_service = InsightsService::new(registry);
    }

    fn build(settings: Settings, store: Arc<dyn TransactionStore>, clock: Clock) -> Self {
        let registry = InsightsProviderRegistry::new_with_defaults(&settings.api_keys);
        let aggregation_service = AggregationService::with_window(settings.chart_window_days);

        let mut app = Self {
            settings,
            user: None,
            store,
            subscription: None,
            snapshot_rx: None,
            transactions: Vec::new(),
            dashboard: DashboardData::default(),
            insights: String::new(),
            pending_checkout: None,
            clock,
            aggregation_service,
            pricing_service: PricingService::new(),
            transaction_service: TransactionService::new(),
            export_service: ExportService::new(),
            insights_service: InsightsService::new(registry),
            payment_service: PaymentService::new(),
            demo_service: DemoDataService::new(),
        };
        app.recompute();
        app
    }
}
