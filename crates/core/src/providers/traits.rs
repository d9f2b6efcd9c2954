use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};

use super::subscription::Subscription;

/// Callback invoked with the owner's full, ordered transaction list
/// every time the backing store changes.
pub type SnapshotCallback = Box<dyn Fn(Vec<Transaction>) + Send + Sync>;

/// Contract of the external document store holding each user's transactions.
///
/// Updates are push-based: `subscribe` delivers the current snapshot and
/// then a fresh one after every change, until the returned
/// [`Subscription`] is dropped or unsubscribed.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionStore: Send + Sync {
    /// Human-readable name of this store (for logs/errors).
    fn name(&self) -> &str;

    /// Start receiving snapshots of `owner`'s collection.
    fn subscribe(&self, owner: &str, on_snapshot: SnapshotCallback) -> Result<Subscription, CoreError>;

    /// Persist a new transaction. Returns the store-assigned id.
    /// Fails with `Unauthenticated` when `owner` is empty.
    async fn add(&self, owner: &str, transaction: NewTransaction) -> Result<String, CoreError>;

    /// Delete a transaction. Fails with `TransactionNotFound` when `id`
    /// is not in `owner`'s collection.
    async fn remove(&self, owner: &str, id: &str) -> Result<(), CoreError>;
}

/// A generative text endpoint used for spending commentary.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InsightsProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Send `prompt` and return the generated text (may be empty).
    async fn generate(&self, prompt: &str) -> Result<String, CoreError>;
}
