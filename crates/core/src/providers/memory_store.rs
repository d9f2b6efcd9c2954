use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::transaction::{NewTransaction, Transaction};
use crate::services::transaction_service::TransactionService;

use super::subscription::Subscription;
use super::traits::{SnapshotCallback, TransactionStore};

struct Subscriber {
    id: u64,
    owner: String,
    callback: Arc<SnapshotCallback>,
}

#[derive(Default)]
struct Inner {
    /// Transactions per owner, newest first
    collections: Mutex<HashMap<String, Vec<Transaction>>>,
    subscribers: Mutex<Vec<Subscriber>>,
    next_subscriber: AtomicU64,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local [`TransactionStore`] with the same push semantics as the
/// hosted document store: every subscriber of an owner receives the full
/// snapshot on subscribe and after each write.
///
/// Used for tests, demos and offline sessions.
#[derive(Clone, Default)]
pub struct InMemoryTransactionStore {
    inner: Arc<Inner>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace `owner`'s collection wholesale and notify subscribers.
    pub fn load(&self, owner: &str, mut transactions: Vec<Transaction>) {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        lock(&self.inner.collections).insert(owner.to_string(), transactions);
        self.notify(owner);
    }

    /// Current snapshot of `owner`'s collection, newest first.
    pub fn snapshot(&self, owner: &str) -> Vec<Transaction> {
        lock(&self.inner.collections)
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }

    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner.subscribers).len()
    }

    fn notify(&self, owner: &str) {
        let snapshot = self.snapshot(owner);
        // Collect first so callbacks run without holding the lock.
        let callbacks: Vec<Arc<SnapshotCallback>> = lock(&self.inner.subscribers)
            .iter()
            .filter(|s| s.owner == owner)
            .map(|s| Arc::clone(&s.callback))
            .collect();

        debug!(owner, rows = snapshot.len(), subscribers = callbacks.len(), "Pushing snapshot");
        for callback in callbacks {
            callback(snapshot.clone());
        }
    }
}

impl std::fmt::Debug for InMemoryTransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTransactionStore")
            .field("owners", &lock(&self.inner.collections).len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for InMemoryTransactionStore {
    fn name(&self) -> &str {
        "InMemory"
    }

    fn subscribe(&self, owner: &str, on_snapshot: SnapshotCallback) -> Result<Subscription, CoreError> {
        if owner.is_empty() {
            return Err(CoreError::Unauthenticated);
        }

        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        let callback = Arc::new(on_snapshot);
        lock(&self.inner.subscribers).push(Subscriber {
            id,
            owner: owner.to_string(),
            callback: Arc::clone(&callback),
        });

        // Initial delivery, like a document-store listener.
        callback(self.snapshot(owner));

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner.subscribers).retain(|s| s.id != id);
            }
        }))
    }

    async fn add(&self, owner: &str, transaction: NewTransaction) -> Result<String, CoreError> {
        if owner.is_empty() {
            return Err(CoreError::Unauthenticated);
        }
        TransactionService::new().validate_transaction(&transaction)?;

        let id = Uuid::new_v4().to_string();
        {
            let mut collections = lock(&self.inner.collections);
            let list = collections.entry(owner.to_string()).or_default();
            // Newest first: insert before the first entry that is older.
            let pos = list
                .iter()
                .position(|t| t.date < transaction.date)
                .unwrap_or(list.len());
            list.insert(pos, transaction.with_id(id.clone()));
        }

        self.notify(owner);
        Ok(id)
    }

    async fn remove(&self, owner: &str, id: &str) -> Result<(), CoreError> {
        if owner.is_empty() {
            return Err(CoreError::Unauthenticated);
        }

        {
            let mut collections = lock(&self.inner.collections);
            let list = collections
                .get_mut(owner)
                .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
            let idx = list
                .iter()
                .position(|t| t.id == id)
                .ok_or_else(|| CoreError::TransactionNotFound(id.to_string()))?;
            list.remove(idx);
        }

        self.notify(owner);
        Ok(())
    }
}
