//! Moves data between the API and the transaction store.
//!
//! `DataSync::hydrate` performs the one-time initial load of a session. The mutation methods follow
//! a single pattern: validate the form, send the request, and only when the server confirms, apply
//! the server's version of the record to the store. A failure at any step leaves the store as it
//! was.
//!
//! A `DataSync` belongs to one session. Once the store has been cleared for a sign-out or a new
//! sign-in, every call fails with `ErrorType::Session` and nothing more is committed.

use crate::api::{Api, Page};
use crate::error::{Error, ErrorType, IntoResult, Result};
use crate::model::{Transaction, TransactionForm, TransactionId, User};
use crate::store::TransactionStore;
use anyhow::Context;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Synchronizes the transaction store of one signed-in user with the API.
///
/// Cloning is cheap. A clone can be moved into a spawned task so that a confirmed mutation is still
/// committed after whoever started it has stopped waiting.
#[derive(Clone)]
pub struct DataSync {
    api: Arc<dyn Api>,
    store: Arc<Mutex<TransactionStore>>,
    user: User,
    page: Page,
    epoch: u64,
}

impl DataSync {
    /// `epoch` is the `TransactionStore::epoch` in which the session of `user` started.
    pub fn new(
        api: Arc<dyn Api>,
        store: Arc<Mutex<TransactionStore>>,
        user: User,
        page: Page,
        epoch: u64,
    ) -> Self {
        Self {
            api,
            store,
            user,
            page,
            epoch,
        }
    }

    pub fn user(&self) -> User {
        self.user
    }

    /// Loads the first page of transactions and the per-type totals into the store.
    ///
    /// Both requests are in flight at the same time. Whatever succeeds is applied, so calling this
    /// again after a `DataUnavailable` error only re-requests what is still missing. Once both
    /// parts are loaded this does nothing.
    pub async fn hydrate(&self) -> Result<()> {
        let (need_transactions, need_totals) = {
            let store = self.session_store().await?;
            (!store.is_hydrated(), !store.totals_hydrated())
        };
        if !need_transactions && !need_totals {
            debug!("The store is already hydrated");
            return Ok(());
        }

        let fetch_transactions = async {
            if need_transactions {
                Some(self.api.fetch_transactions(self.user, self.page).await)
            } else {
                None
            }
        };
        let fetch_totals = async {
            if need_totals {
                Some(self.api.fetch_totals(self.user).await)
            } else {
                None
            }
        };
        let (transactions, totals) = tokio::join!(fetch_transactions, fetch_totals);

        let mut failures = Vec::new();
        let mut store = self.session_store().await?;
        match transactions {
            Some(Ok(transactions)) if !store.is_hydrated() => store.hydrate(transactions)?,
            Some(Ok(_)) => debug!("Transactions were loaded while the request was in flight"),
            Some(Err(e)) => {
                warn!("Unable to load transactions: {e:#}");
                failures.push(format!("transactions ({e:#})"));
            }
            None => {}
        }
        match totals {
            Some(Ok(totals)) if !store.totals_hydrated() => store.hydrate_totals(totals)?,
            Some(Ok(_)) => debug!("Totals were loaded while the request was in flight"),
            Some(Err(e)) => {
                warn!("Unable to load totals: {e:#}");
                failures.push(format!("totals ({e:#})"));
            }
            None => {}
        }

        if failures.is_empty() {
            info!(
                "Loaded {} transactions and {} totals",
                store.len(),
                store.aggregate_totals().len()
            );
            Ok(())
        } else {
            Err(Error::msg(
                ErrorType::DataUnavailable,
                format!("Data unavailable, unable to load {}", failures.join(" and ")),
            ))
        }
    }

    /// A form pre-filled with the current state of transaction `id`.
    pub async fn edit_form(&self, id: TransactionId) -> Result<TransactionForm> {
        let store = self.session_store().await?;
        store
            .get(id)
            .map(TransactionForm::from)
            .ok_or_else(|| not_found(id))
    }

    /// Creates a transaction from `form`. Returns the transaction as the server stored it.
    pub async fn create(&self, form: &TransactionForm) -> Result<Transaction> {
        let valid = form.validate()?;
        self.ready_for(None).await?;
        let created = self
            .api
            .create_transaction(self.user, &valid)
            .await
            .context("Unable to add the transaction")
            .pub_result(ErrorType::Request)?;
        self.session_store().await?.add(created.clone())?;
        info!("Added transaction {}", created.id());
        Ok(created)
    }

    /// Replaces every field of transaction `id` with the contents of `form`.
    pub async fn edit(&self, id: TransactionId, form: &TransactionForm) -> Result<Transaction> {
        let valid = form.validate()?;
        self.ready_for(Some(id)).await?;
        let updated = self
            .api
            .update_transaction(self.user, id, &valid)
            .await
            .with_context(|| format!("Unable to update transaction {id}"))
            .pub_result(ErrorType::Request)?;
        if updated.id() != id {
            return Err(Error::msg(
                ErrorType::Request,
                format!(
                    "The server answered the update of transaction {id} with transaction {}",
                    updated.id()
                ),
            ));
        }
        self.session_store().await?.update(updated.clone())?;
        info!("Updated transaction {id}");
        Ok(updated)
    }

    /// Deletes transaction `id`. Returns the transaction as it was before deletion.
    pub async fn delete(&self, id: TransactionId) -> Result<Transaction> {
        self.ready_for(Some(id)).await?;
        let deleted = self
            .api
            .delete_transaction(self.user, id)
            .await
            .with_context(|| format!("Unable to delete transaction {id}"))
            .pub_result(ErrorType::Request)?;
        let removed = self.session_store().await?.remove(deleted)?;
        info!("Deleted transaction {deleted}");
        Ok(removed)
    }

    /// Changes are only sent when the store will be able to apply the server's answer: the totals
    /// are loaded and, for an existing transaction, the store holds it.
    async fn ready_for(&self, id: Option<TransactionId>) -> Result<()> {
        let store = self.session_store().await?;
        if !store.totals_hydrated() {
            return Err(Error::msg(
                ErrorType::Store,
                "Totals must be loaded before transactions can be changed",
            ));
        }
        match id {
            Some(id) if store.get(id).is_none() => Err(not_found(id)),
            _ => Ok(()),
        }
    }

    /// Locks the store if it still belongs to this session.
    async fn session_store(&self) -> Result<MutexGuard<'_, TransactionStore>> {
        let store = self.store.lock().await;
        if store.epoch() != self.epoch {
            warn!(
                "Dropping work for user {}, the session it belongs to has ended",
                self.user.user_id()
            );
            return Err(Error::msg(
                ErrorType::Session,
                "The session this request belongs to has ended",
            ));
        }
        Ok(store)
    }
}

fn not_found(id: TransactionId) -> Error {
    Error::msg(ErrorType::NotFound, format!("Transaction {id} not found"))
}
