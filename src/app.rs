//! The context object that front ends hold on to.

use crate::api::{self, Api, Mode};
use crate::error::{ErrorType, IntoResult, Result};
use crate::model::{User, UserId};
use crate::store::{SessionStore, TransactionStore};
use crate::{Config, DataSync};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Owns the stores and the API handle for one running program. Cloning is cheap and every clone
/// shares the same state.
#[derive(Clone)]
pub struct App {
    config: Config,
    session: Arc<SessionStore>,
    store: Arc<Mutex<TransactionStore>>,
    api: Arc<dyn Api>,
}

impl App {
    /// Restores the persisted session and connects to the API selected by `mode`.
    pub async fn new(config: Config, mode: Mode) -> Result<Self> {
        debug!("Creating the app in {mode:?} mode");
        let api = api::api(&config, mode).pub_result(ErrorType::Config)?;
        Self::with_api(config, api).await
    }

    /// Like `new`, but with a caller-provided `Api`.
    pub async fn with_api(config: Config, api: Arc<dyn Api>) -> Result<Self> {
        let session = SessionStore::load(config.session_path()).await?;
        Ok(Self {
            config,
            session: Arc::new(session),
            store: Arc::new(Mutex::new(TransactionStore::new())),
            api,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn store(&self) -> &Arc<Mutex<TransactionStore>> {
        &self.store
    }

    pub fn api(&self) -> &Arc<dyn Api> {
        &self.api
    }

    /// Starts a session for `user_id`. Anything loaded for a previous session is dropped, and any
    /// `DataSync` made for it stops working.
    pub async fn sign_in(&self, user_id: UserId, is_admin: bool) -> Result<User> {
        // Held across the session change. `sync` reads the user and the epoch under this lock.
        let mut store = self.store.lock().await;
        store.clear();
        self.session.sign_in(user_id, is_admin).await
    }

    /// Ends the session and drops everything loaded for it.
    pub async fn sign_out(&self) -> Result<()> {
        let mut store = self.store.lock().await;
        self.session.sign_out().await?;
        store.clear();
        Ok(())
    }

    /// A `DataSync` for the signed-in user. Fails with `ErrorType::Session` if nobody is signed in.
    pub async fn sync(&self) -> Result<DataSync> {
        let store = self.store.lock().await;
        let user = self.session.require_user()?;
        Ok(DataSync::new(
            self.api.clone(),
            self.store.clone(),
            user,
            self.config.page(),
            store.epoch(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Category, TransactionForm, TransactionType};
    use crate::store::StoreEvent;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_sync_requires_a_session() {
        let env = TestEnv::new().await;
        let app = env.app().await;
        let err = app.sync().await.err().unwrap();
        assert_eq!(err.error_type(), ErrorType::Session);
    }

    #[tokio::test]
    async fn test_session_survives_a_new_app() {
        let env = TestEnv::new().await;
        let app = env.app().await;
        app.sign_in(1, false).await.unwrap();
        assert_eq!(app.sync().await.unwrap().user(), User::new(1, false));

        let again = env.app().await;
        assert_eq!(again.session().current_user(), Some(User::new(1, false)));
    }

    #[tokio::test]
    async fn test_sign_out_clears_loaded_data() {
        let env = TestEnv::new().await;
        let app = env.signed_in_app().await;
        app.sync().await.unwrap().hydrate().await.unwrap();
        let mut events = app.store().lock().await.subscribe();

        app.sign_out().await.unwrap();
        assert!(app.session().current_user().is_none());
        assert_eq!(events.recv().await.unwrap(), StoreEvent::Cleared);
        let store = app.store().lock().await;
        assert!(store.is_empty());
        assert!(!store.is_hydrated());
    }

    #[tokio::test]
    async fn test_sync_from_an_ended_session_commits_nothing() {
        let env = TestEnv::new().await;
        let app = env.signed_in_app().await;
        let stale = app.sync().await.unwrap();
        stale.hydrate().await.unwrap();

        app.sign_out().await.unwrap();
        app.sign_in(2, false).await.unwrap();
        let current = app.sync().await.unwrap();
        current.hydrate().await.unwrap();

        let form = TransactionForm {
            name: "Lunch".to_string(),
            transaction_type: Some(TransactionType::Debit),
            category: Some(Category::Food),
            amount: Amount::from(12),
            date: "2024-03-15".to_string(),
        };
        let err = stale.create(&form).await.unwrap_err();
        assert_eq!(err.error_type(), ErrorType::Session);
        assert_eq!(
            stale.delete(1).await.unwrap_err().error_type(),
            ErrorType::Session
        );

        assert!(app.store().lock().await.is_empty());
        assert_eq!(
            env.api().server_transactions(api::TEST_USER_ID).unwrap().len(),
            7
        );
        assert!(env.api().server_transactions(2).unwrap().is_empty());

        current.create(&form).await.unwrap();
        assert_eq!(app.store().lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_new_in_test_mode() {
        let env = TestEnv::new().await;
        let app = App::new(env.config(), Mode::Test).await.unwrap();
        let user_id = app
            .api()
            .log_in(api::TEST_EMAIL, api::TEST_PASSWORD)
            .await
            .unwrap();
        assert_eq!(user_id, api::TEST_USER_ID);
    }
}
