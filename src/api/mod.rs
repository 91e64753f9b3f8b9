//! The boundary with the remote finance API.
//!
//! Everything the app knows about the server goes through the `Api` trait. `HttpApi` talks to a
//! real server over REST and `TestApi` keeps everything in memory so the whole app can be run,
//! top-to-bottom, without one.

mod http;
mod test_client;
mod wire;

use crate::error::Res;
use crate::model::{
    AggregateTotal, Transaction, TransactionId, User, UserId, UserProfile, ValidTransaction,
};
use crate::Config;
use std::sync::Arc;

pub use http::HttpApi;
pub use test_client::{Endpoint, TestApi, TEST_EMAIL, TEST_PASSWORD, TEST_USER_ID};

/// When this environment variable is set and non-empty the app runs against `TestApi`.
pub const TEST_MODE_ENV: &str = "CASHBOOK_IN_TEST_MODE";

// Endpoint names, relative to the configured base URL.
pub(crate) const LOG_IN: &str = "get-user-id";
pub(crate) const ALL_TRANSACTIONS: &str = "all-transactions";
pub(crate) const TRANSACTION_TOTALS: &str = "transaction-totals";
pub(crate) const ADD_TRANSACTION: &str = "add-transaction";
pub(crate) const UPDATE_TRANSACTION: &str = "update-transaction";
pub(crate) const DELETE_TRANSACTION: &str = "delete-transaction";
pub(crate) const PROFILE: &str = "profile";

/// Which slice of the transaction history to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    pub fn new(limit: u32, offset: u32) -> Self {
        Self { limit, offset }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// The operations the remote finance API offers. Every call except `log_in` acts on behalf of a
/// signed-in `User`.
#[async_trait::async_trait]
pub trait Api: Send + Sync {
    /// Exchanges credentials for a user id.
    async fn log_in(&self, email: &str, password: &str) -> Res<UserId>;

    async fn fetch_transactions(&self, user: User, page: Page) -> Res<Vec<Transaction>>;

    /// One aggregate per transaction type that has any transactions.
    async fn fetch_totals(&self, user: User) -> Res<Vec<AggregateTotal>>;

    /// Creates a transaction and returns it as the server stored it, including its new id.
    async fn create_transaction(
        &self,
        user: User,
        transaction: &ValidTransaction,
    ) -> Res<Transaction>;

    async fn update_transaction(
        &self,
        user: User,
        id: TransactionId,
        transaction: &ValidTransaction,
    ) -> Res<Transaction>;

    /// Returns the id of the deleted transaction.
    async fn delete_transaction(&self, user: User, id: TransactionId) -> Res<TransactionId>;

    async fn fetch_profile(&self, user: User) -> Res<UserProfile>;
}

/// Selects the `Api` implementation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Talk to the server at the configured `api_url`.
    #[default]
    Http,
    /// Use the in-memory `TestApi` with its seed data.
    Test,
}

impl Mode {
    /// Returns `Mode::Test` if `CASHBOOK_IN_TEST_MODE` is set and non-empty, otherwise `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// Builds the `Api` implementation for `mode`.
pub fn api(config: &Config, mode: Mode) -> Res<Arc<dyn Api>> {
    Ok(match mode {
        Mode::Http => Arc::new(HttpApi::new(config)?),
        Mode::Test => Arc::new(TestApi::default()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page() {
        let page = Page::new(25, 50);
        assert_eq!(page.limit(), 25);
        assert_eq!(page.offset(), 50);
    }

    #[test]
    fn test_default_mode_is_http() {
        assert_eq!(Mode::default(), Mode::Http);
    }
}
