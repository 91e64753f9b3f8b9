//! Implements the `Api` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without a server. Set `CASHBOOK_IN_TEST_MODE` to use it.

use crate::api::wire::TransactionRow;
use crate::api::{Api, Page};
use crate::error::Res;
use crate::model::{
    AggregateTotal, Amount, Transaction, TransactionId, TransactionType, User, UserId,
    UserProfile, ValidTransaction,
};
use anyhow::{anyhow, bail, Context};
use std::collections::{BTreeMap, HashSet};
use std::io::Cursor;
use std::sync::{Mutex, MutexGuard};

/// The user that the seed data belongs to.
pub const TEST_EMAIL: &str = "jane@example.com";
pub const TEST_PASSWORD: &str = "password123";
pub const TEST_USER_ID: UserId = 1;

/// Names an `Api` operation so that it can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    LogIn,
    Transactions,
    Totals,
    Create,
    Update,
    Delete,
    Profile,
}

/// An implementation of the `Api` trait that does not use a server. It holds its data in memory
/// and, by default, is seeded with a handful of transactions belonging to `TEST_USER_ID`.
#[derive(Debug)]
pub struct TestApi {
    state: Mutex<State>,
}

#[derive(Debug)]
struct State {
    rows: Vec<(UserId, TransactionRow)>,
    next_id: TransactionId,
    accounts: Vec<Account>,
    failing: HashSet<Endpoint>,
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    password: String,
    profile: UserProfile,
}

impl TestApi {
    /// Create a new `TestApi` holding `transactions` for `TEST_USER_ID`.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let rows: Vec<(UserId, TransactionRow)> = transactions
            .iter()
            .map(|t| (TEST_USER_ID, TransactionRow::from(t)))
            .collect();
        let next_id = rows.iter().map(|(_, row)| row.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(State {
                rows,
                next_id,
                accounts: vec![default_account()],
                failing: HashSet::new(),
            }),
        }
    }

    /// Makes every later call to `endpoint` fail until `recover` is called.
    pub fn fail(&self, endpoint: Endpoint) -> Res<()> {
        self.lock()?.failing.insert(endpoint);
        Ok(())
    }

    pub fn recover(&self, endpoint: Endpoint) -> Res<()> {
        self.lock()?.failing.remove(&endpoint);
        Ok(())
    }

    /// What the server currently holds for `user_id`, in insertion order.
    pub fn server_transactions(&self, user_id: UserId) -> Res<Vec<Transaction>> {
        Ok(self
            .lock()?
            .rows
            .iter()
            .filter(|(owner, _)| *owner == user_id)
            .map(|(_, row)| Transaction::from(row.clone()))
            .collect())
    }

    fn lock(&self) -> Res<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| anyhow!("The in-memory API state is poisoned"))
    }

    /// Locks the state, failing if `endpoint` has been made to fail.
    fn call(&self, endpoint: Endpoint) -> Res<MutexGuard<'_, State>> {
        let state = self.lock()?;
        if state.failing.contains(&endpoint) {
            bail!("{endpoint:?} is unavailable");
        }
        Ok(state)
    }
}

impl State {
    fn owned_mut(&mut self, user: User, id: TransactionId) -> Res<&mut TransactionRow> {
        self.rows
            .iter_mut()
            .find(|(owner, row)| *owner == user.user_id() && row.id == id)
            .map(|(_, row)| row)
            .with_context(|| format!("The server has no transaction with id {id}"))
    }
}

#[async_trait::async_trait]
impl Api for TestApi {
    async fn log_in(&self, email: &str, password: &str) -> Res<UserId> {
        let state = self.call(Endpoint::LogIn)?;
        state
            .accounts
            .iter()
            .find(|a| a.email == email && a.password == password)
            .map(|a| a.profile.id)
            .context("Invalid email or password")
    }

    async fn fetch_transactions(&self, user: User, page: Page) -> Res<Vec<Transaction>> {
        let state = self.call(Endpoint::Transactions)?;
        let mut rows: Vec<&TransactionRow> = state
            .rows
            .iter()
            .filter(|(owner, _)| *owner == user.user_id())
            .map(|(_, row)| row)
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .map(|row| Transaction::from(row.clone()))
            .collect())
    }

    async fn fetch_totals(&self, user: User) -> Res<Vec<AggregateTotal>> {
        let state = self.call(Endpoint::Totals)?;
        let mut sums: BTreeMap<TransactionType, Amount> = BTreeMap::new();
        for (_, row) in state.rows.iter().filter(|(o, _)| *o == user.user_id()) {
            *sums.entry(row.transaction_type).or_default() += row.amount;
        }
        Ok(sums
            .into_iter()
            .map(|(t, sum)| AggregateTotal::new(t, sum))
            .collect())
    }

    async fn create_transaction(
        &self,
        user: User,
        transaction: &ValidTransaction,
    ) -> Res<Transaction> {
        let mut state = self.call(Endpoint::Create)?;
        let id = state.next_id;
        state.next_id += 1;
        let row = TransactionRow {
            id,
            transaction_name: transaction.name().to_string(),
            transaction_type: transaction.transaction_type(),
            category: transaction.category(),
            amount: transaction.amount(),
            date: transaction.date().clone(),
        };
        state.rows.push((user.user_id(), row.clone()));
        Ok(row.into())
    }

    async fn update_transaction(
        &self,
        user: User,
        id: TransactionId,
        transaction: &ValidTransaction,
    ) -> Res<Transaction> {
        let mut state = self.call(Endpoint::Update)?;
        let row = state.owned_mut(user, id)?;
        row.transaction_name = transaction.name().to_string();
        row.transaction_type = transaction.transaction_type();
        row.category = transaction.category();
        row.amount = transaction.amount();
        row.date = transaction.date().clone();
        Ok(row.clone().into())
    }

    async fn delete_transaction(&self, user: User, id: TransactionId) -> Res<TransactionId> {
        let mut state = self.call(Endpoint::Delete)?;
        let index = state
            .rows
            .iter()
            .position(|(owner, row)| *owner == user.user_id() && row.id == id)
            .with_context(|| format!("The server has no transaction with id {id}"))?;
        let (_, row) = state.rows.remove(index);
        Ok(row.id)
    }

    async fn fetch_profile(&self, user: User) -> Res<UserProfile> {
        let state = self.call(Endpoint::Profile)?;
        state
            .accounts
            .iter()
            .find(|a| a.profile.id == user.user_id())
            .map(|a| a.profile.clone())
            .with_context(|| format!("The server has no profile for user {}", user.user_id()))
    }
}

impl Default for TestApi {
    /// Loads seed data from this module.
    fn default() -> Self {
        // The seed data is a constant that is covered by tests.
        let transactions = load_csv(TRANSACTION_DATA).unwrap_or_default();
        Self::new(transactions)
    }
}

fn default_account() -> Account {
    Account {
        email: TEST_EMAIL.to_string(),
        password: TEST_PASSWORD.to_string(),
        profile: UserProfile {
            id: TEST_USER_ID,
            name: "Jane Doe".to_string(),
            email: TEST_EMAIL.to_string(),
            country: Some("USA".to_string()),
            date_of_birth: Some("1990-01-25".to_string()),
            city: Some("San Jose".to_string()),
            permanent_address: Some("San Jose, California, USA".to_string()),
            postal_code: Some("45962".to_string()),
            present_address: Some("San Jose, California, USA".to_string()),
        },
    }
}

/// Loads transactions from a CSV-formatted string with a header row.
fn load_csv(csv_data: &str) -> Res<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut transactions = Vec::new();
    for result in rdr.deserialize::<TransactionRow>() {
        let row = result.context("Bad seed transaction")?;
        transactions.push(Transaction::from(row));
    }
    Ok(transactions)
}

/// Seed transaction data.
const TRANSACTION_DATA: &str = r##"id,transaction_name,type,category,amount,date
1,Salary,credit,transfer,5000,2024-03-01T09:00:00+00:00
2,Rent,debit,service,1800,2024-03-02T10:00:00+00:00
3,Groceries,debit,food,86.45,2024-03-04T18:20:00+00:00
4,Cinema,debit,entertainment,24,2024-03-07T20:15:00+00:00
5,Headphones,debit,shopping,129.99,2024-03-09T13:05:00+00:00
6,Refund from Alex,credit,transfer,40,2024-03-10T08:30:00+00:00
7,Phone bill,debit,service,55,2024-03-12T07:00:00+00:00
"##;
