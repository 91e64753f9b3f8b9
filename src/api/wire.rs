//! The JSON shapes that cross the API boundary.
//!
//! Every response is parsed into one of these schemas before anything else sees it, and every
//! request body is built from one. Fields are typed, so a payload with an unknown transaction type,
//! an unknown category or an unparseable date is rejected here.

use crate::error::Res;
use crate::model::{
    AggregateTotal, Amount, Category, Transaction, TransactionDate, TransactionId,
    TransactionType, UserId, UserProfile, ValidTransaction,
};
use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A transaction as the API represents it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TransactionRow {
    pub(crate) id: TransactionId,
    pub(crate) transaction_name: String,
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) category: Category,
    pub(crate) amount: Amount,
    pub(crate) date: TransactionDate,
}

impl From<TransactionRow> for Transaction {
    fn from(row: TransactionRow) -> Self {
        Transaction::new(
            row.id,
            row.transaction_name,
            row.transaction_type,
            row.category,
            row.amount,
            row.date,
        )
    }
}

impl From<&Transaction> for TransactionRow {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: transaction.id(),
            transaction_name: transaction.name().to_string(),
            transaction_type: transaction.transaction_type(),
            category: transaction.category(),
            amount: transaction.amount(),
            date: transaction.date().clone(),
        }
    }
}

/// `{"transactions": [...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct TransactionsResponse {
    pub(crate) transactions: Vec<TransactionRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TotalRow {
    #[serde(rename = "type")]
    pub(crate) transaction_type: TransactionType,
    pub(crate) sum: Amount,
}

impl From<TotalRow> for AggregateTotal {
    fn from(row: TotalRow) -> Self {
        AggregateTotal::new(row.transaction_type, row.sum)
    }
}

/// `{"totals_credit_debit_transactions": [{"type": "credit", "sum": 100}, ...]}`
#[derive(Debug, Deserialize)]
pub(crate) struct TotalsResponse {
    #[serde(alias = "totals")]
    pub(crate) totals_credit_debit_transactions: Vec<TotalRow>,
}

/// `{"insert_transactions_one": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct CreateResponse {
    pub(crate) insert_transactions_one: TransactionRow,
}

/// `{"update_transactions_by_pk": {...}}`, or `null` when no transaction has that id.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateResponse {
    pub(crate) update_transactions_by_pk: Option<TransactionRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IdRow<T> {
    pub(crate) id: T,
}

/// `{"delete_transactions_by_pk": {"id": 3}}`, or `null` when no transaction has that id.
#[derive(Debug, Deserialize)]
pub(crate) struct DeleteResponse {
    pub(crate) delete_transactions_by_pk: Option<IdRow<TransactionId>>,
}

/// `{"get_user_id": [{"id": 1}]}`, with an empty list when the credentials are wrong.
#[derive(Debug, Deserialize)]
pub(crate) struct LogInResponse {
    pub(crate) get_user_id: Vec<IdRow<UserId>>,
}

/// `{"users": [{...}]}`
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileResponse {
    pub(crate) users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    name: &'a str,
    category: Category,
    date: &'a TransactionDate,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: Amount,
    user_id: UserId,
}

impl<'a> CreateRequest<'a> {
    pub(crate) fn new(transaction: &'a ValidTransaction, user_id: UserId) -> Self {
        Self {
            name: transaction.name(),
            category: transaction.category(),
            date: transaction.date(),
            transaction_type: transaction.transaction_type(),
            amount: transaction.amount(),
            user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRequest<'a> {
    name: &'a str,
    category: Category,
    date: &'a TransactionDate,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    amount: Amount,
    id: TransactionId,
}

impl<'a> UpdateRequest<'a> {
    pub(crate) fn new(transaction: &'a ValidTransaction, id: TransactionId) -> Self {
        Self {
            name: transaction.name(),
            category: transaction.category(),
            date: transaction.date(),
            transaction_type: transaction.transaction_type(),
            amount: transaction.amount(),
            id,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LogInRequest<'a> {
    pub(crate) email: &'a str,
    pub(crate) password: &'a str,
}

/// Parses a response body into its schema.
pub(crate) fn parse<T>(body: &str) -> Res<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).with_context(|| {
        format!(
            "Unable to parse the response as {}",
            std::any::type_name::<T>()
                .rsplit("::")
                .next()
                .unwrap_or("JSON")
        )
    })
}

impl LogInResponse {
    pub(crate) fn user_id(self) -> Res<UserId> {
        match self.get_user_id.first() {
            Some(row) => Ok(row.id),
            None => bail!("Invalid email or password"),
        }
    }
}

impl ProfileResponse {
    pub(crate) fn profile(self) -> Res<UserProfile> {
        match self.users.into_iter().next() {
            Some(profile) => Ok(profile),
            None => bail!("The API returned no profile for this user"),
        }
    }
}
