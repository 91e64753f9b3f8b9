use crate::model::{Amount, Category, TransactionDate, TransactionType};
use serde::Serialize;

/// The identity of a transaction. Assigned by the API when the transaction is created.
pub type TransactionId = i64;

/// One dated credit or debit.
///
/// Instances are only created by this crate: either from an API payload, or by the store when it
/// applies a server-confirmed change. Front ends read them but never build or mutate them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    name: String,
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    category: Category,
    amount: Amount,
    date: TransactionDate,
}

impl Transaction {
    pub(crate) fn new(
        id: TransactionId,
        name: impl Into<String>,
        transaction_type: TransactionType,
        category: Category,
        amount: Amount,
        date: TransactionDate,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            transaction_type,
            category,
            amount,
            date,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> &TransactionDate {
        &self.date
    }

    /// Copies every field except `id` from `other`. The identity of a transaction never changes.
    pub(crate) fn overwrite_with(&mut self, other: &Transaction) {
        self.name = other.name.clone();
        self.transaction_type = other.transaction_type;
        self.category = other.category;
        self.amount = other.amount;
        self.date = other.date.clone();
    }
}
