//! The closed sets of labels a transaction is classified with.

use serde::{Deserialize, Serialize};

/// Whether money came in or went out. Also the key that running totals are aggregated by.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Credit,
    Debit,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Credit, TransactionType::Debit];
}

/// The fixed set of categories a transaction can be filed under.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entertainment,
    Food,
    Shopping,
    Service,
    Transfer,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Entertainment,
        Category::Food,
        Category::Shopping,
        Category::Service,
        Category::Transfer,
    ];
}
