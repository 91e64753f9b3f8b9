//! Command handlers for the cashbook CLI.
//!
//! This module contains implementations for all CLI subcommands.

mod init;
mod profile;
mod session;
mod transactions;
mod view;

use crate::model::Transaction;
use serde::Serialize;
use std::fmt::Debug;
use tracing::{debug, info};

pub use init::init;
pub use profile::profile;
pub use session::{login, logout, whoami};
pub use transactions::{add, delete, edit, FormChanges};
pub use view::{dashboard, list, totals, Dashboard};

/// The output type for a command. This allows the command to return a consistent message and,
/// optionally, structured data.
#[derive(Debug, Clone, Serialize)]
pub struct Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// A message that can be printed to the user regarding the outcome of the command execution.
    message: String,

    /// Any structured data that needs to be output from the call.
    structure: Option<T>,
}

impl<T, S> From<S> for Out<T>
where
    T: Debug + Clone + Serialize,
    S: Into<String>,
{
    fn from(value: S) -> Self {
        Out::new_message(value)
    }
}

impl<T> Out<T>
where
    T: Serialize + Clone + Debug,
{
    /// Create a new `Out` object that has `Some(structure)`.
    pub fn new<S>(message: S, structure: T) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: Some(structure),
        }
    }

    /// Create a new `Out` object that has `None` for `structure`.
    pub fn new_message<S>(message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            structure: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn structure(&self) -> Option<&T> {
        self.structure.as_ref()
    }

    /// Print the message to `info!` and the structured data (if it exists) as JSON to `debug!`.
    pub fn print(&self) {
        info!("{}", self.message);
        if let Some(structure) = self.structure() {
            if let Ok(json) = serde_json::to_string_pretty(structure) {
                debug!("Command output:\n\n{json}\n\n");
            }
        }
    }
}

/// One line of a transaction listing, e.g.
/// `#3     2024-03-04  debit   $86.45  Groceries (food)`
fn describe(transaction: &Transaction) -> String {
    format!(
        "#{:<5} {}  {:<6} {:>12}  {} ({})",
        transaction.id(),
        transaction.date().instant().format("%Y-%m-%d"),
        transaction.transaction_type(),
        transaction.amount().to_string(),
        transaction.name(),
        transaction.category(),
    )
}

/// A listing with a heading, or a note that there is nothing to list.
fn listing<'a>(heading: &str, transactions: impl IntoIterator<Item = &'a Transaction>) -> String {
    let lines: Vec<String> = transactions.into_iter().map(describe).collect();
    if lines.is_empty() {
        format!("{heading}: none")
    } else {
        format!("{heading}:\n{}", lines.join("\n"))
    }
}
