//! Types that represent the core data model, such as `Transaction` and `AggregateTotal`.
mod amount;
mod category;
mod date;
mod form;
mod total;
mod transaction;
mod user;

pub use amount::{Amount, AmountError};
pub use category::{Category, TransactionType};
pub use date::TransactionDate;
pub use form::{LogInForm, TransactionForm, ValidTransaction};
pub use total::{AggregateTotal, Totals};
pub use transaction::{Transaction, TransactionId};
pub use user::{User, UserId, UserProfile};
