//! The observable stores that hold client-side state.
mod session;
mod transactions;

pub use session::{SessionState, SessionStore};
pub use transactions::{StoreEvent, TransactionStore};
