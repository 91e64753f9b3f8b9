//! cashbook: the core of a personal finance client.
//!
//! The `TransactionStore` holds the signed-in user's transactions together with a running total per
//! transaction type, and keeps the two consistent through every add, update and remove. The
//! `SessionStore` knows who is signed in. `DataSync` fills the store from the remote API once per
//! session and applies server-confirmed changes. `App` ties these together for a front end, such as
//! the `cashbook` CLI.

pub mod api;
mod app;
pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod store;
mod sync;
mod utils;


pub use api::Mode;
pub use app::App;
pub use config::Config;
pub use error::{Error, ErrorType, Result};
pub use sync::DataSync;
