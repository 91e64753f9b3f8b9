//! These structs provide the CLI interface for the cashbook CLI.

use crate::commands::FormChanges;
use crate::model::{Amount, Category, LogInForm, TransactionForm, TransactionId, TransactionType};
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// cashbook: A command-line client for a personal finance API.
///
/// Sign in, look at your credit and debit totals, and add, edit or delete transactions. The data
/// lives on the server configured with `cashbook init`; nothing is kept locally except the config
/// and who you are signed in as.
#[derive(Debug, Parser, Clone)]
#[command(name = "cashbook", version)]
pub struct Args {
    #[command(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and the configuration file.
    ///
    /// This is the first command you should run. Pass the base URL of the finance API as
    /// --api-url, and the API secret, if the server needs one, as --api-secret.
    Init(InitArgs),
    /// Sign in with your email and password.
    Login(LoginArgs),
    /// Sign out and forget the saved session.
    Logout,
    /// Show who is signed in.
    Whoami,
    /// Show your profile.
    Profile,
    /// Show the credit and debit totals and the latest transactions.
    Dashboard,
    /// List transactions, most recent first.
    List(ListArgs),
    /// Show the credit and debit totals.
    Totals,
    /// Add a transaction.
    Add(AddArgs),
    /// Change some fields of a transaction.
    Edit(EditArgs),
    /// Delete a transaction.
    Delete(DeleteArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the cashbook configuration and session are held. Defaults to
    /// ~/cashbook
    #[arg(long, env = "CASHBOOK_HOME", default_value_t = default_cashbook_home())]
    cashbook_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, cashbook_home: PathBuf) -> Self {
        Self {
            log_level,
            cashbook_home: cashbook_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn cashbook_home(&self) -> &DisplayPath {
        &self.cashbook_home
    }
}

/// Args for the `cashbook init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the finance API, e.g. https://api.example.com/api/rest/
    #[arg(long)]
    api_url: String,

    /// Sent as the x-hasura-admin-secret header with every request.
    #[arg(long, env = "CASHBOOK_API_SECRET")]
    api_secret: Option<String>,
}

impl InitArgs {
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.api_secret.as_deref()
    }
}

/// Args for the `cashbook login` command.
#[derive(Debug, Parser, Clone)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, env = "CASHBOOK_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Act as an administrator.
    #[arg(long)]
    admin: bool,
}

impl LoginArgs {
    pub fn form(&self) -> LogInForm {
        LogInForm::new(self.email.clone(), self.password.clone())
    }

    pub fn admin(&self) -> bool {
        self.admin
    }
}

/// Args for the `cashbook list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    /// Only list transactions of this type.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl ListArgs {
    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// The transaction fields shared by `add` and `edit`.
#[derive(Debug, Parser, Clone, Default)]
pub struct TransactionFields {
    /// What the transaction was for.
    #[arg(long)]
    name: Option<String>,

    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,

    #[arg(long, value_enum)]
    category: Option<Category>,

    /// A positive amount, e.g. 12.50 or $1,200
    #[arg(long)]
    amount: Option<Amount>,

    /// e.g. 2024-03-01 or 2024-03-01T09:30:00
    #[arg(long)]
    date: Option<String>,
}

/// Args for the `cashbook add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(flatten)]
    fields: TransactionFields,
}

impl AddArgs {
    /// The form as entered. Missing fields are reported by validation.
    pub fn form(&self) -> TransactionForm {
        let fields = self.fields.clone();
        TransactionForm {
            name: fields.name.unwrap_or_default(),
            transaction_type: fields.transaction_type,
            category: fields.category,
            amount: fields.amount.unwrap_or_default(),
            date: fields.date.unwrap_or_default(),
        }
    }
}

/// Args for the `cashbook edit` command.
#[derive(Debug, Parser, Clone)]
pub struct EditArgs {
    /// The id of the transaction to change.
    #[arg(long)]
    id: TransactionId,

    #[command(flatten)]
    fields: TransactionFields,
}

impl EditArgs {
    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn changes(&self) -> FormChanges {
        let fields = self.fields.clone();
        FormChanges {
            name: fields.name,
            transaction_type: fields.transaction_type,
            category: fields.category,
            amount: fields.amount,
            date: fields.date,
        }
    }
}

/// Args for the `cashbook delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    /// The id of the transaction to delete.
    #[arg(long)]
    id: TransactionId,
}

impl DeleteArgs {
    pub fn id(&self) -> TransactionId {
        self.id
    }
}

fn default_cashbook_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("cashbook"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --cashbook-home or CASHBOOK_HOME instead of relying on the \
                default cashbook home directory.",
            );
            PathBuf::from("cashbook")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
