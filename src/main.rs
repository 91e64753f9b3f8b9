use cashbook::args::{Args, Command};
use cashbook::{commands, App, Config, Error, ErrorType, Mode, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().cashbook_home().path();

    // This allows for running the program without a server. When CASHBOOK_IN_TEST_MODE is set and
    // non-zero in length, then the mode will be Mode::Test, otherwise it will be Mode::Http.
    let mode = Mode::from_env();

    if let Command::Init(init_args) = args.command() {
        commands::init(
            home,
            init_args.api_url(),
            init_args.api_secret().map(str::to_string),
        )
        .await?
        .print();
        return Ok(());
    }

    let config = Config::load(home)
        .await
        .map_err(|e| Error::new(ErrorType::Config, e))?;
    let app = App::new(config, mode).await?;

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(_) => {}
        Command::Login(login_args) => commands::login(&app, &login_args.form(), login_args.admin())
            .await?
            .print(),
        Command::Logout => commands::logout(&app).await?.print(),
        Command::Whoami => commands::whoami(&app).await?.print(),
        Command::Profile => commands::profile(&app).await?.print(),
        Command::Dashboard => commands::dashboard(&app).await?.print(),
        Command::List(list_args) => commands::list(&app, list_args.transaction_type())
            .await?
            .print(),
        Command::Totals => commands::totals(&app).await?.print(),
        Command::Add(add_args) => commands::add(&app, &add_args.form()).await?.print(),
        Command::Edit(edit_args) => commands::edit(&app, edit_args.id(), edit_args.changes())
            .await?
            .print(),
        Command::Delete(delete_args) => commands::delete(&app, delete_args.id()).await?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
