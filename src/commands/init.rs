use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file pointing at `api_url` along with
/// default settings.
///
/// # Arguments
/// - `cashbook_home` - The directory that will be the root of the data directory, e.g.
///   `$HOME/cashbook`
/// - `api_url` - The base URL of the finance API, e.g. `https://api.example.com/api/rest/`
/// - `api_secret` - An optional secret sent as `x-hasura-admin-secret` with every request.
///
/// # Errors
/// - Returns an error if the URL is invalid or if any file operations fail.
pub async fn init(
    cashbook_home: &Path,
    api_url: &str,
    api_secret: Option<String>,
) -> Result<Out<()>> {
    let config = Config::create(cashbook_home, api_url, api_secret)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the cashbook directory at {}",
        config.root().display()
    )
    .into())
}
