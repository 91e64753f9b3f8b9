//! Configuration file handling.
//!
//! The configuration file is stored at `$CASHBOOK_HOME/config.json` and holds the address of the
//! API along with settings for how much data to load. The persisted session lives next to it in
//! `$CASHBOOK_HOME/session.json`.

use crate::api::Page;
use crate::error::Res;
use crate::utils;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "cashbook";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const SESSION_JSON: &str = "session.json";
const PAGE_LIMIT: u32 = 100;
const PAGE_OFFSET: u32 = 0;
const LATEST_COUNT: usize = 3;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$CASHBOOK_HOME` and from there it loads `$CASHBOOK_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    session_path: PathBuf,
    config_file: ConfigFile,
    api_url: Url,
}

impl Config {
    /// Creates the home directory and an initial `config.json` pointing at `api_url`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g. `$HOME/cashbook`
    /// - `api_url` - The base URL of the finance API, e.g. `https://api.example.com/api/rest/`
    /// - `api_secret` - An optional secret sent with every request.
    ///
    /// # Errors
    /// - Returns an error if `api_url` is not a valid URL or if any file operation fails.
    pub async fn create(
        dir: impl Into<PathBuf>,
        api_url: &str,
        api_secret: Option<String>,
    ) -> Res<Self> {
        let api_url = parse_api_url(api_url)?;

        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the cashbook home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
            api_secret,
            page_limit: PAGE_LIMIT,
            page_offset: PAGE_OFFSET,
            latest_count: LATEST_COUNT,
        };
        let config_path = root.join(CONFIG_JSON);
        config_file.save(&config_path).await?;

        Ok(Self {
            session_path: root.join(SESSION_JSON),
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    /// Validates that `cashbook_home` and its config file exist, then loads the config file.
    pub async fn load(cashbook_home: impl Into<PathBuf>) -> Res<Self> {
        let maybe_relative = cashbook_home.into();
        if !maybe_relative.is_dir() {
            bail!(
                "The cashbook home directory is missing '{}', run 'cashbook init' first",
                maybe_relative.display()
            )
        }
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'cashbook init' first",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let api_url = parse_api_url(&config_file.api_url)
            .with_context(|| format!("Invalid api_url in {}", config_path.display()))?;

        Ok(Self {
            session_path: root.join(SESSION_JSON),
            root,
            config_path,
            config_file,
            api_url,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// The base URL of the API. Always ends with `/` so that endpoint names join beneath it.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn api_secret(&self) -> Option<&str> {
        self.config_file.api_secret.as_deref()
    }

    /// Which page of transactions to load when a session starts.
    pub fn page(&self) -> Page {
        Page::new(self.config_file.page_limit, self.config_file.page_offset)
    }

    /// How many transactions the recent-activity summary shows.
    pub fn latest_count(&self) -> usize {
        self.config_file.latest_count
    }
}

/// Parses the base URL of the API, adding a trailing `/` if it is missing.
fn parse_api_url(s: &str) -> Res<Url> {
    let mut url = Url::parse(s.trim()).with_context(|| format!("'{s}' is not a valid URL"))?;
    if url.cannot_be_a_base() {
        bail!("'{s}' cannot be used as the base URL of the API");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "cashbook",
///   "config_version": 1,
///   "api_url": "https://api.example.com/api/rest/",
///   "page_limit": 100,
///   "page_offset": 0,
///   "latest_count": 3
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "cashbook"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Base URL of the finance API
    api_url: String,

    /// Sent as the `x-hasura-admin-secret` header when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    api_secret: Option<String>,

    /// How many transactions to load when a session starts
    #[serde(default = "default_page_limit")]
    page_limit: u32,

    /// How many transactions to skip when a session starts
    #[serde(default)]
    page_offset: u32,

    /// How many transactions the recent-activity summary shows
    #[serde(default = "default_latest_count")]
    latest_count: usize,
}

fn default_page_limit() -> u32 {
    PAGE_LIMIT
}

fn default_latest_count() -> usize {
    LATEST_COUNT
}

impl ConfigFile {
    /// Loads a ConfigFile from `path` and checks that it belongs to this app.
    async fn load(path: impl AsRef<Path>) -> Res<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path).await?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    async fn save(&self, path: impl AsRef<Path>) -> Res<()> {
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(path, data)
            .await
            .context("Unable to write config file")
    }
}
