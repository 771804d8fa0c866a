//! Command-line and environment configuration.
//!
//! Each setting resolves from, in order: the command-line flag, the process
//! environment, then the dotenv file (`.env` by default). The dotenv file is
//! optional and is parsed without touching the process environment. Empty
//! values count as unset.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use clap::Parser;
use purge_core::MisskeyClient;
use thiserror::Error;

pub const HOST_VAR: &str = "MISSKEY_HOST";
pub const TOKEN_VAR: &str = "MISSKEY_TOKEN";
pub const TARGET_VAR: &str = "TARGET_STRING";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is not set")]
    Missing { var: &'static str },

    #[error("failed to read {}: {source}", path.display())]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

/// Delete global-timeline notes that contain a target string.
#[derive(Debug, Parser)]
#[command(name = "misskey-purge", version, about)]
pub struct Cli {
    /// Server address without scheme, e.g. `misskey.io`.
    #[arg(long, env = HOST_VAR)]
    pub host: Option<String>,

    /// Access token, sent verbatim in the `Authorization` header.
    #[arg(long, env = TOKEN_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Notes whose text contains this string are deleted.
    #[arg(long, env = TARGET_VAR)]
    pub target: Option<String>,

    /// Dotenv file consulted for settings missing from flags and environment.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,
}

impl Cli {
    pub fn into_settings(self) -> Result<Settings, ConfigError> {
        let file = read_env_file(&self.env_file)?;
        Ok(Settings {
            host: resolve(self.host, &file, HOST_VAR)?,
            token: resolve(self.token, &file, TOKEN_VAR)?,
            target: resolve(self.target, &file, TARGET_VAR)?,
            base_url: None,
        })
    }
}

/// Validated, immutable run configuration.
#[derive(Clone)]
pub struct Settings {
    pub host: String,
    pub token: String,
    pub target: String,
    /// Replaces `https://{host}` when set. Never filled from the command line.
    pub base_url: Option<String>,
}

impl Settings {
    pub fn client(&self) -> MisskeyClient {
        match &self.base_url {
            Some(url) => MisskeyClient::with_base_url(url),
            None => MisskeyClient::new(&self.host),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("token", &"<redacted>")
            .field("target", &self.target)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn resolve(
    given: Option<String>,
    file: &HashMap<String, String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    given
        .filter(|value| !value.is_empty())
        .or_else(|| file.get(var).filter(|value| !value.is_empty()).cloned())
        .ok_or(ConfigError::Missing { var })
}

/// A missing file yields no values. Later duplicates of a key win.
fn read_env_file(path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let env_file_error = |source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(HashMap::new()),
        Err(e) => return Err(env_file_error(e)),
    };
    entries.collect::<Result<_, _>>().map_err(env_file_error)
}
