// Error taxonomy for the client. Every command returns `Result<T>` and the
// binary prints the `Display` form; `--verbose` adds the debug form.

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("You are not logged in")]
    NotLoggedIn,

    #[error("You are already logged in")]
    AlreadyLoggedIn,

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    #[error("Invalid selection")]
    InvalidSelection,

    #[error("Must specify a role type")]
    MissingRole,

    #[error("Must specify a name")]
    MissingName,

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {status}: {body}")]
    Api { status: StatusCode, body: String },

    #[error("Token file {}: {source}", path.display())]
    TokenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed token file {}: {source}", path.display())]
    TokenFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[source] std::io::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
