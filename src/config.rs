// Runtime configuration resolved once in `main` and passed explicitly to the
// API client. Nothing here is global.

use std::path::PathBuf;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable that overrides the token file location.
pub const TOKEN_FILE_ENV: &str = "VAULT_BUILD_TOKEN_FILE";
const TOKEN_FILE_NAME: &str = ".vault-build-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub secure: bool,
    pub verbose: bool,
    pub token_file: PathBuf,
}

impl Config {
    pub fn new(host: impl Into<String>, port: u16, secure: bool, verbose: bool) -> Self {
        Config {
            host: host.into(),
            port,
            secure,
            verbose,
            token_file: default_token_file(),
        }
    }

    /// `http(s)://host:port` of the build server.
    pub fn base_url(&self) -> String {
        let protocol = if self.secure { "https" } else { "http" };
        format!("{}://{}:{}", protocol, self.host, self.port)
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::new(DEFAULT_HOST, DEFAULT_PORT, false, false)
    }
}

/// `$VAULT_BUILD_TOKEN_FILE` if set, otherwise `~/.vault-build-token`.
pub fn default_token_file() -> PathBuf {
    if let Some(path) = std::env::var_os(TOKEN_FILE_ENV) {
        return PathBuf::from(path);
    }
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(TOKEN_FILE_NAME)
}
