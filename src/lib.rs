// Library root
// -----------
// The `vault-build` binary is a thin shell over these modules so the
// command flows can be driven from tests with a mock server, an in-memory
// token store and scripted prompts.
//
// Module responsibilities:
// - `api`: HTTP calls to the build server and the bearer-token helper.
// - `token_store`: where the session token lives between invocations.
// - `session`: login/logout.
// - `users`, `packages`: the admin commands and their table output.
// - `cli`, `commands`: argument parsing and dispatch.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod packages;
pub mod prompt;
pub mod session;
pub mod table;
pub mod token_store;
pub mod users;

pub use api::ApiClient;
pub use config::Config;
pub use context::Context;
pub use error::{CliError, Result};
pub use prompt::{Credentials, Prompter, TerminalPrompter};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
