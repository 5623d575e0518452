#![allow(dead_code)]

use vault_build_cli::cli::Command;
use vault_build_cli::{
    commands, ApiClient, CliError, Context, Credentials, MemoryTokenStore, Prompter, TokenStore,
};

/// Prompter that answers from a script and records what it was asked.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    pub credentials: Option<Credentials>,
    pub password: Option<String>,
    pub confirm: bool,
    pub selection: Vec<usize>,
    pub confirmations: usize,
    pub offered: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(email: &str, password: &str) -> Self {
        ScriptedPrompter {
            credentials: Some(Credentials {
                email: email.to_string(),
                password: password.to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn with_password(password: &str) -> Self {
        ScriptedPrompter {
            password: Some(password.to_string()),
            ..Self::default()
        }
    }

    pub fn confirming(answer: bool) -> Self {
        ScriptedPrompter {
            confirm: answer,
            ..Self::default()
        }
    }

    pub fn selecting(indices: &[usize]) -> Self {
        ScriptedPrompter {
            selection: indices.to_vec(),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn credentials(&mut self) -> vault_build_cli::Result<Credentials> {
        Ok(self.credentials.take().expect("unexpected credentials prompt"))
    }

    fn password(&mut self) -> vault_build_cli::Result<String> {
        Ok(self.password.take().expect("unexpected password prompt"))
    }

    fn confirm(&mut self, _message: &str) -> vault_build_cli::Result<bool> {
        self.confirmations += 1;
        Ok(self.confirm)
    }

    fn select(&mut self, _message: &str, options: &[String]) -> vault_build_cli::Result<Vec<usize>> {
        self.offered = options.to_vec();
        Ok(self.selection.clone())
    }
}

pub struct Outcome {
    pub result: Result<(), CliError>,
    pub output: String,
    pub prompter: ScriptedPrompter,
}

/// Run `command` against `base_url` with the given store and prompter.
/// Blocking; call through `run_blocking` from async tests.
pub fn execute(
    base_url: &str,
    tokens: Box<dyn TokenStore>,
    mut prompter: ScriptedPrompter,
    command: Command,
) -> Outcome {
    let api = ApiClient::with_base_url(base_url, tokens).expect("client");
    let mut out: Vec<u8> = Vec::new();
    let result = {
        let mut ctx = Context::new(&api, &mut prompter, &mut out);
        commands::run(command, &mut ctx)
    };
    Outcome {
        result,
        output: String::from_utf8(out).expect("utf-8 output"),
        prompter,
    }
}

/// Logged-in in-memory store.
pub fn logged_in() -> MemoryTokenStore {
    MemoryTokenStore::with_token("tok-1")
}

/// The blocking HTTP client must not run on an async worker thread.
pub async fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}
