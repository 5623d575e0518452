use crate::api::ApiClient;
use crate::prompt::Prompter;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Everything a command needs for one invocation: the configured API
/// client, a source of interactive input and a sink for output.
pub struct Context<'a> {
    pub api: &'a ApiClient,
    pub prompter: &'a mut dyn Prompter,
    pub out: &'a mut dyn Write,
}

impl<'a> Context<'a> {
    pub fn new(api: &'a ApiClient, prompter: &'a mut dyn Prompter, out: &'a mut dyn Write) -> Self {
        Context { api, prompter, out }
    }
}

/// Spinner on stderr while a request is in flight. Hidden when stderr is
/// not a terminal.
pub fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Byte progress for downloads; falls back to a spinner when the server
/// sends no content length.
pub fn download_bar(len: Option<u64>) -> ProgressBar {
    match len {
        Some(len) => {
            let bar = ProgressBar::new(len);
            if let Ok(style) =
                ProgressStyle::with_template("{bar:40} {bytes}/{total_bytes} ({eta})")
            {
                bar.set_style(style);
            }
            bar
        }
        None => spinner("Downloading..."),
    }
}
