//! Non-interactive `get` and `post` subcommands
//!
//! Shares the dispatcher with the interactive form, so validation, headers
//! and error text are identical in both modes.

use crate::tui::events::Completion;
use crate::tui::services::http::{RequestDispatcher, RequestSpec};
use anyhow::{bail, Result};

/// Send one request and return what should go to stdout: the status line
/// followed by the raw body.
pub async fn execute(
    dispatcher: &RequestDispatcher,
    spec: &RequestSpec,
    verbose: bool,
) -> Result<String> {
    if verbose {
        let method = match spec.method.trim() {
            "" => "GET".to_string(),
            method => method.to_uppercase(),
        };
        eprintln!("> {} {}", method, spec.url.trim());
    }

    match dispatcher.dispatch(spec).await {
        Completion::Success { status, body } => {
            tracing::info!("{} answered {}", spec.url, status);
            Ok(format!("Status: {status}\n{body}"))
        }
        Completion::Error { message } => bail!(message),
    }
}

pub async fn run_get(url: &str, verbose: bool) -> Result<String> {
    let dispatcher = RequestDispatcher::new()?;
    execute(&dispatcher, &RequestSpec::new("GET", url, ""), verbose).await
}

pub async fn run_post(url: &str, json: &str, verbose: bool) -> Result<String> {
    let dispatcher = RequestDispatcher::new()?;
    execute(&dispatcher, &RequestSpec::new("POST", url, json), verbose).await
}
