//! # apiterm Main Entry Point
//!
//! Without a subcommand (or with `tui`) the interactive form is launched;
//! `get` and `post` send a single request and print the result.

use anyhow::Result;
use apiterm::cmd_args::{CommandLineArgs, Mode};
use apiterm::{logging, oneshot, AppController};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = CommandLineArgs::parse();

    let outcome = match args.mode() {
        Mode::Tui => {
            logging::init_file_logging()?;
            let mut app = AppController::new()?;
            app.run().await?;
            return Ok(ExitCode::SUCCESS);
        }
        Mode::Get { url } => {
            logging::init_stderr_logging()?;
            oneshot::run_get(url, args.verbose()).await
        }
        Mode::Post { url, json } => {
            logging::init_stderr_logging()?;
            oneshot::run_post(url, json, args.verbose()).await
        }
    };

    match outcome {
        Ok(output) => {
            println!("{output}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Request error: {e}");
            Ok(ExitCode::FAILURE)
        }
    }
}
