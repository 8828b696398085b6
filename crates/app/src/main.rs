use std::{io, process::ExitCode};

use clap::Parser;
use engine::{Engine, FileStore};

mod cli;
mod commands;
mod error;
mod output;
mod prompt;
mod settings;

use crate::error::Result;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let settings = settings::load(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(format!(
            "tally={level},engine={level}",
            level = settings.level
        ))
        .init();

    tracing::debug!(
        data_dir = %settings.data_dir.display(),
        key = %settings.key,
        "loaded settings"
    );

    let mut engine = Engine::builder()
        .store(FileStore::new(&settings.data_dir))
        .key(&settings.key)
        .currency(settings.currency)
        .build()?;

    let mut confirm = prompt::TerminalConfirm {
        currency: settings.currency,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    commands::execute(&mut engine, cli.command, &mut out, &mut confirm)
}
