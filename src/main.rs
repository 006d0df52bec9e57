mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use braille_reader::cli::{Cli, Commands, ConfigCommands};
use braille_reader::logging::init_logging;
use braille_reader::recognition::RecognitionError;
use braille_reader::theme::current_theme;
use braille_reader::tui::StatusLine;
use braille_reader::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let theme = current_theme();
            // Nothing recognizable is a user problem; tell them what to do
            if let Some(recognition) = e.downcast_ref::<RecognitionError>() {
                eprintln!("{}", StatusLine::from_recognition(recognition).to_ansi(&theme));
            } else {
                eprintln!("{}", theme.error_text(&format!("Error: {:#}", e)));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load();
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    init_logging(&logging, cli.command.uses_tui())?;

    match cli.command {
        Commands::Play { text, playback } => commands::play::handle(&text, &playback, config?),
        Commands::Read { image, playback } => commands::read::handle(&image, &playback, config?),
        Commands::Capture { output, playback } => {
            commands::capture::handle(output.as_deref(), &playback, config?)
        }
        Commands::Table { cells } => commands::table::handle(cells),
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::handle_show(&config?),
            // Both work on the raw file, so a broken config can be repaired
            ConfigCommands::Edit => commands::config::handle_edit(),
            ConfigCommands::Migrate { yes } => commands::config::handle_migrate(yes),
        },
        Commands::Completions { shell } => {
            commands::completions::handle(shell);
            Ok(())
        }
    }
}
