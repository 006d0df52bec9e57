//! `completions <SHELL>`

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use braille_reader::cli::Cli;

pub fn handle(shell: Shell) {
    let mut command = Cli::command();
    generate(shell, &mut command, "braille-reader", &mut io::stdout());
}
