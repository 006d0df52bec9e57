//! `config` subcommands.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io::{self, BufRead, Write};

use braille_reader::config::migrate_config;
use braille_reader::theme::{current_theme, Theme};
use braille_reader::Config;

/// Print the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show(config: &Config) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    let theme = current_theme();
    println!("{}", theme.primary_text(toml_str.trim_end()));
    Ok(())
}

/// Open the config file in `$EDITOR` (default `vi`), creating it first.
#[cfg(not(tarpaulin_include))]
pub fn handle_edit() -> Result<()> {
    let config_path = Config::config_path()?;
    let theme = current_theme();

    if !config_path.exists() {
        Config::default().save_to(&config_path)?;
    }

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    println!(
        "{}",
        theme.primary_text(&format!(
            "Opening {} with {}",
            config_path.display(),
            editor
        ))
    );

    let status = std::process::Command::new(&editor)
        .arg(&config_path)
        .status()
        .with_context(|| format!("Failed to open editor '{}'", editor))?;
    if !status.success() {
        anyhow::bail!("Editor '{}' exited with {}", editor, status);
    }

    // Surface syntax errors right away rather than on the next run
    Config::load_from(&config_path)?;
    Ok(())
}

/// Add missing fields to the config file after showing what changes.
///
/// Asks for confirmation unless `yes` is set.
#[cfg(not(tarpaulin_include))]
pub fn handle_migrate(yes: bool) -> Result<()> {
    let theme = current_theme();
    let config_path = Config::config_path()?;
    let file_exists = config_path.exists();

    let content = if file_exists {
        fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let result = migrate_config(&content)?;
    if !result.has_changes() {
        println!("{}", theme.primary_text("Config is already up to date."));
        return Ok(());
    }

    let question = if file_exists {
        let fields = result.added_fields.len();
        let sections = result.sections_added.len();
        if sections > 0 {
            println!(
                "{}",
                theme.primary_text(&format!(
                    "Found {} missing field(s) in {} new section(s):",
                    fields, sections
                ))
            );
        } else {
            println!(
                "{}",
                theme.primary_text(&format!("Found {} missing field(s):", fields))
            );
        }
        format!("Apply these changes to {}?", config_path.display())
    } else {
        println!(
            "{}",
            theme.primary_text("Config file does not exist. Will create it with default settings.")
        );
        format!("Create {}?", config_path.display())
    };

    println!();
    for line in diff_preview(&result.content, &result.added_fields, !file_exists, &theme) {
        println!("{}", line);
    }
    println!();

    if !yes && !prompt_confirmation(&question)? {
        println!("{}", theme.primary_text("No changes made."));
        return Ok(());
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&config_path, &result.content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    let done = if file_exists {
        "Config updated successfully."
    } else {
        "Config file created successfully."
    };
    println!("{}", theme.success_text(done));
    Ok(())
}

/// Diff-style lines for the migrated content.
///
/// Added fields (and the headers of sections containing them) get a `+`
/// prefix. Untouched fields are left out. For a new file everything is
/// an addition.
pub fn diff_preview(
    new_content: &str,
    added_fields: &[String],
    is_new_file: bool,
    theme: &Theme,
) -> Vec<String> {
    let added: HashSet<&str> = added_fields.iter().map(String::as_str).collect();
    let mut lines = Vec::new();
    let mut section = String::new();
    let mut pending_header: Option<&str> = None;

    for line in new_content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('[') && trimmed.ends_with(']') {
            section = trimmed[1..trimmed.len() - 1].to_string();
            pending_header = Some(line);
            continue;
        }

        let is_addition = match trimmed.find('=') {
            Some(eq) => {
                let key = trimmed[..eq].trim();
                is_new_file || added.contains(format!("{}.{}", section, key).as_str())
            }
            None => is_new_file && !trimmed.is_empty(),
        };
        if !is_addition {
            continue;
        }

        if let Some(header) = pending_header.take() {
            lines.push(theme.success_text(&format!("+ {}", header)));
        }
        lines.push(theme.success_text(&format!("+ {}", line)));
    }
    lines
}

/// Ask a yes/no question. Non-interactive stdin counts as "no".
fn prompt_confirmation(message: &str) -> Result<bool> {
    let theme = current_theme();

    if !atty::is(atty::Stream::Stdin) {
        println!(
            "{}",
            theme.secondary_text("Non-interactive mode: use --yes to apply changes automatically")
        );
        return Ok(false);
    }

    print!("{} [y/N] ", theme.primary_text(message));
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_theme() -> Theme {
        std::env::set_var("NO_COLOR", "1");
        Theme::default()
    }

    #[test]
    fn preview_shows_only_added_fields() {
        let content = "[playback]\ninitial_delay_ms = 500\nchar_interval_ms = 3000\n\n\
                       [actuator]\nbaud_rate = 9600\n";
        let added = vec!["playback.char_interval_ms".to_string()];
        let lines = diff_preview(content, &added, false, &plain_theme());
        assert_eq!(lines, vec!["+ [playback]", "+ char_interval_ms = 3000"]);
    }

    #[test]
    fn preview_new_file_is_all_additions() {
        let content = "[logging]\nlevel = \"warn\"\n";
        let lines = diff_preview(content, &[], true, &plain_theme());
        assert_eq!(lines, vec!["+ [logging]", "+ level = \"warn\""]);
    }

    #[test]
    fn preview_same_key_in_other_section_is_not_added() {
        let content = "[ocr]\ncommand = \"tesseract\"\n[camera]\ncommand = \"fswebcam {output}\"\n";
        let added = vec!["camera.command".to_string()];
        let lines = diff_preview(content, &added, false, &plain_theme());
        assert_eq!(
            lines,
            vec!["+ [camera]", "+ command = \"fswebcam {output}\""]
        );
    }
}
