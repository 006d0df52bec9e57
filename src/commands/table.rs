//! `table`: print the symbol table.

use anyhow::Result;
use std::io::{self, Write};

use braille_reader::braille::SymbolTable;
use braille_reader::theme::current_theme;
use braille_reader::tui::widgets::cell_lines;

#[cfg(not(tarpaulin_include))]
pub fn handle(cells: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_table(&mut out, SymbolTable::standard(), cells)
}

/// Write one row per table entry in display order.
///
/// With `cells`, each entry is followed by its three-row dot grid.
pub fn write_table(out: &mut impl Write, table: &SymbolTable, cells: bool) -> Result<()> {
    let theme = current_theme();
    writeln!(out, "{}", theme.accent_text("CHAR   CELL  DOTS"))?;

    for (character, pattern) in table.entries() {
        let name = if character == ' ' {
            "space".to_string()
        } else {
            character.to_string()
        };
        let dots = pattern
            .raised_dots()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        writeln!(
            out,
            "{} {}     {}",
            theme.primary_text(&format!("{:<6}", name)),
            pattern.to_unicode(),
            if dots.is_empty() { "-" } else { dots.as_str() }
        )?;

        if cells {
            for row in cell_lines(pattern) {
                writeln!(out, "       {}", theme.secondary_text(&row))?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(cells: bool) -> String {
        std::env::set_var("NO_COLOR", "1");
        let mut out = Vec::new();
        write_table(&mut out, SymbolTable::standard(), cells).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn table_lists_every_entry_in_order() {
        let output = render(false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 1 + SymbolTable::standard().len());
        assert_eq!(lines[1], "A      ⠁     1");
        assert_eq!(lines[36], "0      ⠀     -");
        assert_eq!(lines[37], "space  ⠀     -");
    }

    #[test]
    fn cells_adds_dot_grid() {
        let output = render(true);
        assert!(output.contains("A      ⠁     1\n       ● ○\n       ○ ○\n       ○ ○\n"));
    }
}
