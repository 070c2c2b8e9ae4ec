//! Terminal output: markdown through termimad, or plain text.

use anyhow::Result;
use serde::Serialize;
use termimad::{crossterm::style::Color, MadSkin};

pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Prints markdown. Header lines keep their `#` markers so nesting stays
    /// visible in the terminal.
    pub fn render(&self, markdown: &str) {
        if !self.rich_enabled {
            print!("{markdown}");
            return;
        }
        for line in markdown.lines() {
            if line.starts_with('#') {
                println!("\x1b[36m{line}\x1b[0m");
            } else {
                self.skin.print_inline(line);
                println!();
            }
        }
    }

    /// Prints `value` as pretty JSON regardless of the color setting.
    pub fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
