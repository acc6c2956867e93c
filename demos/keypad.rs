//! Per-keystroke mode with a regex-styled console. Press `q` to quit.

use crossterm::style::Color;
use promptline::{KeyCode, PromptBuilder, StyleSheet, StyledConsole};
use regex::Regex;

fn main() {
    let sheet = StyleSheet::new(Color::Cyan)
        .rule(Regex::new(r"key: .").expect("static pattern"), Color::Yellow);

    PromptBuilder::new()
        .populate_prompt(|| "press keys (q quits) > ".to_string())
        .key_handler(|prompt, key| {
            if let KeyCode::Char(c) = key.code {
                prompt.write_line(format!("key: {c}"))?;
            }
            Ok(())
        })
        .console(StyledConsole::new(sheet))
        .build()
        .run()
        .expect("prompt session failed");
}
