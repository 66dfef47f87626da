//! # Output Formatting
//!
//! Colored, emoji-prefixed messages and value formatting for terminal
//! output.

use owo_colors::OwoColorize;

/// When to color output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Always color
  Always,
  /// Color when writing to a terminal
  Auto,
  /// Never color
  Never,
}

impl ColorMode {
  pub fn apply(self) {
    match self {
      ColorMode::Always => owo_colors::set_override(true),
      ColorMode::Never => owo_colors::set_override(false),
      ColorMode::Auto => {}
    }
  }
}

fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}

pub fn format_url(url: &str) -> String {
  url.bright_green().to_string()
}

/// Table cell for an optional value
pub fn cell<T: ToString>(value: Option<T>) -> String {
  value.map(|value| value.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_cell_marks_missing_values() {
    assert_eq!(cell(Some("fred")), "fred");
    assert_eq!(cell(Some(5400)), "5400");
    assert_eq!(cell(None::<String>), "-");
  }
}
