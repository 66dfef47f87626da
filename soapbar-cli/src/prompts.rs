//! Prompts for login credentials.

use anyhow::{Context, Result};
use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

fn soapbar_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    ..ColorfulTheme::default()
  }
}

pub fn prompt_username() -> Result<String> {
  Input::with_theme(&soapbar_theme())
    .with_prompt("JIRA username")
    .interact_text()
    .context("Failed to read username")
}

pub fn prompt_password(username: &str) -> Result<String> {
  Password::with_theme(&soapbar_theme())
    .with_prompt(format!("Password for {username}"))
    .interact()
    .context("Failed to read password")
}
