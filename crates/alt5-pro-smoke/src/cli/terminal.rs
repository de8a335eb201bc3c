/*
[INPUT]:  Terminal input
[OUTPUT]: 2FA codes and confirmations for the smoke scenario
[POS]:    Binary CLI layer - dialoguer-backed Prompter
[UPDATE]: When prompt wording or widgets change
*/

use alt5_pro_smoke::Prompter;
use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};

#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn two_factor_code(&self) -> Result<String> {
        println!(
            "\n{}",
            style("Please check your email or authenticator app for the 2FA code").cyan()
        );
        let code: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Enter 2FA code")
            .interact_text()
            .context("read 2FA code")?;
        Ok(code.trim().to_string())
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(question)
            .default(false)
            .interact()
            .context("read confirmation")
    }
}
