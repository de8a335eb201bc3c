/*
[INPUT]:  Questions raised by the smoke scenario
[OUTPUT]: 2FA codes and yes/no answers
[POS]:    Interaction seam - terminal in the binary, scripted in tests
[UPDATE]: When the scenario asks new questions
*/

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use alt5_pro_adapter::{Alt5Error, TwoFactorProvider};
use anyhow::Result;
use async_trait::async_trait;

/// Answers the scenario's interactive questions
///
/// Implementations may block on terminal input; async callers go through
/// `ask_two_factor_code` and `ask_confirm`, which run them on the blocking pool.
pub trait Prompter: Send + Sync {
    /// One-time code for the 2FA step
    fn two_factor_code(&self) -> Result<String>;

    /// Yes/no confirmation; `false` means skip
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Prompter with pre-supplied answers
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    codes: Mutex<VecDeque<String>>,
    confirm: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(codes: &[&str], confirm: bool) -> Self {
        Self {
            codes: Mutex::new(codes.iter().map(|c| c.to_string()).collect()),
            confirm,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Confirmation questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn two_factor_code(&self) -> Result<String> {
        let mut codes = self
            .codes
            .lock()
            .map_err(|_| anyhow::anyhow!("prompter state poisoned"))?;
        codes
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no scripted 2FA code left"))
    }

    fn confirm(&self, question: &str) -> Result<bool> {
        if let Ok(mut asked) = self.asked.lock() {
            asked.push(question.to_string());
        }
        Ok(self.confirm)
    }
}

/// `Prompter::two_factor_code` off the async worker threads
pub async fn ask_two_factor_code(prompter: &Arc<dyn Prompter>) -> Result<String> {
    let prompter = Arc::clone(prompter);
    tokio::task::spawn_blocking(move || prompter.two_factor_code()).await?
}

/// `Prompter::confirm` off the async worker threads
pub async fn ask_confirm(prompter: &Arc<dyn Prompter>, question: &str) -> Result<bool> {
    let prompter = Arc::clone(prompter);
    let question = question.to_string();
    tokio::task::spawn_blocking(move || prompter.confirm(&question)).await?
}

/// Feeds a `Prompter` into the adapter's login flow
pub struct PromptTwoFactor {
    prompter: Arc<dyn Prompter>,
}

impl PromptTwoFactor {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }
}

#[async_trait]
impl TwoFactorProvider for PromptTwoFactor {
    async fn code(&self) -> alt5_pro_adapter::Result<String> {
        ask_two_factor_code(&self.prompter)
            .await
            .map_err(|err| Alt5Error::Config(format!("2FA code unavailable: {err}")))
    }
}
