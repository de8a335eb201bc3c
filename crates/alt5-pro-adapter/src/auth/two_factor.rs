/*
[INPUT]:  Login flow requesting a one-time code
[OUTPUT]: 2FA verification code string
[POS]:    Auth layer - injectable 2FA code source
[UPDATE]: When adding new code sources (TOTP, mailbox polling)
*/

use async_trait::async_trait;

use crate::http::Result;

/// Source of the two-factor code used to complete a login
///
/// The CLI implements this with a terminal prompt; tests use `StaticCode`.
#[async_trait]
pub trait TwoFactorProvider: Send + Sync {
    async fn code(&self) -> Result<String>;
}

/// Provider returning a predetermined code
#[derive(Debug, Clone)]
pub struct StaticCode {
    code: String,
}

impl StaticCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

#[async_trait]
impl TwoFactorProvider for StaticCode {
    async fn code(&self) -> Result<String> {
        Ok(self.code.clone())
    }
}
