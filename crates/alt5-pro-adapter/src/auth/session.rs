/*
[INPUT]:  Login and accounts outcomes
[OUTPUT]: Explicit session identity and its stage
[POS]:    Auth layer - caller-owned identity threaded between calls
[UPDATE]: When adding identity fields or stages
*/

use crate::types::{AccountsOutcome, ApiResponse, LoginOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SessionStage {
    Unauthenticated,
    Authenticated,
    AccountResolved,
}

/// Identity discovered from server responses
///
/// Owned by the caller; later failures never clear earlier facts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    authenticated: bool,
    user_id: Option<String>,
    account_id: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SessionStage {
        if self.account_id.is_some() {
            SessionStage::AccountResolved
        } else if self.authenticated {
            SessionStage::Authenticated
        } else {
            SessionStage::Unauthenticated
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Record a login attempt
    pub fn record_login(&mut self, outcome: &LoginOutcome) {
        if outcome.success {
            self.authenticated = true;
            if outcome.user_id.is_some() {
                self.user_id = outcome.user_id.clone();
            }
        }
    }

    /// Record an API-key call; a successful one proves the key
    pub fn record_signed_response(&mut self, response: &ApiResponse) {
        if response.success {
            self.authenticated = true;
        }
    }

    /// Record an accounts lookup
    pub fn record_accounts(&mut self, outcome: &AccountsOutcome) {
        self.record_signed_response(&outcome.response);
        if let Some(id) = &outcome.account_id {
            self.account_id = Some(id.clone());
        }
    }
}
