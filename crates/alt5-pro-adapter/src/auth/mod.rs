/*
[INPUT]:  Login credentials and 2FA code sources
[OUTPUT]: Authenticated sessions, login outcomes and auth errors
[POS]:    Auth layer - handles ALT5 email/password + 2FA login
[UPDATE]: When auth flow or code sources change
*/

pub mod manager;
pub mod session;
pub mod two_factor;

pub use manager::AuthManager;
pub use session::{SessionContext, SessionStage};
pub use two_factor::{StaticCode, TwoFactorProvider};
