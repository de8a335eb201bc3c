/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public ALT5 Pro adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{AuthManager, SessionContext, SessionStage, StaticCode, TwoFactorProvider};

// Re-export commonly used types from http
pub use http::{
    Alt5Client,
    Alt5Error,
    ClientConfig,
    Credentials,
    LoginStep,
    RequestSigner,
    Result,
};

// Re-export all types
pub use types::*;

// Method type taken by `Alt5Client::request`
pub use reqwest::Method;
