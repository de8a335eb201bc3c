/*
[INPUT]:  HTTP client configuration, credentials and API endpoints
[OUTPUT]: Normalized HTTP responses and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod error;
pub mod public;
pub mod signature;
pub mod trade;
pub mod user;

pub use error::{Alt5Error, LoginStep, Result};
pub use signature::RequestSigner;

pub use client::{Alt5Client, ClientConfig, Credentials};
