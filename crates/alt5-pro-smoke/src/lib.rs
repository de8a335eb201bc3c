/*
[INPUT]:  Public API exports for the alt5-pro-smoke crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point shared by the binary and tests
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod prompt;
pub mod scenario;
pub mod session;

pub use config::{Settings, TestOrderConfig};
pub use prompt::{PromptTwoFactor, Prompter, ScriptedPrompter, ask_confirm, ask_two_factor_code};
pub use scenario::{AuthMethod, FailureHint, OrderCheck, ScenarioOptions, ScenarioReport, run_scenario};
pub use session::{Connection, build_client, connect, connect_with_account, resolve_account};
