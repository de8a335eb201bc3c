/*
[INPUT]:  Settings, one credential variant and a prompter
[OUTPUT]: Authenticated client plus its explicit session identity
[POS]:    Session setup - client construction, login, account resolution
[UPDATE]: When the authentication or account lookup flow changes
*/

use std::sync::Arc;

use alt5_pro_adapter::{
    AccountResolution, Alt5Client, AuthManager, Credentials, SessionContext,
};
use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::config::Settings;
use crate::prompt::{PromptTwoFactor, Prompter};

/// Client bound to one session, with what is known about its identity
#[derive(Debug)]
pub struct Connection {
    pub client: Alt5Client,
    pub session: SessionContext,
}

/// Build a client for `credentials` against the configured endpoint
pub fn build_client(settings: &Settings, credentials: Credentials) -> Result<Alt5Client> {
    Alt5Client::with_config_and_base_url(settings.client_config(), settings.base_url(), credentials)
        .with_context(|| format!("create client for {}", settings.base_url()))
}

/// Create a client and, for email/password credentials, log in
///
/// API-key clients need no login; they are only proven by a successful call.
pub async fn connect(
    settings: &Settings,
    credentials: Credentials,
    prompter: Arc<dyn Prompter>,
    two_fa_code: Option<&str>,
) -> Result<Connection> {
    let client = build_client(settings, credentials)?;
    let mut session = SessionContext::new();

    if matches!(client.credentials(), Credentials::ApiKey { .. }) {
        return Ok(Connection { client, session });
    }

    let auth = AuthManager::with_two_factor(client, Box::new(PromptTwoFactor::new(prompter)));
    let outcome = auth
        .login_with_credentials(two_fa_code)
        .await
        .context("login request")?;
    session.record_login(&outcome);
    outcome.into_result().context("login")?;

    let client = auth.into_client();
    Ok(Connection { client, session })
}

/// Look up the trading account and record it on the session
pub async fn resolve_account(client: &Alt5Client, session: &mut SessionContext) -> Result<String> {
    let outcome = client.get_accounts().await.context("accounts request")?;
    session.record_accounts(&outcome);

    match outcome.resolution() {
        AccountResolution::Resolved(id) => {
            info!(account_id = %id, "account resolved");
            Ok(id)
        }
        AccountResolution::NoAccounts => {
            warn!("accounts request succeeded without any account id");
            bail!("no account listed for these credentials")
        }
        AccountResolution::RequestFailed { status } => {
            bail!(
                "accounts request failed with status {status}: {}",
                outcome.response.data.to_text()
            )
        }
    }
}

/// `connect` followed by `resolve_account`
pub async fn connect_with_account(
    settings: &Settings,
    credentials: Credentials,
    prompter: Arc<dyn Prompter>,
    two_fa_code: Option<&str>,
) -> Result<(Connection, String)> {
    let mut connection = connect(settings, credentials, prompter, two_fa_code).await?;
    let account_id = resolve_account(&connection.client, &mut connection.session).await?;
    Ok((connection, account_id))
}
