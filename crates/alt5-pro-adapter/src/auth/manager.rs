/*
[INPUT]:  Login credentials, 2FA code provider and HTTP client
[OUTPUT]: Cookie session on the client plus a login outcome
[POS]:    Auth layer - orchestrates the email/password + 2FA flow
[UPDATE]: When auth endpoints or flow steps change
*/

use tracing::{debug, info, warn};

use crate::http::{Alt5Client, Alt5Error, Credentials, LoginStep, Result};
use crate::types::{LoginOutcome, SigninRequest, TwoFactorRequest};

use super::TwoFactorProvider;

const SIGNIN_PATH: &str = "/identity/api/v2/identity/exchange-users/users/signin/";
const TWO_FACTOR_PATH: &str = "/identity/api/v2/identity/exchange-users/users/signin/2fa";

/// Runs the two-step login on a client's cookie session
pub struct AuthManager {
    client: Alt5Client,
    two_factor: Option<Box<dyn TwoFactorProvider>>,
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("client", &self.client)
            .field("two_factor", &self.two_factor.is_some())
            .finish()
    }
}

impl AuthManager {
    /// Create an auth manager without a 2FA provider
    ///
    /// Logins must then pass the code explicitly.
    pub fn new(client: Alt5Client) -> Self {
        Self {
            client,
            two_factor: None,
        }
    }

    /// Create an auth manager asking `provider` for 2FA codes
    pub fn with_two_factor(client: Alt5Client, provider: Box<dyn TwoFactorProvider>) -> Self {
        Self {
            client,
            two_factor: Some(provider),
        }
    }

    /// Client carrying the session cookies
    pub fn client(&self) -> &Alt5Client {
        &self.client
    }

    pub fn into_client(self) -> Alt5Client {
        self.client
    }

    /// Step 1: email/password sign-in
    ///
    /// POST /identity/api/v2/identity/exchange-users/users/signin/
    pub async fn signin(&self) -> Result<LoginOutcome> {
        let (email, password) = match self.client.credentials() {
            Credentials::Login { email, password } => (email.clone(), password.clone()),
            Credentials::ApiKey { .. } => {
                return Err(Alt5Error::Config(
                    "Email and password required for credential login".to_string(),
                ));
            }
        };

        let body = SigninRequest { email, password };
        let response = self.client.post_json(SIGNIN_PATH, &body).await?;
        debug!(status = response.status, "signin response");

        Ok(LoginOutcome {
            success: response.status == 200,
            step: LoginStep::Signin,
            response,
            user_id: None,
        })
    }

    /// Step 2: confirm the 2FA code
    ///
    /// POST /identity/api/v2/identity/exchange-users/users/signin/2fa
    pub async fn confirm_two_factor(&self, code: &str) -> Result<LoginOutcome> {
        let body = TwoFactorRequest {
            verification_code: code.trim().to_string(),
        };
        let response = self.client.post_json(TWO_FACTOR_PATH, &body).await?;
        debug!(status = response.status, "2fa response");

        let success = response.status == 200;
        let user_id = if success { response.id_field(&["id"]) } else { None };

        Ok(LoginOutcome {
            success,
            step: LoginStep::TwoFactor,
            response,
            user_id,
        })
    }

    /// Complete login flow
    ///
    /// 1. Sign in with email/password
    /// 2. Take the 2FA code from `code`, else from the provider
    /// 3. Confirm the code
    ///
    /// A rejected step is reported in the outcome, not as an error.
    pub async fn login_with_credentials(&self, code: Option<&str>) -> Result<LoginOutcome> {
        let signin = self.signin().await?;
        if !signin.success {
            warn!(status = signin.response.status, "signin rejected");
            return Ok(signin);
        }
        info!("email/password accepted, confirming 2FA");

        let code = match code {
            Some(code) => code.to_string(),
            None => match &self.two_factor {
                Some(provider) => provider.code().await?,
                None => {
                    return Err(Alt5Error::Config(
                        "2FA code required but no code provider configured".to_string(),
                    ));
                }
            },
        };

        let outcome = self.confirm_two_factor(&code).await?;
        if outcome.success {
            info!(user_id = ?outcome.user_id, "login complete");
        } else {
            warn!(status = outcome.response.status, "2FA rejected");
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::auth::StaticCode;
    use crate::http::ClientConfig;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn login_client(server: &MockServer) -> Alt5Client {
        Alt5Client::with_config_and_base_url(
            ClientConfig::default(),
            &server.uri(),
            Credentials::login("trader@example.com", "pw"),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_login_rejects_api_key_credentials() {
        let client = Alt5Client::new(Credentials::api_key("pub", "priv")).unwrap();
        let auth_manager = AuthManager::new(client);

        let err = auth_manager
            .login_with_credentials(Some("123456"))
            .await
            .unwrap_err();

        assert!(matches!(err, Alt5Error::Config(_)));
    }

    #[tokio::test]
    async fn test_login_uses_provider_when_no_code_given() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SIGNIN_PATH))
            .and(body_json(serde_json::json!({
                "email": "trader@example.com",
                "password": "pw",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path(TWO_FACTOR_PATH))
            .and(body_json(serde_json::json!({"VerificationCode": "654321"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "user-77"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth_manager = AuthManager::with_two_factor(
            login_client(&server),
            Box::new(StaticCode::new("654321")),
        );
        let outcome = auth_manager.login_with_credentials(None).await.unwrap();

        assert!(outcome.success);
        assert_eq!(outcome.step, LoginStep::TwoFactor);
        assert_eq!(outcome.user_id.as_deref(), Some("user-77"));
    }

    #[tokio::test]
    async fn test_login_without_code_or_provider_is_config_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGNIN_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let auth_manager = AuthManager::new(login_client(&server));
        let err = auth_manager.login_with_credentials(None).await.unwrap_err();

        assert!(matches!(err, Alt5Error::Config(_)));
    }

    #[tokio::test]
    async fn test_signin_failure_skips_two_factor() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SIGNIN_PATH))
            .respond_with(ResponseTemplate::new(400).set_body_string("invalid credentials"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(TWO_FACTOR_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let auth_manager = AuthManager::new(login_client(&server));
        let outcome = auth_manager
            .login_with_credentials(Some("123456"))
            .await
            .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.step, LoginStep::Signin);
        assert_eq!(outcome.response.status, 400);
        assert_eq!(outcome.response.data.to_text(), "invalid credentials");
    }
}
