/*
[INPUT]:  HTTP configuration (environment, timeouts) and credentials
[OUTPUT]: Cookie-backed reqwest client issuing normalized API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::time::Duration;

use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use tracing::debug;
use url::form_urlencoded;

use crate::http::signature::{HEADER_API_KEY, HEADER_API_SIGN, HEADER_API_TIMESTAMP};
use crate::http::{Alt5Error, RequestSigner, Result};
use crate::types::{ApiResponse, Environment};

/// Prefix of the authenticated account/trading API
const FRONTOFFICE_PREFIX: &str = "/frontoffice";
/// Prefix of the public market data API
const MARKETDATA_PREFIX: &str = "/marketdata";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub environment: Environment,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            environment: Environment::Production,
        }
    }
}

/// Authentication variant; exactly one is active per client
#[derive(Clone)]
pub enum Credentials {
    /// Email/password login followed by 2FA; requests ride on session cookies
    Login { email: String, password: String },
    /// API key pair; every request is HMAC signed
    ApiKey {
        public_key: String,
        private_key: String,
    },
}

impl Credentials {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Login {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn api_key(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Credentials::ApiKey {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credentials::Login { .. } => "login",
            Credentials::ApiKey { .. } => "api_key",
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Login { email, .. } => f
                .debug_struct("Login")
                .field("email", email)
                .field("password", &"<redacted>")
                .finish(),
            Credentials::ApiKey { public_key, .. } => f
                .debug_struct("ApiKey")
                .field("public_key", public_key)
                .field("private_key", &"<redacted>")
                .finish(),
        }
    }
}

/// Main HTTP client for the ALT5 Pro API
///
/// Owns the cookie store, so one client is one session. Calls are meant to be
/// awaited one at a time.
#[derive(Debug)]
pub struct Alt5Client {
    http_client: Client,
    base_url: Url,
    credentials: Credentials,
    signer: Option<RequestSigner>,
}

impl Alt5Client {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credentials)
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        let base_url = config.environment.base_url();
        Self::with_config_and_base_url(config, base_url, credentials)
    }

    /// Create a client against an explicit base URL (mock servers, proxies)
    pub fn with_config_and_base_url(
        config: ClientConfig,
        base_url: &str,
        credentials: Credentials,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .cookie_store(true)
            .build()?;

        let signer = match &credentials {
            Credentials::ApiKey {
                public_key,
                private_key,
            } => Some(RequestSigner::new(public_key.clone(), private_key.clone())),
            Credentials::Login { .. } => None,
        };

        Ok(Self {
            http_client,
            base_url: Url::parse(base_url.trim_end_matches('/'))?,
            credentials,
            signer,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Signature for a frontoffice request
    ///
    /// Empty when the client holds login credentials.
    pub fn sign_request(&self, timestamp: i64, method: &Method, path: &str, body: &str) -> Result<String> {
        match &self.signer {
            Some(signer) => signer.sign_request(timestamp, method.as_str(), path, body),
            None => Ok(String::new()),
        }
    }

    /// Reject methods `request` does not issue (anything but GET, POST, DELETE)
    pub fn check_method(method: &Method) -> Result<()> {
        if matches!(*method, Method::GET | Method::POST | Method::DELETE) {
            Ok(())
        } else {
            Err(Alt5Error::UnsupportedMethod(method.to_string()))
        }
    }

    /// Issue a frontoffice call and normalize the response
    ///
    /// `endpoint` is relative to `/frontoffice` (e.g. `/api/profile`) and is
    /// also the signed path. Statuses >= 400 come back as `success = false`,
    /// not as errors. A body is signed for every method but only sent on POST.
    pub async fn request<B>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        Self::check_method(&method)?;

        let url = self.frontoffice_url(endpoint)?;
        let body = match body {
            Some(body) => serde_json::to_string(body)?,
            None => String::new(),
        };

        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .header(CONTENT_TYPE, "application/json");

        if let Some(signer) = &self.signer {
            let timestamp = Utc::now().timestamp_millis();
            let signature = signer.sign_request(timestamp, method.as_str(), endpoint, &body)?;
            builder = builder
                .header(HEADER_API_KEY, signer.public_key())
                .header(HEADER_API_SIGN, signature)
                .header(HEADER_API_TIMESTAMP, timestamp.to_string());
            debug!("using API key authentication");
        } else {
            debug!("using cookie-based authentication");
        }

        if method == Method::POST && !body.is_empty() {
            builder = builder.body(body);
        }

        debug!(%method, %url, "sending request");
        self.send(builder).await
    }

    /// `request` without a body
    pub async fn request_empty(&self, method: Method, endpoint: &str) -> Result<ApiResponse> {
        self.request::<serde_json::Value>(method, endpoint, None).await
    }

    /// Unauthenticated GET against the market data API
    pub(crate) async fn marketdata_get(&self, endpoint: &str) -> Result<ApiResponse> {
        let url = self.prefixed_url(MARKETDATA_PREFIX, endpoint)?;
        debug!(%url, "sending market data request");
        self.send(self.http_client.get(url)).await
    }

    /// JSON POST on the session, outside the frontoffice prefix
    pub(crate) async fn post_json<B>(&self, path: &str, body: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.prefixed_url("", path)?;
        debug!(%url, "sending session request");
        self.send(self.http_client.post(url).json(body)).await
    }

    async fn send(&self, builder: RequestBuilder) -> Result<ApiResponse> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let result = ApiResponse::from_parts(status, &text);
        debug!(status = result.status, success = result.success, body = %text, "response received");
        Ok(result)
    }

    fn frontoffice_url(&self, endpoint: &str) -> Result<Url> {
        self.prefixed_url(FRONTOFFICE_PREFIX, endpoint)
    }

    fn prefixed_url(&self, prefix: &str, endpoint: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let url = format!("{base}{prefix}{endpoint}");
        Ok(Url::parse(&url)?)
    }
}

/// Percent-encode a value for use as one path segment or query value
///
/// Endpoints are signed as built, so the encoded form is also what gets signed.
pub(crate) fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_key_client() -> Alt5Client {
        Alt5Client::with_config_and_base_url(
            ClientConfig::default(),
            "http://localhost:9",
            Credentials::api_key("pub", "secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_frontoffice_url_keeps_query() {
        let client = api_key_client();
        let url = client.frontoffice_url("/api/A1/orders?market=xrp_usd").unwrap();
        assert_eq!(url.path(), "/frontoffice/api/A1/orders");
        assert_eq!(url.query(), Some("market=xrp_usd"));
    }

    #[test]
    fn test_environment_selects_base_url() {
        let config = ClientConfig {
            environment: Environment::Sandbox,
            ..ClientConfig::default()
        };
        let client = Alt5Client::with_config(config, Credentials::login("a@b.c", "pw")).unwrap();
        assert_eq!(client.base_url().host_str(), Some("exchange.digitalpaydev.com"));
    }

    #[test]
    fn test_sign_request_empty_for_login_credentials() {
        let client = Alt5Client::new(Credentials::login("a@b.c", "pw")).unwrap();
        assert!(client.sign_request(1, &Method::GET, "/api/profile", "").unwrap().is_empty());
        assert_eq!(
            api_key_client()
                .sign_request(1, &Method::GET, "/api/profile", "")
                .unwrap()
                .len(),
            128
        );
    }

    #[test]
    fn test_credentials_debug_redacts_secrets() {
        let rendered = format!("{:?}", Credentials::login("a@b.c", "hunter2"));
        assert!(!rendered.contains("hunter2"));
        let rendered = format!("{:?}", Credentials::api_key("pub", "s3cret"));
        assert!(!rendered.contains("s3cret"));
    }

    #[test]
    fn test_check_method() {
        assert!(Alt5Client::check_method(&Method::GET).is_ok());
        assert!(Alt5Client::check_method(&Method::DELETE).is_ok());
        let err = Alt5Client::check_method(&Method::PATCH).unwrap_err();
        assert!(matches!(err, Alt5Error::UnsupportedMethod(ref m) if m == "PATCH"));
    }

    #[test]
    fn test_encode_component_escapes_url_delimiters() {
        assert_eq!(encode_component("xrp_usd"), "xrp_usd");
        assert_eq!(encode_component("a#b&c=d"), "a%23b%26c%3Dd");
        assert_eq!(encode_component("x/y z+"), "x%2Fy%20z%2B");
    }

    #[test]
    fn test_encoded_query_survives_url_parsing() {
        let client = api_key_client();
        let endpoint = format!("/api/A1/orders?market={}", encode_component("a#b"));
        let url = client.frontoffice_url(&endpoint).unwrap();
        assert_eq!(url.fragment(), None);
        assert_eq!(url.query(), Some("market=a%23b"));
    }

    #[tokio::test]
    async fn test_request_rejects_unsupported_method() {
        let client = api_key_client();
        let err = client
            .request_empty(Method::PUT, "/api/profile")
            .await
            .unwrap_err();
        assert!(matches!(err, Alt5Error::UnsupportedMethod(ref m) if m == "PUT"));
    }
}
