/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for alt5-pro-adapter tests

use alt5_pro_adapter::{Alt5Client, ClientConfig, Credentials, RequestSigner};
use wiremock::{Match, MockServer, Request};

pub const TEST_PUBLIC_KEY: &str = "f37713f9-9130-4c7d-9490-164808d53741";
pub const TEST_PRIVATE_KEY: &str = "139209";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client signing with the test API key pair
#[allow(dead_code)]
pub fn api_key_client(server: &MockServer) -> Alt5Client {
    Alt5Client::with_config_and_base_url(
        ClientConfig::default(),
        &server.uri(),
        Credentials::api_key(TEST_PUBLIC_KEY, TEST_PRIVATE_KEY),
    )
    .expect("client init")
}

/// Client relying on login cookies
#[allow(dead_code)]
pub fn login_client(server: &MockServer) -> Alt5Client {
    Alt5Client::with_config_and_base_url(
        ClientConfig::default(),
        &server.uri(),
        Credentials::login("trader@example.com", "correct-horse"),
    )
    .expect("client init")
}

/// Matches requests whose API-Sign header is valid for their own
/// timestamp, method, frontoffice-relative path and body
#[allow(dead_code)]
pub struct ValidSignature {
    signer: RequestSigner,
}

#[allow(dead_code)]
impl ValidSignature {
    pub fn new(private_key: &str) -> Self {
        Self {
            signer: RequestSigner::new(TEST_PUBLIC_KEY, private_key),
        }
    }
}

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let header = |name: &str| {
            request
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        let (Some(sign), Some(timestamp)) = (header("API-Sign"), header("API-Timestamp")) else {
            return false;
        };
        let Ok(timestamp) = timestamp.parse::<i64>() else {
            return false;
        };

        let path = request
            .url
            .path()
            .strip_prefix("/frontoffice")
            .unwrap_or(request.url.path())
            .to_string();
        let path = match request.url.query() {
            Some(query) => format!("{path}?{query}"),
            None => path,
        };
        let body = String::from_utf8_lossy(&request.body);

        self.signer
            .sign_request(timestamp, request.method.as_str(), &path, &body)
            .is_ok_and(|expected| expected == sign)
    }
}
