/*
[INPUT]:  Request timestamp, method, path, body and API private key
[OUTPUT]: Signed request headers (API-Key, API-Sign, API-Timestamp)
[POS]:    HTTP layer - request signing for API-key authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::http::{Alt5Error, Result};

type HmacSha512 = Hmac<Sha512>;

pub const HEADER_API_KEY: &str = "API-Key";
pub const HEADER_API_SIGN: &str = "API-Sign";
pub const HEADER_API_TIMESTAMP: &str = "API-Timestamp";

/// Signs frontoffice requests with an API key pair
#[derive(Clone)]
pub struct RequestSigner {
    public_key: String,
    private_key: String,
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl RequestSigner {
    /// Create a new request signer for the given key pair
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    /// Public key sent in the `API-Key` header
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign a request according to the ALT5 API key scheme
    ///
    /// Format: "{timestamp}{method}{path}{body}"
    /// Returns upper-case hex HMAC-SHA512 keyed by the private key
    pub fn sign_request(&self, timestamp: i64, method: &str, path: &str, body: &str) -> Result<String> {
        let message = format!("{timestamp}{method}{path}{body}");
        let mut mac = HmacSha512::new_from_slice(self.private_key.as_bytes())
            .map_err(|_| Alt5Error::Signature("invalid private key".to_string()))?;
        mac.update(message.as_bytes());
        Ok(hex::encode_upper(mac.finalize().into_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn signer() -> RequestSigner {
        RequestSigner::new("f37713f9-9130-4c7d-9490-164808d53741", "139209")
    }

    #[test]
    fn test_sign_request_is_deterministic() {
        let a = signer().sign_request(1_700_000_000_000, "GET", "/api/profile", "").unwrap();
        let b = signer().sign_request(1_700_000_000_000, "GET", "/api/profile", "").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sign_request_format() {
        let signature = signer().sign_request(1_700_000_000_000, "GET", "/api/profile", "").unwrap();
        assert_eq!(signature.len(), 128);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(signature, signature.to_ascii_uppercase());
    }

    #[test]
    fn test_sign_request_matches_manual_hmac() {
        let mut mac = HmacSha512::new_from_slice(b"139209").unwrap();
        mac.update(b"1700000000000POST/api/A1/order{\"a\":1}");
        let expected = hex::encode(mac.finalize().into_bytes()).to_uppercase();

        let signature = signer().sign_request(1_700_000_000_000, "POST", "/api/A1/order", r#"{"a":1}"#).unwrap();
        assert_eq!(signature, expected);
    }

    #[rstest]
    #[case(1_700_000_000_001, "GET", "/api/profile", "")]
    #[case(1_700_000_000_000, "POST", "/api/profile", "")]
    #[case(1_700_000_000_000, "GET", "/api/accounts", "")]
    #[case(1_700_000_000_000, "GET", "/api/profile", "{}")]
    fn test_sign_request_changes_with_any_input(
        #[case] timestamp: i64,
        #[case] method: &str,
        #[case] path: &str,
        #[case] body: &str,
    ) {
        let base = signer().sign_request(1_700_000_000_000, "GET", "/api/profile", "").unwrap();
        assert_ne!(signer().sign_request(timestamp, method, path, body).unwrap(), base);
    }

    #[test]
    fn test_sign_request_depends_on_key() {
        let other = RequestSigner::new("f37713f9-9130-4c7d-9490-164808d53741", "139210");
        assert_ne!(
            signer().sign_request(1, "GET", "/api/profile", "").unwrap(),
            other.sign_request(1, "GET", "/api/profile", "").unwrap()
        );
    }

    #[test]
    fn test_sign_request_accepts_empty_key() {
        let signer = RequestSigner::new("pub", "");
        let signature = signer.sign_request(1, "GET", "/api/profile", "");
        assert_eq!(signature.map(|s| s.len()).ok(), Some(128));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let rendered = format!("{:?}", signer());
        assert!(!rendered.contains("139209"));
        assert!(rendered.contains("<redacted>"));
    }
}
