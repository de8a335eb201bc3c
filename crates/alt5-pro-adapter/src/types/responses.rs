/*
[INPUT]:  Raw HTTP status and body text
[OUTPUT]: Normalized API responses and typed decode helpers
[POS]:    Data layer - response envelope shared by every endpoint
[UPDATE]: When response normalization or outcome types change
*/

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{Alt5Error, Result};

/// Response body, parsed as JSON when possible
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseData {
    Json(Value),
    /// Raw body kept when it is not valid JSON
    Text(String),
}

impl ResponseData {
    /// Parse a body, falling back to raw text
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ResponseData::Json(value),
            Err(err) => {
                tracing::debug!(error = %err, "non-JSON response body");
                ResponseData::Text(body.to_string())
            }
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ResponseData::Json(value) => Some(value),
            ResponseData::Text(_) => None,
        }
    }

    /// Empty JSON (null, "", [], {}) or empty text
    pub fn is_empty(&self) -> bool {
        match self {
            ResponseData::Json(Value::Null) => true,
            ResponseData::Json(Value::String(s)) => s.is_empty(),
            ResponseData::Json(Value::Array(items)) => items.is_empty(),
            ResponseData::Json(Value::Object(map)) => map.is_empty(),
            ResponseData::Json(_) => false,
            ResponseData::Text(text) => text.trim().is_empty(),
        }
    }

    /// Body rendered back to text, for diagnostics and error payloads
    pub fn to_text(&self) -> String {
        match self {
            ResponseData::Json(value) => value.to_string(),
            ResponseData::Text(text) => text.clone(),
        }
    }
}

/// Normalized response: `success` is `status < 400`
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub status: u16,
    pub data: ResponseData,
}

impl ApiResponse {
    pub fn from_parts(status: StatusCode, body: &str) -> Self {
        Self {
            success: status.as_u16() < 400,
            status: status.as_u16(),
            data: ResponseData::parse(body),
        }
    }

    /// Turn a failing response into `Alt5Error::Request`
    pub fn error_for_status(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Alt5Error::Request {
                status: self.status,
                body: self.data.to_text(),
            })
        }
    }

    /// Decode the JSON body into a typed model
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        match &self.data {
            ResponseData::Json(value) => serde_json::from_value(value.clone())
                .map_err(|err| Alt5Error::Parse(format!("unexpected response shape: {err}"))),
            ResponseData::Text(text) => Err(Alt5Error::Parse(format!(
                "response is not JSON (status {}): {}",
                self.status, text
            ))),
        }
    }

    /// First of `keys` present on the JSON object body, as a string
    ///
    /// Ids arrive as either strings or numbers.
    pub fn id_field(&self, keys: &[&str]) -> Option<String> {
        let object = self.data.as_json()?.as_object()?;
        keys.iter().find_map(|key| object.get(*key).and_then(value_as_id))
    }
}

pub(crate) fn value_as_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// What an accounts lookup established about the account id
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountResolution {
    Resolved(String),
    /// Request succeeded but listed no account with an id
    NoAccounts,
    /// Request itself failed
    RequestFailed { status: u16 },
}

/// Result of `GET /api/accounts`
#[derive(Debug, Clone, PartialEq)]
pub struct AccountsOutcome {
    pub response: ApiResponse,
    /// Id of the first listed account
    pub account_id: Option<String>,
}

impl AccountsOutcome {
    pub fn from_response(response: ApiResponse) -> Self {
        let account_id = if response.success {
            first_account_id(&response.data)
        } else {
            None
        };
        Self {
            response,
            account_id,
        }
    }

    pub fn resolution(&self) -> AccountResolution {
        match (&self.account_id, self.response.success) {
            (Some(id), _) => AccountResolution::Resolved(id.clone()),
            (None, true) => AccountResolution::NoAccounts,
            (None, false) => AccountResolution::RequestFailed {
                status: self.response.status,
            },
        }
    }
}

fn first_account_id(data: &ResponseData) -> Option<String> {
    let first = match data.as_json()? {
        Value::Array(items) => items.first()?,
        object @ Value::Object(_) => object,
        _ => return None,
    };
    first.get("id").and_then(value_as_id)
}

/// Result of the two-step login
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub success: bool,
    /// Step whose response is carried in `response`
    pub step: crate::http::LoginStep,
    pub response: ApiResponse,
    /// `id` returned by a successful 2FA confirmation
    pub user_id: Option<String>,
}

impl LoginOutcome {
    /// Turn a failed login into `Alt5Error::Auth`
    pub fn into_result(self) -> Result<Self> {
        if self.success {
            Ok(self)
        } else {
            Err(Alt5Error::Auth {
                step: self.step,
                status: self.response.status,
                body: self.response.data.to_text(),
            })
        }
    }
}
