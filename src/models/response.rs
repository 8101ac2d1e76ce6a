use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::ClassifiedError;

/// Structured proxy response. Serializes to the shape API Gateway expects
/// back from a proxy integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

impl OutboundResponse {
    /// Looks up a header, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// What the handler decided, before any encoding style is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    JsonBody(String),
    BinaryBody { bytes: Vec<u8>, content_type: String },
    Redirect(String),
    Error(ClassifiedError),
}

/// Body of a successful greeting.
#[derive(Debug, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub response: String,
}
