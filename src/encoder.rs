//! Turns a [`HandlerResult`] into what the function hands back to Lambda.
//!
//! Two styles are supported. `Structured` answers every request with a proxy
//! response object. `MessagePrefix` returns bare success text and signals
//! everything else by failing the invocation with a classified message that
//! the gateway's error mapping understands.

use anyhow::bail;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use lambda_runtime::Diagnostic;
use lambda_runtime::tracing::error;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::models::{ClassifiedError, HandlerResult, OutboundResponse};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const LOCATION: &str = "Location";
pub const APPLICATION_JSON: &str = "application/json";

/// How results are expressed to the invoking layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseStyle {
    #[default]
    Structured,
    MessagePrefix,
}

impl FromStr for ResponseStyle {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structured" => Ok(Self::Structured),
            "message-prefix" | "message_prefix" => Ok(Self::MessagePrefix),
            other => bail!("Unknown response style: {other}"),
        }
    }
}

impl fmt::Display for ResponseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => f.write_str("structured"),
            Self::MessagePrefix => f.write_str("message-prefix"),
        }
    }
}

/// Encoded result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Response(OutboundResponse),
    Text(String),
    Raise(ClassifiedError),
}

impl ResponseStyle {
    #[must_use]
    pub fn encode(self, result: HandlerResult) -> Outcome {
        match self {
            Self::Structured => Outcome::Response(encode_structured(result)),
            Self::MessagePrefix => encode_message_prefix(result),
        }
    }
}

fn encode_structured(result: HandlerResult) -> OutboundResponse {
    match result {
        HandlerResult::JsonBody(body) => json_response(200, body),
        HandlerResult::BinaryBody {
            bytes,
            content_type,
        } => OutboundResponse {
            status_code: 200,
            headers: BTreeMap::from([(CONTENT_TYPE.to_string(), content_type)]),
            body: STANDARD.encode(bytes),
            is_base64_encoded: true,
        },
        HandlerResult::Redirect(url) | HandlerResult::Error(ClassifiedError::Redirect(url)) => {
            redirect_response(url)
        }
        HandlerResult::Error(err) => {
            let kind = err.kind();
            let body = json!({
                "errorType": kind.name(),
                "errorMessage": err.to_string(),
            });
            json_response(kind.status_code(), body.to_string())
        }
    }
}

fn encode_message_prefix(result: HandlerResult) -> Outcome {
    match result {
        HandlerResult::JsonBody(body) => Outcome::Text(body),
        HandlerResult::BinaryBody { bytes, .. } => Outcome::Text(STANDARD.encode(bytes)),
        HandlerResult::Redirect(url) => Outcome::Raise(ClassifiedError::Redirect(url)),
        HandlerResult::Error(err) => Outcome::Raise(err),
    }
}

fn json_response(status_code: u16, body: String) -> OutboundResponse {
    OutboundResponse {
        status_code,
        headers: BTreeMap::from([(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())]),
        body,
        is_base64_encoded: false,
    }
}

fn redirect_response(url: String) -> OutboundResponse {
    OutboundResponse {
        status_code: 302,
        headers: BTreeMap::from([(LOCATION.to_string(), url)]),
        body: String::new(),
        is_base64_encoded: false,
    }
}

impl Outcome {
    /// Converts into the Lambda handler's return value.
    ///
    /// # Errors
    ///
    /// Returns a `Diagnostic` carrying the classified message for `Raise`, or
    /// a `ServerError` diagnostic if the response cannot be serialized.
    pub fn into_lambda_result(self) -> Result<Value, Diagnostic> {
        match self {
            Self::Response(response) => serde_json::to_value(&response).map_err(|e| {
                error!(error = %e, "Failed to serialize response");
                Diagnostic::from(ClassifiedError::ServerError(
                    "Failed to serialize response".to_string(),
                ))
            }),
            Self::Text(text) => Ok(Value::String(text)),
            Self::Raise(err) => Err(err.into()),
        }
    }
}
