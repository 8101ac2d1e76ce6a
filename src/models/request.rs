//! Typed view of an API Gateway proxy event.

use serde_json::Value;
use std::collections::HashMap;

use crate::utils::{string_field, string_map};

/// The parts of a proxy event the handler looks at.
///
/// Built with [`NormalizedRequest::from_event`], which never fails: anything
/// missing becomes `None` or an empty map. Required fields are checked by the
/// handler at the point it needs them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedRequest {
    pub method: Option<String>,
    /// Concrete request path (`path`).
    pub resource_path: Option<String>,
    /// Resource template the gateway matched (`resource`).
    pub resource: Option<String>,
    pub query_parameters: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl NormalizedRequest {
    /// Reads a proxy event. Unrecognized keys are ignored.
    #[must_use]
    pub fn from_event(event: &Value) -> Self {
        let body = match event.get("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            method: string_field(event, "httpMethod"),
            resource_path: string_field(event, "path"),
            resource: string_field(event, "resource"),
            query_parameters: string_map(event, "queryStringParameters"),
            headers: string_map(event, "headers"),
            body,
        }
    }

    /// Looks up a query parameter. An empty value counts as present.
    #[must_use]
    pub fn query_parameter(&self, name: &str) -> Option<&str> {
        self.query_parameters.get(name).map(String::as_str)
    }

    /// Looks up a header, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

impl From<&Value> for NormalizedRequest {
    fn from(event: &Value) -> Self {
        Self::from_event(event)
    }
}
