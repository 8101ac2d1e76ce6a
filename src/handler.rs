use anyhow::{Context as _, Result};
use lambda_runtime::tracing::{debug, error, info, warn};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::config::Config;
use crate::encoder::ResponseStyle;
use crate::models::{ClassifiedError, GreetingResponse, HandlerResult, NormalizedRequest};
use crate::resources::{AssetSource, EmbeddedAsset, FileAsset, LinkProvider, StaticLink};

/// Query parameter holding the caller's name.
pub const NAME_PARAMETER: &str = "name";

/// `name` value that asks for a redirect instead of a greeting.
pub const REDIRECT_NAME: &str = "redirect";

pub const MISSING_NAME_MESSAGE: &str = "parameter 'name' not found";

/// Detail sent to the caller when handling panics. The panic itself is only logged.
pub const PANIC_DETAIL: &str = "Handler panicked";

/// Request handler. Immutable once built, so one instance serves every
/// invocation.
pub struct Handler {
    style: ResponseStyle,
    binary_path: String,
    binary_content_type: String,
    asset: Box<dyn AssetSource>,
    link: Box<dyn LinkProvider>,
}

impl Handler {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let asset: Box<dyn AssetSource> = match &config.asset_file {
            Some(path) => Box::new(FileAsset::new(path)),
            None => Box::new(EmbeddedAsset::default()),
        };

        Self {
            style: config.style,
            binary_path: config.binary_path.clone(),
            binary_content_type: config.binary_content_type.clone(),
            asset,
            link: Box::new(StaticLink::new(config.redirect_url.clone())),
        }
    }

    #[must_use]
    pub fn with_asset_source(mut self, asset: Box<dyn AssetSource>) -> Self {
        self.asset = asset;
        self
    }

    #[must_use]
    pub fn with_link_provider(mut self, link: Box<dyn LinkProvider>) -> Self {
        self.link = link;
        self
    }

    #[must_use]
    pub const fn with_style(mut self, style: ResponseStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn style(&self) -> ResponseStyle {
        self.style
    }

    /// Decides the result for one request.
    ///
    /// Never fails: errors and panics raised while handling are reported as
    /// `ServerError`.
    #[must_use]
    pub fn handle(&self, request: &NormalizedRequest) -> HandlerResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_handle(request))) {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                error!(error = %format!("{e:#}"), "Request handling failed");
                HandlerResult::Error(ClassifiedError::server(&e))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(panic = %message, "Request handling panicked");
                HandlerResult::Error(ClassifiedError::ServerError(
                    PANIC_DETAIL.to_string(),
                ))
            }
        }
    }

    fn try_handle(&self, request: &NormalizedRequest) -> Result<HandlerResult> {
        if request.resource_path.as_deref() == Some(self.binary_path.as_str()) {
            let bytes = self
                .asset
                .load()
                .context("Failed to load binary resource")?;
            debug!(size = bytes.len(), "Serving binary resource");
            return Ok(HandlerResult::BinaryBody {
                bytes: bytes.into_owned(),
                content_type: self.binary_content_type.clone(),
            });
        }

        let Some(name) = request.query_parameter(NAME_PARAMETER) else {
            warn!(message = "Missing name parameter");
            return Ok(HandlerResult::Error(ClassifiedError::BadRequest(
                MISSING_NAME_MESSAGE.to_string(),
            )));
        };

        if name == REDIRECT_NAME {
            let url = self
                .link
                .redirect_url()
                .context("Failed to resolve redirect target")?;
            return Ok(HandlerResult::Redirect(url));
        }

        let greeting = GreetingResponse {
            response: format!("Hello {name}"),
        };
        let body = serde_json::to_string(&greeting).context("Failed to serialize greeting")?;
        Ok(HandlerResult::JsonBody(body))
    }

    /// Runs one event through normalization, handling and encoding.
    ///
    /// # Errors
    ///
    /// In the message-prefix style, returns a `Diagnostic` whose message
    /// carries the classification. In either style, a response that cannot
    /// be serialized becomes a `ServerError` diagnostic.
    pub fn process(&self, event: &Value) -> Result<Value, Diagnostic> {
        let request = NormalizedRequest::from(event);
        debug!(
            method = ?request.method,
            path = ?request.resource_path,
            user_agent = ?request.header("User-Agent"),
            "Normalized request"
        );
        let result = self.handle(&request);
        self.style.encode(result).into_lambda_result()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

/// Lambda event handler for API Gateway proxy events.
/// Logs the full event when `RUST_LOG=debug/trace`, only `event_size` in production.
///
/// # Errors
///
/// Returns a `Diagnostic` with one of the following types:
///
/// - `BadRequest`: the `name` query parameter is missing
/// - `Redirect`: the caller should be redirected (message-prefix style only)
/// - `ServerError`: anything else went wrong
pub async fn function_handler(
    handler: &Handler,
    event: LambdaEvent<Value>,
) -> Result<Value, Diagnostic> {
    let (event_payload, context) = event.into_parts();

    debug!(event = ?event_payload, "Received event");
    let path = event_payload.get("path").and_then(Value::as_str);
    info!(
        request_id = %context.request_id,
        event_size = event_payload.to_string().len(),
        path = ?path,
        style = %handler.style(),
        "Handling request"
    );

    let outcome = handler.process(&event_payload);
    match &outcome {
        Ok(_) => debug!(message = "Request completed"),
        Err(diagnostic) => info!(
            error_type = %diagnostic.error_type,
            "Request completed with classified error"
        ),
    }
    outcome
}
