use anyhow::{Result, ensure};

/// Produces the target of a redirect, e.g. a pre-signed storage URL.
pub trait LinkProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if no link can be produced.
    fn redirect_url(&self) -> Result<String>;
}

/// A fixed, pre-configured link.
#[derive(Debug, Clone)]
pub struct StaticLink {
    url: String,
}

impl StaticLink {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl LinkProvider for StaticLink {
    fn redirect_url(&self) -> Result<String> {
        ensure!(!self.url.is_empty(), "No redirect URL configured");
        ensure!(
            is_absolute_http_url(&self.url),
            "Redirect URL is not an absolute http(s) URL"
        );
        Ok(self.url.clone())
    }
}

/// Whether `url` is an `http://` or `https://` URL with a host.
///
/// The message-prefix style raises a redirect as the bare URL, and the
/// gateway only maps messages with these schemes to a 302.
#[must_use]
pub fn is_absolute_http_url(url: &str) -> bool {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .and_then(|rest| rest.split(['/', '?', '#']).next())
        .is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
}
