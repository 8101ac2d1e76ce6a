//! Function configuration, read from the Lambda environment.

use anyhow::{Context, Result, ensure};
use std::path::PathBuf;

use crate::encoder::ResponseStyle;
use crate::resources::is_absolute_http_url;

pub const RESPONSE_STYLE_VAR: &str = "RESPONSE_STYLE";
pub const BINARY_PATH_VAR: &str = "BINARY_PATH";
pub const BINARY_CONTENT_TYPE_VAR: &str = "BINARY_CONTENT_TYPE";
pub const BINARY_ASSET_FILE_VAR: &str = "BINARY_ASSET_FILE";
pub const REDIRECT_URL_VAR: &str = "REDIRECT_URL";

pub const DEFAULT_BINARY_PATH: &str = "/wms";
pub const DEFAULT_BINARY_CONTENT_TYPE: &str = "image/png";
pub const DEFAULT_REDIRECT_URL: &str = "https://example.com/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub style: ResponseStyle,
    /// Request path answered with the binary asset.
    pub binary_path: String,
    pub binary_content_type: String,
    /// Serve the asset from this file instead of the embedded PNG.
    pub asset_file: Option<PathBuf>,
    pub redirect_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            style: ResponseStyle::default(),
            binary_path: DEFAULT_BINARY_PATH.to_string(),
            binary_content_type: DEFAULT_BINARY_CONTENT_TYPE.to_string(),
            asset_file: None,
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
        }
    }
}

impl Config {
    /// Reads configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`. Unset or blank keys keep their default.
    ///
    /// # Errors
    ///
    /// Returns an error if `RESPONSE_STYLE` names an unknown style or
    /// `REDIRECT_URL` is not an absolute http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let style = get(RESPONSE_STYLE_VAR)
            .map(|v| v.parse::<ResponseStyle>())
            .transpose()
            .with_context(|| format!("Invalid {RESPONSE_STYLE_VAR}"))?
            .unwrap_or(defaults.style);

        let redirect_url = get(REDIRECT_URL_VAR).unwrap_or(defaults.redirect_url);
        ensure!(
            is_absolute_http_url(&redirect_url),
            "Invalid {REDIRECT_URL_VAR}: {redirect_url} is not an absolute http(s) URL"
        );

        Ok(Self {
            style,
            binary_path: get(BINARY_PATH_VAR).unwrap_or(defaults.binary_path),
            binary_content_type: get(BINARY_CONTENT_TYPE_VAR)
                .unwrap_or(defaults.binary_content_type),
            asset_file: get(BINARY_ASSET_FILE_VAR).map(PathBuf::from),
            redirect_url,
        })
    }
}
