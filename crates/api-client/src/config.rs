//! Client configuration.
//!
//! Native builds read `API_BASE_URL` (and optionally `API_ARRAY_FORMAT`) from
//! the environment, loading a `.env` file first. A missing base URL is an
//! error there. Browser builds take `API_BASE_URL` at compile time and fall
//! back to the current document URL.

use serde::Deserialize;

use crate::errors::ConfigError;
use crate::query::ArrayFormat;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every relative URI. Joined without inserting a separator.
    pub base_url: String,
    pub array_format: ArrayFormat,
}

/// Raw environment values, named after their variables minus the prefix.
#[derive(Debug, Default, Deserialize)]
struct Env {
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    array_format: ArrayFormat,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            array_format: ArrayFormat::default(),
        }
    }

    pub fn with_array_format(mut self, array_format: ArrayFormat) -> Self {
        self.array_format = array_format;
        self
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = Env {
            base_url: option_env!("API_BASE_URL").map(str::to_string),
            array_format: match option_env!("API_ARRAY_FORMAT") {
                Some("repeat") => ArrayFormat::Repeat,
                _ => ArrayFormat::Passthrough,
            },
        };
        Self::resolve(env, document_url)
    }

    /// Builds a config from `API_`-prefixed variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env: Env = envy::prefixed("API_").from_iter(vars)?;
        Self::resolve(env, || None)
    }

    fn resolve(env: Env, fallback: impl FnOnce() -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = env
            .base_url
            .filter(|url| !url.is_empty())
            .or_else(fallback)
            .ok_or(ConfigError::MissingBaseUrl)?;

        Ok(Self {
            base_url,
            array_format: env.array_format,
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn document_url() -> Option<String> {
    web_sys::window()?.document()?.url().ok()
}
