//! Endpoint descriptors and domain key extraction.

use std::collections::HashMap;

use http::header::{HeaderName, HeaderValue};
use http::Method;
use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult};

/// One endpoint as written in a configuration file.
///
/// Every field is optional here so that validation, not the parser,
/// reports which required field is missing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub url: Option<String>,
    pub method: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

/// A validated, immutable health check target.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
    pub method: Method,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl EndpointConfig {
    /// Validate this entry into an [`Endpoint`].
    ///
    /// `index` is the zero-based position in the config file and only
    /// appears in error messages for entries that have no name yet.
    pub fn validate(self, index: usize) -> ConfigResult<Endpoint> {
        let name = required(self.name, index, "name")?;
        let url = required(self.url, index, "url")?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl { name, url });
        }

        let raw_method = self.method.unwrap_or_else(|| "GET".to_string());
        let method = parse_method(&raw_method).ok_or_else(|| ConfigError::InvalidMethod {
            name: name.clone(),
            method: raw_method.clone(),
        })?;

        let headers = self.headers.unwrap_or_default();
        for (key, value) in &headers {
            let valid = HeaderName::from_bytes(key.as_bytes()).is_ok()
                && HeaderValue::from_str(value).is_ok();
            if !valid {
                return Err(ConfigError::InvalidHeader {
                    name,
                    header: key.clone(),
                });
            }
        }

        Ok(Endpoint {
            name,
            url,
            method,
            headers,
            body: self.body,
        })
    }
}

impl Endpoint {
    /// Aggregation key for this endpoint. See [`domain_of`].
    pub fn domain(&self) -> &str {
        domain_of(&self.url)
    }
}

/// Extract the domain key from a URL.
///
/// This is the segment between the first and second `/` after the
/// scheme, taken verbatim: user-info and ports are kept as part of the
/// key. Returns an empty string for URLs without a `//`.
pub fn domain_of(url: &str) -> &str {
    url.split('/').nth(2).unwrap_or_default()
}

fn required(value: Option<String>, index: usize, field: &'static str) -> ConfigResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingField { index, field }),
    }
}

/// Upper-case and parse an HTTP method. Only ASCII letters are accepted.
fn parse_method(raw: &str) -> Option<Method> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Method::from_bytes(raw.to_ascii_uppercase().as_bytes()).ok()
}
