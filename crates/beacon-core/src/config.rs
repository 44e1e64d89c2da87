//! Endpoint configuration loader.
//!
//! Accepts YAML, TOML, or JSON. The document is either a bare list of
//! endpoints or a table with an `endpoints` list:
//!
//! ```yaml
//! - name: fetch index page
//!   url: https://fetch.com/
//!   headers:
//!     user-agent: fetch-synthetic-monitor
//! ```
//!
//! ```toml
//! [[endpoints]]
//! name = "fetch index page"
//! url = "https://fetch.com/"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::endpoint::{Endpoint, EndpointConfig};
use crate::error::{ConfigError, ConfigResult};

/// On-disk configuration syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension. Anything unrecognised is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    fn label(self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// The table shape: `endpoints = [...]`.
#[derive(Debug, Deserialize)]
struct EndpointsTable {
    endpoints: Vec<EndpointConfig>,
}

/// The validated set of endpoints to monitor, in declared order.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub endpoints: Vec<Endpoint>,
}

impl MonitorConfig {
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parse and validate a configuration document.
    pub fn parse(content: &str, format: ConfigFormat) -> ConfigResult<Self> {
        let parse_err = |message: String| ConfigError::Parse {
            format: format.label(),
            message,
        };

        // Peek at the top-level shape, then deserialize that shape
        // directly so the parser's own message (with location) survives.
        let entries: Vec<EndpointConfig> = match format {
            ConfigFormat::Yaml => {
                let shape: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                let parsed = if shape.is_mapping() {
                    serde_yaml::from_str::<EndpointsTable>(content).map(|t| t.endpoints)
                } else {
                    serde_yaml::from_str(content)
                };
                parsed.map_err(|e| parse_err(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str::<EndpointsTable>(content)
                .map(|t| t.endpoints)
                .map_err(|e| parse_err(e.to_string()))?,
            ConfigFormat::Json => {
                let shape: serde_json::Value = serde_json::from_str(content).map_err(|e| parse_err(e.to_string()))?;
                let parsed = if shape.is_object() {
                    serde_json::from_str::<EndpointsTable>(content).map(|t| t.endpoints)
                } else {
                    serde_json::from_str(content)
                };
                parsed.map_err(|e| parse_err(e.to_string()))?
            }
        };

        let endpoints = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| entry.validate(index))
            .collect::<ConfigResult<Vec<_>>>()?;

        if endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        Ok(MonitorConfig { endpoints })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;

    const SAMPLE_YAML: &str = r#"
- headers:
    user-agent: fetch-synthetic-monitor
  method: GET
  name: fetch index page
  url: https://fetch.com/
- body: '{"foo":"bar"}'
  headers:
    content-type: application/json
    user-agent: fetch-synthetic-monitor
  method: post
  name: fetch some fake post endpoint
  url: https://fetch.com/some/post/endpoint
- name: fetch rewards index page
  url: https://www.fetchrewards.com/
"#;

    #[test]
    fn parse_yaml_list() {
        let config = MonitorConfig::parse(SAMPLE_YAML, ConfigFormat::Yaml).unwrap();
        assert_eq!(config.endpoints.len(), 3);

        let post = &config.endpoints[1];
        assert_eq!(post.method, Method::POST);
        assert_eq!(post.body.as_deref(), Some(r#"{"foo":"bar"}"#));
        assert_eq!(post.headers["content-type"], "application/json");

        // Declared order is preserved.
        assert_eq!(config.endpoints[2].name, "fetch rewards index page");
        assert_eq!(config.endpoints[2].method, Method::GET);
    }

    #[test]
    fn parse_toml_table() {
        let toml_str = r#"
[[endpoints]]
name = "index"
url = "https://example.com/"

[[endpoints]]
name = "health"
url = "https://api.example.com/health"
method = "head"
"#;
        let config = MonitorConfig::parse(toml_str, ConfigFormat::Toml).unwrap();
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[1].method, Method::HEAD);
    }

    #[test]
    fn parse_json_either_shape() {
        let list = r#"[{"name": "a", "url": "http://a.com"}]"#;
        let table = r#"{"endpoints": [{"name": "a", "url": "http://a.com"}]}"#;
        let a = MonitorConfig::parse(list, ConfigFormat::Json).unwrap();
        let b = MonitorConfig::parse(table, ConfigFormat::Json).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = MonitorConfig::parse("- name: [unclosed", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "YAML", .. }));
    }

    #[test]
    fn type_error_names_field_and_line() {
        let yaml = "\
- name: a
  url: https://a.com/
- name: b
  url: https://b.com/
  headers: [x, y]
";
        let err = MonitorConfig::parse(yaml, ConfigFormat::Yaml).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("headers"), "{message}");
        assert!(message.contains("line 5"), "{message}");
    }

    #[test]
    fn type_error_inside_table_names_field() {
        let json = r#"{"endpoints": [{"name": "a", "url": "http://a.com", "headers": 7}]}"#;
        let err = MonitorConfig::parse(json, ConfigFormat::Json).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 1"), "{message}");
        assert!(!message.contains("untagged"), "{message}");
    }

    #[test]
    fn empty_list_rejected() {
        let err = MonitorConfig::parse("[]", ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::NoEndpoints));
    }

    #[test]
    fn validation_error_surfaces() {
        let yaml = "- name: bad\n  url: example.com\n";
        let err = MonitorConfig::parse(yaml, ConfigFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("c.yaml")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("c.YML")), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("c.toml")), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Path::new("c.json")), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Yaml);
    }

    #[test]
    fn from_file_reads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("endpoints.yaml");
        std::fs::write(&path, SAMPLE_YAML).unwrap();

        let config = MonitorConfig::from_file(&path).unwrap();
        assert_eq!(config.endpoints.len(), 3);
    }

    #[test]
    fn from_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");

        let err = MonitorConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
        assert!(err.to_string().contains("not found"));
    }
}
