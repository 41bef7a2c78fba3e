//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::homedepot::selectors::SelectorConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Store search ZIP code
    #[serde(default = "default_zip")]
    pub zip: String,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Gemini model used for normalization
    #[serde(default = "default_gemini_model")]
    pub gemini_model: String,

    /// Gemini API key (also read from GENAI_API_KEY)
    #[serde(default)]
    pub gemini_api_key: Option<String>,

    /// CSS selector overrides for page extraction
    #[serde(default)]
    pub selectors: SelectorConfig,
}

fn default_zip() -> String {
    "94102".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_gemini_model() -> String {
    "gemini-2.0-flash".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zip: default_zip(),
            proxy: None,
            timeout_secs: default_timeout_secs(),
            format: OutputFormat::Text,
            gemini_model: default_gemini_model(),
            gemini_api_key: None,
            selectors: SelectorConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("hd-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(zip) = std::env::var("HD_ZIP") {
            self.zip = zip;
        }

        if let Ok(proxy) = std::env::var("HD_PROXY") {
            self.proxy = Some(proxy);
        }

        if let Ok(timeout) = std::env::var("HD_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout_secs = t;
            }
        }

        if let Ok(key) = std::env::var("GENAI_API_KEY") {
            self.gemini_api_key = Some(key);
        }

        self
    }
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use: text, json, markdown", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.zip, "94102");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert!(config.proxy.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.selectors.price, SelectorConfig::default().price);
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.zip, "94102");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("MD".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);

        let err = "invalid".parse::<OutputFormat>().unwrap_err();
        assert!(err.contains("Unknown format"));
        assert!(err.contains("text, json, markdown"));
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Text.to_string(), "text");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Markdown.to_string(), "markdown");
    }

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_output_format_serde() {
        let format = OutputFormat::Json;
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, "\"json\"");

        let parsed: OutputFormat = serde_json::from_str("\"markdown\"").unwrap();
        assert_eq!(parsed, OutputFormat::Markdown);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            zip = "10001"
            timeout_secs = 60
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.zip, "10001");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.gemini_model, "gemini-2.0-flash");
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            zip = "10001"
            proxy = "socks5://localhost:1080"
            timeout_secs = 60
            format = "markdown"
            gemini_model = "gemini-1.5-pro"
            gemini_api_key = "abc123"

            [selectors]
            price = ".custom-price"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.zip, "10001");
        assert_eq!(config.proxy, Some("socks5://localhost:1080".to_string()));
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.format, OutputFormat::Markdown);
        assert_eq!(config.gemini_model, "gemini-1.5-pro");
        assert_eq!(config.gemini_api_key, Some("abc123".to_string()));
        assert_eq!(config.selectors.price, ".custom-price");
        // Selectors not named in the file keep their defaults
        assert_eq!(config.selectors.name, SelectorConfig::default().name);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            zip = "60601"
            timeout_secs = 45
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.zip, "60601");
        assert_eq!(config.timeout_secs, 45);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/config.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_load_no_file() {
        // When no file exists, should return default config
        let config = Config::load(None).unwrap();
        assert_eq!(config.zip, "94102");
    }

    #[test]
    fn test_config_load_explicit_path() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            zip = "30301"
            format = "json"
            "#
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.zip, "30301");
        assert_eq!(config.format, OutputFormat::Json);
    }

    #[test]
    fn test_config_with_env() {
        // Save original env vars
        let orig_zip = std::env::var("HD_ZIP").ok();
        let orig_proxy = std::env::var("HD_PROXY").ok();
        let orig_timeout = std::env::var("HD_TIMEOUT").ok();
        let orig_key = std::env::var("GENAI_API_KEY").ok();

        // Set test env vars; the timeout is deliberately unparseable
        std::env::set_var("HD_ZIP", "75201");
        std::env::set_var("HD_PROXY", "http://proxy:8080");
        std::env::set_var("HD_TIMEOUT", "not_a_number");
        std::env::set_var("GENAI_API_KEY", "env-key");

        let config = Config::new().with_env();
        assert_eq!(config.zip, "75201");
        assert_eq!(config.proxy, Some("http://proxy:8080".to_string()));
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.gemini_api_key, Some("env-key".to_string()));

        // Restore original env vars
        match orig_zip {
            Some(v) => std::env::set_var("HD_ZIP", v),
            None => std::env::remove_var("HD_ZIP"),
        }
        match orig_proxy {
            Some(v) => std::env::set_var("HD_PROXY", v),
            None => std::env::remove_var("HD_PROXY"),
        }
        match orig_timeout {
            Some(v) => std::env::set_var("HD_TIMEOUT", v),
            None => std::env::remove_var("HD_TIMEOUT"),
        }
        match orig_key {
            Some(v) => std::env::set_var("GENAI_API_KEY", v),
            None => std::env::remove_var("GENAI_API_KEY"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config {
            zip: "10001".to_string(),
            proxy: Some("socks5://localhost:1080".to_string()),
            timeout_secs: 60,
            format: OutputFormat::Json,
            gemini_model: "gemini-1.5-pro".to_string(),
            gemini_api_key: Some("abc123".to_string()),
            selectors: SelectorConfig {
                price: ".custom-price".to_string(),
                ..SelectorConfig::default()
            },
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.zip, config.zip);
        assert_eq!(parsed.proxy, config.proxy);
        assert_eq!(parsed.timeout_secs, config.timeout_secs);
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.gemini_model, config.gemini_model);
        assert_eq!(parsed.gemini_api_key, config.gemini_api_key);
        assert_eq!(parsed.selectors.price, config.selectors.price);
    }
}
