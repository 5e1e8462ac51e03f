//! Service configuration from the environment (and `.env`).

use flashdeck_core::types::DEFAULT_FOOTER_TEMPLATE;
use flashdeck_core::PrintOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a number, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Request body cap; pasted lists and OCR text stay well below this.
    pub max_input_bytes: usize,
    pub default_footer_template: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            max_input_bytes: 1024 * 1024,
            default_footer_template: DEFAULT_FOOTER_TEMPLATE.to_string(),
        }
    }
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Optional env vars:
    /// - HOST: bind address (default 0.0.0.0)
    /// - PORT: bind port (default 3000)
    /// - MAX_INPUT_BYTES: request body limit (default 1 MiB)
    /// - DEFAULT_FOOTER_TEMPLATE: footer used when a layout request has no options
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber { name: "PORT", value })?,
            None => defaults.port,
        };

        let max_input_bytes = match lookup("MAX_INPUT_BYTES") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidNumber {
                    name: "MAX_INPUT_BYTES",
                    value,
                })?,
            None => defaults.max_input_bytes,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            max_input_bytes,
            default_footer_template: lookup("DEFAULT_FOOTER_TEMPLATE")
                .unwrap_or(defaults.default_footer_template),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Print options used when a layout request omits them.
    pub fn default_print_options(&self) -> PrintOptions {
        PrintOptions {
            footer_template: self.default_footer_template.clone(),
            ..PrintOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.max_input_bytes, 1024 * 1024);
        assert_eq!(config.default_footer_template, DEFAULT_FOOTER_TEMPLATE);
    }

    #[test]
    fn test_reads_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("MAX_INPUT_BYTES", "2048"),
            ("DEFAULT_FOOTER_TEMPLATE", "{subject} #{index}"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.max_input_bytes, 2048);
        assert_eq!(config.default_print_options().footer_template, "{subject} #{index}");
    }

    #[test]
    fn test_rejects_bad_port() {
        let result = AppConfig::from_lookup(lookup(&[("PORT", "eighty")]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber { name: "PORT", .. })
        ));
    }
}
