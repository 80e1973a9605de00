//! Server configuration from environment variables

use std::path::PathBuf;

use anyhow::Context;
use quiz_core::{ConfigError, ParserConfig};
use serde::{Deserialize, Serialize};

/// Parser settings for the two ways questions come in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserPresets {
    #[serde(default = "ParserConfig::document")]
    pub document: ParserConfig,
    #[serde(default = "ParserConfig::pasted")]
    pub pasted: ParserConfig,
}

impl Default for ParserPresets {
    fn default() -> Self {
        Self {
            document: ParserConfig::document(),
            pasted: ParserConfig::pasted(),
        }
    }
}

impl ParserPresets {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.document.validate()?;
        self.pasted.validate()
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Number of questions served per quiz
    pub quiz_size: usize,
    /// When set, admin routes require `Authorization: Bearer <token>`
    pub admin_token: Option<String>,
    pub parsers: ParserPresets,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_dir: PathBuf::from("data"),
            quiz_size: 10,
            admin_token: None,
            parsers: ParserPresets::default(),
        }
    }
}

impl ServerConfig {
    /// Read configuration from the process environment
    ///
    /// Recognized vars: HOST, PORT, DATA_DIR, QUIZ_SIZE, ADMIN_TOKEN and
    /// PARSER_CONFIG_FILE (JSON with optional `document` and `pasted` keys).
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;

        let parsers = match std::env::var("PARSER_CONFIG_FILE") {
            Ok(path) => {
                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("reading parser config {}", path))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("parsing parser config {}", path))?
            }
            Err(_) => ParserPresets::default(),
        };
        parsers.validate()?;

        Ok(Self { parsers, ..config })
    }

    /// Build configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        let port = match lookup("PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid PORT {:?}", v))?,
            None => default.port,
        };
        let quiz_size = match lookup("QUIZ_SIZE") {
            Some(v) => v
                .parse()
                .with_context(|| format!("invalid QUIZ_SIZE {:?}", v))?,
            None => default.quiz_size,
        };
        if quiz_size == 0 {
            anyhow::bail!("QUIZ_SIZE must be at least 1");
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(default.host),
            port,
            data_dir: lookup("DATA_DIR").map(PathBuf::from).unwrap_or(default.data_dir),
            quiz_size,
            admin_token: lookup("ADMIN_TOKEN").filter(|t| !t.trim().is_empty()),
            parsers: default.parsers,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert_eq!(config.quiz_size, 10);
        assert_eq!(config.uploads_dir(), PathBuf::from("data/uploads"));
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("DATA_DIR", "/srv/quiz"),
            ("QUIZ_SIZE", "5"),
            ("ADMIN_TOKEN", "secret"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/srv/quiz"));
        assert_eq!(config.quiz_size, 5);
        assert_eq!(config.admin_token.as_deref(), Some("secret"));
    }

    #[test]
    fn test_blank_admin_token_disables_auth() {
        let config = ServerConfig::from_lookup(lookup(&[("ADMIN_TOKEN", "  ")])).unwrap();
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::from_lookup(lookup(&[("PORT", "http")])).is_err());
        assert!(ServerConfig::from_lookup(lookup(&[("QUIZ_SIZE", "0")])).is_err());
    }

    #[test]
    fn test_parser_presets_partial_override() {
        let presets: ParserPresets =
            serde_json::from_str(r#"{"pasted":{"letter_case":"upper","correct_markers":["✓"]}}"#)
                .unwrap();
        assert_eq!(presets.document, ParserConfig::document());
        assert_eq!(presets.pasted.correct_markers, vec!["✓".to_string()]);
        assert!(presets.validate().is_ok());
    }

    #[test]
    fn test_parser_presets_reject_blank_marker() {
        let presets: ParserPresets =
            serde_json::from_str(r#"{"document":{"correct_markers":[""]}}"#).unwrap();
        assert_eq!(
            presets.validate(),
            Err(ConfigError::BlankMarker { index: 0 })
        );
    }
}
