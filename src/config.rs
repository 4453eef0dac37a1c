//! Configuration management for the vote engine
//!
//! Loads configuration from environment variables with validation.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default CSV field separator, fixed by the export wire format
const DEFAULT_CSV_SEPARATOR: char = ';';

/// Export configuration for the tabular report builder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Field separator for CSV rows
    pub separator: char,

    /// Terminate rows with CRLF instead of LF
    pub crlf: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_CSV_SEPARATOR,
            crlf: true,
        }
    }
}

impl ExportConfig {
    /// Load export configuration from environment variables.
    ///
    /// `EXPORT_CSV_SEPARATOR` and `EXPORT_CSV_CRLF` override the defaults;
    /// both default to the wire format consumers already parse (`;`, CRLF).
    pub fn from_env() -> Result<Self> {
        let separator = match std::env::var("EXPORT_CSV_SEPARATOR") {
            Ok(raw) => Self::validate_separator(&raw)?,
            Err(_) => DEFAULT_CSV_SEPARATOR,
        };

        let crlf = std::env::var("EXPORT_CSV_CRLF")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self { separator, crlf })
    }

    /// Validate a separator override: one ASCII character, not a quote or
    /// a line break (those are structural in the row format)
    fn validate_separator(raw: &str) -> Result<char> {
        let mut chars = raw.chars();
        let sep = chars
            .next()
            .ok_or_else(|| Error::internal("EXPORT_CSV_SEPARATOR must not be empty"))?;

        if chars.next().is_some() || !sep.is_ascii() {
            return Err(Error::internal(
                "EXPORT_CSV_SEPARATOR must be a single ASCII character",
            ));
        }

        if sep == '"' || sep == '\r' || sep == '\n' {
            return Err(Error::internal(
                "EXPORT_CSV_SEPARATOR conflicts with the row format",
            ));
        }

        Ok(sep)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let logging = LoggingConfig {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
        };

        let export = ExportConfig::from_env()?;

        Ok(Self { logging, export })
    }

    /// Create configuration for testing
    pub fn for_testing() -> Self {
        Self {
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: "pretty".to_string(),
            },
            export: ExportConfig::default(),
        }
    }
}
