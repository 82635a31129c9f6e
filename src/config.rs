use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::services::{OutputLayout, SheetRanges};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub sheets: SheetsSettings,
    pub ranges: RangeSettings,
    pub output: OutputSettings,
    #[serde(default)]
    pub pairing: PairingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SheetsSettings {
    #[serde(default = "default_sheets_endpoint")]
    pub endpoint: String,
    pub spreadsheet_id: String,
    #[serde(default)]
    pub access_token: String,
    pub timeout_secs: Option<u64>,
}

fn default_sheets_endpoint() -> String { "https://sheets.googleapis.com/v4".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RangeSettings {
    pub ordinary: String,
    pub newcomers: String,
    pub leads: String,
    pub forbidden_pairs: String,
}

impl From<RangeSettings> for SheetRanges {
    fn from(ranges: RangeSettings) -> Self {
        SheetRanges {
            ordinary: ranges.ordinary,
            newcomers: ranges.newcomers,
            leads: ranges.leads,
            forbidden_pairs: ranges.forbidden_pairs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub sheet: String,
    #[serde(default = "default_first_column")]
    pub first_column: String,
    #[serde(default = "default_last_column")]
    pub last_column: String,
    #[serde(default = "default_start_row")]
    pub start_row: u32,
}

fn default_first_column() -> String { "A".to_string() }
fn default_last_column() -> String { "B".to_string() }
fn default_start_row() -> u32 { 2 }

impl From<OutputSettings> for OutputLayout {
    fn from(output: OutputSettings) -> Self {
        OutputLayout {
            sheet: output.sheet,
            first_column: output.first_column,
            last_column: output.last_column,
            start_row: output.start_row,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairingSettings {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// Fixed seed for every run; runs draw a fresh seed when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for PairingSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            seed: None,
        }
    }
}

fn default_max_attempts() -> usize { crate::core::DEFAULT_MAX_ATTEMPTS }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

impl LoggingSettings {
    /// Unknown formats fall back to compact
    pub fn log_format(&self) -> LogFormat {
        match self.format.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Compact,
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ROTATION_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., ROTATION__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ROTATION")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ROTATION")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the layered config
///
/// `SHEETS_ACCESS_TOKEN` keeps the token out of config files.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("SHEETS_ACCESS_TOKEN") {
        Ok(token) if !token.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("sheets.access_token", token)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    const SAMPLE: &str = r#"
        [server]
        host = "0.0.0.0"
        port = 8080

        [sheets]
        spreadsheet_id = "abc123"

        [ranges]
        ordinary = "Roster!A2:A"
        newcomers = "Roster!B2:B"
        leads = "Roster!C2:C"
        forbidden_pairs = "Forbidden!A2:B"

        [output]
        sheet = "Pairings"
    "#;

    fn parse(source: &str) -> Settings {
        Config::builder()
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let settings = parse(SAMPLE);

        assert_eq!(settings.sheets.endpoint, "https://sheets.googleapis.com/v4");
        assert_eq!(settings.pairing.max_attempts, 100);
        assert_eq!(settings.pairing.seed, None);
        assert_eq!(settings.output.first_column, "A");
        assert_eq!(settings.output.last_column, "B");
        assert_eq!(settings.output.start_row, 2);
    }

    #[test]
    fn test_pairing_overrides() {
        let source = format!("{SAMPLE}\n[pairing]\nmax_attempts = 250\nseed = 7\n");
        let settings = parse(&source);

        assert_eq!(settings.pairing.max_attempts, 250);
        assert_eq!(settings.pairing.seed, Some(7));
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
        assert_eq!(logging.log_format(), LogFormat::Json);
    }

    #[test]
    fn test_log_format_selection() {
        let with = |format: &str| LoggingSettings {
            level: "info".to_string(),
            format: format.to_string(),
        };

        assert_eq!(with("pretty").log_format(), LogFormat::Pretty);
        assert_eq!(with("JSON").log_format(), LogFormat::Json);
        assert_eq!(with("compact").log_format(), LogFormat::Compact);
        assert_eq!(with("text").log_format(), LogFormat::Compact);
    }

    #[test]
    fn test_output_layout_conversion() {
        let layout: OutputLayout = parse(SAMPLE).output.into();
        assert_eq!(layout.range_for(4), "Pairings!A2:B5");
    }
}
