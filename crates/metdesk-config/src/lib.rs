use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_STATION_ID: &str = "41953";
pub const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: Option<String>,
    pub data_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RainfallConfig {
    /// Dry gap (minutes) at which rain counts as intermittent
    pub intermittent_gap_minutes: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub station: Option<StationConfig>,
    pub http: Option<HttpConfig>,
    pub rainfall: Option<RainfallConfig>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from METDESK_CONFIG path (TOML) if present, with reasonable defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("METDESK_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(path)
    }

    /// Load from an explicit path; a missing file yields the defaults
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let cfg = if path.exists() {
            let s = fs::read_to_string(path)?;
            toml::from_str::<AppConfig>(&s)?
        } else {
            AppConfig::default()
        };
        Ok(cfg)
    }

    /// Get HTTP bind address (default 0.0.0.0:8080)
    pub fn http_bind(&self) -> String {
        self.http
            .as_ref()
            .and_then(|h| h.bind.clone())
            .unwrap_or_else(|| DEFAULT_HTTP_BIND.to_string())
    }

    /// Station used when a request names none
    pub fn station_id(&self) -> String {
        self.station
            .as_ref()
            .and_then(|s| s.id.clone())
            .unwrap_or_else(|| DEFAULT_STATION_ID.to_string())
    }

    /// Data type code for summary cards (default "SY")
    pub fn data_type(&self) -> String {
        self.station
            .as_ref()
            .and_then(|s| s.data_type.clone())
            .unwrap_or_else(|| metdesk_core::SYNOPTIC_DATA_TYPE.to_string())
    }

    pub fn intermittent_gap_minutes(&self) -> i64 {
        self.rainfall
            .as_ref()
            .and_then(|r| r.intermittent_gap_minutes)
            .unwrap_or(metdesk_core::DEFAULT_INTERMITTENT_GAP_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.http_bind(), "0.0.0.0:8080");
        assert_eq!(cfg.station_id(), "41953");
        assert_eq!(cfg.data_type(), "SY");
        assert_eq!(cfg.intermittent_gap_minutes(), 30);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig::load_from(dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.station_id(), "41953");
    }

    #[test]
    fn loads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[station]
id = "41923"

[http]
bind = "127.0.0.1:9000"

[rainfall]
intermittent_gap_minutes = 45
"#
        )
        .unwrap();

        let cfg = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.station_id(), "41923");
        assert_eq!(cfg.data_type(), "SY");
        assert_eq!(cfg.http_bind(), "127.0.0.1:9000");
        assert_eq!(cfg.intermittent_gap_minutes(), 45);
    }

    #[test]
    fn rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[station\nid = 1").unwrap();
        assert!(matches!(
            AppConfig::load_from(file.path()),
            Err(ConfigError::Toml(_))
        ));
    }
}
