use std::path::Path;
use tokio::fs;
use serde::{Deserialize, Serialize};
use crate::utils::logging::*;

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub inference_endpoint: String, //url
    #[serde(default, skip_serializing)]
    pub api_key: String,
    pub project: String,
    pub version: u32,
    pub request_timeout: u64, //seconds
    pub max_retries: u32,
    pub retry_backoff: u64, //milliseconds
    pub default_confidence: u8, //percent
    pub default_overlap: u8, //percent
    pub known_classes: Vec<String>,
    pub max_upload_size: usize, //bytes
    pub font_path: String, //path
    pub font_size: f32, //pixels
    pub border_width: u32, //pixels
    pub palette: Vec<[u8; 3]>, //RGB
    pub text_color: [u8; 3], //RGB
}

impl Config {
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Config, LogEntry> {
        let toml_string = fs::read_to_string(path.as_ref()).await
            .map_err(|err| emergency_entry!(SystemEntry::ConfigNotFound(err), format!("Path: {}", path.as_ref().display())))?;
        Self::from_toml_str(&toml_string)
    }

    pub fn from_toml_str(toml_string: &str) -> Result<Config, LogEntry> {
        let config = toml::from_str::<ConfigTable>(toml_string)
            .map_err(|err| emergency_entry!(SystemEntry::ConfigParseError(err.to_string())))?
            .config;
        if !Self::validate(&config) {
            return Err(emergency_entry!(SystemEntry::InvalidConfig("value out of range".to_string())));
        }
        Ok(config)
    }

    /// The inference client is built once at startup, so its connection
    /// settings survive an update; everything else is taken from `incoming`.
    pub fn apply_update(&self, incoming: Config) -> Config {
        Config {
            http_server_bind_port: self.http_server_bind_port,
            bind_retry_duration: self.bind_retry_duration,
            inference_endpoint: self.inference_endpoint.clone(),
            api_key: self.api_key.clone(),
            project: self.project.clone(),
            version: self.version,
            request_timeout: self.request_timeout,
            max_retries: self.max_retries,
            retry_backoff: self.retry_backoff,
            ..incoming
        }
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_second(config.bind_retry_duration)
            && Config::validate_second(config.request_timeout)
            && Config::validate_mini_second(config.retry_backoff)
            && Config::validate_percentage(config.default_confidence)
            && Config::validate_percentage(config.default_overlap)
            && Config::validate_not_empty(&config.inference_endpoint)
            && Config::validate_not_empty(&config.project)
            && config.max_upload_size > 0
            && !config.palette.is_empty()
            && Config::validate_font_size(config.font_size)
            && Config::validate_border_width(config.border_width)
    }

    fn validate_mini_second(second: u64) -> bool {
        second <= 60000
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_percentage(percentage: u8) -> bool {
        percentage <= 100
    }

    fn validate_not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    fn validate_border_width(width: u32) -> bool {
        width > 0_u32
    }

    fn validate_font_size(size: f32) -> bool {
        size > 0_f32
    }
}
