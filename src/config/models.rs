use serde::{Deserialize, Serialize};

use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Configuration {
    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DeviceConfig {
    #[serde(default = "device_endpoint")]
    pub endpoint: String,

    /// Bearer token for the device API. When unset, the key file is
    /// consulted and the user is prompted on first run.
    #[serde(default)]
    pub auth_key: Option<String>,

    #[serde(default = "auth_key_file")]
    pub auth_key_file: String,

    #[serde(default = "device_timeout_secs")]
    pub timeout_secs: Option<u16>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RefreshConfig {
    #[serde(default = "refresh_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: LogFile,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFilter {
    #[serde(default)]
    pub module: Option<String>,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogFile {
    #[serde(default = "log_file_path")]
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            refresh: RefreshConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            endpoint: device_endpoint(),
            auth_key: None,
            auth_key_file: auth_key_file(),
            timeout_secs: device_timeout_secs(),
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: refresh_interval_secs(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: log_level(),
            file: LogFile::default(),
            filters: None,
        }
    }
}

impl Default for LogFile {
    fn default() -> Self {
        Self {
            path: log_file_path(),
            append: false,
        }
    }
}
