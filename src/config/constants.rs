use std::time::Duration;

/// How often alarm and task state are re-fetched from the device
pub const REFRESH_INTERVAL_SECS: u64 = 60;

/// Default timeout for a single device request
pub const DEVICE_TIMEOUT_SECS: u16 = 10;

pub const FRAME_DURATION: Duration = Duration::from_millis(250);

pub const LOG_FILE_PATH: &str = "/tmp/neoctl.log";

pub const AUTH_KEY_FILE_PATH: &str = "$HOME/.config/neoctl/auth_key";

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
