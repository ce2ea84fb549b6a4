use super::constants::*;

pub(crate) fn refresh_interval_secs() -> u64 {
    REFRESH_INTERVAL_SECS
}

pub(crate) fn device_timeout_secs() -> Option<u16> {
    Some(DEVICE_TIMEOUT_SECS)
}

pub(crate) fn device_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

pub(crate) fn auth_key_file() -> String {
    AUTH_KEY_FILE_PATH.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn log_file_path() -> String {
    LOG_FILE_PATH.to_string()
}
