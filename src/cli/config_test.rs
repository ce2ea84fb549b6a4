use super::*;

#[test]
fn test_load_configuration() {
    let config =
        load_configuration("./src/cli/testdata/config.toml").expect("failed to load config");

    let device = &config.device;
    assert_eq!(device.endpoint, "http://lights.local:5000");
    assert_eq!(device.auth_key, None);
    assert_eq!(device.auth_key_file, "/etc/neoctl/auth_key");
    assert_eq!(device.timeout_secs, Some(5));

    assert_eq!(config.refresh.interval_secs, 30);

    let log = &config.log;
    assert_eq!(log.level.as_deref(), Some("info"));
    let log_filters = log.filters.as_deref().unwrap_or_default();
    assert_eq!(log_filters.len(), 1);
    assert_eq!(log_filters[0].module.as_deref(), Some("neoctl::device"));
    assert_eq!(log_filters[0].level.as_deref(), Some("debug"));

    let log_file = &log.file;
    assert_eq!(log_file.path, "/var/logs/neoctl.log");
    assert_eq!(log_file.append, true);
}

#[test]
fn test_default_configuration() {
    let config: Configuration = toml::from_str("").expect("failed to parse empty config");
    assert_eq!(config.device.endpoint, "http://127.0.0.1:5000");
    assert_eq!(config.refresh.interval_secs, 60);
    assert_eq!(config.log.file.path, "/tmp/neoctl.log");
    assert_eq!(config.log.file.append, false);
}

#[test]
fn test_resolve_path() {
    unsafe { std::env::set_var("NEOCTL_TEST_DIR", "/tmp/neoctl-test") };
    let resolved = resolve_path("$NEOCTL_TEST_DIR/auth_key").expect("failed to resolve");
    assert_eq!(resolved, "/tmp/neoctl-test/auth_key");

    let resolved = resolve_path("${NEOCTL_TEST_DIR}/config.toml").expect("failed to resolve");
    assert_eq!(resolved, "/tmp/neoctl-test/config.toml");
}
