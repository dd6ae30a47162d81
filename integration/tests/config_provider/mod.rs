use integration::file::{file_exists, get_root_path};
use serial_test::serial;
use server::configs::config_provider::FileConfigProvider;
use std::env;

#[serial]
#[test]
fn validate_server_config_toml_from_repository() {
    let config_path = get_root_path().join("../configs/server.toml");
    let config_path = config_path.as_path().display().to_string();
    let config_provider = FileConfigProvider::new(config_path.clone());
    assert!(
        file_exists(&config_path),
        "Config file not found: {}",
        config_path
    );
    let config = config_provider
        .load_config()
        .unwrap_or_else(|e| panic!("ConfigProvider failed to parse {config_path}, {e}"));
    assert_eq!(config.system.default_partitions, 1);
    assert_eq!(config.system.max_poll_wait.as_millis(), 5000);
}

#[serial]
#[test]
fn missing_config_file_should_not_be_loaded() {
    let config_path = get_root_path().join("../configs/missing.toml");
    let config_provider = FileConfigProvider::new(config_path.as_path().display().to_string());
    assert!(config_provider.load_config().is_err());
}

// Runs in serial, the environment variables are shared by all the tests.
#[serial]
#[test]
fn env_variables_should_override_config_file() {
    let expected_tcp_address = "127.0.0.1:0";
    let expected_max_poll_wait = "250ms";
    let expected_default_partitions = 3;

    env::set_var("BROOK_TCP__ADDRESS", expected_tcp_address);
    env::set_var("BROOK_SYSTEM__MAX_POLL_WAIT", expected_max_poll_wait);
    env::set_var(
        "BROOK_SYSTEM__DEFAULT_PARTITIONS",
        expected_default_partitions.to_string(),
    );

    let config_path = get_root_path().join("../configs/server.toml");
    let file_config_provider = FileConfigProvider::new(config_path.as_path().display().to_string());
    let config = file_config_provider
        .load_config()
        .expect("Failed to load default server.toml config");

    assert_eq!(config.tcp.address, expected_tcp_address);
    assert_eq!(
        config.system.max_poll_wait.to_string(),
        expected_max_poll_wait
    );
    assert_eq!(
        config.system.default_partitions,
        expected_default_partitions
    );

    env::remove_var("BROOK_TCP__ADDRESS");
    env::remove_var("BROOK_SYSTEM__MAX_POLL_WAIT");
    env::remove_var("BROOK_SYSTEM__DEFAULT_PARTITIONS");
}
