use serial_test::serial;
use temp_env::with_vars;

use super::*;

#[test]
#[serial]
fn default_config_should_initialize_with_hardcoded_values() {
    let config = CacheConfig::default();

    assert_eq!(
        config.completion_channel_capacity,
        DEFAULT_COMPLETION_CHANNEL_CAPACITY
    );
    assert!(config.populate_on_start);
}

#[test]
#[serial]
fn load_without_file_falls_back_to_defaults() {
    with_vars(
        vec![
            ("ACCOUNT_CACHE__COMPLETION_CHANNEL_CAPACITY", None::<&str>),
            ("ACCOUNT_CACHE__POPULATE_ON_START", None),
        ],
        || {
            let config = CacheConfig::load(None).unwrap();
            assert_eq!(
                config.completion_channel_capacity,
                DEFAULT_COMPLETION_CHANNEL_CAPACITY
            );
            assert!(config.populate_on_start);
        },
    );
}

#[test]
#[serial]
fn load_merges_environment_overrides() {
    with_vars(
        vec![
            ("ACCOUNT_CACHE__COMPLETION_CHANNEL_CAPACITY", Some("128")),
            ("ACCOUNT_CACHE__POPULATE_ON_START", Some("false")),
        ],
        || {
            let config = CacheConfig::load(None).unwrap();
            assert_eq!(config.completion_channel_capacity, 128);
            assert!(!config.populate_on_start);
        },
    );
}

#[test]
#[serial]
fn zero_capacity_fails_validation() {
    let config = CacheConfig {
        completion_channel_capacity: 0,
        ..Default::default()
    };

    assert!(matches!(
        config.validate().unwrap_err(),
        crate::Error::Config(_)
    ));
}
