//! Settings parsing tests. These mutate the process environment, so they
//! run serially.

use std::env;
use std::time::Duration;

use serial_test::serial;
use test_case::test_case;

use snapshot_agent::config::Settings;

const ALL_VARS: &[&str] = &[
    "ES_HOST",
    "REPOSITORY_NAME",
    "REMOVE_OLDER_THAN_DAYS",
    "REPOSITORY_SETTINGS",
    "INDEX_NAMES",
    "IGNORE_UNAVAILABLE",
    "INCLUDE_GLOBAL_STATE",
    "REQUEST_TIMEOUT_SECONDS",
    "SNAPSHOT_TIMEOUT_SECONDS",
    "SNAPSHOT_NAME_PREFIX",
    "NOTIFICATIONS_ENABLED",
    "WEBHOOK_URL",
    "MESSAGE_PREFIX",
    "DEBUG",
];

/// Reset to a minimal valid environment: required variables set, all
/// optional ones cleared.
fn set_baseline() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
    env::set_var("ES_HOST", "http://localhost:9200");
    env::set_var("REPOSITORY_NAME", "backups");
    env::set_var("REMOVE_OLDER_THAN_DAYS", "7");
    env::set_var(
        "REPOSITORY_SETTINGS",
        r#"{"type":"fs","settings":{"location":"/backups"}}"#,
    );
}

#[test]
#[serial]
fn defaults_apply_with_minimal_environment() {
    set_baseline();

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.es_host, "http://localhost:9200");
    assert_eq!(settings.repository_name, "backups");
    assert_eq!(settings.remove_older_than_days, 7);
    assert!(settings.index_names.is_empty());
    assert!(!settings.ignore_unavailable);
    assert!(settings.include_global_state);
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
    assert_eq!(settings.snapshot_timeout, Duration::from_secs(60));
    assert_eq!(settings.snapshot_name_prefix, "");
    assert!(!settings.notifications_enabled);
    assert_eq!(settings.message_prefix, "");
    assert!(!settings.debug);
}

#[test]
#[serial]
fn missing_required_variable_names_the_field() {
    set_baseline();
    env::remove_var("ES_HOST");

    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("ES_HOST"));
}

#[test]
#[serial]
fn empty_repository_name_is_rejected() {
    set_baseline();
    env::set_var("REPOSITORY_NAME", "");

    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("REPOSITORY_NAME"));
}

#[test]
#[serial]
fn host_trailing_slash_is_trimmed() {
    set_baseline();
    env::set_var("ES_HOST", "http://localhost:9200/");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.es_host, "http://localhost:9200");
}

#[test]
#[serial]
fn index_list_is_split_and_trimmed() {
    set_baseline();
    env::set_var("INDEX_NAMES", "orders, customers ,logs-2025");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.index_names, vec!["orders", "customers", "logs-2025"]);
}

#[test]
#[serial]
fn non_numeric_retention_is_an_error() {
    set_baseline();
    env::set_var("REMOVE_OLDER_THAN_DAYS", "seven");

    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("REMOVE_OLDER_THAN_DAYS"));
}

#[test]
#[serial]
fn negative_retention_is_accepted_and_disables_pruning() {
    set_baseline();
    env::set_var("REMOVE_OLDER_THAN_DAYS", "-1");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.remove_older_than_days, -1);
}

#[test]
#[serial]
fn enabled_notifications_require_a_webhook_url() {
    set_baseline();
    env::set_var("NOTIFICATIONS_ENABLED", "true");

    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("WEBHOOK_URL"));
}

#[test]
#[serial]
fn webhook_settings_are_read_when_enabled() {
    set_baseline();
    env::set_var("NOTIFICATIONS_ENABLED", "true");
    env::set_var("WEBHOOK_URL", "https://hooks.example.com/T000/B000");
    env::set_var("MESSAGE_PREFIX", "agent: ");

    let settings = Settings::from_env().unwrap();
    assert!(settings.notifications_enabled);
    assert_eq!(settings.webhook_url, "https://hooks.example.com/T000/B000");
    assert_eq!(settings.message_prefix, "agent: ");
}

#[test_case("true", true; "lowercase true")]
#[test_case("TRUE", true; "uppercase true")]
#[test_case("1", true; "numeric one")]
#[test_case("yes", true; "yes")]
#[test_case("false", false; "lowercase false")]
#[test_case("0", false; "numeric zero")]
#[test_case("no", false; "no")]
#[serial]
fn boolean_flags_accept_common_spellings(raw: &str, expected: bool) {
    set_baseline();
    env::set_var("DEBUG", raw);

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.debug, expected);
}

#[test]
#[serial]
fn unrecognized_boolean_is_an_error() {
    set_baseline();
    env::set_var("DEBUG", "maybe");

    let err = Settings::from_env().unwrap_err();
    assert!(err.to_string().contains("DEBUG"));
}

#[test]
#[serial]
fn timeouts_are_read_in_seconds() {
    set_baseline();
    env::set_var("REQUEST_TIMEOUT_SECONDS", "10");
    env::set_var("SNAPSHOT_TIMEOUT_SECONDS", "0");

    let settings = Settings::from_env().unwrap();
    assert_eq!(settings.request_timeout, Duration::from_secs(10));
    assert_eq!(settings.snapshot_timeout, Duration::ZERO);
}
