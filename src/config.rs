//! Agent configuration.
//!
//! All settings come from the process environment and are read exactly once
//! at startup into an immutable struct that is passed into the components.

use std::env;
use std::time::Duration;

use anyhow::{anyhow, Result};

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL of the cluster, without a trailing slash.
    pub es_host: String,
    /// Name of the snapshot repository to maintain.
    pub repository_name: String,
    /// Snapshots older than this many days are deleted. Zero or negative
    /// disables pruning entirely.
    pub remove_older_than_days: i64,
    /// Backend-specific repository settings, sent verbatim on creation.
    pub repository_settings: String,
    /// Explicit indices to snapshot. Empty means all indices.
    pub index_names: Vec<String>,
    pub ignore_unavailable: bool,
    pub include_global_state: bool,
    /// Budget for acknowledgement-style calls.
    pub request_timeout: Duration,
    /// Budget for a completion wait. Zero means fire-and-forget.
    pub snapshot_timeout: Duration,
    /// Prepended to the generated timestamp name.
    pub snapshot_name_prefix: String,
    pub notifications_enabled: bool,
    pub webhook_url: String,
    /// Prepended to every outbound notification text.
    pub message_prefix: String,
    pub debug: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let es_host = required("ES_HOST")?.trim_end_matches('/').to_string();

        let repository_name = required("REPOSITORY_NAME")?;
        if repository_name.is_empty() {
            return Err(anyhow!("REPOSITORY_NAME must not be empty"));
        }

        let notifications_enabled = parse_bool("NOTIFICATIONS_ENABLED", false)?;
        let webhook_url = if notifications_enabled {
            required("WEBHOOK_URL")?
        } else {
            env::var("WEBHOOK_URL").unwrap_or_default()
        };

        Ok(Self {
            es_host,
            repository_name,
            remove_older_than_days: parse_required_i64("REMOVE_OLDER_THAN_DAYS")?,
            repository_settings: required("REPOSITORY_SETTINGS")?,
            index_names: parse_list("INDEX_NAMES"),
            ignore_unavailable: parse_bool("IGNORE_UNAVAILABLE", false)?,
            include_global_state: parse_bool("INCLUDE_GLOBAL_STATE", true)?,
            request_timeout: Duration::from_secs(parse_u64("REQUEST_TIMEOUT_SECONDS", 30)?),
            snapshot_timeout: Duration::from_secs(parse_u64("SNAPSHOT_TIMEOUT_SECONDS", 60)?),
            snapshot_name_prefix: env::var("SNAPSHOT_NAME_PREFIX").unwrap_or_default(),
            notifications_enabled,
            webhook_url,
            message_prefix: env::var("MESSAGE_PREFIX").unwrap_or_default(),
            debug: parse_bool("DEBUG", false)?,
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| anyhow!("missing required environment variable {}", name))
}

fn parse_required_i64(name: &str) -> Result<i64> {
    required(name)?
        .trim()
        .parse::<i64>()
        .map_err(|e| anyhow!("invalid value for {}: {}", name, e))
}

fn parse_u64(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow!("invalid value for {}: {}", name, e)),
        Err(_) => Ok(default),
    }
}

fn parse_bool(name: &str, default: bool) -> Result<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            other => Err(anyhow!("invalid boolean for {}: '{}'", name, other)),
        },
        Err(_) => Ok(default),
    }
}

fn parse_list(name: &str) -> Vec<String> {
    env::var(name)
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
