//! Snapshot creation.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info};

use super::AgentContext;

/// Timestamp-derived snapshot name, unique only at one-second resolution.
pub fn snapshot_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}{}", prefix, now.format("%Y%m%d%H%M%S"))
}

/// Create a new snapshot in the configured repository.
///
/// A snapshot timeout of zero sends a fire-and-forget request bounded by
/// the request timeout; otherwise the call blocks up to the snapshot
/// timeout with `wait_for_completion=true`.
pub async fn create_snapshot(ctx: &AgentContext) -> Result<bool> {
    let settings = &ctx.settings;
    let name = snapshot_name(&settings.snapshot_name_prefix, Utc::now());
    info!("creating snapshot {} in {}", name, settings.repository_name);

    let wait_for_completion = !settings.snapshot_timeout.is_zero();
    if wait_for_completion {
        info!(
            "waiting up to {} second(s) for completion",
            settings.snapshot_timeout.as_secs()
        );
    } else {
        info!("not waiting for snapshot to complete");
    }

    let mut body = json!({
        "ignore_unavailable": settings.ignore_unavailable,
        "include_global_state": settings.include_global_state,
    });

    if settings.index_names.is_empty() {
        info!("all indices will be included");
    } else {
        info!(
            "only these indices will be included: {}",
            settings.index_names.join(",")
        );
        body["index_names"] = json!(settings.index_names);
    }

    let path = format!(
        "/_snapshot/{}/{}?wait_for_completion={}",
        settings.repository_name, name, wait_for_completion
    );
    let budget = if wait_for_completion {
        settings.snapshot_timeout
    } else {
        settings.request_timeout
    };

    debug!("request: path={} body={} budget={:?}", path, body, budget);

    let response = ctx.es.put_json(&path, &body, budget).await?;
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    debug!("response: {} {}", status, text);

    if status == StatusCode::OK {
        if wait_for_completion {
            ctx.announce(&format!("snapshot {} created", name)).await;
        } else {
            ctx.announce(&format!("snapshot {} accepted", name)).await;
        }
    } else {
        ctx.announce(&format!(
            "snapshot {} not created! reason: {} {}",
            name, status, text
        ))
        .await;
    }

    Ok(status == StatusCode::OK)
}
