//! Retention pruning: list the repository, delete snapshots older than the
//! configured threshold.

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, error, info};

use super::AgentContext;

#[derive(Debug, Deserialize)]
pub struct SnapshotListing {
    pub snapshots: Vec<SnapshotRecord>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotRecord {
    pub snapshot: String,
    pub start_time: DateTime<Utc>,
}

/// A record expires once its age in whole days strictly exceeds the
/// threshold. A non-positive threshold never expires anything.
pub fn is_expired(record: &SnapshotRecord, now: DateTime<Utc>, retention_days: i64) -> bool {
    retention_days > 0 && (now - record.start_time).num_days() > retention_days
}

/// Delete every snapshot older than the retention threshold, in the order
/// the backend lists them. The first failed deletion aborts the rest.
pub async fn remove_old_snapshots(ctx: &AgentContext) -> Result<usize> {
    let settings = &ctx.settings;
    info!(
        "removing snapshots older than {} day(s) from {}",
        settings.remove_older_than_days, settings.repository_name
    );

    let response = ctx
        .es
        .get(&format!("/_snapshot/{}/_all", settings.repository_name))
        .await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("response: {} {}", status, body);

    let listing: SnapshotListing = serde_json::from_str(&body).map_err(|e| {
        error!("problem parsing reply from {}: {}", ctx.es.host(), e);
        anyhow!("problem parsing reply from {}: {}", ctx.es.host(), e)
    })?;

    let now = Utc::now();
    let mut removed = 0;

    for record in &listing.snapshots {
        let age_days = (now - record.start_time).num_days();
        if !is_expired(record, now, settings.remove_older_than_days) {
            debug!("keeping snapshot {} ({} day(s) old)", record.snapshot, age_days);
            continue;
        }

        info!(
            "snapshot {} is {} day(s) old, removing",
            record.snapshot, age_days
        );
        if !remove_snapshot(ctx, &record.snapshot).await? {
            return Err(anyhow!("snapshot removal failed"));
        }
        removed += 1;
    }

    info!("removed {} snapshot(s)", removed);
    Ok(removed)
}

/// Delete a single snapshot by name. True only on an explicit 200.
pub async fn remove_snapshot(ctx: &AgentContext, name: &str) -> Result<bool> {
    let response = ctx
        .es
        .delete(&format!(
            "/_snapshot/{}/{}",
            ctx.settings.repository_name, name
        ))
        .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("response: {} {}", status, body);

    if status == StatusCode::OK {
        ctx.announce(&format!("snapshot {} removed", name)).await;
    } else {
        ctx.announce(&format!(
            "snapshot {} not removed! reason: {} {}",
            name, status, body
        ))
        .await;
    }

    Ok(status == StatusCode::OK)
}
