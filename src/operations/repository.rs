//! Snapshot repository existence and creation.

use anyhow::Result;
use reqwest::StatusCode;
use tracing::{debug, info};

use super::AgentContext;

/// Check whether the configured repository is registered with the cluster.
/// Only a 404 means absent; any other status counts as present.
pub async fn repository_exists(ctx: &AgentContext) -> Result<bool> {
    let repo = &ctx.settings.repository_name;
    info!("checking if repository {} exists", repo);

    let response = ctx.es.get(&format!("/_snapshot/{}", repo)).await?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("response: {} {}", status, body);

    Ok(status != StatusCode::NOT_FOUND)
}

/// Register the repository with the configured settings payload. Returns
/// false on any non-200 reply; the caller decides whether that aborts.
pub async fn create_repository(ctx: &AgentContext) -> Result<bool> {
    let repo = &ctx.settings.repository_name;
    info!("creating repository {}", repo);
    debug!(
        "request: path=/_snapshot/{} payload={}",
        repo, ctx.settings.repository_settings
    );

    let response = ctx
        .es
        .put_payload(
            &format!("/_snapshot/{}", repo),
            ctx.settings.repository_settings.clone(),
        )
        .await?;

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!("response: {} {}", status, body);

    if status == StatusCode::OK {
        ctx.announce(&format!("repository {} created", repo)).await;
    } else {
        ctx.announce(&format!(
            "repository {} not created! reason: {} {}",
            repo, status, body
        ))
        .await;
    }

    Ok(status == StatusCode::OK)
}
