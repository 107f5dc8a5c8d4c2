//! Maintenance run sequencing.

pub mod pruning;
pub mod repository;
pub mod snapshots;

use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::config::Settings;
use crate::services::{AlertService, EsClient};

/// Everything a maintenance run needs: the immutable settings plus the two
/// outbound collaborators.
pub struct AgentContext {
    pub settings: Arc<Settings>,
    pub es: EsClient,
    pub alerts: AlertService,
}

impl AgentContext {
    pub fn new(settings: Arc<Settings>) -> Result<Self> {
        let es = EsClient::new(&settings)?;
        let alerts = AlertService::new(
            settings.webhook_url.clone(),
            settings.message_prefix.clone(),
            settings.notifications_enabled,
        )?;

        Ok(Self {
            settings,
            es,
            alerts,
        })
    }

    /// Log a status line and forward it to the webhook when notifications
    /// are enabled.
    pub async fn announce(&self, message: &str) {
        info!("{}", message);
        if self.alerts.is_enabled() {
            self.alerts.notify(message).await;
        }
    }
}

/// One full maintenance run: ensure the repository exists, prune expired
/// snapshots, create a new one. Pruning runs before creation so the fresh
/// snapshot can never be a deletion candidate in the same run.
pub async fn run(ctx: &AgentContext) -> Result<()> {
    if !repository::repository_exists(ctx).await? {
        if !repository::create_repository(ctx).await? {
            return Err(anyhow!("couldn't create repository"));
        }
    }

    if ctx.settings.remove_older_than_days > 0 {
        pruning::remove_old_snapshots(ctx).await?;
    }

    if !snapshots::create_snapshot(ctx).await? {
        return Err(anyhow!("couldn't create snapshot"));
    }

    Ok(())
}
