use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use snapshot_agent::config::Settings;
use snapshot_agent::operations::{self, AgentContext};

fn init_tracing(debug: bool) -> Result<()> {
    let crate_level = if debug {
        "snapshot_agent=debug"
    } else {
        "snapshot_agent=info"
    };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(crate_level.parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Configuration failures are logged in the run's format too, so the
    // subscriber comes up at the default level before settings can raise it.
    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(false)?;
            error!("{:#}", e);
            std::process::exit(1);
        }
    };
    init_tracing(settings.debug)?;

    info!(
        "starting maintenance run for repository {} on {}",
        settings.repository_name, settings.es_host
    );

    let ctx = AgentContext::new(Arc::new(settings))?;

    if let Err(e) = operations::run(&ctx).await {
        error!("{:#}", e);
        if ctx.alerts.is_enabled() {
            ctx.alerts.notify(&e.to_string()).await;
        }
        std::process::exit(1);
    }

    info!("maintenance run complete");
    Ok(())
}
