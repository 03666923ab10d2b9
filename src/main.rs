use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dashboard_backend::{DashboardConfig, VERSION, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = match DashboardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    info!("Starting dashboard-backend v{}", VERSION);

    if let Err(e) = web::run(config).await {
        error!("Fatal error: {e:#}");
        return Err(e);
    }
    Ok(())
}

/// `RUST_LOG` wins over the configured level when set
fn init_tracing(config: &DashboardConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.effective_log_level()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
