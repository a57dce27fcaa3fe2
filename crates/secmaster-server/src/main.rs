//! # SecMaster Server
//!
//! Loads the security master cache at startup and keeps it available for
//! lookups. `SIGHUP` rebuilds the cache; Ctrl+C or `SIGTERM` stop the process.

use secmaster_config::ConfigLoader;
use secmaster_core::SecMasterResult;
use secmaster_server::app::Application;
use secmaster_server::di::build_app_module;
use secmaster_server::startup::{init_logging, print_banner};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration comes first: it carries the log level and format
    let config_loader = match ConfigLoader::from_default_location() {
        Ok(loader) => loader,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config_loader).await {
        error!(code = e.error_code(), "Application error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config_loader: ConfigLoader) -> SecMasterResult<()> {
    let config = config_loader.get();
    init_logging(&config.observability);

    print_banner();
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);

    let module = build_app_module(&config).await?;
    Application::new(module).run().await
}
