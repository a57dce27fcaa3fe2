//! Server startup utilities.

use secmaster_config::ObservabilityConfig;
use secmaster_service::{LoadStatus, LoadSummary, RowOutcome};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Installs the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }
}

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
   _____          __  ___           __
  / ___/___  ____/  |/  /___ ______/ /____  _____
  \__ \/ _ \/ ___/ /|_/ / __ `/ ___/ __/ _ \/ ___/
 ___/ /  __/ /__/ /  / / /_/ (__  ) /_/  __/ /
/____/\___/\___/_/  /_/\__,_/____/\__/\___/_/

                  Security Master Cache
    "#);
}

/// Prints the result of a load cycle, one line per row that needs attention.
pub fn print_load_summary(summary: &LoadSummary) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("Trigger:        {}", summary.trigger);
    match summary.business_date {
        Some(date) => info!("Business date:  {}", date),
        None => info!("Business date:  unresolved"),
    }
    info!("Status:         {:?}", summary.status);
    info!("Mappings:       {}", summary.mappings_written);
    info!("Tables loaded:  {}", summary.tables_loaded());
    info!("Records cached: {}", summary.records_cached());
    info!("Elapsed:        {:?}", summary.elapsed);

    for row in &summary.rows {
        match &row.outcome {
            RowOutcome::Loaded { .. } => {}
            outcome => warn!("{}:{} ({}) -> {:?}", row.customer_tier_id, row.asset_type, row.system_code, outcome),
        }
    }
    info!("{}", separator);

    if let LoadStatus::Failed { reason } = &summary.status {
        warn!("Cache starts empty and will reload on first lookup: {}", reason);
    }

    match serde_json::to_string(summary) {
        Ok(json) => debug!(summary = %json, "Load summary"),
        Err(e) => debug!("Failed to serialize load summary: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secmaster_service::{ReloadTrigger, RowReport};

    #[test]
    fn test_print_banner_does_not_panic() {
        // Initialize subscriber for testing
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_load_summary_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();

        let mut summary = LoadSummary::new(ReloadTrigger::Startup);
        summary.rows.push(RowReport {
            config_id: "1".to_string(),
            customer_tier_id: "1".to_string(),
            asset_type: "BND".to_string(),
            system_code: "BND".to_string(),
            outcome: RowOutcome::Unresolved {
                logical_table: "BR_SECURITY_MASTER_BND".to_string(),
            },
        });
        summary.status = LoadStatus::Failed {
            reason: "Database error: connection refused".to_string(),
        };

        print_load_summary(&summary);
    }

    #[test]
    fn test_env_filter_uses_configured_level() {
        let config = ObservabilityConfig {
            log_level: "debug".to_string(),
            ..ObservabilityConfig::default()
        };

        if std::env::var("RUST_LOG").is_err() {
            let rendered = env_filter(&config).to_string();
            assert!(rendered.contains("debug"));
        }
    }
}
