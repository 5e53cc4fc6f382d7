//! Echo Chamber client entry point
//!
//! Usage: `echo-chamber [CONFIG]`

use std::process::ExitCode;
use std::sync::Arc;

use echo_chamber_app::config::resolve_config_path;
use echo_chamber_app::logging::init_tracing;
use echo_chamber_app::{
    run_session, AppConfig, ConfigService, FileConfigService, LogNotifier, Page, PageChrome,
    TungsteniteTransport,
};
use echo_chamber_core::services::SocketClient;

fn load_config() -> anyhow::Result<AppConfig> {
    match resolve_config_path(std::env::args().nth(1)) {
        Some(path) => FileConfigService::new(path).load(),
        None => Ok(AppConfig::default()),
    }
}

fn build_page(config: &AppConfig) -> anyhow::Result<Page> {
    let chrome = match &config.page.chrome {
        Some(path) => PageChrome::load(path)?,
        None => PageChrome::default(),
    };
    let page = Page::new(&chrome)?;
    Ok(match &config.page.snapshot {
        Some(path) => page.with_snapshot(path),
        None => page,
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.log.level);
    tracing::info!("Starting Echo Chamber client for {}", config.server.url);

    let mut page = match build_page(&config) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("Failed to build page: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let mut client = SocketClient::new(config.server.url.clone(), Arc::new(TungsteniteTransport));
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    match run_session(&mut client, &mut page, &LogNotifier, shutdown).await {
        Ok(Some(stats)) => {
            tracing::info!(
                "Session finished: {} handled, {} unknown, {} failed",
                stats.handled,
                stats.unknown,
                stats.failed
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Session failed: {e}");
            ExitCode::FAILURE
        }
    }
}
