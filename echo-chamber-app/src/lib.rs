//! Echo Chamber client application.
//!
//! Wires the core services to a real WebSocket (`TungsteniteTransport`), a
//! TOML configuration file and an in-memory page that the server drives.

pub mod config;
pub mod logging;
pub mod notifier;
pub mod page;
pub mod transport;

use std::future::Future;

use echo_chamber_core::error::CoreResult;
use echo_chamber_core::services::{OpenOutcome, SessionStats, SocketClient};
use echo_chamber_core::traits::Notifier;

pub use config::{AppConfig, ConfigService, FileConfigService};
pub use notifier::LogNotifier;
pub use page::{Page, PageChrome};
pub use transport::TungsteniteTransport;

/// Open `client` and feed every frame into `page` until the server closes
/// the connection or `shutdown` completes.
///
/// The connection is closed before returning. Returns `None` when the
/// session was interrupted by `shutdown`.
pub async fn run_session<N, F>(
    client: &mut SocketClient,
    page: &mut Page,
    notifier: &N,
    shutdown: F,
) -> CoreResult<Option<SessionStats>>
where
    N: Notifier + ?Sized,
    F: Future<Output = ()>,
{
    if client.open().await? == OpenOutcome::AlreadyOpen {
        tracing::debug!("Reusing open connection to {}", client.url());
    }

    let stats = tokio::select! {
        stats = client.run(page, notifier) => Some(stats?),
        () = shutdown => {
            tracing::info!("Shutdown requested");
            None
        }
    };

    client.close().await?;
    Ok(stats)
}
