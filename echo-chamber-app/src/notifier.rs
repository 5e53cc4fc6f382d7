//! Terminal notifier

use echo_chamber_core::traits::Notifier;

/// Prints alerts to stderr and records them in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        eprintln!("[alert] {message}");
        tracing::warn!(alert = message, "Alert raised");
    }
}
