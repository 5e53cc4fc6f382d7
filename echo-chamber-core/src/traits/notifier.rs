//! User notification Trait

/// Blocking, user-facing notices (the browser's `alert`)
///
/// Platform implementations:
/// - App: `LogNotifier` (stderr + log record)
/// - Tests: recording notifier
pub trait Notifier {
    /// Show `message` to the user
    fn alert(&self, message: &str);
}
