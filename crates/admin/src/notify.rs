//! Fire-and-forget notification surface.
//!
//! Workflows emit human-readable success/error messages; how they reach the
//! user (toast, console, nothing) is the host's business and no return
//! value is consumed.

/// Sink for user-facing workflow messages.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier that writes messages to the tracing log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "tavola_admin::notify", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "tavola_admin::notify", "{message}");
    }
}
