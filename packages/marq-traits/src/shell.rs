use std::time::Duration;

/// Host-shell capabilities a document (or a widget driving it) may call on.
///
/// Every method has a no-op default so headless embedders only implement
/// what their environment actually provides.
pub trait ShellProvider {
    fn request_redraw(&self) {}

    /// Schedule a one-shot callback after `delay`.
    ///
    /// There is deliberately no cancellation handle: callers that schedule
    /// through this hook must be idempotent when the callback fires against
    /// stale state.
    fn request_timeout(&self, delay: Duration) {
        let _ = delay;
    }

    /// The rendered height of a node in CSS pixels, if the shell performs
    /// layout. Headless shells return `None`.
    fn node_height(&self, node_id: usize) -> Option<f32> {
        let _ = node_id;
        None
    }
}

pub struct DummyShellProvider;
impl ShellProvider for DummyShellProvider {}
