//! Completion notifications fired as each job finishes.

/// Sender for reporting finished jobs while a run is still in progress.
///
/// Wraps a callback that receives each outcome in *completion* order, which
/// may differ from the order jobs were requested in.
pub struct CompletionSender<O> {
    callback: Box<dyn Fn(&O) + Send + Sync>,
}

impl<O> CompletionSender<O> {
    /// Create a new sender from the given callback.
    pub fn new(callback: impl Fn(&O) + Send + Sync + 'static) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Create a no-op sender that discards all notifications.
    pub fn noop() -> Self {
        Self {
            callback: Box::new(|_| {}),
        }
    }

    /// Report a finished job.
    pub fn send(&self, outcome: &O) {
        (self.callback)(outcome);
    }
}

impl<O> Default for CompletionSender<O> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<O> std::fmt::Debug for CompletionSender<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionSender").finish_non_exhaustive()
    }
}
