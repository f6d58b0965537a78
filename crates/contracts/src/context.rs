//! DispatchContext - per-dispatch correlation and cancellation
//!
//! The context travels with every outcome produced by the dispatch call that
//! created it, so consumers reading an interleaved result channel can
//! correlate outcomes without relying on arrival order.

use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};
use uuid::Uuid;

/// Correlation id plus cancellation token for one dispatch call.
///
/// Clones share the same id and the same underlying token: cancelling any
/// clone aborts every in-flight invocation issued under this context.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    id: Uuid,
    cancel: CancellationToken,
}

impl DispatchContext {
    /// Create a fresh context with its own token
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            cancel: CancellationToken::new(),
        }
    }

    /// Create a context driven by an externally owned token
    ///
    /// Used when one shutdown signal must abort many dispatch calls at once.
    pub fn with_token(cancel: CancellationToken) -> Self {
        Self {
            id: Uuid::new_v4(),
            cancel,
        }
    }

    /// Correlation id, stable across clones
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Request cancellation of every invocation issued under this context
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Future resolving when cancellation is requested
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.cancel.cancelled()
    }
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_token_and_id() {
        let ctx = DispatchContext::new();
        let clone = ctx.clone();
        assert_eq!(ctx.id(), clone.id());

        clone.cancel();
        assert!(ctx.is_cancelled());
    }

    #[test]
    fn test_fresh_contexts_are_distinct() {
        let a = DispatchContext::new();
        let b = DispatchContext::new();
        assert_ne!(a.id(), b.id());

        a.cancel();
        assert!(!b.is_cancelled());
    }
}
