//! Dispatcher - turns one topic event into N invocations and N outcomes

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use contracts::{
    DispatchContext, FunctionCaller, InvocationOutcome, TopicResolver,
};

use crate::metrics::DispatchMetrics;

/// Capacity of the result channel. 1 is the closest tokio rendezvous to an
/// unbuffered channel: a slow consumer backpressures the dispatch loop.
pub const RESULT_CHANNEL_CAPACITY: usize = 1;

/// Dispatcher configuration
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Gateway base URL, no trailing separator. Joined with the function
    /// identifier by a single `/`.
    pub gateway_url: String,
}

/// The Dispatcher that fans one event out to its subscribed functions.
///
/// Owns the sender side of the result channel; the receiver is handed out
/// once at construction. Clones share sender, caller, and metrics, so
/// multiple dispatch calls may run concurrently against one channel.
pub struct Dispatcher<C: FunctionCaller> {
    gateway_url: String,
    caller: C,
    tx: mpsc::Sender<InvocationOutcome>,
    metrics: Arc<DispatchMetrics>,
}

impl<C: FunctionCaller + Clone> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            gateway_url: self.gateway_url.clone(),
            caller: self.caller.clone(),
            tx: self.tx.clone(),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<C: FunctionCaller> Dispatcher<C> {
    /// Create a dispatcher and the receiving end of its result channel
    pub fn new(config: DispatcherConfig, caller: C) -> (Self, mpsc::Receiver<InvocationOutcome>) {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        (
            Self {
                gateway_url: config.gateway_url,
                caller,
                tx,
                metrics: Arc::new(DispatchMetrics::new()),
            },
            rx,
        )
    }

    /// Get current metrics
    pub fn metrics(&self) -> &Arc<DispatchMetrics> {
        &self.metrics
    }

    /// Dispatch with a fresh context and no extra headers
    pub async fn dispatch(&self, resolver: &dyn TopicResolver, topic: &str, payload: &Bytes) {
        self.dispatch_with_context(DispatchContext::new(), resolver, topic, payload, None)
            .await;
    }

    /// Dispatch one event: resolve subscribers, invoke each in resolver
    /// order, publish one outcome per attempt.
    ///
    /// The empty-payload check publishes an error outcome but does not stop
    /// resolution and dispatch; callers relying on outcome counts get the
    /// validation outcome in addition to the per-target ones. Returns after
    /// every resolved target was attempted exactly once.
    #[instrument(
        name = "dispatcher_dispatch",
        skip(self, ctx, resolver, payload, headers),
        fields(topic = %topic, context_id = %ctx.id())
    )]
    pub async fn dispatch_with_context(
        &self,
        ctx: DispatchContext,
        resolver: &dyn TopicResolver,
        topic: &str,
        payload: &Bytes,
        headers: Option<&HashMap<String, String>>,
    ) {
        if payload.is_empty() {
            self.metrics.inc_validation_count();
            self.publish(InvocationOutcome::validation_failure(ctx.clone()))
                .await;
        }

        let matched = resolver.resolve(topic);
        for function in matched {
            info!(function = %function, "invoking function");
            self.metrics.inc_invoked_count();

            let url = format!("{}/{}", self.gateway_url, function);

            match self
                .caller
                .invoke(&ctx, &url, payload.clone(), headers)
                .await
            {
                Err(e) => {
                    self.metrics.inc_failure_count();
                    let wrapped = contracts::ContractError::invocation(&function, e);
                    self.publish(InvocationOutcome::invocation_failure(ctx.clone(), wrapped))
                        .await;
                    // One target failing never aborts the remaining targets
                }
                Ok(reply) => {
                    self.publish(InvocationOutcome::success(
                        ctx.clone(),
                        topic,
                        &function,
                        reply,
                    ))
                    .await;
                }
            }
        }
    }

    /// Publish one outcome, blocking until the consumer takes it.
    ///
    /// A closed channel means the consumer is gone for good; the outcome is
    /// dropped with a warning instead of failing the dispatch call.
    async fn publish(&self, outcome: InvocationOutcome) {
        if self.tx.send(outcome).await.is_err() {
            self.metrics.inc_dropped_count();
            warn!("result channel closed, outcome dropped");
        } else {
            self.metrics.inc_published_count();
        }
    }
}
