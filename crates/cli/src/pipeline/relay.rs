//! Relay orchestrator - wires resolver, dispatcher, and outcome consumer.

use std::time::Instant;

use anyhow::{Context, Result};
use contracts::{DispatchContext, InvocationOutcome, RelayConfig, TopicMap, TopicResolver};
use dispatcher::{Dispatcher, DispatcherConfig};
use invoker::FunctionClient;
use observability::{record_dispatch, record_outcome};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::RelayStats;
use crate::event::InboundEvent;

/// Relay pipeline configuration
#[derive(Debug, Clone)]
pub struct RelayPipelineConfig {
    /// Validated relay configuration
    pub config: RelayConfig,

    /// Echo response bodies to stdout
    pub print_response: bool,
}

/// Outcome totals reported by the consumer task
#[derive(Debug, Default, Clone, Copy)]
struct ConsumerTotals {
    ok: u64,
    err: u64,
}

/// Main relay orchestrator
///
/// Owns the dispatcher and the long-lived consumer draining its result
/// channel. Events come from any line-oriented NDJSON reader (stdin in
/// production).
pub struct Relay {
    dispatcher: Dispatcher<FunctionClient>,
    topic_map: TopicMap,
    consumer: JoinHandle<ConsumerTotals>,
}

impl Relay {
    /// Build the relay from validated configuration
    pub fn new(pipeline_config: RelayPipelineConfig) -> Result<Self> {
        let RelayPipelineConfig {
            config,
            print_response,
        } = pipeline_config;

        let client =
            FunctionClient::from_config(&config.gateway).context("Failed to build HTTP client")?;
        let topic_map = TopicMap::from_bindings(&config.topics);

        let (dispatcher, rx) = Dispatcher::new(
            DispatcherConfig {
                gateway_url: config.gateway.url,
            },
            client,
        );

        let consumer = spawn_outcome_consumer(rx, print_response);

        info!(
            topics = topic_map.topic_count(),
            "Relay pipeline assembled"
        );

        Ok(Self {
            dispatcher,
            topic_map,
            consumer,
        })
    }

    /// Run until the event stream ends or a shutdown signal arrives.
    ///
    /// Cancelling via Ctrl+C/SIGTERM aborts in-flight invocations through the
    /// dispatch contexts, then waits for the consumer to drain.
    pub async fn run<R>(self, reader: R) -> Result<RelayStats>
    where
        R: AsyncBufRead + Unpin,
    {
        let start = Instant::now();
        let shutdown = CancellationToken::new();

        let signal = setup_shutdown_signal();
        tokio::pin!(signal);

        let mut lines = reader.lines();
        let mut events_read = 0u64;
        let mut events_dispatched = 0u64;

        loop {
            tokio::select! {
                _ = &mut signal => {
                    warn!("Received shutdown signal, stopping relay");
                    shutdown.cancel();
                    break;
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read event stream")? else {
                        info!("Event stream closed");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    events_read += 1;

                    let event: InboundEvent = match serde_json::from_str(&line) {
                        Ok(event) => event,
                        Err(e) => {
                            warn!(line = events_read, error = %e, "Skipping malformed event");
                            continue;
                        }
                    };

                    self.dispatch_event(&shutdown, &event).await;
                    events_dispatched += 1;
                }
            }
        }

        // Closing the channel lets the consumer finish
        drop(self.dispatcher);
        let totals = self
            .consumer
            .await
            .context("Outcome consumer task panicked")?;

        Ok(RelayStats {
            events_read,
            events_dispatched,
            outcomes_ok: totals.ok,
            outcomes_err: totals.err,
            duration: start.elapsed(),
        })
    }

    async fn dispatch_event(&self, shutdown: &CancellationToken, event: &InboundEvent) {
        let matched = self.topic_map.resolve(&event.topic).len();
        let ctx = DispatchContext::with_token(shutdown.child_token());
        let started = Instant::now();

        self.dispatcher
            .dispatch_with_context(
                ctx,
                &self.topic_map,
                &event.topic,
                &event.payload(),
                event.headers.as_ref(),
            )
            .await;

        record_dispatch(
            &event.topic,
            matched,
            started.elapsed().as_secs_f64() * 1000.0,
        );
    }
}

/// Drain the result channel, recording metrics and logging every outcome
fn spawn_outcome_consumer(
    mut rx: mpsc::Receiver<InvocationOutcome>,
    print_response: bool,
) -> JoinHandle<ConsumerTotals> {
    tokio::spawn(async move {
        let mut totals = ConsumerTotals::default();

        while let Some(outcome) = rx.recv().await {
            record_outcome(&outcome);

            match &outcome.error {
                Some(error) => {
                    totals.err += 1;
                    warn!(
                        context_id = %outcome.context.id(),
                        error = %error,
                        "Invocation failed"
                    );
                }
                None => {
                    totals.ok += 1;
                    info!(
                        context_id = %outcome.context.id(),
                        topic = %outcome.topic,
                        function = %outcome.function,
                        status = outcome.status,
                        "Invocation completed"
                    );
                    if print_response {
                        if let Some(body) = &outcome.body {
                            println!("{}", String::from_utf8_lossy(body));
                        }
                    }
                }
            }
        }

        totals
    })
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
