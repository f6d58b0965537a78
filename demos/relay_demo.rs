//! Relay Demo
//!
//! Demonstrates reading a relay configuration, dispatching a few events
//! against a gateway, and draining the result channel.
//!
//! Run with: RELAY_GATEWAY=http://localhost:8080/function cargo run --bin relay_demo [config_path]

use std::path::PathBuf;

use bytes::Bytes;
use config_loader::ConfigLoader;
use contracts::{DispatchContext, GatewayConfig, RelayConfig, TopicBinding, TopicMap};
use dispatcher::{Dispatcher, DispatcherConfig};
use invoker::FunctionClient;
use observability::{record_outcome, LogFormat, ObservabilityConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init_with_config(ObservabilityConfig {
        log_format: LogFormat::Pretty,
        metrics_port: None,
        ..Default::default()
    })?;

    info!("Starting Relay Demo");

    let config = load_or_default_config();
    info!(gateway = %config.gateway.url, topics = config.topics.len(), "Config ready");

    // ==== Stage 1: Wire resolver, client, and dispatcher ====
    let topic_map = TopicMap::from_bindings(&config.topics);
    let client = FunctionClient::from_config(&config.gateway)?;
    let (relay, mut rx) = Dispatcher::new(
        DispatcherConfig {
            gateway_url: config.gateway.url.clone(),
        },
        client,
    );

    // ==== Stage 2: Drain outcomes in the background ====
    let print_response = config.gateway.print_response;
    let consumer = tokio::spawn(async move {
        let mut seen = 0u64;
        while let Some(outcome) = rx.recv().await {
            seen += 1;
            record_outcome(&outcome);
            match &outcome.error {
                Some(error) => warn!(error = %error, "Invocation failed"),
                None => {
                    info!(
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
        seen
    });

    // ==== Stage 3: Dispatch one event per configured topic ====
    for binding in &config.topics {
        let payload = Bytes::from(format!("demo event for {}", binding.topic));
        relay
            .dispatch_with_context(
                DispatchContext::new(),
                &topic_map,
                &binding.topic,
                &payload,
                None,
            )
            .await;
    }

    // Closing the channel lets the consumer finish
    drop(relay);
    let seen = consumer.await?;
    info!(outcomes = seen, "Relay demo finished");

    Ok(())
}

/// Load config from argv[1] if given, otherwise build a small default
fn load_or_default_config() -> RelayConfig {
    if let Some(path) = std::env::args().nth(1) {
        match ConfigLoader::load_from_path(&PathBuf::from(&path)) {
            Ok(config) => return config,
            Err(e) => warn!(path = %path, error = %e, "Falling back to default config"),
        }
    }

    let gateway_url = std::env::var("RELAY_GATEWAY")
        .unwrap_or_else(|_| "http://localhost:8080/function".to_string());

    RelayConfig {
        version: Default::default(),
        gateway: GatewayConfig {
            url: gateway_url.trim_end_matches('/').to_string(),
            print_response: true,
            timeout_secs: Some(5),
        },
        topics: vec![
            TopicBinding {
                topic: "demo.greeting".to_string(),
                functions: vec!["echo".to_string()],
            },
            TopicBinding {
                topic: "demo.farewell".to_string(),
                functions: vec!["echo".to_string(), "figlet".to_string()],
            },
        ],
    }
}
