//! `send` command implementation.
//!
//! One-shot dispatch: resolves the expected outcome count up front, drains
//! exactly that many outcomes, and reports them on stdout.

use std::collections::HashMap;
use std::time::Duration;

use anyhow::{Context, Result};
use bytes::Bytes;
use contracts::{DispatchContext, InvocationOutcome, TopicMap, TopicResolver};
use dispatcher::{Dispatcher, DispatcherConfig};
use invoker::FunctionClient;
use tracing::info;

use crate::cli::SendArgs;
use crate::error::CliError;

/// Execute the `send` command
pub async fn run_send(args: &SendArgs) -> Result<()> {
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    let payload = read_payload(args)?;
    let headers = parse_headers(&args.headers)?;

    let topic_map = TopicMap::from_bindings(&config.topics);
    let matched = topic_map.resolve(&args.topic);
    // One outcome per target, plus the validation outcome for empty payloads
    let expected = matched.len() + usize::from(payload.is_empty());

    info!(
        topic = %args.topic,
        matched = matched.len(),
        bytes = payload.len(),
        "Dispatching event"
    );

    if expected == 0 {
        println!("No functions subscribed to topic '{}'", args.topic);
        return Ok(());
    }

    let client = FunctionClient::from_config(&config.gateway)?;
    let (dispatcher, mut rx) = Dispatcher::new(
        DispatcherConfig {
            gateway_url: config.gateway.url,
        },
        client,
    );

    let ctx = DispatchContext::new();
    if args.timeout > 0 {
        let deadline_ctx = ctx.clone();
        let timeout = Duration::from_secs(args.timeout);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            deadline_ctx.cancel();
        });
    }

    let topic = args.topic.clone();
    let producer = tokio::spawn(async move {
        dispatcher
            .dispatch_with_context(ctx, &topic_map, &topic, &payload, headers.as_ref())
            .await;
        drop(dispatcher);
    });

    let mut failures = 0usize;
    for _ in 0..expected {
        let outcome = rx
            .recv()
            .await
            .context("Result channel closed before all outcomes arrived")?;
        if print_outcome(&outcome) {
            failures += 1;
        }
    }
    producer.await.context("Dispatch task panicked")?;

    if failures > 0 {
        anyhow::bail!("{failures} of {expected} outcomes reported errors");
    }
    Ok(())
}

/// Print one outcome; returns true when it carried an error
fn print_outcome(outcome: &InvocationOutcome) -> bool {
    match &outcome.error {
        Some(error) => {
            println!("✗ error: {error}");
            if let Some(source) = std::error::Error::source(error) {
                println!("    caused by: {source}");
            }
            true
        }
        None => {
            println!("✓ {} [{}]", outcome.function, outcome.status);
            if let Some(body) = &outcome.body {
                println!("{}", String::from_utf8_lossy(body));
            }
            false
        }
    }
}

fn read_payload(args: &SendArgs) -> Result<Bytes> {
    if let Some(path) = &args.data_file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read payload from {}", path.display()))?;
        return Ok(Bytes::from(bytes));
    }
    Ok(Bytes::from(
        args.data.clone().unwrap_or_default().into_bytes(),
    ))
}

/// Parse repeated `KEY=VALUE` header arguments
fn parse_headers(raw: &[String]) -> Result<Option<HashMap<String, String>>> {
    if raw.is_empty() {
        return Ok(None);
    }
    let mut headers = HashMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once('=')
            .ok_or_else(|| CliError::invalid_header(entry))?;
        headers.insert(name.trim().to_string(), value.trim().to_string());
    }
    Ok(Some(headers))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers_key_value() {
        let parsed = parse_headers(&["X-Trace=abc".to_string(), "X-Env= prod ".to_string()])
            .unwrap()
            .unwrap();
        assert_eq!(parsed.get("X-Trace").map(String::as_str), Some("abc"));
        assert_eq!(parsed.get("X-Env").map(String::as_str), Some("prod"));
    }

    #[test]
    fn test_parse_headers_rejects_bare_key() {
        assert!(parse_headers(&["NoEquals".to_string()]).is_err());
    }

    #[test]
    fn test_parse_headers_empty_is_none() {
        assert!(parse_headers(&[]).unwrap().is_none());
    }
}
