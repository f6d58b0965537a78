//! 调用结果指标收集模块
//!
//! 基于 InvocationOutcome 收集分发链路的运行指标。

use contracts::InvocationOutcome;
use metrics::{counter, gauge, histogram};

/// 从 InvocationOutcome 记录指标
///
/// 消费者每从结果通道读出一个结果时调用。
///
/// # Example
///
/// ```ignore
/// use observability::metrics::record_outcome;
///
/// while let Some(outcome) = rx.recv().await {
///     record_outcome(&outcome);
///     // ...
/// }
/// ```
pub fn record_outcome(outcome: &InvocationOutcome) {
    // 结果计数器
    counter!("topic_relay_outcomes_total").increment(1);

    match &outcome.error {
        Some(error) => {
            counter!(
                "topic_relay_outcome_errors_total",
                "kind" => error_kind(error).to_string()
            )
            .increment(1);
        }
        None => {
            counter!(
                "topic_relay_invocations_total",
                "topic" => outcome.topic.clone(),
                "function" => outcome.function.clone(),
                "status_class" => status_class(outcome.status).to_string()
            )
            .increment(1);

            gauge!(
                "topic_relay_last_status",
                "function" => outcome.function.clone()
            )
            .set(outcome.status as f64);

            if let Some(body) = &outcome.body {
                histogram!("topic_relay_response_body_bytes").record(body.len() as f64);
            }
        }
    }
}

/// 记录一次 dispatch 调用：topic 与解析到的目标数
pub fn record_dispatch(topic: &str, matched: usize, elapsed_ms: f64) {
    counter!(
        "topic_relay_dispatches_total",
        "topic" => topic.to_string()
    )
    .increment(1);

    gauge!(
        "topic_relay_matched_functions",
        "topic" => topic.to_string()
    )
    .set(matched as f64);

    histogram!("topic_relay_dispatch_latency_ms").record(elapsed_ms);

    if matched == 0 {
        counter!(
            "topic_relay_unmatched_topics_total",
            "topic" => topic.to_string()
        )
        .increment(1);
    }
}

fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "unknown",
    }
}

fn error_kind(error: &contracts::ContractError) -> &'static str {
    use contracts::ContractError;
    match error {
        ContractError::EmptyPayload => "empty_payload",
        ContractError::Cancelled { .. } => "cancelled",
        ContractError::Transport { .. } => "transport",
        ContractError::Invocation { .. } => "invocation",
        _ => "other",
    }
}
