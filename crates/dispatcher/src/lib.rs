//! # Dispatcher
//!
//! 事件分发模块。
//!
//! 负责：
//! - 消费 `(topic, payload)` 事件
//! - 按 resolver 顺序逐个调用订阅函数
//! - 将每次调用结果发布到结果通道

pub mod dispatcher;
pub mod metrics;

pub use contracts::{DispatchContext, FunctionCaller, InvocationOutcome, TopicResolver};
pub use dispatcher::{Dispatcher, DispatcherConfig, RESULT_CHANNEL_CAPACITY};
pub use metrics::{DispatchMetrics, MetricsSnapshot};
