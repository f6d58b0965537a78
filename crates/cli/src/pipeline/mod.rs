//! Relay orchestration module.

mod relay;
mod stats;

pub use relay::{Relay, RelayPipelineConfig};
pub use stats::RelayStats;
