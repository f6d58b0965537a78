//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Invocation Model
//! - One inbound `(topic, payload)` event fans out to zero or more HTTP invocations
//! - Every attempt produces exactly one `InvocationOutcome` on the result channel
//! - Outcomes correlate back to their dispatch call through `DispatchContext`

mod caller;
mod context;
mod error;
mod outcome;
mod relay_config;
mod resolver;

pub use caller::{FunctionCaller, InvocationReply, LocalFunctionCaller};
pub use context::DispatchContext;
pub use error::*;
pub use outcome::*;
pub use relay_config::*;
pub use resolver::{TopicMap, TopicResolver};
