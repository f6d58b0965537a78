//! # Invoker
//!
//! HTTP 函数调用模块。
//!
//! 负责：
//! - 单次 POST 请求/响应交换
//! - 传播取消令牌，中止在途请求
//! - 将传输结果规范化为 `InvocationReply`

mod client;

pub use client::FunctionClient;
pub use contracts::{FunctionCaller, InvocationReply};
