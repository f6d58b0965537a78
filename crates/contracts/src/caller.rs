//! FunctionCaller trait - invocation seam between Dispatcher and transport
//!
//! The dispatcher never talks HTTP directly; it goes through this trait so
//! the transport can be swapped for a mock in tests.

use bytes::Bytes;
use std::collections::HashMap;

use crate::{ContractError, DispatchContext, ResponseHeaders};

/// What a completed transport exchange yields.
///
/// A non-2xx status is still a completed exchange; only transport-level
/// failures surface as errors.
#[derive(Debug, Clone)]
pub struct InvocationReply {
    /// Response body (None when empty, or when the read failed after a
    /// successful status - a tolerated partial-read)
    pub body: Option<Bytes>,

    /// Status code, verbatim from the server
    pub status: u16,

    /// Response headers
    pub headers: ResponseHeaders,
}

/// One POST-style request/response exchange against a fully-formed URL
///
/// Implementations must honor the context token: cancellation aborts the
/// in-flight exchange and surfaces as a transport-class error.
#[trait_variant::make(FunctionCaller: Send)]
pub trait LocalFunctionCaller {
    /// Invoke the function at `url` with `payload` as the request body.
    ///
    /// `headers`, if present, are copied onto the outbound request with a
    /// single value per name.
    ///
    /// # Errors
    /// Transport-class failures only (connect, timeout, cancellation).
    async fn invoke(
        &self,
        ctx: &DispatchContext,
        url: &str,
        payload: Bytes,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<InvocationReply, ContractError>;
}
