//! InvocationOutcome - Dispatcher output
//!
//! The unit published on the result channel: one per attempted target, plus
//! one extra when the inbound payload was empty.

use bytes::Bytes;
use std::collections::HashMap;

use crate::{ContractError, DispatchContext, InvocationReply};

/// Response headers, multi-valued per name
pub type ResponseHeaders = HashMap<String, Vec<String>>;

/// Synthetic status reported for transport-class failures. Not a real server
/// response; consumers must check `error` before trusting `status`.
pub const STATUS_TRANSPORT_FAILURE: u16 = 503;

/// Result of one invocation attempt (or of the empty-payload check).
///
/// Owned by whichever consumer reads it off the channel; never mutated after
/// publish.
#[derive(Debug)]
pub struct InvocationOutcome {
    /// Context of the originating dispatch call
    pub context: DispatchContext,

    /// Topic the event arrived on (empty on error paths)
    pub topic: String,

    /// Function identifier that was invoked (empty on error paths)
    pub function: String,

    /// Response body (None on error, or when the body was empty / unreadable)
    pub body: Option<Bytes>,

    /// Response headers (None on error)
    pub headers: Option<ResponseHeaders>,

    /// HTTP status; meaningful only when `error` is None, except transport
    /// failures which carry the synthetic 503
    pub status: u16,

    /// Failure cause, if the attempt did not complete a transport exchange
    pub error: Option<ContractError>,
}

impl InvocationOutcome {
    /// Outcome for the empty-payload validation failure. Published before
    /// resolution, so topic and function are unknown.
    pub fn validation_failure(context: DispatchContext) -> Self {
        Self {
            context,
            topic: String::new(),
            function: String::new(),
            body: None,
            headers: None,
            status: 0,
            error: Some(ContractError::EmptyPayload),
        }
    }

    /// Outcome for a failed invocation attempt. Mirrors the validation shape:
    /// topic/function stay blank, the identifier lives inside the error.
    pub fn invocation_failure(context: DispatchContext, error: ContractError) -> Self {
        Self {
            context,
            topic: String::new(),
            function: String::new(),
            body: None,
            headers: None,
            status: STATUS_TRANSPORT_FAILURE,
            error: Some(error),
        }
    }

    /// Outcome for a completed transport exchange (any status, including
    /// non-2xx)
    pub fn success(
        context: DispatchContext,
        topic: impl Into<String>,
        function: impl Into<String>,
        reply: InvocationReply,
    ) -> Self {
        Self {
            context,
            topic: topic.into(),
            function: function.into(),
            body: reply.body,
            headers: Some(reply.headers),
            status: reply.status,
            error: None,
        }
    }

    /// Whether this outcome reports a failure
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failure_shape() {
        let outcome = InvocationOutcome::validation_failure(DispatchContext::new());
        assert!(outcome.is_error());
        assert!(outcome.topic.is_empty());
        assert!(outcome.function.is_empty());
        assert_eq!(outcome.status, 0);
        assert!(outcome.body.is_none());
    }

    #[test]
    fn test_invocation_failure_carries_sentinel_status() {
        let err = ContractError::invocation("echo", ContractError::transport("u", "refused"));
        let outcome = InvocationOutcome::invocation_failure(DispatchContext::new(), err);
        assert_eq!(outcome.status, STATUS_TRANSPORT_FAILURE);
        assert!(outcome.function.is_empty());
        assert!(outcome.error.unwrap().to_string().contains("echo"));
    }

    #[test]
    fn test_success_keeps_status_verbatim() {
        let reply = InvocationReply {
            body: Some(Bytes::from_static(b"hi")),
            status: 404,
            headers: ResponseHeaders::new(),
        };
        let outcome =
            InvocationOutcome::success(DispatchContext::new(), "billing.created", "echo", reply);
        assert!(!outcome.is_error());
        assert_eq!(outcome.status, 404);
        assert_eq!(outcome.topic, "billing.created");
        assert_eq!(outcome.function, "echo");
    }
}
