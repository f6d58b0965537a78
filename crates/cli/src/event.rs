//! Inbound event shape for the `run` command's NDJSON stream.

use bytes::Bytes;
use serde::Deserialize;
use std::collections::HashMap;

/// One line of the stdin event stream:
/// `{"topic": "billing.created", "data": "...", "headers": {"X-Trace": "abc"}}`
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    /// Event classification string
    pub topic: String,

    /// Message payload (UTF-8 text)
    #[serde(default)]
    pub data: String,

    /// Extra request headers, single value per name
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
}

impl InboundEvent {
    /// Payload as bytes for dispatch
    pub fn payload(&self) -> Bytes {
        Bytes::from(self.data.clone().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_event() {
        let line = r#"{"topic": "t", "data": "hello", "headers": {"X-Trace": "abc"}}"#;
        let event: InboundEvent = serde_json::from_str(line).unwrap();
        assert_eq!(event.topic, "t");
        assert_eq!(event.payload().as_ref(), b"hello");
        assert_eq!(
            event.headers.unwrap().get("X-Trace").map(String::as_str),
            Some("abc")
        );
    }

    #[test]
    fn test_data_and_headers_are_optional() {
        let event: InboundEvent = serde_json::from_str(r#"{"topic": "t"}"#).unwrap();
        assert!(event.payload().is_empty());
        assert!(event.headers.is_none());
    }
}
