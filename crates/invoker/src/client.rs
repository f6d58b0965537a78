//! FunctionClient - reqwest-backed FunctionCaller

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use tracing::{debug, instrument, warn};

use contracts::{
    ContractError, DispatchContext, FunctionCaller, GatewayConfig, InvocationReply,
    ResponseHeaders,
};

/// HTTP function invocation client
///
/// Wraps a shared `reqwest::Client`; cheap to clone, connections are pooled
/// underneath. Knows nothing about topics.
#[derive(Debug, Clone, Default)]
pub struct FunctionClient {
    http: reqwest::Client,
}

impl FunctionClient {
    /// Create a client with transport defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an externally configured transport
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build a client from gateway settings (per-request timeout)
    pub fn from_config(gateway: &GatewayConfig) -> Result<Self, ContractError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = gateway.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder
            .build()
            .map_err(|e| ContractError::transport(&gateway.url, e.to_string()))?;
        Ok(Self { http })
    }
}

impl FunctionCaller for FunctionClient {
    /// One POST exchange against `url`.
    ///
    /// A completed exchange is Ok whatever the status code. A body read
    /// failure after a successful status is tolerated: the anomaly is logged
    /// and the reply carries no body with the real status.
    #[instrument(name = "function_client_invoke", skip(self, ctx, payload, headers), fields(url = %url))]
    async fn invoke(
        &self,
        ctx: &DispatchContext,
        url: &str,
        payload: Bytes,
        headers: Option<&HashMap<String, String>>,
    ) -> Result<InvocationReply, ContractError> {
        let mut request = self.http.post(url).body(payload);
        if let Some(headers) = headers {
            // Single value per name on the outbound side
            for (name, value) in headers {
                request = request.header(name.as_str(), value.as_str());
            }
        }

        let response = tokio::select! {
            // Cancellation wins over a simultaneously completed exchange
            biased;
            _ = ctx.cancelled() => {
                return Err(ContractError::Cancelled { url: url.to_string() });
            }
            result = request.send() => {
                result.map_err(|e| classify_send_error(ctx, url, e))?
            }
        };

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());

        let body = match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => None,
            Ok(bytes) => Some(bytes),
            Err(e) => {
                // Tolerated partial-read: keep the real status, drop the body
                warn!(url, error = %e, "error reading response body");
                None
            }
        };

        debug!(url, status, "exchange complete");

        Ok(InvocationReply {
            body,
            status,
            headers,
        })
    }
}

fn classify_send_error(ctx: &DispatchContext, url: &str, error: reqwest::Error) -> ContractError {
    if ctx.is_cancelled() {
        ContractError::Cancelled {
            url: url.to_string(),
        }
    } else {
        ContractError::transport(url, error.to_string())
    }
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> ResponseHeaders {
    let mut collected = ResponseHeaders::new();
    for (name, value) in headers {
        collected
            .entry(name.as_str().to_string())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }
    collected
}
