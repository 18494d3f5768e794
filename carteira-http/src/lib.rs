//! reqwest-backed [`Transport`] for the carteira dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use carteira_core::{
    CarteiraError, DispatchConfig, HeaderSet, HttpMethod, RawResponse, ResolvedRequest, Transport,
    TransportError,
};

mod convert;

pub use convert::map_reqwest_error;

/// HTTP transport over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Build a client for `cfg`.
    ///
    /// The client-side timeout mirrors `cfg.request_timeout` so a stalled connection is
    /// abandoned even without the dispatcher's deadline.
    ///
    /// # Errors
    /// Returns `Config` if the underlying client cannot be constructed (e.g. the TLS
    /// backend fails to initialise).
    pub fn new(cfg: &DispatchConfig) -> Result<Self, CarteiraError> {
        let mut builder =
            reqwest::Client::builder().user_agent(format!("carteira/{}", cfg.client_version));
        if let Some(t) = cfg.request_timeout {
            builder = builder.timeout(t);
        }
        let client = builder
            .build()
            .map_err(|e| CarteiraError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            timeout: cfg.request_timeout,
        })
    }

    /// Wrap an existing client. Timeouts are whatever `client` was configured with.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: None,
        }
    }

    fn build(&self, req: &ResolvedRequest) -> Result<reqwest::RequestBuilder, TransportError> {
        let mut rb = match req.method {
            HttpMethod::Get => self.client.get(&req.url),
            HttpMethod::Post => self.client.post(&req.url),
        };
        for (name, value) in req.headers.iter() {
            rb = rb.header(name, value);
        }
        if req.method == HttpMethod::Post
            && let Some(body) = &req.body
        {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| TransportError::Other(format!("failed to encode body: {e}")))?;
            rb = rb.body(bytes);
        }
        Ok(rb)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    fn name(&self) -> &'static str {
        "carteira-http"
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "carteira_http::send",
            skip(self, request),
            fields(method = %request.method, url = %request.url),
        )
    )]
    async fn send(&self, request: &ResolvedRequest) -> Result<RawResponse, TransportError> {
        let resp = self
            .build(request)?
            .send()
            .await
            .map_err(|e| map_reqwest_error(&e, self.timeout))?;

        let status = resp.status();
        let headers: HeaderSet = resp
            .headers()
            .iter()
            .filter_map(|(n, v)| v.to_str().ok().map(|v| (n.as_str().to_string(), v.to_string())))
            .collect();
        let body = resp
            .bytes()
            .await
            .map_err(|e| map_reqwest_error(&e, self.timeout))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "response received");

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: body.to_vec(),
        })
    }
}
