//! Executes the requests the views hand out.

use std::time::Duration;

use todo_core::{ApiError, HttpMethod, HttpRequest, HttpResponse};
use tracing::{debug, warn};

/// Performs one HTTP round-trip for a view.
///
/// Non-success statuses are returned as data; only failures to complete the
/// exchange are errors, reported as `ApiError::Network`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Blocking HTTP transport backed by ureq.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.agent.get(&request.path),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder.call().map_err(|e| {
            warn!(method = request.method.as_str(), path = %request.path, error = %e, "request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Network(format!("reading response body: {e}")))?;
        debug!(method = request.method.as_str(), path = %request.path, status, "response received");

        Ok(HttpResponse::new(status, body))
    }
}
