//! The seam between the executor and the network.
//!
//! # Design
//! `Transport` sends one descriptor and returns the complete response with
//! its body already read as text, so whatever the executor times includes
//! body transfer. `UreqTransport` is the production implementation; tests
//! substitute in-memory transports.

use std::time::Duration;

use ureq::http::HeaderMap;
use ureq::Agent;

use crate::error::TransportError;
use crate::http::{HttpMethod, RawResponse, RequestDescriptor};

/// Sends a request and reads the whole response.
pub trait Transport {
    /// Issue exactly one call. Any completed HTTP response, whatever its
    /// status, is `Ok`.
    fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        (**self).send(request)
    }
}

/// Settings for [`UreqTransport`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Overall deadline for one exchange. `None` lets a request run until it
    /// completes or the connection fails.
    pub timeout: Option<Duration>,
    /// Overrides ureq's default `User-Agent`.
    pub user_agent: Option<String>,
}

/// Blocking transport backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: TransportConfig) -> Self {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout);
        if let Some(user_agent) = config.user_agent {
            builder = builder.user_agent(user_agent);
        }
        Self {
            agent: builder.build().new_agent(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, TransportError> {
        let agent = &self.agent;
        let url = request.url.as_str();
        let body = request.body.as_deref().map(str::as_bytes);

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), request).call(),
            HttpMethod::Delete => {
                let builder = with_headers(agent.delete(url), request);
                match body {
                    Some(bytes) => builder.force_send_body().send(bytes),
                    None => builder.call(),
                }
            }
            HttpMethod::Post => send_with_body(with_headers(agent.post(url), request), body),
            HttpMethod::Put => send_with_body(with_headers(agent.put(url), request), body),
            HttpMethod::Patch => send_with_body(with_headers(agent.patch(url), request), body),
        };

        let mut response = result?;
        let status = response.status();
        let headers = collect_headers(response.headers());
        let bytes = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}

/// Apply the descriptor's headers to a ureq request builder.
fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    request: &RequestDescriptor,
) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_with_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&[u8]>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(bytes) => builder.send(bytes),
        None => builder.send_empty(),
    }
}

/// Flatten a header map, merging repeated names into one comma-joined entry.
fn collect_headers(map: &HeaderMap) -> Vec<(String, String)> {
    let mut headers: Vec<(String, String)> = Vec::new();
    for (name, value) in map {
        let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
        match headers.iter_mut().find(|(k, _)| k == name.as_str()) {
            Some((_, existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            None => headers.push((name.as_str().to_string(), value)),
        }
    }
    headers
}
