use async_trait::async_trait;

use super::HttpTransport;
use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Blocking transport built on ureq.
///
/// Each request runs on tokio's blocking pool so callers still get a
/// non-blocking handle. Cancelling the handle stops waiting for the result,
/// but a blocking call already in progress runs until its timeout.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    user_agent: String,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        // Statuses are data for the interpreter, never errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(config.timeout))
            .timeout_connect(Some(config.connect_timeout))
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }
}

#[async_trait]
impl HttpTransport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, &user_agent, request))
            .await
            .map_err(|e| TransportError::Other(format!("blocking request task failed: {e}")))?
    }
}

fn execute_blocking(
    agent: &ureq::Agent,
    user_agent: &str,
    request: HttpRequest,
) -> Result<HttpResponse, TransportError> {
    let HttpRequest {
        method,
        url,
        headers,
        body,
    } = request;
    let url = url.as_str();

    let result = match (method, body) {
        (HttpMethod::Get, _) => with_headers(agent.get(url), user_agent, &headers).call(),
        (HttpMethod::Delete, _) => with_headers(agent.delete(url), user_agent, &headers).call(),
        (HttpMethod::Post, Some(body)) => {
            with_headers(agent.post(url), user_agent, &headers).send(body.as_bytes())
        }
        (HttpMethod::Post, None) => with_headers(agent.post(url), user_agent, &headers).send_empty(),
        (HttpMethod::Put, Some(body)) => {
            with_headers(agent.put(url), user_agent, &headers).send(body.as_bytes())
        }
        (HttpMethod::Put, None) => with_headers(agent.put(url), user_agent, &headers).send_empty(),
    };

    let mut response = result.map_err(classify)?;
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| {
            v.to_str()
                .ok()
                .map(|v| (k.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_string().map_err(classify)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    user_agent: &str,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    builder = builder.header("user-agent", user_agent);
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn classify(err: ureq::Error) -> TransportError {
    match err {
        ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
            TransportError::Connection(err.to_string())
        }
        other => TransportError::Other(other.to_string()),
    }
}
