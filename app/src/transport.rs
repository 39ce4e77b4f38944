//! Executes core requests over HTTP with ureq.

use blog_core::{HttpMethod, HttpRequest, HttpResponse, Outcome, TransportError};

/// Blocking executor shared by every page of one run.
pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new() -> Self {
        // Non-2xx statuses come back as data; the core interprets them.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Outcome {
        let method = req.method.as_str();
        let url = req.path.clone();
        tracing::debug!(method, %url, "sending request");

        let response = match (req.method, req.body) {
            (HttpMethod::Get, _) => self.agent.get(&req.path).call(),
            (HttpMethod::Delete, _) => self.agent.delete(&req.path).call(),
            (HttpMethod::Post, Some(body)) => self
                .agent
                .post(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Post, None) => self.agent.post(&req.path).send_empty(),
            (HttpMethod::Put, Some(body)) => self
                .agent
                .put(&req.path)
                .content_type("application/json")
                .send(body.as_bytes()),
            (HttpMethod::Put, None) => self.agent.put(&req.path).send_empty(),
        };

        let mut response = response.map_err(|err| {
            tracing::warn!(method, %url, %err, "request failed");
            TransportError(err.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|err| TransportError(err.to_string()))?;
        if req.method.is_mutating() {
            tracing::info!(method, %url, status, "response received");
        } else {
            tracing::debug!(method, %url, status, "response received");
        }
        Ok(HttpResponse::new(status, body))
    }
}
