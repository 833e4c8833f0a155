use std::time::Duration;

use reqwest::Client;

use super::{Upstream, UpstreamError};
use crate::cache::{BufferedResponse, WorkerRequest};
use crate::config::Config;

/// HTTP client for the upstream dashboard backend.
pub struct HttpUpstream {
    http_client: Client,
    base_url: String,
}

impl HttpUpstream {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Upstream for HttpUpstream {
    async fn fetch(&self, request: &WorkerRequest) -> Result<BufferedResponse, UpstreamError> {
        let url = format!("{}{}", self.base_url, request.path_and_query);

        // Forward client headers minus the ones describing the client's
        // connection; reqwest derives those from the URL and body.
        let mut headers = request.headers.clone();
        headers.remove(http::header::HOST);
        headers.remove(http::header::CONNECTION);
        headers.remove(http::header::CONTENT_LENGTH);

        let mut builder = self
            .http_client
            .request(request.method.clone(), &url)
            .headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let status = response.status();
        let mut headers = response.headers().clone();

        // Hop-by-hop headers describe the upstream connection; once the body
        // is buffered they no longer apply.
        headers.remove(http::header::TRANSFER_ENCODING);
        headers.remove(http::header::CONNECTION);

        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        Ok(BufferedResponse::new(status, headers, body))
    }
}
