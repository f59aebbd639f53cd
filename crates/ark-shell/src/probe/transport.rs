use crate::{ProbeTarget, ShellError, ShellResult};

use async_trait::async_trait;

/// One outbound request per call. Implementations report any HTTP response
/// as `Ok(status)` and only transport-level failures as errors.
#[async_trait]
pub trait ProbeTransport: Send + Sync {
    async fn get(&self, target: &ProbeTarget) -> ShellResult<u16>;
}

/// Plain and TLS HTTP transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Probes target the local server, so system proxies are bypassed and no
    /// connections are pooled between attempts. Redirects are not followed:
    /// a 3xx is already an answer.
    pub fn new() -> ShellResult<Self> {
        let client = reqwest::Client::builder()
            .no_proxy()
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ShellError::transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ProbeTransport for HttpTransport {
    async fn get(&self, target: &ProbeTarget) -> ShellResult<u16> {
        let response = self
            .client
            .get(target.url())
            .send()
            .await
            .map_err(|e| ShellError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        // Body is never read
        drop(response);

        Ok(status)
    }
}
