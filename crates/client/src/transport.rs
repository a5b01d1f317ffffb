//! Process-wide HTTP transport.
//!
//! The transport (base URL plus the underlying connection pool) is shared by
//! every client in the process and is initialized exactly once, explicitly.
//! Repeated initialization attempts are no-ops that return the existing
//! value, which makes first use safe under concurrency. Nothing here is
//! triggered implicitly at load time.
//!
//! No retries, no timeout beyond the transport default: one call, one round
//! trip, reported as-is.

use std::time::Instant;

use once_cell::sync::OnceCell;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, RequestBuilder};
use verso_kernel::settings::ApiSettings;

use crate::capture::Capture;
use crate::error::ClientError;

static SHARED: OnceCell<Transport> = OnceCell::new();

pub struct Transport {
    http: Client,
    base_url: String,
}

impl Transport {
    /// Initialize the shared transport, or return the already-initialized
    /// one. Later settings are ignored on purpose.
    pub fn init(api: &ApiSettings) -> Result<&'static Transport, ClientError> {
        SHARED.get_or_try_init(|| Transport::build(api))
    }

    /// The shared transport, if [`Transport::init`] has run.
    pub fn shared() -> Option<&'static Transport> {
        SHARED.get()
    }

    fn build(api: &ApiSettings) -> Result<Self, ClientError> {
        let http = Client::builder().user_agent(api.user_agent.clone()).build()?;
        Ok(Self {
            http,
            base_url: api.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue one request and record its outcome. The observability events
    /// around the call feed the report; they never alter the exchange.
    pub(crate) async fn execute(
        &self,
        method: Method,
        path: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<Capture, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let request = build(
            self.http
                .request(method.clone(), &url)
                .header(ACCEPT, "application/json"),
        );

        tracing::debug!(target: "verso_client", %method, %url, "issuing request");
        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        // A failed body read means no usable capture: transport failure.
        let body = response.text().await?;
        let elapsed = started.elapsed();

        tracing::debug!(
            target: "verso_client",
            %method,
            %url,
            status = status.as_u16(),
            elapsed_ms = elapsed.as_millis() as u64,
            bytes = body.len(),
            "captured response"
        );

        Ok(Capture::new(status, headers, elapsed, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> ApiSettings {
        ApiSettings {
            base_url: base_url.to_string(),
            user_agent: "verso-test".to_string(),
        }
    }

    #[test]
    fn init_is_idempotent_and_keeps_the_first_configuration() {
        let first = Transport::init(&api("http://first.invalid/")).unwrap();
        let second = Transport::init(&api("http://second.invalid")).unwrap();

        assert!(std::ptr::eq(first, second));
        // Trailing slash trimmed; the second base URL never took effect.
        assert_eq!(first.base_url(), "http://first.invalid");
        assert!(Transport::shared().is_some());
    }
}
