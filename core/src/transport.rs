//! Transport capability: the one place the pipeline suspends.
//!
//! # Design
//! The pipeline only needs `execute(request) -> response`. Anything that
//! can perform an HTTP round-trip implements `Transport`; tests script one,
//! the default build ships `UreqTransport`, and mobile hosts skip it
//! entirely by driving `ApiClient` through the FFI.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the round-trip. Every HTTP status, including 4xx and 5xx, is
    /// a successful `HttpResponse`; `Err` is reserved for failures where no
    /// response was obtained.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}

#[cfg(feature = "ureq-transport")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod ureq_transport {
    use std::time::Duration;

    use async_trait::async_trait;
    use ureq::config::ConfigBuilder;
    use ureq::typestate::AgentScope;
    use ureq::Agent;

    use super::Transport;
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking `ureq` agent driven from a tokio blocking thread.
    ///
    /// Status-as-error is disabled so that 4xx/5xx responses come back as
    /// data and reach status classification. Non-standard methods are
    /// allowed.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            let agent = Self::config().build().new_agent();
            Self { agent }
        }

        pub fn with_timeout(timeout: Duration) -> Self {
            let agent = Self::config()
                .timeout_global(Some(timeout))
                .build()
                .new_agent();
            Self { agent }
        }

        // Extension verbs such as PURGE pass through; `http` still rejects
        // malformed method tokens when the request is built.
        fn config() -> ConfigBuilder<AgentScope> {
            Agent::config_builder()
                .http_status_as_error(false)
                .allow_non_standard_methods(true)
        }

        fn execute_blocking(agent: &Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = ureq::http::Request::builder()
                .method(request.method.as_str())
                .uri(request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            let result = match request.body {
                Some(body) => {
                    let wire = builder
                        .body(body)
                        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                    agent.run(wire)
                }
                None => {
                    let wire = builder
                        .body(())
                        .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
                    agent.run(wire)
                }
            };
            let mut response = result.map_err(|e| TransportError::Network(e.to_string()))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_vec()
                .map_err(|e| TransportError::Network(e.to_string()))?;

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for UreqTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let agent = self.agent.clone();
            tokio::task::spawn_blocking(move || Self::execute_blocking(&agent, request))
                .await
                .map_err(|e| TransportError::Network(e.to_string()))?
        }
    }
}
