//! Request pipeline: build, dispatch, classify, decode.
//!
//! # Design
//! `ApiManager` composes the stateless `ApiClient` with an injected
//! `Transport` and `IndicatorHandle`. It holds no per-call state, so one
//! manager can serve concurrent calls. The transport round-trip is the only
//! await point.
//!
//! The two operations handle transport failures differently. `send` folds
//! them into `ApiError::Custom`. `send_multipart` returns them unchanged as
//! `UploadError::Transport`. Both behaviors are pinned by tests; unifying
//! them is a product decision.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::ApiClient;
use crate::codec::{Codec, JsonCodec};
use crate::error::{ApiError, UploadError};
use crate::indicator::IndicatorHandle;
use crate::multipart;
use crate::request::{MultipartSpec, RequestSpec};
use crate::transport::Transport;

#[derive(Debug)]
pub struct ApiManager<T, C = JsonCodec> {
    client: ApiClient<C>,
    transport: T,
    indicator: IndicatorHandle,
}

impl<T: Transport> ApiManager<T> {
    /// JSON codec and a `TracingIndicator`, enabled.
    pub fn new(transport: T) -> Self {
        Self {
            client: ApiClient::new(),
            transport,
            indicator: IndicatorHandle::default(),
        }
    }
}

impl<T: Transport, C: Codec> ApiManager<T, C> {
    pub fn with_codec<C2: Codec>(self, codec: C2) -> ApiManager<T, C2> {
        ApiManager {
            client: ApiClient::with_codec(codec),
            transport: self.transport,
            indicator: self.indicator,
        }
    }

    pub fn with_indicator(mut self, indicator: IndicatorHandle) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn indicator(&self) -> &IndicatorHandle {
        &self.indicator
    }

    pub fn client(&self) -> &ApiClient<C> {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a JSON request and decode the response into `R`.
    ///
    /// Transport failures, including body encoding failures, come back as
    /// `ApiError::Custom` with the failure's description.
    pub async fn send<R, B>(&self, spec: RequestSpec<B>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize,
    {
        let _indicator = self.indicator.begin();

        let request = self.client.build_request(&spec)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.execute(request).await.map_err(|e| {
            tracing::warn!(error = %e, "request failed in transport");
            ApiError::Custom(e.to_string())
        })?;
        tracing::debug!(status = response.status, "received response");

        self.client.parse_response(response)
    }

    /// Upload a `multipart/form-data` body and decode the response into `R`.
    ///
    /// A fresh boundary is generated per call. Transport failures are
    /// returned as `UploadError::Transport`.
    pub async fn send_multipart<R>(&self, spec: MultipartSpec) -> Result<R, UploadError>
    where
        R: DeserializeOwned,
    {
        let _indicator = self.indicator.begin();

        let boundary = multipart::new_boundary();
        let request = self.client.build_multipart_request(&spec, &boundary)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            bytes = spec.payload.len(),
            "sending multipart upload"
        );

        let response = self.transport.execute(request).await?;
        tracing::debug!(status = response.status, "received upload response");

        Ok(self.client.parse_multipart_response(response)?)
    }
}
