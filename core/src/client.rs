//! Stateless request builder and response parser.
//!
//! # Design
//! `ApiClient` holds only a `Codec` and carries no state between calls. The
//! `build_*` methods turn a `RequestSpec` or `MultipartSpec` into an `HttpRequest`; the `parse_*`
//! methods classify an `HttpResponse` and decode its body. Whatever runs in
//! between owns the I/O, which keeps this half deterministic and lets the
//! FFI expose it to hosts that bring their own HTTP stack.
//!
//! # Status classification
//! Every status in `ACCEPTED_STATUS` (200..=404) is decoded, including the
//! 4xx codes up to 404: APIs in this product return error payloads with
//! those codes and callers model them in the response type. Every other
//! value, including ones outside the registered 100..=599 range, is
//! `ServerError(status)`.

use std::ops::RangeInclusive;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::{Codec, JsonCodec};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::multipart::{self, FilePart};
use crate::request::{MultipartSpec, RequestSpec};

/// Status codes whose bodies are decoded.
pub const ACCEPTED_STATUS: RangeInclusive<u16> = 200..=404;

#[derive(Debug, Clone, Default)]
pub struct ApiClient<C = JsonCodec> {
    codec: C,
}

impl ApiClient {
    pub fn new() -> Self {
        Self { codec: JsonCodec }
    }
}

impl<C: Codec> ApiClient<C> {
    pub fn with_codec(codec: C) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Build a request with an optional encoded body.
    ///
    /// The codec's `Content-Type` is set when a body is present. Caller
    /// headers are applied afterwards and win on a name clash. An encoding
    /// failure is reported as `Custom`.
    pub fn build_request<B: Serialize>(&self, spec: &RequestSpec<B>) -> Result<HttpRequest, ApiError> {
        let url = spec.url.as_ref().ok_or(ApiError::InvalidUrl)?;
        let mut request = HttpRequest::new(&spec.method, url.as_str());

        if let Some(body) = &spec.body {
            let bytes = self
                .codec
                .encode(body)
                .map_err(|e| ApiError::Custom(e.to_string()))?;
            request.set_header("Content-Type", self.codec.content_type());
            request.body = Some(bytes);
        }

        for (name, value) in &spec.headers {
            request.set_header(name, value);
        }
        Ok(request)
    }

    /// Build a `multipart/form-data` upload delimited by `boundary`.
    pub fn build_multipart_request(
        &self,
        spec: &MultipartSpec,
        boundary: &str,
    ) -> Result<HttpRequest, ApiError> {
        let url = spec.url.as_ref().ok_or(ApiError::InvalidUrl)?;
        let mut request = HttpRequest::new(&spec.method, url.as_str());
        request.set_header("Content-Type", &multipart::content_type(boundary));

        for (name, value) in &spec.headers {
            request.set_header(name, value);
        }

        request.body = Some(multipart::encode(
            boundary,
            &spec.fields,
            FilePart {
                field_name: &spec.field_name,
                file_name: &spec.file_name,
                mime_type: &spec.mime_type,
                data: &spec.payload,
            },
        ));
        Ok(request)
    }

    /// Classify and decode a response to a `build_request` call.
    ///
    /// On a decode failure the raw body is logged alongside the decoder's
    /// error; the caller only sees `DecodingError`.
    pub fn parse_response<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        self.codec.decode(&response.body).map_err(|e| {
            tracing::error!(
                error = %e,
                raw = %String::from_utf8_lossy(&response.body),
                "failed to decode response"
            );
            ApiError::DecodingError
        })
    }

    /// Classify and decode a response to a `build_multipart_request` call.
    pub fn parse_multipart_response<T: DeserializeOwned>(
        &self,
        response: HttpResponse,
    ) -> Result<T, ApiError> {
        check_status(&response)?;
        self.codec.decode(&response.body).map_err(|e| {
            tracing::error!(error = %e, "failed to decode upload response");
            ApiError::DecodingError
        })
    }
}

/// Reject responses whose status is not in `ACCEPTED_STATUS`.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if !ACCEPTED_STATUS.contains(&response.status) {
        return Err(ApiError::ServerError(response.status));
    }
    Ok(())
}
