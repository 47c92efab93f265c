//! Client-side HTTP request pipeline with multipart uploads.
//!
//! # Overview
//! `ApiManager::send` builds a JSON request, dispatches it through an
//! injected `Transport`, classifies the status and decodes the body into
//! the caller's type. `ApiManager::send_multipart` does the same for
//! `multipart/form-data` uploads. A loading indicator, if enabled, is shown
//! for the duration of each call.
//!
//! # Design
//! - `ApiClient` is the pure half: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. Hosts that do their own I/O
//!   (see the `ffi` crate) use it directly.
//! - `ApiManager` adds the transport round-trip and the indicator.
//! - Transport, codec and indicator are capabilities passed in by the
//!   caller; there is no global state.
//! - `validation` holds the email and password validators used by forms.

pub mod client;
pub mod codec;
pub mod error;
pub mod http;
pub mod indicator;
pub mod manager;
pub mod multipart;
pub mod request;
pub mod transport;
pub mod validation;

pub use client::{ApiClient, ACCEPTED_STATUS};
pub use codec::{Codec, CodecError, JsonCodec};
pub use error::{ApiError, TransportError, UploadError};
pub use http::{HttpRequest, HttpResponse};
pub use indicator::{Indicator, IndicatorGuard, IndicatorHandle, NoopIndicator, TracingIndicator};
pub use manager::ApiManager;
pub use request::{MultipartSpec, RequestSpec};
pub use transport::Transport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
pub use validation::{
    EmailValidator, PasswordRules, PasswordValidationResult, PasswordValidator,
};
