//! Per-call request descriptions.
//!
//! # Design
//! A `RequestSpec` or `MultipartSpec` is built fresh for each call and is
//! never mutated by the pipeline. The target URL is optional: a string that
//! does not parse becomes `None`, and the pipeline reports that as
//! `ApiError::InvalidUrl` instead of failing at construction time.

use serde::Serialize;
use url::Url;

/// A JSON request: target, verb, caller headers and an optional body.
///
/// `B` is the body type; `()` means "no body".
#[derive(Debug, Clone)]
pub struct RequestSpec<B = ()> {
    pub url: Option<Url>,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<B>,
}

impl RequestSpec {
    pub fn new(method: &str, url: &str) -> Self {
        Self::with_url(method, Url::parse(url).ok())
    }

    pub fn with_url(method: &str, url: Option<Url>) -> Self {
        Self {
            url,
            method: method.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

impl<B> RequestSpec<B> {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Attach a body, serialized by the client's codec at send time.
    pub fn json<T: Serialize>(self, body: T) -> RequestSpec<T> {
        RequestSpec {
            url: self.url,
            method: self.method,
            headers: self.headers,
            body: Some(body),
        }
    }
}

/// A `multipart/form-data` upload of text fields plus one binary payload.
#[derive(Debug, Clone)]
pub struct MultipartSpec {
    pub url: Option<Url>,
    pub method: String,
    pub headers: Vec<(String, String)>,
    /// Form fields in the order they are written to the body.
    pub fields: Vec<(String, String)>,
    pub payload: Vec<u8>,
    pub field_name: String,
    pub file_name: String,
    pub mime_type: String,
}

impl MultipartSpec {
    pub fn new(method: &str, url: &str, payload: impl Into<Vec<u8>>) -> Self {
        Self::with_url(method, Url::parse(url).ok(), payload)
    }

    pub fn with_url(method: &str, url: Option<Url>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            url,
            method: method.to_string(),
            headers: Vec::new(),
            fields: Vec::new(),
            payload: payload.into(),
            field_name: "image".to_string(),
            file_name: "image.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn field(mut self, name: &str, value: &str) -> Self {
        self.fields.push((name.to_string(), value.to_string()));
        self
    }

    pub fn field_name(mut self, field_name: &str) -> Self {
        self.field_name = field_name.to_string();
        self
    }

    pub fn file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    pub fn mime_type(mut self, mime_type: &str) -> Self {
        self.mime_type = mime_type.to_string();
        self
    }
}
