//! Local HTTP server for exercising the request pipeline end to end.
//!
//! Routes:
//! - `POST /echo` returns the JSON body it received.
//! - `ANY /status/{code}` answers with `code` and `{"status": code}`.
//! - `ANY /headers` returns the request headers as a JSON object.
//! - `GET /raw` returns a plain-text body that is not JSON.
//! - `POST|PUT /upload` parses `multipart/form-data` and reports what it saw.

use std::collections::BTreeMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path},
    http::{HeaderMap, StatusCode},
    routing::{any, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A file part received by `/upload`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Everything `/upload` parsed out of a multipart body, in arrival order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadedFile>,
}

pub fn app() -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route("/status/{code}", any(status))
        .route("/headers", any(headers))
        .route("/raw", get(raw))
        .route("/upload", post(upload).put(upload))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn echo(Json(body): Json<Value>) -> Json<Value> {
    Json(body)
}

async fn status(Path(code): Path<u16>) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let status = StatusCode::from_u16(code).map_err(|_| StatusCode::BAD_REQUEST)?;
    Ok((status, Json(json!({ "status": code }))))
}

async fn headers(headers: HeaderMap) -> Json<BTreeMap<String, String>> {
    Json(
        headers
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect(),
    )
}

async fn raw() -> &'static str {
    "plain text, not json"
}

async fn upload(mut multipart: Multipart) -> Result<Json<UploadReceipt>, MultipartError> {
    let mut receipt = UploadReceipt::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match field.file_name().map(str::to_string) {
            Some(file_name) => {
                let content_type = field.content_type().map(str::to_string);
                let data = field.bytes().await?;
                receipt.files.push(UploadedFile {
                    field_name: name,
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            None => {
                let value = field.text().await?;
                receipt.fields.push((name, value));
            }
        }
    }
    tracing::debug!(
        fields = receipt.fields.len(),
        files = receipt.files.len(),
        "upload received"
    );
    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipt_serializes_fields_as_pairs() {
        let receipt = UploadReceipt {
            fields: vec![("name".to_string(), "a".to_string())],
            files: vec![UploadedFile {
                field_name: "image".to_string(),
                file_name: "x.jpg".to_string(),
                content_type: Some("image/jpeg".to_string()),
                data: vec![1, 2],
            }],
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["fields"][0][0], "name");
        assert_eq!(json["fields"][0][1], "a");
        assert_eq!(json["files"][0]["file_name"], "x.jpg");
        assert_eq!(json["files"][0]["data"], json!([1, 2]));
    }

    #[test]
    fn receipt_roundtrips_through_json() {
        let receipt = UploadReceipt {
            fields: vec![("k".to_string(), "v".to_string())],
            files: Vec::new(),
        };
        let text = serde_json::to_string(&receipt).unwrap();
        let back: UploadReceipt = serde_json::from_str(&text).unwrap();
        assert_eq!(back, receipt);
    }
}
