use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, UploadReceipt};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn multipart_request(boundary: &str, body: Vec<u8>) -> Request<axum::body::Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            http::header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(axum::body::Body::from(body))
        .unwrap()
}

// --- echo ---

#[tokio::test]
async fn echo_returns_body() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", r#"{"name":"a","n":[1,2]}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body, serde_json::json!({"name": "a", "n": [1, 2]}));
}

#[tokio::test]
async fn echo_rejects_malformed_json() {
    let resp = app()
        .oneshot(json_request("POST", "/echo", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- status ---

#[tokio::test]
async fn status_answers_with_requested_code() {
    for code in [200u16, 201, 404, 500, 503] {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri(format!("/status/{code}"))
                    .body(String::new())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), code);
        let body: serde_json::Value = body_json(resp).await;
        assert_eq!(body["status"], code);
    }
}

#[tokio::test]
async fn status_accepts_any_method() {
    let resp = app()
        .oneshot(json_request("DELETE", "/status/202", ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn status_out_of_range_is_bad_request() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/status/42")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- headers / raw ---

#[tokio::test]
async fn headers_are_echoed_lowercase() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/headers")
                .header("X-Client", "ios")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();
    let headers: std::collections::BTreeMap<String, String> = body_json(resp).await;
    assert_eq!(headers.get("x-client").map(String::as_str), Some("ios"));
}

#[tokio::test]
async fn raw_is_not_json() {
    let resp = app()
        .oneshot(Request::builder().uri("/raw").body(String::new()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body_bytes(resp).await;
    assert!(serde_json::from_slice::<serde_json::Value>(&bytes).is_err());
}

// --- upload ---

#[tokio::test]
async fn upload_parses_fields_and_file() {
    let body = b"--B\r\n\
Content-Disposition: form-data; name=\"name\"\r\n\r\n\
a\r\n\
--B\r\n\
Content-Disposition: form-data; name=\"image\"; filename=\"x.jpg\"\r\n\
Content-Type: image/jpeg\r\n\r\n\
\xff\xd8\xff\r\n\
--B--\r\n"
        .to_vec();

    let resp = app().oneshot(multipart_request("B", body)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let receipt: UploadReceipt = body_json(resp).await;
    assert_eq!(receipt.fields, vec![("name".to_string(), "a".to_string())]);
    assert_eq!(receipt.files.len(), 1);
    assert_eq!(receipt.files[0].field_name, "image");
    assert_eq!(receipt.files[0].file_name, "x.jpg");
    assert_eq!(receipt.files[0].content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(receipt.files[0].data, vec![0xff, 0xd8, 0xff]);
}

#[tokio::test]
async fn upload_without_multipart_content_type_is_rejected() {
    let resp = app()
        .oneshot(json_request("POST", "/upload", "{}"))
        .await
        .unwrap();
    assert!(resp.status().is_client_error());
}
