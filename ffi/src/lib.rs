//! C-ABI wrapper around `api-manager-core`.
//!
//! # Overview
//! Exposes the build/parse half of the request pipeline and the form
//! validators through `extern "C"` functions. A mobile host builds a
//! request here, executes it on its own HTTP stack, and hands the response
//! back for status classification and decoding. Indicator handling stays on
//! the host side.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Build functions return null on failure and report why through an
//!   optional `FfiErrorCode` out-pointer.
//! - Parse functions return an `FfiApiResult` whose `data` is the decoded
//!   body as JSON text.
//! - The C caller owns all returned pointers and must call the matching
//!   `apim_free_*` function to release them.

pub mod types;

use std::ffi::CString;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use api_manager_core::multipart;
use api_manager_core::{
    ApiClient, ApiError, EmailValidator, HttpResponse, MultipartSpec, PasswordValidator,
    RequestSpec,
};

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new JSON `ApiClient`.
///
/// The caller must free the returned pointer with `apim_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn apim_client_new() -> *mut FfiApiClient {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiApiClient {
            inner: ApiClient::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `apim_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apim_client_free(client: *mut FfiApiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

fn report(error_out: *mut FfiErrorCode, code: FfiErrorCode) {
    if !error_out.is_null() {
        unsafe { *error_out = code };
    }
}

/// Build a JSON request.
///
/// `url` null or unparsable reports `InvalidUrl`. `json_body` may be null
/// for no body; text that is not JSON reports `Custom`. Caller headers are
/// applied after `Content-Type` and override it.
/// Returns null on failure; `error_out` (nullable) receives the reason.
#[unsafe(no_mangle)]
pub extern "C" fn apim_build_request(
    client: *const FfiApiClient,
    method: *const c_char,
    url: *const c_char,
    headers: *const FfiKeyValue,
    headers_len: u32,
    json_body: *const c_char,
    error_out: *mut FfiErrorCode,
) -> *mut FfiHttpRequest {
    let built = catch_unwind(|| {
        if client.is_null() || method.is_null() {
            return Err(FfiErrorCode::NullArg);
        }
        let client = unsafe { &*client };
        let method = unsafe { borrow_str(method) }.unwrap_or_default();
        let mut spec = match unsafe { borrow_str(url) } {
            Some(url) => RequestSpec::new(&method, &url),
            None => RequestSpec::with_url(&method, None),
        };
        spec.headers = unsafe { read_pairs(headers, headers_len) };

        let result = match unsafe { borrow_str(json_body) } {
            Some(text) => {
                let body: serde_json::Value =
                    serde_json::from_str(&text).map_err(|_| FfiErrorCode::Custom)?;
                client.inner.build_request(&spec.json(body))
            }
            None => client.inner.build_request(&spec),
        };
        result
            .map(FfiHttpRequest::from_core)
            .map_err(|e| FfiErrorCode::from(&e))
    })
    .unwrap_or(Err(FfiErrorCode::Panic));

    match built {
        Ok(req) => {
            report(error_out, FfiErrorCode::Ok);
            req
        }
        Err(code) => {
            report(error_out, code);
            std::ptr::null_mut()
        }
    }
}

/// Build a `multipart/form-data` upload with a fresh boundary.
///
/// `field_name`, `file_name` and `mime_type` may be null for the defaults
/// `image`, `image.jpg` and `image/jpeg`. `payload` may be null when
/// `payload_len` is 0. Returns null on failure; `error_out` (nullable)
/// receives the reason.
#[unsafe(no_mangle)]
pub extern "C" fn apim_build_multipart_request(
    client: *const FfiApiClient,
    method: *const c_char,
    url: *const c_char,
    headers: *const FfiKeyValue,
    headers_len: u32,
    fields: *const FfiKeyValue,
    fields_len: u32,
    payload: *const u8,
    payload_len: usize,
    field_name: *const c_char,
    file_name: *const c_char,
    mime_type: *const c_char,
    error_out: *mut FfiErrorCode,
) -> *mut FfiHttpRequest {
    let built = catch_unwind(|| {
        if client.is_null() || method.is_null() {
            return Err(FfiErrorCode::NullArg);
        }
        let client = unsafe { &*client };
        let method = unsafe { borrow_str(method) }.unwrap_or_default();
        let payload = unsafe { read_bytes(payload, payload_len) };
        let mut spec = match unsafe { borrow_str(url) } {
            Some(url) => MultipartSpec::new(&method, &url, payload),
            None => MultipartSpec::with_url(&method, None, payload),
        };
        spec.headers = unsafe { read_pairs(headers, headers_len) };
        spec.fields = unsafe { read_pairs(fields, fields_len) };
        if let Some(name) = unsafe { borrow_str(field_name) } {
            spec = spec.field_name(&name);
        }
        if let Some(name) = unsafe { borrow_str(file_name) } {
            spec = spec.file_name(&name);
        }
        if let Some(mime) = unsafe { borrow_str(mime_type) } {
            spec = spec.mime_type(&mime);
        }

        client
            .inner
            .build_multipart_request(&spec, &multipart::new_boundary())
            .map(FfiHttpRequest::from_core)
            .map_err(|e| FfiErrorCode::from(&e))
    })
    .unwrap_or(Err(FfiErrorCode::Panic));

    match built {
        Ok(req) => {
            report(error_out, FfiErrorCode::Ok);
            req
        }
        Err(code) => {
            report(error_out, code);
            std::ptr::null_mut()
        }
    }
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    HttpResponse::new(resp.status, unsafe { read_bytes(resp.body, resp.body_len) })
}

fn parse_with(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
    parse: fn(&ApiClient, HttpResponse) -> Result<serde_json::Value, ApiError>,
) -> *mut FfiApiResult {
    if client.is_null() {
        return FfiApiResult::null_arg("client");
    }
    if response.is_null() {
        return FfiApiResult::null_arg("response");
    }
    let client = unsafe { &*client };
    let resp = unsafe { &*response };
    match parse(&client.inner, ffi_response_to_core(resp)) {
        Ok(value) => FfiApiResult::ok_json(&value),
        Err(e) => FfiApiResult::from_error(e),
    }
}

/// Classify and decode the response to an `apim_build_request` call.
#[unsafe(no_mangle)]
pub extern "C" fn apim_parse_response(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| parse_with(client, response, |c, r| c.parse_response(r)))
        .unwrap_or_else(|_| FfiApiResult::panic("panic in apim_parse_response"))
}

/// Classify and decode the response to an `apim_build_multipart_request` call.
#[unsafe(no_mangle)]
pub extern "C" fn apim_parse_multipart_response(
    client: *const FfiApiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiApiResult {
    catch_unwind(|| parse_with(client, response, |c, r| c.parse_multipart_response(r)))
        .unwrap_or_else(|_| FfiApiResult::panic("panic in apim_parse_multipart_response"))
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// `true` if `email` looks like a deliverable address. Null is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn apim_validate_email(email: *const c_char) -> bool {
    catch_unwind(|| match unsafe { borrow_str(email) } {
        Some(email) => EmailValidator::new().is_valid(&email),
        None => false,
    })
    .unwrap_or(false)
}

/// Check password strength with the default rules. When `confirm` is not
/// null it must also match. A null `password` is treated as empty.
#[unsafe(no_mangle)]
pub extern "C" fn apim_validate_password(
    password: *const c_char,
    confirm: *const c_char,
) -> FfiPasswordResult {
    catch_unwind(|| {
        let validator = PasswordValidator::default();
        let password = unsafe { borrow_str(password) }.unwrap_or_default();
        let result = match unsafe { borrow_str(confirm) } {
            Some(confirm) => validator.validate_confirmed(&password, &confirm),
            None => validator.validate(&password),
        };
        FfiPasswordResult::from(result)
    })
    .unwrap_or(FfiPasswordResult::TooShort)
}

/// User-facing message for a password result code, as returned by
/// `apim_validate_password`. Unknown codes give an empty string. The
/// returned string is static and must not be freed.
#[unsafe(no_mangle)]
pub extern "C" fn apim_password_message(result: u32) -> *const c_char {
    FfiPasswordResult::from_code(result)
        .map_or(c"", FfiPasswordResult::message)
        .as_ptr()
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `apim_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apim_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.method);
        free_c_string(req.url);
        if !req.body.is_null() {
            drop(unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.body, req.body_len))
            });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiApiResult` returned by any `apim_parse_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apim_free_result(result: *mut FfiApiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        free_c_string(result.data);
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn apim_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
