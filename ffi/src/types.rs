//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! for strings, pointer plus length for byte buffers and arrays, and enums
//! with explicit discriminants. Buffers handed to C are boxed slices so
//! they can be rebuilt from pointer and length alone when freed.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use api_manager_core::{ApiClient, ApiError, HttpRequest, PasswordValidationResult};

/// Opaque handle to an `ApiClient`. C callers receive a pointer to this and
/// pass it back into every build/parse function.
pub struct FfiApiClient {
    pub(crate) inner: ApiClient,
}

// ---------------------------------------------------------------------------
// Inputs (caller-owned, read but never freed by us)
// ---------------------------------------------------------------------------

/// A borrowed key/value pair: a request header or a form field.
#[repr(C)]
pub struct FfiKeyValue {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// An HTTP response produced by the host's own HTTP stack.
///
/// `body` may be null when `body_len` is 0.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: usize,
}

// ---------------------------------------------------------------------------
// Outputs (owned by the caller until passed to `apim_free_*`)
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `apim_build_*`. The host executes it and passes the response
/// back through `apim_parse_*`. `body` is null when there is no body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: *mut c_char,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: usize,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let headers: Box<[FfiHeader]> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: into_c_string(k),
                    value: into_c_string(v),
                })
                .collect();
            Box::into_raw(headers) as *mut FfiHeader
        };

        let (body, body_len) = match req.body {
            Some(bytes) => {
                let len = bytes.len();
                (Box::into_raw(bytes.into_boxed_slice()) as *mut u8, len)
            }
            None => (std::ptr::null_mut(), 0),
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: into_c_string(req.method),
            url: into_c_string(req.url),
            headers,
            headers_len,
            body,
            body_len,
        }))
    }
}

/// Error codes returned by build and parse functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    InvalidResponse = 2,
    Decoding = 3,
    Server = 4,
    Custom = 5,
    Panic = 6,
    NullArg = 7,
}

impl From<&ApiError> for FfiErrorCode {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::InvalidUrl => FfiErrorCode::InvalidUrl,
            ApiError::InvalidResponse => FfiErrorCode::InvalidResponse,
            ApiError::DecodingError => FfiErrorCode::Decoding,
            ApiError::ServerError(_) => FfiErrorCode::Server,
            ApiError::Custom(_) => FfiErrorCode::Custom,
        }
    }
}

/// Result envelope for parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data` is
/// the decoded body re-serialized as compact JSON. On failure `data` is null
/// and `error_message` is human-readable. `http_status` is set for `Server`.
#[repr(C)]
pub struct FfiApiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data: *mut c_char,
}

impl FfiApiResult {
    pub(crate) fn ok_json(value: &serde_json::Value) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data: into_c_string(value.to_string()),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = match err {
            ApiError::ServerError(status) => status,
            _ => 0,
        };
        Box::into_raw(Box::new(FfiApiResult {
            error_code: FfiErrorCode::from(&err),
            error_message: into_c_string(err.to_string()),
            http_status,
            data: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg)
    }

    fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiApiResult {
            error_code,
            error_message: into_c_string(msg.to_string()),
            http_status: 0,
            data: std::ptr::null_mut(),
        }))
    }
}

/// Password check outcome as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiPasswordResult {
    Valid = 0,
    TooShort = 1,
    MissingUppercase = 2,
    MissingLowercase = 3,
    MissingNumber = 4,
    PasswordsDoNotMatch = 5,
}

impl From<PasswordValidationResult> for FfiPasswordResult {
    fn from(result: PasswordValidationResult) -> Self {
        match result {
            PasswordValidationResult::Valid => FfiPasswordResult::Valid,
            PasswordValidationResult::TooShort => FfiPasswordResult::TooShort,
            PasswordValidationResult::MissingUppercase => FfiPasswordResult::MissingUppercase,
            PasswordValidationResult::MissingLowercase => FfiPasswordResult::MissingLowercase,
            PasswordValidationResult::MissingNumber => FfiPasswordResult::MissingNumber,
            PasswordValidationResult::PasswordsDoNotMatch => FfiPasswordResult::PasswordsDoNotMatch,
        }
    }
}

impl FfiPasswordResult {
    /// Map a raw discriminant from C. Unknown values yield `None`.
    pub(crate) fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(FfiPasswordResult::Valid),
            1 => Some(FfiPasswordResult::TooShort),
            2 => Some(FfiPasswordResult::MissingUppercase),
            3 => Some(FfiPasswordResult::MissingLowercase),
            4 => Some(FfiPasswordResult::MissingNumber),
            5 => Some(FfiPasswordResult::PasswordsDoNotMatch),
            _ => None,
        }
    }

    pub(crate) fn message(self) -> &'static CStr {
        match self {
            FfiPasswordResult::Valid => c"",
            FfiPasswordResult::TooShort => c"Password must be at least 8 characters",
            FfiPasswordResult::MissingUppercase => {
                c"Password must contain at least one uppercase letter"
            }
            FfiPasswordResult::MissingLowercase => {
                c"Password must contain at least one lowercase letter"
            }
            FfiPasswordResult::MissingNumber => c"Password must contain at least one number",
            FfiPasswordResult::PasswordsDoNotMatch => c"Passwords do not match",
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Hand a Rust string to C. Interior NULs cannot be represented and yield
/// an empty string.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Borrow a C string. Returns `None` for null; invalid UTF-8 is replaced.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string valid for `'a`.
pub(crate) unsafe fn borrow_str<'a>(ptr: *const c_char) -> Option<std::borrow::Cow<'a, str>> {
    if ptr.is_null() {
        None
    } else {
        Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy())
    }
}

/// Copy `len` key/value pairs from C. Pairs with a null key are skipped; a
/// null value becomes an empty string.
///
/// # Safety
/// `pairs` must be null or point to `len` valid `FfiKeyValue`s.
pub(crate) unsafe fn read_pairs(pairs: *const FfiKeyValue, len: u32) -> Vec<(String, String)> {
    if pairs.is_null() || len == 0 {
        return Vec::new();
    }
    let pairs = unsafe { std::slice::from_raw_parts(pairs, len as usize) };
    pairs
        .iter()
        .filter_map(|pair| {
            let key = unsafe { borrow_str(pair.key) }?;
            let value = unsafe { borrow_str(pair.value) }.unwrap_or_default();
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

/// Copy a byte buffer from C. Null means empty.
///
/// # Safety
/// `ptr` must be null or point to `len` readable bytes.
pub(crate) unsafe fn read_bytes(ptr: *const u8, len: usize) -> Vec<u8> {
    if ptr.is_null() || len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(ptr, len) }.to_vec()
    }
}
