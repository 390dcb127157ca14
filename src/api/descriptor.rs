//! Request Descriptors
//!
//! Every API operation is described as plain data before it touches the
//! network: method, path relative to the configured base path, query pairs,
//! body, and how the response should be read. A descriptor is built fresh
//! for each call, run through the interceptor chain, then consumed by the
//! dispatch pipeline — it is never reused.

use reqwest::Method;

use crate::api::dto::ReportUpload;

/// How the response body should be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Parse as JSON and deserialize into a typed payload
    Json,
    /// Return the raw bytes (report files, CSV export)
    Bytes,
}

/// Body attached to a request
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,

    /// JSON payload, sent with the default `Content-Type: application/json`
    Json(serde_json::Value),

    /// Multipart form upload; the form boundary content type replaces the
    /// JSON default for this call
    Multipart(ReportUpload),
}

/// An HTTP request described as plain data
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,

    /// Path relative to the client's base path, e.g. `/projects/42`
    pub path: String,

    pub query: Vec<(String, String)>,

    pub body: RequestBody,

    pub response_kind: ResponseKind,

    /// Extra headers applied on top of the client defaults, this call only
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
            response_kind: ResponseKind::Json,
            headers: Vec::new(),
        }
    }

    /// Append a query parameter
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    /// Append multiple query parameters
    pub fn query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    /// Attach a JSON body
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart form upload
    pub fn multipart(mut self, upload: ReportUpload) -> Self {
        self.body = RequestBody::Multipart(upload);
        self
    }

    /// Read the response as raw bytes instead of JSON
    pub fn expect_bytes(mut self) -> Self {
        self.response_kind = ResponseKind::Bytes;
        self
    }

    /// Override or add a header for this call
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}
