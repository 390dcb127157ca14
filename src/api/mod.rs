//! FundView REST API Client
//!
//! Single point of contact with the backend. Every backend capability is
//! one method with a fixed HTTP method and path template; all calls flow
//! through the same pipeline:
//!
//! 1. Build a [`RequestDescriptor`] from the operation's template plus the
//!    caller's arguments.
//! 2. Run the request interceptor chain (empty by default).
//! 3. Dispatch over HTTP; the caller suspends until the transport
//!    completes. Concurrent calls share nothing but the read-only config.
//! 4. On success, parse the body, run the response interceptor chain, and
//!    deserialize into the typed payload. Status codes never reach callers.
//! 5. On failure, normalize into an [`ApiError`] and return it — no
//!    retries, no local recovery.
//!
//! # Example
//!
//! ```rust,no_run
//! use fundview::api::ApiClient;
//! use fundview::config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::default());
//!
//!     let health = client.health().await?;
//!     println!("backend is {}", health.status);
//!
//!     let fetched = client
//!         .fetch_project("https://kd.nsfc.cn/finalDetails?id=abc123", false)
//!         .await?;
//!     println!("stored as {}", fetched.project_id);
//!
//!     Ok(())
//! }
//! ```

pub mod descriptor;
pub mod dto;
pub mod error;
pub mod interceptor;

pub use descriptor::{RequestBody, RequestDescriptor, ResponseKind};
pub use error::{ApiError, ApiResult, NormalizedError, GENERIC_FAILURE};
pub use interceptor::{InterceptorChain, RequestTransform, ResponseTransform};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::config::ClientConfig;
use dto::{
    Ack, CreateProjectResponse, ExportFilter, FetchProjectResponse, HealthStatus,
    ProjectDetailResponse, ProjectDraft, ProjectListResponse, ProjectQuery, ReportContent,
    ReportDownloadResponse, ReportUpload, SearchHistoryResponse, UploadReportResponse,
};

/// Typed HTTP client for the FundView backend
///
/// One instance per process: construct it once at startup and pass it by
/// reference into every call site. Configuration is immutable after
/// construction, so concurrent calls need no synchronization.
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    interceptors: InterceptorChain,
}

impl ApiClient {
    /// Create a client with an empty interceptor chain
    pub fn new(config: ClientConfig) -> Self {
        Self::with_interceptors(config, InterceptorChain::new())
    }

    /// Create a client with a custom interceptor chain
    pub fn with_interceptors(config: ClientConfig, interceptors: InterceptorChain) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(config.timeout_ms))
            .default_headers(headers)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            config,
            interceptors,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // ============================================
    // Dispatch pipeline
    // ============================================

    /// Send a descriptor and return the raw response on a passing status.
    ///
    /// Transport failures (no response) surface as `ApiError::Transport`,
    /// unmodified. A failing status is drained into a `NormalizedError`.
    async fn dispatch(&self, mut descriptor: RequestDescriptor) -> ApiResult<reqwest::Response> {
        self.interceptors.apply_request(&mut descriptor);

        let request_id = Uuid::new_v4();
        let url = self.config.endpoint(&descriptor.path);

        tracing::debug!(
            request_id = %request_id,
            method = %descriptor.method,
            path = %descriptor.path,
            "dispatching request"
        );

        let mut request = self.http.request(descriptor.method, &url);

        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }

        request = match descriptor.body {
            RequestBody::None => request,
            RequestBody::Json(body) => request.json(&body),
            RequestBody::Multipart(upload) => request.multipart(upload.into_form()),
        };

        for (name, value) in &descriptor.headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request.send().await?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.json::<serde_json::Value>().await.ok();
        let normalized = NormalizedError::from_body(body.as_ref());

        tracing::warn!(
            request_id = %request_id,
            status = %status,
            message = %normalized,
            "request failed"
        );

        Err(ApiError::Server(normalized))
    }

    /// Dispatch and deserialize a JSON response
    async fn execute<T: DeserializeOwned>(&self, descriptor: RequestDescriptor) -> ApiResult<T> {
        let response = self.dispatch(descriptor).await?;

        let mut body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        self.interceptors.apply_response(&mut body);

        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Dispatch and return the raw response bytes
    async fn execute_bytes(&self, descriptor: RequestDescriptor) -> ApiResult<Bytes> {
        let response = self.dispatch(descriptor).await?;
        Ok(response.bytes().await?)
    }

    // ============================================
    // Operations
    // ============================================

    fn health_request() -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, "/health")
    }

    /// Check backend health
    pub async fn health(&self) -> ApiResult<HealthStatus> {
        self.execute(Self::health_request()).await
    }

    fn fetch_project_request(url: &str, auto_download: bool) -> RequestDescriptor {
        RequestDescriptor::new(Method::POST, "/projects/fetch").json(serde_json::json!({
            "url": url,
            "auto_download": auto_download,
        }))
    }

    /// Fetch project data from a funding-registry URL and store it
    pub async fn fetch_project(
        &self,
        url: &str,
        auto_download: bool,
    ) -> ApiResult<FetchProjectResponse> {
        self.execute(Self::fetch_project_request(url, auto_download))
            .await
    }

    fn get_projects_request(query: &ProjectQuery) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, "/projects").query_pairs(query.query_pairs())
    }

    /// List stored projects, filtered and paged
    pub async fn get_projects(&self, query: &ProjectQuery) -> ApiResult<ProjectListResponse> {
        self.execute(Self::get_projects_request(query)).await
    }

    fn get_project_detail_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, format!("/projects/{id}"))
    }

    /// Get one project with its attached reports
    pub async fn get_project_detail(&self, id: &str) -> ApiResult<ProjectDetailResponse> {
        self.execute(Self::get_project_detail_request(id)).await
    }

    fn create_project_request(draft: &ProjectDraft) -> ApiResult<RequestDescriptor> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(RequestDescriptor::new(Method::POST, "/projects").json(body))
    }

    /// Create a project from manually entered fields
    pub async fn create_project(&self, draft: &ProjectDraft) -> ApiResult<CreateProjectResponse> {
        self.execute(Self::create_project_request(draft)?).await
    }

    fn update_project_request(id: &str, draft: &ProjectDraft) -> ApiResult<RequestDescriptor> {
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(RequestDescriptor::new(Method::PUT, format!("/projects/{id}")).json(body))
    }

    /// Update a stored project
    pub async fn update_project(&self, id: &str, draft: &ProjectDraft) -> ApiResult<Ack> {
        self.execute(Self::update_project_request(id, draft)?).await
    }

    fn delete_project_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::DELETE, format!("/projects/{id}"))
    }

    /// Delete a project and its attached reports
    pub async fn delete_project(&self, id: &str) -> ApiResult<Ack> {
        self.execute(Self::delete_project_request(id)).await
    }

    fn download_project_report_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::POST, format!("/projects/{id}/download-report"))
    }

    /// Ask the backend to collect the project's concluding report
    pub async fn download_project_report(&self, id: &str) -> ApiResult<ReportDownloadResponse> {
        self.execute(Self::download_project_report_request(id)).await
    }

    fn download_project_report_simple_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::POST, format!("/projects/{id}/download-report-simple"))
    }

    /// Collect the concluding report without progress streaming
    pub async fn download_project_report_simple(
        &self,
        id: &str,
    ) -> ApiResult<ReportDownloadResponse> {
        self.execute(Self::download_project_report_simple_request(id))
            .await
    }

    fn upload_report_request(upload: ReportUpload) -> RequestDescriptor {
        RequestDescriptor::new(Method::POST, "/reports/upload").multipart(upload)
    }

    /// Upload a report PDF as a multipart form
    ///
    /// The multipart boundary content type replaces the JSON default for
    /// this call.
    pub async fn upload_report(&self, upload: ReportUpload) -> ApiResult<UploadReportResponse> {
        self.execute(Self::upload_report_request(upload)).await
    }

    fn view_report_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, format!("/reports/{id}/view"))
    }

    /// Get the extracted text content of a report
    pub async fn view_report(&self, id: &str) -> ApiResult<ReportContent> {
        self.execute(Self::view_report_request(id)).await
    }

    fn download_report_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, format!("/reports/{id}/download")).expect_bytes()
    }

    /// Download a report PDF; the caller owns file-save handling
    pub async fn download_report(&self, id: &str) -> ApiResult<Bytes> {
        self.execute_bytes(Self::download_report_request(id)).await
    }

    fn delete_report_request(id: &str) -> RequestDescriptor {
        RequestDescriptor::new(Method::DELETE, format!("/reports/{id}"))
    }

    /// Delete a stored report
    pub async fn delete_report(&self, id: &str) -> ApiResult<Ack> {
        self.execute(Self::delete_report_request(id)).await
    }

    fn get_search_history_request(limit: Option<u32>) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, "/search/history").query("limit", limit.unwrap_or(10))
    }

    /// Get recent searches, newest first; `limit` defaults to 10
    pub async fn get_search_history(
        &self,
        limit: Option<u32>,
    ) -> ApiResult<SearchHistoryResponse> {
        self.execute(Self::get_search_history_request(limit)).await
    }

    fn clear_search_history_request() -> RequestDescriptor {
        RequestDescriptor::new(Method::DELETE, "/search/history")
    }

    /// Clear the search history
    pub async fn clear_search_history(&self) -> ApiResult<Ack> {
        self.execute(Self::clear_search_history_request()).await
    }

    fn export_projects_request(filter: &ExportFilter) -> RequestDescriptor {
        RequestDescriptor::new(Method::GET, "/export/projects")
            .query_pairs(filter.query_pairs())
            .expect_bytes()
    }

    /// Export the filtered project list as CSV bytes
    pub async fn export_projects(&self, filter: &ExportFilter) -> ApiResult<Bytes> {
        self.execute_bytes(Self::export_projects_request(filter))
            .await
    }
}
