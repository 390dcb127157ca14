//! API Payload Types
//!
//! Typed request and response payloads for the FundView backend. Response
//! structs mirror the JSON the server actually sends, `success` flag and
//! all — the client unwraps only the transport envelope (status, headers),
//! never the body shape.

use serde::{Deserialize, Serialize};

// ============================================
// Projects
// ============================================

/// Project fields submitted on create/update and returned by a URL fetch
///
/// Only the title is mandatory; the backend fills in whatever the funding
/// registry page exposed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default)]
    pub nsfc_id: Option<String>,

    pub title: String,

    #[serde(default)]
    pub approval_number: Option<String>,

    #[serde(default)]
    pub application_code: Option<String>,

    #[serde(default)]
    pub leader: Option<String>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub start_date: Option<String>,

    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub funding: Option<f64>,

    /// Project abstract (`abstract` is reserved in Rust)
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,

    #[serde(default)]
    pub conclusion_abstract: Option<String>,

    #[serde(default)]
    pub url: Option<String>,
}

/// A stored project row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub id: String,

    #[serde(flatten)]
    pub info: ProjectDraft,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// A project with its attached reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectRecord,

    #[serde(default)]
    pub reports: Vec<ReportRecord>,
}

/// Filters and paging for the project list
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    pub unit: Option<String>,
    pub code: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProjectQuery {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(unit) = &self.unit {
            pairs.push(("unit".to_string(), unit.clone()));
        }
        if let Some(code) = &self.code {
            pairs.push(("code".to_string(), code.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        pairs
    }
}

/// Filters for the CSV export
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    pub unit: Option<String>,
    pub code: Option<String>,
}

impl ExportFilter {
    pub(crate) fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(unit) = &self.unit {
            pairs.push(("unit".to_string(), unit.clone()));
        }
        if let Some(code) = &self.code {
            pairs.push(("code".to_string(), code.clone()));
        }
        pairs
    }
}

// ============================================
// Reports
// ============================================

/// A stored report row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,

    #[serde(default)]
    pub project_id: Option<String>,

    pub filename: String,

    #[serde(default)]
    pub file_path: Option<String>,

    #[serde(default)]
    pub file_size: Option<u64>,

    #[serde(default)]
    pub upload_date: Option<String>,
}

/// A PDF report upload: one `file` part plus a `project_id` text field
#[derive(Debug, Clone)]
pub struct ReportUpload {
    pub project_id: String,
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ReportUpload {
    pub(crate) fn into_form(self) -> reqwest::multipart::Form {
        let file = reqwest::multipart::Part::bytes(self.bytes).file_name(self.filename);
        reqwest::multipart::Form::new()
            .text("project_id", self.project_id)
            .part("file", file)
    }
}

// ============================================
// Response envelopes
// ============================================

/// `GET /health`
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// `POST /projects/fetch`
#[derive(Debug, Clone, Deserialize)]
pub struct FetchProjectResponse {
    pub success: bool,
    pub data: ProjectDraft,
    pub project_id: String,

    /// Set when the caller asked for `auto_download`; signals that the
    /// report download endpoint should be invoked next.
    #[serde(default)]
    pub need_download_report: bool,
}

/// `GET /projects`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListResponse {
    pub success: bool,
    pub data: Vec<ProjectRecord>,
    pub pagination: Pagination,
}

/// Paging block of the project list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// `GET /projects/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectDetailResponse {
    pub success: bool,
    pub data: ProjectDetail,
}

/// `POST /projects`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectResponse {
    pub success: bool,
    pub project_id: String,
}

/// Bare acknowledgement (update/delete/clear operations)
#[derive(Debug, Clone, Deserialize)]
pub struct Ack {
    pub success: bool,
}

/// `POST /projects/{id}/download-report[-simple]`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportDownloadResponse {
    pub success: bool,
    pub report_id: String,
    pub filename: String,

    #[serde(default)]
    pub page_count: u32,

    #[serde(default)]
    pub message: Option<String>,
}

/// `POST /reports/upload`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadReportResponse {
    pub success: bool,
    pub report_id: String,
    pub filename: String,
    pub file_size: u64,
}

/// `GET /reports/{id}/view`
#[derive(Debug, Clone, Deserialize)]
pub struct ReportContent {
    pub success: bool,
    pub content: String,
    pub page_count: u32,
}

/// `GET /search/history`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHistoryResponse {
    pub success: bool,
    pub data: Vec<SearchEntry>,
}

/// One recorded search
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchEntry {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub search_type: Option<String>,

    #[serde(default)]
    pub keyword: Option<String>,

    #[serde(default)]
    pub results_count: Option<i64>,

    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_abstract_under_original_name() {
        let draft = ProjectDraft {
            title: "Soil carbon dynamics".to_string(),
            summary: Some("A study of soil carbon".to_string()),
            ..ProjectDraft::default()
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["title"], "Soil carbon dynamics");
        assert_eq!(json["abstract"], "A study of soil carbon");
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_record_flattens_draft_fields() {
        let json = serde_json::json!({
            "id": "p-1",
            "title": "Coastal erosion modelling",
            "unit": "Ocean University",
            "funding": 580.0,
            "created_at": "2024-03-01 10:00:00"
        });

        let record: ProjectRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.id, "p-1");
        assert_eq!(record.info.title, "Coastal erosion modelling");
        assert_eq!(record.info.unit.as_deref(), Some("Ocean University"));
        assert_eq!(record.info.funding, Some(580.0));
        assert_eq!(record.created_at.as_deref(), Some("2024-03-01 10:00:00"));
    }

    #[test]
    fn test_detail_defaults_to_no_reports() {
        let json = serde_json::json!({
            "id": "p-2",
            "title": "Untitled"
        });

        let detail: ProjectDetail = serde_json::from_value(json).unwrap();
        assert!(detail.reports.is_empty());
    }

    #[test]
    fn test_project_query_pairs_skip_unset_fields() {
        let query = ProjectQuery {
            unit: Some("Ocean University".to_string()),
            page: Some(3),
            ..ProjectQuery::default()
        };

        assert_eq!(
            query.query_pairs(),
            vec![
                ("unit".to_string(), "Ocean University".to_string()),
                ("page".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_export_filter_has_no_pairs() {
        assert!(ExportFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_fetch_response_defaults_need_download_flag() {
        let json = serde_json::json!({
            "success": true,
            "data": { "title": "Fetched" },
            "project_id": "p-3"
        });

        let response: FetchProjectResponse = serde_json::from_value(json).unwrap();
        assert!(response.success);
        assert!(!response.need_download_report);
    }
}
