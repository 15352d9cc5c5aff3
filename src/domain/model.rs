use serde::{Deserialize, Serialize};

/// Raw certificate record as returned by the registry. Every field may be
/// absent or null; serde maps both to `None`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub label: Option<String>,
    pub game: Option<RawGame>,
    pub region: Option<String>,
    pub grade: Option<RawGrade>,
    #[serde(default)]
    pub attachments: Vec<RawAttachment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGame {
    pub name: Option<String>,
    pub platforms: Option<String>,
    // The registry is inconsistent here: sometimes a number, sometimes a string.
    pub year: Option<serde_json::Value>,
    pub publisher: Option<String>,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGrade {
    pub overall_grade: Option<String>,
    #[serde(rename = "box")]
    pub box_grade: Option<String>,
    pub seal: Option<String>,
    pub instruction: Option<String>,
    pub cartridge: Option<String>,
    pub variants: Option<Vec<String>>,
    pub notes: Option<String>,
}

/// Image or document reference attached to a certificate. Source order is
/// significant: index 0 drives the grading date and the image fallback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttachment {
    pub attachment_type_id: Option<i64>,
    pub created_at: Option<String>,
    pub high_res_url: Option<String>,
}

/// Canonical certificate record produced by normalization.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedCertification {
    pub label: String,
    pub game: GameInfo,
    pub region: String,
    pub grade: GradeInfo,
    /// `DD-MM-YYYY`, or `N/A` when the first attachment carries no parseable
    /// timestamp.
    pub grading_date: String,
    pub attachments: Vec<AttachmentInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameInfo {
    pub name: String,
    pub platforms: String,
    pub year: String,
    pub publisher: String,
    pub img_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeInfo {
    pub overall_grade: String,
    pub box_grade: String,
    /// Never the raw sentinels `"NULL"` / `""`; those collapse to `N/A`.
    pub seal: String,
    /// Only surfaced together with `cartridge`; a lone raw value drops both.
    pub instruction: Option<String>,
    pub cartridge: Option<String>,
    /// Bulleted entries with literal `*` characters stripped. Absent in the
    /// raw record means absent here, never an empty list.
    pub variants: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttachmentInfo {
    pub attachment_type_id: Option<i64>,
    pub created_at: Option<String>,
    pub high_res_url: Option<String>,
}

/// Outcome of the image fallback chain. At most one of `bytes`/`anomaly` is
/// set; `anomaly` is only meaningful when `found` is false.
#[derive(Debug, Clone)]
pub struct ResolvedImage {
    pub found: bool,
    pub bytes: Option<Vec<u8>>,
    pub anomaly: Option<String>,
}

impl ResolvedImage {
    pub fn fetched(bytes: Vec<u8>) -> Self {
        Self {
            found: true,
            bytes: Some(bytes),
            anomaly: None,
        }
    }

    pub fn missing(anomaly: String) -> Self {
        Self {
            found: false,
            bytes: None,
            anomaly: Some(anomaly),
        }
    }
}

/// Why a lookup produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// Registry answered with a non-success HTTP status.
    Status(u16),
    /// Registry could not be reached (timeout, connection error).
    Network(String),
    /// Registry answered 200 but the body is missing required fields.
    Malformed(String),
}

impl LookupFailure {
    /// Numeric view for callers that only track a status code. Transport
    /// errors and malformed bodies map to generic server-side codes.
    pub fn status_code(&self) -> u16 {
        match self {
            LookupFailure::Status(code) => *code,
            LookupFailure::Network(_) => 503,
            LookupFailure::Malformed(_) => 500,
        }
    }
}

/// Result of one end-to-end lookup.
#[derive(Debug, Clone)]
pub enum LookupResult {
    Success {
        record: NormalizedCertification,
        image: ResolvedImage,
        /// Post-increment value of the persistent request counter.
        request_number: u64,
    },
    Failure(LookupFailure),
}
