//! Razbor Core Library
//!
//! Thin client for a remote interview-analysis service: upload a recording,
//! relay its URL for analysis, and render the returned feedback as an HTML
//! dashboard, a printable PDF report, and a terminal summary.

pub mod dashboard;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod relay;
pub mod report;
pub mod score;
pub mod session;
pub mod types;
pub mod view;

// Re-export commonly used items at crate root
pub use dashboard::{render_dashboard, save_dashboard, DASHBOARD_FILE_NAME};
pub use endpoint::{ServiceEndpoints, SERVICE_URL_ENV};
pub use error::{RazborError, Result};
pub use format::{format_summary_readable, format_timestamp};
pub use relay::{request_analysis, upload_file, Backend, HttpBackend};
pub use report::{render_report, save_report, REPORT_FILE_NAME};
pub use session::{ReviewPhase, ReviewSession};
pub use types::{
    AnalysisRequest, AnalysisResult, FeedbackRecord, SkillAssessment, TranscriptSegment,
};
pub use view::ReportView;
