use thiserror::Error;

#[derive(Error, Debug)]
pub enum RazborError {
    #[error("Upload failed: {reason}")]
    UploadFailed { reason: String },

    #[error("Analysis failed: {reason}")]
    AnalysisFailed { reason: String },

    #[error("Dashboard render failed: {0}")]
    DashboardFailed(#[from] askama::Error),

    #[error("Report generation failed: {reason}")]
    ReportFailed { reason: String },

    #[error("Cannot {action} while {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RazborError>;
