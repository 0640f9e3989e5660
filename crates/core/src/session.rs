//! One upload-and-review cycle, modeled as an explicit state machine.
//!
//! The two network actions are always user-triggered and never chained; a
//! phase that is already busy rejects any further trigger, so states like
//! "analyzing while uploading" cannot be expressed at all. Starting a new
//! cycle means creating a new session.

use std::path::Path;

use crate::{
    error::{RazborError, Result},
    relay::{self, Backend},
    types::AnalysisResult,
};

#[derive(Debug)]
pub enum ReviewPhase {
    Idle,
    Uploading,
    Uploaded {
        video_url: String,
    },
    Analyzing {
        video_url: String,
    },
    Analyzed {
        video_url: String,
        result: AnalysisResult,
    },
    Failed {
        message: String,
        video_url: Option<String>,
    },
}

impl ReviewPhase {
    pub fn name(&self) -> &'static str {
        match self {
            ReviewPhase::Idle => "idle",
            ReviewPhase::Uploading => "uploading",
            ReviewPhase::Uploaded { .. } => "uploaded",
            ReviewPhase::Analyzing { .. } => "analyzing",
            ReviewPhase::Analyzed { .. } => "analyzed",
            ReviewPhase::Failed { .. } => "failed",
        }
    }
}

pub struct ReviewSession {
    phase: ReviewPhase,
    required_skills: Vec<String>,
}

impl ReviewSession {
    pub fn new(required_skills: Vec<String>) -> Self {
        Self {
            phase: ReviewPhase::Idle,
            required_skills,
        }
    }

    pub fn phase(&self) -> &ReviewPhase {
        &self.phase
    }

    pub fn required_skills(&self) -> &[String] {
        &self.required_skills
    }

    /// Public URL of the uploaded recording, once the upload has succeeded.
    pub fn video_url(&self) -> Option<&str> {
        match &self.phase {
            ReviewPhase::Uploaded { video_url }
            | ReviewPhase::Analyzing { video_url }
            | ReviewPhase::Analyzed { video_url, .. } => Some(video_url),
            ReviewPhase::Failed { video_url, .. } => video_url.as_deref(),
            _ => None,
        }
    }

    /// The finished analysis, read-only.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            ReviewPhase::Analyzed { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            ReviewPhase::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn begin_upload(&mut self) -> Result<()> {
        match self.phase {
            ReviewPhase::Idle => {
                self.phase = ReviewPhase::Uploading;
                Ok(())
            }
            _ => Err(self.rejected("start an upload")),
        }
    }

    pub fn upload_succeeded(&mut self, video_url: String) -> Result<()> {
        match self.phase {
            ReviewPhase::Uploading => {
                self.phase = ReviewPhase::Uploaded { video_url };
                Ok(())
            }
            _ => Err(self.rejected("finish an upload")),
        }
    }

    pub fn upload_failed(&mut self, message: String) -> Result<()> {
        match self.phase {
            ReviewPhase::Uploading => {
                self.phase = ReviewPhase::Failed {
                    message,
                    video_url: None,
                };
                Ok(())
            }
            _ => Err(self.rejected("fail an upload")),
        }
    }

    pub fn begin_analysis(&mut self) -> Result<String> {
        match std::mem::replace(&mut self.phase, ReviewPhase::Idle) {
            ReviewPhase::Uploaded { video_url } => {
                self.phase = ReviewPhase::Analyzing {
                    video_url: video_url.clone(),
                };
                Ok(video_url)
            }
            other => {
                self.phase = other;
                Err(self.rejected("start analysis"))
            }
        }
    }

    pub fn analysis_succeeded(&mut self, result: AnalysisResult) -> Result<()> {
        match std::mem::replace(&mut self.phase, ReviewPhase::Idle) {
            ReviewPhase::Analyzing { video_url } => {
                self.phase = ReviewPhase::Analyzed { video_url, result };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(self.rejected("finish analysis"))
            }
        }
    }

    pub fn analysis_failed(&mut self, message: String) -> Result<()> {
        match std::mem::replace(&mut self.phase, ReviewPhase::Idle) {
            ReviewPhase::Analyzing { video_url } => {
                // The uploaded URL survives an analysis failure.
                self.phase = ReviewPhase::Failed {
                    message,
                    video_url: Some(video_url),
                };
                Ok(())
            }
            other => {
                self.phase = other;
                Err(self.rejected("fail analysis"))
            }
        }
    }

    /// Drive the upload relay through the state machine.
    pub async fn upload(&mut self, backend: &dyn Backend, path: &Path) -> Result<String> {
        self.begin_upload()?;
        match relay::upload_file(backend, path).await {
            Ok(url) => {
                self.phase = ReviewPhase::Uploaded {
                    video_url: url.clone(),
                };
                Ok(url)
            }
            Err(e) => {
                tracing::error!(error = %e, "upload failed");
                self.phase = ReviewPhase::Failed {
                    message: e.to_string(),
                    video_url: None,
                };
                Err(e)
            }
        }
    }

    /// Drive the analysis relay through the state machine.
    pub async fn analyze(&mut self, backend: &dyn Backend) -> Result<()> {
        let video_url = self.begin_analysis()?;
        match relay::request_analysis(backend, &video_url, &self.required_skills).await {
            Ok(result) => {
                self.phase = ReviewPhase::Analyzed { video_url, result };
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "analysis failed");
                self.phase = ReviewPhase::Failed {
                    message: e.to_string(),
                    video_url: Some(video_url),
                };
                Err(e)
            }
        }
    }

    fn rejected(&self, action: &'static str) -> RazborError {
        RazborError::InvalidTransition {
            from: self.phase.name(),
            action,
        }
    }
}
