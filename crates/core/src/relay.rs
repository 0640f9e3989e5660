use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::{
    endpoint::ServiceEndpoints,
    error::{RazborError, Result},
    types::{AnalysisRequest, AnalysisResult, UploadResponse},
};

/// The two remote calls this client makes. Everything behind this trait is
/// an opaque collaborator; no retries, no partial results.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Store one file and return its publicly fetchable URL.
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String>;

    /// Submit a stored recording for analysis and await the full result.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}

pub struct HttpBackend {
    client: reqwest::Client,
    endpoints: ServiceEndpoints,
}

impl HttpBackend {
    pub fn new(endpoints: ServiceEndpoints) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoints,
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let size = bytes.len();
        let file_part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(guess_mime(file_name))
            .map_err(|e| RazborError::UploadFailed {
                reason: e.to_string(),
            })?;
        let form = multipart::Form::new().part("file", file_part);

        tracing::info!(file_name, size, "uploading recording");

        let response = self
            .client
            .post(self.endpoints.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| RazborError::UploadFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RazborError::UploadFailed {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        let parsed: UploadResponse =
            response
                .json()
                .await
                .map_err(|e| RazborError::UploadFailed {
                    reason: format!("invalid response body: {}", e),
                })?;

        tracing::info!(url = %parsed.file.url, "upload complete");
        Ok(parsed.file.url)
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        tracing::info!(video_url = %request.video_url, "requesting analysis");

        let response = self
            .client
            .post(self.endpoints.transcribe_url())
            .json(request)
            .send()
            .await
            .map_err(|e| RazborError::AnalysisFailed {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RazborError::AnalysisFailed {
                reason: format!("HTTP {}: {}", status, body),
            });
        }

        let result: AnalysisResult =
            response
                .json()
                .await
                .map_err(|e| RazborError::AnalysisFailed {
                    reason: format!("invalid response body: {}", e),
                })?;

        tracing::info!(
            segments = result.transcription.len(),
            duration = result.duration,
            "analysis complete"
        );
        Ok(result)
    }
}

/// Read a local file and relay it to the storage endpoint.
pub async fn upload_file(backend: &dyn Backend, path: &Path) -> Result<String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| RazborError::UploadFailed {
            reason: format!("{} has no file name", path.display()),
        })?;
    let bytes = tokio::fs::read(path).await?;
    backend.upload(&file_name, bytes).await
}

/// Submit an uploaded recording's URL for analysis.
pub async fn request_analysis(
    backend: &dyn Backend,
    video_url: &str,
    required_skills: &[String],
) -> Result<AnalysisResult> {
    let request = AnalysisRequest::new(video_url, required_skills);
    backend.analyze(&request).await
}

fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "avi" => "video/x-msvideo",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}
