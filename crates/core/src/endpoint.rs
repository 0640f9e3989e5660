/// Base URL of the remote transcription/analysis service.
///
/// Resolution order: explicit value, `RAZBOR_SERVICE_URL`, local default.
#[derive(Debug, Clone)]
pub struct ServiceEndpoints {
    base: String,
}

pub const SERVICE_URL_ENV: &str = "RAZBOR_SERVICE_URL";
const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

impl ServiceEndpoints {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn resolve(explicit: Option<&str>) -> Self {
        match explicit {
            Some(base) => Self::new(base),
            None => match std::env::var(SERVICE_URL_ENV) {
                Ok(base) if !base.trim().is_empty() => Self::new(base),
                _ => Self::new(DEFAULT_SERVICE_URL),
            },
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn upload_url(&self) -> String {
        format!("{}/api/upload", self.base)
    }

    pub fn transcribe_url(&self) -> String {
        format!("{}/api/transcribe", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let endpoints = ServiceEndpoints::new("https://api.example.com/");
        assert_eq!(endpoints.upload_url(), "https://api.example.com/api/upload");
        assert_eq!(
            endpoints.transcribe_url(),
            "https://api.example.com/api/transcribe"
        );
    }

    #[test]
    fn explicit_value_wins() {
        let endpoints = ServiceEndpoints::resolve(Some("http://10.0.0.5:9000"));
        assert_eq!(endpoints.base(), "http://10.0.0.5:9000");
    }
}
