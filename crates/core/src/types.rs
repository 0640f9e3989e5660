use serde::{Deserialize, Deserializer, Serialize};

/// Body of the analysis request sent to the remote service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub video_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
}

impl AnalysisRequest {
    pub fn new(video_url: impl Into<String>, required_skills: &[String]) -> Self {
        Self {
            video_url: video_url.into(),
            required_skills: if required_skills.is_empty() {
                None
            } else {
                Some(required_skills.to_vec())
            },
        }
    }
}

/// Success body of the storage upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub file: UploadedFile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub url: String,
}

/// The full document returned by the analysis service for one recording.
///
/// Arrives atomically as the response of a single request and is read-only
/// afterwards. Every nested part may be absent or empty; consumers render
/// what is there and omit the rest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub transcription: Vec<TranscriptSegment>,
    #[serde(default)]
    pub full_text: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub feedback: Option<FeedbackRecord>,
}

/// One chronological slice of the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub text: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRecord {
    #[serde(default)]
    pub overall_sentiment: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub key_topics: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub actionable_insights: Vec<String>,
    #[serde(default)]
    pub quality_score: Option<f64>,
    // the service's degraded responses put a placeholder string here
    #[serde(default, deserialize_with = "lenient_u32")]
    pub word_count: Option<u32>,
    #[serde(default)]
    pub content_analysis: Option<ContentAnalysis>,
    #[serde(default)]
    pub speaking_patterns: Option<SpeakingPatterns>,
    #[serde(default)]
    pub communication_skills: Option<CommunicationSkills>,
    #[serde(default)]
    pub technical_skills: Option<TechnicalSkills>,
    #[serde(default)]
    pub questions: Vec<QuestionReview>,
    #[serde(default)]
    pub interviewer_notes: Option<String>,
    #[serde(default)]
    pub final_assessment: Option<String>,
    #[serde(default)]
    pub confidence_level: Option<f64>,
    #[serde(default)]
    pub culture_fit: Option<f64>,
    #[serde(default)]
    pub learning_aptitude: Option<f64>,
}

/// Descriptive ratings of the content itself (values like "high"/"medium"/"low",
/// kept opaque).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentAnalysis {
    #[serde(default)]
    pub clarity: Option<String>,
    #[serde(default)]
    pub engagement: Option<String>,
    #[serde(default)]
    pub information_density: Option<String>,
    #[serde(default)]
    pub speaker_confidence: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpeakingPatterns {
    #[serde(default)]
    pub pace: Option<String>,
    #[serde(default)]
    pub filler_words: Option<u32>,
    #[serde(default)]
    pub repetitions: Option<u32>,
    #[serde(default)]
    pub technical_terms: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommunicationSkills {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub language_fluency: Option<f64>,
    #[serde(default)]
    pub technical_articulation: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnicalSkills {
    #[serde(default)]
    pub skills: Vec<SkillAssessment>,
    #[serde(default)]
    pub overall_tech_review: Option<String>,
    #[serde(default)]
    pub strengths_summary: Option<String>,
    #[serde(default)]
    pub weaknesses_summary: Option<String>,
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub depth_in_core_topics: Option<f64>,
    #[serde(default)]
    pub breadth_of_tech_stack: Option<f64>,
}

/// Marks a requested skill that never came up in the recording.
pub const NOT_AVAILABLE: &str = "Not Available";

/// The candidate's demonstrated level in one named skill.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillAssessment {
    #[serde(default)]
    pub skill_name: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub rating_text: Option<String>,
    #[serde(default)]
    pub rating_score: Option<f64>,
    #[serde(default)]
    pub detailed_feedback: Option<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub examples_mentioned: Vec<String>,
    #[serde(default)]
    pub is_required: Option<bool>,
    #[serde(default)]
    pub availability_status: Option<String>,
}

impl SkillAssessment {
    /// Whether the user explicitly asked the service to evaluate this skill.
    pub fn required(&self) -> bool {
        self.is_required.unwrap_or(false)
    }

    /// Whether the skill was requested but never discussed in the recording.
    pub fn unavailable(&self) -> bool {
        self.availability_status.as_deref() == Some(NOT_AVAILABLE)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionReview {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub feedback: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_u64().and_then(|n| u32::try_from(n).ok()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_request_uses_camel_case_wire_names() {
        let req = AnalysisRequest::new("https://cdn.example/v.mp4", &["React".to_string()]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["videoUrl"], "https://cdn.example/v.mp4");
        assert_eq!(json["requiredSkills"][0], "React");
    }

    #[test]
    fn analysis_request_omits_skills_when_none_given() {
        let req = AnalysisRequest::new("https://cdn.example/v.mp4", &[]);
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("requiredSkills"));
    }

    #[test]
    fn partial_result_deserializes_with_everything_absent() {
        let result: AnalysisResult =
            serde_json::from_str(r#"{"full_text": "hello world"}"#).unwrap();
        assert_eq!(result.full_text, "hello world");
        assert!(result.transcription.is_empty());
        assert!(result.feedback.is_none());
    }

    #[test]
    fn feedback_tolerates_missing_nested_sections() {
        let feedback: FeedbackRecord =
            serde_json::from_str(r#"{"overall_sentiment": "positive"}"#).unwrap();
        assert_eq!(feedback.overall_sentiment.as_deref(), Some("positive"));
        assert!(feedback.technical_skills.is_none());
        assert!(feedback.key_topics.is_empty());
        assert!(feedback.questions.is_empty());
    }

    #[test]
    fn word_count_placeholder_string_becomes_none() {
        let feedback: FeedbackRecord =
            serde_json::from_str(r#"{"word_count": "integer"}"#).unwrap();
        assert!(feedback.word_count.is_none());

        let feedback: FeedbackRecord = serde_json::from_str(r#"{"word_count": 1000}"#).unwrap();
        assert_eq!(feedback.word_count, Some(1000));
    }

    #[test]
    fn skill_availability_helpers() {
        let skill = SkillAssessment {
            skill_name: "SQL".into(),
            is_required: Some(true),
            availability_status: Some(NOT_AVAILABLE.into()),
            ..Default::default()
        };
        assert!(skill.required());
        assert!(skill.unavailable());

        let skill = SkillAssessment {
            skill_name: "React".into(),
            availability_status: Some("Available".into()),
            ..Default::default()
        };
        assert!(!skill.required());
        assert!(!skill.unavailable());
    }

    #[test]
    fn segment_confidence_defaults_to_zero() {
        let seg: TranscriptSegment =
            serde_json::from_str(r#"{"start_time": 0.0, "end_time": 2.5, "text": "hi"}"#).unwrap();
        assert_eq!(seg.confidence, 0.0);
    }
}
