//! Precomputed render view shared by every output surface.
//!
//! All derived numbers (percentages, band labels, coverage) are computed
//! here exactly once. The dashboard, the PDF report, and the terminal
//! summary read the same view, so their figures cannot drift apart.

use crate::{
    format::format_timestamp,
    score,
    types::{AnalysisResult, SkillAssessment},
};

pub const NO_KEY_TOPICS: &str = "No key topics identified";
pub const NO_RECOMMENDATIONS: &str = "No recommendations provided";
pub const NO_INSIGHTS: &str = "No actionable insights identified";

/// Level placeholder for a requested skill that was never discussed.
pub const NOT_MENTIONED: &str = "Not Mentioned";
/// Rating placeholder for a requested skill that was never discussed.
pub const NO_RATING: &str = "-";

#[derive(Debug, Clone, PartialEq)]
pub struct Gauge {
    pub percent: u32,
    pub band: &'static str,
}

impl Gauge {
    fn general(rating: f64) -> Self {
        Self {
            percent: score::rating_percent(rating),
            band: score::general_band(rating),
        }
    }

    fn quality(score_value: f64) -> Self {
        Self {
            percent: score::quality_percent(score_value),
            band: score::general_band(score_value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LabeledValue {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageView {
    pub covered: usize,
    pub total: usize,
    pub percent: u32,
}

#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub label: &'static str,
    pub raw: String,
    pub gauge: Gauge,
}

#[derive(Debug, Clone)]
pub struct SkillRow {
    pub name: String,
    pub level: String,
    pub rating_label: String,
    pub rating_display: String,
    pub required: bool,
    pub unavailable: bool,
    pub feedback: Option<String>,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub examples: Vec<String>,
}

impl SkillRow {
    fn from_assessment(skill: &SkillAssessment) -> Self {
        let unavailable = skill.unavailable();
        let level = if unavailable {
            NOT_MENTIONED.to_string()
        } else {
            skill.level.clone().unwrap_or_else(|| NO_RATING.to_string())
        };
        let (rating_label, rating_display) = if unavailable {
            (NO_RATING.to_string(), NO_RATING.to_string())
        } else {
            match skill.rating_score {
                Some(r) => (
                    skill
                        .rating_text
                        .clone()
                        .unwrap_or_else(|| score::skill_band(r).to_string()),
                    format!("{}%", score::rating_percent(r)),
                ),
                None => (
                    skill.rating_text.clone().unwrap_or_else(|| NO_RATING.to_string()),
                    NO_RATING.to_string(),
                ),
            }
        };
        Self {
            name: skill.skill_name.clone(),
            level,
            rating_label,
            rating_display,
            required: skill.required(),
            unavailable,
            feedback: skill.detailed_feedback.clone(),
            strengths: skill.strengths.clone(),
            improvements: skill.areas_for_improvement.clone(),
            examples: skill.examples_mentioned.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuestionView {
    pub number: usize,
    pub question: String,
    pub answer: Option<String>,
    pub feedback: Option<String>,
    pub rating: Option<Gauge>,
}

#[derive(Debug, Clone)]
pub struct SpeakingView {
    pub pace: Option<String>,
    pub filler_words: Option<u32>,
    pub repetitions: Option<u32>,
    pub technical_terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CommunicationView {
    pub summary: Option<String>,
    pub impact: Option<String>,
    pub rating: Option<Gauge>,
    pub language_fluency: Option<Gauge>,
    pub technical_articulation: Option<Gauge>,
}

#[derive(Debug, Clone)]
pub struct TechnicalView {
    pub proficiency: Option<Gauge>,
    pub flagged_coverage: Option<CoverageView>,
    pub overall_review: Option<String>,
    pub strengths_summary: Option<String>,
    pub weaknesses_summary: Option<String>,
    pub verdict: Option<String>,
    pub required_skills: Vec<SkillRow>,
    pub detected_skills: Vec<SkillRow>,
}

#[derive(Debug, Clone)]
pub struct SegmentView {
    pub window: String,
    pub text: String,
    pub confidence_percent: u32,
}

#[derive(Debug, Clone)]
pub struct ReportView {
    pub sentiment: Option<String>,
    pub quality: Option<Gauge>,
    pub word_count: Option<u32>,
    pub duration_label: String,
    /// Coverage against the list the user originally entered (summary card).
    pub requested_coverage: Option<CoverageView>,
    pub summary: Option<String>,
    pub key_topics: Vec<String>,
    pub recommendations: Vec<String>,
    pub insights: Vec<String>,
    pub content_analysis: Option<Vec<LabeledValue>>,
    pub speaking: Option<SpeakingView>,
    pub scores: Vec<ScoreRow>,
    pub communication: Option<CommunicationView>,
    pub technical: Option<TechnicalView>,
    pub questions: Vec<QuestionView>,
    pub interviewer_notes: Option<String>,
    pub final_assessment: Option<String>,
    pub transcript: Vec<SegmentView>,
}

impl ReportView {
    pub fn from_result(result: &AnalysisResult, requested_skills: &[String]) -> Self {
        let feedback = result.feedback.as_ref();
        let skills: &[SkillAssessment] = feedback
            .and_then(|f| f.technical_skills.as_ref())
            .map(|t| t.skills.as_slice())
            .unwrap_or(&[]);

        let requested_coverage = if requested_skills.is_empty() {
            None
        } else {
            Some(CoverageView {
                covered: score::covered_required_count(skills),
                total: requested_skills.len(),
                percent: score::requested_skill_coverage(skills, requested_skills),
            })
        };

        let technical = feedback
            .and_then(|f| f.technical_skills.as_ref())
            .map(|tech| {
                let (required, detected) = score::partition_skills(&tech.skills);
                let flagged_total = score::flagged_required_count(&tech.skills);
                TechnicalView {
                    proficiency: match (tech.depth_in_core_topics, tech.breadth_of_tech_stack) {
                        (Some(depth), Some(breadth)) => Some(Gauge {
                            percent: score::tech_proficiency_percent(depth, breadth),
                            band: score::general_band((depth + breadth) / 2.0),
                        }),
                        _ => None,
                    },
                    flagged_coverage: (flagged_total > 0).then(|| CoverageView {
                        covered: score::covered_required_count(&tech.skills),
                        total: flagged_total,
                        percent: score::flagged_skill_coverage(&tech.skills),
                    }),
                    overall_review: tech.overall_tech_review.clone(),
                    strengths_summary: tech.strengths_summary.clone(),
                    weaknesses_summary: tech.weaknesses_summary.clone(),
                    verdict: tech.verdict.clone(),
                    required_skills: required.iter().map(|s| SkillRow::from_assessment(s)).collect(),
                    detected_skills: detected.iter().map(|s| SkillRow::from_assessment(s)).collect(),
                }
            });

        let scores = feedback
            .map(|f| {
                [
                    ("Confidence Level", f.confidence_level),
                    ("Culture Fit", f.culture_fit),
                    ("Learning Aptitude", f.learning_aptitude),
                ]
                .into_iter()
                .filter_map(|(label, value)| {
                    value.map(|v| ScoreRow {
                        label,
                        raw: format!("{:.1} / 5", v),
                        gauge: Gauge::general(v),
                    })
                })
                .collect()
            })
            .unwrap_or_default();

        Self {
            sentiment: feedback
                .and_then(|f| f.overall_sentiment.as_deref())
                .map(title_case),
            quality: feedback.and_then(|f| f.quality_score).map(Gauge::quality),
            word_count: feedback.and_then(|f| f.word_count),
            duration_label: format_timestamp(result.duration),
            requested_coverage,
            summary: feedback.and_then(|f| f.summary.clone()),
            key_topics: feedback.map(|f| f.key_topics.clone()).unwrap_or_default(),
            recommendations: feedback
                .map(|f| f.recommendations.clone())
                .unwrap_or_default(),
            insights: feedback
                .map(|f| f.actionable_insights.clone())
                .unwrap_or_default(),
            content_analysis: feedback.and_then(|f| f.content_analysis.as_ref()).map(|c| {
                [
                    ("Clarity", &c.clarity),
                    ("Engagement", &c.engagement),
                    ("Information Density", &c.information_density),
                    ("Speaker Confidence", &c.speaker_confidence),
                ]
                .into_iter()
                .filter_map(|(label, value)| {
                    value.as_deref().map(|v| LabeledValue {
                        label,
                        value: title_case(v),
                    })
                })
                .collect()
            }),
            speaking: feedback
                .and_then(|f| f.speaking_patterns.as_ref())
                .map(|p| SpeakingView {
                    pace: p.pace.as_deref().map(title_case),
                    filler_words: p.filler_words,
                    repetitions: p.repetitions,
                    technical_terms: p.technical_terms.clone(),
                }),
            scores,
            communication: feedback
                .and_then(|f| f.communication_skills.as_ref())
                .map(|c| CommunicationView {
                    summary: c.summary.clone(),
                    impact: c.impact.clone(),
                    rating: c.rating.map(Gauge::general),
                    language_fluency: c.language_fluency.map(Gauge::general),
                    technical_articulation: c.technical_articulation.map(Gauge::general),
                }),
            technical,
            questions: feedback
                .map(|f| {
                    f.questions
                        .iter()
                        .enumerate()
                        .map(|(i, q)| QuestionView {
                            number: i + 1,
                            question: q
                                .question
                                .clone()
                                .unwrap_or_else(|| format!("Question {}", i + 1)),
                            answer: q.answer.clone(),
                            feedback: q.feedback.clone(),
                            rating: q.rating.map(Gauge::general),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            interviewer_notes: feedback.and_then(|f| f.interviewer_notes.clone()),
            final_assessment: feedback.and_then(|f| f.final_assessment.clone()),
            transcript: result
                .transcription
                .iter()
                .map(|seg| SegmentView {
                    window: format!(
                        "{} - {}",
                        format_timestamp(seg.start_time),
                        format_timestamp(seg.end_time)
                    ),
                    text: seg.text.trim().to_string(),
                    confidence_percent: (seg.confidence * 100.0).round() as u32,
                })
                .collect(),
        }
    }

    pub fn topics_empty_label(&self) -> &'static str {
        NO_KEY_TOPICS
    }

    pub fn recommendations_empty_label(&self) -> &'static str {
        NO_RECOMMENDATIONS
    }

    pub fn insights_empty_label(&self) -> &'static str {
        NO_INSIGHTS
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
