use std::path::{Path, PathBuf};

use askama::Template;

use crate::{error::Result, view::ReportView};

pub const DASHBOARD_FILE_NAME: &str = "dashboard.html";

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    view: &'a ReportView,
}

/// Render the full dashboard as one self-contained HTML document.
pub fn render_dashboard(view: &ReportView) -> Result<String> {
    Ok(DashboardTemplate { view }.render()?)
}

/// Render and write the dashboard into `dir`.
pub async fn save_dashboard(view: &ReportView, dir: &Path) -> Result<PathBuf> {
    let html = render_dashboard(view)?;
    let path = dir.join(DASHBOARD_FILE_NAME);
    tokio::fs::write(&path, html).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        AnalysisResult, FeedbackRecord, SkillAssessment, TechnicalSkills, NOT_AVAILABLE,
    };
    use crate::view::{ReportView, NOT_MENTIONED};

    fn view_for(feedback: FeedbackRecord, requested: &[String]) -> ReportView {
        let result = AnalysisResult {
            feedback: Some(feedback),
            ..Default::default()
        };
        ReportView::from_result(&result, requested)
    }

    #[test]
    fn quality_percent_appears_in_html() {
        let html = render_dashboard(&view_for(
            FeedbackRecord {
                quality_score: Some(4.0),
                ..Default::default()
            },
            &[],
        ))
        .unwrap();
        assert!(html.contains("80%"));
        assert!(html.contains("Content Quality"));
    }

    #[test]
    fn missing_technical_section_is_not_rendered() {
        let html = render_dashboard(&view_for(FeedbackRecord::default(), &[])).unwrap();
        assert!(!html.contains(r#"id="technical-skills""#));
        assert!(!html.contains(r#"id="interview-questions""#));
    }

    #[test]
    fn empty_topics_render_the_fallback_line() {
        let html = render_dashboard(&view_for(FeedbackRecord::default(), &[])).unwrap();
        assert!(html.contains("No key topics identified"));
        assert!(html.contains("No recommendations provided"));
    }

    #[test]
    fn unavailable_skill_is_listed_with_placeholders() {
        let feedback = FeedbackRecord {
            technical_skills: Some(TechnicalSkills {
                skills: vec![SkillAssessment {
                    skill_name: "SQL".into(),
                    is_required: Some(true),
                    availability_status: Some(NOT_AVAILABLE.into()),
                    ..Default::default()
                }],
                ..Default::default()
            }),
            ..Default::default()
        };
        let html = render_dashboard(&view_for(feedback, &[])).unwrap();
        assert!(html.contains("SQL"));
        assert!(html.contains(NOT_MENTIONED));
    }

    #[test]
    fn topic_text_is_html_escaped() {
        let feedback = FeedbackRecord {
            key_topics: vec!["<script>alert(1)</script>".into()],
            ..Default::default()
        };
        let html = render_dashboard(&view_for(feedback, &[])).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[tokio::test]
    async fn save_writes_the_dashboard_file() {
        let dir = tempfile::tempdir().unwrap();
        let view = view_for(FeedbackRecord::default(), &[]);
        let path = save_dashboard(&view, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), DASHBOARD_FILE_NAME);
        let html = std::fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
    }
}
