use crate::view::ReportView;

/// Format seconds as MM:SS timestamp
pub fn format_timestamp(seconds: f64) -> String {
    let mins = (seconds / 60.0) as u32;
    let secs = (seconds % 60.0) as u32;
    format!("{:02}:{:02}", mins, secs)
}

/// Format the analysis as a short human-readable terminal summary
pub fn format_summary_readable(view: &ReportView) -> String {
    let mut output = String::new();

    output.push_str("# Interview Feedback\n\n");

    let mut header = Vec::new();
    if let Some(sentiment) = &view.sentiment {
        header.push(format!("**Sentiment:** {}", sentiment));
    }
    if let Some(quality) = &view.quality {
        header.push(format!("**Quality:** {}% ({})", quality.percent, quality.band));
    }
    if let Some(words) = view.word_count {
        header.push(format!("**Words:** {}", words));
    }
    header.push(format!("**Duration:** {}", view.duration_label));
    output.push_str(&header.join(" | "));
    output.push_str("\n\n");

    if let Some(summary) = &view.summary {
        output.push_str("## Summary\n\n");
        output.push_str(summary);
        output.push_str("\n\n");
    }

    output.push_str("## Key Topics\n\n");
    if view.key_topics.is_empty() {
        output.push_str(view.topics_empty_label());
        output.push('\n');
    } else {
        for topic in &view.key_topics {
            output.push_str(&format!("• {}\n", topic));
        }
    }
    output.push('\n');

    if let Some(coverage) = &view.requested_coverage {
        output.push_str("## Required Skill Coverage\n\n");
        output.push_str(&format!(
            "{} of {} requested skills were discussed ({}%)\n\n",
            coverage.covered, coverage.total, coverage.percent
        ));
    }

    if let Some(tech) = &view.technical {
        if let Some(proficiency) = &tech.proficiency {
            output.push_str("## Technical Proficiency\n\n");
            output.push_str(&format!(
                "{}% ({})\n\n",
                proficiency.percent, proficiency.band
            ));
        }
    }

    if let Some(final_assessment) = &view.final_assessment {
        output.push_str("## Final Assessment\n\n");
        output.push_str(final_assessment);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AnalysisResult, FeedbackRecord};
    use crate::view::ReportView;

    #[test]
    fn timestamps_wrap_minutes() {
        assert_eq!(format_timestamp(0.0), "00:00");
        assert_eq!(format_timestamp(75.3), "01:15");
        assert_eq!(format_timestamp(600.0), "10:00");
    }

    #[test]
    fn summary_shows_empty_topics_fallback() {
        let result = AnalysisResult {
            feedback: Some(FeedbackRecord::default()),
            ..Default::default()
        };
        let view = ReportView::from_result(&result, &[]);
        let text = format_summary_readable(&view);
        assert!(text.contains("No key topics identified"));
    }

    #[test]
    fn summary_includes_quality_percent() {
        let result = AnalysisResult {
            feedback: Some(FeedbackRecord {
                quality_score: Some(4.0),
                overall_sentiment: Some("positive".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let view = ReportView::from_result(&result, &[]);
        let text = format_summary_readable(&view);
        assert!(text.contains("**Quality:** 80% (Excellent)"));
        assert!(text.contains("**Sentiment:** Positive"));
    }
}
