//! Printable report, mirroring the dashboard sections page by page.
//!
//! Pages are a fixed grouping of sections (summary, scores and skills,
//! questions, technical and communication detail, final assessment); a group
//! only flows onto an extra page when its own content overflows. The
//! document is assembled object by object with uncompressed content
//! streams.

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::{
    error::{RazborError, Result},
    view::{ReportView, SkillRow},
};

pub const REPORT_FILE_NAME: &str = "interview-report.pdf";

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN_LEFT: f64 = 56.0;
const MARGIN_RIGHT: f64 = 56.0;
const TOP_Y: f64 = 786.0;
const BOTTOM_Y: f64 = 56.0;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

/// Render the report and return the finished PDF bytes.
pub fn render_report(view: &ReportView) -> Result<Vec<u8>> {
    build_document(compose_pages(view))
}

/// Render and write the report into `dir` under its fixed file name.
pub async fn save_report(view: &ReportView, dir: &Path) -> Result<PathBuf> {
    let bytes = render_report(view)?;
    let path = dir.join(REPORT_FILE_NAME);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

fn compose_pages(view: &ReportView) -> Vec<Vec<Operation>> {
    let mut page = PageComposer::new();
    summary_group(&mut page, view);
    page.break_page();
    assessment_group(&mut page, view);
    page.break_page();
    questions_group(&mut page, view);
    page.break_page();
    technical_group(&mut page, view);
    page.break_page();
    final_group(&mut page, view);
    page.finish()
}

fn summary_group(page: &mut PageComposer, view: &ReportView) {
    page.heading("Interview Analysis Report");
    page.line(&format!("Recording duration {}", view.duration_label));
    page.gap(10.0);

    if let Some(sentiment) = &view.sentiment {
        page.label_value("Overall Sentiment", sentiment);
    }
    if let Some(quality) = &view.quality {
        page.label_value(
            "Content Quality",
            &format!("{}% ({})", quality.percent, quality.band),
        );
    }
    if let Some(words) = view.word_count {
        page.label_value("Word Count", &words.to_string());
    }
    if let Some(coverage) = &view.requested_coverage {
        page.label_value(
            "Required Skill Coverage",
            &format!(
                "{} of {} requested skills discussed ({}%)",
                coverage.covered, coverage.total, coverage.percent
            ),
        );
    }

    if let Some(summary) = &view.summary {
        page.subheading("Summary");
        page.paragraph(summary);
    }

    page.subheading("Key Topics");
    if view.key_topics.is_empty() {
        page.line(view.topics_empty_label());
    } else {
        for topic in &view.key_topics {
            page.bullet(topic);
        }
    }

    if let Some(rows) = &view.content_analysis {
        page.subheading("Content Analysis");
        for row in rows {
            page.label_value(row.label, &row.value);
        }
    }

    if let Some(speaking) = &view.speaking {
        page.subheading("Speaking Patterns");
        if let Some(pace) = &speaking.pace {
            page.label_value("Pace", pace);
        }
        if let Some(fillers) = speaking.filler_words {
            page.label_value("Filler Words", &fillers.to_string());
        }
        if let Some(repetitions) = speaking.repetitions {
            page.label_value("Repetitions", &repetitions.to_string());
        }
        if !speaking.technical_terms.is_empty() {
            page.label_value("Technical Terms", &speaking.technical_terms.join(", "));
        }
    }
}

fn assessment_group(page: &mut PageComposer, view: &ReportView) {
    if !view.scores.is_empty() {
        page.subheading("Assessment Scores");
        for row in &view.scores {
            page.columns(&[
                (MARGIN_LEFT, row.label),
                (240.0, &row.raw),
                (330.0, &format!("{}%", row.gauge.percent)),
                (410.0, row.gauge.band),
            ]);
        }
    }

    let tech = match &view.technical {
        Some(tech) => tech,
        None => return,
    };

    if !tech.required_skills.is_empty() {
        page.subheading("Required Skills");
        skill_table(page, &tech.required_skills);
    }
    if !tech.detected_skills.is_empty() {
        page.subheading("Detected Skills");
        skill_table(page, &tech.detected_skills);
    }
}

fn skill_table(page: &mut PageComposer, skills: &[SkillRow]) {
    page.table_header(&[
        (MARGIN_LEFT, "Skill"),
        (240.0, "Level"),
        (350.0, "Rating"),
        (470.0, "Score"),
    ]);
    for skill in skills {
        page.columns(&[
            (MARGIN_LEFT, skill.name.as_str()),
            (240.0, skill.level.as_str()),
            (350.0, skill.rating_label.as_str()),
            (470.0, skill.rating_display.as_str()),
        ]);
    }
}

fn questions_group(page: &mut PageComposer, view: &ReportView) {
    if view.questions.is_empty() {
        return;
    }
    page.subheading("Interview Q&A");
    for q in &view.questions {
        let mut title = format!("{}. {}", q.number, q.question);
        if let Some(rating) = &q.rating {
            title.push_str(&format!(" ({}% - {})", rating.percent, rating.band));
        }
        page.bold_paragraph(&title);
        if let Some(answer) = &q.answer {
            page.paragraph(answer);
        }
        if let Some(feedback) = &q.feedback {
            page.paragraph(feedback);
        }
        page.gap(6.0);
    }
}

fn technical_group(page: &mut PageComposer, view: &ReportView) {
    if let Some(tech) = &view.technical {
        page.subheading("Technical Review");
        if let Some(proficiency) = &tech.proficiency {
            page.label_value(
                "Technical Proficiency",
                &format!("{}% ({})", proficiency.percent, proficiency.band),
            );
        }
        if let Some(coverage) = &tech.flagged_coverage {
            page.label_value(
                "Required Skills Discussed",
                &format!(
                    "{} of {} flagged skills ({}%)",
                    coverage.covered, coverage.total, coverage.percent
                ),
            );
        }
        if let Some(review) = &tech.overall_review {
            page.paragraph(review);
        }
        if let Some(strengths) = &tech.strengths_summary {
            page.label_value("Strengths", strengths);
        }
        if let Some(weaknesses) = &tech.weaknesses_summary {
            page.label_value("Weaknesses", weaknesses);
        }
        if let Some(verdict) = &tech.verdict {
            page.label_value("Verdict", verdict);
        }

        for skill in tech.required_skills.iter().chain(&tech.detected_skills) {
            if skill.feedback.is_none()
                && skill.strengths.is_empty()
                && skill.improvements.is_empty()
                && skill.examples.is_empty()
            {
                continue;
            }
            page.bold_paragraph(&skill.name);
            if let Some(feedback) = &skill.feedback {
                page.paragraph(feedback);
            }
            for item in &skill.strengths {
                page.bullet(&format!("Strength: {}", item));
            }
            for item in &skill.improvements {
                page.bullet(&format!("Improve: {}", item));
            }
            for item in &skill.examples {
                page.bullet(&format!("Example: {}", item));
            }
            page.gap(4.0);
        }
    }

    if let Some(comm) = &view.communication {
        page.subheading("Communication Skills");
        if let Some(summary) = &comm.summary {
            page.paragraph(summary);
        }
        if let Some(impact) = &comm.impact {
            page.paragraph(impact);
        }
        if let Some(rating) = &comm.rating {
            page.label_value("Overall", &format!("{}% ({})", rating.percent, rating.band));
        }
        if let Some(fluency) = &comm.language_fluency {
            page.label_value(
                "Language Fluency",
                &format!("{}% ({})", fluency.percent, fluency.band),
            );
        }
        if let Some(articulation) = &comm.technical_articulation {
            page.label_value(
                "Technical Articulation",
                &format!("{}% ({})", articulation.percent, articulation.band),
            );
        }
    }
}

fn final_group(page: &mut PageComposer, view: &ReportView) {
    if let Some(notes) = &view.interviewer_notes {
        page.subheading("Interviewer Notes");
        page.paragraph(notes);
    }
    if let Some(final_assessment) = &view.final_assessment {
        page.subheading("Final Assessment");
        page.paragraph(final_assessment);
    }
}

/// Cursor-based page assembler. Text only flows down; a group that runs out
/// of room continues on a fresh page.
struct PageComposer {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f64,
}

impl PageComposer {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: TOP_Y,
        }
    }

    /// Close the current page; the next write starts a new one.
    fn break_page(&mut self) {
        if !self.current.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        self.y = TOP_Y;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.break_page();
        self.pages
    }

    fn ensure_room(&mut self, needed: f64) {
        if self.y - needed < BOTTOM_Y {
            self.break_page();
        }
    }

    fn heading(&mut self, text: &str) {
        self.ensure_room(30.0);
        self.text(BOLD, 18.0, MARGIN_LEFT, text);
        self.y -= 24.0;
        self.rule();
        self.y -= 10.0;
    }

    fn subheading(&mut self, text: &str) {
        self.ensure_room(34.0);
        self.y -= 8.0;
        self.text(BOLD, 12.0, MARGIN_LEFT, text);
        self.y -= 18.0;
    }

    fn line(&mut self, text: &str) {
        self.wrapped(REGULAR, 10.0, MARGIN_LEFT, text);
    }

    fn paragraph(&mut self, text: &str) {
        self.wrapped(REGULAR, 10.0, MARGIN_LEFT, text);
        self.y -= 4.0;
    }

    fn bold_paragraph(&mut self, text: &str) {
        self.wrapped(BOLD, 10.0, MARGIN_LEFT, text);
    }

    fn bullet(&mut self, text: &str) {
        self.ensure_room(14.0);
        self.text(REGULAR, 10.0, MARGIN_LEFT, "-");
        self.wrapped(REGULAR, 10.0, MARGIN_LEFT + 12.0, text);
    }

    fn label_value(&mut self, label: &str, value: &str) {
        self.ensure_room(14.0);
        self.text(BOLD, 10.0, MARGIN_LEFT, label);
        self.wrapped(REGULAR, 10.0, 240.0, value);
    }

    fn table_header(&mut self, cells: &[(f64, &str)]) {
        self.ensure_room(16.0);
        for (x, text) in cells {
            self.text(BOLD, 9.0, *x, text);
        }
        self.y -= 13.0;
        self.rule();
        self.y -= 4.0;
    }

    fn columns(&mut self, cells: &[(f64, &str)]) {
        self.ensure_room(14.0);
        for (x, text) in cells {
            self.text(REGULAR, 9.0, *x, text);
        }
        self.y -= 13.0;
    }

    fn gap(&mut self, amount: f64) {
        self.y -= amount;
    }

    fn rule(&mut self) {
        self.current.push(Operation::new("w", vec![0.5.into()]));
        self.current
            .push(Operation::new("m", vec![MARGIN_LEFT.into(), self.y.into()]));
        self.current.push(Operation::new(
            "l",
            vec![(PAGE_WIDTH - MARGIN_RIGHT).into(), self.y.into()],
        ));
        self.current.push(Operation::new("S", vec![]));
    }

    fn wrapped(&mut self, font: &str, size: f64, x: f64, text: &str) {
        let line_height = size * 1.4;
        let max_chars = (((PAGE_WIDTH - MARGIN_RIGHT - x) / (size * 0.5)) as usize).max(16);
        for line in wrap(text, max_chars) {
            self.ensure_room(line_height);
            self.text(font, size, x, &line);
            self.y -= line_height;
        }
    }

    fn text(&mut self, font: &str, size: f64, x: f64, text: &str) {
        self.current.push(Operation::new("BT", vec![]));
        self.current
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.current.push(Operation::new(
            "Tm",
            vec![
                1.into(),
                0.into(),
                0.into(),
                1.into(),
                x.into(),
                self.y.into(),
            ],
        ));
        self.current.push(Operation::new(
            "Tj",
            vec![Object::string_literal(sanitize(text))],
        ));
        self.current.push(Operation::new("ET", vec![]));
    }
}

fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

// Helvetica with the default encoding; anything outside printable ASCII is
// substituted rather than risking a broken content stream.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201c}' | '\u{201d}' => '"',
            '\u{2013}' | '\u{2014}' | '\u{2022}' => '-',
            _ => '?',
        })
        .collect()
}

fn build_document(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });

    let mut kids: Vec<Object> = Vec::new();
    for operations in pages {
        let encoded = Content { operations }.encode().map_err(pdf_error)?;
        let stream_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => stream_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => font_regular,
                    "F2" => font_bold,
                },
            },
            "MediaBox" => vec![
                0.into(),
                0.into(),
                PAGE_WIDTH.into(),
                PAGE_HEIGHT.into(),
            ],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RazborError::ReportFailed {
            reason: e.to_string(),
        })?;
    Ok(buffer)
}

fn pdf_error(e: lopdf::Error) -> RazborError {
    RazborError::ReportFailed {
        reason: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::render_dashboard;
    use crate::types::AnalysisResult;
    use crate::view::ReportView;

    fn rich_result() -> AnalysisResult {
        serde_json::from_str(
            r#"{
                "transcription": [
                    {"start_time": 0.0, "end_time": 30.0, "text": "hello", "confidence": 0.9}
                ],
                "full_text": "hello",
                "duration": 300.0,
                "feedback": {
                    "overall_sentiment": "positive",
                    "summary": "Solid backend fundamentals.",
                    "key_topics": ["Microservices", "Databases"],
                    "recommendations": ["Review database internals"],
                    "actionable_insights": ["Practice system design out loud"],
                    "quality_score": 4,
                    "word_count": 1000,
                    "questions": [
                        {"question": "Design a queue", "answer": "I would...", "rating": 3.5, "feedback": "Decent"}
                    ],
                    "communication_skills": {
                        "summary": "Clear and structured",
                        "rating": 4, "language_fluency": 5, "technical_articulation": 4
                    },
                    "technical_skills": {
                        "skills": [
                            {"skill_name": "React", "level": "Professional", "rating_score": 4,
                             "is_required": true, "availability_status": "Available"},
                            {"skill_name": "SQL", "is_required": true,
                             "availability_status": "Not Available"}
                        ],
                        "overall_tech_review": "Good grasp of fundamentals",
                        "depth_in_core_topics": 4,
                        "breadth_of_tech_stack": 4
                    },
                    "confidence_level": 4,
                    "culture_fit": 5,
                    "learning_aptitude": 4,
                    "final_assessment": "Recommended for senior roles."
                }
            }"#,
        )
        .unwrap()
    }

    fn pdf_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn report_is_a_pdf_with_the_main_sections() {
        let requested = vec!["React".to_string(), "SQL".to_string()];
        let view = ReportView::from_result(&rich_result(), &requested);
        let bytes = render_report(&view).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));

        let text = pdf_text(&bytes);
        assert!(text.contains("Interview Analysis Report"));
        assert!(text.contains("Assessment Scores"));
        assert!(text.contains("Interview Q&A"));
        assert!(text.contains("Final Assessment"));
        assert!(text.contains("Not Mentioned"));
    }

    #[test]
    fn missing_sections_do_not_break_the_report() {
        let view = ReportView::from_result(&AnalysisResult::default(), &[]);
        let bytes = render_report(&view).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let text = pdf_text(&bytes);
        assert!(!text.contains("Technical Review"));
        assert!(text.contains("No key topics identified"));
    }

    #[test]
    fn dashboard_and_report_agree_on_every_percentage() {
        let requested = vec!["React".to_string(), "SQL".to_string()];
        let view = ReportView::from_result(&rich_result(), &requested);

        let html = render_dashboard(&view).unwrap();
        let pdf = pdf_text(&render_report(&view).unwrap());

        // quality 4 -> 80, coverage 1/2 -> 50, proficiency (4+4)/2 -> 80,
        // question 3.5 -> 70, fluency 5 -> 100
        for needle in ["80%", "50%", "70%", "100%", "Excellent", "Good"] {
            assert!(html.contains(needle), "dashboard missing {needle}");
            assert!(pdf.contains(needle), "report missing {needle}");
        }
        assert!(html.contains("1 of 2"));
        assert!(pdf.contains("1 of 2"));
    }

    #[test]
    fn wrap_splits_on_word_boundaries() {
        let lines = wrap("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn sanitize_replaces_non_ascii() {
        assert_eq!(sanitize("plain text"), "plain text");
        assert_eq!(sanitize("caf\u{e9} \u{2014} ok"), "caf? - ok");
    }

    #[tokio::test]
    async fn save_writes_the_fixed_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let view = ReportView::from_result(&AnalysisResult::default(), &[]);
        let path = save_report(&view, dir.path()).await.unwrap();
        assert_eq!(path.file_name().unwrap(), REPORT_FILE_NAME);
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }
}
