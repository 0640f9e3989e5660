//! Numeric conventions shared by every rendered surface.
//!
//! All ratings arrive on a fixed 0-5 (or 1-5) scale. Percentages derive from
//! exactly two formulas: `round(rating / 5 * 100)` for ratings and
//! `round(score * 20)` for the overall quality score. Keep them separate.

use crate::types::SkillAssessment;

/// Percentage for a 0-5 rating.
pub fn rating_percent(rating: f64) -> u32 {
    ((rating / 5.0) * 100.0).round() as u32
}

/// Percentage for the overall quality score (0-5 scale, x20 rule).
pub fn quality_percent(score: f64) -> u32 {
    (score * 20.0).round() as u32
}

/// Combined technical proficiency: mean of depth and breadth, then x20.
pub fn tech_proficiency_percent(depth: f64, breadth: f64) -> u32 {
    (((depth + breadth) / 2.0) * 20.0).round() as u32
}

/// Count of required skills that were actually discussed in the recording.
pub fn covered_required_count(skills: &[SkillAssessment]) -> usize {
    skills
        .iter()
        .filter(|s| s.required() && !s.unavailable())
        .count()
}

/// Count of skills the service flagged as required.
pub fn flagged_required_count(skills: &[SkillAssessment]) -> usize {
    skills.iter().filter(|s| s.required()).count()
}

/// Coverage with the service-flagged required count as denominator.
pub fn flagged_skill_coverage(skills: &[SkillAssessment]) -> u32 {
    coverage_percent(covered_required_count(skills), flagged_required_count(skills))
}

/// Coverage with the user's original request list length as denominator.
pub fn requested_skill_coverage(skills: &[SkillAssessment], requested: &[String]) -> u32 {
    coverage_percent(covered_required_count(skills), requested.len())
}

fn coverage_percent(covered: usize, total: usize) -> u32 {
    ((covered as f64 / total.max(1) as f64) * 100.0).round() as u32
}

/// Split skills into (required, detected), keeping the original order inside
/// each group.
pub fn partition_skills(skills: &[SkillAssessment]) -> (Vec<&SkillAssessment>, Vec<&SkillAssessment>) {
    skills.iter().partition(|s| s.required())
}

/// Band label for general-purpose ratings (quality, answers, aptitude).
pub fn general_band(rating: f64) -> &'static str {
    if rating >= 4.0 {
        "Excellent"
    } else if rating >= 3.0 {
        "Good"
    } else if rating >= 2.0 {
        "Fair"
    } else {
        "Poor"
    }
}

/// Band label for per-skill ratings. A different vocabulary than
/// [`general_band`] on purpose; the two must not be merged.
pub fn skill_band(rating: f64) -> &'static str {
    if rating >= 4.0 {
        "Excellent"
    } else if rating >= 3.0 {
        "Very Good"
    } else if rating >= 2.0 {
        "Satisfactory"
    } else {
        "Needs Improvement"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NOT_AVAILABLE;

    fn skill(name: &str, required: bool, status: Option<&str>) -> SkillAssessment {
        SkillAssessment {
            skill_name: name.into(),
            is_required: Some(required),
            availability_status: status.map(Into::into),
            ..Default::default()
        }
    }

    #[test]
    fn rating_percent_endpoints_and_midpoint() {
        assert_eq!(rating_percent(0.0), 0);
        assert_eq!(rating_percent(2.5), 50);
        assert_eq!(rating_percent(5.0), 100);
    }

    #[test]
    fn quality_percent_uses_times_twenty() {
        assert_eq!(quality_percent(0.0), 0);
        assert_eq!(quality_percent(4.0), 80);
        assert_eq!(quality_percent(5.0), 100);
    }

    #[test]
    fn tech_proficiency_averages_before_scaling() {
        assert_eq!(tech_proficiency_percent(4.0, 4.0), 80);
        assert_eq!(tech_proficiency_percent(5.0, 3.0), 80);
        assert_eq!(tech_proficiency_percent(0.0, 0.0), 0);
    }

    #[test]
    fn coverage_counts_unavailable_in_denominator_only() {
        let skills = vec![
            skill("React", true, Some("Available")),
            skill("SQL", true, Some(NOT_AVAILABLE)),
        ];
        let requested = vec!["React".to_string(), "SQL".to_string()];

        assert_eq!(covered_required_count(&skills), 1);
        assert_eq!(flagged_required_count(&skills), 2);
        assert_eq!(flagged_skill_coverage(&skills), 50);
        assert_eq!(requested_skill_coverage(&skills, &requested), 50);
    }

    #[test]
    fn coverage_denominators_can_diverge() {
        // The service flagged one extra skill the user never asked for.
        let skills = vec![
            skill("React", true, Some("Available")),
            skill("SQL", true, Some("Available")),
            skill("Docker", true, Some(NOT_AVAILABLE)),
        ];
        let requested = vec!["React".to_string(), "SQL".to_string()];

        assert_eq!(flagged_skill_coverage(&skills), 67);
        assert_eq!(requested_skill_coverage(&skills, &requested), 100);
    }

    #[test]
    fn coverage_guards_empty_denominator() {
        assert_eq!(flagged_skill_coverage(&[]), 0);
        assert_eq!(requested_skill_coverage(&[], &[]), 0);
    }

    #[test]
    fn partition_keeps_original_order_within_groups() {
        let skills = vec![
            skill("Go", false, None),
            skill("React", true, None),
            skill("Kafka", false, None),
            skill("SQL", true, None),
        ];
        let (required, detected) = partition_skills(&skills);
        fn names<'a>(v: Vec<&'a SkillAssessment>) -> Vec<&'a str> {
            v.iter().map(|s| s.skill_name.as_str()).collect::<Vec<_>>()
        }
        assert_eq!(names(required), vec!["React", "SQL"]);
        assert_eq!(names(detected), vec!["Go", "Kafka"]);
    }

    #[test]
    fn band_vocabularies_stay_distinct() {
        assert_eq!(general_band(4.5), "Excellent");
        assert_eq!(general_band(3.0), "Good");
        assert_eq!(general_band(2.0), "Fair");
        assert_eq!(general_band(1.9), "Poor");

        assert_eq!(skill_band(4.0), "Excellent");
        assert_eq!(skill_band(3.5), "Very Good");
        assert_eq!(skill_band(2.2), "Satisfactory");
        assert_eq!(skill_band(0.5), "Needs Improvement");
    }
}
