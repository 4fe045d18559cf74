use crate::core::normalize::{contains_any, jaccard, normalize_set, normalize_tags, normalize_text};
use crate::models::OpportunityType;

/// Lowest GPA sub-score a present but insufficient GPA can receive
pub const GPA_FLOOR: f64 = 0.3;

/// Sub-score for soft factors the candidate left empty
pub const NEUTRAL_SCORE: f64 = 0.5;

const RESEARCH_KEYWORDS: &[&str] = &["research", "academic", "study", "thesis", "phd", "master"];
const INDUSTRY_KEYWORDS: &[&str] = &["industry", "job", "career", "work", "internship", "employment"];

/// GPA sub-score (0-1)
///
/// A missing or zero minimum is no constraint. A missing candidate GPA
/// cannot satisfy a real minimum. Below the minimum the ratio is used,
/// floored at [`GPA_FLOOR`].
#[inline]
pub fn gpa_score(gpa: Option<f64>, min_gpa: Option<f64>) -> f64 {
    let min = match min_gpa {
        Some(m) if m > 0.0 => m,
        _ => return 1.0,
    };
    let Some(gpa) = gpa else {
        return 0.0;
    };

    if gpa >= min {
        1.0
    } else {
        (gpa / min).max(GPA_FLOOR).clamp(0.0, 1.0)
    }
}

/// Skills sub-score (0-1): Jaccard over normalized skill sets
pub fn skills_score(candidate_skills: &[String], required_skills: &[String]) -> f64 {
    let required = normalize_set(required_skills);
    if required.is_empty() {
        return 1.0;
    }
    let candidate = normalize_set(candidate_skills);
    if candidate.is_empty() {
        return 0.0;
    }

    jaccard(&candidate, &required)
}

/// Interests sub-score (0-1): share of interests mentioned in the description
pub fn interests_score(interests: &[String], description: &str) -> f64 {
    let interests = normalize_tags(interests);
    if interests.is_empty() {
        return NEUTRAL_SCORE;
    }

    let description = normalize_text(description);
    let matched = interests
        .iter()
        .filter(|interest| description.contains(interest.as_str()))
        .count();

    matched as f64 / interests.len() as f64
}

/// Goals sub-score (0-1)
///
/// Research/academic goals earn 0.5 against research-flavoured
/// opportunities, industry/job/career goals earn 0.5 against
/// industry-flavoured ones. Both may apply.
pub fn goals_score(goals: &[String], opportunity_type: OpportunityType, description: &str) -> f64 {
    let goals = normalize_tags(goals);
    if goals.is_empty() {
        return NEUTRAL_SCORE;
    }

    let description = normalize_text(description);
    let mut score = 0.0;

    let wants_research = goals
        .iter()
        .any(|g| g.contains("research") || g.contains("academic"));
    if wants_research
        && (opportunity_type == OpportunityType::ResearchLab
            || contains_any(&description, RESEARCH_KEYWORDS))
    {
        score += 0.5;
    }

    let wants_industry = goals
        .iter()
        .any(|g| g.contains("industry") || g.contains("job") || g.contains("career"));
    if wants_industry
        && (opportunity_type == OpportunityType::Program
            || contains_any(&description, INDUSTRY_KEYWORDS))
    {
        score += 0.5;
    }

    f64::min(1.0, score)
}

/// Strengths sub-score (0-1)
///
/// Half from strengths mentioned in the description, half from strengths
/// that are also required skills.
pub fn strengths_score(strengths: &[String], description: &str, required_skills: &[String]) -> f64 {
    let strengths = normalize_set(strengths);
    if strengths.is_empty() {
        return NEUTRAL_SCORE;
    }

    let description = normalize_text(description);
    let required = normalize_set(required_skills);

    let in_description = strengths
        .iter()
        .filter(|s| description.contains(s.as_str()))
        .count();
    let desc_score = in_description as f64 / strengths.len() as f64;

    let skill_score = if required.is_empty() {
        0.0
    } else {
        strengths.intersection(&required).count() as f64 / required.len() as f64
    };

    desc_score * 0.5 + skill_score * 0.5
}

/// Legacy GPA sub-score: plain ratio below the minimum, no floor
#[inline]
pub fn legacy_gpa_score(gpa: Option<f64>, min_gpa: Option<f64>) -> f64 {
    let Some(min) = min_gpa else {
        return 1.0;
    };
    let Some(gpa) = gpa else {
        return 0.0;
    };

    if gpa >= min {
        1.0
    } else if min > 0.0 {
        (gpa / min).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// 1.0 when both locations are present and equal ignoring case
#[inline]
pub fn location_score(candidate: Option<&str>, required: Option<&str>) -> f64 {
    match (candidate.map(normalize_text), required.map(normalize_text)) {
        (Some(a), Some(b)) if !a.is_empty() && a == b => 1.0,
        _ => 0.0,
    }
}

/// Plain Jaccard over two tag lists after normalization
pub fn overlap_score(a: &[String], b: &[String]) -> f64 {
    jaccard(&normalize_set(a), &normalize_set(b))
}

/// Normalized tags present in both lists, in sorted order
pub fn shared_tags(a: &[String], b: &[String]) -> Vec<String> {
    let a = normalize_set(a);
    let b = normalize_set(b);
    a.intersection(&b).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_gpa_score_rules() {
        assert_eq!(gpa_score(Some(2.0), None), 1.0);
        assert_eq!(gpa_score(None, Some(0.0)), 1.0);
        assert_eq!(gpa_score(None, Some(3.0)), 0.0);
        assert_eq!(gpa_score(Some(3.5), Some(3.0)), 1.0);
        assert!((gpa_score(Some(2.7), Some(3.0)) - 0.9).abs() < 1e-9);
        assert_eq!(gpa_score(Some(0.2), Some(3.0)), GPA_FLOOR);
    }

    #[test]
    fn test_skills_score_rules() {
        assert_eq!(skills_score(&tags(&["python"]), &[]), 1.0);
        assert_eq!(skills_score(&[], &tags(&["python"])), 0.0);
        assert_eq!(skills_score(&tags(&["Python", "ML"]), &tags(&["python"])), 0.5);
    }

    #[test]
    fn test_interests_score() {
        assert_eq!(interests_score(&[], "anything"), NEUTRAL_SCORE);
        let score = interests_score(
            &tags(&["Machine Learning", "robotics"]),
            "A lab working on machine learning for healthcare",
        );
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_goals_score() {
        assert_eq!(goals_score(&[], OpportunityType::Program, ""), NEUTRAL_SCORE);
        assert_eq!(
            goals_score(&tags(&["Research career"]), OpportunityType::Program, "Master thesis track"),
            1.0
        );
        assert_eq!(
            goals_score(&tags(&["Research career"]), OpportunityType::ResearchLab, ""),
            0.5
        );
        assert_eq!(
            goals_score(&tags(&["research"]), OpportunityType::Scholarship, "thesis funding"),
            0.5
        );
        assert_eq!(
            goals_score(&tags(&["industry"]), OpportunityType::Scholarship, "merit award"),
            0.0
        );
    }

    #[test]
    fn test_strengths_score() {
        assert_eq!(strengths_score(&[], "", &[]), NEUTRAL_SCORE);
        // one of two strengths in description, one of one required skill
        let score = strengths_score(
            &tags(&["Leadership", "python"]),
            "We value leadership",
            &tags(&["Python"]),
        );
        assert!((score - 0.75).abs() < 1e-9);
        // no required skills: only the description half counts
        let score = strengths_score(&tags(&["leadership"]), "leadership", &[]);
        assert_eq!(score, 0.5);
    }

    #[test]
    fn test_legacy_gpa_has_no_floor() {
        assert_eq!(legacy_gpa_score(Some(3.0), None), 1.0);
        assert_eq!(legacy_gpa_score(None, Some(3.0)), 0.0);
        assert!((legacy_gpa_score(Some(0.6), Some(3.0)) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_location_score() {
        assert_eq!(location_score(Some("Hanoi"), Some(" hanoi ")), 1.0);
        assert_eq!(location_score(Some("Hanoi"), None), 0.0);
        assert_eq!(location_score(None, None), 0.0);
    }

    #[test]
    fn test_shared_tags_sorted() {
        let shared = shared_tags(&tags(&["SQL", "python", "rust"]), &tags(&["Rust", "sql"]));
        assert_eq!(shared, vec!["rust", "sql"]);
    }
}
