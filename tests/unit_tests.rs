// Unit tests for Scholar Match

use scholar_match::core::{
    calculate_legacy_score, calculate_match_score, gpa_score, jaccard, normalize_set,
    skills_score, Factor,
};
use scholar_match::models::{
    CandidateProfile, LegacyWeights, Opportunity, OpportunityCriteria, OpportunityType, RecordId,
    ScoringWeights,
};

fn tags(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn create_opportunity(criteria: Option<OpportunityCriteria>) -> Opportunity {
    Opportunity {
        id: RecordId::Number(1),
        title: "Engineering Scholarship".to_string(),
        description: "Funding for undergraduate engineering students".to_string(),
        opportunity_type: OpportunityType::Scholarship,
        provider_user_id: None,
        criteria,
    }
}

fn requiring(skills: &[&str], min_gpa: Option<f64>) -> Option<OpportunityCriteria> {
    Some(OpportunityCriteria {
        required_skills: tags(skills),
        min_gpa,
        ..Default::default()
    })
}

#[test]
fn test_weighted_example_score() {
    let candidate = CandidateProfile {
        skills: tags(&["python", "ml"]),
        gpa: Some(3.5),
        ..Default::default()
    };
    let opportunity = create_opportunity(requiring(&["python"], Some(3.0)));

    let card = calculate_match_score(&candidate, &opportunity, &ScoringWeights::default());

    assert_eq!(card.factor(Factor::Skills), Some(0.5));
    assert_eq!(card.factor(Factor::Gpa), Some(1.0));
    assert_eq!(card.factor(Factor::Interests), Some(0.5));
    assert_eq!(card.factor(Factor::Goals), Some(0.5));
    assert_eq!(card.factor(Factor::Strengths), Some(0.5));
    assert!((card.score - 0.6).abs() < 1e-9, "Expected 0.6, got {}", card.score);
    assert!(card.reasons.contains(&"Meets GPA requirement (min 3.00)".to_string()));
    assert!(card.reasons.contains(&"Some of your skills match".to_string()));
}

#[test]
fn test_missing_gpa_against_minimum_scores_zero() {
    let candidate = CandidateProfile {
        skills: tags(&["python"]),
        gpa: None,
        ..Default::default()
    };
    let opportunity = create_opportunity(requiring(&["python"], Some(3.0)));

    let card = calculate_match_score(&candidate, &opportunity, &ScoringWeights::default());

    assert_eq!(card.factor(Factor::Gpa), Some(0.0));
    // skills 1.0, soft factors neutral, GPA contributes nothing
    assert!((card.score - 0.55).abs() < 1e-9, "Expected 0.55, got {}", card.score);
    assert!(!card.reasons.iter().any(|r| r.contains("GPA")));
}

#[test]
fn test_absent_criteria_never_penalize() {
    let opportunity = create_opportunity(None);
    let candidates = [
        CandidateProfile::default(),
        CandidateProfile {
            skills: tags(&["rust"]),
            gpa: Some(1.2),
            ..Default::default()
        },
    ];

    for candidate in &candidates {
        let card = calculate_match_score(candidate, &opportunity, &ScoringWeights::default());
        assert_eq!(card.factor(Factor::Skills), Some(1.0));
        assert_eq!(card.factor(Factor::Gpa), Some(1.0));
    }
}

#[test]
fn test_zero_and_negative_minimum_are_no_constraint() {
    assert_eq!(gpa_score(None, Some(0.0)), 1.0);
    assert_eq!(gpa_score(None, Some(-1.0)), 1.0);
    assert_eq!(gpa_score(Some(1.0), Some(0.0)), 1.0);
}

#[test]
fn test_gpa_score_monotonic_below_minimum() {
    let min = Some(3.5);
    let mut previous = 0.0;
    for step in 0..=40 {
        let gpa = step as f64 * 0.1;
        let score = gpa_score(Some(gpa), min);
        assert!(score >= previous, "GPA score dropped at {}", gpa);
        assert!((0.3..=1.0).contains(&score));
        previous = score;
    }
}

#[test]
fn test_jaccard_symmetric_and_bounded() {
    let a = normalize_set(&tags(&["python", "sql", "ml"]));
    let b = normalize_set(&tags(&["SQL", "rust"]));

    let ab = jaccard(&a, &b);
    assert_eq!(ab, jaccard(&b, &a));
    assert!((ab - 0.25).abs() < 1e-9);
    assert_eq!(jaccard(&a, &a), 1.0);
}

#[test]
fn test_jaccard_empty_sets() {
    let empty = normalize_set(&[]);
    let some = normalize_set(&tags(&["python"]));

    assert_eq!(jaccard(&empty, &empty), 1.0);
    assert_eq!(jaccard(&empty, &some), 0.0);
    assert_eq!(jaccard(&some, &empty), 0.0);
}

#[test]
fn test_blank_tags_are_ignored() {
    assert_eq!(skills_score(&tags(&["python", "  "]), &tags(&["python", ""])), 1.0);
    // only blank requirements means no requirement
    assert_eq!(skills_score(&[], &tags(&[" "])), 1.0);
}

#[test]
fn test_case_and_whitespace_invariance() {
    let weights = ScoringWeights::default();
    let opportunity = Opportunity {
        description: "A research lab studying machine learning and leadership".to_string(),
        opportunity_type: OpportunityType::ResearchLab,
        ..create_opportunity(requiring(&["Python", "ML"], Some(3.0)))
    };

    let plain = CandidateProfile {
        skills: tags(&["python", "ml"]),
        gpa: Some(3.2),
        interests: tags(&["machine learning"]),
        goals: tags(&["research"]),
        strengths: tags(&["leadership"]),
        ..Default::default()
    };
    let noisy = CandidateProfile {
        skills: tags(&["  PYTHON", "Ml "]),
        interests: tags(&["Machine Learning "]),
        goals: tags(&[" RESEARCH"]),
        strengths: tags(&["LeaderShip"]),
        ..plain.clone()
    };

    let a = calculate_match_score(&plain, &opportunity, &weights);
    let b = calculate_match_score(&noisy, &opportunity, &weights);
    assert_eq!(a.score, b.score);
}

#[test]
fn test_score_bounded_and_rounded() {
    let weights = ScoringWeights::default();
    let opportunity = create_opportunity(requiring(&["python", "sql", "rust"], Some(3.7)));

    for gpa in [None, Some(0.0), Some(1.9), Some(3.0), Some(4.0)] {
        let candidate = CandidateProfile {
            skills: tags(&["python"]),
            gpa,
            interests: tags(&["engineering", "art"]),
            ..Default::default()
        };
        let card = calculate_match_score(&candidate, &opportunity, &weights);

        assert!((0.0..=1.0).contains(&card.score));
        let scaled = card.score * 10_000.0;
        assert!((scaled - scaled.round()).abs() < 1e-6, "Score {} not rounded", card.score);
        assert!(!card.reasons.is_empty());
    }
}

#[test]
fn test_fallback_reason() {
    let candidate = CandidateProfile::default();
    let opportunity = create_opportunity(requiring(&["python"], None));

    let card = calculate_match_score(&candidate, &opportunity, &ScoringWeights::default());

    assert_eq!(card.reasons, vec!["Good overall fit for your profile".to_string()]);
}

#[test]
fn test_custom_weights_change_score() {
    let candidate = CandidateProfile {
        skills: tags(&["python"]),
        gpa: Some(2.0),
        ..Default::default()
    };
    let opportunity = create_opportunity(requiring(&["python"], Some(4.0)));

    let skills_only = ScoringWeights {
        skills: 1.0,
        gpa: 0.0,
        interests: 0.0,
        goals: 0.0,
        strengths: 0.0,
    };

    let default_card = calculate_match_score(&candidate, &opportunity, &ScoringWeights::default());
    let skills_card = calculate_match_score(&candidate, &opportunity, &skills_only);

    assert_eq!(skills_card.score, 1.0);
    assert!(default_card.score < skills_card.score);
}

#[test]
fn test_legacy_model() {
    let candidate = CandidateProfile {
        skills: tags(&["python", "sql"]),
        gpa: Some(3.0),
        location: Some("Hanoi".to_string()),
        research_fields: tags(&["nlp"]),
        ..Default::default()
    };
    let opportunity = create_opportunity(Some(OpportunityCriteria {
        required_skills: tags(&["python"]),
        min_gpa: Some(3.0),
        location: Some("hanoi".to_string()),
        research_fields: tags(&["NLP"]),
        ..Default::default()
    }));

    let card = calculate_legacy_score(&candidate, &opportunity, &LegacyWeights::default());

    // 0.5 * 0.5 + 1.0 * 0.2 + 1.0 * 0.1 + 1.0 * 0.2
    assert!((card.score - 0.75).abs() < 1e-9, "Expected 0.75, got {}", card.score);
    assert_eq!(card.factor(Factor::Location), Some(1.0));
    assert_eq!(card.factor(Factor::Interests), None);
    assert!(card.reasons.contains(&"Location matches".to_string()));
    assert!(card.reasons.contains(&"Shared research fields: nlp".to_string()));
}

#[test]
fn test_legacy_gpa_has_no_floor() {
    let candidate = CandidateProfile {
        gpa: Some(0.5),
        ..Default::default()
    };
    let opportunity = create_opportunity(requiring(&[], Some(2.5)));

    let card = calculate_legacy_score(&candidate, &opportunity, &LegacyWeights::default());

    assert!((card.factor(Factor::Gpa).unwrap_or_default() - 0.2).abs() < 1e-9);
}
