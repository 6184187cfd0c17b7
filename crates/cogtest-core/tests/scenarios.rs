mod common;

use chrono::{TimeZone, Utc};
use cogtest_core::config::AssessmentConfig;
use cogtest_core::hashing::verify;
use cogtest_core::model::{Item, ItemKind, Response, SectionCode};
use cogtest_core::plan::{
    assemble_plan, grade_hashed_section, grade_submission, PlanVariant,
};
use cogtest_core::{generate_arithmetic_section, generate_test_plan, AssessError};

#[test]
fn arithmetic_alpha_is_stable_and_self_consistent() {
    let section = generate_arithmetic_section("alpha");
    assert_eq!(section.items.len(), 8);
    let Item::Arith(first) = &section.items[0] else {
        panic!("first arithmetic item is not numeric");
    };
    assert!(first.expected.parse::<f64>().is_ok());

    let again = generate_arithmetic_section("alpha");
    assert_eq!(
        serde_json::to_string(&section).unwrap(),
        serde_json::to_string(&again).unwrap()
    );

    let echo: Vec<Response> = section
        .items
        .iter()
        .map(|item| match item {
            Item::Arith(a) => Response::raw(&a.id, ItemKind::Arith, &a.expected),
            other => panic!("unexpected item {}", other.id()),
        })
        .collect();
    let score = cogtest_core::grade_section(&section, &echo);
    assert!((score.overall - 1.0).abs() < 1e-5);
}

#[test]
fn different_seeds_give_different_plans() {
    let a = serde_json::to_string(&generate_test_plan("alpha", false).sections()).unwrap();
    let b = serde_json::to_string(&generate_test_plan("beta", false).sections()).unwrap();
    assert_ne!(a, b);
}

#[test]
fn submission_round_trip_through_the_boundary() {
    let config = AssessmentConfig {
        includes_coding: true,
        ..AssessmentConfig::default()
    };
    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let plan = assemble_plan("session-7", &config, now);
    assert_eq!(plan.expires_at, now + chrono::Duration::minutes(45));

    for section in plan.sections() {
        let responses = common::correct_responses(section);
        let score =
            grade_submission("session-7", section.code.as_str(), &responses, &config).unwrap();
        assert!(
            (score.overall - 1.0).abs() < 1e-9,
            "{}: {:?}",
            section.code,
            score.items
        );
    }
}

#[test]
fn unanswered_submission_scores_zero() {
    let config = AssessmentConfig::default();
    let score = grade_submission("session-7", "grid", &[], &config).unwrap();
    assert_eq!(score.overall, 0.0);
    assert!(score
        .items
        .iter()
        .all(|r| r.feedback == "No answer submitted."));
}

#[test]
fn boundary_errors() {
    let config = AssessmentConfig::default();
    assert!(matches!(
        grade_submission("s", "history", &[], &config),
        Err(AssessError::UnknownSectionCode(_))
    ));
    assert!(matches!(
        grade_submission("s", "code", &[], &config),
        Err(AssessError::SectionNotFound { .. })
    ));
    let hashed = AssessmentConfig {
        variant: PlanVariant::Hashed,
        ..AssessmentConfig::default()
    };
    assert!(matches!(
        grade_submission("s", "write", &[], &hashed),
        Err(AssessError::SectionNotFound { .. })
    ));
}

#[test]
fn hashed_plan_hides_answers_and_verifies_them() {
    let config = AssessmentConfig {
        variant: PlanVariant::Hashed,
        includes_coding: true,
        ..AssessmentConfig::default()
    };
    let plan = assemble_plan("hashed-1", &config, Utc::now());
    let questions = plan.questions();
    assert!(!questions.is_empty());
    assert!(questions.iter().all(|q| q.section != SectionCode::Generative));
    assert!(questions
        .iter()
        .all(|q| q.kind != ItemKind::Microwrite && q.kind != ItemKind::Constrained));

    let public = serde_json::to_string(&plan.public_view()).unwrap();
    assert!(!public.contains("hashed-1"));
    assert!(!public.contains("\"key\""));

    // Answers taken from the regenerated sections verify against the keys.
    let arith = cogtest_core::generate_section(SectionCode::Arithmetic, "hashed-1");
    for item in &arith.items {
        let Item::Arith(a) = item else { continue };
        let q = questions.iter().find(|q| q.id == a.id).unwrap();
        assert!(verify(&a.expected, &q.key).correct, "{}", a.expected);
    }

    let grid = cogtest_core::generate_section(SectionCode::Grid, "hashed-1");
    let responses: Vec<Response> = grid
        .items
        .iter()
        .map(common::correct_response)
        .collect();
    let score = grade_hashed_section(SectionCode::Grid, questions, &responses);
    assert_eq!(score.items.len(), grid.items.len());
    assert_eq!(score.overall, 1.0);
}

#[test]
fn hashed_grading_is_binary() {
    let config = AssessmentConfig {
        variant: PlanVariant::Hashed,
        ..AssessmentConfig::default()
    };
    let section = cogtest_core::generate_section(SectionCode::Arithmetic, "binary");
    let near: Vec<Response> = section
        .items
        .iter()
        .map(|item| match item {
            Item::Arith(a) => {
                let v: f64 = a.expected.parse().unwrap();
                Response::raw(&a.id, ItemKind::Arith, (v + 1000.0 + v.abs()).to_string())
            }
            other => panic!("unexpected item {}", other.id()),
        })
        .collect();
    let score = grade_submission("binary", "arith", &near, &config).unwrap();
    assert!(score.items.iter().all(|r| r.correctness == 0.0));
}
