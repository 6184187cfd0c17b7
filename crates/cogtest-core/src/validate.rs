//! Structural checks on generated sections and plans.
//!
//! Generators are expected to satisfy all of these for every seed. The
//! checks return warnings rather than failing so callers (tests, the CLI
//! `validate` command) can report every problem at once.

use std::collections::HashSet;

use serde::Serialize;

use crate::generate::{arithmetic, coding, generative, grid, language, perception, science};
use crate::model::{Item, Section, SectionCode};
use crate::plan::{section_codes, PlanContent, TestPlan};

/// A warning from section or plan validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationWarning {
    /// The section (if applicable).
    pub section: Option<SectionCode>,
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn item(section: SectionCode, item_id: &str, message: impl Into<String>) -> Self {
        Self {
            section: Some(section),
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }
}

/// Allowed item count for each section.
pub fn expected_item_count(code: SectionCode) -> (usize, usize) {
    match code {
        SectionCode::Language => {
            let n = language::SPELLING_COUNT + language::CLOZE_COUNT + language::ANALOGY_COUNT + 1;
            (n, n)
        }
        SectionCode::Arithmetic => (arithmetic::ITEM_COUNT, arithmetic::ITEM_COUNT),
        SectionCode::Grid => (grid::ITEM_COUNT, grid::ITEM_COUNT),
        SectionCode::Perception => (perception::SCENE_COUNT + 1, perception::SCENE_COUNT + 1),
        SectionCode::Science => (science::PER_SUBTYPE * 3, science::PER_SUBTYPE * 3),
        SectionCode::Generative => (generative::MIN_ITEMS, generative::MAX_ITEMS),
        SectionCode::Coding => (coding::ITEM_COUNT, coding::ITEM_COUNT),
    }
}

/// Validate one section for common issues.
pub fn validate_section(section: &Section) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let code = section.code;

    if section.items.is_empty() {
        warnings.push(ValidationWarning {
            section: Some(code),
            item_id: None,
            message: "section has no items".into(),
        });
        return warnings;
    }

    let (min, max) = expected_item_count(code);
    if !(min..=max).contains(&section.items.len()) {
        warnings.push(ValidationWarning {
            section: Some(code),
            item_id: None,
            message: format!(
                "expected {min}..={max} items, found {}",
                section.items.len()
            ),
        });
    }

    // Check for duplicate item IDs
    let mut seen_ids = HashSet::new();
    for item in &section.items {
        if !seen_ids.insert(item.id()) {
            warnings.push(ValidationWarning::item(
                code,
                item.id(),
                format!("duplicate item ID: {}", item.id()),
            ));
        }
        if item.prompt().trim().is_empty() {
            warnings.push(ValidationWarning::item(code, item.id(), "prompt is empty"));
        }
    }

    for item in &section.items {
        if let Some((options, correct)) = item.single_choice() {
            check_options(&mut warnings, code, item.id(), &options, correct, 4);
        }
        match item {
            Item::Cloze(c) => {
                if c.sentence.matches("___").count() != c.blanks.len() {
                    warnings.push(ValidationWarning::item(
                        code,
                        &c.id,
                        "blank markers do not match blank count",
                    ));
                }
                for blank in &c.blanks {
                    check_options(
                        &mut warnings,
                        code,
                        &c.id,
                        &blank.options,
                        blank.correct_index,
                        3,
                    );
                }
            }
            Item::Microwrite(w) | Item::Constrained(w) => {
                let c = &w.constraints;
                if c.required_tokens.len() < 3 {
                    warnings.push(ValidationWarning::item(
                        code,
                        &w.id,
                        "fewer than 3 required tokens",
                    ));
                }
                for token in &c.required_tokens {
                    if token.chars().count() < 6 {
                        warnings.push(ValidationWarning::item(
                            code,
                            &w.id,
                            format!("required token too short: {token}"),
                        ));
                    }
                }
                if c.max_words == 0 || c.max_sentences == 0 || c.min_words > c.max_words {
                    warnings.push(ValidationWarning::item(
                        code,
                        &w.id,
                        "word or sentence limits are inconsistent",
                    ));
                }
            }
            Item::Arith(a) => {
                if a.expected.trim().parse::<f64>().is_err() {
                    warnings.push(ValidationWarning::item(
                        code,
                        &a.id,
                        format!("expected value is not numeric: {}", a.expected),
                    ));
                }
                if a.tolerance.is_nan() || a.tolerance < 0.0 {
                    warnings.push(ValidationWarning::item(code, &a.id, "negative tolerance"));
                }
            }
            Item::Science(s) => {
                if s.prompt.len() <= 40 {
                    warnings.push(ValidationWarning::item(
                        code,
                        &s.id,
                        "science prompt is 40 characters or fewer",
                    ));
                }
            }
            Item::Perception(p) => {
                if p.scenario.len() < 100 {
                    warnings.push(ValidationWarning::item(
                        code,
                        &p.id,
                        "scenario shorter than 100 characters",
                    ));
                }
                let bulleted: Vec<usize> = p
                    .options
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| o.starts_with("• "))
                    .map(|(i, _)| i)
                    .collect();
                if bulleted != [p.correct_index] {
                    warnings.push(ValidationWarning::item(
                        code,
                        &p.id,
                        "exactly the correct option must be a bullet list",
                    ));
                }
            }
            Item::Grid(g) => {
                if g.examples.len() != 3 {
                    warnings.push(ValidationWarning::item(
                        code,
                        &g.id,
                        format!("expected 3 exemplars, found {}", g.examples.len()),
                    ));
                }
                if g
                    .examples
                    .iter()
                    .any(|ex| grid::apply_rule(g.rule, &ex.input) != ex.output)
                {
                    warnings.push(ValidationWarning::item(
                        code,
                        &g.id,
                        "an exemplar does not follow the item rule",
                    ));
                }
                if g.options.get(g.correct_index) != Some(&grid::apply_rule(g.rule, &g.test_input))
                {
                    warnings.push(ValidationWarning::item(
                        code,
                        &g.id,
                        "correct option does not apply the rule",
                    ));
                }
            }
            Item::Code(c) => {
                if c.expected.trim().is_empty() || c.snippet.trim().is_empty() {
                    warnings.push(ValidationWarning::item(
                        code,
                        &c.id,
                        "code item is missing its snippet or output",
                    ));
                }
            }
            Item::Spelling(_) | Item::Analogy(_) => {}
        }
    }

    warnings
}

fn check_options(
    warnings: &mut Vec<ValidationWarning>,
    code: SectionCode,
    id: &str,
    options: &[String],
    correct: usize,
    min_options: usize,
) {
    if options.len() < min_options {
        warnings.push(ValidationWarning::item(
            code,
            id,
            format!("expected at least {min_options} options, found {}", options.len()),
        ));
    }
    let Some(answer) = options.get(correct) else {
        warnings.push(ValidationWarning::item(
            code,
            id,
            format!("correct index {correct} out of range"),
        ));
        return;
    };
    let answer = answer.to_lowercase();
    let collisions = options
        .iter()
        .enumerate()
        .filter(|(i, o)| *i != correct && o.to_lowercase() == answer)
        .count();
    if collisions > 0 {
        warnings.push(ValidationWarning::item(
            code,
            id,
            "a distractor equals the correct answer",
        ));
    }
}

/// Validate every section of a plan and the plan's section order.
pub fn validate_plan(plan: &TestPlan, includes_coding: bool) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let expected = section_codes(plan.variant, includes_coding);
    let found = plan.section_codes();
    if found != expected {
        warnings.push(ValidationWarning {
            section: None,
            item_id: None,
            message: format!("section order {found:?} does not match {expected:?}"),
        });
    }

    match &plan.content {
        PlanContent::Sections(sections) => {
            for section in sections {
                warnings.extend(validate_section(section));
            }
        }
        PlanContent::Questions(questions) => {
            let mut seen_ids = HashSet::new();
            for q in questions {
                if !seen_ids.insert(q.id.as_str()) {
                    warnings.push(ValidationWarning::item(
                        q.section,
                        &q.id,
                        format!("duplicate question ID: {}", q.id),
                    ));
                }
                let hex_digest =
                    q.key.hash.len() == 64 && q.key.hash.chars().all(|c| c.is_ascii_hexdigit());
                if !hex_digest {
                    warnings.push(ValidationWarning::item(
                        q.section,
                        &q.id,
                        "answer key is not a SHA-256 hex digest",
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AssessmentConfig;
    use crate::generate::generate_section;
    use crate::model::{ChoiceItem, ItemKind};
    use crate::plan::{assemble_plan, PlanVariant};
    use chrono::Utc;

    #[test]
    fn generated_sections_are_clean() {
        for seed in ["", "alpha", "beta", "session-42"] {
            for code in SectionCode::ALL {
                let warnings = validate_section(&generate_section(code, seed));
                assert!(warnings.is_empty(), "{code} / {seed:?}: {warnings:?}");
            }
        }
    }

    #[test]
    fn plans_are_clean() {
        for variant in [PlanVariant::Sectioned, PlanVariant::Hashed] {
            let config = AssessmentConfig {
                variant,
                includes_coding: true,
                ..AssessmentConfig::default()
            };
            let plan = assemble_plan("plan-check", &config, Utc::now());
            let warnings = validate_plan(&plan, true);
            assert!(warnings.is_empty(), "{variant}: {warnings:?}");
        }
    }

    #[test]
    fn detects_duplicate_ids_and_colliding_distractors() {
        let item = Item::Spelling(ChoiceItem {
            id: "lang-spelling-0".into(),
            prompt: "Pick".into(),
            options: vec!["Word".into(), "word".into(), "wrd".into(), "wurd".into()],
            correct_index: 0,
        });
        let section = Section::new(SectionCode::Language, vec![item.clone(), item]);
        let warnings = validate_section(&section);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate item ID")));
        assert!(warnings.iter().any(|w| w.message.contains("distractor equals")));
        assert!(warnings.iter().any(|w| w.message.contains("expected 9..=9")));
        let duplicate = warnings
            .iter()
            .find(|w| w.message.starts_with("duplicate"))
            .unwrap();
        assert_eq!(
            duplicate.item_id.as_deref(),
            Some(crate::model::item_id(SectionCode::Language, ItemKind::Spelling, 0).as_str())
        );
    }

    #[test]
    fn empty_section_is_flagged() {
        let warnings = validate_section(&Section::new(SectionCode::Grid, vec![]));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "section has no items");
    }
}
