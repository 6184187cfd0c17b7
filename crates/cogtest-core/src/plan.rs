//! Test plan assembly and the grading boundary.
//!
//! A plan is derived entirely from the seed; only `expires_at` depends on
//! the clock. Collaborators persist the seed and call back into
//! [`grade_submission`] with it, so correct answers are never stored.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AssessmentConfig;
use crate::error::AssessError;
use crate::generate::generate_section;
use crate::grade::grade_section;
use crate::hashing::{decimal_places_of, verify, AnswerKey, NormalizationMode};
use crate::model::{
    render_grid, Item, ItemKind, ItemResult, PublicSection, Response, ResponsePayload, Section,
    SectionCode, SectionScore,
};
use crate::traits::GradingStrategy;

/// Which plan shape (and grading strategy) a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanVariant {
    /// Full sections with keys held server-side; partial-credit grading.
    #[default]
    Sectioned,
    /// Flattened questions carrying sealed answer keys; binary grading.
    Hashed,
}

impl fmt::Display for PlanVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanVariant::Sectioned => write!(f, "sectioned"),
            PlanVariant::Hashed => write!(f, "hashed"),
        }
    }
}

impl FromStr for PlanVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sectioned" | "sections" => Ok(PlanVariant::Sectioned),
            "hashed" | "hash" => Ok(PlanVariant::Hashed),
            other => Err(format!("unknown plan variant: {other}")),
        }
    }
}

/// A question whose correct answer survives only as an [`AnswerKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashedQuestion {
    pub id: String,
    pub section: SectionCode,
    pub kind: ItemKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub key: AnswerKey,
}

/// Client-facing hashed question: no key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicQuestion {
    pub id: String,
    pub section: SectionCode,
    pub kind: ItemKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl HashedQuestion {
    pub fn public_view(&self) -> PublicQuestion {
        PublicQuestion {
            id: self.id.clone(),
            section: self.section,
            kind: self.kind,
            prompt: self.prompt.clone(),
            options: self.options.clone(),
            text: self.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanContent {
    Sections(Vec<Section>),
    Questions(Vec<HashedQuestion>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicContent {
    Sections(Vec<PublicSection>),
    Questions(Vec<PublicQuestion>),
}

/// One assessment, fully determined by `seed` apart from `expires_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestPlan {
    pub seed: String,
    pub variant: PlanVariant,
    #[serde(flatten)]
    pub content: PlanContent,
    pub expires_at: DateTime<Utc>,
}

/// What a test-taker's client receives: no seed, no keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicPlan {
    pub variant: PlanVariant,
    #[serde(flatten)]
    pub content: PublicContent,
    pub expires_at: DateTime<Utc>,
}

impl TestPlan {
    pub fn sections(&self) -> &[Section] {
        match &self.content {
            PlanContent::Sections(s) => s,
            PlanContent::Questions(_) => &[],
        }
    }

    pub fn questions(&self) -> &[HashedQuestion] {
        match &self.content {
            PlanContent::Questions(q) => q,
            PlanContent::Sections(_) => &[],
        }
    }

    pub fn section(&self, code: SectionCode) -> Option<&Section> {
        self.sections().iter().find(|s| s.code == code)
    }

    /// Section codes present in this plan, in plan order.
    pub fn section_codes(&self) -> Vec<SectionCode> {
        match &self.content {
            PlanContent::Sections(s) => s.iter().map(|s| s.code).collect(),
            PlanContent::Questions(q) => {
                let mut codes: Vec<SectionCode> = Vec::new();
                for question in q {
                    if !codes.contains(&question.section) {
                        codes.push(question.section);
                    }
                }
                codes
            }
        }
    }

    pub fn public_view(&self) -> PublicPlan {
        let content = match &self.content {
            PlanContent::Sections(s) => {
                PublicContent::Sections(s.iter().map(Section::public_view).collect())
            }
            PlanContent::Questions(q) => {
                PublicContent::Questions(q.iter().map(HashedQuestion::public_view).collect())
            }
        };
        PublicPlan {
            variant: self.variant,
            content,
            expires_at: self.expires_at,
        }
    }
}

/// Section codes a plan contains, in the fixed plan order.
pub fn section_codes(variant: PlanVariant, includes_coding: bool) -> Vec<SectionCode> {
    SectionCode::ALL
        .into_iter()
        .filter(|code| match code {
            SectionCode::Generative => variant == PlanVariant::Sectioned,
            SectionCode::Coding => includes_coding,
            _ => true,
        })
        .collect()
}

/// Generate a sectioned plan with the default session length.
pub fn generate_test_plan(seed: &str, includes_coding: bool) -> TestPlan {
    let config = AssessmentConfig {
        includes_coding,
        ..AssessmentConfig::default()
    };
    generate_test_plan_with(seed, &config)
}

/// Generate a plan as configured, stamped with the current time.
pub fn generate_test_plan_with(seed: &str, config: &AssessmentConfig) -> TestPlan {
    assemble_plan(seed, config, Utc::now())
}

/// Assemble a plan with an explicit clock instant.
///
/// Each generator runs exactly once, in plan order.
pub fn assemble_plan(seed: &str, config: &AssessmentConfig, now: DateTime<Utc>) -> TestPlan {
    let codes = section_codes(config.variant, config.includes_coding);
    let sections: Vec<Section> = codes
        .iter()
        .map(|&code| generate_section(code, seed))
        .collect();
    let content = match config.variant {
        PlanVariant::Sectioned => PlanContent::Sections(sections),
        PlanVariant::Hashed => PlanContent::Questions(
            sections
                .iter()
                .flat_map(|s| hashed_questions_for(s, config.default_decimal_places))
                .collect(),
        ),
    };
    tracing::debug!(
        seed_len = seed.len(),
        sections = codes.len(),
        variant = %config.variant,
        "assembled test plan"
    );
    TestPlan {
        seed: seed.to_string(),
        variant: config.variant,
        content,
        expires_at: now + Duration::minutes(i64::from(config.session_minutes)),
    }
}

/// Flatten a section into hash-verifiable questions.
///
/// Writing items have no single correct answer and are skipped. Each cloze
/// blank becomes its own question with id `{item}.b{k}`.
pub fn hashed_questions_for(section: &Section, default_decimal_places: u32) -> Vec<HashedQuestion> {
    let mut out = Vec::new();
    for item in &section.items {
        let question = |id: String, options: Vec<String>, text: Option<String>, key: AnswerKey| {
            HashedQuestion {
                id,
                section: section.code,
                kind: item.kind(),
                prompt: item.prompt().to_string(),
                options,
                text,
                key,
            }
        };
        match item {
            Item::Microwrite(_) | Item::Constrained(_) => {}
            Item::Cloze(c) => {
                for (k, blank) in c.blanks.iter().enumerate() {
                    let answer = blank.options[blank.correct_index].clone();
                    out.push(question(
                        format!("{}.b{k}", c.id),
                        blank.options.clone(),
                        Some(c.sentence.clone()),
                        AnswerKey::seal(answer, NormalizationMode::TrimmedLowercase, None),
                    ));
                }
            }
            Item::Arith(a) => {
                let places = if a.expected.contains('.') {
                    decimal_places_of(&a.expected)
                } else {
                    default_decimal_places
                };
                out.push(question(
                    a.id.clone(),
                    Vec::new(),
                    None,
                    AnswerKey::seal(
                        a.expected.clone(),
                        NormalizationMode::NumericRounded,
                        Some(places),
                    ),
                ));
            }
            Item::Code(c) => out.push(question(
                c.id.clone(),
                Vec::new(),
                Some(c.snippet.clone()),
                AnswerKey::seal(c.expected.clone(), c.normalization, None),
            )),
            Item::Spelling(_)
            | Item::Analogy(_)
            | Item::Grid(_)
            | Item::Perception(_)
            | Item::Science(_) => {
                if let Some((options, correct)) = item.single_choice() {
                    let answer = options[correct].clone();
                    let text = match item {
                        Item::Perception(p) => Some(p.scenario.clone()),
                        Item::Grid(g) => Some(render_grid(&g.test_input)),
                        _ => None,
                    };
                    out.push(question(
                        item.id().to_string(),
                        options,
                        text,
                        AnswerKey::seal(answer, NormalizationMode::TrimmedLowercase, None),
                    ));
                }
            }
        }
    }
    out
}

/// Regenerate one section of the plan a seed would produce.
pub fn regenerate_section(
    seed: &str,
    code: SectionCode,
    variant: PlanVariant,
    includes_coding: bool,
) -> Result<Section, AssessError> {
    if !section_codes(variant, includes_coding).contains(&code) {
        return Err(AssessError::SectionNotFound {
            code: code.to_string(),
        });
    }
    Ok(generate_section(code, seed))
}

/// Grading endpoint boundary: regenerate the section from the seed and grade
/// it with the configured strategy.
pub fn grade_submission(
    seed: &str,
    section_code: &str,
    responses: &[Response],
    config: &AssessmentConfig,
) -> Result<SectionScore, AssessError> {
    let code: SectionCode = section_code.parse()?;
    let section = regenerate_section(seed, code, config.variant, config.includes_coding)?;
    let strategy = strategy_for(config.variant);
    tracing::debug!(section = %code, strategy = strategy.name(), "grading submission");
    Ok(strategy.grade(&section, responses, config))
}

/// Binary grading of raw answers against sealed keys for one section.
///
/// Responses may carry `Raw`, `Text`, or `Index` payloads; an index is
/// resolved against the question's options. A cloze response addressed to
/// the whole item with `Indices` answers each `{item}.b{k}` question.
pub fn grade_hashed_section(
    code: SectionCode,
    questions: &[HashedQuestion],
    responses: &[Response],
) -> SectionScore {
    let results = questions
        .iter()
        .filter(|q| q.section == code)
        .map(|q| {
            let direct = responses.iter().find(|r| r.item_id == q.id);
            let Some((response, blank)) = direct
                .map(|r| (r, None))
                .or_else(|| blank_response(q, responses))
            else {
                return ItemResult::new(&q.id, 0.0, "No answer submitted.");
            };
            if response.kind != q.kind {
                return ItemResult::new(
                    &q.id,
                    0.0,
                    format!(
                        "Response type '{}' does not match item type '{}'; treated as unanswered.",
                        response.kind, q.kind
                    ),
                );
            }
            let answer = match (&response.payload, blank) {
                (ResponsePayload::Raw(s) | ResponsePayload::Text(s), None) => Some(s.as_str()),
                (ResponsePayload::Index(i), None) => q.options.get(*i).map(String::as_str),
                (ResponsePayload::Indices(sel), Some(k)) => sel
                    .get(k)
                    .and_then(|i| q.options.get(*i))
                    .map(String::as_str),
                _ => None,
            };
            match answer {
                Some(a) if !a.trim().is_empty() => {
                    let verdict = verify(a, &q.key);
                    let feedback = if verdict.correct { "Correct." } else { "Incorrect." };
                    ItemResult::new(&q.id, verdict.score, feedback)
                }
                _ => ItemResult::new(&q.id, 0.0, "No answer submitted."),
            }
        })
        .collect();
    SectionScore::from_results(code, results)
}

/// The whole-item response for a `{item}.b{k}` question, with the blank index.
fn blank_response<'a>(
    question: &HashedQuestion,
    responses: &'a [Response],
) -> Option<(&'a Response, Option<usize>)> {
    let (item, k) = question.id.rsplit_once(".b")?;
    let k: usize = k.parse().ok()?;
    responses
        .iter()
        .find(|r| r.item_id == item)
        .map(|r| (r, Some(k)))
}

/// Partial-credit grading over regenerated sections.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialCreditStrategy;

impl GradingStrategy for PartialCreditStrategy {
    fn name(&self) -> &'static str {
        "partial-credit"
    }

    fn grade(
        &self,
        section: &Section,
        responses: &[Response],
        _config: &AssessmentConfig,
    ) -> SectionScore {
        grade_section(section, responses)
    }
}

/// Binary grading against keys sealed from the regenerated section.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashVerifiedStrategy;

impl GradingStrategy for HashVerifiedStrategy {
    fn name(&self) -> &'static str {
        "hash-verified"
    }

    fn grade(
        &self,
        section: &Section,
        responses: &[Response],
        config: &AssessmentConfig,
    ) -> SectionScore {
        let questions = hashed_questions_for(section, config.default_decimal_places);
        grade_hashed_section(section.code, &questions, responses)
    }
}

/// The grading strategy a variant uses. Both share the same generators.
pub fn strategy_for(variant: PlanVariant) -> &'static dyn GradingStrategy {
    match variant {
        PlanVariant::Sectioned => &PartialCreditStrategy,
        PlanVariant::Hashed => &HashVerifiedStrategy,
    }
}
