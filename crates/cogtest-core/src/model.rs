//! Core data model types for cogtest.
//!
//! Items, sections, responses, and scores. Everything here is created once
//! at generation time and never mutated afterwards; grading only produces
//! new result values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AssessError;
use crate::hashing::NormalizationMode;

/// Identifies one section of an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionCode {
    #[serde(rename = "lang")]
    Language,
    #[serde(rename = "arith")]
    Arithmetic,
    #[serde(rename = "grid")]
    Grid,
    #[serde(rename = "percept")]
    Perception,
    #[serde(rename = "sci")]
    Science,
    #[serde(rename = "write")]
    Generative,
    #[serde(rename = "code")]
    Coding,
}

impl SectionCode {
    /// Every section in canonical plan order.
    pub const ALL: [SectionCode; 7] = [
        SectionCode::Language,
        SectionCode::Arithmetic,
        SectionCode::Grid,
        SectionCode::Perception,
        SectionCode::Science,
        SectionCode::Generative,
        SectionCode::Coding,
    ];

    /// Short stable code used in ids, seeds, and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCode::Language => "lang",
            SectionCode::Arithmetic => "arith",
            SectionCode::Grid => "grid",
            SectionCode::Perception => "percept",
            SectionCode::Science => "sci",
            SectionCode::Generative => "write",
            SectionCode::Coding => "code",
        }
    }

    /// Human-readable section label.
    pub fn label(&self) -> &'static str {
        match self {
            SectionCode::Language => "Language",
            SectionCode::Arithmetic => "Arithmetic",
            SectionCode::Grid => "Pattern Reasoning",
            SectionCode::Perception => "Perception",
            SectionCode::Science => "Scientific Estimation",
            SectionCode::Generative => "Generative Writing",
            SectionCode::Coding => "Code Tracing",
        }
    }
}

impl fmt::Display for SectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionCode {
    type Err = AssessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lang" | "language" => Ok(SectionCode::Language),
            "arith" | "arithmetic" => Ok(SectionCode::Arithmetic),
            "grid" => Ok(SectionCode::Grid),
            "percept" | "perception" => Ok(SectionCode::Perception),
            "sci" | "science" => Ok(SectionCode::Science),
            "write" | "generative" => Ok(SectionCode::Generative),
            "code" | "coding" => Ok(SectionCode::Coding),
            other => Err(AssessError::UnknownSectionCode(other.to_string())),
        }
    }
}

/// Discriminant shared by items and responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Spelling,
    Cloze,
    Analogy,
    Microwrite,
    Arith,
    Grid,
    Perception,
    Science,
    Constrained,
    Code,
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemKind::Spelling => "spelling",
            ItemKind::Cloze => "cloze",
            ItemKind::Analogy => "analogy",
            ItemKind::Microwrite => "microwrite",
            ItemKind::Arith => "arith",
            ItemKind::Grid => "grid",
            ItemKind::Perception => "perception",
            ItemKind::Science => "science",
            ItemKind::Constrained => "constrained",
            ItemKind::Code => "code",
        };
        f.write_str(s)
    }
}

/// Build the stable id for the `n`th item of a kind within a section.
pub fn item_id(code: SectionCode, kind: ItemKind, n: usize) -> String {
    format!("{}-{}-{}", code.as_str(), kind, n)
}

/// Single-answer multiple-choice payload (spelling, analogy).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceItem {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// One blank of a cloze sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeBlank {
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Sentence with several blanks, graded with linear partial credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClozeItem {
    pub id: String,
    pub prompt: String,
    /// Sentence text with `___` marking each blank, in order.
    pub sentence: String,
    pub blanks: Vec<ClozeBlank>,
}

/// Constraint rubric for free-text writing items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingConstraints {
    pub required_tokens: Vec<String>,
    pub max_words: usize,
    pub max_sentences: usize,
    #[serde(default)]
    pub min_words: usize,
    #[serde(default = "default_min_coherence")]
    pub min_coherence: f64,
}

fn default_min_coherence() -> f64 {
    0.55
}

/// Free-text writing item (microwrite and constrained generative writing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingItem {
    pub id: String,
    pub prompt: String,
    pub constraints: WritingConstraints,
}

/// Numeric item with a string-encoded expected value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArithItem {
    pub id: String,
    pub prompt: String,
    pub expected: String,
    /// Maximum absolute deviation still counted as fully correct.
    pub tolerance: f64,
}

/// A small colour grid; each cell is a palette index.
pub type Grid = Vec<Vec<u8>>;

/// Render a grid as rows separated by ` / `.
pub fn render_grid(grid: &Grid) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Transformation applied to every exemplar of a grid item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridRule {
    FlipHorizontal,
    FlipVertical,
    RotateClockwise,
    Transpose,
    Recolor,
    ShiftRight,
}

impl GridRule {
    pub const ALL: [GridRule; 6] = [
        GridRule::FlipHorizontal,
        GridRule::FlipVertical,
        GridRule::RotateClockwise,
        GridRule::Transpose,
        GridRule::Recolor,
        GridRule::ShiftRight,
    ];
}

/// One input/output training pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridExample {
    pub input: Grid,
    pub output: Grid,
}

/// Abstract pattern item: infer the rule from exemplars, apply it to the test input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridItem {
    pub id: String,
    pub prompt: String,
    pub rule: GridRule,
    pub examples: Vec<GridExample>,
    pub test_input: Grid,
    pub options: Vec<Grid>,
    pub correct_index: usize,
}

/// Scene or data-block recall item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerceptionItem {
    pub id: String,
    pub scenario: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Science item subtypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScienceKind {
    Fermi,
    Dimensional,
    Causal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScienceItem {
    pub id: String,
    pub subtype: ScienceKind,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

/// Code-tracing item: predict what a short program prints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeItem {
    pub id: String,
    pub prompt: String,
    pub snippet: String,
    pub expected: String,
    pub normalization: NormalizationMode,
}

/// One gradable question unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Item {
    Spelling(ChoiceItem),
    Cloze(ClozeItem),
    Analogy(ChoiceItem),
    Microwrite(WritingItem),
    Arith(ArithItem),
    Grid(GridItem),
    Perception(PerceptionItem),
    Science(ScienceItem),
    Constrained(WritingItem),
    Code(CodeItem),
}

impl Item {
    pub fn id(&self) -> &str {
        match self {
            Item::Spelling(i) | Item::Analogy(i) => &i.id,
            Item::Cloze(i) => &i.id,
            Item::Microwrite(i) | Item::Constrained(i) => &i.id,
            Item::Arith(i) => &i.id,
            Item::Grid(i) => &i.id,
            Item::Perception(i) => &i.id,
            Item::Science(i) => &i.id,
            Item::Code(i) => &i.id,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Spelling(_) => ItemKind::Spelling,
            Item::Cloze(_) => ItemKind::Cloze,
            Item::Analogy(_) => ItemKind::Analogy,
            Item::Microwrite(_) => ItemKind::Microwrite,
            Item::Arith(_) => ItemKind::Arith,
            Item::Grid(_) => ItemKind::Grid,
            Item::Perception(_) => ItemKind::Perception,
            Item::Science(_) => ItemKind::Science,
            Item::Constrained(_) => ItemKind::Constrained,
            Item::Code(_) => ItemKind::Code,
        }
    }

    pub fn prompt(&self) -> &str {
        match self {
            Item::Spelling(i) | Item::Analogy(i) => &i.prompt,
            Item::Cloze(i) => &i.prompt,
            Item::Microwrite(i) | Item::Constrained(i) => &i.prompt,
            Item::Arith(i) => &i.prompt,
            Item::Grid(i) => &i.prompt,
            Item::Perception(i) => &i.prompt,
            Item::Science(i) => &i.prompt,
            Item::Code(i) => &i.prompt,
        }
    }

    /// Displayed options and the correct index, for single-answer items.
    ///
    /// Grid options are rendered with [`render_grid`].
    pub fn single_choice(&self) -> Option<(Vec<String>, usize)> {
        match self {
            Item::Spelling(i) | Item::Analogy(i) => Some((i.options.clone(), i.correct_index)),
            Item::Perception(i) => Some((i.options.clone(), i.correct_index)),
            Item::Science(i) => Some((i.options.clone(), i.correct_index)),
            Item::Grid(i) => Some((i.options.iter().map(render_grid).collect(), i.correct_index)),
            _ => None,
        }
    }

    /// Strip answer keys, leaving what a client may see.
    pub fn public_view(&self) -> PublicItem {
        let mut view = PublicItem {
            id: self.id().to_string(),
            kind: self.kind(),
            prompt: self.prompt().to_string(),
            options: Vec::new(),
            text: None,
            blanks: Vec::new(),
            examples: Vec::new(),
            constraints: None,
        };
        match self {
            Item::Spelling(i) | Item::Analogy(i) => view.options = i.options.clone(),
            Item::Cloze(i) => {
                view.text = Some(i.sentence.clone());
                view.blanks = i.blanks.iter().map(|b| b.options.clone()).collect();
            }
            Item::Microwrite(i) | Item::Constrained(i) => {
                view.constraints = Some(i.constraints.clone());
            }
            Item::Arith(_) => {}
            Item::Grid(i) => {
                view.text = Some(render_grid(&i.test_input));
                view.examples = i.examples.clone();
                view.options = i.options.iter().map(render_grid).collect();
            }
            Item::Perception(i) => {
                view.text = Some(i.scenario.clone());
                view.options = i.options.clone();
            }
            Item::Science(i) => view.options = i.options.clone(),
            Item::Code(i) => view.text = Some(i.snippet.clone()),
        }
        view
    }
}

/// Client-facing item with no answer material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicItem {
    pub id: String,
    pub kind: ItemKind,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Cloze sentence, perception scenario, grid test input, or code snippet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blanks: Vec<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<GridExample>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<WritingConstraints>,
}

/// A named group of items sharing a cognitive domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub code: SectionCode,
    pub label: String,
    pub items: Vec<Item>,
}

impl Section {
    pub fn new(code: SectionCode, items: Vec<Item>) -> Self {
        Self {
            code,
            label: code.label().to_string(),
            items,
        }
    }

    pub fn find_item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn public_view(&self) -> PublicSection {
        PublicSection {
            code: self.code,
            label: self.label.clone(),
            items: self.items.iter().map(Item::public_view).collect(),
        }
    }
}

/// Client-facing section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicSection {
    pub code: SectionCode,
    pub label: String,
    pub items: Vec<PublicItem>,
}

/// What the test-taker submitted for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResponsePayload {
    /// Selected option index.
    Index(usize),
    /// Selected option index per blank.
    Indices(Vec<usize>),
    /// Free text.
    Text(String),
    /// Raw answer string (numeric, code output, hashed variant).
    Raw(String),
}

/// A submitted answer to one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub payload: ResponsePayload,
}

impl Response {
    pub fn index(item_id: impl Into<String>, kind: ItemKind, index: usize) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            payload: ResponsePayload::Index(index),
        }
    }

    pub fn indices(item_id: impl Into<String>, kind: ItemKind, indices: Vec<usize>) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            payload: ResponsePayload::Indices(indices),
        }
    }

    pub fn text(item_id: impl Into<String>, kind: ItemKind, text: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            payload: ResponsePayload::Text(text.into()),
        }
    }

    pub fn raw(item_id: impl Into<String>, kind: ItemKind, answer: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            kind,
            payload: ResponsePayload::Raw(answer.into()),
        }
    }
}

/// Verdict for one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    pub item_id: String,
    /// Correctness in `[0, 1]`.
    pub correctness: f64,
    pub feedback: String,
}

impl ItemResult {
    pub fn new(item_id: impl Into<String>, correctness: f64, feedback: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            correctness: correctness.clamp(0.0, 1.0),
            feedback: feedback.into(),
        }
    }
}

/// Aggregated verdict for one section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    pub code: SectionCode,
    /// Unweighted mean of item correctness.
    pub overall: f64,
    pub items: Vec<ItemResult>,
}

impl SectionScore {
    pub fn from_results(code: SectionCode, items: Vec<ItemResult>) -> Self {
        let overall = if items.is_empty() {
            0.0
        } else {
            items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
        };
        Self {
            code,
            overall,
            items,
        }
    }

    pub fn item(&self, id: &str) -> Option<&ItemResult> {
        self.items.iter().find(|r| r.item_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_code_display_and_parse() {
        assert_eq!(SectionCode::Arithmetic.to_string(), "arith");
        assert_eq!("lang".parse::<SectionCode>().unwrap(), SectionCode::Language);
        assert_eq!(
            "Perception".parse::<SectionCode>().unwrap(),
            SectionCode::Perception
        );
        assert!("history".parse::<SectionCode>().is_err());
    }

    #[test]
    fn item_ids_are_positional() {
        assert_eq!(
            item_id(SectionCode::Language, ItemKind::Cloze, 2),
            "lang-cloze-2"
        );
    }

    #[test]
    fn render_grid_rows() {
        let grid: Grid = vec![vec![0, 1], vec![2, 3]];
        assert_eq!(render_grid(&grid), "0 1 / 2 3");
    }

    #[test]
    fn item_serde_uses_kind_tag() {
        let item = Item::Arith(ArithItem {
            id: "arith-arith-0".into(),
            prompt: "1 + 1".into(),
            expected: "2".into(),
            tolerance: 0.0,
        });
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "arith");
        let back: Item = serde_json::from_value(json).unwrap();
        assert_eq!(back, item);
    }

    #[test]
    fn response_serde_shape() {
        let r = Response::index("lang-spelling-0", ItemKind::Spelling, 2);
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["type"], "spelling");
        assert_eq!(json["payload"]["type"], "index");
        assert_eq!(json["payload"]["value"], 2);
    }

    #[test]
    fn section_score_mean() {
        let score = SectionScore::from_results(
            SectionCode::Science,
            vec![ItemResult::new("a", 1.0, ""), ItemResult::new("b", 0.0, "")],
        );
        assert!((score.overall - 0.5).abs() < f64::EPSILON);
        assert_eq!(
            SectionScore::from_results(SectionCode::Science, vec![]).overall,
            0.0
        );
    }

    #[test]
    fn item_result_clamps() {
        assert_eq!(ItemResult::new("x", 1.5, "").correctness, 1.0);
        assert_eq!(ItemResult::new("x", -0.2, "").correctness, 0.0);
    }

    #[test]
    fn public_view_hides_answers() {
        let item = Item::Spelling(ChoiceItem {
            id: "lang-spelling-0".into(),
            prompt: "Pick".into(),
            options: vec!["a".into(), "b".into()],
            correct_index: 1,
        });
        let json = serde_json::to_string(&item.public_view()).unwrap();
        assert!(!json.contains("correct_index"));
    }
}
