//! Section graders.
//!
//! Grading is a single stateless pass over the section's items. Every item
//! gets a result: a missing response, a response whose `type` disagrees with
//! the item's kind, or a payload of the wrong shape all count as unanswered
//! with correctness 0. Responses naming unknown item ids are ignored.

pub mod choice;
pub mod numeric;
pub mod writing;

pub use choice::{grade_choice, grade_cloze};
pub use numeric::grade_numeric;
pub use writing::{grade_text, grade_writing};

use crate::hashing::normalize;
use crate::model::{CodeItem, Item, ItemResult, Response, ResponsePayload, Section, SectionScore};

/// Grade every item of a section against the submitted responses.
///
/// When several responses name the same item, the first one wins.
pub fn grade_section(section: &Section, responses: &[Response]) -> SectionScore {
    let results = section
        .items
        .iter()
        .map(|item| {
            let response = responses.iter().find(|r| r.item_id == item.id());
            grade_item(item, response)
        })
        .collect();
    let score = SectionScore::from_results(section.code, results);
    tracing::debug!(
        section = %section.code,
        items = section.items.len(),
        responses = responses.len(),
        overall = score.overall,
        "graded section"
    );
    score
}

/// Grade one item. `None` means no response was submitted.
pub fn grade_item(item: &Item, response: Option<&Response>) -> ItemResult {
    let Some(response) = response else {
        return ItemResult::new(item.id(), 0.0, "No answer submitted.");
    };
    if response.kind != item.kind() {
        return ItemResult::new(
            item.id(),
            0.0,
            format!(
                "Response type '{}' does not match item type '{}'; treated as unanswered.",
                response.kind,
                item.kind()
            ),
        );
    }

    match (item, &response.payload) {
        (Item::Spelling(c) | Item::Analogy(c), ResponsePayload::Index(sel)) => {
            grade_choice(&c.id, c.correct_index, c.options.len(), *sel)
        }
        (Item::Grid(g), ResponsePayload::Index(sel)) => {
            grade_choice(&g.id, g.correct_index, g.options.len(), *sel)
        }
        (Item::Perception(p), ResponsePayload::Index(sel)) => {
            grade_choice(&p.id, p.correct_index, p.options.len(), *sel)
        }
        (Item::Science(s), ResponsePayload::Index(sel)) => {
            grade_choice(&s.id, s.correct_index, s.options.len(), *sel)
        }
        (Item::Cloze(c), ResponsePayload::Indices(sel)) => grade_cloze(c, sel),
        (
            Item::Microwrite(w) | Item::Constrained(w),
            ResponsePayload::Text(t) | ResponsePayload::Raw(t),
        ) => grade_writing(w, t),
        (Item::Arith(a), ResponsePayload::Raw(s) | ResponsePayload::Text(s)) => grade_numeric(a, s),
        (Item::Code(c), ResponsePayload::Raw(s) | ResponsePayload::Text(s)) => grade_trace(c, s),
        _ => ItemResult::new(
            item.id(),
            0.0,
            "Response payload does not fit this item; treated as unanswered.",
        ),
    }
}

/// All-or-nothing comparison of a predicted program output.
fn grade_trace(item: &CodeItem, raw: &str) -> ItemResult {
    if raw.trim().is_empty() {
        return ItemResult::new(&item.id, 0.0, "No answer submitted.");
    }
    let submitted = normalize(raw, item.normalization, None);
    let expected = normalize(&item.expected, item.normalization, None);
    if submitted == expected {
        ItemResult::new(&item.id, 1.0, "Correct.")
    } else {
        ItemResult::new(&item.id, 0.0, "Incorrect output.")
    }
}
