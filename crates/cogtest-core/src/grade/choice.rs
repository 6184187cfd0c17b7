//! Exact-choice and multi-blank grading.

use crate::model::{ClozeItem, ItemResult};

/// All-or-nothing: 1 when the selected index is the stored correct index.
pub fn grade_choice(
    item_id: &str,
    correct_index: usize,
    option_count: usize,
    selected: usize,
) -> ItemResult {
    if selected >= option_count {
        return ItemResult::new(
            item_id,
            0.0,
            format!("Selected option {selected} is out of range; treated as unanswered."),
        );
    }
    if selected == correct_index {
        ItemResult::new(item_id, 1.0, "Correct.")
    } else {
        ItemResult::new(item_id, 0.0, "Incorrect.")
    }
}

/// Linear partial credit: matching blanks over total blanks.
///
/// Missing selections count as wrong; extra selections are ignored.
pub fn grade_cloze(item: &ClozeItem, selected: &[usize]) -> ItemResult {
    let total = item.blanks.len();
    if total == 0 {
        return ItemResult::new(&item.id, 0.0, "Item has no blanks.");
    }
    let matched = item
        .blanks
        .iter()
        .zip(selected)
        .filter(|(blank, &sel)| blank.correct_index == sel)
        .count();
    ItemResult::new(
        &item.id,
        matched as f64 / total as f64,
        format!("{matched} of {total} blanks correct."),
    )
}
