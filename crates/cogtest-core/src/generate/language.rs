//! Language section: spelling, cloze, analogy, and one micro-writing item.
//!
//! Draw order: spelling entries, spelling shuffles, cloze entries, cloze
//! shuffles, analogy entries with their distractor picks and shuffles, then
//! the micro-writing topic and its tokens.

use crate::banks::{AnalogyEntry, Banks};
use crate::model::{
    item_id, ChoiceItem, ClozeBlank, ClozeItem, Item, ItemKind, Section, SectionCode,
    WritingConstraints, WritingItem,
};
use crate::rng::{RandomSource, SeededRng};

use super::{distinct_distractors, section_rng, shuffle_options};

const CODE: SectionCode = SectionCode::Language;

pub const SPELLING_COUNT: usize = 3;
pub const CLOZE_COUNT: usize = 3;
pub const ANALOGY_COUNT: usize = 2;

const MICROWRITE_TOKENS: usize = 3;
const MICROWRITE_MAX_WORDS: usize = 60;
const MICROWRITE_MAX_SENTENCES: usize = 4;
const MICROWRITE_MIN_WORDS: usize = 15;
const MIN_COHERENCE: f64 = 0.55;

pub fn generate_language_section(seed: &str) -> Section {
    generate_language_section_with(seed, Banks::builtin())
}

pub fn generate_language_section_with(seed: &str, banks: &Banks) -> Section {
    let mut rng = section_rng(seed, CODE);
    let mut items = Vec::with_capacity(SPELLING_COUNT + CLOZE_COUNT + ANALOGY_COUNT + 1);

    for (n, idx) in rng
        .sample_indices(banks.spelling.len(), SPELLING_COUNT)
        .into_iter()
        .enumerate()
    {
        let entry = &banks.spelling[idx];
        let distractors = distinct_distractors(
            entry.correct,
            entry.misspellings.iter().map(|m| m.to_string()),
            3,
        );
        let (options, correct_index) =
            shuffle_options(&mut rng, entry.correct.to_string(), distractors);
        items.push(Item::Spelling(ChoiceItem {
            id: item_id(CODE, ItemKind::Spelling, n),
            prompt: "Select the correctly spelled word.".into(),
            options,
            correct_index,
        }));
    }

    for (n, idx) in rng
        .sample_indices(banks.cloze.len(), CLOZE_COUNT)
        .into_iter()
        .enumerate()
    {
        let entry = &banks.cloze[idx];
        let blanks = entry
            .blanks
            .iter()
            .map(|opts| {
                let distractors =
                    distinct_distractors(opts[0], opts[1..].iter().map(|o| o.to_string()), 2);
                let (options, correct_index) =
                    shuffle_options(&mut rng, opts[0].to_string(), distractors);
                ClozeBlank {
                    options,
                    correct_index,
                }
            })
            .collect();
        items.push(Item::Cloze(ClozeItem {
            id: item_id(CODE, ItemKind::Cloze, n),
            prompt: "Choose the word that best completes each blank.".into(),
            sentence: entry.sentence.to_string(),
            blanks,
        }));
    }

    for (n, idx) in rng
        .sample_indices(banks.analogies.len(), ANALOGY_COUNT)
        .into_iter()
        .enumerate()
    {
        let entry = &banks.analogies[idx];
        let pool = analogy_pool(banks.analogies, entry);
        let picks: Vec<String> = rng
            .sample_indices(pool.len(), pool.len())
            .into_iter()
            .map(|i| pool[i].clone())
            .collect();
        let distractors = distinct_distractors(entry.d, picks, 3);
        let (options, correct_index) = shuffle_options(&mut rng, entry.d.to_string(), distractors);
        items.push(Item::Analogy(ChoiceItem {
            id: item_id(CODE, ItemKind::Analogy, n),
            prompt: format!("{} is to {} as {} is to ___?", entry.a, entry.b, entry.c),
            options,
            correct_index,
        }));
    }

    items.extend(microwrite(&mut rng, banks));

    Section::new(CODE, items)
}

/// Candidate distractors: other answers sharing the entry's relation first,
/// then every other answer so small banks still fill three slots.
fn analogy_pool(bank: &[AnalogyEntry], entry: &AnalogyEntry) -> Vec<String> {
    let same = bank
        .iter()
        .filter(|a| a.relation == entry.relation && a.d != entry.d)
        .flat_map(|a| [a.d, a.b]);
    let rest = bank
        .iter()
        .filter(|a| a.relation != entry.relation)
        .map(|a| a.d);
    let mut pool: Vec<String> = Vec::new();
    for word in same.chain(rest) {
        if word != entry.c && !pool.iter().any(|p| p == word) {
            pool.push(word.to_string());
        }
    }
    pool
}

/// `None` when the bank has no topics.
fn microwrite(rng: &mut SeededRng, banks: &Banks) -> Option<Item> {
    let topic_idx = rng.int(banks.microwrite_topics.len());
    let topic = banks.microwrite_topics.get(topic_idx)?;
    let required_tokens = rng
        .sample_indices(topic.tokens.len(), MICROWRITE_TOKENS)
        .into_iter()
        .map(|i| topic.tokens[i].to_string())
        .collect();
    Some(Item::Microwrite(WritingItem {
        id: item_id(CODE, ItemKind::Microwrite, 0),
        prompt: topic.prompt.to_string(),
        constraints: WritingConstraints {
            required_tokens,
            max_words: MICROWRITE_MAX_WORDS,
            max_sentences: MICROWRITE_MAX_SENTENCES,
            min_words: MICROWRITE_MIN_WORDS,
            min_coherence: MIN_COHERENCE,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_has_nine_items_in_order() {
        let section = generate_language_section("lang-test");
        let kinds: Vec<ItemKind> = section.items.iter().map(Item::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Spelling,
                ItemKind::Spelling,
                ItemKind::Spelling,
                ItemKind::Cloze,
                ItemKind::Cloze,
                ItemKind::Cloze,
                ItemKind::Analogy,
                ItemKind::Analogy,
                ItemKind::Microwrite,
            ]
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            generate_language_section("same"),
            generate_language_section("same")
        );
    }

    #[test]
    fn analogy_options_exclude_answer_duplicates() {
        for seed in ["a", "b", "c", "d", "e", "f", "g", "h"] {
            let section = generate_language_section(seed);
            for item in &section.items {
                if let Item::Analogy(a) = item {
                    assert_eq!(a.options.len(), 4);
                    let answer = a.options[a.correct_index].to_lowercase();
                    let hits = a
                        .options
                        .iter()
                        .filter(|o| o.to_lowercase() == answer)
                        .count();
                    assert_eq!(hits, 1, "{seed}: {:?}", a.options);
                }
            }
        }
    }

    #[test]
    fn cloze_blanks_offer_three_options() {
        let section = generate_language_section("cloze");
        for item in &section.items {
            if let Item::Cloze(c) = item {
                assert_eq!(c.blanks.len(), 3);
                assert!(c.blanks.iter().all(|b| b.options.len() == 3));
            }
        }
    }

    #[test]
    fn microwrite_tokens_are_long() {
        let section = generate_language_section("tokens");
        let Some(Item::Microwrite(w)) = section.items.last() else {
            panic!("last item should be microwrite");
        };
        assert_eq!(w.constraints.required_tokens.len(), 3);
        assert!(w
            .constraints
            .required_tokens
            .iter()
            .all(|t| t.chars().count() >= 6));
    }
}
