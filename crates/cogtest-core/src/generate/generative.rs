//! Generative writing section: three to five constrained prompts graded by
//! rubric rather than exact match.

use crate::banks::{Banks, WritingTopic};
use crate::model::{item_id, Item, ItemKind, Section, SectionCode, WritingConstraints, WritingItem};
use crate::rng::{RandomSource, SeededRng};

use super::section_rng;

const CODE: SectionCode = SectionCode::Generative;

pub const MIN_ITEMS: usize = 3;
pub const MAX_ITEMS: usize = 5;

const WORD_CEILINGS: [usize; 3] = [80, 100, 120];
const SENTENCE_CEILINGS: [usize; 3] = [5, 6, 7];
const MIN_WORDS: usize = 25;
const MIN_COHERENCE: f64 = 0.55;

pub fn generate_generative_section(seed: &str) -> Section {
    generate_generative_section_with(seed, Banks::builtin())
}

pub fn generate_generative_section_with(seed: &str, banks: &Banks) -> Section {
    let mut rng = section_rng(seed, CODE);
    let count = MIN_ITEMS + rng.int(MAX_ITEMS - MIN_ITEMS + 1);
    let items = rng
        .sample_indices(banks.generative_topics.len(), count)
        .into_iter()
        .enumerate()
        .map(|(n, idx)| constrained_item(&mut rng, n, &banks.generative_topics[idx]))
        .collect();
    Section::new(CODE, items)
}

fn constrained_item(rng: &mut SeededRng, n: usize, topic: &WritingTopic) -> Item {
    let token_count = 3 + rng.int(2);
    let required_tokens = rng
        .sample_indices(topic.tokens.len(), token_count)
        .into_iter()
        .map(|i| topic.tokens[i].to_string())
        .collect();
    let max_words = *rng.pick(&WORD_CEILINGS).unwrap_or(&WORD_CEILINGS[0]);
    let max_sentences = *rng.pick(&SENTENCE_CEILINGS).unwrap_or(&SENTENCE_CEILINGS[0]);
    Item::Constrained(WritingItem {
        id: item_id(CODE, ItemKind::Constrained, n),
        prompt: format!(
            "{} Use every required word, stay within {max_words} words and {max_sentences} sentences.",
            topic.prompt
        ),
        constraints: WritingConstraints {
            required_tokens,
            max_words,
            max_sentences,
            min_words: MIN_WORDS,
            min_coherence: MIN_COHERENCE,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_count_is_bounded() {
        for seed in ["one", "two", "three", "four", "five", "six"] {
            let n = generate_generative_section(seed).items.len();
            assert!((MIN_ITEMS..=MAX_ITEMS).contains(&n), "{seed}: {n}");
        }
    }

    #[test]
    fn constraints_are_well_formed() {
        for item in generate_generative_section("constraints").items {
            let Item::Constrained(w) = item else { panic!("non-writing item") };
            let c = &w.constraints;
            assert!(c.required_tokens.len() >= 3);
            assert!(c.required_tokens.iter().all(|t| t.chars().count() >= 6));
            assert!(c.min_words < c.max_words);
            assert!(c.max_sentences >= 5);
        }
    }
}
