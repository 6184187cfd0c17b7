//! Section generators.
//!
//! Each generator is a pure function of the session seed. It derives its own
//! substream with [`section_seed`] and draws every value from a single
//! [`SeededRng`], so sections never influence each other.

pub mod arithmetic;
pub mod coding;
pub mod generative;
pub mod grid;
pub mod language;
pub mod perception;
pub mod science;

pub use arithmetic::generate_arithmetic_section;
pub use coding::{generate_coding_section, generate_coding_section_with};
pub use generative::{generate_generative_section, generate_generative_section_with};
pub use grid::generate_grid_section;
pub use language::{generate_language_section, generate_language_section_with};
pub use perception::{generate_perception_section, generate_perception_section_with};
pub use science::{generate_science_section, generate_science_section_with};

use crate::banks::Banks;
use crate::model::{Section, SectionCode};
use crate::rng::{section_seed, RandomSource, SeededRng};

/// Generate one section from the built-in banks.
pub fn generate_section(code: SectionCode, seed: &str) -> Section {
    generate_section_with(code, seed, Banks::builtin())
}

/// Generate one section from the given banks.
pub fn generate_section_with(code: SectionCode, seed: &str, banks: &Banks) -> Section {
    let section = match code {
        SectionCode::Language => generate_language_section_with(seed, banks),
        SectionCode::Arithmetic => generate_arithmetic_section(seed),
        SectionCode::Grid => generate_grid_section(seed),
        SectionCode::Perception => generate_perception_section_with(seed, banks),
        SectionCode::Science => generate_science_section_with(seed, banks),
        SectionCode::Generative => generate_generative_section_with(seed, banks),
        SectionCode::Coding => generate_coding_section_with(seed, banks),
    };
    tracing::trace!(section = %code, items = section.items.len(), "generated section");
    section
}

pub(crate) fn section_rng(seed: &str, code: SectionCode) -> SeededRng {
    SeededRng::new(&section_seed(seed, code.as_str()))
}

/// Shuffle the correct answer in with its distractors.
///
/// Returns the options and the index the correct answer landed on.
pub(crate) fn shuffle_options<R: RandomSource>(
    rng: &mut R,
    correct: String,
    distractors: Vec<String>,
) -> (Vec<String>, usize) {
    let mut tagged: Vec<(String, bool)> = std::iter::once((correct, true))
        .chain(distractors.into_iter().map(|d| (d, false)))
        .collect();
    rng.shuffle(&mut tagged);
    let correct_index = tagged.iter().position(|(_, c)| *c).unwrap_or(0);
    (tagged.into_iter().map(|(o, _)| o).collect(), correct_index)
}

/// Keep candidates that differ (case-insensitively) from the answer and from
/// each other, up to `count`.
pub(crate) fn distinct_distractors<I>(answer: &str, candidates: I, count: usize) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = vec![answer.to_lowercase()];
    let mut out = Vec::with_capacity(count);
    for candidate in candidates {
        if out.len() == count {
            break;
        }
        let lower = candidate.to_lowercase();
        if seen.contains(&lower) {
            continue;
        }
        seen.push(lower);
        out.push(candidate);
    }
    out
}
