//! Code-tracing section: predict what a short pseudo-code program prints.

use crate::banks::Banks;
use crate::hashing::NormalizationMode;
use crate::model::{item_id, CodeItem, Item, ItemKind, Section, SectionCode};
use crate::rng::{RandomSource, SeededRng};

use super::section_rng;

const CODE: SectionCode = SectionCode::Coding;

pub const ITEM_COUNT: usize = 4;

const PROMPT: &str = "What does this program print?";

pub fn generate_coding_section(seed: &str) -> Section {
    generate_coding_section_with(seed, Banks::builtin())
}

pub fn generate_coding_section_with(seed: &str, banks: &Banks) -> Section {
    let mut rng = section_rng(seed, CODE);
    let traces = [
        accumulator(&mut rng),
        bitmask(&mut rng),
        reversal(&mut rng, banks.trace_words),
        div_mod(&mut rng),
    ];
    let items = traces
        .into_iter()
        .enumerate()
        .map(|(n, (snippet, expected, normalization))| {
            Item::Code(CodeItem {
                id: item_id(CODE, ItemKind::Code, n),
                prompt: PROMPT.into(),
                snippet,
                expected,
                normalization,
            })
        })
        .collect();
    Section::new(CODE, items)
}

fn accumulator(rng: &mut SeededRng) -> (String, String, NormalizationMode) {
    let start = rng.range(0, 20);
    let n = rng.range(3, 10);
    let k = rng.range(2, 6);
    let snippet = format!(
        "total = {start}\nfor i in 1..={n}:\n    total = total + i * {k}\nprint(total)"
    );
    let expected = start + k * n * (n + 1) / 2;
    (snippet, expected.to_string(), NormalizationMode::Exact)
}

fn bitmask(rng: &mut SeededRng) -> (String, String, NormalizationMode) {
    let x = rng.range(0x10, 0x100);
    let mask = rng.range(0x10, 0x100);
    let snippet = format!("x = 0x{x:X}\nmask = 0x{mask:X}\nprint(hex((x & mask) << 1))");
    let expected = format!("0x{:x}", (x & mask) << 1);
    (snippet, expected, NormalizationMode::HexLowercase)
}

fn reversal(rng: &mut SeededRng, words: &[&str]) -> (String, String, NormalizationMode) {
    let word = rng.pick(words).copied().unwrap_or("signal");
    let snippet = format!("word = \"{word}\"\nprint(reverse(word), length(word))");
    let reversed: String = word.chars().rev().collect();
    let expected = format!("{reversed} {}", word.chars().count());
    (snippet, expected, NormalizationMode::TrimmedLowercase)
}

fn div_mod(rng: &mut SeededRng) -> (String, String, NormalizationMode) {
    let a = rng.range(50, 500);
    let b = rng.range(3, 13);
    let snippet = format!("a = {a}\nb = {b}\nprint(a // b, a % b)");
    let expected = format!("{} {}", a / b, a % b);
    (snippet, expected, NormalizationMode::Exact)
}
