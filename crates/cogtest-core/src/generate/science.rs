//! Science section: two Fermi estimates, two dimensional-analysis items,
//! and two causal-reasoning items, in that order.

use crate::banks::{Banks, ChoiceFact};
use crate::model::{item_id, Item, ItemKind, ScienceItem, ScienceKind, Section, SectionCode};
use crate::rng::{RandomSource, SeededRng};

use super::{distinct_distractors, section_rng, shuffle_options};

const CODE: SectionCode = SectionCode::Science;

pub const PER_SUBTYPE: usize = 2;

type FermiTemplate = fn(&mut SeededRng) -> (String, f64);

const FERMI_TEMPLATES: [FermiTemplate; 4] = [city_water, heartbeats, printer_pages, stadium_cups];

pub fn generate_science_section(seed: &str) -> Section {
    generate_science_section_with(seed, Banks::builtin())
}

pub fn generate_science_section_with(seed: &str, banks: &Banks) -> Section {
    let mut rng = section_rng(seed, CODE);
    let mut items = Vec::with_capacity(PER_SUBTYPE * 3);

    for template_idx in rng.sample_indices(FERMI_TEMPLATES.len(), PER_SUBTYPE) {
        let (prompt, estimate) = FERMI_TEMPLATES[template_idx](&mut rng);
        let n = items.len();
        items.push(fermi_item(&mut rng, n, prompt, estimate));
    }
    for (kind, bank) in [
        (ScienceKind::Dimensional, banks.dimensional),
        (ScienceKind::Causal, banks.causal),
    ] {
        for idx in rng.sample_indices(bank.len(), PER_SUBTYPE) {
            let n = items.len();
            items.push(fact_item(&mut rng, n, kind, &bank[idx]));
        }
    }

    Section::new(CODE, items)
}

/// Order of magnitude of a positive estimate.
pub fn magnitude(value: f64) -> i32 {
    value.abs().max(1.0).log10().round() as i32
}

fn power_label(exp: i32) -> String {
    format!("about 10^{exp}")
}

fn fermi_item(rng: &mut SeededRng, n: usize, prompt: String, estimate: f64) -> Item {
    let k = magnitude(estimate);
    let far = if rng.chance(0.5) { k + 2 } else { k - 2 };
    let distractors = vec![power_label(k - 1), power_label(k + 1), power_label(far)];
    let (options, correct_index) = shuffle_options(rng, power_label(k), distractors);
    Item::Science(ScienceItem {
        id: item_id(CODE, ItemKind::Science, n),
        subtype: ScienceKind::Fermi,
        prompt,
        options,
        correct_index,
    })
}

fn fact_item(rng: &mut SeededRng, n: usize, kind: ScienceKind, fact: &ChoiceFact) -> Item {
    let distractors = distinct_distractors(
        fact.correct,
        fact.distractors.iter().map(|d| d.to_string()),
        3,
    );
    let (options, correct_index) = shuffle_options(rng, fact.correct.to_string(), distractors);
    Item::Science(ScienceItem {
        id: item_id(CODE, ItemKind::Science, n),
        subtype: kind,
        prompt: fact.prompt.to_string(),
        options,
        correct_index,
    })
}

fn city_water(rng: &mut SeededRng) -> (String, f64) {
    let people = rng.range(2, 10) * 100_000;
    let litres = rng.range(100, 400);
    let prompt = format!(
        "A city has about {people} residents, and each uses roughly {litres} litres of water per day. \
         About how many litres does the city use in a year?"
    );
    (prompt, (people * litres * 365) as f64)
}

fn heartbeats(rng: &mut SeededRng) -> (String, f64) {
    let bpm = rng.range(55, 95);
    let years = rng.range(10, 80);
    let prompt = format!(
        "A resting heart beats about {bpm} times per minute. Roughly how many times does it beat in {years} years?"
    );
    (prompt, (bpm * 60 * 24 * 365 * years) as f64)
}

fn printer_pages(rng: &mut SeededRng) -> (String, f64) {
    let per_minute = rng.range(10, 60);
    let hours = rng.range(2, 12);
    let days = rng.range(20, 31);
    let prompt = format!(
        "An office printer outputs {per_minute} pages per minute and runs {hours} hours a day. \
         About how many pages does it print over {days} working days?"
    );
    (prompt, (per_minute * 60 * hours * days) as f64)
}

fn stadium_cups(rng: &mut SeededRng) -> (String, f64) {
    let seats = rng.range(20, 90) * 1_000;
    let cups = rng.range(1, 5);
    let games = rng.range(5, 40);
    let prompt = format!(
        "A stadium seats {seats} fans, and on a hot day each fan drinks {cups} cups of water. \
         About how many cups are served across {games} sold-out games?"
    );
    (prompt, (seats * cups * games) as f64)
}
