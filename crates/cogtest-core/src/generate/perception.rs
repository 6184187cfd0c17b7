//! Perception section: scene recall plus one planted-anomaly data block.
//!
//! The anomaly item is the reason draw order matters here. The displayed
//! readings and the answer key come from the same sequence: baseline, the
//! twelve jitters, the anomaly index, then the anomaly direction and size.

use crate::banks::{Banks, SceneEntry};
use crate::model::{item_id, Item, ItemKind, PerceptionItem, Section, SectionCode};
use crate::rng::{RandomSource, SeededRng};

use super::{section_rng, shuffle_options};

const CODE: SectionCode = SectionCode::Perception;

pub const SCENE_COUNT: usize = 2;
pub const READING_COUNT: usize = 12;

pub fn generate_perception_section(seed: &str) -> Section {
    generate_perception_section_with(seed, Banks::builtin())
}

pub fn generate_perception_section_with(seed: &str, banks: &Banks) -> Section {
    let mut rng = section_rng(seed, CODE);
    let mut items: Vec<Item> = rng
        .sample_indices(banks.scenes.len(), SCENE_COUNT)
        .into_iter()
        .enumerate()
        .map(|(n, idx)| scene_item(&mut rng, n, &banks.scenes[idx]))
        .collect();
    let n = items.len();
    items.push(anomaly_item(&mut rng, n));
    Section::new(CODE, items)
}

/// Render details as the bullet list used for correct answers.
pub fn bullet_list<S: AsRef<str>>(details: &[S]) -> String {
    details
        .iter()
        .map(|d| format!("• {}", d.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn scene_item(rng: &mut SeededRng, n: usize, scene: &SceneEntry) -> Item {
    let distractors = scene.distractors.iter().map(|d| d.to_string()).collect();
    let (options, correct_index) = shuffle_options(rng, bullet_list(&scene.details), distractors);
    Item::Perception(PerceptionItem {
        id: item_id(CODE, ItemKind::Perception, n),
        scenario: scene.scenario.to_string(),
        prompt: "Which option lists details that actually appeared in the scene?".into(),
        options,
        correct_index,
    })
}

/// A block of readings with one value displaced from the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantedAnomaly {
    pub readings: Vec<f64>,
    pub index: usize,
    pub upward: bool,
}

/// Draw a reading block. Consumes exactly `READING_COUNT + 4` draws.
pub fn plant_anomaly<R: RandomSource>(rng: &mut R) -> PlantedAnomaly {
    let baseline = rng.range(200, 800) as f64;
    let mut readings: Vec<f64> = (0..READING_COUNT)
        .map(|_| round1(baseline * (1.0 + rng.float_range(-0.03, 0.03))))
        .collect();
    let index = rng.int(READING_COUNT);
    let upward = rng.chance(0.5);
    let displacement = rng.float_range(0.25, 0.40);
    let factor = if upward {
        1.0 + displacement
    } else {
        1.0 - displacement
    };
    readings[index] = round1(baseline * factor);
    PlantedAnomaly {
        readings,
        index,
        upward,
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn anomaly_item(rng: &mut SeededRng, n: usize) -> Item {
    let planted = plant_anomaly(rng);
    let scenario = format!(
        "A pressure sensor logged {READING_COUNT} consecutive readings in kPa. \
         One of them does not fit the pattern of the others.\n{}",
        planted
            .readings
            .iter()
            .enumerate()
            .map(|(i, v)| format!("#{}: {v:.1}", i + 1))
            .collect::<Vec<_>>()
            .join("\n")
    );
    let direction = if planted.upward { "above" } else { "below" };
    let correct = bullet_list(&[
        format!("Reading #{}", planted.index + 1),
        format!("Value {:.1}", planted.readings[planted.index]),
        format!("Sits well {direction} the rest"),
    ]);
    let others: Vec<usize> = (0..READING_COUNT).filter(|&i| i != planted.index).collect();
    let distractors = rng
        .sample_indices(others.len(), 3)
        .into_iter()
        .map(|i| {
            let idx = others[i];
            format!(
                "Reading #{} stands out at {:.1} kPa compared with its neighbours.",
                idx + 1,
                planted.readings[idx]
            )
        })
        .collect();
    let (options, correct_index) = shuffle_options(rng, correct, distractors);
    Item::Perception(PerceptionItem {
        id: item_id(CODE, ItemKind::Perception, n),
        scenario,
        prompt: "Which option correctly identifies the anomalous reading?".into(),
        options,
        correct_index,
    })
}
