//! Abstract pattern section: infer a grid transformation from three
//! exemplars and pick its application to a test grid.
//!
//! Each section uses every rule once, in an RNG-chosen order.

use crate::model::{
    item_id, Grid, GridExample, GridItem, GridRule, Item, ItemKind, Section, SectionCode,
};
use crate::rng::{RandomSource, SeededRng};

use super::section_rng;

const CODE: SectionCode = SectionCode::Grid;

pub const ITEM_COUNT: usize = 6;
pub const GRID_SIZE: usize = 3;
pub const PALETTE: u8 = 4;
const EXEMPLARS: usize = 3;
const OPTION_COUNT: usize = 4;

pub fn generate_grid_section(seed: &str) -> Section {
    let mut rng = section_rng(seed, CODE);
    let order = rng.sample_indices(GridRule::ALL.len(), ITEM_COUNT);
    let items = order
        .into_iter()
        .enumerate()
        .map(|(n, rule_idx)| grid_item(&mut rng, n, GridRule::ALL[rule_idx]))
        .collect();
    Section::new(CODE, items)
}

fn grid_item(rng: &mut SeededRng, n: usize, rule: GridRule) -> Item {
    let examples = (0..EXEMPLARS)
        .map(|_| {
            let input = random_grid(rng);
            let output = apply_rule(rule, &input);
            GridExample { input, output }
        })
        .collect();
    let test_input = random_grid(rng);
    let correct = apply_rule(rule, &test_input);

    let mut others: Vec<GridRule> = GridRule::ALL.into_iter().filter(|r| *r != rule).collect();
    rng.shuffle(&mut others);
    let mut distractors: Vec<Grid> = Vec::with_capacity(OPTION_COUNT - 1);
    for other in others {
        if distractors.len() == OPTION_COUNT - 1 {
            break;
        }
        let candidate = apply_rule(other, &test_input);
        if candidate != correct && !distractors.contains(&candidate) {
            distractors.push(candidate);
        }
    }
    for candidate in perturbations(&correct) {
        if distractors.len() == OPTION_COUNT - 1 {
            break;
        }
        if !distractors.contains(&candidate) {
            distractors.push(candidate);
        }
    }

    let mut tagged: Vec<(Grid, bool)> = std::iter::once((correct, true))
        .chain(distractors.into_iter().map(|g| (g, false)))
        .collect();
    rng.shuffle(&mut tagged);
    let correct_index = tagged.iter().position(|(_, c)| *c).unwrap_or(0);

    Item::Grid(GridItem {
        id: item_id(CODE, ItemKind::Grid, n),
        prompt: "Each example applies the same transformation. Which option applies it to the test grid?"
            .into(),
        rule,
        examples,
        test_input,
        options: tagged.into_iter().map(|(g, _)| g).collect(),
        correct_index,
    })
}

fn random_grid(rng: &mut SeededRng) -> Grid {
    (0..GRID_SIZE)
        .map(|_| {
            (0..GRID_SIZE)
                .map(|_| rng.int(PALETTE as usize) as u8)
                .collect()
        })
        .collect()
}

/// Single-cell recolourings of `grid`, in a fixed order. Never yields `grid`.
fn perturbations(grid: &Grid) -> impl Iterator<Item = Grid> + '_ {
    (0..GRID_SIZE * GRID_SIZE).flat_map(move |cell| {
        (1..PALETTE).map(move |step| {
            let mut g = grid.clone();
            let (r, c) = (cell / GRID_SIZE, cell % GRID_SIZE);
            g[r][c] = (g[r][c] + step) % PALETTE;
            g
        })
    })
}

/// Apply a transformation rule to a square grid.
pub fn apply_rule(rule: GridRule, grid: &Grid) -> Grid {
    let n = grid.len();
    match rule {
        GridRule::FlipHorizontal => grid
            .iter()
            .map(|row| row.iter().rev().copied().collect())
            .collect(),
        GridRule::FlipVertical => grid.iter().rev().cloned().collect(),
        GridRule::RotateClockwise => (0..n)
            .map(|r| (0..n).map(|c| grid[n - 1 - c][r]).collect())
            .collect(),
        GridRule::Transpose => (0..n)
            .map(|r| (0..n).map(|c| grid[c][r]).collect())
            .collect(),
        GridRule::Recolor => grid
            .iter()
            .map(|row| row.iter().map(|v| (v + 1) % PALETTE).collect())
            .collect(),
        GridRule::ShiftRight => grid
            .iter()
            .map(|row| {
                let mut shifted = row.clone();
                shifted.rotate_right(1);
                shifted
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        vec![vec![0, 1, 2], vec![3, 0, 1], vec![2, 3, 0]]
    }

    #[test]
    fn rules_transform_as_named() {
        let g = sample();
        assert_eq!(
            apply_rule(GridRule::FlipHorizontal, &g),
            vec![vec![2, 1, 0], vec![1, 0, 3], vec![0, 3, 2]]
        );
        assert_eq!(
            apply_rule(GridRule::FlipVertical, &g),
            vec![vec![2, 3, 0], vec![3, 0, 1], vec![0, 1, 2]]
        );
        assert_eq!(
            apply_rule(GridRule::RotateClockwise, &g),
            vec![vec![2, 3, 0], vec![3, 0, 1], vec![0, 1, 2]]
        );
        assert_eq!(
            apply_rule(GridRule::Transpose, &g),
            vec![vec![0, 3, 2], vec![1, 0, 3], vec![2, 1, 0]]
        );
        assert_eq!(
            apply_rule(GridRule::Recolor, &g),
            vec![vec![1, 2, 3], vec![0, 1, 2], vec![3, 0, 1]]
        );
        assert_eq!(
            apply_rule(GridRule::ShiftRight, &g),
            vec![vec![2, 0, 1], vec![1, 3, 0], vec![0, 2, 3]]
        );
    }

    #[test]
    fn exemplars_follow_the_rule() {
        let section = generate_grid_section("grid-test");
        assert_eq!(section.items.len(), ITEM_COUNT);
        for item in &section.items {
            let Item::Grid(g) = item else { panic!("non-grid item") };
            assert_eq!(g.examples.len(), EXEMPLARS);
            for ex in &g.examples {
                assert_eq!(apply_rule(g.rule, &ex.input), ex.output);
            }
            assert_eq!(g.options[g.correct_index], apply_rule(g.rule, &g.test_input));
        }
    }

    #[test]
    fn options_are_distinct() {
        for seed in ["x", "y", "z", "w"] {
            for item in generate_grid_section(seed).items {
                let Item::Grid(g) = item else { continue };
                assert_eq!(g.options.len(), OPTION_COUNT);
                for i in 0..g.options.len() {
                    for j in (i + 1)..g.options.len() {
                        assert_ne!(g.options[i], g.options[j], "seed {seed}");
                    }
                }
            }
        }
    }

    #[test]
    fn perturbations_are_distinct_and_never_the_original() {
        // Uniform grids are fixed points of every rule except recolor.
        let flat: Grid = vec![vec![2; 3]; 3];
        let p: Vec<Grid> = perturbations(&flat).collect();
        assert_eq!(p.len(), 27);
        assert!(p.iter().all(|g| *g != flat));
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }
}
