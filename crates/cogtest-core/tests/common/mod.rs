//! Shared helpers for integration tests.

#![allow(dead_code)]

use cogtest_core::model::{Item, ItemKind, Response, Section, WritingConstraints};

/// A short essay that uses every required token and stays coherent and
/// within limits for both writing item shapes the generators produce.
pub fn model_essay(constraints: &WritingConstraints) -> String {
    let frames = [
        "I think the {} matters because it shapes how people plan their days.",
        "Many neighbors noticed the {} during the spring season.",
        "Later the {} helped everyone decide what to do next.",
        "Finally the {} made the whole effort feel worthwhile.",
        "Nobody expected the {} to change so much so quickly.",
    ];
    constraints
        .required_tokens
        .iter()
        .zip(frames.iter())
        .map(|(token, frame)| frame.replace("{}", token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// The response that earns full credit on `item`.
pub fn correct_response(item: &Item) -> Response {
    match item {
        Item::Spelling(c) => Response::index(&c.id, ItemKind::Spelling, c.correct_index),
        Item::Analogy(c) => Response::index(&c.id, ItemKind::Analogy, c.correct_index),
        Item::Cloze(c) => Response::indices(
            &c.id,
            ItemKind::Cloze,
            c.blanks.iter().map(|b| b.correct_index).collect(),
        ),
        Item::Microwrite(w) => {
            Response::text(&w.id, ItemKind::Microwrite, model_essay(&w.constraints))
        }
        Item::Constrained(w) => {
            Response::text(&w.id, ItemKind::Constrained, model_essay(&w.constraints))
        }
        Item::Arith(a) => Response::raw(&a.id, ItemKind::Arith, &a.expected),
        Item::Grid(g) => Response::index(&g.id, ItemKind::Grid, g.correct_index),
        Item::Perception(p) => Response::index(&p.id, ItemKind::Perception, p.correct_index),
        Item::Science(s) => Response::index(&s.id, ItemKind::Science, s.correct_index),
        Item::Code(c) => Response::raw(&c.id, ItemKind::Code, &c.expected),
    }
}

pub fn correct_responses(section: &Section) -> Vec<Response> {
    section.items.iter().map(correct_response).collect()
}
