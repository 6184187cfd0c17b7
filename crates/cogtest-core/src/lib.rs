//! cogtest-core — Deterministic assessment generation and grading.
//!
//! Every item in an assessment is derived from a single seed string through
//! one ordered random stream per section, so a plan can be regenerated at
//! grading time instead of storing correct answers. Two grading strategies
//! share the generators: partial-credit grading of full sections, and binary
//! verification against one-way hashed answer keys.
//!
//! ```
//! use cogtest_core::{generate_arithmetic_section, grade_section, ItemKind, Response};
//!
//! let section = generate_arithmetic_section("alpha");
//! let responses = vec![Response::raw("arith-arith-0", ItemKind::Arith, "12")];
//! let score = grade_section(&section, &responses);
//! assert_eq!(score.items.len(), 8);
//! ```

pub mod banks;
pub mod config;
pub mod error;
pub mod generate;
pub mod grade;
pub mod hashing;
pub mod model;
pub mod plan;
pub mod report;
pub mod rng;
pub mod traits;
pub mod validate;

pub use banks::Banks;
pub use config::{load_config, load_config_from, AssessmentConfig};
pub use error::AssessError;
pub use generate::{
    generate_arithmetic_section, generate_coding_section, generate_generative_section,
    generate_grid_section, generate_language_section, generate_perception_section,
    generate_science_section, generate_section,
};
pub use grade::{grade_item, grade_section};
pub use hashing::{hash_answer, normalize, verify, AnswerKey, NormalizationMode, Verification};
pub use model::{
    Item, ItemKind, ItemResult, Response, ResponsePayload, Section, SectionCode, SectionScore,
};
pub use plan::{
    assemble_plan, generate_test_plan, generate_test_plan_with, grade_hashed_section,
    grade_submission, hashed_questions_for, regenerate_section, HashedQuestion, PlanVariant,
    TestPlan,
};
pub use report::GradeReport;
pub use rng::{create_rng, RandomSource, SeededRng};
pub use traits::GradingStrategy;
pub use validate::{validate_plan, validate_section, ValidationWarning};
