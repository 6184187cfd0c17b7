//! Core trait definitions for grading strategies.
//!
//! Both deployment variants share the generator layer; they differ only in
//! how a regenerated section is scored. Implementations live in
//! [`crate::plan`].

use crate::config::AssessmentConfig;
use crate::model::{Response, Section, SectionScore};

// ---------------------------------------------------------------------------
// Grading strategy trait
// ---------------------------------------------------------------------------

/// A way of turning a regenerated section plus responses into a score.
///
/// Implementations must be pure: the same inputs always give the same score.
pub trait GradingStrategy: Send + Sync {
    /// Short strategy name for logs and reports (e.g. "partial-credit").
    fn name(&self) -> &'static str;

    /// Grade one section.
    fn grade(
        &self,
        section: &Section,
        responses: &[Response],
        config: &AssessmentConfig,
    ) -> SectionScore;
}
