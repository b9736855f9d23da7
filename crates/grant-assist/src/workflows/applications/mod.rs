//! Grant eligibility screening and application readiness scoring.

pub mod domain;
pub mod eligibility;
pub(crate) mod evaluation;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationFacts, EligibilityCriterion, EligibilityReport, EligibilityRequest, EligibleGrant,
    IneligibleGrant, RubricCategory,
};
pub use eligibility::{check_eligibility, ELIGIBILITY_CRITERIA};
pub use evaluation::{
    ApprovalBand, EvaluationEngine, EvaluationResult, NoteKind, RubricNote, ScoreComponent,
    MAX_SCORE,
};
pub use router::application_router;
