mod policy;
mod rules;

pub use policy::ApprovalBand;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::domain::{ApplicationFacts, RubricCategory};
use crate::workflows::advisors::AdvisorDirectory;

pub const MAX_SCORE: u8 = 100;

/// Stateless evaluator applying the DCNR rubric to application facts.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    advisors: Arc<AdvisorDirectory>,
}

impl EvaluationEngine {
    pub fn new(advisors: Arc<AdvisorDirectory>) -> Self {
        Self { advisors }
    }

    pub fn evaluate(&self, facts: &ApplicationFacts) -> EvaluationResult {
        let components = rules::score_application(facts);
        let total: u16 = components
            .iter()
            .map(|component| u16::from(component.points))
            .sum();
        let score = u8::try_from(total.min(u16::from(MAX_SCORE))).unwrap_or(MAX_SCORE);
        let approval_band = ApprovalBand::from_score(score);

        let mut strengths = Vec::new();
        let mut weaknesses = Vec::new();
        let mut feedback = Vec::new();
        for note in components.iter().flat_map(|component| &component.notes) {
            let target = match note.kind {
                NoteKind::Strength => &mut strengths,
                NoteKind::Weakness => &mut weaknesses,
                NoteKind::Feedback => &mut feedback,
            };
            target.push(note.text.clone());
        }

        if let Some(advisor) = facts
            .county
            .as_deref()
            .and_then(|county| self.advisors.lookup(county))
        {
            feedback.push(format!(
                "📞 Contact your {} regional advisor, {}, at {} before submitting",
                advisor.region_name, advisor.advisor_name, advisor.phone
            ));
        }

        EvaluationResult {
            score,
            max_score: MAX_SCORE,
            approval_band,
            approval_chance: approval_band.label().to_string(),
            strengths,
            weaknesses,
            feedback,
            overall_feedback: approval_band.overall_feedback().to_string(),
            components,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoteKind {
    Strength,
    Weakness,
    Feedback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricNote {
    pub kind: NoteKind,
    pub text: String,
}

/// Points awarded for one rubric section, with the notes it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub category: RubricCategory,
    pub points: u8,
    pub max_points: u8,
    pub notes: Vec<RubricNote>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub max_score: u8,
    pub approval_band: ApprovalBand,
    pub approval_chance: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback: Vec<String>,
    pub overall_feedback: String,
    pub components: Vec<ScoreComponent>,
}

impl EvaluationResult {
    pub fn component(&self, category: RubricCategory) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.category == category)
    }
}
