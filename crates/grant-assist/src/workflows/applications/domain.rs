use serde::{Deserialize, Serialize};

/// Applicant-supplied facts scored by the evaluation rubric.
///
/// Every field is optional on the wire; missing values read as zero or false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationFacts {
    pub entity_type: String,
    /// Average daily visitors at the facility.
    pub footfall: u64,
    pub population_served: u64,
    pub project_type: String,
    pub has_detailed_scope: bool,
    pub has_consultant_quotes: bool,
    pub has_site_control: bool,
    pub has_matching_funds: bool,
    /// Share of the request covered by the local match, 100 meaning dollar-for-dollar.
    pub match_percentage: u32,
    pub has_public_support: bool,
    pub has_partnerships: bool,
    pub addresses_equity: bool,
    pub rehabilitation_project: bool,
    pub county: Option<String>,
}

impl ApplicationFacts {
    pub fn impact_reach(&self) -> u64 {
        self.footfall.max(self.population_served)
    }
}

/// Rubric sections in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricCategory {
    EntityType,
    CommunityImpact,
    MatchingFunds,
    ProjectReadiness,
    PublicSupport,
    PlanningPriorities,
}

impl RubricCategory {
    pub const ALL: [RubricCategory; 6] = [
        RubricCategory::EntityType,
        RubricCategory::CommunityImpact,
        RubricCategory::MatchingFunds,
        RubricCategory::ProjectReadiness,
        RubricCategory::PublicSupport,
        RubricCategory::PlanningPriorities,
    ];

    pub const fn max_points(self) -> u8 {
        match self {
            RubricCategory::EntityType
            | RubricCategory::CommunityImpact
            | RubricCategory::MatchingFunds
            | RubricCategory::ProjectReadiness => 20,
            RubricCategory::PublicSupport | RubricCategory::PlanningPriorities => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RubricCategory::EntityType => "Entity Type",
            RubricCategory::CommunityImpact => "Community Impact",
            RubricCategory::MatchingFunds => "Matching Funds",
            RubricCategory::ProjectReadiness => "Project Readiness",
            RubricCategory::PublicSupport => "Public Support",
            RubricCategory::PlanningPriorities => "Planning Priorities",
        }
    }
}

/// Organization details submitted to the eligibility checker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityRequest {
    pub entity_type: String,
    /// Restrict the check to one grant category by name.
    pub grant_type: Option<String>,
    pub has_501c3: bool,
    pub has_matching_funds: bool,
}

/// One row of the static eligibility rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityCriterion {
    pub grant_name: &'static str,
    pub accepted_entity_substrings: &'static [&'static str],
    pub requirement_notes: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibleGrant {
    pub grant: String,
    pub confidence: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IneligibleGrant {
    pub grant: String,
    pub reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityReport {
    pub eligible_grants: Vec<EligibleGrant>,
    pub ineligible_grants: Vec<IneligibleGrant>,
    pub recommendations: Vec<String>,
}
