use super::super::domain::{ApplicationFacts, RubricCategory};
use super::{NoteKind, RubricNote, ScoreComponent};

const SITE_CONTROL_PROJECT_TYPES: [&str; 2] = ["master site", "feasibility"];

pub(crate) fn score_application(facts: &ApplicationFacts) -> Vec<ScoreComponent> {
    vec![
        entity_type(facts),
        community_impact(facts),
        matching_funds(facts),
        project_readiness(facts),
        public_support(facts),
        planning_priorities(facts),
    ]
}

fn entity_type(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::EntityType);
    let entity = facts.entity_type.to_lowercase();

    if entity.contains("municipality") || entity.contains("county") {
        component.award(20);
        component.strength("✅ Municipal/County applicants have access to Keystone Fund");
    } else if entity.contains("council of governments") {
        component.award(18);
        component.strength("✅ Council of Governments is a strong eligible applicant");
    } else if entity.contains("school") {
        component.award(15);
        component.strength("✅ School districts are eligible applicants");
    } else if entity.contains("nonprofit") || entity.contains("501c3") {
        component.award(10);
        component.weakness("⚠️ Nonprofits limited to environmental stewardship funds only");
    } else {
        component.award(5);
        component.weakness("❌ Entity type may need partnership with eligible organization");
    }

    component
}

fn community_impact(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::CommunityImpact);
    let reach = facts.impact_reach();
    if reach == 0 {
        return component;
    }

    if reach >= 5000 {
        component.award(20);
        component.strength(format!(
            "✅ Strong community impact: {} people served",
            with_thousands(reach)
        ));
    } else if reach >= 1000 {
        component.award(15);
        component.strength(format!(
            "✅ Good community impact: {} people served",
            with_thousands(reach)
        ));
    } else if reach >= 100 {
        component.award(10);
        component.feedback(format!(
            "📊 Moderate community impact: {} people served",
            with_thousands(reach)
        ));
    } else {
        component.award(5);
        component.weakness(format!("❌ Low community impact: only {reach} people served"));
        component.feedback("💡 Consider partnerships to increase community reach");
    }

    component
}

fn matching_funds(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::MatchingFunds);

    if !facts.has_matching_funds {
        component.weakness("❌ No matching funds identified - this is required!");
    } else if facts.match_percentage >= 100 {
        component.award(20);
        component.strength("✅ Full dollar-for-dollar match secured");
    } else if facts.match_percentage >= 50 {
        component.award(15);
        component.strength(format!("✅ {}% match identified", facts.match_percentage));
    } else {
        component.award(10);
        component.weakness("⚠️ Partial match may need to be increased");
    }

    component
}

fn project_readiness(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::ProjectReadiness);

    if facts.has_detailed_scope {
        component.award(7);
        component.strength("✅ Detailed scope of work prepared");
    } else {
        component.weakness("❌ Need detailed scope of work");
    }

    if facts.has_consultant_quotes {
        component.award(7);
        component.strength("✅ Consultant quotes obtained");
    } else {
        component.weakness("❌ Need minimum 2 consultant quotes");
    }

    if facts.has_site_control {
        component.award(6);
        component.strength("✅ Site control documented");
    } else if requires_site_control(&facts.project_type) {
        component.weakness("❌ Site control required for this project type");
    }

    component
}

fn public_support(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::PublicSupport);

    if facts.has_public_support {
        component.award(5);
        component.strength("✅ Public support demonstrated");
    } else {
        component.feedback("💡 Consider conducting public meetings or surveys");
    }

    if facts.has_partnerships {
        component.award(5);
        component.strength("✅ Strong partnerships in place");
    } else {
        component.feedback("💡 Consider partnering with other organizations");
    }

    component
}

fn planning_priorities(facts: &ApplicationFacts) -> ScoreComponent {
    let mut component = ScoreComponent::new(RubricCategory::PlanningPriorities);

    if facts.addresses_equity {
        component.award(5);
        component.strength("✅ Addresses recreation for all/equity");
    }
    if facts.rehabilitation_project {
        component.award(5);
        component.strength("✅ Focuses on rehabilitation of existing facilities");
    }

    component
}

fn requires_site_control(project_type: &str) -> bool {
    let project_type = project_type.to_lowercase();
    SITE_CONTROL_PROJECT_TYPES
        .iter()
        .any(|kind| project_type.contains(kind))
}

/// Formats with comma thousands separators, e.g. `12,500`.
pub(crate) fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl ScoreComponent {
    fn new(category: RubricCategory) -> Self {
        Self {
            category,
            points: 0,
            max_points: category.max_points(),
            notes: Vec::new(),
        }
    }

    fn award(&mut self, points: u8) {
        self.points = self.points.saturating_add(points).min(self.max_points);
    }

    fn strength(&mut self, text: impl Into<String>) {
        self.note(NoteKind::Strength, text);
    }

    fn weakness(&mut self, text: impl Into<String>) {
        self.note(NoteKind::Weakness, text);
    }

    fn feedback(&mut self, text: impl Into<String>) {
        self.note(NoteKind::Feedback, text);
    }

    fn note(&mut self, kind: NoteKind, text: impl Into<String>) {
        self.notes.push(RubricNote {
            kind,
            text: text.into(),
        });
    }
}
