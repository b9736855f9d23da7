use super::domain::{
    EligibilityCriterion, EligibilityReport, EligibilityRequest, EligibleGrant, IneligibleGrant,
};

pub const ELIGIBILITY_CRITERIA: [EligibilityCriterion; 3] = [
    EligibilityCriterion {
        grant_name: "Recreation and Conservation",
        accepted_entity_substrings: &["municipality", "county", "council of governments"],
        requirement_notes: &["public entity", "matching funds available"],
    },
    EligibilityCriterion {
        grant_name: "Partnership Grants",
        accepted_entity_substrings: &["nonprofit", "501c3", "educational institution"],
        requirement_notes: &["environmental mission", "community benefit"],
    },
    EligibilityCriterion {
        grant_name: "Land Trust Grants",
        accepted_entity_substrings: &["land trust", "conservancy"],
        requirement_notes: &["accredited or working toward accreditation"],
    },
];

/// Membership test of the organization type against each grant category.
pub fn check_eligibility(request: &EligibilityRequest) -> EligibilityReport {
    let entity = request.entity_type.to_lowercase();
    let mut report = EligibilityReport::default();

    for criterion in &ELIGIBILITY_CRITERIA {
        if let Some(grant_type) = request.grant_type.as_deref() {
            if grant_type != criterion.grant_name {
                continue;
            }
        }

        let accepted = criterion
            .accepted_entity_substrings
            .iter()
            .any(|accepted| entity.contains(accepted));

        if accepted {
            report.eligible_grants.push(EligibleGrant {
                grant: criterion.grant_name.to_string(),
                confidence: "High".to_string(),
                notes: "Meets basic criteria".to_string(),
            });
        } else {
            report.ineligible_grants.push(IneligibleGrant {
                grant: criterion.grant_name.to_string(),
                reasons: vec![format!("Entity type '{entity}' may not qualify")],
            });
        }
    }

    if report.eligible_grants.is_empty() {
        report.recommendations.push(
            "Partner with an eligible municipality, county, or council of governments to sponsor the project"
                .to_string(),
        );
    }
    if !request.has_matching_funds {
        report.recommendations.push(
            "Identify matching funds early; most DCNR grants require a dollar-for-dollar match"
                .to_string(),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(entity_type: &str) -> EligibilityRequest {
        EligibilityRequest {
            entity_type: entity_type.to_string(),
            has_matching_funds: true,
            ..EligibilityRequest::default()
        }
    }

    #[test]
    fn municipality_qualifies_for_recreation_and_conservation() {
        let report = check_eligibility(&request("Municipality"));

        assert_eq!(report.eligible_grants.len(), 1);
        assert_eq!(report.eligible_grants[0].grant, "Recreation and Conservation");
        assert_eq!(report.eligible_grants[0].confidence, "High");
        assert_eq!(report.ineligible_grants.len(), 2);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn ineligible_reason_quotes_the_lowercased_entity() {
        let report = check_eligibility(&request("Other"));

        assert!(report.eligible_grants.is_empty());
        assert_eq!(report.ineligible_grants.len(), 3);
        for grant in &report.ineligible_grants {
            assert_eq!(grant.reasons, vec!["Entity type 'other' may not qualify"]);
        }
        assert_eq!(report.recommendations.len(), 1);
    }

    #[test]
    fn preserves_table_order() {
        let report = check_eligibility(&request("Land Trust"));
        let ineligible: Vec<&str> = report
            .ineligible_grants
            .iter()
            .map(|grant| grant.grant.as_str())
            .collect();
        assert_eq!(
            ineligible,
            vec!["Recreation and Conservation", "Partnership Grants"]
        );
        assert_eq!(report.eligible_grants[0].grant, "Land Trust Grants");
    }

    #[test]
    fn grant_type_limits_the_check() {
        let report = check_eligibility(&EligibilityRequest {
            grant_type: Some("Partnership Grants".to_string()),
            ..request("Nonprofit 501(c)(3)")
        });

        assert_eq!(report.eligible_grants.len(), 1);
        assert!(report.ineligible_grants.is_empty());
    }

    #[test]
    fn missing_match_adds_recommendation() {
        let report = check_eligibility(&EligibilityRequest {
            has_matching_funds: false,
            ..request("County")
        });

        assert!(report
            .recommendations
            .iter()
            .any(|line| line.contains("dollar-for-dollar")));
    }
}
