//! Which catalog plans are eligible alternatives for a client.

use medintake_core::{ClientProfile, Plan};

/// True when `candidate` is in the client's state, explicitly lists the
/// client's county, and is not the client's current plan.
///
/// A plan with no county list is never eligible.
pub fn is_eligible(candidate: &Plan, client: &ClientProfile, current_plan_id: i64) -> bool {
    candidate.id != current_plan_id
        && candidate.in_state(&client.state)
        && candidate.serves_county(&client.county)
}

/// Eligible alternatives in catalog order.
pub fn eligible_plans<'a>(
    catalog: &'a [Plan],
    client: &ClientProfile,
    current_plan_id: i64,
) -> Vec<&'a Plan> {
    catalog
        .iter()
        .filter(|p| is_eligible(p, client, current_plan_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(state: &str, county: &str) -> ClientProfile {
        ClientProfile {
            state: state.into(),
            county: county.into(),
            uses_restricted_network: false,
        }
    }

    fn plan(id: i64, state: &str, counties: &[&str]) -> Plan {
        Plan {
            id,
            carrier_id: 1,
            name: format!("Plan {id}"),
            state_code: Some(state.into()),
            counties: counties.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn county_must_be_listed() {
        let c = client("WA", "Snohomish");
        assert!(!is_eligible(&plan(2, "WA", &["King", "Pierce"]), &c, 1));
        assert!(is_eligible(&plan(3, "WA", &["King", " snohomish "]), &c, 1));
    }

    #[test]
    fn empty_county_list_excluded() {
        assert!(!is_eligible(&plan(2, "WA", &[]), &client("WA", "King"), 1));
    }

    #[test]
    fn state_and_self_exclusion() {
        let c = client("WA", "King");
        assert!(!is_eligible(&plan(2, "OR", &["King"]), &c, 1));
        assert!(!is_eligible(&plan(1, "WA", &["King"]), &c, 1));

        let catalog = vec![plan(1, "WA", &["King"]), plan(2, "WA", &["King"])];
        let ids: Vec<i64> = eligible_plans(&catalog, &c, 1).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2]);
    }
}
