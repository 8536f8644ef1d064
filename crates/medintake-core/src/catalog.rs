//! Reference catalog of carriers and plans.
//!
//! The catalog is owned by the caller and supplied fresh per call; nothing in the
//! pipeline mutates it.

use serde::{Deserialize, Serialize};

/// An insurance carrier offering one or more plans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub id: i64,
    pub name: String,
}

/// Special-needs plan subtype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnpType {
    /// Chronic-condition SNP.
    #[serde(rename = "C-SNP")]
    Chronic,
    /// Dual-eligible (Medicare + Medicaid) SNP.
    #[serde(rename = "D-SNP")]
    DualEligible,
    /// Institutional SNP.
    #[serde(rename = "I-SNP")]
    Institutional,
}

impl SnpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chronic => "C-SNP",
            Self::DualEligible => "D-SNP",
            Self::Institutional => "I-SNP",
        }
    }

    /// Parse a catalog label such as `"D-SNP"`, `"dsnp"` or `"D SNP"`.
    pub fn parse(s: &str) -> Option<Self> {
        let compact: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match compact.as_str() {
            "CSNP" => Some(Self::Chronic),
            "DSNP" => Some(Self::DualEligible),
            "ISNP" => Some(Self::Institutional),
            _ => None,
        }
    }
}

/// A plan as seen by the matcher and the comparison engine.
///
/// Benefit fields are optional because catalog records are routinely partial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub carrier_id: i64,
    pub name: String,
    #[serde(default)]
    pub state_code: Option<String>,
    /// Counties the plan is sold in. An empty list matches no client.
    #[serde(default)]
    pub counties: Vec<String>,
    #[serde(default)]
    pub monthly_premium: Option<f64>,
    /// In-network maximum out-of-pocket.
    #[serde(default)]
    pub moop: Option<f64>,
    #[serde(default)]
    pub pcp_copay: Option<f64>,
    #[serde(default)]
    pub specialist_copay: Option<f64>,
    #[serde(default)]
    pub snp_type: Option<SnpType>,
}

impl Plan {
    /// True when the plan lists `county` (trimmed, case-insensitive).
    pub fn serves_county(&self, county: &str) -> bool {
        let wanted = county.trim();
        !wanted.is_empty()
            && self
                .counties
                .iter()
                .any(|c| c.trim().eq_ignore_ascii_case(wanted))
    }

    /// True when the plan's state code equals `state` (trimmed, case-insensitive).
    pub fn in_state(&self, state: &str) -> bool {
        self.state_code
            .as_deref()
            .is_some_and(|s| s.trim().eq_ignore_ascii_case(state.trim()))
    }
}

/// Carriers and plans supplied together by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub carriers: Vec<Carrier>,
    #[serde(default)]
    pub plans: Vec<Plan>,
}

impl Catalog {
    pub fn new(carriers: Vec<Carrier>, plans: Vec<Plan>) -> Self {
        Self { carriers, plans }
    }

    pub fn carrier(&self, id: i64) -> Option<&Carrier> {
        self.carriers.iter().find(|c| c.id == id)
    }

    pub fn plan(&self, id: i64) -> Option<&Plan> {
        self.plans.iter().find(|p| p.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.carriers.is_empty() && self.plans.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_in(counties: &[&str]) -> Plan {
        Plan {
            id: 1,
            carrier_id: 1,
            name: "Test Plan".into(),
            state_code: Some("WA".into()),
            counties: counties.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn county_match_ignores_case_and_padding() {
        let plan = plan_in(&["King", " Pierce "]);
        assert!(plan.serves_county("king"));
        assert!(plan.serves_county("  PIERCE"));
        assert!(!plan.serves_county("Snohomish"));
    }

    #[test]
    fn empty_county_list_serves_nobody() {
        let plan = plan_in(&[]);
        assert!(!plan.serves_county("King"));
    }

    #[test]
    fn blank_county_never_matches() {
        let plan = plan_in(&["King"]);
        assert!(!plan.serves_county("   "));
    }

    #[test]
    fn state_match() {
        let plan = plan_in(&["King"]);
        assert!(plan.in_state("wa"));
        assert!(!plan.in_state("OR"));

        let stateless = Plan {
            state_code: None,
            ..plan
        };
        assert!(!stateless.in_state("WA"));
    }

    #[test]
    fn snp_type_parse_variants() {
        assert_eq!(SnpType::parse("C-SNP"), Some(SnpType::Chronic));
        assert_eq!(SnpType::parse("dsnp"), Some(SnpType::DualEligible));
        assert_eq!(SnpType::parse("I SNP"), Some(SnpType::Institutional));
        assert_eq!(SnpType::parse("HMO"), None);
    }

    #[test]
    fn catalog_json_with_partial_plans() {
        let json = r#"{
            "carriers": [{"id": 7, "name": "Humana"}],
            "plans": [
                {"id": 70, "carrier_id": 7, "name": "Humana Gold Plus H1036-236",
                 "state_code": "WA", "counties": ["King"], "moop": 4900.0,
                 "snp_type": "D-SNP"},
                {"id": 71, "carrier_id": 7, "name": "Humana Basic"}
            ]
        }"#;
        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.carrier(7).unwrap().name, "Humana");
        let gold = catalog.plan(70).unwrap();
        assert_eq!(gold.snp_type, Some(SnpType::DualEligible));
        assert_eq!(gold.moop, Some(4900.0));
        let basic = catalog.plan(71).unwrap();
        assert!(basic.counties.is_empty());
        assert!(basic.monthly_premium.is_none());
    }
}
