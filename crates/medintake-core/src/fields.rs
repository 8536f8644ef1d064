//! Partial field records produced by the pattern-bank parsers.
//!
//! Every field is optional: partial extraction is the normal outcome, and an
//! absent field means no pattern matched, never an error.

use serde::{Deserialize, Serialize};

use crate::normalize::split_tier_amount;

/// Whether a drug-tier amount is a flat copay or coinsurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountKind {
    #[serde(rename = "$")]
    Dollar,
    #[serde(rename = "%")]
    Percent,
}

impl AmountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dollar => "$",
            Self::Percent => "%",
        }
    }
}

// ── Benefit fields (Summary of Benefits) ──

/// Benefit fields read from Summary-of-Benefits text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BenefitField {
    MonthlyPremium,
    AnnualDeductible,
    MoopInNetwork,
    MoopOutOfNetwork,
    PartBGiveback,
    PcpCopay,
    SpecialistCopay,
    EmergencyCopay,
    UrgentCareCopay,
    InpatientCopay,
    DentalAllowance,
    DentalFrequency,
    OtcAllowance,
    OtcFrequency,
    FitnessAllowance,
    FitnessFrequency,
    Tier1,
    Tier2,
    Tier3,
    Tier4,
    Tier5,
    RxDeductible,
    RxDeductibleTiers,
    MedicaidLevel,
    ServiceAreaCounties,
    NetworksIncluded,
    NetworksExcluded,
}

impl BenefitField {
    pub const ALL: [BenefitField; 27] = [
        Self::MonthlyPremium,
        Self::AnnualDeductible,
        Self::MoopInNetwork,
        Self::MoopOutOfNetwork,
        Self::PartBGiveback,
        Self::PcpCopay,
        Self::SpecialistCopay,
        Self::EmergencyCopay,
        Self::UrgentCareCopay,
        Self::InpatientCopay,
        Self::DentalAllowance,
        Self::DentalFrequency,
        Self::OtcAllowance,
        Self::OtcFrequency,
        Self::FitnessAllowance,
        Self::FitnessFrequency,
        Self::Tier1,
        Self::Tier2,
        Self::Tier3,
        Self::Tier4,
        Self::Tier5,
        Self::RxDeductible,
        Self::RxDeductibleTiers,
        Self::MedicaidLevel,
        Self::ServiceAreaCounties,
        Self::NetworksIncluded,
        Self::NetworksExcluded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MonthlyPremium => "monthly_premium",
            Self::AnnualDeductible => "annual_deductible",
            Self::MoopInNetwork => "moop_in_network",
            Self::MoopOutOfNetwork => "moop_out_of_network",
            Self::PartBGiveback => "part_b_giveback",
            Self::PcpCopay => "pcp_copay",
            Self::SpecialistCopay => "specialist_copay",
            Self::EmergencyCopay => "emergency_copay",
            Self::UrgentCareCopay => "urgent_care_copay",
            Self::InpatientCopay => "inpatient_copay",
            Self::DentalAllowance => "dental_allowance",
            Self::DentalFrequency => "dental_frequency",
            Self::OtcAllowance => "otc_allowance",
            Self::OtcFrequency => "otc_frequency",
            Self::FitnessAllowance => "fitness_allowance",
            Self::FitnessFrequency => "fitness_frequency",
            Self::Tier1 => "tier1_value",
            Self::Tier2 => "tier2_value",
            Self::Tier3 => "tier3_value",
            Self::Tier4 => "tier4_value",
            Self::Tier5 => "tier5_value",
            Self::RxDeductible => "rx_deductible",
            Self::RxDeductibleTiers => "rx_deductible_tiers",
            Self::MedicaidLevel => "medicaid_level",
            Self::ServiceAreaCounties => "service_area_counties",
            Self::NetworksIncluded => "networks_included",
            Self::NetworksExcluded => "networks_excluded",
        }
    }

    /// Drug tier number (1–5) for tier fields.
    pub fn tier(&self) -> Option<u8> {
        match self {
            Self::Tier1 => Some(1),
            Self::Tier2 => Some(2),
            Self::Tier3 => Some(3),
            Self::Tier4 => Some(4),
            Self::Tier5 => Some(5),
            _ => None,
        }
    }
}

impl std::fmt::Display for BenefitField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Benefit values extracted from one Summary of Benefits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenefitFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_premium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_deductible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moop_in_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moop_out_of_network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_b_giveback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcp_copay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialist_copay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_copay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgent_care_copay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inpatient_copay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_allowance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dental_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otc_allowance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otc_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_allowance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fitness_frequency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier1_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier1_type: Option<AmountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier2_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier2_type: Option<AmountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier3_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier3_type: Option<AmountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier4_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier4_type: Option<AmountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier5_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier5_type: Option<AmountKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_deductible: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx_deductible_tiers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicaid_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_area_counties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks_included: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networks_excluded: Option<String>,
}

impl BenefitFields {
    /// Record a captured value.
    ///
    /// Tier fields are split into a numeric value and a `$`/`%` type tag.
    pub fn set(&mut self, field: BenefitField, value: String) {
        if let Some(tier) = field.tier() {
            let (amount, kind) = split_tier_amount(&value);
            *self.slot_mut(field) = Some(amount);
            *self.tier_type_mut(tier) = Some(kind);
        } else {
            *self.slot_mut(field) = Some(value);
        }
    }

    pub fn get(&self, field: BenefitField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Type tag recorded for a drug tier (1–5).
    pub fn tier_type(&self, tier: u8) -> Option<AmountKind> {
        match tier {
            1 => self.tier1_type,
            2 => self.tier2_type,
            3 => self.tier3_type,
            4 => self.tier4_type,
            5 => self.tier5_type,
            _ => None,
        }
    }

    /// Present fields in declaration order, tier type tags included.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        for field in BenefitField::ALL {
            if let Some(v) = self.get(field) {
                out.push((field.as_str(), v.to_string()));
            }
            if let Some(tier) = field.tier()
                && let Some(kind) = self.tier_type(tier)
            {
                out.push((TIER_TYPE_NAMES[usize::from(tier) - 1], kind.as_str().to_string()));
            }
        }
        out
    }

    /// Number of fields with a value (type tags not counted).
    pub fn len(&self) -> usize {
        BenefitField::ALL
            .iter()
            .filter(|f| self.get(**f).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, field: BenefitField) -> &Option<String> {
        match field {
            BenefitField::MonthlyPremium => &self.monthly_premium,
            BenefitField::AnnualDeductible => &self.annual_deductible,
            BenefitField::MoopInNetwork => &self.moop_in_network,
            BenefitField::MoopOutOfNetwork => &self.moop_out_of_network,
            BenefitField::PartBGiveback => &self.part_b_giveback,
            BenefitField::PcpCopay => &self.pcp_copay,
            BenefitField::SpecialistCopay => &self.specialist_copay,
            BenefitField::EmergencyCopay => &self.emergency_copay,
            BenefitField::UrgentCareCopay => &self.urgent_care_copay,
            BenefitField::InpatientCopay => &self.inpatient_copay,
            BenefitField::DentalAllowance => &self.dental_allowance,
            BenefitField::DentalFrequency => &self.dental_frequency,
            BenefitField::OtcAllowance => &self.otc_allowance,
            BenefitField::OtcFrequency => &self.otc_frequency,
            BenefitField::FitnessAllowance => &self.fitness_allowance,
            BenefitField::FitnessFrequency => &self.fitness_frequency,
            BenefitField::Tier1 => &self.tier1_value,
            BenefitField::Tier2 => &self.tier2_value,
            BenefitField::Tier3 => &self.tier3_value,
            BenefitField::Tier4 => &self.tier4_value,
            BenefitField::Tier5 => &self.tier5_value,
            BenefitField::RxDeductible => &self.rx_deductible,
            BenefitField::RxDeductibleTiers => &self.rx_deductible_tiers,
            BenefitField::MedicaidLevel => &self.medicaid_level,
            BenefitField::ServiceAreaCounties => &self.service_area_counties,
            BenefitField::NetworksIncluded => &self.networks_included,
            BenefitField::NetworksExcluded => &self.networks_excluded,
        }
    }

    fn slot_mut(&mut self, field: BenefitField) -> &mut Option<String> {
        match field {
            BenefitField::MonthlyPremium => &mut self.monthly_premium,
            BenefitField::AnnualDeductible => &mut self.annual_deductible,
            BenefitField::MoopInNetwork => &mut self.moop_in_network,
            BenefitField::MoopOutOfNetwork => &mut self.moop_out_of_network,
            BenefitField::PartBGiveback => &mut self.part_b_giveback,
            BenefitField::PcpCopay => &mut self.pcp_copay,
            BenefitField::SpecialistCopay => &mut self.specialist_copay,
            BenefitField::EmergencyCopay => &mut self.emergency_copay,
            BenefitField::UrgentCareCopay => &mut self.urgent_care_copay,
            BenefitField::InpatientCopay => &mut self.inpatient_copay,
            BenefitField::DentalAllowance => &mut self.dental_allowance,
            BenefitField::DentalFrequency => &mut self.dental_frequency,
            BenefitField::OtcAllowance => &mut self.otc_allowance,
            BenefitField::OtcFrequency => &mut self.otc_frequency,
            BenefitField::FitnessAllowance => &mut self.fitness_allowance,
            BenefitField::FitnessFrequency => &mut self.fitness_frequency,
            BenefitField::Tier1 => &mut self.tier1_value,
            BenefitField::Tier2 => &mut self.tier2_value,
            BenefitField::Tier3 => &mut self.tier3_value,
            BenefitField::Tier4 => &mut self.tier4_value,
            BenefitField::Tier5 => &mut self.tier5_value,
            BenefitField::RxDeductible => &mut self.rx_deductible,
            BenefitField::RxDeductibleTiers => &mut self.rx_deductible_tiers,
            BenefitField::MedicaidLevel => &mut self.medicaid_level,
            BenefitField::ServiceAreaCounties => &mut self.service_area_counties,
            BenefitField::NetworksIncluded => &mut self.networks_included,
            BenefitField::NetworksExcluded => &mut self.networks_excluded,
        }
    }

    fn tier_type_mut(&mut self, tier: u8) -> &mut Option<AmountKind> {
        match tier {
            1 => &mut self.tier1_type,
            2 => &mut self.tier2_type,
            3 => &mut self.tier3_type,
            4 => &mut self.tier4_type,
            _ => &mut self.tier5_type,
        }
    }
}

const TIER_TYPE_NAMES: [&str; 5] = [
    "tier1_type",
    "tier2_type",
    "tier3_type",
    "tier4_type",
    "tier5_type",
];

// ── Intake fields (client identity) ──

/// Personal-identity fields read from any uploaded client document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntakeField {
    Name,
    MedicareNumber,
    Ssn,
    Phone,
    BirthDate,
    Address,
    City,
    State,
    Zip,
    PartAStart,
    PartBStart,
}

impl IntakeField {
    pub const ALL: [IntakeField; 11] = [
        Self::Name,
        Self::MedicareNumber,
        Self::Ssn,
        Self::Phone,
        Self::BirthDate,
        Self::Address,
        Self::City,
        Self::State,
        Self::Zip,
        Self::PartAStart,
        Self::PartBStart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::MedicareNumber => "medicare_number",
            Self::Ssn => "ssn",
            Self::Phone => "phone",
            Self::BirthDate => "birth_date",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::Zip => "zip",
            Self::PartAStart => "part_a_start",
            Self::PartBStart => "part_b_start",
        }
    }
}

impl std::fmt::Display for IntakeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity values extracted from a client document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medicare_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_a_start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_b_start: Option<String>,
}

impl IntakeFields {
    pub fn set(&mut self, field: IntakeField, value: String) {
        *self.slot_mut(field) = Some(value);
    }

    pub fn get(&self, field: IntakeField) -> Option<&str> {
        match field {
            IntakeField::Name => self.name.as_deref(),
            IntakeField::MedicareNumber => self.medicare_number.as_deref(),
            IntakeField::Ssn => self.ssn.as_deref(),
            IntakeField::Phone => self.phone.as_deref(),
            IntakeField::BirthDate => self.birth_date.as_deref(),
            IntakeField::Address => self.address.as_deref(),
            IntakeField::City => self.city.as_deref(),
            IntakeField::State => self.state.as_deref(),
            IntakeField::Zip => self.zip.as_deref(),
            IntakeField::PartAStart => self.part_a_start.as_deref(),
            IntakeField::PartBStart => self.part_b_start.as_deref(),
        }
    }

    pub fn entries(&self) -> Vec<(&'static str, String)> {
        IntakeField::ALL
            .iter()
            .filter_map(|f| self.get(*f).map(|v| (f.as_str(), v.to_string())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        IntakeField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    fn slot_mut(&mut self, field: IntakeField) -> &mut Option<String> {
        match field {
            IntakeField::Name => &mut self.name,
            IntakeField::MedicareNumber => &mut self.medicare_number,
            IntakeField::Ssn => &mut self.ssn,
            IntakeField::Phone => &mut self.phone,
            IntakeField::BirthDate => &mut self.birth_date,
            IntakeField::Address => &mut self.address,
            IntakeField::City => &mut self.city,
            IntakeField::State => &mut self.state,
            IntakeField::Zip => &mut self.zip,
            IntakeField::PartAStart => &mut self.part_a_start,
            IntakeField::PartBStart => &mut self.part_b_start,
        }
    }
}
