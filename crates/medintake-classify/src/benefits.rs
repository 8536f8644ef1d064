//! Benefit-field extraction from Summary-of-Benefits text.
//!
//! Each field has an ordered list of phrasings. The drug-tier fallbacks match
//! on tier names ("generic", "preferred brand") and those names overlap
//! ("Preferred Generic" contains "generic", "Non-Preferred Brand" contains
//! "preferred brand"); the numbered-tier pattern is listed first in every tier
//! so that well-labelled tables never reach the name fallbacks.

use medintake_core::{BenefitField, BenefitFields};
use tracing::debug;

use crate::ClassifyError;
use crate::patterns::{PatternBank, PostProcess as P, RuleRow};

use medintake_core::BenefitField as B;

const BENEFIT_RULES: &[RuleRow<'static, BenefitField>] = &[
    // ── Plan costs ──
    (
        B::MonthlyPremium,
        P::Currency,
        &[
            r"(?i)monthly\s+plan\s+premium[:\s]*\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)monthly\s+premium[:\s]*\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)plan\s+premium[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)premium[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)\s*(?:per|a|/)\s*month",
        ],
    ),
    (
        B::AnnualDeductible,
        P::Currency,
        &[
            r"(?i)annual\s+(?:medical\s+)?deductible[:\s]*\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)(?:medical|health\s+plan)\s+deductible[:\s]*\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)(?:^|\n)[\t ]*deductible[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::MoopInNetwork,
        P::Currency,
        &[
            r"(?i)max(?:imum)?\.?\s+out[-\s]of[-\s]pocket[^$\n]{0,80}?in[-\s]network[^$\n]{0,20}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)in[-\s]network\s+max(?:imum)?\.?\s+out[-\s]of[-\s]pocket[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)out[-\s]of[-\s]pocket[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)\s*\(?\s*(?:for\s+)?in[-\s]network",
            r"(?i)(?:max(?:imum)?\.?\s+out[-\s]of[-\s]pocket|\bMOOP\b)[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::MoopOutOfNetwork,
        P::Currency,
        &[
            r"(?i)max(?:imum)?\.?\s+out[-\s]of[-\s]pocket[^$\n]{0,80}?(?:out[-\s]of[-\s]network|combined)[^$\n]{0,20}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)out[-\s]of[-\s]pocket[^\n]{0,120}?(?:out[-\s]of[-\s]network|combined)[^$\n]{0,20}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)out[-\s]of[-\s]network\s+max(?:imum)?\.?\s+out[-\s]of[-\s]pocket[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::PartBGiveback,
        P::Currency,
        &[
            r"(?i)part\s+b\s+(?:premium\s+)?(?:giveback|give\s+back|reduction|buy[-\s]?down|rebate)[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)(?:reduces?|lowers?)\s+your\s+(?:monthly\s+)?part\s+b\s+premium[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)giveback[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    // ── Copays ──
    (
        B::PcpCopay,
        P::Currency,
        &[
            r"(?i)primary\s+care[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)\bPCP\b[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)doctor(?:'s)?\s+(?:office\s+)?visits?[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::SpecialistCopay,
        P::Currency,
        &[r"(?i)specialists?(?:\s+visits?)?[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)"],
    ),
    (
        B::EmergencyCopay,
        P::Currency,
        &[
            r"(?i)emergency\s+(?:room|care|department)[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)\bER\b[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::UrgentCareCopay,
        P::Currency,
        &[r"(?i)urgent(?:ly\s+needed)?\s+(?:care|services)[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)"],
    ),
    (
        B::InpatientCopay,
        P::Currency,
        &[
            r"(?i)inpatient\s+hospital[^$\n]{0,80}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)inpatient[^$\n]{0,60}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    // ── Supplemental allowances ──
    (
        B::DentalAllowance,
        P::Currency,
        &[
            r"(?i)dental[^$\n]{0,80}?(?:allowance|maximum|benefit|up\s+to)[^$\n]{0,20}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)dental[^$\n]{0,80}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::DentalFrequency,
        P::Frequency,
        &[
            r"(?i)dental[^$\n]{0,80}?\$\s?[\d,]+(?:\.\d{1,2})?\s*(?:(?:per|a|an|each|every|/)\s*)?(calendar\s+year|year|annually|quarter|month)",
        ],
    ),
    (
        B::OtcAllowance,
        P::Currency,
        &[
            r"(?i)(?:over[-\s]the[-\s]counter|\bOTC\b)[^$\n]{0,80}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::OtcFrequency,
        P::Frequency,
        &[
            r"(?i)(?:over[-\s]the[-\s]counter|\bOTC\b)[^$\n]{0,80}?\$\s?[\d,]+(?:\.\d{1,2})?\s*(?:(?:per|a|an|each|every|/)\s*)?(calendar\s+year|year|annually|quarter|month)",
        ],
    ),
    (
        B::FitnessAllowance,
        P::Currency,
        &[
            r"(?i)(?:fitness|gym\s+membership|silver\s*sneakers|renew\s+active)[^$\n]{0,80}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::FitnessFrequency,
        P::Frequency,
        &[
            r"(?i)(?:fitness|gym\s+membership|silver\s*sneakers|renew\s+active)[^$\n]{0,80}?\$\s?[\d,]+(?:\.\d{1,2})?\s*(?:(?:per|a|an|each|every|/)\s*)?(calendar\s+year|year|annually|quarter|month)",
        ],
    ),
    // ── Part D drug tiers ──
    (
        B::Tier1,
        P::TierAmount,
        &[
            r"(?i)tier\s*1\b[^$%\n]{0,80}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
            r"(?i)preferred\s+generic[^$%\n]{0,60}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
        ],
    ),
    (
        B::Tier2,
        P::TierAmount,
        &[
            r"(?i)tier\s*2\b[^$%\n]{0,80}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
            r"(?i)\bgeneric[^$%\n]{0,60}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
        ],
    ),
    (
        B::Tier3,
        P::TierAmount,
        &[
            r"(?i)tier\s*3\b[^$%\n]{0,80}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
            r"(?i)preferred\s+brand[^$%\n]{0,60}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
        ],
    ),
    (
        B::Tier4,
        P::TierAmount,
        &[
            r"(?i)tier\s*4\b[^$%\n]{0,80}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
            r"(?i)non[-\s]?preferred\s+(?:brand|drug)s?[^$%\n]{0,60}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
        ],
    ),
    (
        B::Tier5,
        P::TierAmount,
        &[
            r"(?i)tier\s*5\b[^$%\n]{0,80}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
            r"(?i)specialty(?:\s+tier)?[^$%\n]{0,60}?(\$\s?[\d,]+(?:\.\d{1,2})?|\d{1,3}(?:\.\d+)?\s?%)",
        ],
    ),
    (
        B::RxDeductible,
        P::Currency,
        &[
            r"(?i)(?:prescription|part\s+d|rx)\s+(?:drug\s+)?deductible[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
            r"(?i)drug\s+deductible[^$\n]{0,40}?\$\s?([\d,]+(?:\.\d{1,2})?)",
        ],
    ),
    (
        B::RxDeductibleTiers,
        P::TierRange,
        &[
            r"(?i)deductible[^\n]{0,60}?tiers?\s*(\d)\s*(?:-|–|through|to|and)\s*(\d)",
            r"(?i)tiers?\s*(\d)\s*(?:-|–|through|to|and)\s*(\d)[^\n]{0,60}?deductible",
            r"(?i)deductible\s+(?:only\s+)?applies\s+(?:only\s+)?to\s+tier\s*(\d)\b",
        ],
    ),
    // ── Eligibility and coverage area ──
    (
        B::MedicaidLevel,
        P::Upper,
        &[
            r"(?i)medicaid\s+(?:level|category)[:\t ]+([^\n,;]{2,30})",
            r"(?i)\b(QMB\+|SLMB\+|QMB|SLMB|QDWI|FBDE)",
            r"(?i)\b(full(?:[-\s]benefit)?\s+dual(?:[-\s]eligible)?)",
        ],
    ),
    (
        B::ServiceAreaCounties,
        P::List,
        &[
            r"(?i)service\s+area[^:\n]{0,60}:[\t ]*([^\n]+)",
            r"(?i)available\s+in\s+(?:the\s+following\s+)?counties[:\t ]+([^\n]+)",
            r"(?i)counties[:\t ]+([^\n]+)",
        ],
    ),
    (
        B::NetworksIncluded,
        P::List,
        &[
            r"(?i)(?:^|\n)[\t ]*(?:in[-\s]network|participating)\s+(?:hospitals?|health\s+systems?|provider\s+groups?|networks?)[:\t ]+([^\n]+)",
            r"(?i)network\s+includes?[:\t ]+([^\n]+)",
        ],
    ),
    (
        B::NetworksExcluded,
        P::List,
        &[
            r"(?i)(?:not\s+in[-\s]network|non[-\s]participating|excluded)\s+(?:hospitals?|health\s+systems?|provider\s+groups?|networks?)[:\t ]+([^\n]+)",
            r"(?i)network\s+(?:excludes?|does\s+not\s+include)[:\t ]+([^\n]+)",
        ],
    ),
];

/// Reads benefit fields out of Summary-of-Benefits text.
#[derive(Debug)]
pub struct BenefitParser {
    bank: PatternBank<BenefitField>,
}

impl BenefitParser {
    pub fn new() -> Result<Self, ClassifyError> {
        Ok(Self {
            bank: PatternBank::build(BENEFIT_RULES)?,
        })
    }

    pub fn bank(&self) -> &PatternBank<BenefitField> {
        &self.bank
    }

    /// Extract every field the text supports; absent fields stay `None`.
    pub fn parse(&self, text: &str) -> BenefitFields {
        let mut fields = BenefitFields::default();
        for (field, value) in self.bank.extract(text) {
            fields.set(field, value);
        }
        debug!(fields = fields.len(), "extracted benefit fields");
        fields
    }
}
