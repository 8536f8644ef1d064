//! Client identity extraction (Medicare card, ID, intake forms).

use medintake_core::{IntakeField, IntakeFields};
use tracing::debug;

use crate::ClassifyError;
use crate::patterns::{PatternBank, PostProcess as P, RuleRow};

use medintake_core::IntakeField as I;

const INTAKE_RULES: &[RuleRow<'static, IntakeField>] = &[
    (
        I::Name,
        P::Text,
        &[
            r"(?i)(?:beneficiary|member|patient|client|applicant)(?:'s)?\s+name[:\t ]+([A-Za-z][A-Za-z'.\-]*(?:[\t ]+[A-Za-z][A-Za-z'.\-]*){1,3})",
            r"(?i)name\s*/\s*nombre[:\t ]*\n?[\t ]*([A-Za-z][A-Za-z'.\-]*(?:[\t ]+[A-Za-z][A-Za-z'.\-]*){1,3})",
            r"(?i)(?:^|\n)[\t ]*(?:full\s+)?name[:\t ]+([A-Za-z][A-Za-z'.\-]*(?:[\t ]+[A-Za-z][A-Za-z'.\-]*){1,3})",
        ],
    ),
    (
        I::MedicareNumber,
        P::Upper,
        &[
            r"(?i)(?:medicare\s+(?:number|no\.?|#|id)|\bMBI\b)[:\s#/]*([1-9][A-Z][A-Z0-9]\d-?[A-Z][A-Z0-9]\d-?[A-Z]{2}\d{2})\b",
            r"(?i)medicare\s+(?:claim\s+)?(?:number|no\.?|#)[:\s#]*(\d{3}-?\d{2}-?\d{4}-?[A-Z]\d?)\b",
            r"\b([1-9][A-Z][A-Z0-9]\d-?[A-Z][A-Z0-9]\d-?[A-Z]{2}\d{2})\b",
        ],
    ),
    (
        I::Ssn,
        P::Ssn,
        &[
            r"(?i)(?:\bSSN\b|social\s+security(?:\s+(?:number|no\.?|#))?)[:\s#]*(\d{3}[-\s]?\d{2}[-\s]?\d{4})\b",
            r"\b(\d{3}-\d{2}-\d{4})\b",
        ],
    ),
    (
        I::Phone,
        P::Phone,
        &[
            r"(?i)(?:phone|tel(?:ephone)?|cell|mobile)(?:\s+(?:number|no\.?|#))?[:\s#]*(\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})\b",
            r"(\(\d{3}\)\s?\d{3}[-.\s]?\d{4})\b",
            r"\b(\d{3}[-.]\d{3}[-.]\d{4})\b",
        ],
    ),
    (
        I::BirthDate,
        P::Text,
        &[
            r"(?i)(?:date\s+of\s+birth|birth\s*date|\bDOB\b|\bborn)[:\s]*(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})",
            r"(?i)(?:date\s+of\s+birth|birth\s*date|\bDOB\b)[:\s]*((?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{1,2},?\s+\d{4})",
        ],
    ),
    (
        I::Address,
        P::Text,
        &[
            r"(?i)(?:street|mailing|home|residential)?\s*address[:\t ]+(\d+[^\n,]*)",
            r"(?i)\b(\d{1,6}(?:[\t ]+[A-Za-z0-9.#]+){1,5}?[\t ]+(?:st|street|ave|avenue|rd|road|blvd|boulevard|dr|drive|ln|lane|ct|court|way|pl|place|pkwy|parkway|hwy|highway)\b\.?(?:[\t ]+(?:apt|unit|ste|suite|#)\.?[\t ]*[A-Za-z0-9\-]+)?)",
        ],
    ),
    (
        I::City,
        P::Text,
        &[
            r"(?i)\bcity[:\t ]+([A-Za-z][A-Za-z.'\-]*(?:[\t ]+[A-Za-z][A-Za-z.'\-]*){0,3})",
            r"([A-Z][A-Za-z.'\-]*(?:[\t ]+[A-Z][A-Za-z.'\-]*){0,3}),[\t ]*[A-Z]{2}[\t ]+\d{5}",
        ],
    ),
    (
        I::State,
        P::Upper,
        &[
            r"(?i)\bstate[:\t ]+([A-Z]{2})\b",
            r"[A-Za-z],[\t ]*([A-Z]{2})[\t ]+\d{5}",
        ],
    ),
    (
        I::Zip,
        P::Text,
        &[
            r"(?i)\bzip(?:\s*code)?[:\t ]+(\d{5}(?:-\d{4})?)\b",
            r"\b[A-Z]{2}[\t ]+(\d{5}(?:-\d{4})?)\b",
        ],
    ),
    (
        I::PartAStart,
        P::Text,
        &[r"(?i)(?:hospital\s*\(?\s*part\s*a\s*\)?|part\s+a)[^\n\d]{0,40}(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"],
    ),
    (
        I::PartBStart,
        P::Text,
        &[r"(?i)(?:medical\s*\(?\s*part\s*b\s*\)?|part\s+b)[^\n\d]{0,40}(\d{1,2}[/-]\d{1,2}[/-]\d{2,4})"],
    ),
];

/// Reads client identity fields out of any document's text.
#[derive(Debug)]
pub struct IntakeParser {
    bank: PatternBank<IntakeField>,
}

impl IntakeParser {
    pub fn new() -> Result<Self, ClassifyError> {
        Ok(Self {
            bank: PatternBank::build(INTAKE_RULES)?,
        })
    }

    pub fn bank(&self) -> &PatternBank<IntakeField> {
        &self.bank
    }

    pub fn parse(&self, text: &str) -> IntakeFields {
        let mut fields = IntakeFields::default();
        for (field, value) in self.bank.extract(text) {
            fields.set(field, value);
        }
        debug!(fields = fields.entries().len(), "extracted intake fields");
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> IntakeParser {
        IntakeParser::new().unwrap()
    }

    #[test]
    fn medicare_card() {
        let text = "MEDICARE HEALTH INSURANCE\n\
                    Name/Nombre\n\
                    JANE Q PUBLIC\n\
                    Medicare Number/Número de Medicare\n\
                    1EG4-TE5-MK73\n\
                    Entitled to          Coverage starts\n\
                    HOSPITAL (PART A)    03-01-2016\n\
                    MEDICAL (PART B)     03-01-2016\n";
        let fields = parser().parse(text);
        assert_eq!(fields.name.as_deref(), Some("JANE Q PUBLIC"));
        assert_eq!(fields.medicare_number.as_deref(), Some("1EG4-TE5-MK73"));
        assert_eq!(fields.part_a_start.as_deref(), Some("03-01-2016"));
        assert_eq!(fields.part_b_start.as_deref(), Some("03-01-2016"));
    }

    #[test]
    fn intake_form_normalises_ssn_and_phone() {
        let text = "Client name: John Smith\n\
                    SSN: 123 45 6789\n\
                    Phone: 555.867.5309\n\
                    DOB: 04/12/1955\n";
        let fields = parser().parse(text);
        assert_eq!(fields.name.as_deref(), Some("John Smith"));
        assert_eq!(fields.ssn.as_deref(), Some("123-45-6789"));
        assert_eq!(fields.phone.as_deref(), Some("(555) 867-5309"));
        assert_eq!(fields.birth_date.as_deref(), Some("04/12/1955"));
    }

    #[test]
    fn mailing_line_gives_city_state_zip() {
        let text = "Address: 42 Elm Street\nSpringfield, IL 62704\n";
        let fields = parser().parse(text);
        assert_eq!(fields.address.as_deref(), Some("42 Elm Street"));
        assert_eq!(fields.city.as_deref(), Some("Springfield"));
        assert_eq!(fields.state.as_deref(), Some("IL"));
        assert_eq!(fields.zip.as_deref(), Some("62704"));
    }

    #[test]
    fn nothing_found_is_empty() {
        assert!(parser().parse("lorem ipsum dolor").is_empty());
    }
}
