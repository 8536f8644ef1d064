//! Ordered regular-expression banks, one list of patterns per field.
//!
//! For each field the patterns are tried in order against the whole text and
//! the first pattern that matches wins; later patterns are never consulted and
//! there is no scoring between them. Ordering is therefore part of the
//! behaviour: the most specific phrasing goes first.

use std::fmt::Display;

use regex::{Captures, Regex};
use tracing::trace;

use medintake_core::normalize::{
    collapse_whitespace, normalize_frequency, normalize_list, normalize_phone, normalize_ssn,
    strip_currency,
};

use crate::ClassifyError;

/// How a captured value is cleaned before it is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostProcess {
    /// Collapse whitespace.
    Text,
    /// Collapse whitespace and uppercase.
    Upper,
    /// Drop `$`, thousands separators and whitespace.
    Currency,
    /// `XXX-XX-XXXX`.
    Ssn,
    /// `(XXX) XXX-XXXX`.
    Phone,
    /// Keep the `$` or `%` marker, drop separators; the record splits it later.
    TierAmount,
    /// `yearly` / `quarterly` / `monthly`.
    Frequency,
    /// Groups 1 and 2 joined as `a-b`, or group 1 alone.
    TierRange,
    /// Comma/semicolon list, items trimmed.
    List,
}

impl PostProcess {
    /// Clean the captures of a winning match. `None` when the value is empty.
    pub fn apply(&self, caps: &Captures<'_>) -> Option<String> {
        let first = caps.get(1)?.as_str();
        let value = match self {
            Self::Text => collapse_whitespace(first),
            Self::Upper => collapse_whitespace(first).to_ascii_uppercase(),
            Self::Currency => strip_currency(first),
            Self::Ssn => normalize_ssn(first),
            Self::Phone => normalize_phone(first),
            Self::TierAmount => first
                .chars()
                .filter(|c| *c != ',' && !c.is_whitespace())
                .collect(),
            Self::Frequency => normalize_frequency(first),
            Self::TierRange => match caps.get(2) {
                Some(end) => format!("{}-{}", first.trim(), end.as_str().trim()),
                None => first.trim().to_string(),
            },
            Self::List => normalize_list(first),
        };
        (!value.is_empty()).then_some(value)
    }
}

/// One field's ordered pattern list, as written in a bank table.
pub type RuleRow<'a, F> = (F, PostProcess, &'a [&'a str]);

/// The compiled, ordered patterns for one field.
#[derive(Debug)]
pub struct FieldRule<F> {
    field: F,
    post: PostProcess,
    patterns: Vec<Regex>,
}

impl<F: Copy + Display> FieldRule<F> {
    pub fn new(field: F, post: PostProcess, patterns: &[&str]) -> Result<Self, ClassifyError> {
        let patterns = patterns
            .iter()
            .map(|p| {
                Regex::new(p).map_err(|source| ClassifyError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            field,
            post,
            patterns,
        })
    }

    pub fn field(&self) -> F {
        self.field
    }

    /// Pattern sources in evaluation order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|r| r.as_str())
    }

    /// Value of the first pattern that matches, with the index of that pattern.
    pub fn first_match(&self, text: &str) -> Option<(usize, String)> {
        for (index, pattern) in self.patterns.iter().enumerate() {
            if let Some(caps) = pattern.captures(text) {
                trace!(field = %self.field, pattern = index, "field matched");
                return self.post.apply(&caps).map(|v| (index, v));
            }
        }
        None
    }
}

/// An ordered set of field rules.
#[derive(Debug)]
pub struct PatternBank<F> {
    rules: Vec<FieldRule<F>>,
}

impl<F: Copy + Eq + Display> PatternBank<F> {
    /// Compile a bank from its table, keeping table order.
    pub fn build(table: &[RuleRow<'_, F>]) -> Result<Self, ClassifyError> {
        let rules = table
            .iter()
            .map(|(field, post, patterns)| FieldRule::new(*field, *post, patterns))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[FieldRule<F>] {
        &self.rules
    }

    pub fn rule(&self, field: F) -> Option<&FieldRule<F>> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Run every rule over `text`; fields with no match are simply left out.
    pub fn extract(&self, text: &str) -> Vec<(F, String)> {
        self.rules
            .iter()
            .filter_map(|rule| rule.first_match(text).map(|(_, v)| (rule.field, v)))
            .collect()
    }
}
