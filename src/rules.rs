//! Data-driven canonicalization rules per administrative level.
//!
//! Each level owns an ordered list of `(matcher, rewrite)` pairs. New
//! exceptions are added as data rather than branches. Every default rule
//! checks for the marker it would add, so applying a rule set to its own
//! output changes nothing.

use std::sync::LazyLock;

use regex::Regex;

use crate::data;
use crate::types::AdminLevel;

/// Any ASCII digit.
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").expect("valid regex"));

/// A whitespace-delimited token.
static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\S+").expect("valid regex"));

/// A token made only of ASCII digits.
static NUMERAL_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("valid regex"));

/// Decides whether a rule fires for a name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Matcher {
    /// The whole name equals the value
    Exact(String),
    /// The name contains the value
    Contains(String),
    /// The name starts with the value
    StartsWith(String),
    /// The name contains none of the values
    LacksAll(Vec<String>),
    /// The name contains an ASCII digit
    ContainsDigit,
}

impl Matcher {
    /// Check whether this matcher fires for `name`.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(value) => name == value,
            Matcher::Contains(value) => name.contains(value.as_str()),
            Matcher::StartsWith(value) => name.starts_with(value.as_str()),
            Matcher::LacksAll(values) => !values.iter().any(|v| name.contains(v.as_str())),
            Matcher::ContainsDigit => DIGIT_RE.is_match(name),
        }
    }
}

/// What a fired rule does to the name.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rewrite {
    /// Replace the whole name
    Replace(String),
    /// Prepend a prefix
    Prefix(String),
    /// Swap a leading prefix for another
    ReplacePrefix {
        /// Prefix to remove
        from: String,
        /// Prefix to insert
        to: String,
    },
    /// Replace the last all-digit token with its word form
    NumeralToWords,
}

impl Rewrite {
    /// Produce the rewritten name.
    pub fn rewrite(&self, name: &str) -> String {
        match self {
            Rewrite::Replace(value) => value.clone(),
            Rewrite::Prefix(prefix) => format!("{prefix}{name}"),
            Rewrite::ReplacePrefix { from, to } => match name.strip_prefix(from.as_str()) {
                Some(rest) => format!("{to}{rest}"),
                None => name.to_string(),
            },
            Rewrite::NumeralToWords => numeral_to_words(name),
        }
    }
}

/// Replace the last all-digit token of `name` with its ordinal word form.
///
/// Names without such a token, or with a number outside the ordinal table,
/// come back unchanged. Only the token itself is rewritten; surrounding
/// whitespace is preserved.
pub fn numeral_to_words(name: &str) -> String {
    let Some(token) = TOKEN_RE
        .find_iter(name)
        .filter(|m| NUMERAL_TOKEN_RE.is_match(m.as_str()))
        .last()
    else {
        return name.to_string();
    };
    let Some(word) = token.as_str().parse::<u32>().ok().and_then(data::ordinal_name) else {
        return name.to_string();
    };

    let mut rewritten = String::with_capacity(name.len() + word.len());
    rewritten.push_str(&name[..token.start()]);
    rewritten.push_str(word);
    rewritten.push_str(&name[token.end()..]);
    rewritten
}

/// One `(matcher, rewrite)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizationRule {
    /// When the rule fires
    pub matcher: Matcher,
    /// What it does
    pub rewrite: Rewrite,
}

impl NormalizationRule {
    /// Create a new rule.
    pub fn new(matcher: Matcher, rewrite: Rewrite) -> Self {
        Self { matcher, rewrite }
    }

    /// Apply the rule, returning `None` when it does not fire.
    pub fn apply(&self, name: &str) -> Option<String> {
        self.matcher
            .matches(name)
            .then(|| self.rewrite.rewrite(name))
    }
}

/// Ordered rules for one administrative level.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RuleSet {
    rules: Vec<NormalizationRule>,
}

impl RuleSet {
    /// Create a rule set from rules in application order.
    pub fn new(rules: Vec<NormalizationRule>) -> Self {
        Self { rules }
    }

    /// Rules in application order.
    pub fn rules(&self) -> &[NormalizationRule] {
        &self.rules
    }

    /// Check if there are no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, each seeing the previous rule's output.
    ///
    /// Empty names are returned untouched.
    pub fn apply(&self, name: &str) -> String {
        let mut current = name.trim().to_string();
        if current.is_empty() {
            return current;
        }

        for rule in &self.rules {
            if let Some(next) = rule.apply(&current) {
                current = next;
            }
        }
        current
    }
}

fn markers(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Rule sets for ward, district and city.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleBook {
    /// Ward rules
    pub ward: RuleSet,
    /// District rules
    pub district: RuleSet,
    /// City rules
    pub city: RuleSet,
}

impl RuleBook {
    /// The Vietnamese display-name conventions.
    pub fn vietnam() -> Self {
        let ward = RuleSet::new(vec![
            NormalizationRule::new(
                Matcher::StartsWith(data::WARD_ABBREVIATION.to_string()),
                Rewrite::ReplacePrefix {
                    from: data::WARD_ABBREVIATION.to_string(),
                    to: format!("{} ", data::WARD_MARKER),
                },
            ),
            NormalizationRule::new(
                Matcher::LacksAll(markers(data::WARD_MARKERS)),
                Rewrite::Prefix(format!("{} ", data::WARD_MARKER)),
            ),
        ]);

        let district = RuleSet::new(vec![
            NormalizationRule::new(
                Matcher::Contains(data::PHU_NHUAN_MISSPELLING.to_string()),
                Rewrite::Replace(data::PHU_NHUAN_CANONICAL.to_string()),
            ),
            NormalizationRule::new(
                Matcher::LacksAll(markers(data::DISTRICT_MARKERS)),
                Rewrite::Prefix(format!("{} ", data::DISTRICT_MARKER)),
            ),
            NormalizationRule::new(Matcher::ContainsDigit, Rewrite::NumeralToWords),
        ]);

        let mut city_rules: Vec<NormalizationRule> = data::CITY_OVERRIDES
            .iter()
            .map(|(raw, canonical)| {
                NormalizationRule::new(
                    Matcher::Exact(raw.to_string()),
                    Rewrite::Replace(canonical.to_string()),
                )
            })
            .collect();
        city_rules.push(NormalizationRule::new(
            Matcher::LacksAll(markers(data::CITY_MARKERS)),
            Rewrite::Prefix(format!("{} ", data::PROVINCE_MARKER)),
        ));

        Self {
            ward,
            district,
            city: RuleSet::new(city_rules),
        }
    }

    /// Rules for a level. Countries have none.
    pub fn for_level(&self, level: AdminLevel) -> Option<&RuleSet> {
        match level {
            AdminLevel::Ward => Some(&self.ward),
            AdminLevel::District => Some(&self.district),
            AdminLevel::City => Some(&self.city),
            AdminLevel::Country => None,
        }
    }

    /// Put `extra` rules ahead of the existing ones so they see raw names.
    pub fn prepend(&mut self, extra: RuleBook) {
        fn merge(target: &mut RuleSet, mut extra: RuleSet) {
            extra.rules.append(&mut target.rules);
            target.rules = extra.rules;
        }
        merge(&mut self.ward, extra.ward);
        merge(&mut self.district, extra.district);
        merge(&mut self.city, extra.city);
    }

    /// Canonicalize a name at the given level.
    pub fn apply(&self, level: AdminLevel, name: &str) -> String {
        let Some(rules) = self.for_level(level) else {
            return name.to_string();
        };
        let canonical = rules.apply(name);
        if canonical != name {
            log::debug!("{level} rules rewrote {name:?} -> {canonical:?}");
        }
        canonical
    }
}
