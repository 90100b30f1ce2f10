//! Conformance rules for SEP issues
//!
//! Each rule is pure and independent of the others:
//! - `TitleRule`: canonical `SEP-<number>: ` title prefix
//! - `LabelRule`: a state label and the `SEP` label
//! - `SectionRule`: required body sections
//!
//! `RuleSet` runs them in a fixed order, which is also the order of the
//! problems in the final report.

use crate::report::Problem;
use crate::types::{IssueData, IssueRef};

mod labels;
mod sections;
mod title;

pub use labels::{check_labels, LabelCheck, LabelRule, SEP_LABEL, SEP_STATES};
pub use sections::{missing_sections, SectionRule, REQUIRED_SECTIONS};
pub use title::{check_title, TitleCheck, TitleRule};

/// A single conformance check over a retrieved issue
pub trait Rule: Send + Sync + 'static {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Check the issue, returning a problem when it does not conform
    fn check(&self, issue: &IssueRef, data: &IssueData) -> Option<Problem>;
}

/// Ordered collection of rules
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleSet")
            .field("rules", &self.names())
            .finish()
    }
}

impl RuleSet {
    /// Create empty rule set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Title, labels, sections - in that order
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with_rule(TitleRule)
            .with_rule(LabelRule)
            .with_rule(SectionRule)
    }

    /// Append a rule; problems are reported in insertion order
    #[must_use]
    pub fn with_rule<R: Rule>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the registered rules in order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Number of registered rules
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule and collect problems in rule order
    #[must_use]
    pub fn check_all(&self, issue: &IssueRef, data: &IssueData) -> Vec<Problem> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let problem = rule.check(issue, data);
                tracing::debug!(
                    rule = rule.name(),
                    conforms = problem.is_none(),
                    "checked {}",
                    issue
                );
                problem
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct AlwaysFails(&'static str);

    impl Rule for AlwaysFails {
        fn name(&self) -> &'static str {
            self.0
        }

        fn check(&self, _issue: &IssueRef, _data: &IssueData) -> Option<Problem> {
            Some(Problem::new(self.0))
        }
    }

    #[test]
    fn standard_order() {
        assert_eq!(RuleSet::standard().names(), vec!["title", "labels", "sections"]);
    }

    #[test]
    fn problems_follow_insertion_order() {
        let rules = RuleSet::new()
            .with_rule(AlwaysFails("second"))
            .with_rule(AlwaysFails("first"));
        let issue = IssueRef::new("o", "r", 1);
        let data = IssueData::new("t", "", Vec::<String>::new());

        let problems: Vec<String> = rules
            .check_all(&issue, &data)
            .into_iter()
            .map(|p| p.to_string())
            .collect();
        assert_eq!(problems, vec!["second", "first"]);
    }

    #[test]
    fn empty_rule_set_finds_nothing() {
        let rules = RuleSet::new();
        assert!(rules.is_empty());
        let issue = IssueRef::new("o", "r", 1);
        let data = IssueData::new("t", "", Vec::<String>::new());
        assert!(rules.check_all(&issue, &data).is_empty());
    }

    #[test]
    fn rule_set_debug() {
        let debug_str = format!("{:?}", RuleSet::standard());
        assert!(debug_str.contains("RuleSet"));
        assert!(debug_str.contains("sections"));
    }
}
