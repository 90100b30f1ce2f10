//! Title rule
//!
//! An SEP title starts with `SEP-<number>: `. A stale prefix carrying another
//! number is demoted behind a fresh canonical one rather than deleted.

use super::Rule;
use crate::report::{tag, Problem};
use crate::types::{IssueData, IssueRef};
use once_cell::sync::Lazy;
use regex::Regex;

/// Optional `SEP`, separator, digits, colon and spacing at the start of a title
static SEP_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:SEP[- ]?([0-9]+)?:?\s*)?").expect("title prefix pattern is valid"));

/// Outcome of checking a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCheck {
    /// Whether the title differs from its corrected form
    pub needs_correction: bool,
    /// Corrected title (equal to the input when no correction is needed)
    pub corrected: String,
}

/// Compute the corrected title for issue `number`
#[must_use]
pub fn check_title(title: &str, number: u64) -> TitleCheck {
    let canonical = format!("SEP-{number}: ");

    let (prefix, id) = SEP_PREFIX
        .captures(title)
        .map(|caps| {
            (
                caps.get(0).map_or("", |m| m.as_str()),
                caps.get(1).map(|m| m.as_str()),
            )
        })
        .unwrap_or(("", None));
    let rest = &title[prefix.len()..];

    let corrected = match id {
        Some(id) if id == number.to_string() => title.to_string(),
        Some(_) => format!("{canonical}{prefix}{rest}"),
        None => format!("{canonical}{rest}"),
    };

    TitleCheck {
        needs_correction: corrected != title,
        corrected,
    }
}

/// Rule wrapper around [`check_title`]
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleRule;

impl Rule for TitleRule {
    fn name(&self) -> &'static str {
        "title"
    }

    fn check(&self, issue: &IssueRef, data: &IssueData) -> Option<Problem> {
        let check = check_title(&data.title, issue.number);
        check.needs_correction.then(|| {
            Problem::new(format!(
                "Title should be: {}.",
                tag("title", &check.corrected)
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn conformant_title_unchanged() {
        let check = check_title("SEP-7: Foo", 7);
        assert!(!check.needs_correction);
        assert_eq!(check.corrected, "SEP-7: Foo");
    }

    #[test]
    fn missing_prefix_is_prepended() {
        let check = check_title("My Proposal", 7);
        assert!(check.needs_correction);
        assert_eq!(check.corrected, "SEP-7: My Proposal");
    }

    #[test]
    fn stale_number_is_demoted() {
        let check = check_title("SEP-12: Foo", 7);
        assert!(check.needs_correction);
        assert_eq!(check.corrected, "SEP-7: SEP-12: Foo");
    }

    #[test]
    fn prefix_is_not_word_bounded() {
        assert_eq!(check_title("SEPARATE things", 7).corrected, "SEP-7: ARATE things");
    }

    #[test]
    fn prefix_without_number_is_normalized() {
        assert_eq!(check_title("SEP: Foo", 7).corrected, "SEP-7: Foo");
        assert_eq!(check_title("SEP Foo", 7).corrected, "SEP-7: Foo");
    }

    #[test]
    fn space_separated_number_matches() {
        assert!(!check_title("SEP 7: Foo", 7).needs_correction);
        assert!(!check_title("SEP7 Foo", 7).needs_correction);
    }

    #[test]
    fn leading_zeros_do_not_match() {
        assert_eq!(check_title("SEP-007: Foo", 7).corrected, "SEP-7: SEP-007: Foo");
    }

    #[test]
    fn prefix_is_case_sensitive() {
        assert_eq!(check_title("sep-7: Foo", 7).corrected, "SEP-7: sep-7: Foo");
    }

    #[test]
    fn rule_reports_tagged_title() {
        let issue = IssueRef::new("acme", "widgets", 7);
        let data = IssueData::new("My Proposal", "", ["SEP"]);
        let problem = TitleRule.check(&issue, &data).unwrap();
        assert_eq!(
            problem.to_string(),
            "Title should be: <title>SEP-7: My Proposal</title>."
        );
    }

    proptest! {
        #[test]
        fn prop_canonical_titles_are_fixed_points(number in 1u64..100_000, rest in "[a-zA-Z0-9 ]{0,40}") {
            let title = format!("SEP-{number}: {rest}");
            let check = check_title(&title, number);
            prop_assert!(!check.needs_correction);
            prop_assert_eq!(check.corrected, title);
        }

        #[test]
        fn prop_unprefixed_titles_keep_original_suffix(number in 1u64..100_000, title in "[a-zA-RT-Z][a-zA-Z0-9 ]{0,40}") {
            let check = check_title(&title, number);
            prop_assert!(check.needs_correction);
            prop_assert_eq!(check.corrected, format!("SEP-{number}: {title}"));
        }

        #[test]
        fn prop_correction_is_idempotent(number in 1u64..100_000, title in "[a-zA-Z0-9 :-]{0,40}") {
            let once = check_title(&title, number).corrected;
            let twice = check_title(&once, number);
            prop_assert!(!twice.needs_correction);
            prop_assert_eq!(twice.corrected, once);
        }
    }
}
