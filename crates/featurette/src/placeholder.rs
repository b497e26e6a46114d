//! Placeholder substitution for Scenario Outline step text.
//!
//! Outline steps keep their `<placeholder>` tokens in the document model.
//! [`substitute`] produces the concrete step for one Examples row on demand.
//! Only the step text is rewritten; tables and doc strings attached to the
//! step are copied unchanged. Placeholders without a matching column are left
//! verbatim.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Example, Step};

/// Regex pattern matching `<placeholder>` tokens in step text.
///
/// Captures the placeholder name without the angle brackets, including spaces
/// and punctuation commonly used in Examples headers.
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a compile-time constant and is valid.
    Regex::new(r"<([^<>\s][^<>]*)>").unwrap_or_else(|_| unreachable!("placeholder regex is valid"))
});

/// Return the step with every known `<name>` in its text replaced.
///
/// Replacement is a single left-to-right pass, so values that themselves
/// look like placeholders are not expanded again.
///
/// # Examples
/// ```
/// use featurette::{Example, Step, StepKeyword, substitute};
///
/// let step = Step {
///     keyword: StepKeyword::Given,
///     text: "I have <count> <item>".into(),
///     argument: None,
/// };
/// let example: Example = [("count", "5")].into_iter().collect();
/// assert_eq!(substitute(&step, &example).text, "I have 5 <item>");
/// ```
#[must_use]
pub fn substitute(step: &Step, example: &Example) -> Step {
    Step {
        keyword: step.keyword,
        text: substitute_text(&step.text, example),
        argument: step.argument.clone(),
    }
}

/// Replace every known `<name>` in `text` with the example's value.
#[must_use]
pub fn substitute_text(text: &str, example: &Example) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |cap: &Captures<'_>| {
            let whole = cap.get(0).map_or("", |m| m.as_str());
            cap.get(1)
                .and_then(|name| example.get(name.as_str()))
                .unwrap_or(whole)
                .to_string()
        })
        .into_owned()
}

/// Checks if a text contains any placeholder tokens.
#[must_use]
pub fn contains_placeholders(text: &str) -> bool {
    PLACEHOLDER_RE.is_match(text)
}

/// Extracts all placeholder names from a text, in order of appearance.
///
/// Repeated placeholders are reported once per occurrence.
#[must_use]
pub fn placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER_RE
        .captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyword::StepKeyword;
    use crate::model::StepArgument;
    use rstest::rstest;

    fn example(pairs: &[(&str, &str)]) -> Example {
        pairs.iter().copied().collect()
    }

    fn step(text: &str) -> Step {
        Step {
            keyword: StepKeyword::Given,
            text: text.to_string(),
            argument: None,
        }
    }

    #[rstest]
    #[case::single("I have <count> items", &[("count", "5")], "I have 5 items")]
    #[case::several(
        "I have <count> <item>",
        &[("count", "5"), ("item", "apples")],
        "I have 5 apples"
    )]
    #[case::repeated(
        "<val> plus <val> equals double <val>",
        &[("val", "3")],
        "3 plus 3 equals double 3"
    )]
    #[case::no_placeholders("I have 5 items", &[("count", "10")], "I have 5 items")]
    #[case::empty_value("I have <count> items", &[("count", "")], "I have  items")]
    #[case::spaces_and_dashes(
        "The <start count> includes <item-id>",
        &[("start count", "3"), ("item-id", "apples")],
        "The 3 includes apples"
    )]
    fn substitutes_known_placeholders(
        #[case] text: &str,
        #[case] pairs: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        assert_eq!(substitute_text(text, &example(pairs)), expected);
    }

    #[test]
    fn leaves_unknown_placeholders_verbatim() {
        let result = substitute_text("I have <undefined> <count>", &example(&[("count", "1")]));
        assert_eq!(result, "I have <undefined> 1");
    }

    #[test]
    fn does_not_reexpand_substituted_values() {
        let ex = example(&[("a", "<b>"), ("b", "x")]);
        assert_eq!(substitute_text("<a> <b>", &ex), "<b> x");
    }

    #[test]
    fn reapplying_the_same_example_is_stable() {
        let ex = example(&[("mountain", "etna")]);
        let once = substitute_text("I am a <mountain> near <sea>", &ex);
        let twice = substitute_text(&once, &ex);
        assert_eq!(once, twice);
    }

    #[test]
    fn step_arguments_are_not_substituted() {
        let original = Step {
            argument: Some(StepArgument::DocString("value is <count>".into())),
            ..step("I have <count>")
        };
        let concrete = substitute(&original, &example(&[("count", "2")]));
        assert_eq!(concrete.text, "I have 2");
        assert_eq!(concrete.docstring(), Some("value is <count>"));
        assert_eq!(concrete.keyword, StepKeyword::Given);
    }

    #[test]
    fn contains_placeholders_detects_tokens() {
        assert!(contains_placeholders("I have <count> items"));
        assert!(!contains_placeholders("Angle brackets < > without names"));
        assert!(!contains_placeholders("No placeholders here"));
    }

    #[test]
    fn placeholders_lists_names_in_order() {
        assert_eq!(
            placeholders("I have <count> <item> and <count> more"),
            vec!["count", "item", "count"]
        );
        assert!(placeholders("No placeholders here").is_empty());
    }
}
