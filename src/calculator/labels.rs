//! Splitting typed text into button labels.
//!
//! Lets a keyboard driver accept runs like `12+3=` or `9 0 sin =` and feed
//! the engine one label at a time. Keypad labels are matched longest first,
//! so `1/x` wins over `1` followed by `/`.

use super::keys::KEYPAD;
use lazy_static::lazy_static;
use regex::Regex;

/// ASCII spellings for labels that are awkward to type.
const ALIASES: &[(&str, &str)] = &[
    ("sqrt", "√"),
    ("pi", "π"),
    ("x^2", "x²"),
    ("^", "xʸ"),
    ("neg", "±"),
    ("back", "⌫"),
];

lazy_static! {
    /// Matches one keypad label or alias, falling back to any single
    /// non-space character.
    static ref LABEL: Regex = {
        let mut labels: Vec<&str> = KEYPAD
            .iter()
            .copied()
            .chain(ALIASES.iter().map(|&(alias, _)| alias))
            .collect();
        labels.sort_by_key(|label| std::cmp::Reverse(label.chars().count()));

        let alternatives: Vec<String> = labels.iter().map(|label| regex::escape(label)).collect();
        Regex::new(&format!(r"(?:{})|\S", alternatives.join("|"))).unwrap()
    };
}

/// Split a line of typed input into labels, resolving aliases.
///
/// Characters that belong to no label are passed through one at a time so
/// the engine can treat them as unknown tokens.
pub fn split_labels(input: &str) -> Vec<String> {
    LABEL
        .find_iter(input)
        .map(|m| resolve_alias(m.as_str()).to_string())
        .collect()
}

fn resolve_alias(label: &str) -> &str {
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == label)
        .map_or(label, |&(_, target)| target)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(input: &str) -> Vec<String> {
        split_labels(input)
    }

    #[test]
    fn test_digits_and_operators() {
        assert_eq!(split("12+3="), ["1", "2", "+", "3", "="]);
        assert_eq!(split(" 2 * 4 "), ["2", "*", "4"]);
    }

    #[test]
    fn test_multi_character_labels() {
        assert_eq!(split("9 0 sin ="), ["9", "0", "sin", "="]);
        assert_eq!(split("AC"), ["AC"]);
        assert_eq!(split("5M+MR"), ["5", "M+", "MR"]);
        assert_eq!(split("4x²"), ["4", "x²"]);
        assert_eq!(split("deg rad"), ["deg", "rad"]);
        assert_eq!(split("8 1/x"), ["8", "1/x"]);
        assert_eq!(split("1/4"), ["1", "/", "4"]);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(split("sqrt"), ["√"]);
        assert_eq!(split("2pi*"), ["2", "π", "*"]);
        assert_eq!(split("2^8"), ["2", "xʸ", "8"]);
        assert_eq!(split("3x^2"), ["3", "x²"]);
        assert_eq!(split("5neg"), ["5", "±"]);
    }

    #[test]
    fn test_unknown_characters_pass_through() {
        assert_eq!(split("2&3"), ["2", "&", "3"]);
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
    }

    #[test]
    fn test_every_keypad_label_splits_to_itself() {
        for label in KEYPAD {
            assert_eq!(split(label), [label], "label {label}");
        }
    }
}
