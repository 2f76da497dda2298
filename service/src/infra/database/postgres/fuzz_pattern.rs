//! [`FuzzPattern`] definition.

use derive_more::Display;
use itertools::Itertools as _;
use postgres_types::{FromSql, ToSql};

/// Lowercase `SIMILAR TO` pattern matching any of the words of a search
/// input.
#[derive(Clone, Debug, Display, Eq, FromSql, PartialEq, ToSql)]
#[postgres(transparent)]
pub struct FuzzPattern(String);

impl FuzzPattern {
    /// Characters having a special meaning in `SIMILAR TO` patterns.
    const SPECIAL: &'static [char] = &[
        '\\', '%', '_', '|', '*', '+', '?', '{', '}', '(', ')', '[', ']',
    ];

    /// Creates a new [`FuzzPattern`] out of the given `input`.
    ///
    /// Returns [`None`] if the `input` has no words.
    #[must_use]
    pub fn new(input: &str) -> Option<Self> {
        let mut words = input.split_whitespace().peekable();
        _ = words.peek()?;

        Some(Self(format!(
            "%({})%",
            words.format_with("|", |word, f| {
                f(&word
                    .to_lowercase()
                    .chars()
                    .format_with("", |c, f| {
                        if Self::SPECIAL.contains(&c) {
                            f(&format_args!("\\{c}"))
                        } else {
                            f(&c)
                        }
                    }))
            }),
        )))
    }
}

#[cfg(test)]
mod spec {
    use super::FuzzPattern;

    #[test]
    fn matches_any_word() {
        assert_eq!(
            FuzzPattern::new("Garden  ROAD").unwrap().to_string(),
            "%(garden|road)%",
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(
            FuzzPattern::new("50%_off (a|b)").unwrap().to_string(),
            r"%(50\%\_off|\(a\|b\))%",
        );
    }

    #[test]
    fn rejects_blank_input() {
        assert_eq!(FuzzPattern::new("   "), None);
        assert_eq!(FuzzPattern::new(""), None);
    }
}
