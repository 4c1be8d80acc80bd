use std::iter::FromIterator;

use tracing::trace;

/// Ordered list of finite numbers extracted from free-form text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberList(Vec<f64>);

impl NumberList {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[f64]> for NumberList {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl FromIterator<f64> for NumberList {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        NumberList(iter.into_iter().filter(|n| n.is_finite()).collect())
    }
}

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}

/// Coerces a single token to a number, `None` when it is not a finite number.
fn coerce(token: &str) -> Option<f64> {
    let prefix = token.get(..2).map(str::to_ascii_lowercase);
    let value = match prefix.as_deref() {
        Some("0x") => parse_radix(&token[2..], 16),
        Some("0o") => parse_radix(&token[2..], 8),
        Some("0b") => parse_radix(&token[2..], 2),
        _ => token.parse::<f64>().ok(),
    };
    value.filter(|n| n.is_finite())
}

/// Splits `text` on runs of commas, semicolons and whitespace and keeps every
/// token that is a finite number. Anything else is dropped without error.
pub fn parse(text: &str) -> NumberList {
    text.split(is_separator)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let number = coerce(token);
            if number.is_none() {
                trace!(token, "dropping non-numeric token");
            }
            number
        })
        .collect()
}
