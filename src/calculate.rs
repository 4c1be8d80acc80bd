use std::{fmt, str::FromStr};

use tracing::debug;

use crate::{
    parser,
    stats::{StatisticsResult, VarianceMode},
};

/// Number of decimal digits kept when rounding for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Precision(usize);

impl Precision {
    pub const MAX: usize = 15;

    pub fn digits(self) -> usize {
        self.0
    }

    /// Rounds `value` to `digits` decimals, ties away from zero. Non-finite
    /// values are returned untouched.
    pub fn round(self, value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        round_half_away(value, self.0).parse().unwrap_or(value)
    }
}

// every finite f64 has at most this many fractional decimal digits
const EXACT_DIGITS: usize = 1074;

fn round_half_away(value: f64, digits: usize) -> String {
    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, fraction) = match exact.split_once('.') {
        Some(parts) => parts,
        None => (exact.as_str(), ""),
    };

    let mut kept = int_part
        .chars()
        .chain(fraction.chars().chain(std::iter::repeat('0')).take(digits))
        .collect::<Vec<_>>();
    if fraction.chars().nth(digits).map_or(false, |next| next >= '5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, '1');
        }
    }

    let split = kept.len() - digits;
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let int_part = kept[..split].iter().collect::<String>();
    match digits {
        0 => format!("{}{}", sign, int_part),
        _ => format!(
            "{}{}.{}",
            sign,
            int_part,
            kept[split..].iter().collect::<String>()
        ),
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision(4)
    }
}

impl FromStr for Precision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .parse::<usize>()
            .map_err(|_| format!("invalid number of digits: {}", s))?;
        if digits > Precision::MAX {
            return Err(format!("at most {} digits are supported", Precision::MAX));
        }
        Ok(Precision(digits))
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No number could be read from the input.
    Empty,
    Computed(StatisticsResult),
}

pub fn calculate(text: &str, variance_mode: VarianceMode) -> Outcome {
    calculate_with_precision(text, variance_mode, Precision::default())
}

pub fn calculate_with_precision(
    text: &str,
    variance_mode: VarianceMode,
    precision: Precision,
) -> Outcome {
    let numbers = parser::parse(text);
    debug!(count = numbers.len(), ?variance_mode, "parsed input");

    match StatisticsResult::compute(numbers.as_slice(), variance_mode) {
        None => Outcome::Empty,
        Some(result) => Outcome::Computed(StatisticsResult {
            mean: precision.round(result.mean),
            median: precision.round(result.median),
            mode: result.mode,
            range: precision.round(result.range),
            variance: precision.round(result.variance),
            std_dev: precision.round(result.std_dev),
        }),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stats::Mode;
    use proptest::{prop_assert_eq, proptest};

    fn computed(outcome: Outcome) -> StatisticsResult {
        match outcome {
            Outcome::Computed(result) => result,
            Outcome::Empty => panic!("expected statistics, got empty outcome"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(calculate("", VarianceMode::Population), Outcome::Empty);
        assert_eq!(calculate(" ;, \n", VarianceMode::Sample), Outcome::Empty);
        assert_eq!(calculate("abc, def", VarianceMode::Sample), Outcome::Empty);
    }

    #[test]
    fn test_rounds_to_four_digits() {
        let result = computed(calculate("2 4 4 4 5 5 7 9", VarianceMode::Sample));
        assert_eq!(result.mean, 5.);
        assert_eq!(result.variance, 4.5714);
        assert_eq!(result.std_dev, 2.1381);
        assert_eq!(result.mode, Mode::Single(4.));
    }

    #[test]
    fn test_population_toggle() {
        let result = computed(calculate("2 4 4 4 5 5 7 9", VarianceMode::Population));
        assert_eq!(result.variance, 4.);
        assert_eq!(result.std_dev, 2.);
    }

    #[test]
    fn test_single_value_sample_stays_non_finite() {
        let result = computed(calculate("42", VarianceMode::Sample));
        assert_eq!(result.mean, 42.);
        assert_eq!(result.range, 0.);
        assert!(result.variance.is_nan());
        assert!(result.std_dev.is_nan());
    }

    #[test]
    fn test_mode_values_are_not_rounded() {
        let result = computed(calculate("0.123456 0.123456 1", VarianceMode::Population));
        assert_eq!(result.mode, Mode::Single(0.123456));
        assert_eq!(result.median, 0.1235);
    }

    #[test]
    fn test_custom_precision() {
        let precision = "1".parse::<Precision>().unwrap();
        let result = computed(calculate_with_precision(
            "1 2 2",
            VarianceMode::Population,
            precision,
        ));
        assert_eq!(result.mean, 1.7);
    }

    #[test]
    fn test_precision_parsing() {
        assert_eq!("0".parse::<Precision>(), Ok(Precision(0)));
        assert!("16".parse::<Precision>().is_err());
        assert!("-1".parse::<Precision>().is_err());
        assert!("four".parse::<Precision>().is_err());
    }

    #[test]
    fn test_round_ties_away_from_zero() {
        let precision = Precision::default();
        assert_eq!(precision.round(0.03125), 0.0313);
        assert_eq!(precision.round(1.03125), 1.0313);
        assert_eq!(precision.round(-0.03125), -0.0313);
        assert_eq!(precision.round(0.03124), 0.0312);
        assert_eq!(precision.round(9.99996), 10.);
        assert_eq!(Precision(0).round(2.5), 3.);
        assert_eq!(Precision(0).round(-0.5), -1.);
        assert_eq!(Precision(2).round(99.995), 100.);
        assert_eq!(Precision(2).round(1.005), 1.);
    }

    #[test]
    fn test_tied_mean_rounds_up() {
        let result = computed(calculate("0.0625 0", VarianceMode::Population));
        assert_eq!(result.mean, 0.0313);
        assert_eq!(result.median, 0.0313);
    }

    #[test]
    fn test_round_passes_non_finite_through() {
        let precision = Precision::default();
        assert!(precision.round(f64::NAN).is_nan());
        assert_eq!(precision.round(f64::INFINITY), f64::INFINITY);
    }

    proptest! {
        #[test]
        fn test_rounding_is_idempotent(value in -1e9f64..1e9) {
            let precision = Precision::default();
            let once = precision.round(value);
            prop_assert_eq!(precision.round(once), once);
        }
    }
}
