//! Units
//!
//! Wrapper types for the two unit conventions that are easy to confuse when
//! invoice fields are bare numerics: percentage points (tax, making charges)
//! and metal weight in grams.

use std::fmt;

use rust_decimal::Decimal;

/// A percentage expressed in whole points (`8.5` means 8.5%).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Creates a percentage, clamping negative inputs to zero.
    pub fn new(points: Decimal) -> Self {
        Percent(points.max(Decimal::ZERO))
    }

    /// Creates a percentage clamped to the `0..=100` range.
    pub fn clamped_to_100(points: Decimal) -> Self {
        Percent(points.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// The raw percentage points.
    pub fn points(self) -> Decimal {
        self.0
    }

    /// The multiplier form of the percentage (`8.5%` -> `0.085`).
    pub fn as_fraction(self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A metal weight in grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Grams(Decimal);

impl Grams {
    /// Zero grams.
    pub const ZERO: Grams = Grams(Decimal::ZERO);

    /// Creates a weight, clamping negative inputs to zero.
    pub fn new(grams: Decimal) -> Self {
        Grams(grams.max(Decimal::ZERO))
    }

    /// The weight in grams.
    pub fn value(self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} g", self.0)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn percent_clamps_negative_to_zero() {
        let percent = Percent::new(dec!(-5));

        assert_eq!(percent, Percent::ZERO);
    }

    #[test]
    fn percent_clamped_to_100_caps_large_values() {
        let percent = Percent::clamped_to_100(dec!(250));

        assert_eq!(percent.points(), dec!(100));
    }

    #[test]
    fn percent_as_fraction() {
        let percent = Percent::new(dec!(8.5));

        assert_eq!(percent.as_fraction(), dec!(0.085));
    }

    #[test]
    fn percent_displays_with_sign() {
        assert_eq!(Percent::new(dec!(3)).to_string(), "3%");
    }

    #[test]
    fn grams_clamps_negative_to_zero() {
        let weight = Grams::new(dec!(-11.66));

        assert_eq!(weight, Grams::ZERO);
    }

    #[test]
    fn grams_value_round_trips() {
        let weight = Grams::new(dec!(11.66));

        assert_eq!(weight.value(), dec!(11.66));
        assert_eq!(weight.to_string(), "11.66 g");
    }
}
