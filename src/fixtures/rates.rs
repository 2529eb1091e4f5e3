//! Rate Fixtures

use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    rates::{Metal, Purity, Rate, RateBoard},
};

/// Wrapper for a rate board in YAML
#[derive(Debug, Deserialize)]
pub struct RatesFixture {
    /// ISO currency code all rates are quoted in (e.g. "INR")
    pub currency: String,

    /// Published rates
    pub rates: Vec<RateFixture>,
}

/// Rate Fixture
#[derive(Debug, Deserialize)]
pub struct RateFixture {
    /// Metal name ("Gold", "Silver", "Diamond", "Other")
    pub metal: String,

    /// Purity grade ("22K", "925")
    pub purity: String,

    /// Rate per gram (e.g. "6333.50")
    pub rate_per_gram: String,

    /// Publication date (e.g. "2026-08-05")
    pub date: String,

    /// Whether the rate is current
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl RatesFixture {
    /// Builds a rate board from the fixture.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the currency code is unknown or any
    /// rate entry cannot be parsed.
    pub fn into_board(self) -> Result<(RateBoard<'static>, &'static Currency), FixtureError> {
        let currency = Currency::find(&self.currency)
            .ok_or_else(|| FixtureError::UnknownCurrency(self.currency.clone()))?;

        let mut board = RateBoard::new(currency);

        for fixture in self.rates {
            board.publish(fixture.into_rate(currency)?)?;
        }

        Ok((board, currency))
    }
}

impl RateFixture {
    /// Builds a rate record quoted in the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the metal, amount or date cannot be
    /// parsed.
    pub fn into_rate(self, currency: &'static Currency) -> Result<Rate<'static>, FixtureError> {
        Ok(Rate {
            metal: parse_metal(&self.metal)?,
            purity: Purity::new(self.purity),
            rate_per_gram: Money::from_minor(parse_amount(&self.rate_per_gram)?, currency),
            rate_date: parse_date(&self.date)?,
            is_active: self.active,
        })
    }
}

/// Parse a metal name
///
/// # Errors
///
/// Returns an error if the name is not one of the metals the shop quotes.
pub fn parse_metal(s: &str) -> Result<Metal, FixtureError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "gold" => Ok(Metal::Gold),
        "silver" => Ok(Metal::Silver),
        "diamond" => Ok(Metal::Diamond),
        "other" => Ok(Metal::Other),
        _ => Err(FixtureError::UnknownMetal(s.to_string())),
    }
}

/// Parse a decimal currency amount (e.g. "6333.50") into minor units
///
/// # Errors
///
/// Returns an error if the amount cannot be parsed as a decimal or does
/// not fit in minor units.
pub fn parse_amount(s: &str) -> Result<i64, FixtureError> {
    let amount = s
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidAmount(s.to_string()))?;

    amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| FixtureError::InvalidAmount(s.to_string()))
}

/// Parse an ISO `YYYY-MM-DD` date
///
/// # Errors
///
/// Returns an error if the date is malformed.
pub fn parse_date(s: &str) -> Result<NaiveDate, FixtureError> {
    s.trim()
        .parse::<NaiveDate>()
        .map_err(|_err| FixtureError::InvalidDate(s.to_string()))
}
