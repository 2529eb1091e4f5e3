//! Metal Rates
//!
//! Daily rate-per-gram records and the board they are published on. Products
//! do not store a rate; pricing resolves the active rate for the product's
//! (metal, purity) pair at read time.

use std::fmt;

use chrono::NaiveDate;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

/// Errors related to rate publication or lookup.
#[derive(Debug, Error)]
pub enum RateError {
    /// No active rate is published for the metal and purity.
    #[error("no active rate for {metal} {purity}")]
    NotFound {
        /// Metal the lookup asked for.
        metal: Metal,

        /// Purity the lookup asked for.
        purity: Purity,
    },

    /// A rate's currency differs from the board currency (rate currency, board currency).
    #[error("rate for {0} {1} has currency {2}, but board has currency {3}")]
    CurrencyMismatch(Metal, Purity, &'static str, &'static str),
}

/// Metal a rate or product is quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metal {
    /// Gold, graded in karats ("22K", "24K").
    Gold,

    /// Silver, graded in fineness ("925", "999").
    Silver,

    /// Diamond-set pieces priced by their metal content plus stone price.
    Diamond,

    /// Anything else the shop trades in.
    Other,
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Diamond => "Diamond",
            Metal::Other => "Other",
        };

        write!(f, "{name}")
    }
}

/// Fineness grade of a metal (e.g. "22K" gold, "925" silver).
///
/// Normalised on construction (trimmed, ASCII-uppercased) so lookups are
/// insensitive to form-input casing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Purity(String);

impl Purity {
    /// Creates a normalised purity grade.
    pub fn new(grade: impl Into<String>) -> Self {
        Purity(grade.into().trim().to_ascii_uppercase())
    }

    /// The normalised grade string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published rate-per-gram for a (metal, purity) pair on a given date.
#[derive(Debug, Clone)]
pub struct Rate<'a> {
    /// Metal the rate is quoted for.
    pub metal: Metal,

    /// Fineness grade the rate is quoted for.
    pub purity: Purity,

    /// Price per gram.
    pub rate_per_gram: Money<'a, Currency>,

    /// Day the rate was published for.
    pub rate_date: NaiveDate,

    /// Whether the rate is current. Superseded rates are deactivated, never
    /// deleted, so the board doubles as the rate history.
    pub is_active: bool,
}

/// Published rates for one currency, indexed by (metal, purity).
#[derive(Debug)]
pub struct RateBoard<'a> {
    rates: FxHashMap<(Metal, Purity), SmallVec<[Rate<'a>; 4]>>,
    currency: &'static Currency,
}

impl<'a> RateBoard<'a> {
    /// Creates an empty board quoting in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        RateBoard {
            rates: FxHashMap::default(),
            currency,
        }
    }

    /// Creates a board holding the given rates.
    ///
    /// # Errors
    ///
    /// Returns a [`RateError::CurrencyMismatch`] if any rate is quoted in a
    /// currency other than the board's.
    pub fn with_rates(
        rates: impl IntoIterator<Item = Rate<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, RateError> {
        let mut board = RateBoard::new(currency);

        for rate in rates {
            board.publish(rate)?;
        }

        Ok(board)
    }

    /// Publishes a rate onto the board.
    ///
    /// # Errors
    ///
    /// Returns a [`RateError::CurrencyMismatch`] if the rate is quoted in a
    /// currency other than the board's.
    pub fn publish(&mut self, rate: Rate<'a>) -> Result<(), RateError> {
        let rate_currency = rate.rate_per_gram.currency();

        if rate_currency != self.currency {
            return Err(RateError::CurrencyMismatch(
                rate.metal,
                rate.purity.clone(),
                rate_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        self.rates
            .entry((rate.metal, rate.purity.clone()))
            .or_default()
            .push(rate);

        Ok(())
    }

    /// Deactivates every published rate for the metal and purity.
    ///
    /// Rates are never deleted; deactivation takes the pair off the board
    /// until a new rate is published for it.
    pub fn deactivate(&mut self, metal: Metal, purity: &Purity) {
        if let Some(history) = self.rates.get_mut(&(metal, purity.clone())) {
            for rate in history.iter_mut() {
                rate.is_active = false;
            }
        }
    }

    /// Looks up the active rate for a metal and purity.
    ///
    /// Several active rates can exist for one pair over time; the most
    /// recent `rate_date` wins, with the last published winning a date tie.
    ///
    /// # Errors
    ///
    /// Returns a [`RateError::NotFound`] when no active rate is published
    /// for the pair. Callers must surface this rather than zero-pricing the
    /// item.
    pub fn lookup(&self, metal: Metal, purity: &Purity) -> Result<&Rate<'a>, RateError> {
        self.rates
            .get(&(metal, purity.clone()))
            .into_iter()
            .flatten()
            .filter(|rate| rate.is_active)
            .max_by_key(|rate| rate.rate_date)
            .ok_or_else(|| RateError::NotFound {
                metal,
                purity: purity.clone(),
            })
    }

    /// Price per gram from the active rate for a metal and purity.
    ///
    /// # Errors
    ///
    /// Returns a [`RateError::NotFound`] when no active rate is published
    /// for the pair.
    pub fn rate_per_gram(
        &self,
        metal: Metal,
        purity: &Purity,
    ) -> Result<Money<'a, Currency>, RateError> {
        Ok(self.lookup(metal, purity)?.rate_per_gram)
    }

    /// Currency every rate on the board is quoted in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of published rates, deactivated history included.
    pub fn len(&self) -> usize {
        self.rates.values().map(SmallVec::len).sum()
    }

    /// Whether the board has no published rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}
