//! Line Pricing
//!
//! The single shared implementation of the line pricing formula, consumed by
//! every caller that needs a price: metal value from net weight and the
//! rate-per-gram, making charges on metal value only, the stone price added
//! as-is, and quantity multiplying the whole unit price.
//!
//! Intermediate arithmetic is exact [`Decimal`] over minor units; every
//! reported money value is rounded half-up to minor units.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    products::Product,
    rates::{RateBoard, RateError},
    units::{Grams, Percent},
};

/// Errors that can occur while pricing a line.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A computed amount cannot be represented in minor units.
    #[error("computed amount cannot be represented in minor units")]
    AmountOverflow,

    /// The stone price currency differs from the rate currency (stone currency, rate currency).
    #[error("stone price has currency {0}, but the rate is quoted in {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Wrapped rate lookup error.
    #[error(transparent)]
    Rate(#[from] RateError),
}

/// Price breakdown for one invoice line.
///
/// Detail views and invoice rendering read the components from here instead
/// of re-deriving them.
#[derive(Debug, Clone)]
pub struct LineQuote<'a> {
    /// Value of the metal content: net weight times rate per gram
    pub metal_value: Money<'a, Currency>,

    /// Fabrication fee, charged on metal value only
    pub making_charges: Money<'a, Currency>,

    /// Stone price, zero for pieces without a stone
    pub stone_price: Money<'a, Currency>,

    /// Price for one unit: metal value + making charges + stone
    pub unit_price: Money<'a, Currency>,

    /// Unit price times quantity
    pub line_total: Money<'a, Currency>,
}

/// Prices one invoice line.
///
/// The order of operations is load-bearing for matching historical invoice
/// amounts: making charges apply to metal value only, never to the stone,
/// and quantity multiplies the whole unit price.
///
/// # Errors
///
/// - [`PricingError::AmountOverflow`]: an amount cannot be represented in
///   minor units.
/// - [`PricingError::CurrencyMismatch`]: the stone price is quoted in a
///   different currency than the rate.
pub fn price_line<'a>(
    net_weight: Grams,
    rate_per_gram: Money<'a, Currency>,
    making_charges: Percent,
    stone_price: Option<Money<'a, Currency>>,
    quantity: u32,
) -> Result<LineQuote<'a>, PricingError> {
    let currency = rate_per_gram.currency();

    let stone_minor = match stone_price {
        Some(stone) => {
            let stone_currency = stone.currency();

            if stone_currency != currency {
                return Err(PricingError::CurrencyMismatch(
                    stone_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            Decimal::from(stone.to_minor_units())
        }
        None => Decimal::ZERO,
    };

    let rate_minor = Decimal::from(rate_per_gram.to_minor_units());

    let metal_minor = net_weight
        .value()
        .checked_mul(rate_minor)
        .ok_or(PricingError::AmountOverflow)?;

    let making_minor = metal_minor
        .checked_mul(making_charges.as_fraction())
        .ok_or(PricingError::AmountOverflow)?;

    let unit_minor = metal_minor
        .checked_add(making_minor)
        .and_then(|value| value.checked_add(stone_minor))
        .ok_or(PricingError::AmountOverflow)?;

    let total_minor = unit_minor
        .checked_mul(Decimal::from(quantity))
        .ok_or(PricingError::AmountOverflow)?;

    Ok(LineQuote {
        metal_value: to_money(metal_minor, currency)?,
        making_charges: to_money(making_minor, currency)?,
        stone_price: to_money(stone_minor, currency)?,
        unit_price: to_money(unit_minor, currency)?,
        line_total: to_money(total_minor, currency)?,
    })
}

/// Prices `quantity` units of a catalogue product against the active rate
/// for its (metal, purity) pair.
///
/// # Errors
///
/// Returns a wrapped [`RateError::NotFound`] when the board has no active
/// rate for the pair — a missing rate is surfaced, never priced as zero —
/// or any line pricing error.
pub fn quote_product<'a>(
    product: &Product<'a>,
    rates: &RateBoard<'a>,
    quantity: u32,
) -> Result<LineQuote<'a>, PricingError> {
    let rate_per_gram = rates.rate_per_gram(product.metal, &product.purity)?;

    price_line(
        product.net_weight,
        rate_per_gram,
        product.making_charges,
        product.stone_price,
        quantity,
    )
}

/// Rounds a minor-unit amount half-up and converts it to money.
fn to_money<'a>(
    minor: Decimal,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, PricingError> {
    let rounded = minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    let Some(minor) = rounded.to_i64() else {
        return Err(PricingError::AmountOverflow);
    };

    Ok(Money::from_minor(minor, currency))
}
