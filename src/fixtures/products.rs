//! Product Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::Deserialize;

use crate::{
    fixtures::{
        FixtureError,
        rates::{parse_amount, parse_metal},
    },
    products::{Product, WeightType},
    rates::Purity,
    units::{Grams, Percent},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Display category
    pub category: String,

    /// Metal name
    pub metal: String,

    /// Purity grade
    pub purity: String,

    /// Net metal weight in grams (e.g. "11.66")
    pub net_weight: String,

    /// Gross weight in grams
    pub gross_weight: String,

    /// Weight convention ("gram" or "tola"); grams when omitted
    #[serde(default)]
    pub weight_type: Option<String>,

    /// Making charges percentage (e.g. "12")
    pub making_charges: String,

    /// Stone price for stone-set pieces (e.g. "3500.00")
    #[serde(default)]
    pub stone_price: Option<String>,

    /// Units on hand
    pub stock: u32,
}

impl ProductFixture {
    /// Builds a product priced in the given currency.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if any field cannot be parsed.
    pub fn into_product(self, currency: &'static Currency) -> Result<Product<'static>, FixtureError> {
        let stone_price = match self.stone_price {
            Some(raw) => Some(Money::from_minor(parse_amount(&raw)?, currency)),
            None => None,
        };

        let weight_type = match self.weight_type.as_deref() {
            Some(raw) => parse_weight_type(raw)?,
            None => WeightType::Gram,
        };

        Ok(Product {
            name: self.name,
            category: self.category,
            metal: parse_metal(&self.metal)?,
            purity: Purity::new(self.purity),
            net_weight: parse_weight(&self.net_weight)?,
            gross_weight: parse_weight(&self.gross_weight)?,
            weight_type,
            making_charges: parse_percent(&self.making_charges)?,
            stone_price,
            stock: self.stock,
        })
    }
}

/// Parse a weight in grams
///
/// # Errors
///
/// Returns an error if the weight cannot be parsed as a decimal.
pub fn parse_weight(s: &str) -> Result<Grams, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map(Grams::new)
        .map_err(|_err| FixtureError::InvalidWeight(s.to_string()))
}

/// Parse a percentage in points
///
/// # Errors
///
/// Returns an error if the percentage cannot be parsed as a decimal.
pub fn parse_percent(s: &str) -> Result<Percent, FixtureError> {
    s.trim()
        .parse::<Decimal>()
        .map(Percent::new)
        .map_err(|_err| FixtureError::InvalidPercent(s.to_string()))
}

/// Parse a weight type label
///
/// # Errors
///
/// Returns an error if the label is not a known weight convention.
pub fn parse_weight_type(s: &str) -> Result<WeightType, FixtureError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "gram" | "g" => Ok(WeightType::Gram),
        "tola" => Ok(WeightType::Tola),
        _ => Err(FixtureError::UnknownWeightType(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    fn pendant_fixture() -> ProductFixture {
        ProductFixture {
            name: "Stone-set Pendant".to_string(),
            category: "Pendant".to_string(),
            metal: "Gold".to_string(),
            purity: "22k".to_string(),
            net_weight: "6.2".to_string(),
            gross_weight: "7.1".to_string(),
            weight_type: None,
            making_charges: "15".to_string(),
            stone_price: Some("3500.00".to_string()),
            stock: 1,
        }
    }

    #[test]
    fn builds_a_product_with_a_stone() -> TestResult {
        let product = pendant_fixture().into_product(iso::INR)?;

        assert_eq!(product.purity, Purity::new("22K"));
        assert_eq!(product.net_weight, Grams::new(dec!(6.2)));
        assert_eq!(product.stone_price, Some(Money::from_minor(350_000, iso::INR)));
        assert_eq!(product.weight_type, WeightType::Gram);

        Ok(())
    }

    #[test]
    fn rejects_an_unknown_weight_type() {
        let fixture = ProductFixture {
            weight_type: Some("carat".to_string()),
            ..pendant_fixture()
        };

        assert!(matches!(
            fixture.into_product(iso::INR),
            Err(FixtureError::UnknownWeightType(_))
        ));
    }

    #[test]
    fn rejects_a_malformed_weight() {
        let fixture = ProductFixture {
            net_weight: "heavy".to_string(),
            ..pendant_fixture()
        };

        assert!(matches!(
            fixture.into_product(iso::INR),
            Err(FixtureError::InvalidWeight(_))
        ));
    }
}
