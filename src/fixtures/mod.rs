//! Fixtures
//!
//! YAML-backed fixture sets: a rate board and a product catalogue loaded
//! from `fixtures/<set>/rates.yml` and `fixtures/<set>/products.yml`. They
//! stand in for the rates-management and inventory screens as the data
//! source for tests and demos.

use std::{fs, path::PathBuf};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    products::{Catalog, ProductKey},
    rates::{RateBoard, RateError},
};

pub mod products;
pub mod rates;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid money amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Invalid percentage
    #[error("Invalid percentage: {0}")]
    InvalidPercent(String),

    /// Invalid weight
    #[error("Invalid weight: {0}")]
    InvalidWeight(String),

    /// Invalid date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Unknown metal name
    #[error("Unknown metal: {0}")]
    UnknownMetal(String),

    /// Unknown weight type
    #[error("Unknown weight type: {0}")]
    UnknownWeightType(String),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The rate board rejected a parsed rate
    #[error(transparent)]
    Rate(#[from] RateError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    rate_board: RateBoard<'static>,
    catalog: Catalog<'static>,

    /// Fixture key -> catalogue key mappings for lookups
    product_keys: FxHashMap<String, ProductKey>,

    currency: &'static Currency,
}

impl Fixture {
    /// Loads the named fixture set from the default `./fixtures` directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the files cannot be read or parsed.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Loads the named fixture set from a custom base directory.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if the files cannot be read or parsed.
    pub fn from_set_in(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let set_path = base_path.into().join(name);

        let rates_contents = fs::read_to_string(set_path.join("rates.yml"))?;
        let rates_fixture: rates::RatesFixture = serde_norway::from_str(&rates_contents)?;
        let (rate_board, currency) = rates_fixture.into_board()?;

        let products_contents = fs::read_to_string(set_path.join("products.yml"))?;
        let products_fixture: products::ProductsFixture =
            serde_norway::from_str(&products_contents)?;

        let mut catalog = Catalog::new();
        let mut product_keys = FxHashMap::default();

        for (key, product_fixture) in products_fixture.products {
            let product = product_fixture.into_product(currency)?;
            let product_key = catalog.insert(product);

            product_keys.insert(key, product_key);
        }

        Ok(Fixture {
            rate_board,
            catalog,
            product_keys,
            currency,
        })
    }

    /// The rate board for the set.
    pub fn rates(&self) -> &RateBoard<'static> {
        &self.rate_board
    }

    /// The product catalogue for the set.
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Mutable catalogue access for stock movements.
    pub fn catalog_mut(&mut self) -> &mut Catalog<'static> {
        &mut self.catalog
    }

    /// Resolves a fixture key to its catalogue key.
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError::ProductNotFound`] for an unknown key.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// Currency of the set.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use rusty_money::iso;
    use testresult::TestResult;

    use crate::rates::{Metal, Purity};

    use super::*;

    const RATES_YML: &str = "\
currency: INR
rates:
  - metal: Gold
    purity: 22K
    rate_per_gram: \"6333.50\"
    date: 2026-08-05
  - metal: Silver
    purity: \"925\"
    rate_per_gram: \"95.00\"
    date: 2026-08-05
";

    const PRODUCTS_YML: &str = "\
products:
  gold_ring:
    name: Classic Gold Ring
    category: Ring
    metal: Gold
    purity: 22K
    net_weight: \"4.5\"
    gross_weight: \"4.7\"
    making_charges: \"12\"
    stock: 3
  pendant:
    name: Stone-set Pendant
    category: Pendant
    metal: Gold
    purity: 22K
    net_weight: \"6.2\"
    gross_weight: \"7.1\"
    making_charges: \"15\"
    stone_price: \"3500.00\"
    stock: 1
";

    fn write_set(dir: &std::path::Path) -> TestResult {
        let set_dir = dir.join("demo");
        fs::create_dir_all(&set_dir)?;

        let mut rates = fs::File::create(set_dir.join("rates.yml"))?;
        rates.write_all(RATES_YML.as_bytes())?;

        let mut products = fs::File::create(set_dir.join("products.yml"))?;
        products.write_all(PRODUCTS_YML.as_bytes())?;

        Ok(())
    }

    #[test]
    fn loads_a_complete_set() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path())?;

        let fixture = Fixture::from_set_in(dir.path(), "demo")?;

        assert_eq!(fixture.currency(), iso::INR);
        assert_eq!(fixture.catalog().len(), 2);

        let rate = fixture.rates().lookup(Metal::Gold, &Purity::new("22K"))?;
        assert_eq!(
            rate.rate_per_gram,
            rusty_money::Money::from_minor(633_350, iso::INR)
        );

        let key = fixture.product_key("pendant")?;
        let pendant = fixture.catalog().get(key)?;
        assert_eq!(
            pendant.stone_price,
            Some(rusty_money::Money::from_minor(350_000, iso::INR))
        );

        Ok(())
    }

    #[test]
    fn unknown_product_key_is_an_error() -> TestResult {
        let dir = tempfile::tempdir()?;
        write_set(dir.path())?;

        let fixture = Fixture::from_set_in(dir.path(), "demo")?;

        assert!(matches!(
            fixture.product_key("tiara"),
            Err(FixtureError::ProductNotFound(_))
        ));

        Ok(())
    }

    #[test]
    fn missing_set_is_an_io_error() {
        let result = Fixture::from_set_in("/nonexistent", "demo");

        assert!(matches!(result, Err(FixtureError::Io(_))));
    }
}
