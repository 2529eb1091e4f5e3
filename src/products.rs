//! Products
//!
//! Inventory records for the pieces the shop sells. A product never stores a
//! rate-per-gram; pricing resolves the active rate for its (metal, purity)
//! pair on the rate board at read time.

use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::{
    rates::{Metal, Purity},
    units::{Grams, Percent},
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors related to catalogue access or stock movements.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Product not found in the catalogue.
    #[error("product not found")]
    ProductNotFound(ProductKey),

    /// Not enough stock on hand for the requested quantity.
    #[error("insufficient stock: requested {requested}, {in_stock} in stock")]
    InsufficientStock {
        /// Product the reservation was for.
        key: ProductKey,

        /// Quantity the sale asked for.
        requested: u32,

        /// Quantity on hand.
        in_stock: u32,
    },
}

/// How a piece's weight is recorded on its label.
///
/// Pricing always consumes [`Grams`]; the weight type is a display
/// convention carried through from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightType {
    /// Metric grams.
    #[default]
    Gram,

    /// Tola, the traditional bullion unit (11.664 g).
    Tola,
}

/// Product
#[derive(Debug, Clone)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Display category ("Ring", "Chain", "Anklet")
    pub category: String,

    /// Metal the piece is made of
    pub metal: Metal,

    /// Fineness grade of the metal
    pub purity: Purity,

    /// Pure metal weight, excluding stones and settings
    pub net_weight: Grams,

    /// Total physical weight, stones and settings included
    pub gross_weight: Grams,

    /// Weight convention on the label
    pub weight_type: WeightType,

    /// Fabrication fee as a percentage of metal value
    pub making_charges: Percent,

    /// Stone price for a stone-set piece; `None` means no stone
    pub stone_price: Option<Money<'a, Currency>>,

    /// Units on hand
    pub stock: u32,
}

/// Product catalogue with stock on hand.
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,
}

impl<'a> Catalog<'a> {
    /// Creates an empty catalogue.
    pub fn new() -> Self {
        Catalog {
            products: SlotMap::with_key(),
        }
    }

    /// Adds a product and returns its key.
    pub fn insert(&mut self, product: Product<'a>) -> ProductKey {
        self.products.insert(product)
    }

    /// Fetches a product by key.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::ProductNotFound`] if the key is not in the
    /// catalogue.
    pub fn get(&self, key: ProductKey) -> Result<&Product<'a>, CatalogError> {
        self.products
            .get(key)
            .ok_or(CatalogError::ProductNotFound(key))
    }

    /// Takes `quantity` units of a product out of stock for a sale.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::InsufficientStock`] if fewer units are on
    /// hand than requested, or [`CatalogError::ProductNotFound`] for an
    /// unknown key.
    pub fn reserve(&mut self, key: ProductKey, quantity: u32) -> Result<(), CatalogError> {
        let product = self
            .products
            .get_mut(key)
            .ok_or(CatalogError::ProductNotFound(key))?;

        if quantity > product.stock {
            return Err(CatalogError::InsufficientStock {
                key,
                requested: quantity,
                in_stock: product.stock,
            });
        }

        product.stock -= quantity;

        Ok(())
    }

    /// Returns `quantity` units of a product to stock.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::ProductNotFound`] for an unknown key.
    pub fn restock(&mut self, key: ProductKey, quantity: u32) -> Result<(), CatalogError> {
        let product = self
            .products
            .get_mut(key)
            .ok_or(CatalogError::ProductNotFound(key))?;

        product.stock = product.stock.saturating_add(quantity);

        Ok(())
    }

    /// Iterates over the catalogue in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.products.iter()
    }

    /// Number of products in the catalogue.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog<'_> {
    fn default() -> Self {
        Self::new()
    }
}
