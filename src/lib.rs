//! Carat
//!
//! Carat is a pricing and invoicing engine for jewellery retail: daily metal
//! rates, weight-based line pricing with making charges and stone prices,
//! and invoice totals with tax and discount.

pub mod customers;
pub mod fixtures;
pub mod invoice;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod rates;
pub mod units;
pub mod utils;
