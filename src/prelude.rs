//! Carat prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    customers::Customer,
    fixtures::{Fixture, FixtureError},
    invoice::{
        Invoice, InvoiceError, InvoiceTotals, LineItem, LineSource, PaymentStatus,
        aggregate_totals,
    },
    pricing::{LineQuote, PricingError, price_line, quote_product},
    products::{Catalog, CatalogError, Product, ProductKey, WeightType},
    rates::{Metal, Purity, Rate, RateBoard, RateError},
    units::{Grams, Percent},
};
