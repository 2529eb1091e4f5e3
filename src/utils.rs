//! Utils

use clap::Parser;
use rust_decimal::Decimal;

/// Arguments for the invoice demo
#[derive(Debug, Parser)]
pub struct DemoInvoiceArgs {
    /// Fixture set to use for the rate board & catalogue
    #[clap(short, long, default_value = "standard")]
    pub fixture: String,

    /// Customer name printed on the invoice
    #[clap(short, long, default_value = "Walk-in Customer")]
    pub customer: String,

    /// Tax percentage applied to the subtotal
    #[clap(short, long, default_value = "3")]
    pub tax: Decimal,

    /// Absolute discount in major currency units
    #[clap(short, long, default_value = "0")]
    pub discount: Decimal,
}
