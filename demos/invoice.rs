//! Invoice Example
//!
//! Prices every catalogue product against the day's rate board, issues an
//! invoice and prints it.
//!
//! Use `-f` to load a fixture set by name
//! Use `-c` to set the customer name
//! Use `-t` / `-d` to set the tax percentage and discount amount

use std::io;

use anyhow::Result;
use clap::Parser;
use rusty_money::Money;

use carat::{
    customers::Customer,
    fixtures::{Fixture, rates::parse_amount},
    invoice::{Invoice, LineItem, PaymentStatus},
    units::Percent,
    utils::DemoInvoiceArgs,
};

/// Invoice Example
pub fn main() -> Result<()> {
    let args = DemoInvoiceArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let currency = fixture.currency();

    let mut entries: Vec<_> = fixture.catalog().iter().collect();
    entries.sort_by(|(_, a), (_, b)| a.name.cmp(&b.name));

    let mut items = Vec::new();

    for (key, product) in entries {
        items.push(LineItem::for_product(key, product, fixture.rates(), 1)?);
    }

    let discount = Money::from_minor(parse_amount(&args.discount.to_string())?, currency);

    let invoice = Invoice::issue(
        "INV-0001",
        Customer::new(args.customer),
        chrono::Local::now().date_naive(),
        items,
        Percent::clamped_to_100(args.tax),
        discount,
        PaymentStatus::Unpaid,
        None,
    )?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    invoice.write_to(&mut handle)?;

    Ok(())
}
