//! Integration test walking a sale through the `standard` fixture set.
//!
//! Expected amounts, hand-computed from `fixtures/standard` (all INR):
//!
//! 1. Classic Gold Ring: 4.50 g of 22K gold at 6333.50/g, 12% making
//!    - metal value: 4.50 * 6333.50 = 28500.75
//!    - making charges: 3420.09
//!    - line total: 31920.84
//!
//! 2. Stone-set Pendant: 6.20 g of 22K gold at 6333.50/g, 15% making,
//!    stone 3500.00
//!    - metal value: 39267.70
//!    - making charges: 5890.155, reported as 5890.16 (half-up)
//!    - line total: 39267.70 + 5890.155 + 3500.00 = 48657.855 -> 48657.86
//!
//! Invoice: subtotal 80578.70, tax 3% = 2417.361 -> 2417.36,
//! discount 500.00, grand total 82496.06.
//!
//! The 22K rate of 6310.00 dated 2026-08-04 is inactive and must not win
//! the lookup over the 6333.50 rate dated 2026-08-05.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use rusty_money::{Money, iso};
use testresult::TestResult;

use carat::{
    customers::Customer,
    fixtures::Fixture,
    invoice::{Invoice, LineItem, PaymentStatus},
    pricing::quote_product,
    rates::{Metal, Purity, Rate, RateBoard},
    units::{Grams, Percent},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

#[test]
fn prices_and_issues_an_invoice_from_the_standard_set() -> TestResult {
    let mut fixture = Fixture::from_set("standard")?;

    let ring_key = fixture.product_key("gold_ring")?;
    let pendant_key = fixture.product_key("stone_pendant")?;

    let ring_quote = quote_product(fixture.catalog().get(ring_key)?, fixture.rates(), 1)?;

    assert_eq!(ring_quote.metal_value, Money::from_minor(2_850_075, iso::INR));
    assert_eq!(
        ring_quote.making_charges,
        Money::from_minor(342_009, iso::INR)
    );
    assert_eq!(ring_quote.line_total, Money::from_minor(3_192_084, iso::INR));

    let items = vec![
        LineItem::for_product(ring_key, fixture.catalog().get(ring_key)?, fixture.rates(), 1)?,
        LineItem::for_product(
            pendant_key,
            fixture.catalog().get(pendant_key)?,
            fixture.rates(),
            1,
        )?,
    ];

    let invoice = Invoice::issue(
        "INV-1001",
        Customer::new("A. Sharma"),
        date(2026, 8, 5),
        items,
        Percent::clamped_to_100(dec!(3)),
        Money::from_minor(50_000, iso::INR),
        PaymentStatus::Paid,
        None,
    )?;

    assert_eq!(invoice.subtotal(), Money::from_minor(8_057_870, iso::INR));
    assert_eq!(
        invoice.totals().tax_amount,
        Money::from_minor(241_736, iso::INR)
    );
    assert_eq!(invoice.total(), Money::from_minor(8_249_606, iso::INR));
    assert_eq!(invoice.amount_paid(), invoice.total());
    assert_eq!(invoice.balance_due()?, Money::from_minor(0, iso::INR));

    // The sale takes the sold units out of stock.
    fixture.catalog_mut().reserve(ring_key, 1)?;
    fixture.catalog_mut().reserve(pendant_key, 1)?;

    assert_eq!(fixture.catalog().get(ring_key)?.stock, 5);
    assert_eq!(fixture.catalog().get(pendant_key)?.stock, 1);

    Ok(())
}

#[test]
fn issued_invoices_survive_rate_updates() -> TestResult {
    let mut board = RateBoard::with_rates(
        [Rate {
            metal: Metal::Gold,
            purity: Purity::new("22K"),
            rate_per_gram: Money::from_minor(600_000, iso::INR),
            rate_date: date(2026, 8, 4),
            is_active: true,
        }],
        iso::INR,
    )?;

    let line = LineItem::price(
        carat::invoice::LineSource::Custom,
        "Custom Bangle",
        1,
        Grams::new(dec!(10)),
        board.rate_per_gram(Metal::Gold, &Purity::new("22K"))?,
        Percent::new(dec!(10)),
        None,
    )?;

    let invoice = Invoice::issue(
        "INV-1002",
        Customer::new("A. Sharma"),
        date(2026, 8, 4),
        vec![line],
        Percent::ZERO,
        Money::from_minor(0, iso::INR),
        PaymentStatus::Unpaid,
        None,
    )?;

    let total_at_issue = invoice.total();

    // The next day's rate goes up; the issued invoice keeps its snapshot.
    board.deactivate(Metal::Gold, &Purity::new("22K"));
    board.publish(Rate {
        metal: Metal::Gold,
        purity: Purity::new("22K"),
        rate_per_gram: Money::from_minor(700_000, iso::INR),
        rate_date: date(2026, 8, 5),
        is_active: true,
    })?;

    assert_eq!(invoice.total(), total_at_issue);
    assert_eq!(invoice.total(), Money::from_minor(6_600_000, iso::INR));

    // Editing the sale re-prices from the current board, as the form does.
    let repriced_line = LineItem::price(
        carat::invoice::LineSource::Custom,
        "Custom Bangle",
        1,
        Grams::new(dec!(10)),
        board.rate_per_gram(Metal::Gold, &Purity::new("22K"))?,
        Percent::new(dec!(10)),
        None,
    )?;

    let amended = invoice.amend(
        vec![repriced_line],
        Percent::ZERO,
        Money::from_minor(0, iso::INR),
        PaymentStatus::Unpaid,
        None,
    )?;

    assert_eq!(amended.invoice_number(), "INV-1002");
    assert_eq!(amended.total(), Money::from_minor(7_700_000, iso::INR));

    Ok(())
}

#[test]
fn a_pair_without_an_active_rate_cannot_be_priced() -> TestResult {
    let fixture = Fixture::from_set("standard")?;

    // The board quotes no Diamond rates at all.
    let result = fixture
        .rates()
        .rate_per_gram(Metal::Diamond, &Purity::new("VS1"));

    assert!(result.is_err(), "missing rates must surface, not price as zero");

    Ok(())
}
