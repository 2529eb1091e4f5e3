//! Invoices
//!
//! Sale records and the aggregation from line snapshots to a grand total.
//! A line's total and the invoice totals are snapshots computed at
//! submission time; publishing new rates never changes an issued invoice.

use std::{fmt, io};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, MoneyError, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    customers::Customer,
    pricing::{PricingError, price_line},
    products::{Product, ProductKey},
    rates::RateBoard,
    units::{Grams, Percent},
};

/// Errors related to invoice construction or totals.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// No line items were provided, so currency could not be determined.
    #[error("no line items provided; cannot determine currency")]
    NoLines,

    /// A line's currency differs from the invoice currency (index, line currency, invoice currency).
    #[error("line {0} has currency {1}, but invoice has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A charge field's currency differs from the invoice currency (field, its currency, invoice currency).
    #[error("{0} has currency {1}, but invoice has currency {2}")]
    ChargeCurrencyMismatch(&'static str, &'static str, &'static str),

    /// An aggregated amount cannot be represented in minor units.
    #[error("aggregated amount cannot be represented in minor units")]
    AmountOverflow,

    /// Wrapped line pricing error.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    Io(#[from] io::Error),
}

/// Payment state of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// Paid in full at submission.
    Paid,

    /// Partially paid; the entered amount stands.
    Partial,

    /// Nothing paid yet.
    #[default]
    Unpaid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Partial => "Partially Paid",
            PaymentStatus::Unpaid => "Unpaid",
        };

        write!(f, "{label}")
    }
}

/// Where a line item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSource {
    /// A catalogue product, referenced by key.
    Catalog(ProductKey),

    /// An ad-hoc piece entered directly on the sale form.
    Custom,
}

/// One line of an invoice.
///
/// Every field is a snapshot taken when the line was priced: the rate,
/// weight and making charges the sale was made at, and the precomputed
/// total. Rendering reads the stored total; it is never re-derived from
/// current rates, so historical invoices survive rate updates.
#[derive(Debug, Clone)]
pub struct LineItem<'a> {
    source: LineSource,
    description: String,
    quantity: u32,
    net_weight: Grams,
    rate_per_gram: Money<'a, Currency>,
    making_charges: Percent,
    stone_price: Option<Money<'a, Currency>>,
    total: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Prices a line and snapshots the result.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the line cannot be priced.
    pub fn price(
        source: LineSource,
        description: impl Into<String>,
        quantity: u32,
        net_weight: Grams,
        rate_per_gram: Money<'a, Currency>,
        making_charges: Percent,
        stone_price: Option<Money<'a, Currency>>,
    ) -> Result<Self, PricingError> {
        let quote = price_line(
            net_weight,
            rate_per_gram,
            making_charges,
            stone_price,
            quantity,
        )?;

        Ok(LineItem {
            source,
            description: description.into(),
            quantity,
            net_weight,
            rate_per_gram,
            making_charges,
            stone_price,
            total: quote.line_total,
        })
    }

    /// Prices `quantity` units of a catalogue product, snapshotting the
    /// rate currently active for its (metal, purity) pair.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if no active rate is published for the
    /// pair or the line cannot be priced.
    pub fn for_product(
        key: ProductKey,
        product: &Product<'a>,
        rates: &RateBoard<'a>,
        quantity: u32,
    ) -> Result<Self, PricingError> {
        let rate_per_gram = rates.rate_per_gram(product.metal, &product.purity)?;

        Self::price(
            LineSource::Catalog(key),
            product.name.clone(),
            quantity,
            product.net_weight,
            rate_per_gram,
            product.making_charges,
            product.stone_price,
        )
    }

    /// Where the line came from.
    pub fn source(&self) -> LineSource {
        self.source
    }

    /// Description printed on the invoice.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Number of units sold.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Net metal weight the line was priced at.
    pub fn net_weight(&self) -> Grams {
        self.net_weight
    }

    /// Rate-per-gram snapshotted at sale time.
    pub fn rate_per_gram(&self) -> Money<'a, Currency> {
        self.rate_per_gram
    }

    /// Making-charges percentage snapshotted at sale time.
    pub fn making_charges(&self) -> Percent {
        self.making_charges
    }

    /// Stone price, if the piece carries a stone.
    pub fn stone_price(&self) -> Option<Money<'a, Currency>> {
        self.stone_price
    }

    /// Precomputed line total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}

/// Aggregated invoice amounts.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceTotals<'a> {
    /// Sum of line totals before tax and discount
    pub subtotal: Money<'a, Currency>,

    /// Tax charged on the subtotal
    pub tax_amount: Money<'a, Currency>,

    /// Absolute discount applied after tax
    pub discount: Money<'a, Currency>,

    /// Grand total, clamped at zero
    pub total: Money<'a, Currency>,
}

/// Aggregates line totals into invoice totals.
///
/// Tax is a percentage of the subtotal; the discount is an absolute
/// currency amount whose sign is ignored. The grand total is clamped at
/// zero: a discount larger than the taxed subtotal zeroes the invoice, it
/// never goes negative.
///
/// # Errors
///
/// - [`InvoiceError::NoLines`]: no line totals were provided.
/// - [`InvoiceError::CurrencyMismatch`] /
///   [`InvoiceError::ChargeCurrencyMismatch`]: a line or the discount is in
///   a foreign currency.
/// - [`InvoiceError::AmountOverflow`]: an aggregate cannot be represented
///   in minor units.
pub fn aggregate_totals<'a>(
    line_totals: &[Money<'a, Currency>],
    tax: Percent,
    discount: Money<'a, Currency>,
) -> Result<InvoiceTotals<'a>, InvoiceError> {
    let first = line_totals.first().ok_or(InvoiceError::NoLines)?;
    let currency = first.currency();

    let mut subtotal_minor = 0_i64;

    for (index, line_total) in line_totals.iter().enumerate() {
        let line_currency = line_total.currency();

        if line_currency != currency {
            return Err(InvoiceError::CurrencyMismatch(
                index,
                line_currency.iso_alpha_code,
                currency.iso_alpha_code,
            ));
        }

        subtotal_minor = subtotal_minor
            .checked_add(line_total.to_minor_units())
            .ok_or(InvoiceError::AmountOverflow)?;
    }

    let discount_currency = discount.currency();

    if discount_currency != currency {
        return Err(InvoiceError::ChargeCurrencyMismatch(
            "discount",
            discount_currency.iso_alpha_code,
            currency.iso_alpha_code,
        ));
    }

    let tax_minor = Decimal::from(subtotal_minor)
        .checked_mul(tax.as_fraction())
        .ok_or(InvoiceError::AmountOverflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(InvoiceError::AmountOverflow)?;

    let discount_minor = discount
        .to_minor_units()
        .checked_abs()
        .ok_or(InvoiceError::AmountOverflow)?;

    let total_minor = subtotal_minor
        .checked_add(tax_minor)
        .ok_or(InvoiceError::AmountOverflow)?
        .saturating_sub(discount_minor)
        .max(0);

    Ok(InvoiceTotals {
        subtotal: Money::from_minor(subtotal_minor, currency),
        tax_amount: Money::from_minor(tax_minor, currency),
        discount: Money::from_minor(discount_minor, currency),
        total: Money::from_minor(total_minor, currency),
    })
}

/// A sale invoice.
///
/// Totals are computed once, at issue (or amend) time, from the line item
/// snapshots.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    invoice_number: String,
    customer: Customer,
    date: NaiveDate,
    items: Vec<LineItem<'a>>,
    tax: Percent,
    totals: InvoiceTotals<'a>,
    payment_status: PaymentStatus,
    amount_paid: Money<'a, Currency>,
}

impl<'a> Invoice<'a> {
    /// Issues an invoice from priced line items.
    ///
    /// `amount_paid` defaults to the grand total for [`PaymentStatus::Paid`]
    /// and to zero otherwise; pass an explicit amount for partial payments.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if the totals cannot be aggregated or a
    /// charge is in a foreign currency.
    #[expect(
        clippy::too_many_arguments,
        reason = "mirrors the sale submission form field-for-field"
    )]
    pub fn issue(
        invoice_number: impl Into<String>,
        customer: Customer,
        date: NaiveDate,
        items: Vec<LineItem<'a>>,
        tax: Percent,
        discount: Money<'a, Currency>,
        payment_status: PaymentStatus,
        amount_paid: Option<Money<'a, Currency>>,
    ) -> Result<Self, InvoiceError> {
        let line_totals: Vec<Money<'a, Currency>> =
            items.iter().map(LineItem::total).collect();

        let totals = aggregate_totals(&line_totals, tax, discount)?;
        let currency = totals.total.currency();

        let amount_paid = match (payment_status, amount_paid) {
            (_, Some(paid)) => {
                let paid_currency = paid.currency();

                if paid_currency != currency {
                    return Err(InvoiceError::ChargeCurrencyMismatch(
                        "amount paid",
                        paid_currency.iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }

                paid
            }
            (PaymentStatus::Paid, None) => totals.total,
            (_, None) => Money::from_minor(0, currency),
        };

        Ok(Invoice {
            invoice_number: invoice_number.into(),
            customer,
            date,
            items,
            tax,
            totals,
            payment_status,
            amount_paid,
        })
    }

    /// Re-issues the invoice with the current form state.
    ///
    /// Editing a sale recomputes totals from the new line snapshots under
    /// the same invoice number, customer and date; the stored totals of the
    /// original issue are discarded, not patched.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if the totals cannot be aggregated or a
    /// charge is in a foreign currency.
    pub fn amend(
        self,
        items: Vec<LineItem<'a>>,
        tax: Percent,
        discount: Money<'a, Currency>,
        payment_status: PaymentStatus,
        amount_paid: Option<Money<'a, Currency>>,
    ) -> Result<Self, InvoiceError> {
        Self::issue(
            self.invoice_number,
            self.customer,
            self.date,
            items,
            tax,
            discount,
            payment_status,
            amount_paid,
        )
    }

    /// Invoice number.
    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    /// Customer the sale is invoiced to.
    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    /// Date of sale.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Line items, with their sale-time snapshots.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Tax percentage applied to the subtotal.
    pub fn tax(&self) -> Percent {
        self.tax
    }

    /// Aggregated amounts.
    pub fn totals(&self) -> &InvoiceTotals<'a> {
        &self.totals
    }

    /// Sum of line totals before tax and discount.
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.totals.subtotal
    }

    /// Grand total.
    pub fn total(&self) -> Money<'a, Currency> {
        self.totals.total
    }

    /// Payment state at submission.
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    /// Amount received so far.
    pub fn amount_paid(&self) -> Money<'a, Currency> {
        self.amount_paid
    }

    /// Outstanding balance: grand total minus amount paid.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn balance_due(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.totals.total.sub(self.amount_paid)
    }

    /// Prints the invoice as a line item table with a totals summary.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if the invoice cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), InvoiceError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Net Wt", "Rate/g", "Making", "Stone", "Total"]);

        for item in &self.items {
            builder.push_record([
                item.description().to_string(),
                item.quantity().to_string(),
                item.net_weight().to_string(),
                item.rate_per_gram().to_string(),
                item.making_charges().to_string(),
                item.stone_price()
                    .map_or_else(|| "-".to_string(), |stone| stone.to_string()),
                item.total().to_string(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::sharp());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(
            out,
            "Invoice {} for {} on {}",
            self.invoice_number, self.customer.name, self.date
        )?;
        writeln!(out, "{table}")?;
        writeln!(out)?;
        writeln!(out, "Subtotal: {}", self.totals.subtotal)?;
        writeln!(out, "Tax ({}): {}", self.tax, self.totals.tax_amount)?;
        writeln!(out, "Discount: {}", self.totals.discount)?;
        writeln!(out, "Total:    {}", self.totals.total)?;
        writeln!(out, "Status:   {}", self.payment_status)?;
        writeln!(out, "Paid:     {}", self.amount_paid)?;
        writeln!(out, "Balance:  {}", self.balance_due()?)?;

        Ok(())
    }
}
