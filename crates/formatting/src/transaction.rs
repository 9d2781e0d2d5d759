//! Field interpretation for authorized and settled transactions.
//!
//! Both kinds share one record type; the few derived values that differ
//! (cancel flag, effective amount, amount breakdown) branch on [`TransactionKind`].

use crate::money::{self, LOCAL_CURRENCY, local_currency, parse_amount};
use crate::text::{card_name, from_contiguous, truthy_join};
use core_types::{RawRecord, TransactionKind};
use rust_decimal::Decimal;

const SEP: &str = " · ";

fn amount_field(record: &RawRecord, name: &str) -> Option<Decimal> {
    record.text(name).as_deref().and_then(parse_amount)
}

fn amount_or_zero(record: &RawRecord, name: &str) -> Decimal {
    amount_field(record, name).unwrap_or(Decimal::ZERO)
}

pub fn is_canceled(kind: TransactionKind, record: &RawRecord) -> bool {
    match kind {
        // The authorization feed spells the flag this way.
        TransactionKind::Authorized => record.flag("cancled"),
        TransactionKind::Settled => record.flag("canceled"),
    }
}

pub fn is_settled(kind: TransactionKind, record: &RawRecord) -> bool {
    kind == TransactionKind::Settled || record.flag("settled")
}

/// True when the transaction currency is present and not the local one.
pub fn is_foreign_currency(record: &RawRecord) -> bool {
    record
        .text("currency")
        .is_some_and(|c| c != LOCAL_CURRENCY)
}

/// The amount charged in local currency.
pub fn amount(kind: TransactionKind, record: &RawRecord) -> Decimal {
    match kind {
        TransactionKind::Settled if is_foreign_currency(record) => {
            amount_or_zero(record, "registered_amount") + amount_or_zero(record, "extra_fee")
        }
        _ => amount_or_zero(record, "approved_amount"),
    }
}

/// `YYYY-MM-DD HH:MM:SS` from the approval date and time fields.
pub fn datetime_text(record: &RawRecord) -> String {
    let mut text = record.text("approved_date").unwrap_or_default();
    if let Some(time) = record.text("approved_time") {
        if text.len() == 8 && time.len() == 6 {
            text.push_str(&time);
        }
    }
    from_contiguous(&text)
}

pub fn canceled_text(kind: TransactionKind, record: &RawRecord) -> String {
    if !is_canceled(kind, record) {
        return String::new();
    }
    match record.text("cancel_date") {
        Some(date) => format!("(CANCELED {})", from_contiguous(&date)),
        None => "(CANCELED)".to_string(),
    }
}

/// `Merchant (in City, Nation) · merchant number · category`.
pub fn merchant_text(record: &RawRecord) -> String {
    let location = truthy_join(
        [
            record.text("city").unwrap_or_default(),
            record.text("nation").unwrap_or_default(),
        ],
        ", ",
    );
    let name = match (record.text("merchant"), location.is_empty()) {
        (Some(merchant), false) => format!("{} (in {})", merchant, location),
        (Some(merchant), true) => merchant,
        (None, false) => format!("(in {})", location),
        (None, true) => String::new(),
    };
    truthy_join(
        [
            name,
            record.text("merchant_number").unwrap_or_default(),
            record.text("merchant_category").unwrap_or_default(),
        ],
        SEP,
    )
}

pub fn amount_breakdown(kind: TransactionKind, record: &RawRecord) -> String {
    match kind {
        TransactionKind::Authorized => authorized_breakdown(record),
        TransactionKind::Settled => settled_breakdown(record),
    }
}

fn authorized_breakdown(record: &RawRecord) -> String {
    let approved = amount_or_zero(record, "approved_amount");
    match record.text("class").as_deref() {
        Some("D") => money::local_amount_breakdown(
            approved,
            amount_or_zero(record, "approved_amount_percent"),
            amount_field(record, "tax"),
            amount_field(record, "fee"),
            amount_field(record, "deposit"),
        ),
        Some("I") => format!(
            "{} ({})",
            local_currency(approved),
            money::currency(
                amount_or_zero(record, "currency_amount"),
                &record.text("currency").unwrap_or_default()
            )
        ),
        _ => local_currency(approved),
    }
}

fn settled_breakdown(record: &RawRecord) -> String {
    match record.text("billing_currency") {
        Some(billing_currency) => {
            let settlement = money::foreign_currency_settlement(
                &record.text("currency").unwrap_or_default(),
                amount_or_zero(record, "foreign_currency_amount"),
                &billing_currency,
                amount_or_zero(record, "billing_amount"),
            );
            let exchange = money::foreign_exchange_breakdown(
                amount(TransactionKind::Settled, record),
                &billing_currency,
                amount_or_zero(record, "billing_amount"),
                amount_or_zero(record, "billing_after_fee"),
                amount_field(record, "registered_amount"),
                amount_field(record, "extra_fee"),
            );
            format!("{}{}{}", settlement, SEP, exchange)
        }
        None => money::local_amount_breakdown(
            amount_or_zero(record, "approved_amount"),
            amount_or_zero(record, "registered_amount"),
            amount_field(record, "sales_tax"),
            None,
            None,
        ),
    }
}

/// One-line headline: cancel marker, time, approval number, merchant, amount.
pub fn headline(kind: TransactionKind, record: &RawRecord) -> String {
    truthy_join(
        [
            canceled_text(kind, record),
            datetime_text(record),
            record.text("approval_number").unwrap_or_default(),
            record.text("merchant").unwrap_or_default(),
            local_currency(amount(kind, record)),
        ],
        SEP,
    )
}

/// Three summary lines: what and how much, which card and when, the breakdown.
pub fn summary(kind: TransactionKind, record: &RawRecord) -> Vec<String> {
    let mut first = vec![
        truthy_join(
            [
                canceled_text(kind, record),
                record.text("merchant").unwrap_or_default(),
            ],
            " ",
        ),
        record.text("approval_number").unwrap_or_default(),
    ];
    if is_foreign_currency(record) {
        let (amount_name, currency_name) = if is_settled(kind, record) {
            ("billing_amount", "billing_currency")
        } else {
            ("currency_amount", "currency")
        };
        first.push(money::currency(
            amount_or_zero(record, amount_name),
            &record.text(currency_name).unwrap_or_default(),
        ));
    }
    first.push(local_currency(amount(kind, record)));

    let card = card_name(
        record.text("name").as_deref(),
        record.text("card_ending_digits").as_deref(),
    );

    vec![
        truthy_join(first, SEP),
        truthy_join([card, datetime_text(record)], SEP),
        amount_breakdown(kind, record),
    ]
}
