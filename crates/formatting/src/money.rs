use rust_decimal::Decimal;
use std::str::FromStr;

/// The currency amounts are settled in.
pub const LOCAL_CURRENCY: &str = "KRW";

/// Parses an amount as sent by the API (`"12,345"`, `"1 200"`, `"3.50"`).
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let cleaned: String = text.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Minor-unit digits shown for a currency code.
fn currency_places(code: &str) -> u32 {
    match code {
        "KRW" | "JPY" | "VND" => 0,
        _ => 2,
    }
}

/// e.g. `KRW 12,345` or `USD 1,234.50`.
pub fn currency(amount: Decimal, code: &str) -> String {
    format!("{} {}", code, grouped(amount, currency_places(code)))
}

pub fn local_currency(amount: Decimal) -> String {
    currency(amount, LOCAL_CURRENCY)
}

/// A plain number with at least `min_places` and at most three fraction digits.
pub fn number(value: Decimal, min_places: u32) -> String {
    let places = value.normalize().scale().clamp(min_places, min_places.max(3));
    grouped(value, places)
}

/// Thousands-grouped rendering rounded to `places` fraction digits.
fn grouped(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp(places);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", places as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(&frac);
    }
    out
}

/// `total = net + tax (tax) + service (service charge) + deposit (cup deposit)`.
pub fn local_amount_breakdown(
    total: Decimal,
    net: Decimal,
    tax: Option<Decimal>,
    service_charge: Option<Decimal>,
    cup_deposit: Option<Decimal>,
) -> String {
    let mut parts = vec![local_currency(net)];
    if let Some(tax) = tax.filter(|v| !v.is_zero()) {
        parts.push(format!("{} (tax)", local_currency(tax)));
    }
    if let Some(service) = service_charge.filter(|v| !v.is_zero()) {
        parts.push(format!("{} (service charge)", local_currency(service)));
    }
    if let Some(deposit) = cup_deposit.filter(|v| v.is_sign_positive() && !v.is_zero()) {
        parts.push(format!("{} (cup deposit)", local_currency(deposit)));
    }
    format!("{} = {}", local_currency(total), parts.join(" + "))
}

/// `USD 10.00 -> USD 10.50`: the amount charged abroad and what was billed for it.
pub fn foreign_currency_settlement(
    transaction_currency: &str,
    transaction_amount: Decimal,
    settlement_currency: &str,
    settlement_amount: Decimal,
) -> String {
    format!(
        "{} -> {}",
        currency(transaction_amount, transaction_currency),
        currency(settlement_amount, settlement_currency)
    )
}

/// `KRW 14,000 = USD 10.50 x 1,300.00 (= KRW 13,650) + KRW 350`.
pub fn foreign_exchange_breakdown(
    total: Decimal,
    billed_currency: &str,
    billed_amount: Decimal,
    exchange_rate: Decimal,
    local_amount: Option<Decimal>,
    exchange_fee: Option<Decimal>,
) -> String {
    let mut text = format!(
        "{} = {} x {}",
        local_currency(total),
        currency(billed_amount, billed_currency),
        number(exchange_rate, 2)
    );
    if let Some(local) = local_amount.filter(|v| !v.is_zero()) {
        text.push_str(&format!(" (= {})", local_currency(local)));
    }
    if let Some(fee) = exchange_fee.filter(|v| !v.is_zero()) {
        text.push_str(&format!(" + {}", local_currency(fee)));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn amounts_parse_with_separators() {
        assert_eq!(parse_amount("12,345"), Some(dec!(12345)));
        assert_eq!(parse_amount(" 1 200 "), Some(dec!(1200)));
        assert_eq!(parse_amount("3.50"), Some(dec!(3.50)));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("n/a"), None);
    }

    #[test]
    fn currency_groups_and_rounds() {
        assert_eq!(currency(dec!(1234567), "KRW"), "KRW 1,234,567");
        assert_eq!(currency(dec!(999), "KRW"), "KRW 999");
        assert_eq!(currency(dec!(1234.5), "USD"), "USD 1,234.50");
        assert_eq!(currency(dec!(-4500), "KRW"), "KRW -4,500");
        assert_eq!(number(dec!(1300.257), 2), "1,300.257");
        assert_eq!(number(dec!(1300), 2), "1,300.00");
    }

    #[test]
    fn local_breakdown_skips_empty_parts() {
        assert_eq!(
            local_amount_breakdown(dec!(11000), dec!(10000), Some(dec!(1000)), None, Some(dec!(0))),
            "KRW 11,000 = KRW 10,000 + KRW 1,000 (tax)"
        );
    }

    #[test]
    fn foreign_breakdown_lists_fee() {
        assert_eq!(
            foreign_exchange_breakdown(
                dec!(14000),
                "USD",
                dec!(10.5),
                dec!(1300),
                Some(dec!(13650)),
                Some(dec!(350)),
            ),
            "KRW 14,000 = USD 10.50 x 1,300.00 (= KRW 13,650) + KRW 350"
        );
        assert_eq!(
            foreign_currency_settlement("EUR", dec!(9), "USD", dec!(10.5)),
            "EUR 9.00 -> USD 10.50"
        );
    }
}
