use chrono::{NaiveDate, NaiveDateTime};

/// Joins the non-empty parts with `sep`.
pub fn truthy_join<I, S>(parts: I, sep: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|p| !p.as_ref().is_empty())
        .map(|p| p.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(sep)
}

/// Expands `YYYYMMDD` or `YYYYMMDDHHMMSS` into `YYYY-MM-DD[ HH:MM:SS]`.
///
/// Anything that does not parse as a real contiguous date is returned unchanged.
pub fn from_contiguous(text: &str) -> String {
    match text.len() {
        14 => NaiveDateTime::parse_from_str(text, "%Y%m%d%H%M%S")
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|_| text.to_string()),
        8 => NaiveDate::parse_from_str(text, "%Y%m%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| text.to_string()),
        _ => text.to_string(),
    }
}

/// `Card Name(1234)`; either part may be missing.
pub fn card_name(name: Option<&str>, ending_digits: Option<&str>) -> String {
    let mut text = name.unwrap_or_default().to_string();
    if let Some(digits) = ending_digits.filter(|d| !d.is_empty()) {
        text.push_str(&format!("({})", digits));
    }
    text
}

/// `123-45-67890` for a ten-digit business registration number.
pub fn business_registration_number(number: &str) -> String {
    if number.len() != 10 || !number.is_ascii() {
        return number.to_string();
    }
    format!("{}-{}-{}", &number[0..3], &number[3..5], &number[5..10])
}

/// Prefixes the text with `"{bullet} "`.
pub fn bulletize(text: &str, bullet: &str) -> String {
    if bullet.is_empty() {
        text.to_string()
    } else {
        format!("{} {}", bullet, text)
    }
}
