use crate::error::CoreError;
use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Utc};
use serde::Serialize;

/// A closed calendar date range for which one query is issued.
///
/// Both `start` and `end` are inclusive day boundaries and `start <= end`
/// holds for every constructed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CalendarWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl CalendarWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        if start > end {
            return Err(CoreError::InvalidArgument(
                "window".to_string(),
                format!("start {} is after end {}", start, end),
            ));
        }
        Ok(Self { start, end })
    }

    /// The window from `start_day` of `month/year` through the last day of that month.
    ///
    /// A `start_day` past the end of the month is clamped to the month's last day.
    pub fn remaining_month(year: i32, month: u32, start_day: u32) -> Result<Self, CoreError> {
        if !(1..=12).contains(&month) {
            return Err(CoreError::InvalidArgument(
                "month".to_string(),
                format!("{} is not in 1..=12", month),
            ));
        }
        if start_day == 0 {
            return Err(CoreError::InvalidArgument(
                "start_day".to_string(),
                "day of month starts at 1".to_string(),
            ));
        }

        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::InvalidArgument("year".to_string(), format!("{} is out of range", year))
        })?;
        let end = last_day_of_month(first)?;
        let start = first
            .with_day(start_day.min(end.day()))
            .unwrap_or(first);

        Self::new(start, end)
    }

    /// The partial window from the first of `reference`'s month through `reference`.
    pub fn month_to_date(reference: NaiveDate) -> Self {
        let start = reference.with_day(1).unwrap_or(reference);
        Self { start, end: reference }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days covered, both ends included.
    pub fn days_span(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    pub fn start_text(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_text(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }

    /// Contiguous `YYYYMMDD` form handed to the remote query.
    pub fn start_boundary(&self) -> String {
        self.start.format("%Y%m%d").to_string()
    }

    pub fn end_boundary(&self) -> String {
        self.end.format("%Y%m%d").to_string()
    }

    /// e.g. `2024-02-01 - 2024-02-29 (29 days)`
    pub fn text(&self) -> String {
        let days = self.days_span();
        let plural = if days > 1 { "s" } else { "" };
        format!(
            "{} - {} ({} day{})",
            self.start_text(),
            self.end_text(),
            days,
            plural
        )
    }
}

fn last_day_of_month(first: NaiveDate) -> Result<NaiveDate, CoreError> {
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(|| {
            CoreError::InvalidArgument(
                "month".to_string(),
                format!("cannot compute the end of {}", first.format("%Y-%m")),
            )
        })
}

/// Generates `months` full prior-month windows followed by a month-to-date window.
///
/// Window `k` (0-based, oldest first) covers the month lying `months - k` months
/// before the reference month. The oldest one starts on the reference
/// day-of-month so the whole sequence spans `months` months back from
/// `reference`; the others start on the 1st.
pub fn trailing_month_windows(
    months: u32,
    reference: NaiveDate,
) -> Result<Vec<CalendarWindow>, CoreError> {
    let first_of_month = reference.with_day(1).unwrap_or(reference);
    let mut windows = Vec::with_capacity(months as usize + 1);

    for month_diff in 0..months {
        let month_start = first_of_month
            .checked_sub_months(Months::new(months - month_diff))
            .ok_or_else(|| {
                CoreError::InvalidArgument(
                    "months".to_string(),
                    format!("{} months before {} is out of range", months, reference),
                )
            })?;
        let start_day = if month_diff == 0 { reference.day() } else { 1 };
        windows.push(CalendarWindow::remaining_month(
            month_start.year(),
            month_start.month(),
            start_day,
        )?);
    }
    windows.push(CalendarWindow::month_to_date(reference));

    tracing::debug!(count = windows.len(), %reference, "Generated calendar windows.");
    Ok(windows)
}

/// The wall-clock bounds of one remote query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QueryInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl QueryInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn elapsed(&self) -> TimeDelta {
        self.end - self.start
    }

    pub fn start_text(&self) -> String {
        self.start.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }

    pub fn end_text(&self) -> String {
        self.end.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
    }

    /// Elapsed seconds with millisecond precision, e.g. `1.250`.
    pub fn elapsed_secs_text(&self) -> String {
        format!("{:.3}", self.elapsed().num_milliseconds() as f64 / 1000.0)
    }

    /// Compact identifier derived from the start time, e.g. `20240201-093000-125`.
    pub fn query_id(&self) -> String {
        self.start.format("%Y%m%d-%H%M%S-%3f").to_string()
    }

    pub fn text(&self) -> String {
        format!(
            "{} -> {} ({} secs)",
            self.start_text(),
            self.end_text(),
            self.elapsed_secs_text()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn remaining_month_covers_leap_february() {
        let window = CalendarWindow::remaining_month(2024, 2, 1).unwrap();
        assert_eq!(window.start(), date(2024, 2, 1));
        assert_eq!(window.end(), date(2024, 2, 29));
        assert_eq!(window.days_span(), 29);
    }

    #[test]
    fn remaining_month_covers_common_february() {
        let window = CalendarWindow::remaining_month(2023, 2, 1).unwrap();
        assert_eq!(window.end(), date(2023, 2, 28));
        assert_eq!(window.days_span(), 28);
    }

    #[test]
    fn remaining_month_handles_december() {
        let window = CalendarWindow::remaining_month(2023, 12, 15).unwrap();
        assert_eq!(window.start(), date(2023, 12, 15));
        assert_eq!(window.end(), date(2023, 12, 31));
        assert_eq!(window.days_span(), 17);
    }

    #[test]
    fn remaining_month_rejects_bad_month() {
        assert!(matches!(
            CalendarWindow::remaining_month(2024, 13, 1),
            Err(CoreError::InvalidArgument(..))
        ));
        assert!(CalendarWindow::remaining_month(2024, 0, 1).is_err());
        assert!(CalendarWindow::remaining_month(2024, 5, 0).is_err());
    }

    #[test]
    fn remaining_month_clamps_start_day() {
        let window = CalendarWindow::remaining_month(2023, 4, 31).unwrap();
        assert_eq!(window.start(), date(2023, 4, 30));
        assert_eq!(window.days_span(), 1);
        assert_eq!(window.text(), "2023-04-30 - 2023-04-30 (1 day)");
    }

    #[test]
    fn new_rejects_reversed_range() {
        assert!(CalendarWindow::new(date(2024, 3, 2), date(2024, 3, 1)).is_err());
    }

    #[test]
    fn month_to_date_starts_on_the_first() {
        let window = CalendarWindow::month_to_date(date(2024, 5, 17));
        assert_eq!(window.start(), date(2024, 5, 1));
        assert_eq!(window.end(), date(2024, 5, 17));
        assert_eq!(window.text(), "2024-05-01 - 2024-05-17 (17 days)");
        assert_eq!(window.start_boundary(), "20240501");
        assert_eq!(window.end_boundary(), "20240517");
    }

    #[test]
    fn trailing_windows_are_oldest_first() {
        let reference = date(2024, 5, 17);
        let windows = trailing_month_windows(3, reference).unwrap();

        assert_eq!(windows.len(), 4);
        assert_eq!(windows[0].start(), date(2024, 2, 17));
        assert_eq!(windows[0].end(), date(2024, 2, 29));
        assert_eq!(windows[1].start(), date(2024, 3, 1));
        assert_eq!(windows[1].end(), date(2024, 3, 31));
        assert_eq!(windows[2].start(), date(2024, 4, 1));
        assert_eq!(windows[2].end(), date(2024, 4, 30));
        assert_eq!(windows[3], CalendarWindow::month_to_date(reference));
    }

    #[test]
    fn trailing_windows_cross_year_boundary() {
        let windows = trailing_month_windows(2, date(2024, 1, 10)).unwrap();
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].start(), date(2023, 11, 10));
        assert_eq!(windows[1].start(), date(2023, 12, 1));
        assert_eq!(windows[1].end(), date(2023, 12, 31));
    }

    #[test]
    fn zero_months_yields_only_month_to_date() {
        let windows = trailing_month_windows(0, date(2024, 5, 17)).unwrap();
        assert_eq!(windows, vec![CalendarWindow::month_to_date(date(2024, 5, 17))]);
    }

    #[test]
    fn query_interval_texts() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 9, 30, 0).unwrap();
        let end = start + TimeDelta::milliseconds(1250);
        let interval = QueryInterval::new(start, end);

        assert_eq!(interval.elapsed(), TimeDelta::milliseconds(1250));
        assert_eq!(interval.elapsed_secs_text(), "1.250");
        assert_eq!(interval.query_id(), "20240201-093000-000");
        assert_eq!(
            interval.text(),
            "2024-02-01 09:30:00.000 -> 2024-02-01 09:30:01.250 (1.250 secs)"
        );
    }
}
