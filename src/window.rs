//! Date range covered by a report.

use chrono::{Days, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar window, `days` long, ending on `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Window of `days` ending on `end`. Saturates at the earliest
    /// representable date instead of underflowing.
    pub fn trailing(end: NaiveDate, days: u64) -> Self {
        let start = end.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// Window of `days` ending today (UTC).
    pub fn ending_today(days: u64) -> Self {
        Self::trailing(Utc::now().date_naive(), days)
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_year() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        let window = ReportWindow::trailing(end, 365);

        assert_eq!(window.start_str(), "2025-10-15");
        assert_eq!(window.end_str(), "2026-10-15");
    }

    #[test]
    fn test_trailing_crosses_leap_day() {
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let window = ReportWindow::trailing(end, 365);

        assert_eq!(window.start_str(), "2023-03-02");
    }

    #[test]
    fn test_zero_days_is_single_day() {
        let end = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let window = ReportWindow::trailing(end, 0);

        assert_eq!(window.start, window.end);
    }
}
