use super::calendar::GRID_CELLS;
use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;

/// A displayed calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl YearMonth {
    /// A month is valid only if its whole 42-day grid is representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let offset = i64::from(first.weekday().num_days_from_sunday());
        let start = first.checked_sub_signed(Duration::days(offset))?;
        start.checked_add_signed(Duration::days(GRID_CELLS as i64 - 1))?;
        Some(Self { year, month })
    }

    /// Month containing `date`, clamped to the first/last month with a complete grid
    pub fn of(date: NaiveDate) -> Self {
        let mut index = i64::from(date.year()) * 12 + i64::from(date.month0());
        let step = if date.year() > 0 { -1 } else { 1 };
        loop {
            let year = index.div_euclid(12) as i32;
            let month = index.rem_euclid(12) as u32 + 1;
            if let Some(ym) = Self::new(year, month) {
                return ym;
            }
            index += step;
        }
    }

    /// Parse "YYYY-MM"
    pub fn parse(s: &str) -> Option<Self> {
        let (y, m) = s.trim().split_once('-')?;
        Self::new(y.parse().ok()?, m.parse().ok()?)
    }

    /// Day 1 of the month. Always representable since construction checks it.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Shift by `delta` months with year roll-over.
    /// Returns `self` unchanged when the target falls outside chrono's date range.
    pub fn shift(&self, delta: i32) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) as u32 + 1;
        i32::try_from(year)
            .ok()
            .and_then(|year| Self::new(year, month))
            .unwrap_or(*self)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}년 {}월", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_rolls_over_year() {
        let dec = YearMonth::new(2024, 12).unwrap();
        assert_eq!(dec.shift(1), YearMonth::new(2025, 1).unwrap());
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.shift(-1), YearMonth::new(2023, 12).unwrap());
        assert_eq!(jan.shift(-25), YearMonth::new(2021, 12).unwrap());
    }

    #[test]
    fn test_shift_far_is_unbounded_within_calendar() {
        let mut m = YearMonth::new(2024, 3).unwrap();
        for _ in 0..1200 {
            m = m.shift(1);
        }
        assert_eq!(m, YearMonth::new(2124, 3).unwrap());
    }

    #[test]
    fn test_shift_past_date_range_is_ignored() {
        let max = YearMonth::of(NaiveDate::MAX);
        assert_eq!(max.shift(1), max);
    }

    #[test]
    fn test_months_at_date_limits_are_clamped() {
        // December of the last year would need days past the end of the range
        let last_year = NaiveDate::MAX.year();
        assert_eq!(YearMonth::new(last_year, 12), None);

        let max = YearMonth::of(NaiveDate::MAX);
        assert_eq!(max, YearMonth::new(last_year, 11).unwrap());
        assert_eq!(max.shift(1), max);

        let min = YearMonth::of(NaiveDate::MIN);
        assert_eq!(min.shift(-1), min);
    }

    #[test]
    fn test_parse() {
        assert_eq!(YearMonth::parse("2024-03"), YearMonth::new(2024, 3));
        assert_eq!(YearMonth::parse("2024-13"), None);
        assert_eq!(YearMonth::parse("march"), None);
    }

    #[test]
    fn test_display_is_localized() {
        assert_eq!(YearMonth::new(2024, 3).unwrap().to_string(), "2024년 3월");
    }
}
