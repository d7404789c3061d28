use std::iter::repeat;
use time::{Date, Month};

const DAYS_IN_WEEK: usize = 7;

/// One displayed month: the weekday offset of day 1 (0 = Sunday) plus the
/// number of days in the month.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthGrid {
    year: i32,
    month: Month,
    leading: u8,
    days: u8,
}

impl MonthGrid {
    pub(crate) fn containing(date: Date) -> MonthGrid {
        let first = date.replace_day(1).unwrap_or(date);
        MonthGrid {
            year: first.year(),
            month: first.month(),
            leading: first.weekday().number_days_from_sunday(),
            days: first.month().length(first.year()),
        }
    }

    pub(crate) fn year(&self) -> i32 {
        self.year
    }

    pub(crate) fn month(&self) -> Month {
        self.month
    }

    fn date(&self, day: u8) -> Option<Date> {
        Date::from_calendar_date(self.year, self.month, day).ok()
    }

    /// Leading blank cells followed by one cell per day 1..=N
    pub(crate) fn cells(self) -> impl Iterator<Item = Option<Date>> {
        repeat(None)
            .take(self.leading.into())
            .chain((1..=self.days).map(move |day| self.date(day)))
    }

    pub(crate) fn weeks(self) -> Vec<[Option<Date>; DAYS_IN_WEEK]> {
        let mut rows = Vec::with_capacity(6);
        let mut row = [None; DAYS_IN_WEEK];
        let mut col = 0;
        for cell in self.cells() {
            row[col] = cell;
            col += 1;
            if col == DAYS_IN_WEEK {
                rows.push(row);
                row = [None; DAYS_IN_WEEK];
                col = 0;
            }
        }
        if col > 0 {
            rows.push(row);
        }
        rows
    }
}

pub(crate) fn month_forwards(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::December => (date.year() + 1, Month::January),
        m => (date.year(), m.next()),
    };
    clamp_to_month(date, year, month)
}

pub(crate) fn month_backwards(date: Date) -> Date {
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        m => (date.year(), m.previous()),
    };
    clamp_to_month(date, year, month)
}

// Keeps the day of month where possible, clamping e.g. Jan 31 to Feb 29.
// Falls back to the input at the edges of time's supported range.
fn clamp_to_month(date: Date, year: i32, month: Month) -> Date {
    let day = date.day().min(month.length(year));
    Date::from_calendar_date(year, month, day).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn leading_blanks(grid: MonthGrid) -> usize {
        grid.cells().take_while(Option::is_none).count()
    }

    fn day_cells(grid: MonthGrid) -> usize {
        grid.cells().flatten().count()
    }

    #[test]
    fn test_march_2024() {
        let grid = MonthGrid::containing(date!(2024 - 03 - 15));
        assert_eq!(grid.year(), 2024);
        assert_eq!(grid.month(), Month::March);
        assert_eq!(leading_blanks(grid), 5);
        assert_eq!(day_cells(grid), 31);
        assert_eq!(grid.cells().count(), 36);
    }

    #[test]
    fn test_leap_february() {
        let grid = MonthGrid::containing(date!(2024 - 02 - 01));
        assert_eq!(leading_blanks(grid), 4);
        assert_eq!(day_cells(grid), 29);
        assert_eq!(grid.cells().count(), 33);
    }

    #[test]
    fn test_ordinary_february() {
        let grid = MonthGrid::containing(date!(2023 - 02 - 28));
        assert_eq!(leading_blanks(grid), 3);
        assert_eq!(day_cells(grid), 28);
    }

    #[test]
    fn test_month_starting_sunday() {
        let grid = MonthGrid::containing(date!(2024 - 09 - 30));
        assert_eq!(leading_blanks(grid), 0);
        assert_eq!(day_cells(grid), 30);
        assert_eq!(grid.cells().count(), 30);
    }

    #[test]
    fn test_cells_order() {
        let grid = MonthGrid::containing(date!(2024 - 03 - 01));
        let mut cells = grid.cells();
        for _ in 0..5 {
            assert_eq!(cells.next(), Some(None));
        }
        assert_eq!(cells.next(), Some(Some(date!(2024 - 03 - 01))));
        assert_eq!(cells.last(), Some(Some(date!(2024 - 03 - 31))));
    }

    #[test]
    fn test_weeks_chunking() {
        let weeks = MonthGrid::containing(date!(2024 - 03 - 01)).weeks();
        assert_eq!(weeks.len(), 6);
        assert_eq!(
            weeks[0],
            [
                None,
                None,
                None,
                None,
                None,
                Some(date!(2024 - 03 - 01)),
                Some(date!(2024 - 03 - 02)),
            ]
        );
        assert_eq!(weeks[5][0], Some(date!(2024 - 03 - 31)));
        assert_eq!(weeks[5][1], None);
    }

    #[test]
    fn test_month_forwards() {
        assert_eq!(month_forwards(date!(2024 - 03 - 15)), date!(2024 - 04 - 15));
    }

    #[test]
    fn test_month_forwards_rolls_year() {
        assert_eq!(month_forwards(date!(2024 - 12 - 31)), date!(2025 - 01 - 31));
    }

    #[test]
    fn test_month_forwards_clamps_day() {
        assert_eq!(month_forwards(date!(2024 - 01 - 31)), date!(2024 - 02 - 29));
        assert_eq!(month_forwards(date!(2023 - 01 - 31)), date!(2023 - 02 - 28));
    }

    #[test]
    fn test_month_backwards_rolls_year() {
        assert_eq!(
            month_backwards(date!(2024 - 01 - 15)),
            date!(2023 - 12 - 15)
        );
    }

    #[test]
    fn test_month_backwards_clamps_day() {
        assert_eq!(
            month_backwards(date!(2024 - 03 - 31)),
            date!(2024 - 02 - 29)
        );
    }
}
