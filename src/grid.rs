use crate::date::{DateExt, WeekdayExt, DAYS_IN_WEEK};
use std::iter::successors;
use thiserror::Error;
use time::{Date, Weekday};

/// Number of weeks shown by a calendar, whatever the length of the month
pub const WEEKS_SHOWN: usize = 6;

/// The 6×7 block of dates displayed for one month: the month itself plus
/// enough days from the adjacent months to fill every row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateMatrix {
    rows: [[Date; DAYS_IN_WEEK]; WEEKS_SHOWN],
    first_day: Weekday,
}

impl DateMatrix {
    /// Lay out the month containing `anchor`, with each row starting on
    /// `first_day`.
    ///
    /// The first row is the week containing the first of the month, so up to
    /// six leading days come from the previous month; the remaining cells
    /// are filled with the days that follow.  Fails only when those days
    /// would run past the representable range of dates.
    pub fn generate(anchor: Date, first_day: Weekday) -> Result<DateMatrix, OutOfTimeError> {
        let first = anchor.first_of_month();
        let lead = first.weekday().column(first_day);
        let start = match lead.checked_sub(1) {
            Some(n) => iter_days_before(first).nth(n).ok_or(OutOfTimeError)?,
            None => first,
        };
        let mut days = successors(Some(start), |d| d.next_day());
        let mut rows = [[start; DAYS_IN_WEEK]; WEEKS_SHOWN];
        for row in &mut rows {
            for cell in row.iter_mut() {
                *cell = days.next().ok_or(OutOfTimeError)?;
            }
        }
        Ok(DateMatrix { rows, first_day })
    }

    pub fn rows(&self) -> &[[Date; DAYS_IN_WEEK]; WEEKS_SHOWN] {
        &self.rows
    }

    /// Iterate over all 42 dates in display order along with their
    /// `(row, column)` position
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Date)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &date)| ((r, c), date))
        })
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Date> {
        self.rows.get(row)?.get(column).copied()
    }

    pub fn first(&self) -> Date {
        self.rows[0][0]
    }

    pub fn last(&self) -> Date {
        self.rows[WEEKS_SHOWN - 1][DAYS_IN_WEEK - 1]
    }

    /// The weekdays heading each column, in display order
    pub fn weekdays(&self) -> [Weekday; DAYS_IN_WEEK] {
        let mut wd = self.first_day;
        let mut out = [wd; DAYS_IN_WEEK];
        for slot in out.iter_mut().skip(1) {
            wd = wd.next();
            *slot = wd;
        }
        out
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the end of time")]
pub struct OutOfTimeError;

fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;
    use time::Weekday::*;

    #[test]
    fn test_march_2024_from_monday() {
        let matrix = DateMatrix::generate(date!(2024 - 03 - 17), Monday).unwrap();
        assert_eq!(matrix.rows().len(), 6);
        assert!(matrix.rows().iter().all(|row| row.len() == 7));
        assert_eq!(matrix.first(), date!(2024 - 02 - 26));
        assert_eq!(matrix.first().weekday(), Monday);
        assert_eq!(matrix.get(0, 4), Some(date!(2024 - 03 - 01)));
        assert_eq!(matrix.last(), date!(2024 - 04 - 07));
        assert_eq!(
            matrix.weekdays(),
            [Monday, Tuesday, Wednesday, Thursday, Friday, Saturday, Sunday]
        );
    }

    #[test]
    fn test_march_2024_from_sunday() {
        let matrix = DateMatrix::generate(date!(2024 - 03 - 01), Sunday).unwrap();
        assert_eq!(matrix.first(), date!(2024 - 02 - 25));
        assert_eq!(matrix.last(), date!(2024 - 04 - 06));
        assert_eq!(matrix.weekdays()[0], Sunday);
        assert_eq!(matrix.weekdays()[6], Saturday);
    }

    #[test]
    fn test_month_starting_on_first_day() {
        // September 2024 begins on a Sunday
        let matrix = DateMatrix::generate(date!(2024 - 09 - 30), Sunday).unwrap();
        assert_eq!(matrix.first(), date!(2024 - 09 - 01));
        assert_eq!(matrix.last(), date!(2024 - 10 - 12));
    }

    #[test]
    fn test_always_42_consecutive_days() {
        for anchor in [
            date!(2015 - 02 - 01),
            date!(2024 - 02 - 29),
            date!(2023 - 12 - 31),
            date!(2026 - 10 - 17),
        ] {
            for first_day in [Sunday, Monday, Wednesday, Saturday] {
                let matrix = DateMatrix::generate(anchor, first_day).unwrap();
                let dates = matrix.cells().map(|(_, d)| d).collect::<Vec<_>>();
                assert_eq!(dates.len(), 42);
                assert!(dates.windows(2).all(|w| w[0].next_day() == Some(w[1])));
                assert_eq!(matrix.first().weekday(), first_day);
                assert!(dates.contains(&anchor.first_of_month()));
            }
        }
    }

    #[test]
    fn test_cells_positions() {
        let matrix = DateMatrix::generate(date!(2024 - 03 - 01), Monday).unwrap();
        let mut iter = matrix.cells();
        assert_eq!(iter.next(), Some(((0, 0), date!(2024 - 02 - 26))));
        assert_eq!(iter.nth(7), Some(((1, 1), date!(2024 - 03 - 05))));
        assert_eq!(iter.last(), Some(((5, 6), date!(2024 - 04 - 07))));
        assert_eq!(matrix.get(6, 0), None);
        assert_eq!(matrix.get(0, 7), None);
    }

    #[test]
    fn test_end_of_time() {
        assert_eq!(DateMatrix::generate(Date::MAX, Monday), Err(OutOfTimeError));
        // -9999-01-01 is a Monday, so only a grid needing leading days fails
        assert!(DateMatrix::generate(Date::MIN, Monday).is_ok());
        assert_eq!(DateMatrix::generate(Date::MIN, Tuesday), Err(OutOfTimeError));
    }
}
