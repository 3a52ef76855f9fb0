use crate::grid::OutOfTimeError;
use std::fmt;
use time::{
    Date,
    Month::{self, December, January},
    Weekday,
};

pub(crate) const DAYS_IN_WEEK: usize = 7;

/// Day-granularity helpers on top of [`time::Date`]
pub trait DateExt: Sized {
    /// Two dates are in the same month iff both their year and month match
    fn same_month(&self, other: &Self) -> bool;

    /// Returns the first day of the date's month
    fn first_of_month(&self) -> Self;

    /// Returns the last day of the date's month, or `None` if the month
    /// ends past the end of time
    fn last_of_month(&self) -> Option<Self>;

    /// Move the date by `delta` months, clamping the day of month to the
    /// length of the target month (so that Jan 31 + 1 month is Feb 28 or 29)
    fn add_months(&self, delta: i32) -> Result<Self, OutOfTimeError>;
}

impl DateExt for Date {
    fn same_month(&self, other: &Date) -> bool {
        self.year() == other.year() && self.month() == other.month()
    }

    fn first_of_month(&self) -> Date {
        self.replace_day(1).unwrap_or(*self)
    }

    fn last_of_month(&self) -> Option<Date> {
        let (year, month) = match self.month() {
            December => (self.year().checked_add(1)?, January),
            m => (self.year(), m.next()),
        };
        Date::from_calendar_date(year, month, 1).ok()?.previous_day()
    }

    fn add_months(&self, delta: i32) -> Result<Date, OutOfTimeError> {
        let index = i64::from(self.year()) * 12 + i64::from(u8::from(self.month()) - 1);
        let target = index + i64::from(delta);
        let year = i32::try_from(target.div_euclid(12)).map_err(|_| OutOfTimeError)?;
        let month = u8::try_from(target.rem_euclid(12) + 1)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .ok_or(OutOfTimeError)?;
        let first = Date::from_calendar_date(year, month, 1).map_err(|_| OutOfTimeError)?;
        // Only December 9999 has no "next month" to measure against.
        let length = first.last_of_month().map_or(31, |d| d.day());
        Date::from_calendar_date(year, month, self.day().min(length))
            .map_err(|_| OutOfTimeError)
    }
}

pub(crate) trait WeekdayExt {
    /// Index of the weekday counting from Sunday = 0
    fn index0(&self) -> u8;

    /// Column in which the weekday is displayed when weeks begin on
    /// `first_day`
    fn column(&self, first_day: Weekday) -> usize;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }

    fn column(&self, first_day: Weekday) -> usize {
        usize::from((self.index0() + 7 - first_day.index0()) % 7)
    }
}

/// A committed pair of dates.
///
/// The start never comes after the end, whichever order the two dates were
/// picked in.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Construct a range from two dates given in either order
    pub fn new(a: Date, b: Date) -> DateRange {
        DateRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn start(&self) -> Date {
        self.start
    }

    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns true if `date` lies strictly between the two endpoints.
    ///
    /// The endpoints themselves are never inside, so a range whose endpoints
    /// are adjacent days has no interior at all.
    pub fn has_inside(&self, date: Date) -> bool {
        let (Some(lower), Some(upper)) = (self.start.next_day(), self.end.previous_day()) else {
            return false;
        };
        lower <= date && date <= upper
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// A range as seen while it is being picked: the second date is absent until
/// the selection is completed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PartialRange {
    pub start: Date,
    pub end: Option<Date>,
}

impl From<DateRange> for PartialRange {
    fn from(range: DateRange) -> PartialRange {
        PartialRange {
            start: range.start,
            end: Some(range.end),
        }
    }
}

impl fmt::Display for PartialRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{} to {}", self.start, end),
            None => write!(f, "{} to …", self.start),
        }
    }
}
