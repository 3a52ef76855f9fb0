use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use time::{Date, Weekday};

/// Labels for the days of the week, indexed by the number of days from
/// Sunday
pub type DayNames = [String; 7];

/// Options recognized by both calendars
#[derive(Clone)]
pub struct CalendarConfig {
    first_day: Weekday,
    min_date: Option<Date>,
    max_date: Option<Date>,
    disabled_date: Option<Rc<dyn Fn(Date) -> bool>>,
    day_names: DayNames,
}

impl CalendarConfig {
    pub fn new() -> CalendarConfig {
        CalendarConfig::default()
    }

    /// Set the weekday in the leftmost column
    pub fn first_day(mut self, first_day: Weekday) -> CalendarConfig {
        self.first_day = first_day;
        self
    }

    /// Set the leftmost weekday by number, with 0 = Sunday through 6 =
    /// Saturday
    pub fn first_day_index(self, index: u8) -> Result<CalendarConfig, ConfigError> {
        if index > 6 {
            return Err(ConfigError::Weekday(index));
        }
        Ok(self.first_day(Weekday::Sunday.nth_next(index)))
    }

    /// Set the inclusive lower and upper bounds of selectable dates
    pub fn bounds(
        mut self,
        min_date: Option<Date>,
        max_date: Option<Date>,
    ) -> Result<CalendarConfig, ConfigError> {
        if let (Some(lo), Some(hi)) = (min_date, max_date) {
            if lo > hi {
                return Err(ConfigError::InvertedBounds { min: lo, max: hi });
            }
        }
        self.min_date = min_date;
        self.max_date = max_date;
        Ok(self)
    }

    /// Set an extra predicate rejecting dates.  It is consulted in addition
    /// to the bounds, never instead of them.
    pub fn disabled_date<F>(mut self, pred: F) -> CalendarConfig
    where
        F: Fn(Date) -> bool + 'static,
    {
        self.disabled_date = Some(Rc::new(pred));
        self
    }

    pub fn day_names(mut self, day_names: DayNames) -> CalendarConfig {
        self.day_names = day_names;
        self
    }

    pub fn week_start(&self) -> Weekday {
        self.first_day
    }

    pub fn min_date(&self) -> Option<Date> {
        self.min_date
    }

    pub fn max_date(&self) -> Option<Date> {
        self.max_date
    }

    pub fn day_name(&self, wd: Weekday) -> &str {
        &self.day_names[usize::from(wd.number_days_from_sunday()) % 7]
    }

    /// Returns true if `date` may be shown but not picked
    pub fn is_disabled(&self, date: Date) -> bool {
        self.min_date.is_some_and(|lo| date < lo)
            || self.max_date.is_some_and(|hi| date > hi)
            || self.disabled_date.as_ref().is_some_and(|pred| pred(date))
    }
}

impl Default for CalendarConfig {
    fn default() -> CalendarConfig {
        CalendarConfig {
            first_day: Weekday::Monday,
            min_date: None,
            max_date: None,
            disabled_date: None,
            day_names: ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"].map(String::from),
        }
    }
}

impl fmt::Debug for CalendarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarConfig")
            .field("first_day", &self.first_day)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field(
                "disabled_date",
                &self.disabled_date.as_ref().map(|_| "<predicate>"),
            )
            .field("day_names", &self.day_names)
            .finish()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid first day of week {0}; expected 0 (Sunday) through 6 (Saturday)")]
    Weekday(u8),
    #[error("minimum date {min} is after maximum date {max}")]
    InvertedBounds { min: Date, max: Date },
}
