use crate::config::CalendarConfig;
use crate::grid::{DateMatrix, OutOfTimeError};
use time::Date;

/// Display flags for a single date cell.
///
/// The range flags are only ever set by a
/// [`RangeCalendar`](crate::RangeCalendar).  `disabled` is independent of the
/// others, so a disabled date may still be shown as part of a range.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CellState {
    pub selected: bool,
    pub today: bool,
    pub other_month: bool,
    pub disabled: bool,
    pub range_start: bool,
    pub range_end: bool,
    pub in_range: bool,
}

/// What a calendar widget needs to know about a calendar model in order to
/// draw it
pub trait Classify {
    fn config(&self) -> &CalendarConfig;

    /// The date whose month is displayed
    fn active_date(&self) -> Date;

    fn classify(&self, date: Date) -> CellState;

    fn matrix(&self) -> Result<DateMatrix, OutOfTimeError> {
        DateMatrix::generate(self.active_date(), self.config().week_start())
    }
}
