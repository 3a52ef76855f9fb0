use crate::date::{DateRange, PartialRange};
use time::Date;

/// Notifications emitted by a [`SingleCalendar`](crate::SingleCalendar)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SingleEvent {
    /// The displayed month should become that of the given date
    ActiveDateChange(Date),
    /// The value should become the given date.  Emitted even when the host
    /// owns the value; the host decides whether to apply it.
    Change(Date),
    /// The user picked the given date
    Select(Date),
    /// The pointer entered the cell for the given date
    HoverDate(Date),
}

/// Notifications emitted by a [`RangeCalendar`](crate::RangeCalendar)
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RangeEvent {
    /// The displayed month should become that of the given date
    ActiveDateChange(Date),
    /// The user picked the given date, as either end of a range
    Select(Date),
    /// The in-progress selection changed.  Emitted on every pick; the end is
    /// absent after the first pick of a pair.
    RangeChange(PartialRange),
    /// A pair of picks was completed.  Emitted once per pair, and even when
    /// the host owns the value.
    Change(DateRange),
    /// The pointer entered the cell for the given date
    HoverDate(Date),
}
