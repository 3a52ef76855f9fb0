//! Single-date and date-range calendar pickers.
//!
//! A [`SingleCalendar`] or [`RangeCalendar`] holds the selection state of one
//! calendar and turns user input (picking a date, hovering over one, the
//! pointer leaving the grid) into state updates plus a list of notifications
//! for the host.  Each date on display is classified by [`Classify::classify`]
//! and drawn by the ratatui widget [`CalendarView`].
mod cell;
mod config;
mod control;
mod date;
mod event;
mod frame;
mod grid;
mod range;
mod single;
pub mod theme;
mod widget;
pub use crate::cell::{CellState, Classify};
pub use crate::config::{CalendarConfig, ConfigError, DayNames};
pub use crate::control::Controlled;
pub use crate::date::{DateExt, DateRange, PartialRange};
pub use crate::event::{RangeEvent, SingleEvent};
pub use crate::grid::{DateMatrix, OutOfTimeError, WEEKS_SHOWN};
pub use crate::range::{RangeCalendar, Selection};
pub use crate::single::SingleCalendar;
pub use crate::widget::{CalendarView, DateStyler, CALENDAR_HEIGHT, CALENDAR_WIDTH};
