use crate::cell::CellState;
use crate::config::CalendarConfig;
use crate::control::Controlled;
use crate::date::DateExt;
use crate::grid::OutOfTimeError;
use time::Date;

/// State common to both kinds of calendar: options, the current date, and
/// the month on display
#[derive(Clone, Debug)]
pub(crate) struct Frame {
    pub(crate) config: CalendarConfig,
    pub(crate) today: Date,
    anchor: Controlled<Date>,
    // Whether the anchor came from the host rather than being derived from
    // the value or the current date
    anchor_given: bool,
}

impl Frame {
    pub(crate) fn new(today: Date) -> Frame {
        Frame {
            config: CalendarConfig::default(),
            today,
            anchor: Controlled::Internal(today),
            anchor_given: false,
        }
    }

    pub(crate) fn anchor(&self) -> Date {
        self.anchor.value()
    }

    pub(crate) fn anchor_is_external(&self) -> bool {
        self.anchor.is_external()
    }

    /// Set the anchor on behalf of the host
    pub(crate) fn give_anchor(&mut self, anchor: Controlled<Date>) {
        self.anchor = anchor;
        self.anchor_given = true;
    }

    /// Derive the anchor from the calendar's value, unless the host already
    /// supplied one
    pub(crate) fn anchor_from_value(&mut self, date: Option<Date>) {
        if !self.anchor_given {
            self.anchor = Controlled::Internal(date.unwrap_or(self.today));
        }
    }

    pub(crate) fn release_anchor(&mut self) {
        self.anchor = self.anchor.release();
    }

    /// Classification that does not depend on the selection
    pub(crate) fn base_state(&self, date: Date) -> CellState {
        CellState {
            today: date == self.today,
            other_month: !date.same_month(&self.anchor.value()),
            disabled: self.config.is_disabled(date),
            ..CellState::default()
        }
    }

    /// Update the anchor after the user picked `date`.  Returns the date to
    /// report as the new anchor if `date` lies outside the displayed month,
    /// whether or not the anchor actually moved.
    pub(crate) fn follow_pick(&mut self, date: Date) -> Option<Date> {
        if date.same_month(&self.anchor.value()) {
            return None;
        }
        if self.anchor.follow(date) {
            log::debug!("Active month moved to {} {}", date.month(), date.year());
        }
        Some(date)
    }

    /// Request display of the month `delta` months away from the current
    /// one.  Returns the requested anchor.
    pub(crate) fn shift_month(&mut self, delta: i32) -> Result<Date, OutOfTimeError> {
        let target = self.anchor.value().add_months(delta)?;
        Ok(self.show(target))
    }

    /// Request display of the month containing `date`.  Returns `date`.
    pub(crate) fn show(&mut self, date: Date) -> Date {
        if self.anchor.follow(date) {
            log::debug!("Active month moved to {} {}", date.month(), date.year());
        }
        date
    }
}
