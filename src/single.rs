use crate::cell::{CellState, Classify};
use crate::config::CalendarConfig;
use crate::control::Controlled;
use crate::event::SingleEvent;
use crate::frame::Frame;
use crate::grid::OutOfTimeError;
use time::Date;

/// A calendar from which one date at a time is picked
#[derive(Clone, Debug)]
pub struct SingleCalendar {
    frame: Frame,
    value: Controlled<Option<Date>>,
}

impl SingleCalendar {
    /// Create an empty calendar showing the month of `today`
    pub fn new(today: Date) -> SingleCalendar {
        SingleCalendar {
            frame: Frame::new(today),
            value: Controlled::Internal(None),
        }
    }

    pub fn with_config(mut self, config: CalendarConfig) -> SingleCalendar {
        self.frame.config = config;
        self
    }

    /// Start with `date` picked, leaving later picks to the calendar
    pub fn with_default_value(mut self, date: Date) -> SingleCalendar {
        self.value = Controlled::Internal(Some(date));
        self.frame.anchor_from_value(Some(date));
        self
    }

    /// Let the host own the value
    pub fn with_value(mut self, value: Option<Date>) -> SingleCalendar {
        self.value = Controlled::External(value);
        self.frame.anchor_from_value(value);
        self
    }

    /// Start on the month of `date`, leaving later month changes to the
    /// calendar
    pub fn with_default_active_date(mut self, date: Date) -> SingleCalendar {
        self.frame.give_anchor(Controlled::Internal(date));
        self
    }

    /// Let the host own the displayed month
    pub fn with_active_date(mut self, date: Date) -> SingleCalendar {
        self.frame.give_anchor(Controlled::External(date));
        self
    }

    pub fn value(&self) -> Option<Date> {
        self.value.value()
    }

    pub fn value_is_external(&self) -> bool {
        self.value.is_external()
    }

    pub fn active_date_is_external(&self) -> bool {
        self.frame.anchor_is_external()
    }

    pub fn today(&self) -> Date {
        self.frame.today
    }

    /// Replace the value on behalf of the host, which owns it from now on
    pub fn control_value(&mut self, value: Option<Date>) {
        self.value = Controlled::External(value);
    }

    /// Return ownership of the value to the calendar, keeping the last value
    pub fn release_value(&mut self) {
        self.value = self.value.release();
    }

    /// Force the displayed month on behalf of the host
    pub fn control_active_date(&mut self, date: Date) {
        self.frame.give_anchor(Controlled::External(date));
    }

    pub fn release_active_date(&mut self) {
        self.frame.release_anchor();
    }

    pub fn set_config(&mut self, config: CalendarConfig) {
        self.frame.config = config;
    }

    pub fn set_today(&mut self, today: Date) {
        self.frame.today = today;
    }

    /// Handle the user picking `date`.  Picking a disabled date does nothing.
    pub fn activate(&mut self, date: Date) -> Vec<SingleEvent> {
        if self.frame.config.is_disabled(date) {
            log::trace!("Ignoring pick of disabled date {date}");
            return Vec::new();
        }
        let mut events = Vec::with_capacity(3);
        if self.value.follow(Some(date)) {
            log::debug!("Picked {date}");
        }
        if let Some(anchor) = self.frame.follow_pick(date) {
            events.push(SingleEvent::ActiveDateChange(anchor));
        }
        events.push(SingleEvent::Change(date));
        events.push(SingleEvent::Select(date));
        events
    }

    /// Handle the pointer entering the cell for `date`
    pub fn hover(&self, date: Date) -> Vec<SingleEvent> {
        vec![SingleEvent::HoverDate(date)]
    }

    /// Move the display `delta` months forwards (or backwards, if negative)
    pub fn shift_month(&mut self, delta: i32) -> Result<Vec<SingleEvent>, OutOfTimeError> {
        let anchor = self.frame.shift_month(delta)?;
        Ok(vec![SingleEvent::ActiveDateChange(anchor)])
    }

    pub fn next_month(&mut self) -> Result<Vec<SingleEvent>, OutOfTimeError> {
        self.shift_month(1)
    }

    pub fn prev_month(&mut self) -> Result<Vec<SingleEvent>, OutOfTimeError> {
        self.shift_month(-1)
    }

    /// Display the month containing `date`
    pub fn show_month(&mut self, date: Date) -> Vec<SingleEvent> {
        vec![SingleEvent::ActiveDateChange(self.frame.show(date))]
    }
}

impl Classify for SingleCalendar {
    fn config(&self) -> &CalendarConfig {
        &self.frame.config
    }

    fn active_date(&self) -> Date {
        self.frame.anchor()
    }

    fn classify(&self, date: Date) -> CellState {
        CellState {
            selected: self.value() == Some(date),
            ..self.frame.base_state(date)
        }
    }
}
