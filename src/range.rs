use crate::cell::{CellState, Classify};
use crate::config::CalendarConfig;
use crate::control::Controlled;
use crate::date::{DateRange, PartialRange};
use crate::event::RangeEvent;
use crate::frame::Frame;
use crate::grid::OutOfTimeError;
use time::Date;

/// Progress through the two picks that make up a range
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Selection {
    /// No pick is outstanding
    #[default]
    Idle,
    /// The first end of a range has been picked at the given date and the
    /// second is awaited
    Pending(Date),
}

/// A calendar from which a pair of dates is picked with two successive
/// picks.
///
/// While the second pick is awaited, the cells between the first pick and
/// the hovered date are shown as a preview of the range in place of any
/// committed range.
#[derive(Clone, Debug)]
pub struct RangeCalendar {
    frame: Frame,
    value: Controlled<Option<DateRange>>,
    selection: Selection,
    hover: Option<Date>,
}

impl RangeCalendar {
    /// Create an empty calendar showing the month of `today`
    pub fn new(today: Date) -> RangeCalendar {
        RangeCalendar {
            frame: Frame::new(today),
            value: Controlled::Internal(None),
            selection: Selection::Idle,
            hover: None,
        }
    }

    pub fn with_config(mut self, config: CalendarConfig) -> RangeCalendar {
        self.frame.config = config;
        self
    }

    /// Start with `range` picked, leaving later picks to the calendar
    pub fn with_default_value(mut self, range: DateRange) -> RangeCalendar {
        self.value = Controlled::Internal(Some(range));
        self.frame.anchor_from_value(Some(range.end()));
        self
    }

    /// Let the host own the value
    pub fn with_value(mut self, value: Option<DateRange>) -> RangeCalendar {
        self.value = Controlled::External(value);
        self.frame.anchor_from_value(value.map(|r| r.end()));
        self
    }

    /// Start on the month of `date`, leaving later month changes to the
    /// calendar
    pub fn with_default_active_date(mut self, date: Date) -> RangeCalendar {
        self.frame.give_anchor(Controlled::Internal(date));
        self
    }

    /// Let the host own the displayed month
    pub fn with_active_date(mut self, date: Date) -> RangeCalendar {
        self.frame.give_anchor(Controlled::External(date));
        self
    }

    /// The committed range, if any
    pub fn value(&self) -> Option<DateRange> {
        self.value.value()
    }

    pub fn value_is_external(&self) -> bool {
        self.value.is_external()
    }

    pub fn active_date_is_external(&self) -> bool {
        self.frame.anchor_is_external()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// The first pick of an incomplete range
    pub fn pending_anchor(&self) -> Option<Date> {
        match self.selection {
            Selection::Pending(anchor) => Some(anchor),
            Selection::Idle => None,
        }
    }

    pub fn hover_date(&self) -> Option<Date> {
        self.hover
    }

    pub fn today(&self) -> Date {
        self.frame.today
    }

    /// Replace the value on behalf of the host, which owns it from now on
    pub fn control_value(&mut self, value: Option<DateRange>) {
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

    /// Handle the user picking `date`.
    ///
    /// The first pick of a pair starts a pending selection; the second
    /// completes it, commits the range (unless the host owns the value), and
    /// emits [`RangeEvent::Change`].  Picking a disabled date does nothing.
    pub fn activate(&mut self, date: Date) -> Vec<RangeEvent> {
        if self.frame.config.is_disabled(date) {
            log::trace!("Ignoring pick of disabled date {date}");
            return Vec::new();
        }
        let mut events = Vec::with_capacity(4);
        if let Some(anchor) = self.frame.follow_pick(date) {
            events.push(RangeEvent::ActiveDateChange(anchor));
        }
        events.push(RangeEvent::Select(date));
        match self.selection {
            Selection::Idle => {
                log::debug!("Range selection started at {date}");
                self.selection = Selection::Pending(date);
                events.push(RangeEvent::RangeChange(PartialRange {
                    start: date,
                    end: None,
                }));
            }
            Selection::Pending(anchor) => {
                let range = DateRange::new(anchor, date);
                self.selection = Selection::Idle;
                if self.value.follow(Some(range)) {
                    log::debug!("Range selection committed: {range}");
                } else {
                    log::debug!("Range selection completed with host-owned value: {range}");
                }
                events.push(RangeEvent::RangeChange(range.into()));
                events.push(RangeEvent::Change(range));
            }
        }
        events
    }

    /// Handle the pointer entering the cell for `date`
    pub fn hover(&mut self, date: Date) -> Vec<RangeEvent> {
        log::trace!("Hovering over {date}");
        self.hover = Some(date);
        vec![RangeEvent::HoverDate(date)]
    }

    /// Handle the pointer leaving a date cell
    pub fn leave(&mut self) {
        log::trace!("Pointer left the grid");
        self.hover = None;
    }

    /// Move the display `delta` months forwards (or backwards, if negative)
    pub fn shift_month(&mut self, delta: i32) -> Result<Vec<RangeEvent>, OutOfTimeError> {
        let anchor = self.frame.shift_month(delta)?;
        Ok(vec![RangeEvent::ActiveDateChange(anchor)])
    }

    pub fn next_month(&mut self) -> Result<Vec<RangeEvent>, OutOfTimeError> {
        self.shift_month(1)
    }

    pub fn prev_month(&mut self) -> Result<Vec<RangeEvent>, OutOfTimeError> {
        self.shift_month(-1)
    }

    /// Display the month containing `date`
    pub fn show_month(&mut self, date: Date) -> Vec<RangeEvent> {
        vec![RangeEvent::ActiveDateChange(self.frame.show(date))]
    }
}

impl Classify for RangeCalendar {
    fn config(&self) -> &CalendarConfig {
        &self.frame.config
    }

    fn active_date(&self) -> Date {
        self.frame.anchor()
    }

    fn classify(&self, date: Date) -> CellState {
        let mut state = self.frame.base_state(date);
        match self.selection {
            Selection::Pending(anchor) => {
                state.selected = date == anchor;
                if let Some(hover) = self.hover {
                    state.range_start = date == anchor && hover > date;
                    state.range_end = date == anchor && hover < date;
                    state.in_range = DateRange::new(anchor, hover).has_inside(date);
                }
            }
            Selection::Idle => {
                if let Some(range) = self.value() {
                    state.range_start = date == range.start();
                    state.range_end = date == range.end();
                    state.selected = state.range_start || state.range_end;
                    state.in_range = range.has_inside(date);
                }
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn calendar() -> RangeCalendar {
        RangeCalendar::new(date!(2024 - 01 - 20))
    }

    #[test]
    fn test_first_pick() {
        let mut cal = calendar();
        let events = cal.activate(date!(2024 - 01 - 15));
        assert_eq!(cal.selection(), Selection::Pending(date!(2024 - 01 - 15)));
        assert_eq!(cal.pending_anchor(), Some(date!(2024 - 01 - 15)));
        assert_eq!(
            events,
            [
                RangeEvent::Select(date!(2024 - 01 - 15)),
                RangeEvent::RangeChange(PartialRange {
                    start: date!(2024 - 01 - 15),
                    end: None
                }),
            ]
        );
        assert_eq!(cal.value(), None);
    }

    #[test]
    fn test_first_pick_keeps_committed_value() {
        let committed = DateRange::new(date!(2024 - 01 - 02), date!(2024 - 01 - 05));
        let mut cal = calendar().with_default_value(committed);
        cal.activate(date!(2024 - 01 - 20));
        assert_eq!(cal.value(), Some(committed));
        assert!(matches!(cal.selection(), Selection::Pending(_)));
    }

    #[test]
    fn test_second_pick_earlier_date() {
        let mut cal = calendar();
        cal.activate(date!(2024 - 01 - 15));
        let events = cal.activate(date!(2024 - 01 - 10));
        let range = DateRange::new(date!(2024 - 01 - 10), date!(2024 - 01 - 15));
        assert_eq!(range.start(), date!(2024 - 01 - 10));
        assert_eq!(cal.selection(), Selection::Idle);
        assert_eq!(cal.value(), Some(range));
        assert_eq!(
            events,
            [
                RangeEvent::Select(date!(2024 - 01 - 10)),
                RangeEvent::RangeChange(PartialRange {
                    start: date!(2024 - 01 - 10),
                    end: Some(date!(2024 - 01 - 15)),
                }),
                RangeEvent::Change(range),
            ]
        );
    }

    #[test]
    fn test_committed_range_is_ordered() {
        let dates = [
            date!(2023 - 12 - 31),
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 15),
            date!(2024 - 02 - 29),
        ];
        for &a in &dates {
            for &b in &dates {
                let mut cal = calendar();
                cal.activate(a);
                let events = cal.activate(b);
                let changes = events
                    .iter()
                    .filter_map(|ev| match ev {
                        RangeEvent::Change(r) => Some(*r),
                        _ => None,
                    })
                    .collect::<Vec<_>>();
                assert_eq!(changes.len(), 1);
                let range = changes[0];
                assert!(range.start() <= range.end());
                assert_eq!(range.start(), a.min(b));
                assert_eq!(range.end(), a.max(b));
                assert_eq!(cal.value(), Some(range));
            }
        }
    }

    #[test]
    fn test_picks_cross_month() {
        let mut cal = calendar();
        let events = cal.activate(date!(2024 - 02 - 03));
        assert_eq!(
            events[0],
            RangeEvent::ActiveDateChange(date!(2024 - 02 - 03))
        );
        assert_eq!(cal.active_date(), date!(2024 - 02 - 03));
        let events = cal.activate(date!(2024 - 02 - 10));
        assert!(!events
            .iter()
            .any(|ev| matches!(ev, RangeEvent::ActiveDateChange(_))));
    }

    #[test]
    fn test_controlled_value() {
        let held = DateRange::new(date!(2024 - 01 - 01), date!(2024 - 01 - 03));
        let mut cal = calendar().with_value(Some(held));
        assert_eq!(cal.active_date(), date!(2024 - 01 - 03));
        let events = cal.activate(date!(2024 - 01 - 10));
        assert!(events.contains(&RangeEvent::Select(date!(2024 - 01 - 10))));
        assert!(events.contains(&RangeEvent::RangeChange(PartialRange {
            start: date!(2024 - 01 - 10),
            end: None,
        })));
        let events = cal.activate(date!(2024 - 01 - 12));
        let picked = DateRange::new(date!(2024 - 01 - 10), date!(2024 - 01 - 12));
        assert!(events.contains(&RangeEvent::Change(picked)));
        assert_eq!(cal.value(), Some(held));
        assert_eq!(cal.selection(), Selection::Idle);
        cal.control_value(Some(picked));
        assert_eq!(cal.value(), Some(picked));
    }

    #[test]
    fn test_disabled_pick() {
        let config = CalendarConfig::new()
            .bounds(None, Some(date!(2024 - 01 - 25)))
            .unwrap();
        let mut cal = calendar().with_config(config);
        assert!(cal.activate(date!(2024 - 01 - 26)).is_empty());
        assert_eq!(cal.selection(), Selection::Idle);
        cal.activate(date!(2024 - 01 - 05));
        assert!(cal.activate(date!(2024 - 01 - 26)).is_empty());
        assert_eq!(cal.selection(), Selection::Pending(date!(2024 - 01 - 05)));
        assert_eq!(cal.value(), None);
        assert_eq!(cal.active_date(), date!(2024 - 01 - 20));
    }

    #[test]
    fn test_hover_and_leave() {
        let mut cal = calendar();
        assert_eq!(
            cal.hover(date!(2024 - 01 - 08)),
            [RangeEvent::HoverDate(date!(2024 - 01 - 08))]
        );
        assert_eq!(cal.hover_date(), Some(date!(2024 - 01 - 08)));
        cal.leave();
        assert_eq!(cal.hover_date(), None);
    }

    #[test]
    fn test_hover_while_idle_has_no_preview() {
        let mut cal = calendar();
        cal.hover(date!(2024 - 01 - 08));
        for day in 1..=31 {
            let st = cal.classify(date!(2024 - 01 - 01).replace_day(day).unwrap());
            assert!(!st.selected && !st.in_range && !st.range_start && !st.range_end);
        }
    }

    #[test]
    fn test_classify_committed() {
        let cal = calendar().with_default_value(DateRange::new(
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 12),
        ));
        let start = cal.classify(date!(2024 - 01 - 10));
        assert!(start.selected && start.range_start && !start.range_end && !start.in_range);
        let middle = cal.classify(date!(2024 - 01 - 11));
        assert!(!middle.selected && middle.in_range);
        let end = cal.classify(date!(2024 - 01 - 12));
        assert!(end.selected && end.range_end && !end.range_start && !end.in_range);
        assert!(!cal.classify(date!(2024 - 01 - 09)).in_range);
        assert!(!cal.classify(date!(2024 - 01 - 13)).in_range);
    }

    #[test]
    fn test_classify_range_across_month_end() {
        let cal = calendar()
            .with_default_active_date(date!(2024 - 01 - 20))
            .with_default_value(DateRange::new(
            date!(2024 - 01 - 30),
            date!(2024 - 02 - 01),
        ));
        assert!(cal.classify(date!(2024 - 01 - 31)).in_range);
        assert!(!cal.classify(date!(2024 - 02 - 01)).in_range);
        assert!(cal.classify(date!(2024 - 02 - 01)).other_month);
        assert!(cal.classify(date!(2024 - 02 - 01)).range_end);
    }

    #[test]
    fn test_classify_pending_without_hover() {
        let mut cal = calendar().with_default_value(DateRange::new(
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 31),
        ));
        cal.activate(date!(2024 - 01 - 15));
        let anchor = cal.classify(date!(2024 - 01 - 15));
        assert!(anchor.selected);
        assert!(!anchor.range_start && !anchor.range_end && !anchor.in_range);
        // The committed range is not drawn while a pick is pending
        let old_start = cal.classify(date!(2024 - 01 - 01));
        assert!(!old_start.selected && !old_start.range_start);
        assert!(!cal.classify(date!(2024 - 01 - 10)).in_range);
    }

    #[test]
    fn test_classify_pending_preview() {
        let mut cal = calendar();
        cal.activate(date!(2024 - 01 - 15));
        cal.hover(date!(2024 - 01 - 18));
        let anchor = cal.classify(date!(2024 - 01 - 15));
        assert!(anchor.selected && anchor.range_start && !anchor.range_end);
        assert!(cal.classify(date!(2024 - 01 - 16)).in_range);
        assert!(cal.classify(date!(2024 - 01 - 17)).in_range);
        let hovered = cal.classify(date!(2024 - 01 - 18));
        assert!(!hovered.in_range && !hovered.selected);
        assert!(!cal.classify(date!(2024 - 01 - 14)).in_range);

        cal.hover(date!(2024 - 01 - 12));
        let anchor = cal.classify(date!(2024 - 01 - 15));
        assert!(anchor.selected && anchor.range_end && !anchor.range_start);
        assert!(cal.classify(date!(2024 - 01 - 13)).in_range);
        assert!(cal.classify(date!(2024 - 01 - 14)).in_range);
        assert!(!cal.classify(date!(2024 - 01 - 16)).in_range);

        cal.hover(date!(2024 - 01 - 15));
        let anchor = cal.classify(date!(2024 - 01 - 15));
        assert!(anchor.selected && !anchor.range_start && !anchor.range_end);

        cal.leave();
        assert!(!cal.classify(date!(2024 - 01 - 14)).in_range);
    }

    #[test]
    fn test_disabled_and_range_flags_are_independent() {
        let config = CalendarConfig::new().disabled_date(|d| d == date!(2024 - 01 - 11));
        let cal = calendar()
            .with_config(config)
            .with_default_value(DateRange::new(date!(2024 - 01 - 10), date!(2024 - 01 - 12)));
        let st = cal.classify(date!(2024 - 01 - 11));
        assert!(st.disabled && st.in_range);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let mut cal = calendar();
        cal.activate(date!(2024 - 01 - 15));
        cal.hover(date!(2024 - 01 - 19));
        for day in [14, 15, 16, 19, 20] {
            let date = date!(2024 - 01 - 01).replace_day(day).unwrap();
            assert_eq!(cal.classify(date), cal.classify(date));
        }
    }

    #[test]
    fn test_anchor_from_range_end() {
        let cal = calendar().with_default_value(DateRange::new(
            date!(2023 - 11 - 20),
            date!(2023 - 12 - 05),
        ));
        assert_eq!(cal.active_date(), date!(2023 - 12 - 05));
    }

    #[test]
    fn test_month_navigation() {
        let mut cal = calendar();
        cal.activate(date!(2024 - 01 - 15));
        assert_eq!(
            cal.next_month().unwrap(),
            [RangeEvent::ActiveDateChange(date!(2024 - 02 - 20))]
        );
        assert_eq!(cal.active_date(), date!(2024 - 02 - 20));
        // Navigating does not disturb a pending pick
        assert_eq!(cal.pending_anchor(), Some(date!(2024 - 01 - 15)));
        cal.prev_month().unwrap();
        assert_eq!(cal.active_date(), date!(2024 - 01 - 20));
        cal.show_month(date!(2025 - 05 - 05));
        assert_eq!(cal.active_date(), date!(2025 - 05 - 05));
    }
}
