use crate::help::Help;
use calpick::{
    CalendarView, Classify, DateExt, RangeCalendar, RangeEvent, SingleCalendar, SingleEvent,
    CALENDAR_HEIGHT,
};
use crossterm::event::{
    read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
    Terminal,
};
use std::collections::VecDeque;
use std::io::{self, Write};
use time::{Date, Duration, Weekday};

const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

const LABEL_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

const FOCUSED_LABEL_STYLE: Style = LABEL_STYLE.add_modifier(Modifier::REVERSED);

const NOTE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

/// Maximum number of notifications kept for display
const MAX_NOTES: usize = 50;

#[derive(Clone, Debug)]
pub(crate) struct App {
    single: SingleCalendar,
    range: RangeCalendar,
    focus: Focus,
    cursor: Date,
    // The calendar and date last pointed at, either by the mouse or by the
    // keyboard cursor
    pointer: Option<(Focus, Date)>,
    areas: Option<CalendarAreas>,
    notes: VecDeque<String>,
    state: AppState,
}

impl App {
    pub(crate) fn new(single: SingleCalendar, range: RangeCalendar) -> App {
        let cursor = single.active_date();
        App {
            single,
            range,
            focus: Focus::Single,
            cursor,
            pointer: None,
            areas: None,
            notes: VecDeque::with_capacity(MAX_NOTES + 1),
            state: AppState::Running,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_event(read()?)?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
                if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                    self.state = AppState::Quitting;
                } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                    self.beep()?;
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            // Redraw on resize and anything else
            _ => (),
        }
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match self.state {
            AppState::Running => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char('n') | KeyCode::PageDown => self.shift_month(1),
                KeyCode::Char('p') | KeyCode::PageUp => self.shift_month(-1),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.activate(self.focus, self.cursor);
                    true
                }
                KeyCode::Tab | KeyCode::BackTab => {
                    self.switch_focus();
                    true
                }
                KeyCode::Char('0') | KeyCode::Home => {
                    self.set_cursor(self.single.today());
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Running;
                true
            }
            AppState::Quitting => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state != AppState::Running {
            return;
        }
        let target = self.date_under(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((focus, date)) = target {
                    self.focus = focus;
                    self.cursor = date;
                    self.point_at(target);
                    self.activate(focus, date);
                }
            }
            MouseEventKind::Moved | MouseEventKind::Drag(_) => self.point_at(target),
            _ => (),
        }
    }

    fn date_under(&self, x: u16, y: u16) -> Option<(Focus, Date)> {
        let areas = self.areas?;
        CalendarView::new(&self.single)
            .date_at(areas.single, x, y)
            .map(|d| (Focus::Single, d))
            .or_else(|| {
                CalendarView::new(&self.range)
                    .date_at(areas.range, x, y)
                    .map(|d| (Focus::Range, d))
            })
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn move_cursor(&mut self, days: i64) -> bool {
        match self.cursor.checked_add(Duration::days(days)) {
            Some(date) => {
                self.set_cursor(date);
                true
            }
            None => false,
        }
    }

    fn set_cursor(&mut self, date: Date) {
        self.cursor = date;
        let shown = match self.focus {
            Focus::Single => self.single.active_date(),
            Focus::Range => self.range.active_date(),
        };
        if !date.same_month(&shown) {
            match self.focus {
                Focus::Single => {
                    let events = self.single.show_month(date);
                    self.single_events(events);
                }
                Focus::Range => {
                    let events = self.range.show_month(date);
                    self.range_events(events);
                }
            }
        }
        self.point_at(Some((self.focus, date)));
    }

    fn shift_month(&mut self, delta: i32) -> bool {
        let Ok(cursor) = self.cursor.add_months(delta) else {
            return false;
        };
        let shifted = match self.focus {
            Focus::Single => self
                .single
                .shift_month(delta)
                .map(|events| self.single_events(events)),
            Focus::Range => self
                .range
                .shift_month(delta)
                .map(|events| self.range_events(events)),
        };
        if shifted.is_err() {
            return false;
        }
        self.set_cursor(cursor);
        true
    }

    fn switch_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Single => Focus::Range,
            Focus::Range => Focus::Single,
        };
        self.cursor = match self.focus {
            Focus::Single => self
                .single
                .value()
                .unwrap_or_else(|| self.single.active_date()),
            Focus::Range => self.range.active_date(),
        };
        self.point_at(Some((self.focus, self.cursor)));
    }

    // Deliver pointer movement to the calendars as leave & hover events
    fn point_at(&mut self, target: Option<(Focus, Date)>) {
        if target == self.pointer {
            return;
        }
        if let Some((Focus::Range, _)) = self.pointer {
            self.range.leave();
        }
        self.pointer = target;
        match target {
            Some((Focus::Single, date)) => {
                let events = self.single.hover(date);
                self.single_events(events);
            }
            Some((Focus::Range, date)) => {
                let events = self.range.hover(date);
                self.range_events(events);
            }
            None => (),
        }
    }

    fn activate(&mut self, focus: Focus, date: Date) {
        match focus {
            Focus::Single => {
                let events = self.single.activate(date);
                self.single_events(events);
            }
            Focus::Range => {
                let events = self.range.activate(date);
                self.range_events(events);
            }
        }
    }

    fn single_events(&mut self, events: Vec<SingleEvent>) {
        for ev in events {
            match ev {
                SingleEvent::ActiveDateChange(d) => {
                    self.note(format!("date: showing {} {}", d.month(), d.year()));
                }
                SingleEvent::Change(d) => {
                    // This calendar's value belongs to us, so apply the change
                    self.single.control_value(Some(d));
                    self.note(format!("date: value changed to {d}"));
                }
                SingleEvent::Select(d) => self.note(format!("date: selected {d}")),
                SingleEvent::HoverDate(d) => log::trace!("date: hovering over {d}"),
            }
        }
    }

    fn range_events(&mut self, events: Vec<RangeEvent>) {
        for ev in events {
            match ev {
                RangeEvent::ActiveDateChange(d) => {
                    self.note(format!("range: showing {} {}", d.month(), d.year()));
                }
                RangeEvent::Select(d) => self.note(format!("range: selected {d}")),
                RangeEvent::RangeChange(r) => self.note(format!("range: selecting {r}")),
                RangeEvent::Change(r) => self.note(format!("range: committed {r}")),
                RangeEvent::HoverDate(d) => log::trace!("range: hovering over {d}"),
            }
        }
    }

    fn note(&mut self, msg: String) {
        log::info!("{msg}");
        self.notes.push_back(msg);
        while self.notes.len() > MAX_NOTES {
            self.notes.pop_front();
        }
    }

    fn summary(&self) -> String {
        let date = self
            .single
            .value()
            .map_or_else(|| String::from("none"), |d| d.to_string());
        let range = match (self.range.pending_anchor(), self.range.value()) {
            (Some(start), _) => format!("{start} to …"),
            (None, Some(r)) => r.to_string(),
            (None, None) => String::from("none"),
        };
        format!("Date: {date}    Range: {range}")
    }

    fn label(&self, text: &'static str, focus: Focus) -> Line<'static> {
        let style = if self.focus == focus {
            FOCUSED_LABEL_STYLE
        } else {
            LABEL_STYLE
        };
        Line::styled(text, style).alignment(Alignment::Center)
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [labels, cals, summary, notes] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(CALENDAR_HEIGHT),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);
        let halves = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]);
        let [single_label, range_label] = halves.areas(labels);
        let [single_area, range_area] = halves.areas(cals);
        self.areas = Some(CalendarAreas {
            single: single_area,
            range: range_area,
        });
        self.label("Date", Focus::Single).render(single_label, buf);
        self.label("Range", Focus::Range).render(range_label, buf);
        let cursor = |focus| (self.focus == focus).then_some(self.cursor);
        CalendarView::new(&self.single)
            .styler(&weekend_style)
            .cursor(cursor(Focus::Single))
            .render(single_area, buf);
        CalendarView::new(&self.range)
            .styler(&weekend_style)
            .cursor(cursor(Focus::Range))
            .render(range_area, buf);
        Line::raw(self.summary())
            .alignment(Alignment::Center)
            .render(summary, buf);
        let shown = usize::from(notes.height);
        let lines = self
            .notes
            .iter()
            .skip(self.notes.len().saturating_sub(shown))
            .map(|s| Line::raw(s.as_str()))
            .collect::<Vec<_>>();
        Paragraph::new(lines).style(NOTE_STYLE).render(notes, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        }
    }
}

fn weekend_style(date: Date) -> Style {
    if matches!(date.weekday(), Weekday::Saturday | Weekday::Sunday) {
        Style::new().add_modifier(Modifier::ITALIC)
    } else {
        Style::new()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Focus {
    Single,
    Range,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct CalendarAreas {
    single: Rect,
    range: Rect,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Running,
    Helping,
    Quitting,
}
