use crate::cell::Classify;
use crate::config::CalendarConfig;
use crate::date::DAYS_IN_WEEK;
use crate::grid::{DateMatrix, WEEKS_SHOWN};
use crate::theme::{cell_style, CURSOR_STYLE, TITLE_STYLE, WEEKDAY_STYLE};
use ratatui::{buffer::Buffer, layout::Rect, style::Style, text::Text, widgets::Widget};
use std::fmt;
use time::Date;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 4;

/// Width of the calendar in columns
pub const CALENDAR_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the title, the weekday names, and the rule
/// beneath them
const HEADER_LINES: u16 = 3;

/// Total height of the calendar in lines
pub const CALENDAR_HEIGHT: u16 = HEADER_LINES + 6;

const ACS_HLINE: char = '─';

/// Supplies extra styling for individual dates, applied on top of the style
/// the calendar derives from the selection
pub trait DateStyler {
    fn date_style(&self, date: Date) -> Style;
}

impl<F: Fn(Date) -> Style> DateStyler for F {
    fn date_style(&self, date: Date) -> Style {
        self(date)
    }
}

/// Draws a calendar model as a month title, a row of weekday names, and six
/// weeks of dates.
///
/// The calendar is centered horizontally within the area it is given.
pub struct CalendarView<'a, M> {
    model: &'a M,
    styler: Option<&'a dyn DateStyler>,
    cursor: Option<Date>,
}

impl<'a, M: Classify> CalendarView<'a, M> {
    pub fn new(model: &'a M) -> Self {
        CalendarView {
            model,
            styler: None,
            cursor: None,
        }
    }

    pub fn styler(mut self, styler: &'a dyn DateStyler) -> Self {
        self.styler = Some(styler);
        self
    }

    /// Underline the given date, e.g. to show keyboard focus
    pub fn cursor(mut self, cursor: Option<Date>) -> Self {
        self.cursor = cursor;
        self
    }

    /// Returns the date whose cell is drawn at terminal position `(x, y)`
    /// when the calendar is rendered in `area`
    pub fn date_at(&self, area: Rect, x: u16, y: u16) -> Option<Date> {
        if !area.contains((x, y).into()) {
            return None;
        }
        let origin = Self::origin(area);
        let dx = x.checked_sub(origin.x)?;
        let week_no = y.checked_sub(origin.y)?.checked_sub(HEADER_LINES)?;
        if dx >= CALENDAR_WIDTH {
            return None;
        }
        let matrix = self.model.matrix().ok()?;
        matrix.get(usize::from(week_no), usize::from(dx / DAY_WIDTH))
    }

    fn origin(area: Rect) -> Rect {
        let left = area.width.saturating_sub(CALENDAR_WIDTH) / 2;
        Rect {
            x: area.x.saturating_add(left),
            y: area.y,
            width: CALENDAR_WIDTH.min(area.width),
            height: CALENDAR_HEIGHT.min(area.height),
        }
    }
}

impl<M: Classify> Widget for CalendarView<'_, M> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Ok(matrix) = self.model.matrix() else {
            return;
        };
        let mut canvas = BufferCanvas::new(Self::origin(area), buf);
        let active = self.model.active_date();
        canvas.draw_title(&format!("{} {}", active.month(), active.year()));
        canvas.draw_weekdays(&matrix, self.model.config());
        for ((week_no, column), date) in matrix.cells() {
            let state = self.model.classify(date);
            let mut style = cell_style(state);
            if let Some(styler) = self.styler {
                style = style.patch(styler.date_style(date));
            }
            if self.cursor == Some(date) {
                style = style.patch(CURSOR_STYLE);
            }
            let s = if state.today {
                format!("[{:2}]", date.day())
            } else {
                format!(" {:2} ", date.day())
            };
            canvas.draw_day(week_no, column, &s, style);
        }
    }
}

impl<M: fmt::Debug> fmt::Debug for CalendarView<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarView")
            .field("model", &self.model)
            .field("styler", &self.styler.map(|_| "<styler>"))
            .field("cursor", &self.cursor)
            .finish()
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Text::raw(title).width()).unwrap_or(u16::MAX);
        let x = CALENDAR_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, TITLE_STYLE);
    }

    fn draw_weekdays(&mut self, matrix: &DateMatrix, config: &CalendarConfig) {
        for (x, wd) in std::iter::zip((0..).step_by(usize::from(DAY_WIDTH)), matrix.weekdays()) {
            self.mvprint(1, x, &format!(" {:>2} ", config.day_name(wd)), WEEKDAY_STYLE);
        }
        self.hline(2, 0, ACS_HLINE, CALENDAR_WIDTH);
    }

    fn draw_day(&mut self, week_no: usize, column: usize, s: &str, style: Style) {
        debug_assert!(
            week_no < WEEKS_SHOWN && column < DAYS_IN_WEEK,
            "date cell should lie within the grid"
        );
        let (Ok(week_no), Ok(column)) = (u16::try_from(week_no), u16::try_from(column)) else {
            return;
        };
        self.mvprint(week_no + HEADER_LINES, column * DAY_WIDTH, s, style);
    }

    fn mvprint(&mut self, y: u16, x: u16, s: &str, style: Style) {
        if y < self.area.height && x < self.area.width {
            self.buf.set_stringn(
                x + self.area.x,
                y + self.area.y,
                s,
                usize::from(self.area.width - x),
                style,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, &String::from(ch).repeat(length.into()), Style::new());
    }
}
