use crate::cell::CellState;
use ratatui::style::{Color, Modifier, Style};

pub const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub const OTHER_MONTH_STYLE: Style = Style::new().fg(Color::DarkGray);

pub const IN_RANGE_STYLE: Style = Style::new().bg(Color::Blue);

pub const RANGE_EDGE_STYLE: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::LightBlue)
    .add_modifier(Modifier::BOLD);

pub const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED.union(Modifier::BOLD));

pub const DISABLED_STYLE: Style = Style::new()
    .fg(Color::DarkGray)
    .add_modifier(Modifier::CROSSED_OUT);

pub const CURSOR_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Compute the style for a date cell from its classification
pub fn cell_style(state: CellState) -> Style {
    let mut style = Style::new();
    if state.other_month {
        style = style.patch(OTHER_MONTH_STYLE);
    }
    if state.in_range {
        style = style.patch(IN_RANGE_STYLE);
    }
    if state.range_start || state.range_end {
        style = style.patch(RANGE_EDGE_STYLE);
    } else if state.selected {
        style = style.patch(SELECTED_STYLE);
    }
    if state.disabled {
        style = style.patch(DISABLED_STYLE);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_cell() {
        assert_eq!(cell_style(CellState::default()), Style::new());
    }

    #[test]
    fn test_range_edge_beats_selected() {
        let st = CellState {
            selected: true,
            range_start: true,
            ..CellState::default()
        };
        assert_eq!(cell_style(st), RANGE_EDGE_STYLE);
    }

    #[test]
    fn test_disabled_in_range() {
        let st = CellState {
            in_range: true,
            disabled: true,
            ..CellState::default()
        };
        assert_eq!(cell_style(st), IN_RANGE_STYLE.patch(DISABLED_STYLE));
    }
}
