use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

/// Days the index has an entry for
pub(crate) const ENTRY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .add_modifier(Modifier::BOLD);

/// The currently selected day
pub(crate) const SELECTED_STYLE: Style = Style::new().fg(Color::Black).bg(Color::LightYellow);

pub(crate) const LABEL_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) mod jumpto {
    use super::{Color, Modifier, Style, BASE_STYLE};

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
