use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Cursor row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Completed task text
pub fn completed_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Date column in the list
pub fn date_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Action hints next to a row
pub fn action_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the selected calendar cell
pub fn selected_cell_border_style() -> Style {
    Style::default()
        .fg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Days of the neighbouring months
pub fn dimmed_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Today's day number
pub fn today_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// "+N" overflow indicator
pub fn more_style() -> Style {
    Style::default().fg(Color::Magenta)
}

/// Weekday header; Sunday and Saturday get their own colors
pub fn weekday_style(index: usize) -> Style {
    match index {
        0 => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        6 => Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        _ => Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    }
}

/// Active view tab
pub fn active_tab_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
