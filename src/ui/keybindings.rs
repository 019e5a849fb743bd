use crate::domain::Projection;
use crate::ui::styles::{active_tab_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Keybinding hints for the active projection
pub fn hints(projection: Projection) -> &'static str {
    match projection {
        Projection::List => {
            " ↑/↓ select   a add   space done   e edit   d delete   v calendar   q quit"
        }
        Projection::Calendar => {
            " ←/→/↑/↓ day   [/] month   t today   j/k task   a add   space done   e edit   d delete   v list   q quit"
        }
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, projection: Projection, area: Rect) {
    let paragraph = Paragraph::new(hints(projection)).style(hint_style());
    f.render_widget(paragraph, area);
}

/// Render the list/calendar tabs
pub fn render_tabs(f: &mut Frame, projection: Projection, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for tab in [Projection::List, Projection::Calendar] {
        let label = format!(" {} ", tab.label());
        if tab == projection {
            spans.push(Span::styled(label, active_tab_style()));
        } else {
            spans.push(Span::styled(label, hint_style()));
        }
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
