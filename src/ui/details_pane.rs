use crate::app::AppState;
use crate::domain::DetailPanel;
use crate::ui::list_pane::create_task_line;
use crate::ui::styles::{border_style, date_style, default_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

/// Render the tasks of the selected calendar day
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = |heading: String| {
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(format!(" {} ", heading), title_style()))
    };

    match app.detail_view() {
        DetailPanel::NoSelection { message } => {
            let paragraph = Paragraph::new(Line::styled(message, date_style()))
                .block(block("상세 할 일".to_string()))
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, area);
        }
        DetailPanel::Empty { heading, message } => {
            let paragraph = Paragraph::new(Line::styled(message, date_style()))
                .block(block(heading))
                .wrap(Wrap { trim: false });
            f.render_widget(paragraph, area);
        }
        DetailPanel::Tasks { heading, rows } => {
            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let style = if idx == app.detail_index {
                        selected_style()
                    } else {
                        default_style()
                    };
                    ListItem::new(create_task_line(row, false)).style(style)
                })
                .collect();
            f.render_widget(List::new(items).block(block(heading)), area);
        }
    }
}
