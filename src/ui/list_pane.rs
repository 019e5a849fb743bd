use crate::app::AppState;
use crate::domain::{ListView, TaskRow};
use crate::ui::styles::{
    action_style, border_style, completed_style, date_style, default_style, selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the chronological list projection
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" 할 일 목록 ", title_style()));

    match app.list_view() {
        ListView::Empty { message } => {
            let empty = Paragraph::new(message)
                .style(date_style())
                .alignment(ratatui::layout::Alignment::Center)
                .block(block);
            f.render_widget(empty, area);
        }
        ListView::Rows(rows) => {
            let items: Vec<ListItem> = rows
                .iter()
                .enumerate()
                .map(|(idx, row)| {
                    let style = if idx == app.list_index {
                        selected_style()
                    } else {
                        default_style()
                    };
                    ListItem::new(create_task_line(row, true)).style(style)
                })
                .collect();

            f.render_widget(List::new(items).block(block), area);
        }
    }
}

/// Create a single line for a task row
/// Format: [✓] Buy milk   2024년 3월 5일   [완료] [수정] [삭제]
pub fn create_task_line(row: &TaskRow, show_date: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let check = if row.completed { "[✓] " } else { "[ ] " };
    spans.push(Span::raw(check.to_string()));

    let text_style = if row.completed {
        completed_style()
    } else {
        default_style()
    };
    spans.push(Span::styled(row.text.clone(), text_style));

    if show_date {
        spans.push(Span::raw("   ".to_string()));
        spans.push(Span::styled(row.date_label.clone(), date_style()));
    }

    spans.push(Span::raw("   ".to_string()));
    for label in [row.toggle_label, row.edit_label(), row.delete_label()] {
        spans.push(Span::styled(format!("[{}]", label), action_style()));
        spans.push(Span::raw(" ".to_string()));
    }

    Line::from(spans)
}
