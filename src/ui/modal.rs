use crate::app::{AppState, DELETE_PROMPT};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the delete confirmation prompt
pub fn render_confirm_delete(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(pending) = &app.pending_delete {
        let modal_area = create_modal_area(area);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::raw(format!("  {}", DELETE_PROMPT)),
            Line::raw(""),
            Line::from(vec![Span::raw("  "), Span::styled(pending.text.clone(), modal_title_style())]),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" 확인  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" 취소"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" 삭제 ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}

/// Render the one-shot notice (validation and storage errors)
pub fn render_notice(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(message) = &app.notice {
        let modal_area = create_modal_area(area);
        f.render_widget(Clear, modal_area);

        let lines = vec![
            Line::raw(""),
            Line::from(Span::styled(format!("  {}", message), error_style())),
            Line::raw(""),
            Line::from(vec![
                Span::styled("  [아무 키]", modal_title_style()),
                Span::raw(" 닫기"),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(" 알림 ", modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
