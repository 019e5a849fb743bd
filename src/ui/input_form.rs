use crate::app::{AppState, InputFormState};
use crate::domain::{FormField, UiMode};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the add form or the edit surface, whichever is open
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let (title, form) = match app.ui_mode {
        UiMode::AddingTask => (" 할 일 추가 ", app.input_form.as_ref()),
        UiMode::EditingTask => (" 할 일 수정 ", app.view.edit.as_ref().map(|e| &e.form)),
        _ => return,
    };
    let Some(form) = form else {
        return;
    };

    let modal_area = create_modal_area(area);
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(form_lines(form))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn form_lines(form: &InputFormState) -> Vec<Line<'_>> {
    let field = |label: &'static str, value: &str, active: bool| -> Vec<Line<'static>> {
        let label = if active {
            format!("{} (입력 중)", label)
        } else {
            label.to_string()
        };
        vec![
            Line::raw(label),
            Line::from(vec![
                Span::raw("> "),
                Span::styled(value.to_string(), modal_title_style()),
                if active {
                    Span::styled("█", modal_title_style())
                } else {
                    Span::raw("")
                },
            ]),
            Line::raw(""),
        ]
    };

    let mut lines = vec![Line::raw("")];
    lines.extend(field("할 일:", &form.text, form.editing_field == FormField::Text));
    lines.extend(field(
        "날짜 (YYYY-MM-DD):",
        &form.date,
        form.editing_field == FormField::Date,
    ));
    lines.push(Line::raw("Tab 필드 전환  ·  Enter 저장  ·  Esc 취소"));
    lines
}
