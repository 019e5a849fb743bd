use crate::app::AppState;
use crate::domain::DayCell;
use crate::ui::layout::create_calendar_grid;
use crate::ui::styles::{
    border_style, completed_style, default_style, dimmed_style, more_style, selected_cell_border_style,
    title_style, today_style, weekday_style,
};
use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the month grid
pub fn render_calendar_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let calendar = app.calendar_view();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(format!(" ◀ {} ▶ ", calendar.title), title_style()))
        .title_alignment(Alignment::Center);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (header_areas, week_areas) = create_calendar_grid(inner);

    for (idx, (name, cell_area)) in calendar.headers.iter().zip(header_areas).enumerate() {
        let header = Paragraph::new(*name)
            .style(weekday_style(idx))
            .alignment(Alignment::Center);
        f.render_widget(header, cell_area);
    }

    for (week, areas) in calendar.weeks().zip(week_areas) {
        for (cell, cell_area) in week.iter().zip(areas) {
            render_day_cell(f, cell, app.today, cell_area);
        }
    }
}

fn render_day_cell(f: &mut Frame, cell: &DayCell, today: NaiveDate, area: Rect) {
    let border = if cell.selected {
        selected_cell_border_style()
    } else {
        border_style()
    };
    let block = Block::default()
        .borders(if cell.selected { Borders::ALL } else { Borders::TOP })
        .border_style(border);

    f.render_widget(Paragraph::new(cell_lines(cell, today)).block(block), area);
}

/// Day number, up to three task summaries and the overflow indicator
pub fn cell_lines(cell: &DayCell, today: NaiveDate) -> Vec<Line<'static>> {
    let number_style = if !cell.in_month {
        dimmed_style()
    } else if cell.date == today {
        today_style()
    } else {
        default_style()
    };

    let mut lines = vec![Line::from(Span::styled(cell.day.to_string(), number_style))];

    for summary in &cell.summaries {
        let style = if summary.completed {
            completed_style()
        } else if cell.in_month {
            default_style()
        } else {
            dimmed_style()
        };
        lines.push(Line::from(Span::styled(format!("·{}", summary.text), style)));
    }

    if let Some(label) = cell.more_label() {
        lines.push(Line::from(Span::styled(label, more_style())));
    }

    lines
}
