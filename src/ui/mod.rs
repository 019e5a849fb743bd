pub mod calendar_pane;
pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Projection, UiMode};
use calendar_pane::render_calendar_pane;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::{render_keybindings, render_tabs};
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_confirm_delete, render_notice};
use ratatui::Frame;

/// Main render function - redraws the active projection from scratch
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let projection = app.view.projection;
    let layout = create_layout(size, projection);

    render_keybindings(f, projection, layout.keybindings_area);
    render_tabs(f, projection, layout.header_area);

    match projection {
        Projection::List => render_list_pane(f, app, layout.main_area),
        Projection::Calendar => render_calendar_pane(f, app, layout.main_area),
    }

    if let Some(details_area) = layout.details_area {
        render_details_pane(f, app, details_area);
    }

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => render_input_form(f, app, size),
        UiMode::ConfirmDelete => render_confirm_delete(f, app, size),
        UiMode::Normal => {}
    }

    // Notices sit above everything else
    render_notice(f, app, size);
}
