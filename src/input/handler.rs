use crate::app::AppState;
use crate::domain::{Projection, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Any key dismisses a notice
    if app.notice.is_some() {
        app.dismiss_notice();
        return Ok(false);
    }

    match app.ui_mode {
        UiMode::Normal => match app.view.projection {
            Projection::List => handle_list_mode(app, key),
            Projection::Calendar => handle_calendar_mode(app, key),
        },
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::ConfirmDelete => handle_confirm_mode(app, key),
    }
}

/// Keys shared by both projections. Returns `None` when the key isn't one of them.
fn handle_common(app: &mut AppState, key: KeyEvent) -> Option<bool> {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_selected(),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Tab => app.toggle_view(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Some(true),
        _ => return None,
    }
    Some(false)
}

/// Handle keys in the list projection
fn handle_list_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if let Some(quit) = handle_common(app, key) {
        return Ok(quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the calendar projection
fn handle_calendar_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if let Some(quit) = handle_common(app, key) {
        return Ok(quit);
    }

    match key.code {
        // Day cursor
        KeyCode::Left => app.move_selected_day(-1),
        KeyCode::Right => app.move_selected_day(1),
        KeyCode::Up => app.move_selected_day(-7),
        KeyCode::Down => app.move_selected_day(7),

        // Month navigation
        KeyCode::Char('[') | KeyCode::Char('<') | KeyCode::PageUp => app.change_month(-1),
        KeyCode::Char(']') | KeyCode::Char('>') | KeyCode::PageDown => app.change_month(1),
        KeyCode::Char('t') | KeyCode::Char('T') => app.go_to_today(),

        // Task cursor in the day panel
        KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Char('j') => app.move_selection_down(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add form or edit surface
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    let editing = app.ui_mode == UiMode::EditingTask;

    match key.code {
        KeyCode::Enter => {
            if editing {
                app.submit_edit();
            } else {
                app.submit_input_form();
            }
        }
        KeyCode::Esc => {
            if editing {
                app.cancel_edit();
            } else {
                app.cancel_input_form();
            }
        }
        KeyCode::Tab => app.form_toggle_field(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys while a delete waits for confirmation
fn handle_confirm_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_pending_delete(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.decline_delete(),
        _ => {}
    }
    Ok(false)
}
