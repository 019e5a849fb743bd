use crate::domain::{
    calendar_projection, detail_panel, grid_contains, list_projection, CalendarView, DetailPanel,
    FormField, ListView, Projection, TaskId, UiMode, YearMonth,
};
use crate::error::TaskError;
use crate::persistence::TaskStore;
use chrono::{Duration, NaiveDate};

/// Date format accepted by the date fields
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Prompt shown before a task is removed
pub const DELETE_PROMPT: &str = "이 할 일을 삭제하시겠습니까?";

/// Text + date fields shared by the add form and the edit surface
#[derive(Debug, Clone, PartialEq)]
pub struct InputFormState {
    pub text: String,
    pub date: String,
    pub editing_field: FormField,
}

impl InputFormState {
    pub fn new(text: String, date: NaiveDate) -> Self {
        Self {
            text,
            date: date.format(DATE_INPUT_FORMAT).to_string(),
            editing_field: FormField::Text,
        }
    }

    fn field_mut(&mut self) -> &mut String {
        match self.editing_field {
            FormField::Text => &mut self.text,
            FormField::Date => &mut self.date,
        }
    }
}

/// In-progress edit of one task
#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    pub task_id: TaskId,
    pub form: InputFormState,
}

/// A delete waiting for the user's yes/no
#[derive(Debug, Clone, PartialEq)]
pub struct PendingDelete {
    pub task_id: TaskId,
    pub text: String,
}

/// Transient presentation state, reset on every start
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub projection: Projection,
    pub month: YearMonth,
    pub selected_day: Option<NaiveDate>,
    /// At most one task is being edited
    pub edit: Option<EditBuffer>,
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            projection: Projection::List,
            month: YearMonth::of(today),
            selected_day: None,
            edit: None,
        }
    }

    pub fn edit_target(&self) -> Option<TaskId> {
        self.edit.as_ref().map(|e| e.task_id)
    }
}

/// Parse a date field; blank means "not given"
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, TaskError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)
        .map(Some)
        .map_err(|_| TaskError::InvalidDate(input.to_string()))
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub view: ViewState,
    pub today: NaiveDate,
    pub ui_mode: UiMode,
    /// Add form (the edit surface lives in `view.edit`)
    pub input_form: Option<InputFormState>,
    pub pending_delete: Option<PendingDelete>,
    /// One-shot message shown over everything until dismissed
    pub notice: Option<String>,
    /// Cursor in the list projection
    pub list_index: usize,
    /// Cursor in the selected-day panel
    pub detail_index: usize,
}

impl AppState {
    pub fn new(store: TaskStore, today: NaiveDate) -> Self {
        Self {
            store,
            view: ViewState::new(today),
            today,
            ui_mode: UiMode::Normal,
            input_form: None,
            pending_delete: None,
            notice: None,
            list_index: 0,
            detail_index: 0,
        }
    }

    /// Track the local date so defaults follow midnight
    pub fn refresh_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    // ---- projections -------------------------------------------------

    pub fn list_view(&self) -> ListView {
        list_projection(self.store.tasks())
    }

    pub fn calendar_view(&self) -> CalendarView {
        calendar_projection(self.store.tasks(), self.view.month, self.view.selected_day)
    }

    pub fn detail_view(&self) -> DetailPanel {
        detail_panel(self.store.tasks(), self.view.selected_day)
    }

    /// Task under the cursor of the active projection
    pub fn selected_task_id(&self) -> Option<TaskId> {
        match self.view.projection {
            Projection::List => self.list_view().rows().get(self.list_index).map(|r| r.id),
            Projection::Calendar => self.detail_view().rows().get(self.detail_index).map(|r| r.id),
        }
    }

    fn visible_row_count(&self) -> usize {
        match self.view.projection {
            Projection::List => self.list_view().rows().len(),
            Projection::Calendar => self.detail_view().rows().len(),
        }
    }

    fn clamp_cursors(&mut self) {
        let list_len = self.list_view().rows().len();
        self.list_index = self.list_index.min(list_len.saturating_sub(1));
        let detail_len = self.detail_view().rows().len();
        self.detail_index = self.detail_index.min(detail_len.saturating_sub(1));
    }

    pub fn move_selection_up(&mut self) {
        let cursor = match self.view.projection {
            Projection::List => &mut self.list_index,
            Projection::Calendar => &mut self.detail_index,
        };
        *cursor = cursor.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.visible_row_count();
        let cursor = match self.view.projection {
            Projection::List => &mut self.list_index,
            Projection::Calendar => &mut self.detail_index,
        };
        if *cursor + 1 < len {
            *cursor += 1;
        }
    }

    fn report<T>(&mut self, result: Result<T, TaskError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "task operation rejected");
                self.notice = Some(e.to_string());
                None
            }
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // ---- view / selection -------------------------------------------

    pub fn switch_view(&mut self, projection: Projection) {
        self.view.projection = projection;
        if projection == Projection::Calendar && self.view.selected_day.is_none() {
            self.view.selected_day = Some(self.today);
        }
        self.clamp_cursors();
        tracing::debug!(view = projection.name(), "switched view");
    }

    pub fn toggle_view(&mut self) {
        self.switch_view(self.view.projection.other());
    }

    /// Select a day cell. Days outside the current grid move the grid to their month.
    pub fn select_day(&mut self, date: NaiveDate) {
        self.view.selected_day = Some(date);
        if !grid_contains(self.view.month, date) {
            self.view.month = YearMonth::of(date);
        }
        self.detail_index = 0;
    }

    /// Move the selected day by `days` (keyboard equivalent of clicking a neighbouring cell)
    pub fn move_selected_day(&mut self, days: i64) {
        let from = self.view.selected_day.unwrap_or(self.today);
        if let Some(date) = from.checked_add_signed(Duration::days(days)) {
            self.select_day(date);
        }
    }

    pub fn change_month(&mut self, delta: i32) {
        self.view.month = self.view.month.shift(delta);
        tracing::debug!(month = %self.view.month, "changed month");
    }

    pub fn go_to_today(&mut self) {
        self.view.month = YearMonth::of(self.today);
        self.select_day(self.today);
    }

    // ---- task operations --------------------------------------------

    /// Add a task from raw form values. A blank date means today.
    pub fn add_task(&mut self, text: &str, date_input: &str) -> Result<TaskId, TaskError> {
        if text.trim().is_empty() {
            return Err(TaskError::EmptyText);
        }
        let date = parse_date_input(date_input)?;
        self.store.add(text, date, self.today)
    }

    /// Flip completion. Unknown ids are ignored.
    pub fn toggle_complete(&mut self, id: TaskId) -> Result<bool, TaskError> {
        self.store.toggle(id)
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            let result = self.toggle_complete(id);
            self.report(result);
        }
    }

    // ---- add form -----------------------------------------------------

    /// Open the add form, dated today or the selected calendar day
    pub fn start_add_task(&mut self) {
        let date = match self.view.projection {
            Projection::Calendar => self.view.selected_day.unwrap_or(self.today),
            Projection::List => self.today,
        };
        self.input_form = Some(InputFormState::new(String::new(), date));
        self.ui_mode = UiMode::AddingTask;
    }

    /// Submit the add form. On a validation failure the form stays open.
    /// A failed save still closes it: the task is already in the list.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };
        let result = self.add_task(&form.text, &form.date);
        let added = match &result {
            Ok(_) => true,
            Err(e) => e.mutation_applied(),
        };
        self.report(result);
        if added {
            self.input_form = None;
            self.ui_mode = UiMode::Normal;
            self.clamp_cursors();
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// The form receiving keystrokes: the edit buffer or the add form
    fn active_form_mut(&mut self) -> Option<&mut InputFormState> {
        match self.ui_mode {
            UiMode::AddingTask => self.input_form.as_mut(),
            UiMode::EditingTask => self.view.edit.as_mut().map(|e| &mut e.form),
            _ => None,
        }
    }

    pub fn form_toggle_field(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.editing_field = form.editing_field.next();
        }
    }

    pub fn form_add_char(&mut self, c: char) {
        if let Some(form) = self.active_form_mut() {
            form.field_mut().push(c);
        }
    }

    pub fn form_backspace(&mut self) {
        if let Some(form) = self.active_form_mut() {
            form.field_mut().pop();
        }
    }

    // ---- edit workflow ----------------------------------------------

    /// idle -> editing(id). No-op for unknown ids or while another edit is open.
    pub fn start_edit(&mut self, id: TaskId) -> bool {
        if self.view.edit.is_some() {
            return false;
        }
        let Some(task) = self.store.get(id) else {
            return false;
        };
        self.view.edit = Some(EditBuffer {
            task_id: id,
            form: InputFormState::new(task.text.clone(), task.date),
        });
        self.ui_mode = UiMode::EditingTask;
        true
    }

    pub fn start_edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.start_edit(id);
        }
    }

    /// editing -> idle, writing the buffer back. Stays in editing when validation fails;
    /// a failed save still leaves editing since the task was already changed.
    pub fn save_edit(&mut self) -> Result<(), TaskError> {
        let Some(edit) = self.view.edit.clone() else {
            return Ok(());
        };
        if edit.form.text.trim().is_empty() {
            return Err(TaskError::EmptyText);
        }
        // A blank date keeps the task's current day
        let current = self.store.get(edit.task_id).map(|t| t.date).unwrap_or(self.today);
        let date = parse_date_input(&edit.form.date)?.unwrap_or(current);

        let result = self.store.update(edit.task_id, &edit.form.text, date);
        if let Err(e) = &result {
            if !e.mutation_applied() {
                return result.map(|_| ());
            }
        }
        self.view.edit = None;
        self.ui_mode = UiMode::Normal;
        self.clamp_cursors();
        result.map(|_| ())
    }

    pub fn submit_edit(&mut self) {
        let result = self.save_edit();
        self.report(result);
    }

    /// editing -> idle without touching the store
    pub fn cancel_edit(&mut self) {
        self.view.edit = None;
        self.ui_mode = UiMode::Normal;
    }

    // ---- delete protocol ----------------------------------------------

    /// First step: ask for confirmation. Unknown ids produce no request.
    pub fn request_delete(&mut self, id: TaskId) -> Option<&PendingDelete> {
        let task = self.store.get(id)?;
        self.pending_delete = Some(PendingDelete {
            task_id: id,
            text: task.text.clone(),
        });
        self.ui_mode = UiMode::ConfirmDelete;
        self.pending_delete.as_ref()
    }

    pub fn request_delete_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.request_delete(id);
        }
    }

    /// Second step: remove the task if `id` matches the pending request
    pub fn confirm_delete(&mut self, id: TaskId) -> Result<bool, TaskError> {
        match &self.pending_delete {
            Some(pending) if pending.task_id == id => {}
            _ => return Ok(false),
        }
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
        let removed = self.store.remove(id);
        self.clamp_cursors();
        removed
    }

    pub fn confirm_pending_delete(&mut self) {
        if let Some(id) = self.pending_delete.as_ref().map(|p| p.task_id) {
            let result = self.confirm_delete(id);
            self.report(result);
        }
    }

    /// Second step, negative answer: nothing changes
    pub fn decline_delete(&mut self) {
        self.pending_delete = None;
        self.ui_mode = UiMode::Normal;
    }
}
