use super::task::{Task, TaskId};
use chrono::{Datelike, NaiveDate};

pub const EMPTY_LIST_MESSAGE: &str = "아직 할 일이 없습니다.";
pub const NO_SELECTION_MESSAGE: &str = "날짜를 클릭하면 해당 날짜의 상세 할 일을 볼 수 있습니다.";
pub const EMPTY_DAY_MESSAGE: &str = "이 날짜에는 할 일이 없습니다.";

pub const EDIT_LABEL: &str = "수정";
pub const DELETE_LABEL: &str = "삭제";

/// Long localized date, e.g. "2024년 3월 5일"
pub fn format_date(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// Label of the toggle action for a task in the given state
pub fn toggle_label(completed: bool) -> &'static str {
    if completed {
        "완료취소"
    } else {
        "완료"
    }
}

/// One rendered task with its three actions (toggle, edit, delete)
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub date: NaiveDate,
    pub date_label: String,
    pub completed: bool,
    pub toggle_label: &'static str,
}

impl TaskRow {
    fn from_task(task: &Task) -> Self {
        Self {
            id: task.id,
            text: task.text.clone(),
            date: task.date,
            date_label: format_date(task.date),
            completed: task.completed,
            toggle_label: toggle_label(task.completed),
        }
    }

    pub fn edit_label(&self) -> &'static str {
        EDIT_LABEL
    }

    pub fn delete_label(&self) -> &'static str {
        DELETE_LABEL
    }
}

/// Render model of the list projection
#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Empty { message: &'static str },
    Rows(Vec<TaskRow>),
}

impl ListView {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows(rows) => rows,
        }
    }
}

/// All tasks, ascending by date. Ties keep collection order.
pub fn list_projection(tasks: &[Task]) -> ListView {
    if tasks.is_empty() {
        return ListView::Empty {
            message: EMPTY_LIST_MESSAGE,
        };
    }

    let mut sorted: Vec<&Task> = tasks.iter().collect();
    // sort_by_key is stable
    sorted.sort_by_key(|t| t.date);

    ListView::Rows(sorted.into_iter().map(TaskRow::from_task).collect())
}

/// Render model of the selected-day detail panel
#[derive(Debug, Clone, PartialEq)]
pub enum DetailPanel {
    NoSelection {
        message: &'static str,
    },
    Empty {
        heading: String,
        message: &'static str,
    },
    Tasks {
        heading: String,
        rows: Vec<TaskRow>,
    },
}

impl DetailPanel {
    pub fn rows(&self) -> &[TaskRow] {
        match self {
            Self::Tasks { rows, .. } => rows,
            _ => &[],
        }
    }
}

/// Tasks due on the selected day, in collection order
pub fn detail_panel(tasks: &[Task], selected: Option<NaiveDate>) -> DetailPanel {
    let Some(day) = selected else {
        return DetailPanel::NoSelection {
            message: NO_SELECTION_MESSAGE,
        };
    };

    let heading = format!("{} 상세 할 일", format_date(day));
    let rows: Vec<TaskRow> = tasks
        .iter()
        .filter(|t| t.date == day)
        .map(TaskRow::from_task)
        .collect();

    if rows.is_empty() {
        DetailPanel::Empty {
            heading,
            message: EMPTY_DAY_MESSAGE,
        }
    } else {
        DetailPanel::Tasks { heading, rows }
    }
}
