pub mod calendar;
pub mod enums;
pub mod month;
pub mod task;
pub mod views;

pub use calendar::{calendar_projection, grid_contains, CalendarView, DayCell};
pub use enums::{FormField, Projection, UiMode};
pub use month::YearMonth;
pub use task::{IdGenerator, Task, TaskId};
pub use views::{detail_panel, list_projection, DetailPanel, ListView, TaskRow};
