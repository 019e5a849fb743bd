use super::month::YearMonth;
use super::task::{Task, TaskId};
use chrono::{Datelike, Duration, NaiveDate};

/// Weekday headers, Sunday first
pub const WEEKDAY_HEADERS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// 6 rows x 7 columns
pub const GRID_CELLS: usize = 42;

/// Task summaries shown inside one cell before collapsing into "+N"
pub const MAX_SUMMARIES_PER_DAY: usize = 3;

/// Compact task entry inside a day cell
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSummary {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// One cell of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub day: u32,
    /// False for leading/trailing days of the adjacent months (drawn dimmed, still selectable)
    pub in_month: bool,
    pub selected: bool,
    pub summaries: Vec<TaskSummary>,
    /// Tasks on this day beyond the shown summaries
    pub more: Option<usize>,
}

impl DayCell {
    /// "+N개 더" indicator text
    pub fn more_label(&self) -> Option<String> {
        self.more.map(|n| format!("+{}개 더", n))
    }
}

/// Render model of the calendar projection
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarView {
    pub month: YearMonth,
    pub title: String,
    pub headers: [&'static str; 7],
    pub cells: Vec<DayCell>,
}

impl CalendarView {
    /// Cells grouped into the six week rows
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells.iter().find(|c| c.date == date)
    }
}

/// First cell of the grid: the Sunday on or before day 1
pub fn grid_start(month: YearMonth) -> NaiveDate {
    let first = month.first_day();
    let offset = i64::from(first.weekday().num_days_from_sunday());
    first
        .checked_sub_signed(Duration::days(offset))
        .unwrap_or(first)
}

/// Whether `date` is one of the 42 cells shown for `month`
pub fn grid_contains(month: YearMonth, date: NaiveDate) -> bool {
    let start = grid_start(month);
    let offset = (date - start).num_days();
    (0..GRID_CELLS as i64).contains(&offset)
}

/// Build the 42-cell grid for `month`
pub fn calendar_projection(tasks: &[Task], month: YearMonth, selected: Option<NaiveDate>) -> CalendarView {
    let start = grid_start(month);

    let cells = start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| {
            let mut day_tasks = tasks.iter().filter(|t| t.date == date);
            let summaries: Vec<TaskSummary> = day_tasks
                .by_ref()
                .take(MAX_SUMMARIES_PER_DAY)
                .map(|t| TaskSummary {
                    id: t.id,
                    text: t.text.clone(),
                    completed: t.completed,
                })
                .collect();
            let remaining = day_tasks.count();

            DayCell {
                date,
                day: date.day(),
                in_month: month.contains(date),
                selected: selected == Some(date),
                summaries,
                more: (remaining > 0).then_some(remaining),
            }
        })
        .collect();

    CalendarView {
        month,
        title: month.to_string(),
        headers: WEEKDAY_HEADERS,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Utc, Weekday};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: i64, text: &str, day: NaiveDate) -> Task {
        Task::new(TaskId(id), text.to_string(), day, Utc::now())
    }

    fn month(y: i32, m: u32) -> YearMonth {
        YearMonth::new(y, m).unwrap()
    }

    #[test]
    fn test_grid_shape_for_many_months() {
        let mut m = month(2019, 1);
        for _ in 0..120 {
            let view = calendar_projection(&[], m, None);
            assert_eq!(view.cells.len(), GRID_CELLS);
            assert_eq!(view.cells[0].date.weekday(), Weekday::Sun);
            assert!(view.cells.iter().any(|c| c.date == m.first_day()));
            assert!(view
                .cells
                .windows(2)
                .all(|w| w[1].date == w[0].date + Duration::days(1)));
            m = m.shift(1);
        }
    }

    #[test]
    fn test_full_grid_at_date_limits() {
        for m in [YearMonth::of(NaiveDate::MAX), YearMonth::of(NaiveDate::MIN)] {
            let view = calendar_projection(&[], m, None);
            assert_eq!(view.cells.len(), GRID_CELLS, "grid for {}", m);
            assert_eq!(view.cells[0].date.weekday(), Weekday::Sun);
            assert!(view.cells.iter().any(|c| c.date == m.first_day()));
        }
    }

    #[test]
    fn test_march_2024_layout() {
        // 2024-03-01 is a Friday
        let view = calendar_projection(&[], month(2024, 3), None);
        assert_eq!(view.title, "2024년 3월");
        assert_eq!(view.headers, ["일", "월", "화", "수", "목", "금", "토"]);
        assert_eq!(view.cells[0].date, date(2024, 2, 25));
        assert!(!view.cells[0].in_month);
        assert_eq!(view.cells[5].date, date(2024, 3, 1));
        assert!(view.cells[5].in_month);
        assert_eq!(view.cells[41].date, date(2024, 4, 6));
        assert!(!view.cells[41].in_month);
        assert_eq!(view.weeks().count(), 6);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_leading_days() {
        // 2023-10-01 is a Sunday
        let view = calendar_projection(&[], month(2023, 10), None);
        assert_eq!(view.cells[0].date, date(2023, 10, 1));
        assert!(view.cells[0].in_month);
    }

    #[test]
    fn test_cell_shows_task_text() {
        let tasks = vec![task(1, "Buy milk", date(2024, 3, 5))];
        let view = calendar_projection(&tasks, month(2024, 3), None);
        let cell = view.cell(date(2024, 3, 5)).unwrap();
        assert_eq!(cell.summaries.len(), 1);
        assert_eq!(cell.summaries[0].text, "Buy milk");
        assert_eq!(cell.more, None);
    }

    #[test]
    fn test_overflow_collapses_to_more() {
        let day = date(2024, 3, 5);
        let tasks: Vec<Task> = (0..5).map(|i| task(i, &format!("t{}", i), day)).collect();
        let view = calendar_projection(&tasks, month(2024, 3), None);
        let cell = view.cell(day).unwrap();
        let texts: Vec<&str> = cell.summaries.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["t0", "t1", "t2"]);
        assert_eq!(cell.more, Some(2));
        assert_eq!(cell.more_label().as_deref(), Some("+2개 더"));
    }

    #[test]
    fn test_exactly_three_tasks_has_no_indicator() {
        let day = date(2024, 3, 5);
        let tasks: Vec<Task> = (0..3).map(|i| task(i, "t", day)).collect();
        let view = calendar_projection(&tasks, month(2024, 3), None);
        assert_eq!(view.cell(day).unwrap().more, None);
    }

    #[test]
    fn test_selected_day_is_highlighted_in_adjacent_month() {
        let selected = date(2024, 2, 26);
        let view = calendar_projection(&[], month(2024, 3), Some(selected));
        let highlighted: Vec<NaiveDate> = view.cells.iter().filter(|c| c.selected).map(|c| c.date).collect();
        assert_eq!(highlighted, vec![selected]);
    }

    #[test]
    fn test_tasks_in_spill_days_are_shown() {
        let tasks = vec![task(1, "April fool", date(2024, 4, 1))];
        let view = calendar_projection(&tasks, month(2024, 3), None);
        let cell = view.cell(date(2024, 4, 1)).unwrap();
        assert!(!cell.in_month);
        assert_eq!(cell.summaries.len(), 1);
    }

    #[test]
    fn test_grid_contains() {
        let m = month(2024, 3);
        assert!(grid_contains(m, date(2024, 2, 25)));
        assert!(grid_contains(m, date(2024, 4, 6)));
        assert!(!grid_contains(m, date(2024, 2, 24)));
        assert!(!grid_contains(m, date(2024, 4, 7)));
    }
}
