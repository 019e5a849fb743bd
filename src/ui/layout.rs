use crate::domain::Projection;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    /// List pane or calendar grid
    pub main_area: Rect,
    /// Selected-day panel, calendar mode only
    pub details_area: Option<Rect>,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: view tabs (1 row)
/// - Main area: list (100%) or calendar (70%) | day details (30%)
pub fn create_layout(area: Rect, projection: Projection) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(1), // View tabs
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let (main_area, details_area) = match projection {
        Projection::List => (main_chunks[2], None),
        Projection::Calendar => {
            let horizontal = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(main_chunks[2]);
            (horizontal[0], Some(horizontal[1]))
        }
    };

    MainLayout {
        keybindings_area: main_chunks[0],
        header_area: main_chunks[1],
        main_area,
        details_area,
    }
}

/// Split the calendar area into a weekday header row and six week rows of seven cells
pub fn create_calendar_grid(area: Rect) -> (Vec<Rect>, Vec<Vec<Rect>>) {
    let mut constraints = vec![Constraint::Length(1)];
    constraints.extend(std::iter::repeat(Constraint::Ratio(1, 6)).take(6));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let columns = |row: Rect| -> Vec<Rect> {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints(std::iter::repeat(Constraint::Ratio(1, 7)).take(7))
            .split(row)
            .to_vec()
    };

    let header = columns(rows[0]);
    let weeks = rows[1..].iter().map(|row| columns(*row)).collect();
    (header, weeks)
}

/// Create centered modal area (for forms and prompts)
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);

        let list = create_layout(area, Projection::List);
        assert_eq!(list.keybindings_area.height, 1);
        assert_eq!(list.header_area.height, 1);
        assert!(list.main_area.height > 0);
        assert!(list.details_area.is_none());

        let calendar = create_layout(area, Projection::Calendar);
        let details = calendar.details_area.unwrap();
        assert!(details.width > 0);
        assert!(calendar.main_area.width > details.width);
    }

    #[test]
    fn test_create_calendar_grid() {
        let (header, weeks) = create_calendar_grid(Rect::new(0, 0, 70, 37));
        assert_eq!(header.len(), 7);
        assert_eq!(weeks.len(), 6);
        assert!(weeks.iter().all(|w| w.len() == 7));
        assert_eq!(header[0].height, 1);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 12);
    }
}
