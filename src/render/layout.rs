use ratatui::layout::Rect;

use crate::game::{Grid, Point};

/// Terminal columns used to draw one grid cell, so cells look square
pub const COLUMNS_PER_CELL: u16 = 2;

/// Where the board landed on screen during the last frame.
///
/// Converts terminal coordinates into board pixels, the space all pointer
/// steering works in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    area: Rect,
    grid: Grid,
}

impl BoardLayout {
    /// `area` is the inner rectangle holding the cells, borders excluded
    pub fn new(area: Rect, grid: Grid) -> Self {
        Self { area, grid }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    /// Board pixel at the middle of a terminal cell. Not clamped to the board.
    pub fn to_point(&self, column: u16, row: u16) -> Point {
        let cell = self.grid.cell_size as f32;
        let dx = (column as i32 - self.area.x as i32) as f32 + 0.5;
        let dy = (row as i32 - self.area.y as i32) as f32 + 0.5;
        Point::new(dx * cell / COLUMNS_PER_CELL as f32, dy * cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn layout() -> BoardLayout {
        BoardLayout::new(Rect::new(4, 2, 60, 20), Grid::new(30, 20, 20))
    }

    #[test]
    fn test_contains() {
        let layout = layout();
        assert!(layout.contains(4, 2));
        assert!(layout.contains(63, 21));
        assert!(!layout.contains(64, 21));
        assert!(!layout.contains(3, 2));
        assert!(!layout.contains(10, 22));
    }

    #[test]
    fn test_both_columns_of_a_cell_map_to_it() {
        let layout = layout();
        let grid = Grid::new(30, 20, 20);

        // Cell (3, 1) spans columns 10 and 11 on row 3
        assert_eq!(grid.cell_at(layout.to_point(10, 3)), Cell::new(3, 1));
        assert_eq!(grid.cell_at(layout.to_point(11, 3)), Cell::new(3, 1));
        assert_eq!(grid.cell_at(layout.to_point(12, 3)), Cell::new(4, 1));
    }

    #[test]
    fn test_points_left_of_board_are_negative() {
        let point = layout().to_point(0, 2);
        assert!(point.x < 0.0);
        assert_eq!(point.y, 10.0);
    }
}
