use serde::{Deserialize, Serialize};

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// A position on the drawing surface, in board pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size discrete board laid over a pixel surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    /// Edge length of one cell in pixels
    pub cell_size: u32,
}

impl Grid {
    pub fn new(width: usize, height: usize, cell_size: u32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }

    /// Grid covering a canvas; partial cells at the right and bottom edges are dropped
    pub fn from_canvas(canvas_width: u32, canvas_height: u32, cell_size: u32) -> Self {
        let cell = cell_size.max(1);
        Self::new(
            (canvas_width / cell) as usize,
            (canvas_height / cell) as usize,
            cell_size,
        )
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width as i32 && cell.y >= 0 && cell.y < self.height as i32
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.width / 2) as i32, (self.height / 2) as i32)
    }

    /// Pixel position of the middle of a cell
    pub fn cell_center(&self, cell: Cell) -> Point {
        let size = self.cell_size as f32;
        Point::new(
            (cell.x as f32 + 0.5) * size,
            (cell.y as f32 + 0.5) * size,
        )
    }

    /// Cell containing a pixel position. Not bounds-checked.
    pub fn cell_at(&self, point: Point) -> Cell {
        let size = self.cell_size.max(1) as f32;
        Cell::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// All cells, row by row
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (width, height) = (self.width as i32, self.height as i32);
        (0..height).flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_movement() {
        let cell = Cell::new(5, 5);
        assert_eq!(cell.moved_by(1, 0), Cell::new(6, 5));
        assert_eq!(cell.moved_by(0, -1), Cell::new(5, 4));
        assert_eq!(cell.moved_in_direction(Direction::Left), Cell::new(4, 5));
        assert_eq!(cell.moved_in_direction(Direction::Down), Cell::new(5, 6));
    }

    #[test]
    fn test_grid_from_canvas() {
        let grid = Grid::from_canvas(600, 400, 20);
        assert_eq!(grid.width, 30);
        assert_eq!(grid.height, 20);
        assert_eq!(grid.len(), 600);

        let ragged = Grid::from_canvas(610, 419, 20);
        assert_eq!((ragged.width, ragged.height), (30, 20));
    }

    #[test]
    fn test_bounds_checking() {
        let grid = Grid::new(30, 20, 20);

        assert!(grid.in_bounds(Cell::new(0, 0)));
        assert!(grid.in_bounds(Cell::new(29, 19)));
        assert!(!grid.in_bounds(Cell::new(-1, 0)));
        assert!(!grid.in_bounds(Cell::new(30, 0)));
        assert!(!grid.in_bounds(Cell::new(0, 20)));
        assert!(!grid.in_bounds(Cell::new(0, -1)));
    }

    #[test]
    fn test_pixel_mapping() {
        let grid = Grid::new(30, 20, 20);

        assert_eq!(grid.cell_center(Cell::new(0, 0)), Point::new(10.0, 10.0));
        assert_eq!(grid.cell_center(Cell::new(5, 5)), Point::new(110.0, 110.0));
        assert_eq!(grid.cell_at(Point::new(119.9, 100.0)), Cell::new(5, 5));
        assert_eq!(grid.cell_at(Point::new(-0.5, 3.0)), Cell::new(-1, 0));
        assert_eq!(grid.cell_at(grid.cell_center(Cell::new(12, 7))), Cell::new(12, 7));
    }

    #[test]
    fn test_cells_cover_grid_row_major() {
        let grid = Grid::new(3, 2, 10);
        let cells: Vec<Cell> = grid.cells().collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new(0, 0));
        assert_eq!(cells[2], Cell::new(2, 0));
        assert_eq!(cells[3], Cell::new(0, 1));
    }
}
