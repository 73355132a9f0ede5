use serde::{Deserialize, Serialize};

/// Cardinal heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The 180-degree reverse of this heading
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Maps a displacement onto a heading.
    ///
    /// The horizontal axis wins only when it is strictly larger; ties fall
    /// through to the vertical axis. A zero component on the chosen axis
    /// yields nothing.
    pub fn from_delta(dx: f32, dy: f32) -> Option<Direction> {
        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Some(Direction::Right)
            } else if dx < 0.0 {
                Some(Direction::Left)
            } else {
                None
            }
        } else if dy > 0.0 {
            Some(Direction::Down)
        } else if dy < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

/// What the snake does on the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Turn to a new heading before moving
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Option<Direction>> for Action {
    fn from(pending: Option<Direction>) -> Self {
        pending.map(Action::Move).unwrap_or(Action::Continue)
    }
}
