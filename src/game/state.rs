use super::action::Direction;
use super::grid::{Cell, Grid};

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Cell>,
    /// Current direction of movement
    direction: Direction,
}

impl Snake {
    /// Create a new snake laid out straight behind `head`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        for i in 1..length.max(1) {
            let prev = body[i - 1];
            body.push(prev.moved_by(-dx, -dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(segments: Vec<Cell>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: segments,
            direction,
        })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn segments(&self) -> &[Cell] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Change heading unless it would reverse the snake onto itself
    pub fn turn(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Advance one cell in the current heading.
    ///
    /// Collisions are checked against the body as it is before the move, so
    /// the tail cell still counts as occupied this tick. On collision the
    /// snake is left untouched.
    pub fn advance(&mut self, grid: &Grid, food: Option<Cell>) -> StepInfo {
        let new_head = self.head().moved_in_direction(self.direction);

        if !grid.in_bounds(new_head) {
            return StepInfo::collided(CollisionType::Wall);
        }
        if self.occupies(new_head) {
            return StepInfo::collided(CollisionType::SelfCollision);
        }

        self.body.insert(0, new_head);

        let ate_food = food == Some(new_head);
        if !ate_food {
            self.body.pop();
        }

        StepInfo {
            ate_food,
            collision: None,
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// What happened during one advance of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision: Option<CollisionType>,
}

impl StepInfo {
    fn collided(collision: CollisionType) -> Self {
        Self {
            ate_food: false,
            collision: Some(collision),
        }
    }

    pub fn collided_with(&self) -> Option<CollisionType> {
        self.collision
    }

    pub fn is_collision(&self) -> bool {
        self.collision.is_some()
    }
}

/// Lifecycle phase of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, nothing moves
    #[default]
    Start,
    Playing,
    Paused,
    /// Terminal until an explicit start or reset
    GameOver,
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Collision(CollisionType),
    /// No free cell left for food
    BoardFull,
}

/// Result of one controller tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing changed
    Idle,
    Advanced(StepInfo),
    GameOver(GameOverReason),
}

impl TickOutcome {
    /// Whether another tick should be scheduled
    pub fn keeps_running(&self) -> bool {
        matches!(self, TickOutcome::Advanced(_))
    }

    pub fn step_info(&self) -> Option<StepInfo> {
        match self {
            TickOutcome::Advanced(info) => Some(*info),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(30, 20, 20)
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.segments()[1], Cell::new(4, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
    }

    #[test]
    fn test_zero_length_still_has_head() {
        let snake = Snake::new(Cell::new(1, 1), Direction::Up, 0);
        assert_eq!(snake.len(), 1);
        assert!(Snake::from_segments(Vec::new(), Direction::Up).is_none());
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 1);

        let info = snake.advance(&grid(), Some(Cell::new(6, 5)));

        assert!(info.ate_food);
        assert!(!info.is_collision());
        assert_eq!(snake.segments(), &[Cell::new(6, 5), Cell::new(5, 5)]);
    }

    #[test]
    fn test_plain_move_drops_tail() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        let info = snake.advance(&grid(), Some(Cell::new(20, 10)));

        assert!(!info.ate_food);
        assert_eq!(
            snake.segments(),
            &[Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5)]
        );
    }

    #[test]
    fn test_wall_collision_leaves_snake_unchanged() {
        let mut snake = Snake::new(Cell::new(0, 5), Direction::Left, 1);
        let before = snake.clone();

        let info = snake.advance(&grid(), None);

        assert_eq!(info.collided_with(), Some(CollisionType::Wall));
        assert_eq!(snake, before);
    }

    #[test]
    fn test_wall_collision_on_every_edge() {
        let grid = grid();
        let cases = [
            (Cell::new(29, 3), Direction::Right),
            (Cell::new(4, 0), Direction::Up),
            (Cell::new(4, 19), Direction::Down),
            (Cell::new(0, 0), Direction::Left),
        ];
        for (head, dir) in cases {
            let mut snake = Snake::new(head, dir, 1);
            assert_eq!(
                snake.advance(&grid, None).collided_with(),
                Some(CollisionType::Wall),
                "{head:?} heading {dir:?}"
            );
        }
    }

    #[test]
    fn test_moving_into_vacating_tail_collides() {
        // A 2x2 loop: the head's next cell is the current tail
        let mut snake = Snake::from_segments(
            vec![
                Cell::new(5, 5),
                Cell::new(6, 5),
                Cell::new(6, 6),
                Cell::new(5, 6),
            ],
            Direction::Down,
        )
        .unwrap();

        let info = snake.advance(&grid(), None);

        assert_eq!(info.collided_with(), Some(CollisionType::SelfCollision));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_turn_rejects_reverse() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        assert!(!snake.turn(Direction::Left));
        assert_eq!(snake.direction(), Direction::Right);

        assert!(snake.turn(Direction::Up));
        assert_eq!(snake.direction(), Direction::Up);
    }

    #[test]
    fn test_length_invariant_over_a_walk() {
        let grid = grid();
        let mut snake = Snake::new(Cell::new(10, 10), Direction::Right, 4);
        let route = [
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Down,
        ];
        for dir in route {
            snake.turn(dir);
            let before = snake.len();
            let info = snake.advance(&grid, None);
            assert!(!info.is_collision());
            assert_eq!(snake.len(), before);
        }
    }

    #[test]
    fn test_tick_outcome_keeps_running() {
        let moved = StepInfo {
            ate_food: false,
            collision: None,
        };
        assert!(TickOutcome::Advanced(moved).keeps_running());
        assert!(!TickOutcome::Idle.keeps_running());
        assert!(!TickOutcome::GameOver(GameOverReason::BoardFull).keeps_running());
    }
}
