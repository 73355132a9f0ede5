use crossterm::event::KeyCode;
use log::{debug, info, trace, warn};

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::{Food, FoodSpawner},
    grid::{Grid, Point},
    state::{GameOverReason, GamePhase, Snake, TickOutcome},
};
use crate::input::DirectionResolver;

/// Owns one game session and drives it tick by tick
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    spawner: FoodSpawner,
    resolver: DirectionResolver,
    phase: GamePhase,
    score: u32,
    steps: u32,
    final_score: Option<u32>,
    game_over_reason: Option<GameOverReason>,
    pointer: Option<Point>,
}

impl GameEngine {
    /// Create a session sitting on the start screen
    pub fn new(config: GameConfig) -> Self {
        let grid = config.grid();
        let spawner = FoodSpawner::new(config.seed, config.max_spawn_attempts);
        let resolver =
            DirectionResolver::new(grid, config.swipe_threshold, config.pointer_dead_zone);
        let snake = Self::initial_snake(&config, &grid);

        let mut engine = Self {
            config,
            grid,
            snake,
            spawner,
            resolver,
            phase: GamePhase::Start,
            score: 0,
            steps: 0,
            final_score: None,
            game_over_reason: None,
            pointer: None,
        };
        engine.spawn_food();
        engine
    }

    fn initial_snake(config: &GameConfig, grid: &Grid) -> Snake {
        Snake::new(grid.center(), Direction::Right, config.initial_snake_length)
    }

    /// Start → Playing or GameOver → Playing. Ignored mid-game.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Start | GamePhase::GameOver => {
                self.restart();
                info!("Game started");
                true
            }
            GamePhase::Playing | GamePhase::Paused => false,
        }
    }

    /// Fresh game from any phase
    pub fn reset(&mut self) {
        self.restart();
        info!("Game reset");
    }

    /// Back to the start screen; no further ticks take effect
    pub fn quit(&mut self) {
        self.phase = GamePhase::Start;
        self.resolver.clear();
        self.pointer = None;
        info!("Returned to start screen with score {}", self.score);
    }

    /// Playing ↔ Paused
    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::Start | GamePhase::GameOver => return false,
        };
        info!("Game {:?}", self.phase);
        self.phase == GamePhase::Paused
    }

    fn restart(&mut self) {
        self.snake = Self::initial_snake(&self.config, &self.grid);
        self.score = 0;
        self.steps = 0;
        self.final_score = None;
        self.game_over_reason = None;
        self.resolver.clear();
        self.pointer = None;
        self.phase = GamePhase::Playing;
        self.spawn_food();
    }

    fn spawn_food(&mut self) -> Option<Food> {
        self.spawner.spawn(&self.grid, self.snake.segments())
    }

    /// One simulation step.
    ///
    /// The phase is checked here rather than only when the tick is scheduled,
    /// so a timer firing after game over or quit changes nothing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != GamePhase::Playing {
            return TickOutcome::Idle;
        }

        if let Action::Move(dir) = Action::from(self.resolver.take_pending()) {
            if dir != self.snake.direction() && self.snake.turn(dir) {
                debug!("Turned {:?}", dir);
            }
        }

        let food_cell = self.spawner.current().map(|food| food.cell);
        let info = self.snake.advance(&self.grid, food_cell);
        self.steps += 1;
        trace!(
            "Tick {}: head ({}, {}) {:?}",
            self.steps,
            self.snake.head().x,
            self.snake.head().y,
            info
        );

        if let Some(collision) = info.collided_with() {
            return self.end_game(GameOverReason::Collision(collision));
        }

        if info.ate_food {
            self.score += self.config.food_reward;
            if self.spawn_food().is_none() {
                return self.end_game(GameOverReason::BoardFull);
            }
        }

        TickOutcome::Advanced(info)
    }

    fn end_game(&mut self, reason: GameOverReason) -> TickOutcome {
        self.phase = GamePhase::GameOver;
        self.final_score = Some(self.score);
        self.game_over_reason = Some(reason);
        self.resolver.clear();
        match reason {
            GameOverReason::BoardFull => warn!("Board full after {} steps", self.steps),
            GameOverReason::Collision(kind) => {
                info!("Game over ({:?}) after {} steps", kind, self.steps)
            }
        }
        info!("Final score: {}", self.score);
        TickOutcome::GameOver(reason)
    }

    fn is_steerable(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Pixel position of the middle of the head cell
    pub fn head_point(&self) -> Point {
        self.grid.cell_center(self.snake.head())
    }

    pub fn key_press(&mut self, key: KeyCode) -> Direction {
        let current = self.snake.direction();
        if !self.is_steerable() {
            return current;
        }
        self.resolver.from_key(key, current)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Direction {
        let current = self.snake.direction();
        if !self.is_steerable() || !self.config.mouse_follow {
            return current;
        }
        self.pointer = Some(pointer);
        let head = self.head_point();
        self.resolver.from_pointer(pointer, head, current)
    }

    pub fn swipe(&mut self, start: Point, end: Point) -> Direction {
        let current = self.snake.direction();
        if !self.is_steerable() {
            return current;
        }
        self.resolver.from_swipe(start, end, current)
    }

    pub fn tap(&mut self, point: Point) -> Direction {
        let current = self.snake.direction();
        if !self.is_steerable() || !self.config.tap_zones {
            return current;
        }
        self.pointer = Some(point);
        let head = self.head_point();
        self.resolver.from_tap_zone(point, head, current)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    pub fn food(&self) -> Option<&Food> {
        self.spawner.current()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.resolver.pending()
    }

    pub fn final_score(&self) -> Option<u32> {
        self.final_score
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    /// Last board position the snake was steered towards by mouse or tap
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    #[cfg(test)]
    fn place(&mut self, snake: Snake, food: Option<super::grid::Cell>) {
        self.snake = snake;
        self.spawner.force(food);
    }
}
