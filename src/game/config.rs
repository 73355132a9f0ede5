use std::time::Duration;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use super::grid::Grid;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the drawing surface in pixels
    pub canvas_width: u32,
    /// Height of the drawing surface in pixels
    pub canvas_height: u32,
    /// Edge length of one grid cell in pixels
    pub cell_size: u32,
    /// Delay between simulation steps
    pub tick_interval_ms: u64,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points added per food eaten
    pub food_reward: u32,

    // Input
    /// Minimum travel in pixels, on either axis, before a swipe counts
    pub swipe_threshold: f32,
    /// Pointer must be more than this many cells away from the head to steer
    pub pointer_dead_zone: i32,
    /// Steer towards the mouse pointer as it moves
    pub mouse_follow: bool,
    /// Steer towards wherever the board is tapped
    pub tap_zones: bool,

    // Food placement
    /// Random draws before falling back to scanning free cells
    pub max_spawn_attempts: usize,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600,
            canvas_height: 400,
            cell_size: 20,
            tick_interval_ms: 150,
            initial_snake_length: 1,
            food_reward: 10,
            swipe_threshold: 30.0,
            pointer_dead_zone: 1,
            mouse_follow: true,
            tap_zones: false,
            max_spawn_attempts: 1024,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom canvas size
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Default::default()
        }
    }

    /// Touch-screen style controls: tap zones instead of mouse-follow
    pub fn touch(mut self) -> Self {
        self.mouse_follow = false;
        self.tap_zones = true;
        self
    }

    pub fn grid(&self) -> Grid {
        Grid::from_canvas(self.canvas_width, self.canvas_height, self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject settings the game cannot run with
    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        let grid = self.grid();
        ensure!(
            grid.width > 0 && grid.height > 0 && grid.len() >= 2,
            "a {}x{} canvas with {}px cells leaves no room to play",
            self.canvas_width,
            self.canvas_height,
            self.cell_size
        );
        ensure!(
            self.initial_snake_length >= 1 && self.initial_snake_length <= grid.width / 2,
            "initial snake length {} does not fit a {}-cell wide grid",
            self.initial_snake_length,
            grid.width
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        ensure!(
            self.max_spawn_attempts > 0,
            "max spawn attempts must be positive"
        );
        ensure!(
            self.swipe_threshold >= 0.0,
            "swipe threshold cannot be negative"
        );
        Ok(())
    }
}
