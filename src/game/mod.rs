//! Core game logic module for Snake
//!
//! Grid, snake movement, food placement and the tick-driven session controller.
//! Nothing here touches the terminal; the host feeds input in and reads state out.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::GameConfig;
pub use engine::GameEngine;
pub use food::{Food, FoodKind, FoodSpawner};
pub use grid::{Cell, Grid, Point};
pub use state::{CollisionType, GameOverReason, GamePhase, Snake, StepInfo, TickOutcome};
