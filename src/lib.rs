//! Grid snake for the terminal
//!
//! This library provides:
//! - Core game logic: grid, snake, food and the tick-driven session (game module)
//! - Keyboard, mouse-follow, swipe and tap steering (input module)
//! - TUI rendering (render module)
//! - In-memory session stats (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
