use crossterm::event::KeyCode;
use log::debug;

use crate::game::{Direction, Grid, Point};

/// Heading requested by a key, if it is a steering key
pub fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Turns raw steering input into a buffered heading.
///
/// Every entry point returns the direction the snake will take: the new
/// candidate when it is accepted, otherwise `current`. The reverse of
/// `current` is never accepted. Accepted candidates overwrite the pending
/// direction, which the game loop takes once per tick.
#[derive(Debug, Clone)]
pub struct DirectionResolver {
    grid: Grid,
    swipe_threshold: f32,
    dead_zone: i32,
    pending: Option<Direction>,
}

impl DirectionResolver {
    pub fn new(grid: Grid, swipe_threshold: f32, dead_zone: i32) -> Self {
        Self {
            grid,
            swipe_threshold,
            dead_zone,
            pending: None,
        }
    }

    pub fn from_key(&mut self, key: KeyCode, current: Direction) -> Direction {
        self.accept(key_direction(key), current)
    }

    /// Follow a pointer, measured in whole cells from the head.
    ///
    /// Pointers within the dead zone around the head are ignored so the snake
    /// does not jitter while the mouse rests near it.
    pub fn from_pointer(&mut self, pointer: Point, head: Point, current: Direction) -> Direction {
        let target = self.grid.cell_at(pointer);
        let origin = self.grid.cell_at(head);
        let (dx, dy) = (target.x - origin.x, target.y - origin.y);

        if dx.abs().max(dy.abs()) <= self.dead_zone {
            return current;
        }
        self.accept(Direction::from_delta(dx as f32, dy as f32), current)
    }

    pub fn from_swipe(&mut self, start: Point, end: Point, current: Direction) -> Direction {
        let (dx, dy) = (end.x - start.x, end.y - start.y);

        if dx.abs() <= self.swipe_threshold && dy.abs() <= self.swipe_threshold {
            return current;
        }
        self.accept(Direction::from_delta(dx, dy), current)
    }

    pub fn from_tap_zone(&mut self, tap: Point, head: Point, current: Direction) -> Direction {
        self.accept(Direction::from_delta(tap.x - head.x, tap.y - head.y), current)
    }

    pub fn pending(&self) -> Option<Direction> {
        self.pending
    }

    /// Consume the buffered heading
    pub fn take_pending(&mut self) -> Option<Direction> {
        self.pending.take()
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    fn accept(&mut self, candidate: Option<Direction>, current: Direction) -> Direction {
        match candidate {
            Some(dir) if !dir.is_opposite(current) => {
                debug!("Pending direction {:?} (heading {:?})", dir, current);
                self.pending = Some(dir);
                dir
            }
            _ => current,
        }
    }
}
