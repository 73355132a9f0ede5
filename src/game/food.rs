use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{Cell, Grid};

/// Cosmetic food variety; only the renderer cares which one it is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodKind {
    Apple,
    Carrot,
    Grapes,
    Banana,
    Cherry,
    Orange,
}

impl FoodKind {
    pub const ALL: [FoodKind; 6] = [
        FoodKind::Apple,
        FoodKind::Carrot,
        FoodKind::Grapes,
        FoodKind::Banana,
        FoodKind::Cherry,
        FoodKind::Orange,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Carrot => "carrot",
            FoodKind::Grapes => "grapes",
            FoodKind::Banana => "banana",
            FoodKind::Cherry => "cherry",
            FoodKind::Orange => "orange",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub cell: Cell,
    pub kind: FoodKind,
}

/// Places food on free cells and holds the current one
pub struct FoodSpawner {
    rng: StdRng,
    max_attempts: usize,
    current: Option<Food>,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>, max_attempts: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_attempts,
            current: None,
        }
    }

    pub fn current(&self) -> Option<&Food> {
        self.current.as_ref()
    }

    /// Replace the current food with a fresh one away from `occupied`.
    ///
    /// Draws uniformly random cells until one is free. Rejection sampling slows
    /// down as the board fills, so after `max_attempts` draws it switches to
    /// picking among the remaining free cells directly. Returns `None` and
    /// clears the current food when no cell is free.
    pub fn spawn(&mut self, grid: &Grid, occupied: &[Cell]) -> Option<Food> {
        let cell = self
            .sample_free_cell(grid, occupied)
            .or_else(|| self.pick_from_free_cells(grid, occupied));

        self.current = match cell {
            Some(cell) => Some(Food {
                cell,
                kind: self.random_kind(),
            }),
            None => None,
        };

        match &self.current {
            Some(food) => debug!(
                "Spawned {} at ({}, {})",
                food.kind.name(),
                food.cell.x,
                food.cell.y
            ),
            None => warn!("No free cell left for food on a {}x{} grid", grid.width, grid.height),
        }
        self.current
    }

    #[cfg(test)]
    pub(crate) fn force(&mut self, cell: Option<Cell>) {
        self.current = cell.map(|cell| Food {
            cell,
            kind: FoodKind::Apple,
        });
    }

    fn sample_free_cell(&mut self, grid: &Grid, occupied: &[Cell]) -> Option<Cell> {
        if grid.is_empty() {
            return None;
        }
        for _ in 0..self.max_attempts {
            let x = self.rng.gen_range(0..grid.width) as i32;
            let y = self.rng.gen_range(0..grid.height) as i32;
            let cell = Cell::new(x, y);

            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }
        None
    }

    fn pick_from_free_cells(&mut self, grid: &Grid, occupied: &[Cell]) -> Option<Cell> {
        let free: Vec<Cell> = grid.cells().filter(|cell| !occupied.contains(cell)).collect();
        if !free.is_empty() {
            warn!(
                "Food sampling gave up after {} draws, choosing among {} free cells",
                self.max_attempts,
                free.len()
            );
        }
        free.choose(&mut self.rng).copied()
    }

    fn random_kind(&mut self) -> FoodKind {
        FoodKind::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(FoodKind::Apple)
    }
}
