//! Food placement.
//!
//! The board keeps an explicit set of free cells so a new food position is a
//! single uniform draw over the cells the snake does not occupy. A full board
//! simply has nothing to draw from.

use std::collections::HashMap;

use rand::Rng;

use super::state::{Bounds, Position};

/// Cells of the grid not covered by the snake.
///
/// Backed by a dense vector for O(1) uniform sampling plus an index map for
/// O(1) removal (swap-remove).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCells {
    cells: Vec<Position>,
    index: HashMap<Position, usize>,
    bounds: Bounds,
}

impl FreeCells {
    /// Every cell inside `bounds` is free.
    pub fn new(bounds: Bounds) -> Self {
        let cells: Vec<Position> = bounds.cells().collect();
        let index = cells.iter().enumerate().map(|(i, &p)| (p, i)).collect();
        Self {
            cells,
            index,
            bounds,
        }
    }

    /// All cells of `bounds` except the ones in `occupied`.
    pub fn excluding<'a>(bounds: Bounds, occupied: impl IntoIterator<Item = &'a Position>) -> Self {
        let mut free = Self::new(bounds);
        for pos in occupied {
            free.occupy(*pos);
        }
        free
    }

    /// Mark a cell as taken. Returns false if it was not free.
    pub fn occupy(&mut self, pos: Position) -> bool {
        let Some(slot) = self.index.remove(&pos) else {
            return false;
        };

        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.index.insert(moved, slot);
        }
        true
    }

    /// Mark a cell as free again. Out-of-bounds or already free cells are ignored.
    pub fn release(&mut self, pos: Position) -> bool {
        if !self.bounds.contains(pos) || self.index.contains_key(&pos) {
            return false;
        }

        self.index.insert(pos, self.cells.len());
        self.cells.push(pos);
        true
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index.contains_key(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Uniformly pick one free cell
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        if self.cells.is_empty() {
            return None;
        }
        Some(self.cells[rng.gen_range(0..self.cells.len())])
    }
}

/// Draw a new food position from the free cells.
///
/// Returns `None` only when the snake covers the whole board.
pub fn respawn<R: Rng + ?Sized>(free: &FreeCells, rng: &mut R) -> Option<Position> {
    free.choose(rng)
}
