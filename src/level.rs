pub(crate) mod builder;
mod movement;
mod pathfinding;
mod translate;

use std::fmt;

use crate::grid::Grid;
use crate::position::*;
use crate::tile::Tile;
use crate::util::*;

pub use self::builder::LevelBuilder;
pub use self::movement::{MoveOutcome, Obstacle, Relocation};

/// A single puzzle: the grid of tiles together with the metadata found in the level file.
///
/// Cloning a `Level` copies every cell, so the copy can be played without affecting the
/// original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    grid: Grid,
    title: Option<String>,
    author: Option<String>,
    solution: Option<String>,
}

impl Level {
    /// Parse the XSB representation of a single level. Lines that are not part of the level
    /// itself are ignored, except for `Title:`, `Author:` and `Solution:` lines.
    pub fn parse(string: &str) -> Result<Level, SokobanError> {
        let mut builder = LevelBuilder::new();
        for line in crate::collection::split_lines(string) {
            builder.feed(line);
        }
        builder.build()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// The recorded solution, in whatever notation the level file used.
    pub fn solution(&self) -> Option<&str> {
        self.solution.as_deref()
    }

    pub fn tile_at(&self, pos: Position) -> Result<Tile, SokobanError> {
        self.grid.tile_at(pos)
    }

    pub fn relocate(&mut self, from: Position, to: Position, what: Tile) -> Result<(), SokobanError> {
        self.grid.relocate(from, to, what)
    }

    /// Where the worker is, found by looking for the cell carrying the player flag.
    pub fn worker_position(&self) -> Option<Position> {
        self.grid.find_all(Tile::PLAYER).next()
    }

    /// Positions of all crates in row-major order.
    pub fn crate_positions(&self) -> Vec<Position> {
        self.grid.find_all(Tile::CRATE).collect()
    }

    /// Check whether the level is completed, i.e. every goal has a crate on it. Crates that are
    /// not on a goal do not matter.
    pub fn is_solved(&self) -> bool {
        !self.grid.cells().iter().any(|tile| tile.is_empty_goal())
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}
