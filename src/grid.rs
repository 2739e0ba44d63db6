use std::convert::TryFrom;
use std::fmt;

use crate::position::Position;
use crate::tile::Tile;
use crate::util::SokobanError;

/// A rectangular array of tiles in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    columns: usize,
    rows: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Build a grid from rows in XSB notation. Short rows are padded with floor up to the length
    /// of the longest row. Returns the first character that is not part of the tile alphabet.
    pub fn from_rows<S: AsRef<str>>(lines: &[S]) -> Result<Self, char> {
        let rows = lines.len();
        let columns = lines
            .iter()
            .map(|line| line.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = Vec::with_capacity(columns * rows);
        for line in lines {
            let mut n = 0;
            for chr in line.as_ref().chars() {
                cells.push(Tile::try_from(chr)?);
                n += 1;
            }
            cells.extend(std::iter::repeat(Tile::FLOOR).take(columns - n));
        }

        Ok(Grid {
            columns,
            rows,
            cells,
        })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.columns as isize && pos.y < self.rows as isize
    }

    pub fn position(&self, index: usize) -> Position {
        Position::from_index(index, self.columns)
    }

    pub fn tile_at(&self, pos: Position) -> Result<Tile, SokobanError> {
        if self.in_bounds(pos) {
            Ok(self.cells[pos.to_index(self.columns)])
        } else {
            Err(SokobanError::OutOfBounds(pos))
        }
    }

    /// Like `tile_at`, but cells beyond the border count as walls.
    pub fn tile_or_wall(&self, pos: Position) -> Tile {
        self.tile_at(pos).unwrap_or(Tile::WALL)
    }

    /// Set the flags `what` at `to` and clear them at `from`. This does not check whether doing
    /// so makes any sense, that is up to the caller.
    pub fn relocate(&mut self, from: Position, to: Position, what: Tile) -> Result<(), SokobanError> {
        if !self.in_bounds(from) {
            return Err(SokobanError::OutOfBounds(from));
        } else if !self.in_bounds(to) {
            return Err(SokobanError::OutOfBounds(to));
        }
        let columns = self.columns;
        self.cells[to.to_index(columns)].insert(what);
        self.cells[from.to_index(columns)].remove(what);
        Ok(())
    }

    /// All positions whose tile contains the given flags.
    pub fn find_all(&self, what: Tile) -> impl Iterator<Item = Position> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, tile)| tile.contains(what))
            .map(move |(i, _)| Position::from_index(i, columns))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.columns.max(1)).enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            for tile in row {
                write!(f, "{}", tile)?;
            }
        }
        Ok(())
    }
}
