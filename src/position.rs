use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::direction::Direction;

/// A position in a Sokoban level given as (x,y) coordinates. The origin is the top left corner,
/// `x` grows to the right and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: isize,
    pub y: isize,
}

impl Position {
    pub fn new(x: usize, y: usize) -> Self {
        Position {
            x: x as isize,
            y: y as isize,
        }
    }

    pub fn from_index(index: usize, columns: usize) -> Self {
        Position {
            x: (index % columns) as isize,
            y: (index / columns) as isize,
        }
    }

    /// Index into a row-major array with the given number of columns. The caller has to make sure
    /// that `self` lies within the grid.
    pub fn to_index(self, columns: usize) -> usize {
        self.x as usize + self.y as usize * columns
    }

    /// Return the neighbouring Position in the given direction.
    pub fn neighbour(self, direction: Direction) -> Self {
        self + direction.unit_vector()
    }
}

impl Add for Position {
    type Output = Position;
    fn add(self, other: Position) -> Position {
        Position {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Mul<isize> for Position {
    type Output = Position;
    fn mul(self, factor: isize) -> Position {
        Position {
            x: self.x * factor,
            y: self.y * factor,
        }
    }
}

impl Sub for Position {
    type Output = (isize, isize);
    fn sub(self, other: Position) -> (isize, isize) {
        (self.x - other.x, self.y - other.y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
