use std::convert::TryFrom;
use std::fmt;

use crate::position::Position;

/// Any of the directions needed for Sokoban.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

/// All directions, in the order in which the path search expands a cell.
pub const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

impl Direction {
    /// Return the opposite direction. This is used when undoing a move.
    pub fn reverse(self) -> Self {
        use self::Direction::*;
        match self {
            Up => Down,
            Right => Left,
            Down => Up,
            Left => Right,
        }
    }

    /// The offset of a single step in this direction.
    pub fn unit_vector(self) -> Position {
        use self::Direction::*;
        let (x, y) = match self {
            Up => (0, -1),
            Right => (1, 0),
            Down => (0, 1),
            Left => (-1, 0),
        };
        Position { x, y }
    }

    pub fn to_char(self) -> char {
        match self {
            Direction::Up => 'U',
            Direction::Right => 'R',
            Direction::Down => 'D',
            Direction::Left => 'L',
        }
    }
}

impl TryFrom<char> for Direction {
    type Error = char;

    /// Parse a single letter of the URDL notation, ignoring case.
    fn try_from(c: char) -> Result<Direction, char> {
        use self::Direction::*;
        Ok(match c.to_ascii_uppercase() {
            'U' => Up,
            'R' => Right,
            'D' => Down,
            'L' => Left,
            _ => return Err(c),
        })
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Render a sequence of directions in URDL notation.
pub fn directions_to_string(directions: &[Direction]) -> String {
    directions.iter().map(|dir| dir.to_char()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionResult {
    /// `to` lies in the given direction of `from`, in the same row or column.
    Neighbour { direction: Direction },
    SamePosition,
    /// The two positions are neither in the same row nor in the same column.
    Other,
}

/// Find out in which direction you have to move to get from `from` to `to`, if there is such a
/// direction.
pub fn direction(from: Position, to: Position) -> DirectionResult {
    use self::Direction::*;
    let (dx, dy) = to - from;
    if dx == 0 && dy == 0 {
        DirectionResult::SamePosition
    } else if dy == 0 {
        DirectionResult::Neighbour {
            direction: if dx < 0 { Left } else { Right },
        }
    } else if dx == 0 {
        DirectionResult::Neighbour {
            direction: if dy < 0 { Up } else { Down },
        }
    } else {
        DirectionResult::Other
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&DIRECTIONS).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverse_is_involution() {
        for &dir in &DIRECTIONS {
            assert_eq!(dir.reverse().reverse(), dir);
            assert_ne!(dir.reverse(), dir);
        }
    }

    #[test]
    fn unit_vectors_cancel() {
        for &dir in &DIRECTIONS {
            assert_eq!(dir.unit_vector() + dir.reverse().unit_vector(), Position { x: 0, y: 0 });
        }
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(Direction::try_from('u'), Ok(Direction::Up));
        assert_eq!(Direction::try_from('R'), Ok(Direction::Right));
        assert_eq!(Direction::try_from('x'), Err('x'));
    }

    #[test]
    fn direction_between_positions() {
        let origin = Position::new(2, 2);
        assert_eq!(direction(origin, origin), DirectionResult::SamePosition);
        assert_eq!(
            direction(origin, Position::new(5, 2)),
            DirectionResult::Neighbour {
                direction: Direction::Right
            }
        );
        assert_eq!(
            direction(origin, Position::new(2, 0)),
            DirectionResult::Neighbour {
                direction: Direction::Up
            }
        );
        assert_eq!(direction(origin, Position::new(3, 3)), DirectionResult::Other);
    }
}
