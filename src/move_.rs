use std::convert::TryFrom;
use std::fmt;

use crate::direction::Direction;
use crate::util::SokobanError;

/// This structure contains everything needed to do or undo a Sokoban move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    /// Was a crate moved?
    pub moves_crate: bool,

    /// Where was the move directed?
    pub direction: Direction,
}

impl Move {
    pub fn new(direction: Direction, moves_crate: bool) -> Self {
        Move {
            moves_crate,
            direction,
        }
    }

    /// The move in LURD notation: upper case for pushes, lower case otherwise.
    pub fn to_char(self) -> char {
        let c = self.direction.to_char();
        if self.moves_crate {
            c
        } else {
            c.to_ascii_lowercase()
        }
    }
}

/// Parse a sequence of moves in LURD (or plain URDL) notation.
pub fn parse(s: &str) -> Result<Vec<Move>, SokobanError> {
    s.chars()
        .map(|c| Move::try_from(c).map_err(SokobanError::InvalidMove))
        .collect()
}

/// Render moves in LURD notation.
pub fn moves_to_string(moves: &[Move]) -> String {
    moves.iter().map(|mv| mv.to_char()).collect()
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Move {
    type Error = char;

    fn try_from(c: char) -> Result<Move, char> {
        let direction = Direction::try_from(c)?;
        Ok(Move::new(direction, c.is_ascii_uppercase()))
    }
}
