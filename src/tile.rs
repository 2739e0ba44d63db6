use std::convert::TryFrom;
use std::fmt;
use std::ops::BitOr;

/// The contents of a single cell as a set of flags.
///
/// `WALL` is never combined with anything else. Every other cell carries `FLOOR`, optionally
/// marked as a `GOAL`, and holds at most one of `PLAYER` and `CRATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile(u8);

impl Tile {
    pub const FLOOR: Tile = Tile(1);
    pub const PLAYER: Tile = Tile(1 << 1);
    pub const GOAL: Tile = Tile(1 << 2);
    pub const CRATE: Tile = Tile(1 << 3);
    pub const WALL: Tile = Tile(1 << 4);

    /// Are all flags of `other` set in `self`?
    pub fn contains(self, other: Tile) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Tile) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Tile) {
        self.0 &= !other.0;
    }

    /// Can the player (or a crate) ever stand on this cell?
    pub fn is_walkable(self) -> bool {
        !self.contains(Tile::WALL)
    }

    /// Is there something on this cell that a push would move?
    pub fn has_movable(self) -> bool {
        self.contains(Tile::CRATE)
    }

    pub fn is_goal(self) -> bool {
        self.contains(Tile::GOAL)
    }

    pub fn is_worker(self) -> bool {
        self.contains(Tile::PLAYER)
    }

    /// A goal that still waits for its crate.
    pub fn is_empty_goal(self) -> bool {
        self.is_goal() && !self.has_movable()
    }

    /// Walkable and not occupied by a crate.
    pub fn is_free(self) -> bool {
        self.is_walkable() && !self.has_movable()
    }

    /// Given a tile, return the character representing it in the XSB format, if the combination
    /// of flags has one.
    pub fn to_char(self) -> Option<char> {
        const FLOOR: u8 = Tile::FLOOR.0;
        const PLAYER: u8 = Tile::PLAYER.0;
        const GOAL: u8 = Tile::GOAL.0;
        const CRATE: u8 = Tile::CRATE.0;
        const WALL: u8 = Tile::WALL.0;
        Some(match self.0 {
            x if x == PLAYER | FLOOR => '@',
            x if x == PLAYER | GOAL | FLOOR => '+',
            x if x == FLOOR => ' ',
            x if x == CRATE | FLOOR => '$',
            x if x == GOAL | FLOOR => '.',
            x if x == CRATE | GOAL | FLOOR => '*',
            x if x == WALL => '#',
            _ => return None,
        })
    }
}

/// The characters making up a row of a level.
pub const TILE_CHARS: &str = "@+ $.*#";

impl TryFrom<char> for Tile {
    type Error = char;

    /// Try to parse a given character as part of a level description.
    fn try_from(c: char) -> Result<Tile, char> {
        Ok(match c {
            '@' => Tile::PLAYER | Tile::FLOOR,
            '+' => Tile::PLAYER | Tile::GOAL | Tile::FLOOR,
            ' ' => Tile::FLOOR,
            '$' => Tile::CRATE | Tile::FLOOR,
            '.' => Tile::GOAL | Tile::FLOOR,
            '*' => Tile::CRATE | Tile::GOAL | Tile::FLOOR,
            '#' => Tile::WALL,
            _ => return Err(c),
        })
    }
}

impl BitOr for Tile {
    type Output = Tile;
    fn bitor(self, other: Tile) -> Tile {
        Tile(self.0 | other.0)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char().unwrap_or('?'))
    }
}
