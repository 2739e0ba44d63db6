use crate::direction::Direction;
use crate::level::Obstacle;
use crate::position::Position;

/// Everything the front end may want to react to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event")]
pub enum Event {
    /// A fresh copy of a level has been loaded, either by navigating or by restarting.
    LevelLoaded {
        index: usize,
        columns: usize,
        rows: usize,
        title: Option<String>,
        author: Option<String>,
    },
    MoveWorker {
        from: Position,
        to: Position,
        direction: Direction,
    },
    MoveCrate {
        from: Position,
        to: Position,
    },
    CannotMove {
        direction: Direction,
        obstacle: Obstacle,
    },
    NothingToUndo,
    NothingToRedo,
    LevelSolved {
        /// The moves in URDL notation.
        moves: String,
        number_of_moves: usize,
        more_levels: bool,
        autoplayed: bool,
    },
    EndOfCollection,

    InvalidLevelIndex {
        index: usize,
        count: usize,
    },
    UnparseableSequence {
        sequence: String,
    },
    NoPathFound {
        from: Position,
        to: Position,
    },
    NoSolutionAvailable,

    AutoplayStarted {
        number_of_moves: usize,
    },
    AutoplayStopped {
        cancelled: bool,
    },
}

impl Event {
    /// Does this event report a request that could not be carried out?
    pub fn is_error(&self) -> bool {
        use self::Event::*;
        match self {
            LevelLoaded { .. }
            | MoveWorker { .. }
            | MoveCrate { .. }
            | LevelSolved { .. }
            | AutoplayStarted { .. }
            | AutoplayStopped { .. } => false,
            _ => true,
        }
    }
}
