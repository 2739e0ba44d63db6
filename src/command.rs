use crate::direction::*;
use crate::position::*;

/// Anything the user can ask the back end to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Do not do anything. This exists solely to eliminate the need of using Option<Command>.
    Nothing,

    /// Move one step in the given direction if possible.
    Move(Direction),

    /// Walk to the given cell without pushing any crates.
    MoveTo(Position),

    /// Undo the previous move.
    Undo,

    /// Redo a move previously undone.
    Redo,

    /// Reset the current level.
    Restart,

    /// Load the level with the given (zero-based) index.
    GotoLevel(usize),

    /// Go to the next level in the current collection.
    NextLevel,

    /// Go back a level.
    PreviousLevel,

    /// Restart the level and play the given moves, either URDL or the notation used by
    /// ksokoban.online.
    Play(String),

    /// Play the solution stored in the level file.
    ShowSolution,

    /// Stop autoplay at the next tick.
    CancelAutoplay,
}

impl Command {
    /// Does this command only make sense while no moves are being played automatically?
    pub fn is_interactive_move(&self) -> bool {
        matches!(
            *self,
            Command::Move(_) | Command::MoveTo(_) | Command::Undo | Command::Redo
        )
    }
}
