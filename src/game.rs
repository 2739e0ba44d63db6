use std::convert::TryFrom;
use std::sync::mpsc::Sender;
use std::time::Instant;

use regex::Regex;

use crate::autoplay::{Autoplay, Step};
use crate::collection::*;
use crate::command::*;
use crate::config::Config;
use crate::direction::*;
use crate::event::Event;
use crate::level::{Level, MoveOutcome, Relocation};
use crate::move_::{self, Move};
use crate::position::Position;
use crate::undo::Undo;
use crate::util::SokobanError;

lazy_static! {
    static ref URDL: Regex = Regex::new(r"(?i)^[URDL]+$").unwrap();
}

/// Where in its life cycle the current level is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A fresh copy of the level without any moves.
    Loaded,
    Playing,
    Solved,
}

/// Everything needed to do or undo a single move.
#[derive(Debug, Clone, PartialEq)]
struct HistoryEntry {
    mv: Move,
    /// What was moved, crate first.
    relocations: Vec<Relocation>,
}

pub struct Game {
    collection: Collection,
    config: Config,

    /// Index of the current level in `collection`.
    index: usize,

    /// A copy of one of the levels that is modified while playing.
    current_level: Level,

    /// Where the worker is in `current_level`.
    worker_position: Position,

    phase: Phase,

    /// Every move made on the current level, including those undone but not yet overwritten.
    history: Undo<HistoryEntry>,

    autoplay: Option<Autoplay>,

    listeners: Vec<Sender<Event>>,
}

/// Handling events
impl Game {
    /// Register a front end. It is immediately told which level is loaded.
    pub fn subscribe(&mut self, sender: Sender<Event>) {
        let _ = sender.send(self.level_loaded_event());
        self.listeners.push(sender);
    }

    fn notify(&mut self, event: Event) {
        // Front ends that went away are forgotten.
        self.listeners.retain(|sender| sender.send(event.clone()).is_ok());
    }

    fn level_loaded_event(&self) -> Event {
        Event::LevelLoaded {
            index: self.index,
            columns: self.current_level.columns(),
            rows: self.current_level.rows(),
            title: self.current_level.title().map(String::from),
            author: self.current_level.author().map(String::from),
        }
    }
}

impl Game {
    /// Start a session on the level selected by `config.start_level`.
    pub fn new(collection: Collection, config: Config) -> Result<Self, SokobanError> {
        let index = config.start_level.saturating_sub(1);
        let count = collection.number_of_levels();
        let level = match collection.level(index) {
            Some(level) => level.clone(),
            None if count == 0 => return Err(SokobanError::NoLevel),
            None => return Err(SokobanError::InvalidLevelIndex { index, count }),
        };
        let worker_position = level.worker_position().ok_or(SokobanError::NoWorker)?;
        info!("Starting with level #{} of {}", index + 1, collection.name());

        Ok(Game {
            collection,
            config,
            index,
            current_level: level,
            worker_position,
            phase: Phase::Loaded,
            history: Undo::new(),
            autoplay: None,
            listeners: vec![],
        })
    }

    /// Execute a command from the front end. Failures are reported to the listeners, so the
    /// results are only logged here.
    pub fn execute(&mut self, cmd: &Command) {
        if self.is_autoplaying() && cmd.is_interactive_move() {
            debug!("Ignoring {:?} during autoplay", cmd);
            return;
        }

        let result = match *cmd {
            Command::Nothing => Ok(()),
            Command::Move(dir) => self.execute_move(dir).map(|_| ()),
            Command::MoveTo(pos) => self.move_to(pos),
            Command::Undo => {
                self.undo();
                Ok(())
            }
            Command::Redo => self.redo(),
            Command::Restart => self.restart(),
            Command::GotoLevel(index) => self.goto_level(index),
            Command::NextLevel => self.next_level(),
            Command::PreviousLevel => self.previous_level(),
            Command::Play(ref sequence) => self.play(sequence),
            Command::ShowSolution => self.show_solution(),
            Command::CancelAutoplay => {
                self.cancel_autoplay();
                Ok(())
            }
        };

        if let Err(e) = result {
            debug!("{:?} failed: {}", cmd, e);
        }
    }

    // Access data concerning the current level

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current level in its current state.
    pub fn current_level(&self) -> &Level {
        &self.current_level
    }

    /// The index of the current level in the collection, starting at 0.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The rank of the current level in the current collection, starting at 1.
    pub fn rank(&self) -> usize {
        self.index + 1
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_last_level(&self) -> bool {
        self.rank() == self.collection.number_of_levels()
    }

    pub fn worker_position(&self) -> Position {
        self.worker_position
    }

    pub fn is_autoplaying(&self) -> bool {
        self.autoplay.is_some()
    }

    /// When the front end should call `tick` next, if autoplay is running.
    pub fn next_tick(&self) -> Option<Instant> {
        self.autoplay
            .as_ref()
            .map(|a| a.next_due().unwrap_or_else(Instant::now))
    }

    /// The moves performed to reach the current state.
    pub fn moves(&self) -> Vec<Move> {
        self.history.performed().iter().map(|step| step.mv).collect()
    }

    /// The number of moves performed since starting to solve this level.
    pub fn number_of_moves(&self) -> usize {
        self.history.performed().len()
    }

    /// The number of pushes performed since starting to solve this level.
    pub fn number_of_pushes(&self) -> usize {
        self.history
            .performed()
            .iter()
            .filter(|step| step.mv.moves_crate)
            .count()
    }

    /// The moves performed so far in URDL notation.
    pub fn moves_to_string(&self) -> String {
        self.history
            .performed()
            .iter()
            .map(|step| step.mv.direction.to_char())
            .collect()
    }

    /// The moves performed so far in LURD notation, i.e. with pushes in upper case.
    pub fn lurd(&self) -> String {
        move_::moves_to_string(&self.moves())
    }
}

/// Moving around
impl Game {
    /// Try to move the worker one step. Returns whether the worker moved. Moves are ignored
    /// once the level is solved.
    pub fn execute_move(&mut self, direction: Direction) -> Result<bool, SokobanError> {
        if self.phase == Phase::Solved {
            debug!("Level is solved, ignoring move {}", direction);
            return Ok(false);
        }

        let from = self.worker_position;
        let outcome = self.current_level.attempt_move(from, direction)?;
        match outcome {
            MoveOutcome::Blocked { obstacle, .. } => {
                self.notify(Event::CannotMove {
                    direction,
                    obstacle,
                });
                Ok(false)
            }
            MoveOutcome::Moved {
                worker,
                pushed_crate,
            } => {
                self.history.record(HistoryEntry {
                    mv: Move::new(direction, pushed_crate.is_some()),
                    relocations: outcome.relocations(),
                });
                self.announce(worker, pushed_crate, direction);
                self.phase = Phase::Playing;
                self.check_solved();
                Ok(true)
            }
        }
    }

    /// Walk to `target` along a shortest path without pushing crates.
    pub fn move_to(&mut self, target: Position) -> Result<(), SokobanError> {
        if self.phase == Phase::Solved {
            return Ok(());
        }
        let from = self.worker_position;
        let path = match self.current_level.shortest_path(from, target) {
            Some(path) => path,
            None => {
                self.notify(Event::NoPathFound { from, to: target });
                return Err(SokobanError::NoPathFound { from, to: target });
            }
        };
        for dir in path {
            self.execute_move(dir)?;
        }
        Ok(())
    }

    /// Take back the most recent move. Does nothing if there is none.
    pub fn undo(&mut self) {
        let step = match self.history.undo() {
            Some(step) => step.clone(),
            None => {
                self.notify(Event::NothingToUndo);
                return;
            }
        };

        for relocation in step.relocations.iter().rev() {
            let back = relocation.inverse();
            if let Err(e) = self.current_level.apply(back) {
                error!("Failed to undo {:?}: {}", step.mv, e);
                return;
            }
            if back.what.is_worker() {
                self.worker_position = back.to;
            }
            self.notify_relocation(back, step.mv.direction.reverse());
        }
        self.debug_check_worker();

        self.phase = if self.history.performed().is_empty() {
            Phase::Loaded
        } else {
            Phase::Playing
        };
    }

    /// Repeat the most recently undone move.
    pub fn redo(&mut self) -> Result<(), SokobanError> {
        if self.phase == Phase::Solved {
            return Ok(());
        }
        let step = match self.history.redo() {
            Some(step) => step.clone(),
            None => {
                self.notify(Event::NothingToRedo);
                return Ok(());
            }
        };

        for &relocation in &step.relocations {
            self.current_level.apply(relocation)?;
            if relocation.what.is_worker() {
                self.worker_position = relocation.to;
            }
            self.notify_relocation(relocation, step.mv.direction);
        }
        self.debug_check_worker();

        self.phase = Phase::Playing;
        self.check_solved();
        Ok(())
    }

    fn announce(&mut self, worker: Relocation, pushed_crate: Option<Relocation>, dir: Direction) {
        if let Some(relocation) = pushed_crate {
            self.notify_relocation(relocation, dir);
        }
        self.worker_position = worker.to;
        self.notify_relocation(worker, dir);
        self.debug_check_worker();
    }

    fn notify_relocation(&mut self, relocation: Relocation, direction: Direction) {
        let Relocation { from, to, what } = relocation;
        let event = if what.is_worker() {
            Event::MoveWorker {
                from,
                to,
                direction,
            }
        } else {
            Event::MoveCrate { from, to }
        };
        self.notify(event);
    }

    fn debug_check_worker(&self) {
        debug_assert_eq!(
            self.current_level.worker_position(),
            Some(self.worker_position)
        );
    }

    fn check_solved(&mut self) {
        if !self.current_level.is_solved() {
            return;
        }
        self.phase = Phase::Solved;
        info!(
            "Level #{} solved with {} moves and {} pushes",
            self.rank(),
            self.number_of_moves(),
            self.number_of_pushes()
        );
        let event = Event::LevelSolved {
            moves: self.moves_to_string(),
            number_of_moves: self.number_of_moves(),
            more_levels: !self.is_last_level(),
            autoplayed: self.is_autoplaying(),
        };
        self.notify(event);
    }
}

/// Switching levels
impl Game {
    /// Replace the current level by a clean copy.
    pub fn restart(&mut self) -> Result<(), SokobanError> {
        self.goto_level(self.index)
    }

    /// Load a clean copy of the level with the given index. If there is no such level, the
    /// current level stays as it is.
    pub fn goto_level(&mut self, index: usize) -> Result<(), SokobanError> {
        let count = self.collection.number_of_levels();
        let level = match self.collection.level(index) {
            Some(level) => level.clone(),
            None => {
                warn!("There is no level #{}, only {} levels", index + 1, count);
                self.notify(Event::InvalidLevelIndex { index, count });
                return Err(SokobanError::InvalidLevelIndex { index, count });
            }
        };
        let worker_position = level.worker_position().ok_or(SokobanError::NoWorker)?;

        self.stop_autoplay(true);
        self.index = index;
        self.current_level = level;
        self.worker_position = worker_position;
        self.history.clear();
        self.phase = Phase::Loaded;

        let event = self.level_loaded_event();
        self.notify(event);
        Ok(())
    }

    pub fn next_level(&mut self) -> Result<(), SokobanError> {
        if self.is_last_level() {
            self.notify(Event::EndOfCollection);
            return Ok(());
        }
        self.goto_level(self.index + 1)
    }

    /// Go to the previous level unless this is already the first level in this collection.
    pub fn previous_level(&mut self) -> Result<(), SokobanError> {
        match self.index.checked_sub(1) {
            Some(index) => self.goto_level(index),
            None => {
                debug!("Already at the first level");
                Ok(())
            }
        }
    }
}

/// Autoplay
impl Game {
    /// Restart the current level and play `sequence` one move per tick. The sequence is either
    /// given in URDL notation (case is ignored) or in the notation understood by
    /// `Level::translate_foreign`.
    pub fn play(&mut self, sequence: &str) -> Result<(), SokobanError> {
        let directions = self.directions_for(sequence)?;
        if directions.is_empty() {
            debug!("Nothing to play in {:?}", sequence);
            return Ok(());
        }

        self.restart()?;
        let number_of_moves = directions.len();
        self.autoplay = Some(Autoplay::new(directions, self.config.autoplay_interval()));
        info!("Playing {} moves", number_of_moves);
        self.notify(Event::AutoplayStarted { number_of_moves });
        Ok(())
    }

    /// Play the solution that came with the level, if any.
    pub fn show_solution(&mut self) -> Result<(), SokobanError> {
        match self.current_level.solution().map(String::from) {
            Some(solution) => self.play(&solution),
            None => {
                self.notify(Event::NoSolutionAvailable);
                Ok(())
            }
        }
    }

    /// Ask autoplay to stop. The worker stays wherever it is at the next tick.
    pub fn cancel_autoplay(&mut self) {
        if let Some(autoplay) = self.autoplay.as_mut() {
            autoplay.cancel();
        }
    }

    /// Perform at most one move of a running autoplay. Returns whether autoplay is still running
    /// afterwards.
    pub fn tick(&mut self, now: Instant) -> bool {
        let step = match self.autoplay.as_mut() {
            Some(autoplay) => autoplay.poll(now),
            None => return false,
        };

        match step {
            Step::Wait => {}
            Step::Move(dir) => {
                if let Err(e) = self.execute_move(dir) {
                    error!("Autoplay failed: {}", e);
                    self.stop_autoplay(true);
                } else if self.phase == Phase::Solved {
                    self.stop_autoplay(false);
                }
            }
            Step::Finished => self.stop_autoplay(false),
            Step::Cancelled => self.stop_autoplay(true),
        }

        self.is_autoplaying()
    }

    fn stop_autoplay(&mut self, cancelled: bool) {
        if let Some(autoplay) = self.autoplay.take() {
            debug!("Autoplay stopped with {} moves left", autoplay.remaining());
            self.notify(Event::AutoplayStopped { cancelled });
        }
    }

    /// Turn a sequence given by the user into directions. Foreign notation is translated
    /// starting from the initial state of the current level.
    fn directions_for(&mut self, sequence: &str) -> Result<Vec<Direction>, SokobanError> {
        let compact: String = sequence.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return Ok(vec![]);
        }
        if URDL.is_match(&compact) {
            return compact
                .chars()
                .map(|c| Direction::try_from(c).map_err(SokobanError::InvalidMove))
                .collect();
        }

        let canonical = self
            .collection
            .level(self.index)
            .ok_or(SokobanError::InvalidLevelIndex {
                index: self.index,
                count: self.collection.number_of_levels(),
            })?;
        let start = canonical.worker_position().ok_or(SokobanError::NoWorker)?;
        let result = canonical.translate_foreign(start, sequence);

        if let Err(ref e) = result {
            error!("Cannot play {:?}: {}", sequence, e);
            let event = match *e {
                SokobanError::NoPathFound { from, to } => Event::NoPathFound { from, to },
                _ => Event::UnparseableSequence {
                    sequence: sequence.to_owned(),
                },
            };
            self.notify(event);
        }
        result
    }
}
