use std::convert::TryFrom;

use regex::Regex;

use crate::direction::*;
use crate::level::*;
use crate::position::*;
use crate::util::SokobanError;

lazy_static! {
    /// Either a direction followed by a repetition count or a target cell given as `x-y`.
    static ref TOKEN: Regex = Regex::new(r"(?i)([URDL])(\d+)|(\d+)-(\d+)").unwrap();
}

fn parse_number(s: &str, sequence: &str) -> Result<usize, SokobanError> {
    s.parse()
        .map_err(|_| SokobanError::UnparseableSequence(sequence.to_owned()))
}

fn unparseable(sequence: &str) -> SokobanError {
    SokobanError::UnparseableSequence(sequence.to_owned())
}

impl Level {
    /// Convert a solution in the notation used by ksokoban.online to a sequence of directions.
    ///
    /// That notation consists of tokens like `r3`, meaning three steps to the right, and `6-1`,
    /// meaning "walk to the cell at x = 6, y = 1". Anything in between tokens is skipped. The
    /// conversion is simulated on a copy of `self`, starting with the worker at `start`.
    ///
    /// A sequence without any tokens, or with a repetition count larger than the number of
    /// cells in the level, is rejected as unparseable.
    pub fn translate_foreign(
        &self,
        start: Position,
        sequence: &str,
    ) -> Result<Vec<Direction>, SokobanError> {
        let mut scratch = self.clone();
        let mut pos = start;
        let mut result = vec![];
        let max_repeat = self.columns() * self.rows();
        let mut tokens = 0;

        for caps in TOKEN.captures_iter(sequence) {
            tokens += 1;
            if let (Some(letter), Some(count)) = (caps.get(1), caps.get(2)) {
                let letter = letter.as_str().chars().next().unwrap_or_default();
                let dir = Direction::try_from(letter).map_err(SokobanError::InvalidMove)?;
                let n = parse_number(count.as_str(), sequence)?;
                if n > max_repeat {
                    return Err(unparseable(sequence));
                }
                for _ in 0..n {
                    match scratch.attempt_move(pos, dir)? {
                        MoveOutcome::Blocked { .. } => break,
                        outcome => pos = outcome.worker_position(pos),
                    }
                }
                result.extend(std::iter::repeat(dir).take(n));
            } else if let (Some(x), Some(y)) = (caps.get(3), caps.get(4)) {
                let target = Position::new(
                    parse_number(x.as_str(), sequence)?,
                    parse_number(y.as_str(), sequence)?,
                );
                let path = scratch
                    .shortest_path(pos, target)
                    .ok_or(SokobanError::NoPathFound { from: pos, to: target })?;
                // The recorded solution is trusted to only walk along free cells, so the worker
                // is put down at the target directly.
                if target != pos {
                    pos = scratch.warp_worker(pos, target)?;
                }
                result.extend(path);
            }
        }

        if tokens == 0 {
            return Err(unparseable(sequence));
        }

        info!("{} -> {}", sequence, directions_to_string(&result));
        Ok(result)
    }
}
