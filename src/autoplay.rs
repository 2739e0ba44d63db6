use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::direction::Direction;

/// What the owner of an `Autoplay` should do on the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next move is not due yet.
    Wait,
    Move(Direction),
    Finished,
    Cancelled,
}

/// A sequence of moves played one per tick, at most one every `interval`.
///
/// Nothing here runs by itself: the session asks for the next step whenever the front end's timer
/// fires. A cancellation request is honoured on the following tick.
#[derive(Debug, Clone)]
pub struct Autoplay {
    queue: VecDeque<Direction>,
    interval: Duration,
    last_move: Option<Instant>,
    cancel_requested: bool,
}

impl Autoplay {
    pub fn new(moves: Vec<Direction>, interval: Duration) -> Self {
        Autoplay {
            queue: moves.into(),
            interval,
            last_move: None,
            cancel_requested: false,
        }
    }

    pub fn cancel(&mut self) {
        self.cancel_requested = true;
    }

    /// The number of moves not played yet.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// When the next move may be played. The first move is due immediately.
    pub fn next_due(&self) -> Option<Instant> {
        self.last_move.map(|t| t + self.interval)
    }

    pub fn poll(&mut self, now: Instant) -> Step {
        if self.cancel_requested {
            return Step::Cancelled;
        }
        if let Some(last) = self.last_move {
            if now.saturating_duration_since(last) < self.interval {
                return Step::Wait;
            }
        }
        match self.queue.pop_front() {
            Some(dir) => {
                self.last_move = Some(now);
                Step::Move(dir)
            }
            None => Step::Finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Direction::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn throttled_in_order() {
        let start = Instant::now();
        let mut autoplay = Autoplay::new(vec![Up, Left, Down], ms(100));
        assert_eq!(autoplay.next_due(), None);

        assert_eq!(autoplay.poll(start), Step::Move(Up));
        assert_eq!(autoplay.poll(start + ms(10)), Step::Wait);
        assert_eq!(autoplay.poll(start + ms(99)), Step::Wait);
        assert_eq!(autoplay.next_due(), Some(start + ms(100)));
        assert_eq!(autoplay.poll(start + ms(100)), Step::Move(Left));
        assert_eq!(autoplay.remaining(), 1);
        assert_eq!(autoplay.poll(start + ms(500)), Step::Move(Down));
        assert_eq!(autoplay.poll(start + ms(600)), Step::Finished);
    }

    #[test]
    fn cancel_on_next_tick() {
        let start = Instant::now();
        let mut autoplay = Autoplay::new(vec![Up, Up, Up], ms(0));
        assert_eq!(autoplay.poll(start), Step::Move(Up));
        autoplay.cancel();
        assert_eq!(autoplay.poll(start + ms(1)), Step::Cancelled);
        assert_eq!(autoplay.remaining(), 2);
    }

    #[test]
    fn empty_sequence_finishes() {
        let mut autoplay = Autoplay::new(vec![], ms(150));
        assert_eq!(autoplay.poll(Instant::now()), Step::Finished);
    }
}
