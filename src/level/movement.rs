use crate::direction::Direction;
use crate::level::Level;
use crate::position::Position;
use crate::tile::Tile;
use crate::util::SokobanError;

/// What blocked a movement?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall,
    Crate,
}

/// A single change to the grid: the flags `what` were moved from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocation {
    pub from: Position,
    pub to: Position,
    pub what: Tile,
}

impl Relocation {
    /// The relocation that exactly reverses `self`.
    pub fn inverse(self) -> Self {
        Relocation {
            from: self.to,
            to: self.from,
            what: self.what,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved {
        worker: Relocation,
        pushed_crate: Option<Relocation>,
    },

    Blocked {
        obstacle_at: Position,
        obstacle: Obstacle,
    },
}

impl MoveOutcome {
    /// Where the worker ended up, given where it was before.
    pub fn worker_position(&self, before: Position) -> Position {
        match *self {
            MoveOutcome::Moved { worker, .. } => worker.to,
            MoveOutcome::Blocked { .. } => before,
        }
    }

    /// The relocations performed, crate first.
    pub fn relocations(&self) -> Vec<Relocation> {
        match *self {
            MoveOutcome::Moved {
                worker,
                pushed_crate,
            } => pushed_crate.into_iter().chain(Some(worker)).collect(),
            MoveOutcome::Blocked { .. } => vec![],
        }
    }
}

/// Movement, i.e. everything that *does* change the grid.
impl Level {
    /// Move the worker standing at `worker` one step in the given direction, pushing a crate if
    /// there is one. A push only happens if the cell behind the crate is free; otherwise neither
    /// the crate nor the worker moves. Cells beyond the border of the grid count as walls.
    pub fn attempt_move(
        &mut self,
        worker: Position,
        direction: Direction,
    ) -> Result<MoveOutcome, SokobanError> {
        let step = direction.unit_vector();
        let dst = worker + step;
        let dst_tile = self.grid.tile_or_wall(dst);

        if !dst_tile.is_walkable() {
            debug!("Cannot move to {} because there is a wall", dst);
            return Ok(MoveOutcome::Blocked {
                obstacle_at: dst,
                obstacle: Obstacle::Wall,
            });
        }

        let worker_move = Relocation {
            from: worker,
            to: dst,
            what: Tile::PLAYER,
        };

        if !dst_tile.has_movable() {
            self.relocate(worker, dst, Tile::PLAYER)?;
            return Ok(MoveOutcome::Moved {
                worker: worker_move,
                pushed_crate: None,
            });
        }

        let dst2 = worker + step * 2;
        let dst2_tile = self.grid.tile_or_wall(dst2);
        if !dst2_tile.is_free() {
            let obstacle = if dst2_tile.is_walkable() {
                Obstacle::Crate
            } else {
                Obstacle::Wall
            };
            debug!("Cannot push crate to {} because there is a {:?}", dst2, obstacle);
            return Ok(MoveOutcome::Blocked {
                obstacle_at: dst2,
                obstacle,
            });
        }

        self.relocate(dst, dst2, Tile::CRATE)?;
        self.relocate(worker, dst, Tile::PLAYER)?;
        Ok(MoveOutcome::Moved {
            worker: worker_move,
            pushed_crate: Some(Relocation {
                from: dst,
                to: dst2,
                what: Tile::CRATE,
            }),
        })
    }

    /// Put the worker at `to` without looking at what lies in between.
    pub fn warp_worker(&mut self, from: Position, to: Position) -> Result<Position, SokobanError> {
        self.relocate(from, to, Tile::PLAYER)?;
        Ok(to)
    }

    /// Apply a relocation recorded earlier.
    pub fn apply(&mut self, relocation: Relocation) -> Result<(), SokobanError> {
        self.relocate(relocation.from, relocation.to, relocation.what)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::DIRECTIONS;
    use quickcheck_macros::quickcheck;
    use crate::direction::Direction::*;

    fn level(s: &str) -> (Level, Position) {
        let lvl = Level::parse(s).unwrap();
        let pos = lvl.worker_position().unwrap();
        (lvl, pos)
    }

    #[test]
    fn test_trivial_move_1() {
        let (mut lvl, pos) = level(
            "####\n\
             #@ #\n\
             ####\n",
        );
        assert_eq!(pos, Position::new(1, 1));

        let pos = lvl.attempt_move(pos, Right).unwrap().worker_position(pos);
        assert_eq!(pos, Position::new(2, 1));
        let pos = lvl.attempt_move(pos, Left).unwrap().worker_position(pos);
        assert_eq!(pos, Position::new(1, 1));

        for &dir in &[Left, Up, Down] {
            let outcome = lvl.attempt_move(pos, dir).unwrap();
            assert_eq!(
                outcome,
                MoveOutcome::Blocked {
                    obstacle_at: pos.neighbour(dir),
                    obstacle: Obstacle::Wall
                }
            );
        }
        assert_eq!(lvl.worker_position(), Some(pos));
    }

    #[test]
    fn test_trivial_move_2() {
        let (mut lvl, pos) = level(
            "#######\n\
             #.$@$.#\n\
             #######\n",
        );
        assert_eq!(pos, Position::new(3, 1));
        let outcome = lvl.attempt_move(pos, Right).unwrap();
        assert_eq!(
            outcome.relocations(),
            vec![
                Relocation {
                    from: Position::new(4, 1),
                    to: Position::new(5, 1),
                    what: Tile::CRATE
                },
                Relocation {
                    from: pos,
                    to: Position::new(4, 1),
                    what: Tile::PLAYER
                },
            ]
        );
        assert_eq!(lvl.to_string(), "#######\n#.$ @*#\n#######");
    }

    #[test]
    fn push_onto_goal_solves() {
        let (mut lvl, pos) = level("#####\n#@$.#\n#####");
        let pos = lvl.attempt_move(pos, Right).unwrap().worker_position(pos);
        assert_eq!(pos, Position::new(2, 1));
        assert!(lvl.is_solved());

        // The crate now sits in front of a wall.
        let outcome = lvl.attempt_move(pos, Right).unwrap();
        assert_eq!(outcome.worker_position(pos), Position::new(2, 1));
        assert!(lvl.is_solved());
    }

    #[test]
    fn push_is_atomic() {
        let (mut lvl, pos) = level("######\n#@$$.#\n######");
        let before = lvl.clone();
        let outcome = lvl.attempt_move(pos, Right).unwrap();
        assert_eq!(
            outcome,
            MoveOutcome::Blocked {
                obstacle_at: Position::new(3, 1),
                obstacle: Obstacle::Crate
            }
        );
        assert_eq!(lvl, before);

        let (mut lvl, pos) = level("####\n#@$#\n####");
        let before = lvl.clone();
        let outcome = lvl.attempt_move(pos, Right).unwrap();
        assert_eq!(outcome.worker_position(pos), pos);
        assert_eq!(lvl, before);
    }

    #[test]
    fn open_border_counts_as_wall() {
        let (mut lvl, pos) = level("@ \n##");
        let outcome = lvl.attempt_move(pos, Left).unwrap();
        assert_eq!(outcome.worker_position(pos), pos);
        let outcome = lvl.attempt_move(pos, Up).unwrap();
        assert_eq!(outcome.worker_position(pos), pos);
    }

    #[test]
    fn warp_ignores_obstacles() {
        let (mut lvl, pos) = level("#####\n#@#.#\n#####");
        let to = lvl.warp_worker(pos, Position::new(3, 1)).unwrap();
        assert_eq!(lvl.worker_position(), Some(to));
        assert_eq!(lvl.to_string(), "#####\n# #+#\n#####");
    }

    fn assert_consistent(lvl: &Level) {
        for tile in lvl.grid().cells() {
            if tile.contains(Tile::WALL) {
                assert_eq!(*tile, Tile::WALL);
            }
            assert!(!(tile.is_worker() && tile.has_movable()));
        }
        assert_eq!(lvl.grid().find_all(Tile::PLAYER).count(), 1);
    }

    #[quickcheck]
    fn moves_keep_invariants(dirs: Vec<Direction>) -> bool {
        let (mut lvl, mut pos) = level(
            "  ####### \n\
             ..#  .  ##\n\
             ..# $$$  #\n\
             ..#@ $ *.#\n\
             ..########",
        );
        let crates = lvl.crate_positions().len();
        for dir in dirs {
            pos = lvl.attempt_move(pos, dir).unwrap().worker_position(pos);
            assert_consistent(&lvl);
            assert_eq!(lvl.worker_position(), Some(pos));
            assert!(lvl.tile_at(pos).unwrap().is_walkable());
        }
        lvl.crate_positions().len() == crates
    }

    #[test]
    fn reversing_relocations_restores_level() {
        let (mut lvl, pos) = level("#######\n#.$@$.#\n#  $  #\n#######");
        for &dir in &DIRECTIONS {
            let before = lvl.clone();
            let outcome = lvl.attempt_move(pos, dir).unwrap();
            for relocation in outcome.relocations() {
                lvl.apply(relocation.inverse()).unwrap();
            }
            assert_eq!(lvl, before);
        }
    }
}
