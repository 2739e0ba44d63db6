use std::collections::{HashMap, HashSet, VecDeque};

use crate::direction::*;
use crate::level::*;
use crate::position::*;

impl Level {
    /// Try to find a shortest path from `start` to `target` that neither passes through walls
    /// nor through crates. Among paths of equal length, the one found by expanding neighbours in
    /// the order up, right, down, left is returned. Returns `None` if `target` cannot be reached.
    pub fn shortest_path(&self, start: Position, target: Position) -> Option<Vec<Direction>> {
        let mut visited = HashSet::new();
        let mut parent: HashMap<Position, Position> = HashMap::new();
        let mut queue = VecDeque::with_capacity(500);

        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == target {
                break;
            }

            for neighbour in self.free_neighbours(current) {
                if visited.insert(neighbour) {
                    parent.insert(neighbour, current);
                    queue.push_back(neighbour);
                }
            }
        }

        if !visited.contains(&target) {
            debug!("No path from {} to {}", start, target);
            return None;
        }

        // Walk backwards from the target to the start.
        let mut steps = vec![];
        let mut current = target;
        while current != start {
            let previous = parent[&current];
            match direction(previous, current) {
                DirectionResult::Neighbour { direction } => steps.push(direction),
                _ => unreachable!("{} is not next to {}", previous, current),
            }
            current = previous;
        }
        steps.reverse();

        Some(steps)
    }

    /// All neighbours of the cell with the given position that contain neither a wall nor a
    /// crate, in the order of `DIRECTIONS`.
    fn free_neighbours(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&dir| position.neighbour(dir))
            .filter(move |&neighbour| self.grid.tile_or_wall(neighbour).is_free())
    }
}
