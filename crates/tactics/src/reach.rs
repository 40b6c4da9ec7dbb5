//! Move-range flood fill with a uniform step cost.

use std::collections::{BTreeSet, VecDeque};

use crate::entity::Entity;
use crate::grid::GridMap;
use crate::pathfinding::neighbors;
use crate::types::*;

/// Every tile reachable from `origin` in at most `budget` orthogonal steps,
/// in discovery order. The origin is always the first element.
pub fn compute_move_range(
    grid: &GridMap,
    origin: Pos,
    budget: u32,
    for_entity: Option<&Entity>,
) -> Vec<Pos> {
    let mut visited = BTreeSet::new();
    let mut result = vec![origin];
    let mut queue = VecDeque::new();
    visited.insert(origin);
    queue.push_back((origin, 0_u32));

    while let Some((current, steps)) = queue.pop_front() {
        if steps >= budget {
            continue;
        }
        for neighbor in neighbors(current) {
            if grid.in_bounds(neighbor)
                && !visited.contains(&neighbor)
                && grid.is_walkable(neighbor, for_entity)
            {
                visited.insert(neighbor);
                result.push(neighbor);
                queue.push_back((neighbor, steps + 1));
            }
        }
    }

    result
}
