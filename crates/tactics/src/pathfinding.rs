//! Binary walkability snapshots and shortest-path search over them.
//! The matrix is a copy; callers rebuild it for every request so occupancy
//! changes between requests are seen.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::*;

pub const OPEN: u8 = 0;
pub const BLOCKED: u8 = 1;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkabilityMatrix {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl WalkabilityMatrix {
    pub fn blocked(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![BLOCKED; width * height] }
    }

    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut matrix = Self::blocked(width, height);
        for (y, row) in rows.iter().enumerate() {
            for (x, cell) in row.iter().take(width).enumerate() {
                matrix.cells[y * width + x] = if *cell == OPEN { OPEN } else { BLOCKED };
            }
        }
        matrix
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_open(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.cells[self.index(pos)] == OPEN
    }

    pub fn set_open(&mut self, pos: Pos, open: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.cells[idx] = if open { OPEN } else { BLOCKED };
    }

    /// Row-major 2D export: `rows()[y][x]`.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.width.max(1)).take(self.height).map(<[u8]>::to_vec).collect()
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// A* over orthogonal steps. Returns the tiles from `start` to `goal`
/// inclusive, or an empty path when `goal` cannot be reached. The start tile
/// is expanded even if the matrix blocks it, since the mover usually stands
/// there.
pub fn find_path(matrix: &WalkabilityMatrix, start: Pos, goal: Pos) -> Vec<Pos> {
    if !matrix.in_bounds(start) || !matrix.in_bounds(goal) {
        tracing::warn!(
            from_x = start.x,
            from_y = start.y,
            to_x = goal.x,
            to_y = goal.y,
            "path requested outside the grid"
        );
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }
    if !matrix.is_open(goal) {
        return Vec::new();
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);
    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return reconstruct_path(&came_from, start, goal);
        }
        let cur_g = g_score[&p];
        for n in neighbors(p) {
            if !matrix.is_open(n) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    Vec::new()
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        match came.get(&p) {
            Some(prev) => p = *prev,
            None => return Vec::new(),
        }
        result.push(p);
    }
    result.reverse();
    result
}

/// Up, right, down, left.
pub fn neighbors(p: Pos) -> [Pos; 4] {
    [
        Pos { y: p.y - 1, x: p.x },
        Pos { y: p.y, x: p.x + 1 },
        Pos { y: p.y + 1, x: p.x },
        Pos { y: p.y, x: p.x - 1 },
    ]
}
