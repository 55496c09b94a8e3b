//! Matcher module - run detection, shape classification, swap legality
//!
//! Matches are found in two phases: axis run scans mark every cell that sits
//! in a horizontal or vertical run of 3+ same-colored candies, then a
//! same-color flood fill unions overlapping runs into groups. Each group
//! remembers its longest run per axis so special synthesis can classify it.
//! Color bombs have no color and never participate in run matching.

use std::collections::VecDeque;

use kali_crush_types::{CandyKind, Color, Coord};

use crate::board::Board;

/// A connected group of matched same-color cells.
///
/// The shape flags can overlap (a 5-run crossed by a perpendicular arm is
/// both line-5 and L/T); special synthesis applies its own priority.
#[derive(Debug, Clone)]
pub struct MatchGroup {
    /// Member cells, sorted row-major
    pub cells: Vec<Coord>,
    pub color: Color,
    /// Longest horizontal run through any member cell
    pub row_run: usize,
    /// Longest vertical run through any member cell
    pub col_run: usize,
    /// A run of exactly 4 on either axis
    pub is_line4: bool,
    /// A run of 5 or more on either axis
    pub is_line5: bool,
    /// Runs of 3+ on both axes (L or T shape)
    pub is_t_or_l: bool,
}

/// The matchable color of a cell: `None` for empty cells, holes, and bombs
fn match_color(board: &Board, at: Coord) -> Option<Color> {
    let candy = board.candy(at)?;
    if candy.kind == CandyKind::ColorBomb {
        return None;
    }
    candy.color
}

/// Find all match groups on the board.
///
/// Group order follows the row-major position of each group's first cell, so
/// the result is deterministic for a given board.
pub fn detect_matches(board: &Board) -> Vec<MatchGroup> {
    let rows = board.rows();
    let cols = board.cols();
    let n = rows * cols;
    let mut row_run = vec![0usize; n];
    let mut col_run = vec![0usize; n];

    // Horizontal runs
    for r in 0..rows {
        let mut c = 0;
        while c < cols {
            let Some(color) = match_color(board, Coord::new(r, c)) else {
                c += 1;
                continue;
            };
            let mut end = c + 1;
            while end < cols && match_color(board, Coord::new(r, end)) == Some(color) {
                end += 1;
            }
            let len = end - c;
            if len >= 3 {
                for cc in c..end {
                    let idx = r * cols + cc;
                    row_run[idx] = row_run[idx].max(len);
                }
            }
            c = end;
        }
    }

    // Vertical runs
    for c in 0..cols {
        let mut r = 0;
        while r < rows {
            let Some(color) = match_color(board, Coord::new(r, c)) else {
                r += 1;
                continue;
            };
            let mut end = r + 1;
            while end < rows && match_color(board, Coord::new(end, c)) == Some(color) {
                end += 1;
            }
            let len = end - r;
            if len >= 3 {
                for rr in r..end {
                    let idx = rr * cols + c;
                    col_run[idx] = col_run[idx].max(len);
                }
            }
            r = end;
        }
    }

    let matched = |idx: usize| row_run[idx] >= 3 || col_run[idx] >= 3;

    // Flood-fill union of matched cells, restricted to one color per group
    // so touching runs of different colors never merge
    let mut visited = vec![false; n];
    let mut groups = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            let idx = r * cols + c;
            if visited[idx] || !matched(idx) {
                continue;
            }
            let Some(color) = match_color(board, Coord::new(r, c)) else {
                continue;
            };

            let mut cells = Vec::new();
            let mut max_row_run = 0;
            let mut max_col_run = 0;
            let mut queue = VecDeque::new();
            visited[idx] = true;
            queue.push_back(Coord::new(r, c));
            while let Some(at) = queue.pop_front() {
                let i = at.r * cols + at.c;
                cells.push(at);
                max_row_run = max_row_run.max(row_run[i]);
                max_col_run = max_col_run.max(col_run[i]);

                let mut neighbors = Vec::with_capacity(4);
                if at.r > 0 {
                    neighbors.push(Coord::new(at.r - 1, at.c));
                }
                if at.r + 1 < rows {
                    neighbors.push(Coord::new(at.r + 1, at.c));
                }
                if at.c > 0 {
                    neighbors.push(Coord::new(at.r, at.c - 1));
                }
                if at.c + 1 < cols {
                    neighbors.push(Coord::new(at.r, at.c + 1));
                }
                for next in neighbors {
                    let ni = next.r * cols + next.c;
                    if visited[ni] || !matched(ni) {
                        continue;
                    }
                    if match_color(board, next) != Some(color) {
                        continue;
                    }
                    visited[ni] = true;
                    queue.push_back(next);
                }
            }
            cells.sort_unstable();

            let is_line5 = max_row_run >= 5 || max_col_run >= 5;
            let is_t_or_l = max_row_run >= 3 && max_col_run >= 3;
            let is_line4 = max_row_run == 4 || max_col_run == 4;
            groups.push(MatchGroup {
                cells,
                color,
                row_run: max_row_run,
                col_run: max_col_run,
                is_line4,
                is_line5,
                is_t_or_l,
            });
        }
    }
    groups
}

/// Whether swapping `a` and `b` is a legal move: the cells must be adjacent
/// and occupiable, and the swap must produce at least one match.
///
/// The check runs on a scratch clone; the input board is never mutated.
pub fn validate_swap(board: &Board, a: Coord, b: Coord) -> bool {
    if !a.is_adjacent(b) {
        return false;
    }
    if !board.can_occupy(a) || !board.can_occupy(b) {
        return false;
    }
    let mut scratch = board.clone();
    scratch.swap_candies(a, b);
    !detect_matches(&scratch).is_empty()
}

/// First legal swap in row-major scan order (right neighbor before down
/// neighbor), or None when the board is deadlocked. Doubles as the hint.
pub fn first_legal_move(board: &Board) -> Option<(Coord, Coord)> {
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            let a = Coord::new(r, c);
            if c + 1 < board.cols() {
                let b = Coord::new(r, c + 1);
                if validate_swap(board, a, b) {
                    return Some((a, b));
                }
            }
            if r + 1 < board.rows() {
                let b = Coord::new(r + 1, c);
                if validate_swap(board, a, b) {
                    return Some((a, b));
                }
            }
        }
    }
    None
}

/// Whether any legal swap exists
pub fn has_any_legal_move(board: &Board) -> bool {
    first_legal_move(board).is_some()
}
