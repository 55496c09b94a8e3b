//! Special module - special candy synthesis, triggers, and swap combos
//!
//! Match shapes map to special kinds: 5-in-line makes a color bomb, an L or
//! T makes a wrapped candy, 4-in-line makes a striped candy oriented along
//! the run. Swapping two specials (or a bomb with anything) bypasses match
//! detection entirely and resolves through the combo table here.

use arrayvec::ArrayVec;
use kali_crush_types::{CandyKind, Color, Coord};

use crate::board::Board;
use crate::matcher::MatchGroup;

/// Outcome of a special-candy swap combo
#[derive(Debug, Clone)]
pub struct ComboOutcome {
    /// Cells to clear immediately
    pub cells: Vec<Coord>,
    /// Bomb + special: retint every candy of this color to this kind,
    /// then trigger them all
    pub transform: Option<(Color, CandyKind)>,
}

/// The special kind a match group synthesizes, if any.
///
/// Priority: 5-line bomb, then L/T wrapped, then 4-line striped. A striped
/// candy's orientation follows the axis of the 4-run.
pub fn special_from_match(group: &MatchGroup) -> Option<CandyKind> {
    if group.is_line5 {
        Some(CandyKind::ColorBomb)
    } else if group.is_t_or_l {
        Some(CandyKind::Wrapped)
    } else if group.is_line4 {
        if group.row_run == 4 {
            Some(CandyKind::StripedH)
        } else {
            Some(CandyKind::StripedV)
        }
    } else {
        None
    }
}

/// Where a synthesized special lands: the swap destination `b` if it is in
/// the group, else `a`, else the group's first cell (cascade matches).
pub fn pick_creation_cell(group: &MatchGroup, a: Coord, b: Coord) -> Coord {
    if group.cells.contains(&b) {
        b
    } else if group.cells.contains(&a) {
        a
    } else {
        group.cells.first().copied().unwrap_or(a)
    }
}

/// In-bounds square neighborhood of the given radius, center included.
/// Radius 2 at most (the 5x5 wrapped+wrapped blast).
fn neighborhood(board: &Board, at: Coord, radius: usize) -> ArrayVec<Coord, 25> {
    let mut cells = ArrayVec::new();
    let r0 = at.r.saturating_sub(radius);
    let c0 = at.c.saturating_sub(radius);
    for r in r0..=(at.r + radius).min(board.rows().saturating_sub(1)) {
        for c in c0..=(at.c + radius).min(board.cols().saturating_sub(1)) {
            cells.push(Coord::new(r, c));
        }
    }
    cells
}

/// Cells a special candy clears when it fires: full row for stripedH, full
/// column for stripedV, 3x3 for wrapped. A bomb triggered without a partner
/// (caught in a blast) only clears itself. Normal candies clear nothing.
pub fn trigger_special_at(board: &Board, at: Coord) -> Vec<Coord> {
    let Some(candy) = board.candy(at) else {
        return Vec::new();
    };
    match candy.kind {
        CandyKind::Normal => Vec::new(),
        CandyKind::StripedH => (0..board.cols()).map(|c| Coord::new(at.r, c)).collect(),
        CandyKind::StripedV => (0..board.rows()).map(|r| Coord::new(r, at.c)).collect(),
        CandyKind::Wrapped => neighborhood(board, at, 1).into_iter().collect(),
        CandyKind::ColorBomb => vec![at],
    }
}

/// All coordinates holding a candy of the given color
fn cells_of_color(board: &Board, color: Color) -> Vec<Coord> {
    board
        .coords()
        .filter(|&at| {
            board
                .candy(at)
                .map(|candy| candy.color == Some(color))
                .unwrap_or(false)
        })
        .collect()
}

/// Resolve a special-candy swap combo, or None when the pairing has no
/// effect (striped/wrapped + normal falls through to normal matching).
///
/// `a` and `b` are the swapped coordinates after the swap has been applied.
pub fn resolve_combo(board: &Board, a: Coord, b: Coord) -> Option<ComboOutcome> {
    let candy_a = board.candy(a)?;
    let candy_b = board.candy(b)?;

    use CandyKind::*;
    match (candy_a.kind, candy_b.kind) {
        (ColorBomb, ColorBomb) => {
            // Wipe every candy on the board
            let cells = board
                .coords()
                .filter(|&at| board.candy(at).is_some())
                .collect();
            Some(ComboOutcome {
                cells,
                transform: None,
            })
        }
        (ColorBomb, _) | (_, ColorBomb) => {
            let (bomb_at, other_at) = if candy_a.kind == ColorBomb {
                (a, b)
            } else {
                (b, a)
            };
            let other = board.candy(other_at)?;
            let color = other.color?;
            match other.kind {
                Normal => {
                    let mut cells = cells_of_color(board, color);
                    if !cells.contains(&bomb_at) {
                        cells.push(bomb_at);
                    }
                    Some(ComboOutcome {
                        cells,
                        transform: None,
                    })
                }
                StripedH | StripedV | Wrapped => Some(ComboOutcome {
                    cells: vec![bomb_at],
                    transform: Some((color, other.kind)),
                }),
                ColorBomb => None, // unreachable, handled above
            }
        }
        (StripedH | StripedV, StripedH | StripedV) => {
            // Cross blast: row through a, column through b
            let mut cells: Vec<Coord> = (0..board.cols()).map(|c| Coord::new(a.r, c)).collect();
            for r in 0..board.rows() {
                let at = Coord::new(r, b.c);
                if !cells.contains(&at) {
                    cells.push(at);
                }
            }
            Some(ComboOutcome {
                cells,
                transform: None,
            })
        }
        (Wrapped, Wrapped) => Some(ComboOutcome {
            cells: neighborhood(board, b, 2).into_iter().collect(),
            transform: None,
        }),
        (StripedH | StripedV, Wrapped) | (Wrapped, StripedH | StripedV) => {
            // Not in the pairing table; falls through to normal matching
            None
        }
        _ => None,
    }
}
