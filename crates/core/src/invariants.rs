//! Invariants module - board consistency diagnostics
//!
//! Used by tests and debug tooling. Returns human-readable violation
//! strings instead of panicking, so it can run against any board.

use kali_crush_types::{CandyKind, Coord};

use crate::board::Board;

/// Check every structural board invariant, returning one message per
/// violation. An empty vec means the board is consistent.
pub fn validate_board_invariants(board: &Board) -> Vec<String> {
    let mut violations = Vec::new();

    for (i, cell) in board.cells().iter().enumerate() {
        let at = cell.coord;
        let expected = Coord::new(i / board.cols(), i % board.cols());
        if at != expected {
            violations.push(format!(
                "cell at index {} reports coord ({}, {}), expected ({}, {})",
                i, at.r, at.c, expected.r, expected.c
            ));
        }
        if cell.hole && cell.candy.is_some() {
            violations.push(format!("candy in hole at ({}, {})", at.r, at.c));
        }
        if cell.hole && (cell.jelly > 0 || cell.ice > 0) {
            violations.push(format!("blocker on hole at ({}, {})", at.r, at.c));
        }
        if cell.ice > 0 && cell.candy.is_some() {
            violations.push(format!("candy under ice at ({}, {})", at.r, at.c));
        }
        if cell.jelly > 2 {
            violations.push(format!("jelly layers > 2 at ({}, {})", at.r, at.c));
        }
        if cell.ice > 2 {
            violations.push(format!("ice layers > 2 at ({}, {})", at.r, at.c));
        }
        if let Some(candy) = &cell.candy {
            match candy.kind {
                CandyKind::ColorBomb => {
                    if candy.color.is_some() {
                        violations.push(format!("color bomb with a color at ({}, {})", at.r, at.c));
                    }
                }
                _ => {
                    if candy.color.is_none() {
                        violations.push(format!(
                            "colorless {} at ({}, {})",
                            candy.kind.as_str(),
                            at.r,
                            at.c
                        ));
                    }
                }
            }
        }
    }

    violations
}
