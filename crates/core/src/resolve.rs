//! Resolve module - the turn state machine
//!
//! A turn runs: swap, optional special combo, then the cascade loop
//! (match, synthesize, remove, gravity, refill) until the board produces no
//! further matches, then a deadlock check with reshuffle. Every step is
//! appended to a presentation queue so a UI can replay the turn. The input
//! board is never mutated; the settled board comes back in the result.

use std::collections::HashSet;

use kali_crush_types::{
    Candy, CandyKind, Color, Coord, ResolutionStep, SpawnWeights, TurnStats, CASCADE_CAP,
    COMBO_SCORE_PER_CELL, GENERATION_ATTEMPTS, MATCH_SCORE_PER_CELL, REFILL_SEED_OFFSET,
};

use crate::board::{pick_weighted, Board};
use crate::matcher::{detect_matches, has_any_legal_move};
use crate::rng::SeededRng;
use crate::special::{pick_creation_cell, resolve_combo, special_from_match, trigger_special_at};

/// Everything a caller needs after one resolved turn
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    /// The settled board
    pub board: Board,
    /// Presentation steps in order, ending with `Stable`
    pub queue: Vec<ResolutionStep>,
    pub score_delta: u32,
    /// One entry per colored candy removed
    pub removed_colors: Vec<Color>,
    pub jelly_cleared: u32,
    pub ice_cleared: u32,
    /// Cascade passes executed (0 for a pure combo turn)
    pub cascades: u32,
}

impl ResolutionResult {
    /// The turn's removal statistics, for objective folding
    pub fn stats(&self) -> TurnStats {
        TurnStats {
            score_delta: self.score_delta,
            removed_colors: self.removed_colors.clone(),
            jelly_cleared: self.jelly_cleared,
            ice_cleared: self.ice_cleared,
        }
    }
}

/// Clear candies on the given cells and decrement blockers.
///
/// Out-of-bounds coordinates and holes are skipped. Each call decrements
/// jelly and ice at most once per cell; callers dedupe their cell lists.
/// Returns the number of candies actually removed.
fn remove_cells(board: &mut Board, cells: &[Coord], stats: &mut TurnStats) -> u32 {
    let mut removed = 0;
    for &at in cells {
        let Some(cell) = board.cell_mut(at) else {
            continue;
        };
        if cell.hole {
            continue;
        }
        if let Some(candy) = cell.candy.take() {
            if let Some(color) = candy.color {
                stats.removed_colors.push(color);
            }
            removed += 1;
        }
        if cell.jelly > 0 {
            cell.jelly -= 1;
            stats.jelly_cleared += 1;
        }
        if cell.ice > 0 {
            cell.ice -= 1;
            stats.ice_cleared += 1;
        }
    }
    removed
}

/// Compact each column downward. Candies fall past holes and iced cells
/// (neither can hold one) while keeping their relative order. Returns the
/// (from, to) moves that occurred.
fn apply_gravity(board: &mut Board) -> Vec<(Coord, Coord)> {
    let mut moves = Vec::new();
    for c in 0..board.cols() {
        // Occupiable slots bottom-up
        let slots: Vec<usize> = (0..board.rows())
            .rev()
            .filter(|&r| board.can_occupy(Coord::new(r, c)))
            .collect();

        let mut falling: Vec<(usize, Candy)> = Vec::new();
        for &r in &slots {
            if let Some(cell) = board.cell_mut(Coord::new(r, c)) {
                if let Some(candy) = cell.candy.take() {
                    falling.push((r, candy));
                }
            }
        }
        for (slot, (from_r, candy)) in falling.into_iter().enumerate() {
            let to_r = slots[slot];
            if to_r != from_r {
                moves.push((Coord::new(from_r, c), Coord::new(to_r, c)));
            }
            board.set_candy(Coord::new(to_r, c), Some(candy));
        }
    }
    moves
}

/// Fill empty occupiable cells row-major with fresh weighted candies.
/// Each pass gets its own RNG stream derived from the turn seed.
fn refill(
    board: &mut Board,
    colors: &[Color],
    weights: &SpawnWeights,
    seed: u32,
    pass: &mut u32,
) -> Vec<Coord> {
    let mut rng = SeededRng::new(seed.wrapping_add(*pass).wrapping_add(REFILL_SEED_OFFSET));
    *pass += 1;

    let mut filled = Vec::new();
    for at in board.coords().collect::<Vec<_>>() {
        if !board.can_occupy(at) || board.candy(at).is_some() {
            continue;
        }
        let color = pick_weighted(&mut rng, colors, weights);
        let id = board.mint_id();
        board.set_candy(at, Some(Candy::normal(id, color)));
        filled.push(at);
    }
    filled
}

/// Fisher-Yates reshuffle of all movable candies in place. Holes, iced
/// cells, and blocker state are untouched.
fn reshuffle(board: &mut Board, rng: &mut SeededRng) {
    let mut coords = Vec::new();
    let mut candies = Vec::new();
    for at in board.coords().collect::<Vec<_>>() {
        if !board.can_occupy(at) {
            continue;
        }
        if let Some(cell) = board.cell_mut(at) {
            if let Some(candy) = cell.candy.take() {
                coords.push(at);
                candies.push(candy);
            }
        }
    }
    rng.shuffle(&mut candies);
    for (at, candy) in coords.into_iter().zip(candies) {
        board.set_candy(at, Some(candy));
    }
}

/// Resolve one turn: apply the swap of `a` and `b` and run the full state
/// machine to a settled board.
///
/// The swap is assumed already validated (legal match swap or special
/// combo); an ineffective swap still resolves, it just removes nothing.
/// Deterministic for a given board, swap, and seed.
pub fn resolve_turn(
    board: &Board,
    a: Coord,
    b: Coord,
    colors: &[Color],
    weights: &SpawnWeights,
    seed: u32,
) -> ResolutionResult {
    let mut board = board.clone();
    let mut queue = Vec::new();
    let mut stats = TurnStats::default();
    let mut refill_pass: u32 = 0;

    board.swap_candies(a, b);
    queue.push(ResolutionStep::Swap { a, b });

    // Special combo path: bypasses match detection entirely
    let special_swap = [a, b].iter().any(|&at| {
        board
            .candy(at)
            .map(|candy| candy.kind.is_special())
            .unwrap_or(false)
    });
    if special_swap {
        if let Some(outcome) = resolve_combo(&board, a, b) {
            let mut cleared: Vec<Coord> = Vec::new();
            let mut seen: HashSet<Coord> = HashSet::new();

            if let Some((color, kind)) = outcome.transform {
                // Bomb + special: retint every candy of that color, then
                // fire them all against the retinted board
                let targets: Vec<Coord> = board
                    .coords()
                    .filter(|&at| {
                        board
                            .candy(at)
                            .map(|candy| candy.color == Some(color))
                            .unwrap_or(false)
                    })
                    .collect();
                for &at in &targets {
                    if let Some(candy) = board.candy_mut(at) {
                        candy.kind = kind;
                    }
                }
                for &at in &targets {
                    if seen.insert(at) {
                        cleared.push(at);
                    }
                    for hit in trigger_special_at(&board, at) {
                        if seen.insert(hit) {
                            cleared.push(hit);
                        }
                    }
                }
            }
            for at in outcome.cells {
                if seen.insert(at) {
                    cleared.push(at);
                }
            }

            let removed = remove_cells(&mut board, &cleared, &mut stats);
            stats.score_delta += removed * COMBO_SCORE_PER_CELL;
            queue.push(ResolutionStep::Combo { cleared });

            // Settle the combo crater before looking for cascades, so a
            // combo with no follow-up match still leaves a full board
            let moves = apply_gravity(&mut board);
            queue.push(ResolutionStep::Gravity { moves });
            let cells = refill(&mut board, colors, weights, seed, &mut refill_pass);
            queue.push(ResolutionStep::Refill { cells });
        }
    }

    let mut cascades: u32 = 0;
    loop {
        let groups = detect_matches(&board);
        if groups.is_empty() {
            break;
        }
        cascades += 1;

        queue.push(ResolutionStep::Match {
            groups: groups.iter().map(|g| g.cells.clone()).collect(),
        });

        // Synthesize at most one special per pass, from the first group
        // whose shape earns one
        let mut creation: Option<Coord> = None;
        for group in &groups {
            let Some(kind) = special_from_match(group) else {
                continue;
            };
            let at = pick_creation_cell(group, a, b);
            let color = if kind == CandyKind::ColorBomb {
                None
            } else {
                Some(group.color)
            };
            // Upgrade the matched candy in place so its id survives
            let upgraded = match board.candy_mut(at) {
                Some(candy) => {
                    candy.kind = kind;
                    candy.color = color;
                    true
                }
                None => false,
            };
            if !upgraded {
                let id = board.mint_id();
                board.set_candy(at, Some(Candy::special(id, kind, color)));
            }
            creation = Some(at);
            queue.push(ResolutionStep::Special { at, kind });
            break;
        }

        // Removal set: every matched cell except the creation cell, plus
        // the blast of any pre-existing special caught in the match
        let mut remove_list: Vec<Coord> = Vec::new();
        let mut seen: HashSet<Coord> = HashSet::new();
        for group in &groups {
            for &at in &group.cells {
                if Some(at) == creation {
                    continue;
                }
                if seen.insert(at) {
                    remove_list.push(at);
                }
            }
        }
        let matched: Vec<Coord> = remove_list.clone();
        for at in matched {
            let is_special = board
                .candy(at)
                .map(|candy| candy.kind.is_special())
                .unwrap_or(false);
            if !is_special {
                continue;
            }
            for hit in trigger_special_at(&board, at) {
                if Some(hit) == creation {
                    continue;
                }
                if seen.insert(hit) {
                    remove_list.push(hit);
                }
            }
        }

        let removed = remove_cells(&mut board, &remove_list, &mut stats);
        stats.score_delta += removed * MATCH_SCORE_PER_CELL;
        queue.push(ResolutionStep::Remove { cells: remove_list });

        let moves = apply_gravity(&mut board);
        queue.push(ResolutionStep::Gravity { moves });
        let cells = refill(&mut board, colors, weights, seed, &mut refill_pass);
        queue.push(ResolutionStep::Refill { cells });

        // Safety valve against pathological boards
        if cascades > CASCADE_CAP {
            break;
        }
    }

    // Deadlock check: reshuffle until the board is match-free with a legal
    // move again, same bounded acceptance as initial generation
    if !has_any_legal_move(&board) {
        for attempt in 0..GENERATION_ATTEMPTS {
            let mut rng = SeededRng::new(
                seed.wrapping_add(refill_pass)
                    .wrapping_add(REFILL_SEED_OFFSET)
                    .wrapping_add(attempt),
            );
            reshuffle(&mut board, &mut rng);
            if detect_matches(&board).is_empty() && has_any_legal_move(&board) {
                break;
            }
        }
    }

    queue.push(ResolutionStep::Stable);

    ResolutionResult {
        board,
        queue,
        score_delta: stats.score_delta,
        removed_colors: stats.removed_colors,
        jelly_cleared: stats.jelly_cleared,
        ice_cleared: stats.ice_cleared,
        cascades,
    }
}
