//! Board module - grid storage, blockers, and initial generation
//!
//! The board is a flat row-major `Vec<Cell>` with an `Option<usize>` index
//! guard, so all cell access is bounds-checked in one place. Candy ids come
//! from a per-board counter, never from global state, which keeps cloned
//! boards (used for speculative swaps) fully independent.

use kali_crush_types::{Candy, Cell, Color, Coord, LevelDefinition, SpawnWeights, GENERATION_ATTEMPTS};

use crate::matcher::{detect_matches, has_any_legal_move};
use crate::rng::SeededRng;

/// The playing field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cell storage, `rows * cols` entries
    cells: Vec<Cell>,
    /// Next candy id to mint
    next_id: u64,
}

impl Board {
    /// Create an empty board with all cells open
    pub fn empty(rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(Cell::open(Coord::new(r, c)));
            }
        }
        Self {
            rows,
            cols,
            cells,
            next_id: 1,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Convert a coordinate to a cell index, or None if out of bounds
    fn index(&self, at: Coord) -> Option<usize> {
        if at.r < self.rows && at.c < self.cols {
            Some(at.r * self.cols + at.c)
        } else {
            None
        }
    }

    pub fn cell(&self, at: Coord) -> Option<&Cell> {
        self.index(at).map(|i| &self.cells[i])
    }

    pub fn cell_mut(&mut self, at: Coord) -> Option<&mut Cell> {
        match self.index(at) {
            Some(i) => Some(&mut self.cells[i]),
            None => None,
        }
    }

    /// The candy at a coordinate, if the cell exists and holds one
    pub fn candy(&self, at: Coord) -> Option<&Candy> {
        self.cell(at).and_then(|cell| cell.candy.as_ref())
    }

    pub fn candy_mut(&mut self, at: Coord) -> Option<&mut Candy> {
        self.cell_mut(at).and_then(|cell| cell.candy.as_mut())
    }

    /// Place or clear a candy; returns false for out-of-bounds coordinates
    pub fn set_candy(&mut self, at: Coord, candy: Option<Candy>) -> bool {
        match self.cell_mut(at) {
            Some(cell) => {
                cell.candy = candy;
                true
            }
            None => false,
        }
    }

    /// Whether a cell can hold a candy: in bounds, not a hole, no ice
    pub fn can_occupy(&self, at: Coord) -> bool {
        self.cell(at)
            .map(|cell| !cell.hole && cell.ice == 0)
            .unwrap_or(false)
    }

    /// Mint a fresh candy id, unique within this board
    pub fn mint_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// All coordinates in row-major order
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| Coord::new(r, c)))
    }

    /// Exchange the candy payloads of two cells; blockers stay in place.
    /// Returns false when either coordinate is out of bounds.
    pub fn swap_candies(&mut self, a: Coord, b: Coord) -> bool {
        let (Some(ia), Some(ib)) = (self.index(a), self.index(b)) else {
            return false;
        };
        if ia == ib {
            return false;
        }
        let candy_a = self.cells[ia].candy.take();
        let candy_b = self.cells[ib].candy.take();
        self.cells[ia].candy = candy_b;
        self.cells[ib].candy = candy_a;
        true
    }

    /// Stamp a level's mask and jelly/ice blockers onto the board.
    ///
    /// Masked-out cells become holes and lose any payload. Blockers on
    /// holes are ignored; layer counts clamp at 2. Iced cells start empty.
    pub fn apply_level_blockers(&mut self, level: &LevelDefinition) {
        if let Some(mask) = &level.mask {
            for i in 0..self.cells.len() {
                let at = self.cells[i].coord;
                let open = mask
                    .get(at.r)
                    .and_then(|row| row.get(at.c))
                    .copied()
                    .unwrap_or(false);
                if !open {
                    let cell = &mut self.cells[i];
                    cell.hole = true;
                    cell.candy = None;
                    cell.jelly = 0;
                    cell.ice = 0;
                }
            }
        }
        for &(at, layers) in &level.jelly {
            if let Some(cell) = self.cell_mut(at) {
                if !cell.hole {
                    cell.jelly = layers.min(2);
                }
            }
        }
        for &(at, layers) in &level.ice {
            if let Some(cell) = self.cell_mut(at) {
                if !cell.hole {
                    cell.ice = layers.min(2);
                    cell.candy = None;
                }
            }
        }
    }
}

/// Sample a color from the palette using cumulative spawn weights.
/// Colors absent from the weight table weigh 1. Falls back to the first
/// palette color on a degenerate (empty or zero-weight) table.
pub fn pick_weighted(rng: &mut SeededRng, colors: &[Color], weights: &SpawnWeights) -> Color {
    let total: u32 = colors.iter().map(|&color| weights.weight(color)).sum();
    let fallback = colors.first().copied().unwrap_or(Color::Aurora);
    if total == 0 {
        return fallback;
    }
    let mut roll = rng.next_f64() * f64::from(total);
    for &color in colors {
        let weight = f64::from(weights.weight(color));
        if roll < weight {
            return color;
        }
        roll -= weight;
    }
    // Floating-point edge: the roll consumed every band
    colors[colors.len() - 1]
}

/// Fill every open, empty, unfrozen cell with a random normal candy
fn fill_random(board: &mut Board, rng: &mut SeededRng, colors: &[Color], weights: &SpawnWeights) {
    for at in board.coords().collect::<Vec<_>>() {
        let fillable = board
            .cell(at)
            .map(|cell| !cell.hole && cell.ice == 0 && cell.candy.is_none())
            .unwrap_or(false);
        if !fillable {
            continue;
        }
        let color = pick_weighted(rng, colors, weights);
        let id = board.mint_id();
        board.set_candy(at, Some(Candy::normal(id, color)));
    }
}

/// Generate a starting board for a level: blockers applied, every open cell
/// filled, no pre-existing match, and at least one legal move.
///
/// Each attempt reseeds with `seed + attempt`; after 100 failed attempts the
/// last candidate is returned as-is so generation always terminates.
pub fn create_initial_board(level: &LevelDefinition, seed: u32) -> Board {
    let mut template = Board::empty(level.rows, level.cols);
    template.apply_level_blockers(level);

    let mut last = template.clone();
    for attempt in 0..GENERATION_ATTEMPTS {
        let mut rng = SeededRng::new(seed.wrapping_add(attempt));
        let mut candidate = template.clone();
        fill_random(&mut candidate, &mut rng, &level.colors, &level.spawn_weights);
        if detect_matches(&candidate).is_empty() && has_any_legal_move(&candidate) {
            return candidate;
        }
        last = candidate;
    }
    last
}
