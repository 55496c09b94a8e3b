//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are pure data structures with no external dependencies, making
//! them usable in any context (resolution core, level loading, rendering).
//!
//! # Scoring and Limit Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MATCH_SCORE_PER_CELL` | 60 | Points per cell removed by a normal match |
//! | `COMBO_SCORE_PER_CELL` | 120 | Points per cell removed by a special combo |
//! | `CASCADE_CAP` | 100 | Hard limit on cascade iterations per turn |
//! | `GENERATION_ATTEMPTS` | 100 | Max attempts when generating an initial board |
//! | `REFILL_SEED_OFFSET` | 17 | Added to the turn seed for each refill pass |
//!
//! # Examples
//!
//! ```
//! use kali_crush_types::{CandyKind, Color, Coord};
//!
//! let color = Color::from_str("aurora").unwrap();
//! assert_eq!(color, Color::Aurora);
//! assert_eq!(color.as_str(), "aurora");
//!
//! assert!(CandyKind::Wrapped.is_special());
//! assert!(!CandyKind::Normal.is_special());
//!
//! let a = Coord::new(2, 3);
//! let b = Coord::new(2, 4);
//! assert!(a.is_adjacent(b));
//! ```

/// Points awarded per cell removed by a normal match cascade
pub const MATCH_SCORE_PER_CELL: u32 = 60;

/// Points awarded per cell removed by a special-candy combo
pub const COMBO_SCORE_PER_CELL: u32 = 120;

/// Hard cap on cascade iterations within a single turn
pub const CASCADE_CAP: u32 = 100;

/// Maximum attempts when generating a match-free initial board
pub const GENERATION_ATTEMPTS: u32 = 100;

/// Offset mixed into the turn seed for each refill/reshuffle pass
pub const REFILL_SEED_OFFSET: u32 = 17;

/// The five gem colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Aurora,
    Solstice,
    Abyss,
    Ion,
    Pulse,
}

impl Color {
    /// All colors in canonical order
    pub const ALL: [Color; 5] = [
        Color::Aurora,
        Color::Solstice,
        Color::Abyss,
        Color::Ion,
        Color::Pulse,
    ];

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Aurora => "aurora",
            Color::Solstice => "solstice",
            Color::Abyss => "abyss",
            Color::Ion => "ion",
            Color::Pulse => "pulse",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "aurora" => Some(Color::Aurora),
            "solstice" => Some(Color::Solstice),
            "abyss" => Some(Color::Abyss),
            "ion" => Some(Color::Ion),
            "pulse" => Some(Color::Pulse),
            _ => None,
        }
    }
}

/// Candy kinds, normal plus the four specials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandyKind {
    Normal,
    /// Clears its entire row when triggered
    StripedH,
    /// Clears its entire column when triggered
    StripedV,
    /// Clears the 3x3 neighborhood around itself when triggered
    Wrapped,
    /// Colorless; pairs with another candy via swap to detonate
    ColorBomb,
}

impl CandyKind {
    /// Whether this kind has a trigger effect beyond plain removal
    pub fn is_special(&self) -> bool {
        !matches!(self, CandyKind::Normal)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CandyKind::Normal => "normal",
            CandyKind::StripedH => "stripedH",
            CandyKind::StripedV => "stripedV",
            CandyKind::Wrapped => "wrapped",
            CandyKind::ColorBomb => "colorBomb",
        }
    }
}

/// A single candy occupying a board cell.
///
/// `id` is an opaque handle minted by the board so a UI can track a candy
/// across gravity moves. `color` is `None` only for color bombs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candy {
    pub id: u64,
    pub color: Option<Color>,
    pub kind: CandyKind,
}

impl Candy {
    /// A plain colored candy
    pub fn normal(id: u64, color: Color) -> Self {
        Self {
            id,
            color: Some(color),
            kind: CandyKind::Normal,
        }
    }

    /// A special candy; `color` must be `None` exactly for `ColorBomb`
    pub fn special(id: u64, kind: CandyKind, color: Option<Color>) -> Self {
        Self { id, color, kind }
    }
}

/// Board coordinate (row, column), zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub r: usize,
    pub c: usize,
}

impl Coord {
    pub fn new(r: usize, c: usize) -> Self {
        Self { r, c }
    }

    /// Orthogonal adjacency (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Coord) -> bool {
        let dr = self.r.abs_diff(other.r);
        let dc = self.c.abs_diff(other.c);
        dr + dc == 1
    }
}

/// One board cell: candy payload plus blocker state.
///
/// Invariants maintained by the engine:
/// - `hole` cells never hold a candy, jelly, or ice
/// - cells with `ice > 0` never hold a candy
/// - `jelly` and `ice` are at most 2
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub coord: Coord,
    pub candy: Option<Candy>,
    pub jelly: u8,
    pub ice: u8,
    pub hole: bool,
}

impl Cell {
    /// An open, empty cell
    pub fn open(coord: Coord) -> Self {
        Self {
            coord,
            candy: None,
            jelly: 0,
            ice: 0,
            hole: false,
        }
    }
}

/// Level objective with accumulated progress.
///
/// Progress only ever grows; it may exceed `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    Score { target: u32, progress: u32 },
    CollectColor { color: Color, target: u32, progress: u32 },
    ClearJelly { target: u32, progress: u32 },
    ClearIce { target: u32, progress: u32 },
}

impl Objective {
    pub fn target(&self) -> u32 {
        match *self {
            Objective::Score { target, .. }
            | Objective::CollectColor { target, .. }
            | Objective::ClearJelly { target, .. }
            | Objective::ClearIce { target, .. } => target,
        }
    }

    pub fn progress(&self) -> u32 {
        match *self {
            Objective::Score { progress, .. }
            | Objective::CollectColor { progress, .. }
            | Objective::ClearJelly { progress, .. }
            | Objective::ClearIce { progress, .. } => progress,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= self.target()
    }
}

/// Per-color spawn weight table. Colors without an entry weigh 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnWeights {
    entries: Vec<(Color, u32)>,
}

impl SpawnWeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Color, u32)>) -> Self {
        let mut weights = Self::new();
        for (color, weight) in pairs {
            weights.set(color, weight);
        }
        weights
    }

    /// Set the weight for a color, replacing any earlier entry
    pub fn set(&mut self, color: Color, weight: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|(c, _)| *c == color) {
            entry.1 = weight;
        } else {
            self.entries.push((color, weight));
        }
    }

    /// Weight for a color, defaulting to 1
    pub fn weight(&self, color: Color) -> u32 {
        self.entries
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, w)| *w)
            .unwrap_or(1)
    }
}

/// Static description of a level: geometry, palette, and blockers.
///
/// Pure data; JSON parsing and validation live in the level crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelDefinition {
    pub id: u32,
    pub rows: usize,
    pub cols: usize,
    pub moves: u32,
    pub colors: Vec<Color>,
    pub spawn_weights: SpawnWeights,
    pub objectives: Vec<Objective>,
    /// Playable cells; `false` entries become holes. `None` means fully open.
    pub mask: Option<Vec<Vec<bool>>>,
    /// Jelly blockers as (coordinate, layers), layers 1 or 2
    pub jelly: Vec<(Coord, u8)>,
    /// Ice blockers as (coordinate, layers), layers 1 or 2
    pub ice: Vec<(Coord, u8)>,
}

/// One entry in the presentation queue produced by resolving a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStep {
    /// The two swapped coordinates
    Swap { a: Coord, b: Coord },
    /// Cells cleared by a special-candy combo
    Combo { cleared: Vec<Coord> },
    /// Detected match groups, one cell list per group
    Match { groups: Vec<Vec<Coord>> },
    /// A special candy synthesized at `at`
    Special { at: Coord, kind: CandyKind },
    /// Cells cleared this cascade pass
    Remove { cells: Vec<Coord> },
    /// Candy falls as (from, to) pairs
    Gravity { moves: Vec<(Coord, Coord)> },
    /// Cells filled with fresh candy
    Refill { cells: Vec<Coord> },
    /// Board settled; always the final step
    Stable,
}

/// Aggregate removal statistics for one resolved turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnStats {
    pub score_delta: u32,
    /// One entry per colored candy removed, duplicates preserved
    pub removed_colors: Vec<Color>,
    pub jelly_cleared: u32,
    pub ice_cleared: u32,
}
