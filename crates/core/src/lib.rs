//! Core resolution engine - pure, deterministic, and testable
//!
//! This crate contains the complete match-three resolution rules with
//! **zero dependencies** on UI, I/O, or level file formats, making it:
//!
//! - **Deterministic**: Same board, swap, and seed produce identical turns
//! - **Testable**: Every rule has unit coverage against small boards
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: flat row-major grid, blockers, and initial generation
//! - [`matcher`]: run detection, shape classification, swap legality
//! - [`special`]: special candy synthesis, triggers, and swap combos
//! - [`objectives`]: folding turn statistics into level objectives
//! - [`resolve`]: the swap-to-stable turn state machine
//! - [`rng`]: seeded LCG random stream
//! - [`invariants`]: board consistency diagnostics for tests and tooling
//!
//! # Example
//!
//! ```
//! use kali_crush_core::{create_initial_board, first_legal_move, resolve_turn};
//! use kali_crush_core::types::{Color, LevelDefinition, Objective, SpawnWeights};
//!
//! let level = LevelDefinition {
//!     id: 1,
//!     rows: 8,
//!     cols: 8,
//!     moves: 20,
//!     colors: Color::ALL.to_vec(),
//!     spawn_weights: SpawnWeights::new(),
//!     objectives: vec![Objective::Score { target: 600, progress: 0 }],
//!     mask: None,
//!     jelly: Vec::new(),
//!     ice: Vec::new(),
//! };
//!
//! let board = create_initial_board(&level, 12345);
//! let (a, b) = first_legal_move(&board).expect("generated boards have a move");
//! let result = resolve_turn(&board, a, b, &level.colors, &level.spawn_weights, 12345);
//! assert!(result.score_delta > 0);
//! ```

pub mod board;
pub mod invariants;
pub mod matcher;
pub mod objectives;
pub mod resolve;
pub mod rng;
pub mod special;

pub use kali_crush_types as types;

// Re-export commonly used items for convenience
pub use board::{create_initial_board, pick_weighted, Board};
pub use invariants::validate_board_invariants;
pub use matcher::{detect_matches, first_legal_move, has_any_legal_move, validate_swap, MatchGroup};
pub use objectives::update_objectives;
pub use resolve::{resolve_turn, ResolutionResult};
pub use rng::SeededRng;
pub use special::{
    pick_creation_cell, resolve_combo, special_from_match, trigger_special_at, ComboOutcome,
};
