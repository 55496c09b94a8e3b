//! Kali Crush (workspace facade crate).
//!
//! This package keeps a single `kali_crush::{core,level,types}` public API
//! while the implementation lives in dedicated crates under `crates/`.

pub use kali_crush_core as core;
pub use kali_crush_level as level;
pub use kali_crush_types as types;
