//! Level module - JSON level definitions and validation
//!
//! Levels are authored as JSON: colors and objective kinds as strings, the
//! playability mask as rows of `#` (open) and `.` (hole), and blockers as
//! coordinate pairs split into single- and double-layer lists. Parsing
//! validates everything up front so the engine can assume well-formed
//! `LevelDefinition`s.
//!
//! ```
//! use kali_crush_level::parse_level;
//!
//! let level = parse_level(
//!     r#"{
//!         "id": 1,
//!         "rows": 5,
//!         "cols": 5,
//!         "moves": 12,
//!         "colors": ["aurora", "solstice", "abyss", "ion"],
//!         "objectives": [{ "kind": "score", "target": 600 }]
//!     }"#,
//! )
//! .unwrap();
//! assert_eq!(level.colors.len(), 4);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use serde::Deserialize;

use kali_crush_types::{Color, Coord, LevelDefinition, Objective, SpawnWeights};

/// On-disk level shape
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LevelFile {
    id: u32,
    rows: usize,
    cols: usize,
    moves: u32,
    colors: Vec<String>,
    #[serde(default)]
    spawn_weights: BTreeMap<String, u32>,
    objectives: Vec<ObjectiveFile>,
    #[serde(default)]
    mask: Option<Vec<String>>,
    #[serde(default)]
    jelly: Vec<[usize; 2]>,
    #[serde(default)]
    double_jelly: Vec<[usize; 2]>,
    #[serde(default)]
    ice: Vec<[usize; 2]>,
    #[serde(default)]
    double_ice: Vec<[usize; 2]>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", deny_unknown_fields)]
enum ObjectiveFile {
    Score { target: u32 },
    CollectColor { color: String, target: u32 },
    ClearJelly { target: u32 },
    ClearIce { target: u32 },
}

fn parse_color(name: &str) -> Result<Color> {
    Color::from_str(name).with_context(|| format!("unknown color '{}'", name))
}

fn parse_mask(rows: usize, cols: usize, lines: &[String]) -> Result<Vec<Vec<bool>>> {
    ensure!(
        lines.len() == rows,
        "mask has {} rows, level has {}",
        lines.len(),
        rows
    );
    let mut mask = Vec::with_capacity(rows);
    for (r, line) in lines.iter().enumerate() {
        let row: Vec<bool> = line
            .chars()
            .map(|ch| match ch {
                '#' => Ok(true),
                '.' => Ok(false),
                other => bail!("mask row {}: invalid character '{}'", r, other),
            })
            .collect::<Result<_>>()?;
        ensure!(
            row.len() == cols,
            "mask row {} has {} columns, level has {}",
            r,
            row.len(),
            cols
        );
        mask.push(row);
    }
    Ok(mask)
}

fn collect_blockers(
    what: &str,
    rows: usize,
    cols: usize,
    mask: Option<&Vec<Vec<bool>>>,
    single: &[[usize; 2]],
    double: &[[usize; 2]],
) -> Result<Vec<(Coord, u8)>> {
    let mut out = Vec::with_capacity(single.len() + double.len());
    for (layers, list) in [(1u8, single), (2u8, double)] {
        for &[r, c] in list {
            ensure!(
                r < rows && c < cols,
                "{} at ({}, {}) is out of bounds",
                what,
                r,
                c
            );
            if let Some(mask) = mask {
                ensure!(mask[r][c], "{} at ({}, {}) sits on a masked-out cell", what, r, c);
            }
            out.push((Coord::new(r, c), layers));
        }
    }
    Ok(out)
}

/// Parse and validate a JSON level definition
pub fn parse_level(json: &str) -> Result<LevelDefinition> {
    let file: LevelFile = serde_json::from_str(json).context("malformed level JSON")?;

    ensure!(file.rows >= 3 && file.cols >= 3, "board must be at least 3x3");
    ensure!(file.moves > 0, "level must grant at least one move");
    ensure!(!file.colors.is_empty(), "level needs at least one color");

    let mut colors = Vec::with_capacity(file.colors.len());
    for name in &file.colors {
        let color = parse_color(name)?;
        ensure!(!colors.contains(&color), "duplicate color '{}'", name);
        colors.push(color);
    }

    let mut spawn_weights = SpawnWeights::new();
    for (name, weight) in &file.spawn_weights {
        let color = parse_color(name)?;
        ensure!(
            colors.contains(&color),
            "spawn weight for '{}' which is not in the palette",
            name
        );
        ensure!(*weight >= 1, "spawn weight for '{}' must be at least 1", name);
        spawn_weights.set(color, *weight);
    }

    ensure!(!file.objectives.is_empty(), "level needs at least one objective");
    let mut objectives = Vec::with_capacity(file.objectives.len());
    for objective in &file.objectives {
        let parsed = match objective {
            ObjectiveFile::Score { target } => Objective::Score {
                target: *target,
                progress: 0,
            },
            ObjectiveFile::CollectColor { color, target } => {
                let color = parse_color(color)?;
                ensure!(
                    colors.contains(&color),
                    "collect objective for '{}' which is not in the palette",
                    color.as_str()
                );
                Objective::CollectColor {
                    color,
                    target: *target,
                    progress: 0,
                }
            }
            ObjectiveFile::ClearJelly { target } => Objective::ClearJelly {
                target: *target,
                progress: 0,
            },
            ObjectiveFile::ClearIce { target } => Objective::ClearIce {
                target: *target,
                progress: 0,
            },
        };
        ensure!(parsed.target() > 0, "objective target must be positive");
        objectives.push(parsed);
    }

    let mask = file
        .mask
        .as_deref()
        .map(|lines| parse_mask(file.rows, file.cols, lines))
        .transpose()?;

    let jelly = collect_blockers(
        "jelly",
        file.rows,
        file.cols,
        mask.as_ref(),
        &file.jelly,
        &file.double_jelly,
    )?;
    let ice = collect_blockers(
        "ice",
        file.rows,
        file.cols,
        mask.as_ref(),
        &file.ice,
        &file.double_ice,
    )?;

    Ok(LevelDefinition {
        id: file.id,
        rows: file.rows,
        cols: file.cols,
        moves: file.moves,
        colors,
        spawn_weights,
        objectives,
        mask,
        jelly,
        ice,
    })
}

/// Load and parse a level file from disk
pub fn load_level(path: impl AsRef<Path>) -> Result<LevelDefinition> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    parse_level(&json).with_context(|| format!("invalid level file {}", path.display()))
}

/// Built-in level used by the demo driver and tests: open 8x8 board, all
/// five colors, a score goal and a patch of jelly.
pub fn default_level() -> LevelDefinition {
    LevelDefinition {
        id: 1,
        rows: 8,
        cols: 8,
        moves: 24,
        colors: Color::ALL.to_vec(),
        spawn_weights: SpawnWeights::new(),
        objectives: vec![
            Objective::Score {
                target: 1500,
                progress: 0,
            },
            Objective::ClearJelly {
                target: 4,
                progress: 0,
            },
        ],
        mask: None,
        jelly: vec![
            (Coord::new(3, 3), 1),
            (Coord::new(3, 4), 1),
            (Coord::new(4, 3), 1),
            (Coord::new(4, 4), 1),
        ],
        ice: Vec::new(),
    }
}
