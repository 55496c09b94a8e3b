//! Deterministic autoplay runner (default binary).
//!
//! Loads a level (JSON path as the first argument, built-in default
//! otherwise), then repeatedly takes the first legal move and resolves it,
//! printing the board and a per-turn summary. The optional second argument
//! is the seed, so a run is fully reproducible:
//!
//! ```text
//! kali-crush [LEVEL.json] [SEED]
//! ```

use std::env;

use anyhow::{Context, Result};
use crossterm::style::{Color as TermColor, Stylize};

use kali_crush::core::{
    create_initial_board, first_legal_move, resolve_turn, update_objectives,
    validate_board_invariants, Board,
};
use kali_crush::level::{default_level, load_level};
use kali_crush::types::{CandyKind, Color, Objective, ResolutionStep, REFILL_SEED_OFFSET};

fn main() -> Result<()> {
    let mut args = env::args().skip(1);

    let level = match args.next() {
        Some(path) => load_level(&path)?,
        None => default_level(),
    };
    let seed: u32 = match args.next() {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("invalid seed '{}'", raw))?,
        None => 1,
    };

    run(level, seed)
}

fn run(level: kali_crush::types::LevelDefinition, mut seed: u32) -> Result<()> {
    println!(
        "level {} ({}x{}, {} moves, seed {})",
        level.id, level.rows, level.cols, level.moves, seed
    );

    let mut board = create_initial_board(&level, seed);
    let mut objectives = level.objectives.clone();
    let mut total_score: u32 = 0;

    print_board(&board);

    for turn in 1..=level.moves {
        let Some((a, b)) = first_legal_move(&board) else {
            println!("turn {}: no legal move, stopping", turn);
            break;
        };

        let result = resolve_turn(&board, a, b, &level.colors, &level.spawn_weights, seed);
        let combo = result
            .queue
            .iter()
            .any(|step| matches!(step, ResolutionStep::Combo { .. }));

        objectives = update_objectives(&objectives, &result.stats());
        total_score += result.score_delta;
        board = result.board;

        println!(
            "turn {:>2}: swap ({},{})<->({},{})  +{:<5} pts  {} cascade(s){}",
            turn,
            a.r,
            a.c,
            b.r,
            b.c,
            result.score_delta,
            result.cascades,
            if combo { "  [combo]" } else { "" }
        );
        print_board(&board);

        for violation in validate_board_invariants(&board) {
            eprintln!("board invariant violated: {}", violation);
        }

        if objectives.iter().all(|objective| objective.is_complete()) {
            println!("all objectives complete after {} moves", turn);
            break;
        }

        // Advance the turn seed so each resolution draws a fresh stream
        seed = seed.wrapping_add(REFILL_SEED_OFFSET);
    }

    println!("total score: {}", total_score);
    for objective in &objectives {
        println!("  {}", describe_objective(objective));
    }
    Ok(())
}

fn term_color(color: Option<Color>) -> TermColor {
    match color {
        Some(Color::Aurora) => TermColor::Cyan,
        Some(Color::Solstice) => TermColor::Yellow,
        Some(Color::Abyss) => TermColor::Blue,
        Some(Color::Ion) => TermColor::Green,
        Some(Color::Pulse) => TermColor::Magenta,
        None => TermColor::White,
    }
}

fn candy_symbol(kind: CandyKind) -> &'static str {
    match kind {
        CandyKind::Normal => "●",
        CandyKind::StripedH => "═",
        CandyKind::StripedV => "║",
        CandyKind::Wrapped => "▣",
        CandyKind::ColorBomb => "✦",
    }
}

fn print_board(board: &Board) {
    for row in board.cells().chunks(board.cols()) {
        let mut line = String::new();
        for cell in row {
            if cell.hole {
                line.push_str("  ");
                continue;
            }
            if cell.ice > 0 {
                line.push_str("▒ ");
                continue;
            }
            let glyph = match &cell.candy {
                Some(candy) => {
                    let styled = candy_symbol(candy.kind).with(term_color(candy.color));
                    if cell.jelly > 0 {
                        styled.on(TermColor::DarkMagenta).to_string()
                    } else {
                        styled.to_string()
                    }
                }
                None => ".".to_string(),
            };
            line.push_str(&glyph);
            line.push(' ');
        }
        println!("{}", line);
    }
    println!();
}

fn describe_objective(objective: &Objective) -> String {
    let done = if objective.is_complete() { " [done]" } else { "" };
    match objective {
        Objective::Score { target, progress } => {
            format!("score {}/{}{}", progress, target, done)
        }
        Objective::CollectColor {
            color,
            target,
            progress,
        } => format!("collect {} {}/{}{}", color.as_str(), progress, target, done),
        Objective::ClearJelly { target, progress } => {
            format!("clear jelly {}/{}{}", progress, target, done)
        }
        Objective::ClearIce { target, progress } => {
            format!("clear ice {}/{}{}", progress, target, done)
        }
    }
}
