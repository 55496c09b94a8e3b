//! End-to-end resolution properties: determinism, termination, and board
//! consistency across full turns.

use kali_crush::core::{
    create_initial_board, detect_matches, first_legal_move, has_any_legal_move, resolve_turn,
    update_objectives, validate_board_invariants, validate_swap, Board,
};
use kali_crush::types::{
    Candy, CandyKind, Color, Coord, LevelDefinition, Objective, ResolutionStep, SpawnWeights,
    CASCADE_CAP, COMBO_SCORE_PER_CELL, MATCH_SCORE_PER_CELL,
};

fn open_level(rows: usize, cols: usize) -> LevelDefinition {
    LevelDefinition {
        id: 1,
        rows,
        cols,
        moves: 20,
        colors: Color::ALL.to_vec(),
        spawn_weights: SpawnWeights::new(),
        objectives: vec![Objective::Score {
            target: 1000,
            progress: 0,
        }],
        mask: None,
        jelly: Vec::new(),
        ice: Vec::new(),
    }
}

fn grid(rows: &[&[usize]]) -> Board {
    let mut board = Board::empty(rows.len(), rows[0].len());
    for (r, row) in rows.iter().enumerate() {
        for (c, &color_idx) in row.iter().enumerate() {
            let id = board.mint_id();
            board.set_candy(
                Coord::new(r, c),
                Some(Candy::normal(id, Color::ALL[color_idx])),
            );
        }
    }
    board
}

#[test]
fn test_full_turn_deterministic() {
    let level = open_level(8, 8);
    for seed in [1u32, 77, 4242] {
        let board1 = create_initial_board(&level, seed);
        let board2 = create_initial_board(&level, seed);
        assert_eq!(board1, board2);

        let (a, b) = first_legal_move(&board1).expect("generated boards have a move");
        let r1 = resolve_turn(&board1, a, b, &level.colors, &level.spawn_weights, seed);
        let r2 = resolve_turn(&board2, a, b, &level.colors, &level.spawn_weights, seed);
        assert_eq!(r1.board, r2.board);
        assert_eq!(r1.queue, r2.queue);
        assert_eq!(r1.score_delta, r2.score_delta);
        assert_eq!(r1.removed_colors, r2.removed_colors);
    }
}

#[test]
fn test_detects_two_separate_groups() {
    let board = grid(&[
        &[0, 0, 0, 1],
        &[1, 2, 3, 4],
        &[2, 2, 2, 4],
        &[1, 3, 4, 0],
    ]);
    let groups = detect_matches(&board);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].cells.len(), 3);
    assert_eq!(groups[1].cells.len(), 3);
    assert_ne!(groups[0].color, groups[1].color);
}

#[test]
fn test_swap_validation_scenario() {
    let board = grid(&[&[1, 2, 1], &[2, 1, 2], &[3, 2, 3]]);
    assert!(validate_swap(&board, Coord::new(0, 1), Coord::new(1, 1)));
    assert!(!validate_swap(&board, Coord::new(0, 0), Coord::new(0, 1)));
}

#[test]
fn test_bomb_pair_clears_small_board() {
    let mut board = grid(&[&[0, 1, 2], &[3, 0, 1], &[2, 3, 0]]);
    let a = Coord::new(1, 1);
    let b = Coord::new(1, 2);
    let id = board.mint_id();
    board.set_candy(a, Some(Candy::special(id, CandyKind::ColorBomb, None)));
    let id = board.mint_id();
    board.set_candy(b, Some(Candy::special(id, CandyKind::ColorBomb, None)));

    let result = resolve_turn(
        &board,
        a,
        b,
        &Color::ALL,
        &SpawnWeights::new(),
        31,
    );

    let combo = result.queue.iter().find_map(|step| match step {
        ResolutionStep::Combo { cleared } => Some(cleared.len()),
        _ => None,
    });
    assert_eq!(combo, Some(9));
    assert!(result.score_delta >= 9 * COMBO_SCORE_PER_CELL);
    // The crater refills completely
    for cell in result.board.cells() {
        assert!(cell.candy.is_some());
    }
    assert!(validate_board_invariants(&result.board).is_empty());
}

#[test]
fn test_objective_accumulation_over_turns() {
    let objectives = vec![
        Objective::Score {
            target: 300,
            progress: 0,
        },
        Objective::CollectColor {
            color: Color::ALL[1],
            target: 3,
            progress: 0,
        },
    ];

    let board = grid(&[&[1, 2, 1], &[2, 1, 2], &[3, 2, 3]]);
    let result = resolve_turn(
        &board,
        Coord::new(0, 1),
        Coord::new(1, 1),
        &Color::ALL,
        &SpawnWeights::new(),
        6,
    );

    let updated = update_objectives(&objectives, &result.stats());
    assert!(updated[0].progress() >= 3 * MATCH_SCORE_PER_CELL);
    // The swap matched three candies of color index 1
    assert!(updated[1].progress() >= 3);
    assert!(updated[1].is_complete());
}

#[test]
fn test_randomized_turns_stay_consistent() {
    let level = open_level(6, 6);
    for seed_base in 0u32..15 {
        let mut seed = seed_base.wrapping_mul(2654435761);
        let mut board = create_initial_board(&level, seed);
        assert!(validate_board_invariants(&board).is_empty());

        for _turn in 0..8 {
            let Some((a, b)) = first_legal_move(&board) else {
                break;
            };
            let result = resolve_turn(&board, a, b, &level.colors, &level.spawn_weights, seed);

            // Termination bounds
            assert!(result.cascades <= CASCADE_CAP + 1, "seed {}", seed);
            assert!(result.queue.len() < 500, "seed {}", seed);
            assert!(matches!(result.queue.last(), Some(ResolutionStep::Stable)));

            // A legal swap always removes something
            assert!(result.score_delta > 0, "seed {}", seed);

            // Settled boards are full, match-free, and structurally sound
            for cell in result.board.cells() {
                assert!(cell.candy.is_some());
            }
            assert!(detect_matches(&result.board).is_empty(), "seed {}", seed);
            assert!(
                validate_board_invariants(&result.board).is_empty(),
                "seed {}",
                seed
            );

            board = result.board;
            seed = seed.wrapping_add(17);
        }
    }
}

#[test]
fn test_blocked_level_resolution() {
    let mut level = open_level(7, 7);
    level.mask = Some(
        (0..7)
            .map(|r| (0..7).map(|c| !(r == 3 && (c == 0 || c == 6))).collect())
            .collect(),
    );
    level.jelly = vec![(Coord::new(5, 5), 2)];
    level.ice = vec![(Coord::new(1, 1), 1)];

    let seed = 9;
    let mut board = create_initial_board(&level, seed);
    assert!(validate_board_invariants(&board).is_empty());

    for _ in 0..5 {
        let Some((a, b)) = first_legal_move(&board) else {
            break;
        };
        let result = resolve_turn(&board, a, b, &level.colors, &level.spawn_weights, seed);
        board = result.board;

        // Holes and iced cells never gain a candy
        assert!(board.candy(Coord::new(3, 0)).is_none());
        assert!(board.candy(Coord::new(3, 6)).is_none());
        assert!(board.candy(Coord::new(1, 1)).is_none() || board.cell(Coord::new(1, 1)).unwrap().ice == 0);
        assert!(validate_board_invariants(&board).is_empty());
    }
}

#[test]
fn test_deadlock_reshuffle_restores_playability() {
    // Pair-striped candies admit no legal swap; the frozen corner must
    // stay frozen through the reshuffle
    let mut board = grid(&[
        &[0, 1, 0, 1],
        &[2, 3, 2, 3],
        &[0, 1, 0, 1],
        &[2, 3, 2, 3],
    ]);
    let frozen = Coord::new(0, 0);
    board.set_candy(frozen, None);
    board.cell_mut(frozen).unwrap().ice = 2;
    assert!(!has_any_legal_move(&board));

    let result = resolve_turn(
        &board,
        Coord::new(2, 2),
        Coord::new(2, 3),
        &Color::ALL,
        &SpawnWeights::new(),
        123,
    );

    // The swap removed nothing, so the turn ends in the deadlock check
    assert_eq!(result.cascades, 0);
    assert!(has_any_legal_move(&result.board));
    assert!(detect_matches(&result.board).is_empty());

    // Blockers are pinned in place
    let frozen_cell = result.board.cell(frozen).unwrap();
    assert_eq!(frozen_cell.ice, 2);
    assert!(frozen_cell.candy.is_none());

    // The reshuffle permutes the candies, never mints or drops any
    let colors = |b: &Board| {
        let mut out: Vec<Color> = b
            .cells()
            .iter()
            .filter_map(|cell| cell.candy.as_ref().and_then(|candy| candy.color))
            .collect();
        out.sort_unstable();
        out
    };
    assert_eq!(colors(&board), colors(&result.board));
    assert!(validate_board_invariants(&result.board).is_empty());
}
