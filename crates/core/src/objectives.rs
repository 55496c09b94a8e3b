//! Objectives module - folding turn statistics into level objectives

use kali_crush_types::{Objective, TurnStats};

/// Fold one turn's statistics into a fresh objective list.
///
/// Pure: the input slice is untouched. Progress only ever grows and may
/// overshoot its target; completion is `progress >= target`.
pub fn update_objectives(objectives: &[Objective], stats: &TurnStats) -> Vec<Objective> {
    objectives
        .iter()
        .map(|objective| match *objective {
            Objective::Score { target, progress } => Objective::Score {
                target,
                progress: progress.saturating_add(stats.score_delta),
            },
            Objective::CollectColor {
                color,
                target,
                progress,
            } => {
                let gained = stats.removed_colors.iter().filter(|&&c| c == color).count() as u32;
                Objective::CollectColor {
                    color,
                    target,
                    progress: progress.saturating_add(gained),
                }
            }
            Objective::ClearJelly { target, progress } => Objective::ClearJelly {
                target,
                progress: progress.saturating_add(stats.jelly_cleared),
            },
            Objective::ClearIce { target, progress } => Objective::ClearIce {
                target,
                progress: progress.saturating_add(stats.ice_cleared),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kali_crush_types::Color;

    #[test]
    fn test_update_all_objective_kinds() {
        let objectives = vec![
            Objective::Score {
                target: 500,
                progress: 100,
            },
            Objective::CollectColor {
                color: Color::Ion,
                target: 10,
                progress: 2,
            },
            Objective::ClearJelly {
                target: 4,
                progress: 1,
            },
            Objective::ClearIce {
                target: 2,
                progress: 0,
            },
        ];
        let stats = TurnStats {
            score_delta: 180,
            removed_colors: vec![Color::Ion, Color::Pulse, Color::Ion, Color::Abyss],
            jelly_cleared: 2,
            ice_cleared: 1,
        };

        let updated = update_objectives(&objectives, &stats);
        assert_eq!(
            updated,
            vec![
                Objective::Score {
                    target: 500,
                    progress: 280,
                },
                Objective::CollectColor {
                    color: Color::Ion,
                    target: 10,
                    progress: 4,
                },
                Objective::ClearJelly {
                    target: 4,
                    progress: 3,
                },
                Objective::ClearIce {
                    target: 2,
                    progress: 1,
                },
            ]
        );
        // Input untouched
        assert_eq!(objectives[0].progress(), 100);
    }

    #[test]
    fn test_progress_can_overshoot_target() {
        let objectives = vec![Objective::ClearJelly {
            target: 2,
            progress: 2,
        }];
        let stats = TurnStats {
            jelly_cleared: 3,
            ..TurnStats::default()
        };
        let updated = update_objectives(&objectives, &stats);
        assert_eq!(updated[0].progress(), 5);
        assert!(updated[0].is_complete());
    }

    #[test]
    fn test_empty_stats_is_identity() {
        let objectives = vec![
            Objective::Score {
                target: 500,
                progress: 340,
            },
            Objective::CollectColor {
                color: Color::Abyss,
                target: 8,
                progress: 8,
            },
        ];
        assert_eq!(
            update_objectives(&objectives, &TurnStats::default()),
            objectives
        );
    }
}
