//! Scoring module - line clear points, levels, and fall speed
//!
//! Levels start at 1. Clearing `c` lines at level L awards
//! `LINE_SCORES[c] * L`; every `lines_per_level` cleared lines raise the
//! level by one and shorten the fall interval by 80ms down to a 100ms floor.

use crate::types::{DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINE_SCORES};

/// Points for clearing `lines` rows at once at `level`.
///
/// Zero lines (or an impossible count above four) scores nothing.
pub fn line_clear_score(lines: u32, level: u32) -> u32 {
    match LINE_SCORES.get(lines as usize) {
        Some(&base) => base.saturating_mul(level),
        None => 0,
    }
}

/// Level reached after `total_lines` cleared lines.
pub fn level_for_lines(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Fall interval for `level`, starting from `base_ms` at level 1.
pub fn drop_interval_ms(level: u32, base_ms: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    base_ms.saturating_sub(speedup).max(DROP_INTERVAL_MIN_MS)
}

/// Result of applying one lock's line clears to the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    pub points: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
}

/// Advance the counters for `cleared` lines.
///
/// Returns `None` when nothing was cleared; the caller leaves every counter
/// untouched in that case.
pub fn apply_clear(
    cleared: u32,
    level: u32,
    total_lines: u32,
    lines_per_level: u32,
    base_drop_ms: u32,
) -> Option<ScoreResult> {
    if cleared == 0 {
        return None;
    }
    // Points use the level the clear happened on, before any level-up.
    let points = line_clear_score(cleared, level);
    let lines = total_lines.saturating_add(cleared);
    let level = level_for_lines(lines, lines_per_level);
    Some(ScoreResult {
        points,
        lines,
        level,
        drop_interval_ms: drop_interval_ms(level, base_drop_ms),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BASE_DROP_MS, LINES_PER_LEVEL};

    #[test]
    fn test_line_scores_scale_with_level() {
        for level in [1, 2, 5, 13] {
            assert_eq!(line_clear_score(0, level), 0);
            assert_eq!(line_clear_score(1, level), 100 * level);
            assert_eq!(line_clear_score(2, level), 300 * level);
            assert_eq!(line_clear_score(3, level), 500 * level);
            assert_eq!(line_clear_score(4, level), 800 * level);
        }
        assert_eq!(line_clear_score(5, 1), 0);
    }

    #[test]
    fn test_level_calculation() {
        for lines in 0..200 {
            assert_eq!(level_for_lines(lines, LINES_PER_LEVEL), lines / 10 + 1);
        }
        assert_eq!(level_for_lines(9, 10), 1);
        assert_eq!(level_for_lines(10, 10), 2);
        assert_eq!(level_for_lines(6, 3), 3);
    }

    #[test]
    fn test_drop_intervals() {
        for level in 1..40 {
            let expected = (1000i64 - (level as i64 - 1) * 80).max(100) as u32;
            assert_eq!(drop_interval_ms(level, BASE_DROP_MS), expected);
        }
        assert_eq!(drop_interval_ms(1, 1000), 1000);
        assert_eq!(drop_interval_ms(2, 1000), 920);
        assert_eq!(drop_interval_ms(12, 1000), 120);
        assert_eq!(drop_interval_ms(13, 1000), 100);
        assert_eq!(drop_interval_ms(100, 1000), 100);
    }

    #[test]
    fn test_apply_clear_nothing_cleared() {
        assert_eq!(apply_clear(0, 3, 25, 10, 1000), None);
    }

    #[test]
    fn test_apply_clear_levels_up_after_scoring() {
        // Lines 8 -> 12 crosses into level 2, but the tetris scores at level 1.
        let result = apply_clear(4, 1, 8, 10, 1000).unwrap();
        assert_eq!(result.points, 800);
        assert_eq!(result.lines, 12);
        assert_eq!(result.level, 2);
        assert_eq!(result.drop_interval_ms, 920);
    }
}
