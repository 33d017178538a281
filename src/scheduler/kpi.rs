//! Schedule quality metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Span | First start to last end (minutes) |
//! | Idle | Sum of positive gaps between consecutive entries |
//! | Busy (per stage) | Sum of match durations on that stage |
//! | Utilization (per stage) | Busy / span |
//! | Disruption score | Disruptions / matches × 100 |
//! | Moved | Matches whose start differs from the baseline |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{GameType, Schedule};

/// Indicators for a single schedule. Times are in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleMetrics {
    /// Number of entries, breaks excluded.
    pub match_count: usize,
    /// First start to last end.
    pub total_span_minutes: i64,
    /// Sum of positive gaps between chronologically consecutive entries.
    pub idle_minutes: i64,
    /// Playing time per stage.
    pub busy_by_game: BTreeMap<GameType, i64>,
    /// Busy time over span, per stage (0.0..=1.0 when nothing overlaps).
    pub utilization_by_game: BTreeMap<GameType, f64>,
}

impl ScheduleMetrics {
    /// Computes metrics for a schedule.
    pub fn calculate(schedule: &Schedule) -> Self {
        let span = schedule.span_minutes();

        let mut ordered: Vec<_> = schedule.matches.iter().collect();
        ordered.sort_by_key(|m| m.start_time);
        let idle = ordered
            .windows(2)
            .map(|w| w[1].gap_after(w[0]).max(0))
            .sum();

        let mut busy_by_game: BTreeMap<GameType, i64> = BTreeMap::new();
        for m in schedule.matches.iter().filter(|m| !m.is_break) {
            *busy_by_game.entry(m.game_type).or_insert(0) += m.duration;
        }
        let utilization_by_game = busy_by_game
            .iter()
            .map(|(&game, &busy)| {
                let u = if span > 0 { busy as f64 / span as f64 } else { 0.0 };
                (game, u)
            })
            .collect();

        Self {
            match_count: schedule.matches.iter().filter(|m| !m.is_break).count(),
            total_span_minutes: span,
            idle_minutes: idle,
            busy_by_game,
            utilization_by_game,
        }
    }
}

/// Before/after comparison of an adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentMetrics {
    /// Metrics of the baseline.
    pub original: ScheduleMetrics,
    /// Metrics of the adjusted schedule.
    pub adjusted: ScheduleMetrics,
    /// Adjusted idle minus original idle (negative = improvement).
    pub idle_delta_minutes: i64,
    /// Adjusted span minus original span (negative = improvement).
    pub span_delta_minutes: i64,
    /// Matches whose start moved.
    pub moved_matches: usize,
    /// Disruptions per match, as a percentage.
    pub disruption_score: f64,
}

impl AdjustmentMetrics {
    /// Compares a baseline with its adjustment.
    pub fn compare(original: &Schedule, adjusted: &Schedule, disruption_count: usize) -> Self {
        let before = ScheduleMetrics::calculate(original);
        let after = ScheduleMetrics::calculate(adjusted);

        let moved_matches = adjusted
            .matches
            .iter()
            .filter(|m| {
                original
                    .find_match(&m.id)
                    .is_some_and(|o| o.start_time != m.start_time)
            })
            .count();

        let total = original.match_count();
        let disruption_score = if total == 0 {
            0.0
        } else {
            disruption_count as f64 / total as f64 * 100.0
        };

        Self {
            idle_delta_minutes: after.idle_minutes - before.idle_minutes,
            span_delta_minutes: after.total_span_minutes - before.total_span_minutes,
            original: before,
            adjusted: after,
            moved_matches,
            disruption_score,
        }
    }

    /// Whether the adjustment stayed within the given slippage budget.
    pub fn within_budget(&self, max_span_delta: i64, max_moved: usize) -> bool {
        self.span_delta_minutes <= max_span_delta && self.moved_matches <= max_moved
    }
}
