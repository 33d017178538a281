//! Sequence validator: the final repair pass of every adjustment.
//!
//! Re-walks movable matches in their pre-adjustment chronological order and
//! makes every related later match start no earlier than
//! `prev.end + gap` (rest period for a shared team, setup buffer otherwise).
//! It only ever moves matches later, so running it twice is a no-op and it
//! never undoes the non-retreat guarantee.
//!
//! # Complexity
//! O(n²) over movable matches.

use chrono::NaiveDateTime;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::propagation::required_gap;
use crate::models::timestamp::saturating_add_minutes;
use crate::models::{Schedule, TournamentConfig};

/// Final consistency sweep over an adjusted schedule.
#[derive(Debug, Clone, Copy)]
pub struct SequenceValidator {
    rest_period: i64,
    setup_buffer: i64,
}

impl SequenceValidator {
    /// Creates a validator with explicit buffers (minutes).
    pub fn new(rest_period: i64, setup_buffer: i64) -> Self {
        Self {
            rest_period,
            setup_buffer,
        }
    }

    /// Creates a validator from tournament settings.
    pub fn from_config(config: &TournamentConfig) -> Self {
        Self::new(config.rest_period, config.setup_buffer)
    }

    /// Repairs ordering violations; returns the ids of moved matches.
    ///
    /// `original_order` is the chronological id order captured before any
    /// disruption was applied. Ids not present in the schedule are ignored.
    pub fn validate(&self, schedule: &mut Schedule, original_order: &[String]) -> Vec<String> {
        let index = schedule.index_by_id();
        let walk: Vec<usize> = original_order
            .iter()
            .filter_map(|id| index.get(id).copied())
            .filter(|&i| !schedule.matches[i].is_immovable())
            .collect();

        let mut moved = Vec::new();
        for (k, &cur) in walk.iter().enumerate() {
            let mut earliest: Option<NaiveDateTime> = None;
            for &prev in &walk[..k] {
                let (p, c) = (&schedule.matches[prev], &schedule.matches[cur]);
                if !p.is_related(c) {
                    continue;
                }
                let bound = saturating_add_minutes(
                    p.end_time,
                    required_gap(p, c, self.rest_period, self.setup_buffer),
                );
                earliest = Some(earliest.map_or(bound, |e| e.max(bound)));
            }

            if let Some(bound) = earliest {
                let m = &mut schedule.matches[cur];
                if m.start_time < bound {
                    debug!(match_id = %m.id, from = %m.start_time, to = %bound, "sequence repair");
                    m.set_start(bound);
                    moved.push(m.id.clone());
                }
            }
        }
        moved
    }

    /// Resets undisrupted matches that ended up before their baseline start.
    ///
    /// Matches in `disrupted` and immovable entries are left alone. Returns
    /// the ids of reset matches.
    pub fn clamp_non_retreat(
        &self,
        schedule: &mut Schedule,
        baseline: &Schedule,
        disrupted: &HashSet<String>,
    ) -> Vec<String> {
        let mut reset = Vec::new();
        for m in schedule.matches.iter_mut() {
            if m.is_immovable() || disrupted.contains(&m.id) {
                continue;
            }
            let Some(original) = baseline.find_match(&m.id) else {
                continue;
            };
            if m.start_time < original.start_time {
                warn!(match_id = %m.id, adjusted = %m.start_time, original = %original.start_time, "match moved before its planned start, reset");
                m.set_start(original.start_time);
                reset.push(m.id.clone());
            }
        }
        reset
    }
}
