//! Propagation engine: ripples one match's change through the timeline.
//!
//! # Rules
//!
//! - Two matches are *related* when they share a team or a stage (game type).
//!   Unrelated matches never constrain each other.
//! - The gap required after `prev` is the rest period when a team is shared,
//!   otherwise the setup buffer.
//! - Fixed events and breaks are never moved or resized.
//!
//! # Passes
//!
//! - [`PropagationEngine::propagate`]: push later matches back after a delay.
//! - [`PropagationEngine::pull_earlier`]: after an early finish, pull later
//!   matches forward, never before their floor, stopping at fixed events.
//! - [`PropagationEngine::enforce_venue_exclusivity`]: per stage, no two
//!   entries closer than the setup buffer.

use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::models::timestamp::saturating_add_minutes;
use crate::models::{Match, Schedule, TournamentConfig};

/// Shortest a match may be squeezed to make room for a late arrival (minutes).
pub const MIN_SHRUNK_MINUTES: i64 = 20;

/// Minutes required between `prev`'s end and `next`'s start.
pub(crate) fn required_gap(prev: &Match, next: &Match, rest_period: i64, setup_buffer: i64) -> i64 {
    if prev.shares_team(next) {
        rest_period
    } else {
        setup_buffer
    }
}

/// Cascading timing repair over a working schedule.
#[derive(Debug, Clone, Copy)]
pub struct PropagationEngine {
    rest_period: i64,
    setup_buffer: i64,
}

impl PropagationEngine {
    /// Creates an engine with explicit buffers (minutes).
    pub fn new(rest_period: i64, setup_buffer: i64) -> Self {
        Self {
            rest_period,
            setup_buffer,
        }
    }

    /// Creates an engine from tournament settings.
    pub fn from_config(config: &TournamentConfig) -> Self {
        Self::new(config.rest_period, config.setup_buffer)
    }

    fn gap(&self, prev: &Match, next: &Match) -> i64 {
        required_gap(prev, next, self.rest_period, self.setup_buffer)
    }

    /// Pushes later matches back after `changed_id` was delayed or lengthened.
    ///
    /// `since` is the changed match's start before the edit. Candidates are
    /// the movable matches starting at or after it, walked by current start.
    /// Each related candidate starting before `anchor.end + gap` is moved to
    /// exactly that time and becomes the new anchor; the first related
    /// candidate that already fits stops the cascade.
    ///
    /// Returns the ids of moved matches, in cascade order.
    pub fn propagate(&self, schedule: &mut Schedule, changed_id: &str, since: NaiveDateTime) -> Vec<String> {
        let Some(mut anchor) = schedule.position(changed_id) else {
            return Vec::new();
        };
        if schedule.matches[anchor].is_immovable() {
            return Vec::new();
        }

        let mut candidates: Vec<usize> = (0..schedule.matches.len())
            .filter(|&i| i != anchor)
            .filter(|&i| {
                let m = &schedule.matches[i];
                !m.is_immovable() && m.start_time >= since
            })
            .collect();
        candidates.sort_by_key(|&i| schedule.matches[i].start_time);

        let mut moved = Vec::new();
        for idx in candidates {
            let (prev, next) = (&schedule.matches[anchor], &schedule.matches[idx]);
            if !prev.is_related(next) {
                continue;
            }
            let min_start = saturating_add_minutes(prev.end_time, self.gap(prev, next));
            if next.start_time >= min_start {
                break;
            }

            debug!(match_id = %next.id, from = %next.start_time, to = %min_start, after = %prev.id, "cascade delay");
            schedule.matches[idx].set_start(min_start);
            moved.push(schedule.matches[idx].id.clone());
            anchor = idx;
        }
        moved
    }

    /// Pulls later matches earlier after `early_id` finished early.
    ///
    /// Worklist over the timeline: the next movable related match after the
    /// current one starts at `max(current.end + gap, floor)` if that is
    /// earlier than where it is now, then becomes the current match. The
    /// walk stops when a candidate cannot move, or when a break (or a fixed
    /// match related to the candidate) lies between the current end and the
    /// candidate's start.
    ///
    /// Matches missing from `floors` are never moved earlier than their
    /// current start.
    pub fn pull_earlier(
        &self,
        schedule: &mut Schedule,
        early_id: &str,
        floors: &HashMap<String, NaiveDateTime>,
    ) -> Vec<String> {
        let mut moved = Vec::new();
        let mut worklist = vec![early_id.to_string()];

        while let Some(current_id) = worklist.pop() {
            let Some(cur_idx) = schedule.position(&current_id) else {
                continue;
            };
            let Some(next_idx) = self.next_related(schedule, cur_idx) else {
                continue;
            };

            let (cur, next) = (&schedule.matches[cur_idx], &schedule.matches[next_idx]);
            if self.blocked_by_fixed(schedule, cur.end_time, next) {
                debug!(match_id = %next.id, after = %cur.id, "early pull stopped by fixed event");
                continue;
            }

            let floor = floors.get(&next.id).copied().unwrap_or(next.start_time);
            let target = saturating_add_minutes(cur.end_time, self.gap(cur, next)).max(floor);
            if target >= next.start_time {
                continue;
            }

            debug!(match_id = %next.id, from = %next.start_time, to = %target, after = %cur.id, "early pull");
            schedule.matches[next_idx].set_start(target);
            let id = schedule.matches[next_idx].id.clone();
            moved.push(id.clone());
            worklist.push(id);
        }
        moved
    }

    /// The first movable related match starting at or after `cur_idx`'s start.
    fn next_related(&self, schedule: &Schedule, cur_idx: usize) -> Option<usize> {
        let cur = &schedule.matches[cur_idx];
        schedule
            .matches
            .iter()
            .enumerate()
            .filter(|&(i, m)| {
                i != cur_idx && !m.is_immovable() && m.start_time >= cur.start_time && cur.is_related(m)
            })
            .min_by_key(|&(i, m)| (m.start_time, i))
            .map(|(i, _)| i)
    }

    fn blocked_by_fixed(&self, schedule: &Schedule, from: NaiveDateTime, next: &Match) -> bool {
        schedule.matches.iter().any(|f| {
            f.is_immovable()
                && (f.is_break || f.is_related(next))
                && f.start_time < next.start_time
                && f.end_time > from
        })
    }

    /// Enforces one-entry-at-a-time per stage.
    ///
    /// Entries of each game type (breaks excluded, fixed matches included)
    /// are walked by start time. A movable entry that starts before
    /// `prev.end + setup` is moved there, except a late-arrival entry
    /// following a movable, undisrupted `prev`: then `prev` is shortened
    /// (not below [`MIN_SHRUNK_MINUTES`]) to make room first. Whatever
    /// conflict remains is resolved by moving the later entry.
    ///
    /// Returns the ids of moved or resized entries.
    pub fn enforce_venue_exclusivity(
        &self,
        schedule: &mut Schedule,
        late_arrivals: &HashSet<String>,
    ) -> Vec<String> {
        let mut changed = Vec::new();
        let mut stages: Vec<_> = schedule.matches.iter().map(|m| m.game_type).collect();
        stages.sort_unstable();
        stages.dedup();

        for stage in stages {
            let mut lane: Vec<usize> = (0..schedule.matches.len())
                .filter(|&i| {
                    let m = &schedule.matches[i];
                    m.game_type == stage && !m.is_break
                })
                .collect();
            lane.sort_by_key(|&i| schedule.matches[i].start_time);

            for w in 1..lane.len() {
                let (p, c) = (lane[w - 1], lane[w]);
                let required = saturating_add_minutes(schedule.matches[p].end_time, self.setup_buffer);
                let cur_start = schedule.matches[c].start_time;
                if cur_start >= required {
                    continue;
                }

                if schedule.matches[c].is_immovable() {
                    warn!(
                        match_id = %schedule.matches[c].id,
                        previous = %schedule.matches[p].id,
                        "stage conflict with fixed match left unresolved"
                    );
                    continue;
                }

                let cur_id = schedule.matches[c].id.clone();
                let prev = &schedule.matches[p];
                if late_arrivals.contains(&cur_id)
                    && !prev.is_immovable()
                    && !late_arrivals.contains(&prev.id)
                    && prev.duration > MIN_SHRUNK_MINUTES
                {
                    let needed = (required - cur_start).num_minutes();
                    let shrunk = (prev.duration - needed).max(MIN_SHRUNK_MINUTES);
                    debug!(match_id = %prev.id, from = prev.duration, to = shrunk, for_match = %cur_id, "shortened to make room for late arrival");
                    let prev_id = prev.id.clone();
                    schedule.matches[p].set_duration(shrunk);
                    changed.push(prev_id);
                }

                let required = saturating_add_minutes(schedule.matches[p].end_time, self.setup_buffer);
                if schedule.matches[c].start_time < required {
                    if late_arrivals.contains(&cur_id) {
                        warn!(match_id = %cur_id, to = %required, "late arrival moved further to clear stage");
                    }
                    debug!(match_id = %cur_id, to = %required, "stage conflict resolved");
                    schedule.matches[c].set_start(required);
                    changed.push(cur_id);
                }
            }
        }
        changed
    }
}
