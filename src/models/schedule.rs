//! Schedule (timeline) model.
//!
//! A schedule is the full day's list of matches and fixed events. Order in
//! `matches` is insertion order; use [`Schedule::chronological_ids`] when
//! processing must follow the timeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{GameType, Match};

/// A tournament day: every match and fixed event on every stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Matches and fixed events.
    pub matches: Vec<Match>,
}

/// A rule broken by a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Offending match ID.
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// `end_time` does not equal `start_time + duration`.
    DurationMismatch,
    /// A team is in two matches at once.
    TeamOverlap,
    /// A team's consecutive matches are closer than the rest period.
    RestPeriod,
    /// Two matches occupy the same stage at once.
    VenueConflict,
    /// A match runs outside venue opening hours.
    OutsideVenueHours,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }

    /// Creates a duration mismatch violation.
    pub fn duration_mismatch(match_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DurationMismatch, match_id, message, 100)
    }

    /// Creates a team overlap violation.
    pub fn team_overlap(match_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::TeamOverlap, match_id, message, 95)
    }

    /// Creates a venue conflict violation.
    pub fn venue_conflict(match_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::VenueConflict, match_id, message, 90)
    }

    /// Creates a rest period violation.
    pub fn rest_period(match_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::RestPeriod, match_id, message, 60)
    }

    /// Creates an outside-venue-hours violation.
    pub fn outside_venue_hours(match_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ViolationType::OutsideVenueHours, match_id, message, 40)
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing list of matches.
    pub fn from_matches(matches: Vec<Match>) -> Self {
        Self { matches }
    }

    /// Adds a match.
    pub fn add_match(&mut self, m: Match) {
        self.matches.push(m);
    }

    /// Finds a match by ID.
    pub fn find_match(&self, id: &str) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    /// Finds a match by ID for mutation.
    pub fn find_match_mut(&mut self, id: &str) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Index of a match in `matches`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    /// Index lookup table for every match ID.
    pub fn index_by_id(&self) -> HashMap<String, usize> {
        self.matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect()
    }

    /// Match IDs sorted by start time; ties keep insertion order.
    pub fn chronological_ids(&self) -> Vec<String> {
        let mut refs: Vec<&Match> = self.matches.iter().collect();
        refs.sort_by_key(|m| m.start_time);
        refs.into_iter().map(|m| m.id.clone()).collect()
    }

    /// Returns all entries on a given stage.
    pub fn matches_for_game(&self, game_type: GameType) -> Vec<&Match> {
        self.matches
            .iter()
            .filter(|m| m.game_type == game_type)
            .collect()
    }

    /// Returns all entries involving a given team.
    pub fn matches_for_team(&self, team_id: u32) -> Vec<&Match> {
        self.matches.iter().filter(|m| m.involves(team_id)).collect()
    }

    /// Earliest start across all entries.
    pub fn first_start(&self) -> Option<NaiveDateTime> {
        self.matches.iter().map(|m| m.start_time).min()
    }

    /// Latest end across all entries.
    pub fn last_end(&self) -> Option<NaiveDateTime> {
        self.matches.iter().map(|m| m.end_time).max()
    }

    /// Minutes from first start to last end (0 when empty).
    pub fn span_minutes(&self) -> i64 {
        match (self.first_start(), self.last_end()) {
            (Some(start), Some(end)) => (end - start).num_minutes(),
            _ => 0,
        }
    }

    /// Number of entries (matches and fixed events).
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
