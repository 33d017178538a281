//! Match (fixture) model.
//!
//! A match is the smallest schedulable unit: two teams on one game stage
//! for a contiguous block of minutes. Breaks and other venue-fixed events
//! are represented as matches flagged `is_break` / `is_fixed_time` so the
//! whole day lives in one timeline.
//!
//! # Invariant
//! `end_time == start_time + duration`. All mutators go through
//! [`Match::set_start`] and [`Match::set_duration`], which keep it while the
//! end is representable and saturate at chrono's range otherwise.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::{GameType, Team};

/// A scheduled match or fixed event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Unique match identifier (`M1`, `E1`, ...).
    pub id: String,
    /// First team.
    pub team1: Team,
    /// Second team.
    pub team2: Team,
    /// Game (and therefore stage) of this match.
    pub game_type: GameType,
    /// Bracket round (0 for fixed events).
    #[serde(default)]
    pub round_number: u32,
    /// Length in minutes.
    pub duration: i64,
    /// Scheduled start.
    #[serde(with = "timestamp::iso8601")]
    pub start_time: NaiveDateTime,
    /// Scheduled end (start + duration).
    #[serde(with = "timestamp::iso8601")]
    pub end_time: NaiveDateTime,
    /// Venue-fixed timing; never moved or resized by adjustment.
    #[serde(default)]
    pub is_fixed_time: bool,
    /// Break (lunch, ceremony); never moved or resized by adjustment.
    #[serde(default)]
    pub is_break: bool,
    /// Round label ("First Round", "Semifinals", ...).
    #[serde(default)]
    pub bracket_type: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl Match {
    /// Creates a match; `end_time` is derived from `start_time + duration`.
    pub fn new(
        id: impl Into<String>,
        team1: Team,
        team2: Team,
        game_type: GameType,
        duration: i64,
        start_time: NaiveDateTime,
    ) -> Self {
        Self {
            id: id.into(),
            team1,
            team2,
            game_type,
            round_number: 1,
            duration,
            start_time,
            end_time: timestamp::saturating_add_minutes(start_time, duration),
            is_fixed_time: false,
            is_break: false,
            bracket_type: String::new(),
            description: String::new(),
        }
    }

    /// Sets the round number.
    pub fn with_round(mut self, round_number: u32) -> Self {
        self.round_number = round_number;
        self
    }

    /// Sets the round label.
    pub fn with_bracket_type(mut self, bracket_type: impl Into<String>) -> Self {
        self.bracket_type = bracket_type.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the match as venue-fixed.
    pub fn fixed(mut self) -> Self {
        self.is_fixed_time = true;
        self
    }

    /// Marks the entry as a fixed break.
    pub fn as_break(mut self) -> Self {
        self.is_fixed_time = true;
        self.is_break = true;
        self
    }

    /// Whether adjustment must leave this entry untouched.
    #[inline]
    pub fn is_immovable(&self) -> bool {
        self.is_fixed_time || self.is_break
    }

    /// Moves the match, keeping its duration.
    pub fn set_start(&mut self, start_time: NaiveDateTime) {
        self.start_time = start_time;
        self.end_time = timestamp::saturating_add_minutes(start_time, self.duration);
    }

    /// Resizes the match, keeping its start.
    pub fn set_duration(&mut self, duration: i64) {
        self.duration = duration;
        self.end_time = timestamp::saturating_add_minutes(self.start_time, duration);
    }

    /// Re-derives `end_time` from start and duration.
    ///
    /// Returns `true` if the stored end time was inconsistent.
    pub fn sync_end_time(&mut self) -> bool {
        let expected = timestamp::saturating_add_minutes(self.start_time, self.duration);
        let stale = self.end_time != expected;
        self.end_time = expected;
        stale
    }

    /// `start_time + duration`, or `None` when out of range.
    pub fn derived_end(&self) -> Option<NaiveDateTime> {
        timestamp::add_minutes(self.start_time, self.duration)
    }

    /// Whether `end_time == start_time + duration`.
    pub fn is_consistent(&self) -> bool {
        self.derived_end() == Some(self.end_time)
    }

    /// Both teams.
    pub fn teams(&self) -> [&Team; 2] {
        [&self.team1, &self.team2]
    }

    /// Whether this match involves the given team id.
    pub fn involves(&self, team_id: u32) -> bool {
        self.team1.id == team_id || self.team2.id == team_id
    }

    /// Whether the two matches share at least one team (by id).
    pub fn shares_team(&self, other: &Match) -> bool {
        other.involves(self.team1.id) || other.involves(self.team2.id)
    }

    /// Whether the two matches constrain each other: shared team or shared stage.
    pub fn is_related(&self, other: &Match) -> bool {
        self.game_type == other.game_type || self.shares_team(other)
    }

    /// Whether the half-open intervals `[start, end)` intersect.
    pub fn overlaps(&self, other: &Match) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }

    /// Minutes from `earlier`'s end to this match's start (negative on overlap).
    pub fn gap_after(&self, earlier: &Match) -> i64 {
        (self.start_time - earlier.end_time).num_minutes()
    }
}

/// A pairing to be placed on the timeline by the allocator.
///
/// Produced by a bracket generator; the allocator only assigns times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPair {
    /// First team.
    pub team1: Team,
    /// Second team.
    pub team2: Team,
    /// Bracket round.
    pub round_number: u32,
    /// Round label.
    #[serde(default)]
    pub bracket_type: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

impl MatchPair {
    /// Creates a pairing.
    pub fn new(team1: Team, team2: Team, round_number: u32) -> Self {
        Self {
            team1,
            team2,
            round_number,
            bracket_type: String::new(),
            description: String::new(),
        }
    }

    /// Sets the round label.
    pub fn with_bracket_type(mut self, bracket_type: impl Into<String>) -> Self {
        self.bracket_type = bracket_type.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
