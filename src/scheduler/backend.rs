//! Scheduling backends.
//!
//! A backend turns requests into schedules. [`LocalBackend`] runs this
//! crate's algorithms in-process; other implementations (a remote solver,
//! a cached service) plug in behind the same trait, and callers fall back
//! to the local one when they fail.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{adjust_schedule, generate_schedule, AdjustedSchedule};
use crate::error::Result;
use crate::models::{Disruption, FixedEvent, Schedule, Team, TournamentConfig};

/// Input for schedule generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Tournament settings.
    #[serde(default)]
    pub tournament: TournamentConfig,
    /// Participating teams.
    pub teams: Vec<Team>,
    /// Fixed events to place first.
    #[serde(default)]
    pub fixed_events: Vec<FixedEvent>,
    /// Match ids to pin as finals.
    #[serde(default)]
    pub finals_matches: Vec<String>,
}

impl GenerateRequest {
    /// Creates a request without fixed events or finals.
    pub fn new(tournament: TournamentConfig, teams: Vec<Team>) -> Self {
        Self {
            tournament,
            teams,
            fixed_events: Vec::new(),
            finals_matches: Vec::new(),
        }
    }

    /// Sets the fixed events.
    pub fn with_fixed_events(mut self, events: Vec<FixedEvent>) -> Self {
        self.fixed_events = events;
        self
    }

    /// Sets the finals match ids.
    pub fn with_finals(mut self, finals: Vec<String>) -> Self {
        self.finals_matches = finals;
        self
    }

    /// Parses a request from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Input for schedule adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustRequest {
    /// Tournament settings.
    #[serde(default)]
    pub tournament: TournamentConfig,
    /// The baseline schedule.
    pub schedule: Schedule,
    /// Disruptions to apply.
    #[serde(default)]
    pub disruptions: Vec<Disruption>,
}

impl AdjustRequest {
    /// Creates a request.
    pub fn new(tournament: TournamentConfig, schedule: Schedule, disruptions: Vec<Disruption>) -> Self {
        Self {
            tournament,
            schedule,
            disruptions,
        }
    }

    /// Parses a request from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// A source of generated and adjusted schedules.
pub trait SchedulingBackend: Send + Sync + fmt::Debug {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Builds a baseline schedule.
    fn generate(&self, request: &GenerateRequest) -> Result<Schedule>;

    /// Adjusts a baseline schedule for disruptions.
    fn adjust(&self, request: &AdjustRequest) -> Result<AdjustedSchedule>;
}

/// In-process backend running this crate's algorithms.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl SchedulingBackend for LocalBackend {
    fn name(&self) -> &str {
        "local"
    }

    fn generate(&self, request: &GenerateRequest) -> Result<Schedule> {
        generate_schedule(
            &request.tournament,
            &request.teams,
            &request.fixed_events,
            &request.finals_matches,
        )
    }

    fn adjust(&self, request: &AdjustRequest) -> Result<AdjustedSchedule> {
        adjust_schedule(&request.tournament, &request.schedule, &request.disruptions)
    }
}
