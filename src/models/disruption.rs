//! Disruption records and the per-tournament disruption log.
//!
//! A disruption is a real-world deviation observed on one match. The log
//! hands out `D1, D2, …` identifiers and rejects a second registration of
//! the same `(match, kind, minutes)` triple.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::{Result, ScheduleError};

/// What happened to the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionKind {
    /// The match ran longer than planned.
    ExtendedDuration,
    /// A team arrived late; the match starts later.
    LateArrival,
    /// The match finished earlier than planned.
    EarlyFinish,
}

impl DisruptionKind {
    /// Wire name (`extended_duration`, …).
    pub fn as_str(&self) -> &'static str {
        match self {
            DisruptionKind::ExtendedDuration => "extended_duration",
            DisruptionKind::LateArrival => "late_arrival",
            DisruptionKind::EarlyFinish => "early_finish",
        }
    }

    /// Whether this kind pushes later matches back.
    pub fn delays(&self) -> bool {
        !matches!(self, DisruptionKind::EarlyFinish)
    }
}

impl fmt::Display for DisruptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A disruption recorded against one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disruption {
    /// Disruption identifier (`D1`, …).
    pub id: String,
    /// Target match.
    pub match_id: String,
    /// Kind of deviation.
    #[serde(rename = "type")]
    pub kind: DisruptionKind,
    /// Magnitude in minutes (positive).
    pub extra_minutes: u32,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

impl Disruption {
    /// Creates a disruption with the default description.
    pub fn new(
        id: impl Into<String>,
        match_id: impl Into<String>,
        kind: DisruptionKind,
        extra_minutes: u32,
    ) -> Self {
        let match_id = match_id.into();
        let description = default_description(&match_id, kind, extra_minutes);
        Self {
            id: id.into(),
            match_id,
            kind,
            extra_minutes,
            description,
        }
    }

    /// Replaces the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Magnitude as signed minutes for time arithmetic.
    #[inline]
    pub fn minutes(&self) -> i64 {
        i64::from(self.extra_minutes)
    }

    /// The `(match, kind, minutes)` key used for duplicate detection.
    pub fn same_event(&self, other: &Disruption) -> bool {
        self.match_id == other.match_id
            && self.kind == other.kind
            && self.extra_minutes == other.extra_minutes
    }
}

/// Description used when the caller does not supply one.
pub fn default_description(match_id: &str, kind: DisruptionKind, minutes: u32) -> String {
    match kind {
        DisruptionKind::ExtendedDuration => {
            format!("Match {match_id} ran {minutes} minutes longer than expected.")
        }
        DisruptionKind::LateArrival => {
            format!("Team arrived {minutes} minutes late for match {match_id}.")
        }
        DisruptionKind::EarlyFinish => {
            format!("Match {match_id} finished {minutes} minutes earlier than expected.")
        }
    }
}

/// Outcome of [`DisruptionLog::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// Stored under the new ID.
    Added(String),
    /// An identical disruption already exists under this ID.
    Duplicate(String),
}

impl Registration {
    /// The ID of the stored disruption, new or existing.
    pub fn id(&self) -> &str {
        match self {
            Registration::Added(id) | Registration::Duplicate(id) => id,
        }
    }

    /// Whether this call added a new record.
    pub fn is_added(&self) -> bool {
        matches!(self, Registration::Added(_))
    }
}

/// Ordered set of disruptions for one tournament.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisruptionLog {
    entries: Vec<Disruption>,
    next_seq: u32,
}

impl DisruptionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a disruption.
    ///
    /// Returns [`Registration::Duplicate`] without storing anything when the
    /// same `(match_id, kind, minutes)` is already present.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidDisruption`] if `minutes` is zero.
    pub fn register(
        &mut self,
        match_id: impl Into<String>,
        kind: DisruptionKind,
        minutes: u32,
        description: Option<String>,
    ) -> Result<Registration> {
        let match_id = match_id.into();
        if minutes == 0 {
            return Err(ScheduleError::InvalidDisruption(format!(
                "{kind} on {match_id} must be at least one minute"
            )));
        }

        if let Some(existing) = self
            .entries
            .iter()
            .find(|d| d.match_id == match_id && d.kind == kind && d.extra_minutes == minutes)
        {
            debug!(match_id = %match_id, kind = %kind, minutes, existing = %existing.id, "duplicate disruption ignored");
            return Ok(Registration::Duplicate(existing.id.clone()));
        }

        self.next_seq += 1;
        let id = format!("D{}", self.next_seq);
        let mut disruption = Disruption::new(id.clone(), match_id, kind, minutes);
        if let Some(text) = description.filter(|t| !t.trim().is_empty()) {
            disruption.description = text;
        }
        debug!(id = %id, match_id = %disruption.match_id, kind = %kind, minutes, "disruption registered");
        self.entries.push(disruption);
        Ok(Registration::Added(id))
    }

    /// Removes a disruption by ID; returns it if present.
    pub fn remove(&mut self, id: &str) -> Option<Disruption> {
        let pos = self.entries.iter().position(|d| d.id == id)?;
        Some(self.entries.remove(pos))
    }

    /// Looks up a disruption by ID.
    pub fn get(&self, id: &str) -> Option<&Disruption> {
        self.entries.iter().find(|d| d.id == id)
    }

    /// Disruptions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Disruption> {
        self.entries.iter()
    }

    /// Disruptions as a slice, in registration order.
    pub fn as_slice(&self) -> &[Disruption] {
        &self.entries
    }

    /// Number of stored disruptions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every disruption. IDs keep counting from where they were.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
