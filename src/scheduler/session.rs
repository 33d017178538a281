//! Per-tournament scheduling session.
//!
//! A [`SchedulerSession`] owns everything one tournament's operators work
//! with: config, teams, the generated baseline, the disruption log and the
//! latest adjustment. Sessions are plain values; callers that share one
//! across threads serialize access themselves.

use tracing::{info, warn};

use super::kpi::AdjustmentMetrics;
use super::{AdjustRequest, AdjustedSchedule, GenerateRequest, LocalBackend, SchedulingBackend};
use crate::error::{Result, ScheduleError};
use crate::models::{
    Disruption, DisruptionKind, DisruptionLog, FixedEvent, Registration, Schedule, Team,
    TournamentConfig,
};

/// Scheduling state for one tournament.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tourney_schedule::models::{DisruptionKind, GameTrack, GameType, PreferredPeriod, Team, TournamentConfig};
/// use tourney_schedule::scheduler::SchedulerSession;
///
/// let config = TournamentConfig::new("t1", "Campus Cup")
///     .with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
///     .with_games(vec![GameTrack::new(GameType::MobileLegends, 20, 30, PreferredPeriod::Morning)]);
/// let teams: Vec<Team> = (1..=4)
///     .map(|i| Team::new(i, format!("T{i}"), GameType::MobileLegends))
///     .collect();
///
/// let mut session = SchedulerSession::new(config, teams);
/// session.generate(&[], &[]).unwrap();
/// session.register_disruption("M1", DisruptionKind::ExtendedDuration, 10, None).unwrap();
/// let adjusted = session.adjust().unwrap();
/// assert_eq!(adjusted.applied, vec!["D1"]);
/// ```
#[derive(Debug)]
pub struct SchedulerSession {
    config: TournamentConfig,
    teams: Vec<Team>,
    baseline: Option<Schedule>,
    disruptions: DisruptionLog,
    adjusted: Option<AdjustedSchedule>,
    backend: Option<Box<dyn SchedulingBackend>>,
}

impl SchedulerSession {
    /// Creates a session using the local backend.
    pub fn new(config: TournamentConfig, teams: Vec<Team>) -> Self {
        Self {
            config,
            teams,
            baseline: None,
            disruptions: DisruptionLog::new(),
            adjusted: None,
            backend: None,
        }
    }

    /// Routes generation and adjustment through an external backend first.
    pub fn with_backend(mut self, backend: Box<dyn SchedulingBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Tournament settings.
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    /// Participating teams.
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// The baseline schedule, once generated or loaded.
    pub fn schedule(&self) -> Option<&Schedule> {
        self.baseline.as_ref()
    }

    /// The latest adjustment.
    pub fn adjusted(&self) -> Option<&AdjustedSchedule> {
        self.adjusted.as_ref()
    }

    /// Registered disruptions.
    pub fn disruptions(&self) -> &DisruptionLog {
        &self.disruptions
    }

    /// Generates a new baseline; clears disruptions and any adjustment.
    pub fn generate(&mut self, fixed_events: &[FixedEvent], finals: &[String]) -> Result<&Schedule> {
        let request = GenerateRequest::new(self.config.clone(), self.teams.clone())
            .with_fixed_events(fixed_events.to_vec())
            .with_finals(finals.to_vec());

        let schedule = match &self.backend {
            Some(backend) => backend.generate(&request).or_else(|err| {
                warn!(backend = backend.name(), error = %err, "backend generate failed, using local scheduler");
                LocalBackend.generate(&request)
            })?,
            None => LocalBackend.generate(&request)?,
        };

        info!(tournament = %self.config.id, matches = schedule.match_count(), "baseline ready");
        self.disruptions.clear();
        self.adjusted = None;
        let stored = self.baseline.insert(schedule);
        Ok(&*stored)
    }

    /// Installs an existing baseline (e.g. one loaded from storage).
    pub fn load_schedule(&mut self, schedule: Schedule) {
        self.disruptions.clear();
        self.adjusted = None;
        self.baseline = Some(schedule);
    }

    /// Records a disruption against a baseline match.
    ///
    /// # Errors
    /// - [`ScheduleError::NoSchedule`] before a baseline exists.
    /// - [`ScheduleError::UnknownMatch`] if the match is not in the baseline.
    /// - [`ScheduleError::InvalidDisruption`] for zero minutes.
    pub fn register_disruption(
        &mut self,
        match_id: &str,
        kind: DisruptionKind,
        minutes: u32,
        description: Option<String>,
    ) -> Result<Registration> {
        let baseline = self.baseline.as_ref().ok_or(ScheduleError::NoSchedule)?;
        if baseline.find_match(match_id).is_none() {
            return Err(ScheduleError::UnknownMatch(match_id.to_string()));
        }
        self.disruptions.register(match_id, kind, minutes, description)
    }

    /// Removes a disruption; the next [`adjust`](Self::adjust) no longer sees it.
    pub fn remove_disruption(&mut self, id: &str) -> Option<Disruption> {
        self.disruptions.remove(id)
    }

    /// Recomputes the adjustment from the baseline and every registered disruption.
    ///
    /// # Errors
    /// [`ScheduleError::NoSchedule`] before a baseline exists;
    /// [`ScheduleError::EmptySchedule`] if the baseline has no matches.
    pub fn adjust(&mut self) -> Result<&AdjustedSchedule> {
        let baseline = self.baseline.as_ref().ok_or(ScheduleError::NoSchedule)?;
        let request = AdjustRequest::new(
            self.config.clone(),
            baseline.clone(),
            self.disruptions.as_slice().to_vec(),
        );

        let adjusted = match &self.backend {
            Some(backend) => backend.adjust(&request).or_else(|err| {
                warn!(backend = backend.name(), error = %err, "backend adjust failed, using local scheduler");
                LocalBackend.adjust(&request)
            })?,
            None => LocalBackend.adjust(&request)?,
        };
        let stored = self.adjusted.insert(adjusted);
        Ok(&*stored)
    }

    /// Baseline vs latest adjustment (or vs itself before any adjustment).
    pub fn metrics(&self) -> Result<AdjustmentMetrics> {
        let baseline = self.baseline.as_ref().ok_or(ScheduleError::NoSchedule)?;
        let current = self.adjusted.as_ref().map_or(baseline, |a| &a.schedule);
        Ok(AdjustmentMetrics::compare(baseline, current, self.disruptions.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameTrack, GameType, PreferredPeriod};
    use crate::scheduler::adjust_schedule;
    use chrono::NaiveDate;

    fn session() -> SchedulerSession {
        let config = TournamentConfig::new("t1", "Cup")
            .with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .with_games(vec![GameTrack::new(
                GameType::MobileLegends,
                20,
                30,
                PreferredPeriod::Morning,
            )]);
        let teams = (1..=4)
            .map(|i| Team::new(i, format!("T{i}"), GameType::MobileLegends))
            .collect();
        SchedulerSession::new(config, teams)
    }

    #[derive(Debug)]
    struct OfflineBackend;

    impl SchedulingBackend for OfflineBackend {
        fn name(&self) -> &str {
            "offline"
        }

        fn generate(&self, _request: &GenerateRequest) -> Result<Schedule> {
            Err(ScheduleError::Backend("connection refused".into()))
        }

        fn adjust(&self, _request: &AdjustRequest) -> Result<AdjustedSchedule> {
            Err(ScheduleError::Backend("connection refused".into()))
        }
    }

    #[test]
    fn test_operations_before_generate() {
        let mut s = session();
        assert!(matches!(s.adjust(), Err(ScheduleError::NoSchedule)));
        assert!(matches!(
            s.register_disruption("M1", DisruptionKind::LateArrival, 5, None),
            Err(ScheduleError::NoSchedule)
        ));
        assert!(s.metrics().is_err());
    }

    #[test]
    fn test_register_unknown_match() {
        let mut s = session();
        s.generate(&[], &[]).unwrap();
        let err = s
            .register_disruption("M42", DisruptionKind::LateArrival, 5, None)
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownMatch(id) if id == "M42"));
    }

    #[test]
    fn test_adjust_always_from_baseline() {
        let mut s = session();
        s.generate(&[], &[]).unwrap();
        s.register_disruption("M1", DisruptionKind::ExtendedDuration, 10, None)
            .unwrap();
        let first = s.adjust().unwrap().clone();
        let again = s.adjust().unwrap().clone();
        assert_eq!(first, again);

        s.remove_disruption("D1").unwrap();
        let cleared = s.adjust().unwrap().clone();
        assert!(cleared.changes.is_empty());
        assert_eq!(&cleared.schedule, s.schedule().unwrap());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut s = session();
        s.generate(&[], &[]).unwrap();
        let a = s
            .register_disruption("M2", DisruptionKind::LateArrival, 5, None)
            .unwrap();
        let b = s
            .register_disruption("M2", DisruptionKind::LateArrival, 5, None)
            .unwrap();
        assert!(a.is_added());
        assert_eq!(b, Registration::Duplicate("D1".into()));
        assert_eq!(s.disruptions().len(), 1);
    }

    #[test]
    fn test_backend_failure_falls_back_to_local() {
        let mut local = session();
        let mut remote = session().with_backend(Box::new(OfflineBackend));

        let expected = local.generate(&[], &[]).unwrap().clone();
        assert_eq!(remote.generate(&[], &[]).unwrap(), &expected);

        for s in [&mut local, &mut remote] {
            s.register_disruption("M1", DisruptionKind::LateArrival, 15, None)
                .unwrap();
        }
        let want = local.adjust().unwrap().clone();
        assert_eq!(remote.adjust().unwrap(), &want);
        assert_eq!(
            want,
            adjust_schedule(local.config(), &expected, local.disruptions().as_slice()).unwrap()
        );
    }

    #[test]
    fn test_metrics() {
        let mut s = session();
        s.generate(&[], &[]).unwrap();
        let idle = s.metrics().unwrap();
        assert_eq!(idle.moved_matches, 0);
        assert_eq!(idle.disruption_score, 0.0);

        s.register_disruption("M1", DisruptionKind::ExtendedDuration, 10, None)
            .unwrap();
        s.adjust().unwrap();
        let m = s.metrics().unwrap();
        assert!(m.moved_matches >= 1);
        assert!((m.disruption_score - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_regenerate_clears_disruptions() {
        let mut s = session();
        s.generate(&[], &[]).unwrap();
        s.register_disruption("M1", DisruptionKind::EarlyFinish, 5, None)
            .unwrap();
        s.adjust().unwrap();
        s.generate(&[], &[]).unwrap();
        assert!(s.disruptions().is_empty());
        assert!(s.adjusted().is_none());
    }
}
