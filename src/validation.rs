//! Input validation and schedule checks.
//!
//! Input checks run before generation and collect every problem instead of
//! stopping at the first:
//! - Config: enabled games, duration ranges, venue hours, buffers, period clashes
//! - Teams: duplicate ids, unknown or disabled games, bracket-sized rosters
//!
//! [`check_schedule`] is a read-only sweep over a finished schedule that
//! reports rule violations without repairing anything.

use std::collections::{HashMap, HashSet};

use crate::models::{GameType, PreferredPeriod, Schedule, Team, TournamentConfig, Violation};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// Smallest roster a game may have.
const MIN_TEAMS_PER_GAME: usize = 2;
/// Largest roster a game may have.
const MAX_TEAMS_PER_GAME: usize = 16;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two teams share the same ID.
    DuplicateId,
    /// No game is enabled.
    NoEnabledGame,
    /// A game is configured more than once.
    DuplicateGame,
    /// A duration range is empty or non-positive.
    InvalidDuration,
    /// Venue closes at or before opening.
    InvalidVenueHours,
    /// Rest period or setup buffer is negative.
    NegativeBuffer,
    /// Two enabled games prefer the same half of the day.
    PeriodClash,
    /// A team plays a game that is not enabled.
    GameNotEnabled,
    /// A game's roster is not a bracket size.
    InvalidTeamCount,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates tournament settings.
///
/// Checks:
/// 1. At least one game is enabled
/// 2. No game is listed twice
/// 3. Every duration range satisfies `1 <= min <= max`
/// 4. Venue opens before it closes
/// 5. Rest period and setup buffer are not negative
/// 6. No two enabled games share a morning or afternoon preference
pub fn validate_config(config: &TournamentConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.enabled_tracks().next().is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoEnabledGame,
            "At least one game must be enabled",
        ));
    }

    let mut seen = HashSet::new();
    for track in &config.games {
        if !seen.insert(track.game_type) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateGame,
                format!("Game {} is configured more than once", track.game_type),
            ));
        }
        let range = track.duration_range;
        if range.min < 1 || range.min > range.max {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Game {} has invalid duration range {}-{} min",
                    track.game_type, range.min, range.max
                ),
            ));
        }
    }

    if config.venue_hours.open() >= config.venue_hours.close() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidVenueHours,
            format!(
                "Venue opens at {} but closes at {}",
                config.venue_hours.open().format("%H:%M"),
                config.venue_hours.close().format("%H:%M")
            ),
        ));
    }

    if config.rest_period < 0 || config.setup_buffer < 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeBuffer,
            format!(
                "Rest period ({}) and setup buffer ({}) must not be negative",
                config.rest_period, config.setup_buffer
            ),
        ));
    }

    let mut by_period: HashMap<PreferredPeriod, GameType> = HashMap::new();
    for track in config.enabled_tracks() {
        if track.period == PreferredPeriod::Wholeday {
            continue;
        }
        if let Some(other) = by_period.insert(track.period, track.game_type) {
            if other != track.game_type {
                errors.push(ValidationError::new(
                    ValidationErrorKind::PeriodClash,
                    format!(
                        "Games {} and {} both prefer the {:?} period",
                        other, track.game_type, track.period
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates the team list against the config.
///
/// Checks:
/// 1. No duplicate team IDs
/// 2. Every team plays an enabled game
/// 3. Every enabled game has a power-of-two roster between 2 and 16
pub fn validate_teams(config: &TournamentConfig, teams: &[Team]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for team in teams {
        if !ids.insert(team.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate team ID: {}", team.id),
            ));
        }
        if !config.is_enabled(team.game_type) {
            errors.push(ValidationError::new(
                ValidationErrorKind::GameNotEnabled,
                format!(
                    "Team '{}' plays {}, which is not enabled",
                    team.name, team.game_type
                ),
            ));
        }
    }

    for track in config.enabled_tracks() {
        let count = teams.iter().filter(|t| t.game_type == track.game_type).count();
        if !(MIN_TEAMS_PER_GAME..=MAX_TEAMS_PER_GAME).contains(&count) || !count.is_power_of_two() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidTeamCount,
                format!(
                    "Game {} has {} teams; expected 2, 4, 8 or 16",
                    track.game_type, count
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Runs every input check, collecting all errors.
pub fn validate_input(config: &TournamentConfig, teams: &[Team]) -> ValidationResult {
    let mut errors = Vec::new();
    if let Err(mut e) = validate_config(config) {
        errors.append(&mut e);
    }
    if let Err(mut e) = validate_teams(config, teams) {
        errors.append(&mut e);
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reports rule violations in a schedule. Fixed events and breaks are exempt.
///
/// - `DurationMismatch`: end is not start + duration
/// - `TeamOverlap` / `RestPeriod`: a shared team plays overlapping matches,
///   or with less than the rest period between them
/// - `VenueConflict`: two matches on one stage closer than the setup buffer
/// - `OutsideVenueHours`: a match starts before opening or ends after closing
pub fn check_schedule(schedule: &Schedule, config: &TournamentConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let open = config.venue_start();
    let close = config.venue_end();

    let mut movable: Vec<_> = schedule.matches.iter().filter(|m| !m.is_immovable()).collect();
    movable.sort_by_key(|m| m.start_time);

    for m in &movable {
        if !m.is_consistent() {
            violations.push(Violation::duration_mismatch(
                &m.id,
                format!("{} lasts {} min but its end time disagrees", m.id, m.duration),
            ));
        }
        if m.start_time < open || m.end_time > close {
            violations.push(Violation::outside_venue_hours(
                &m.id,
                format!("{} runs {}-{}, outside venue hours", m.id, m.start_time.format("%H:%M"), m.end_time.format("%H:%M")),
            ));
        }
    }

    for (i, first) in movable.iter().enumerate() {
        for second in &movable[i + 1..] {
            let gap = second.gap_after(first);
            if first.shares_team(second) {
                if first.overlaps(second) {
                    violations.push(Violation::team_overlap(
                        &second.id,
                        format!("{} overlaps {} for a shared team", second.id, first.id),
                    ));
                } else if gap < config.rest_period {
                    violations.push(Violation::rest_period(
                        &second.id,
                        format!(
                            "{} starts {} min after {} (rest period {} min)",
                            second.id, gap, first.id, config.rest_period
                        ),
                    ));
                }
            }
            if first.game_type == second.game_type && gap < config.setup_buffer {
                violations.push(Violation::venue_conflict(
                    &second.id,
                    format!(
                        "{} starts {} min after {} on the {} stage (setup {} min)",
                        second.id, gap, first.id, first.game_type, config.setup_buffer
                    ),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameTrack, Match, VenueHours, ViolationType};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn config() -> TournamentConfig {
        TournamentConfig::default().with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
    }

    fn roster(game: GameType, ids: std::ops::RangeInclusive<u32>) -> Vec<Team> {
        ids.map(|i| Team::new(i, format!("{game}{i}"), game)).collect()
    }

    fn ml(id: &str, a: u32, b: u32, start: NaiveDateTime, dur: i64) -> Match {
        let t = |i: u32| Team::new(i, format!("T{i}"), GameType::MobileLegends);
        Match::new(id, t(a), t(b), GameType::MobileLegends, dur, start)
    }

    fn has(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&config()).is_ok());
    }

    #[test]
    fn test_no_enabled_game() {
        let cfg = config().with_games(vec![
            GameTrack::new(GameType::MobileLegends, 20, 30, PreferredPeriod::Morning).disabled(),
        ]);
        let errors = validate_config(&cfg).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::NoEnabledGame));
    }

    #[test]
    fn test_bad_ranges_and_hours() {
        let cfg = config()
            .with_games(vec![
                GameTrack::new(GameType::MobileLegends, 30, 20, PreferredPeriod::Morning),
                GameTrack::new(GameType::MobileLegends, 0, 10, PreferredPeriod::Afternoon),
            ])
            .with_venue_hours(VenueHours::from_hm((18, 0), (9, 0)))
            .with_rest_period(-1);
        let errors = validate_config(&cfg).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidDuration));
        assert!(has(&errors, ValidationErrorKind::DuplicateGame));
        assert!(has(&errors, ValidationErrorKind::InvalidVenueHours));
        assert!(has(&errors, ValidationErrorKind::NegativeBuffer));
    }

    #[test]
    fn test_period_clash() {
        let cfg = config().with_games(vec![
            GameTrack::new(GameType::MobileLegends, 20, 30, PreferredPeriod::Morning),
            GameTrack::new(GameType::Valorant, 35, 50, PreferredPeriod::Morning),
        ]);
        let errors = validate_config(&cfg).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::PeriodClash));

        // Whole-day games may share
        let ok = config().with_games(vec![
            GameTrack::new(GameType::MobileLegends, 20, 30, PreferredPeriod::Wholeday),
            GameTrack::new(GameType::Valorant, 35, 50, PreferredPeriod::Wholeday),
        ]);
        assert!(validate_config(&ok).is_ok());
    }

    #[test]
    fn test_valid_teams() {
        let mut teams = roster(GameType::MobileLegends, 1..=4);
        teams.extend(roster(GameType::Valorant, 5..=12));
        assert!(validate_teams(&config(), &teams).is_ok());
    }

    #[test]
    fn test_duplicate_team_id() {
        let mut teams = roster(GameType::MobileLegends, 1..=2);
        teams.extend(roster(GameType::Valorant, 2..=3));
        let errors = validate_teams(&config(), &teams).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_team_count_and_disabled_game() {
        let cfg = config().with_games(vec![GameTrack::new(
            GameType::MobileLegends,
            20,
            30,
            PreferredPeriod::Morning,
        )]);
        let mut teams = roster(GameType::MobileLegends, 1..=6);
        teams.push(Team::new(7, "Stray", GameType::Valorant));
        let errors = validate_teams(&cfg, &teams).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidTeamCount));
        assert!(has(&errors, ValidationErrorKind::GameNotEnabled));
    }

    #[test]
    fn test_validate_input_collects_all() {
        let cfg = config().with_setup_buffer(-5);
        let errors = validate_input(&cfg, &roster(GameType::MobileLegends, 1..=3)).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::NegativeBuffer));
        assert!(has(&errors, ValidationErrorKind::InvalidTeamCount));
        assert!(errors.len() >= 3); // ML has 3, Val has 0
    }

    #[test]
    fn test_check_clean_schedule() {
        let s = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
            ml("M3", 1, 3, at(10, 0), 20),
        ]);
        assert!(check_schedule(&s, &config()).is_empty());
    }

    #[test]
    fn test_check_reports_each_rule() {
        let mut stale = ml("M4", 7, 8, at(17, 50), 20);
        stale.end_time = at(18, 20);
        let s = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 1, 3, at(9, 10), 20),
            ml("M3", 2, 5, at(9, 30), 20),
            stale,
        ]);
        let kinds: Vec<ViolationType> = check_schedule(&s, &config())
            .into_iter()
            .map(|v| v.violation_type)
            .collect();
        assert!(kinds.contains(&ViolationType::TeamOverlap));
        assert!(kinds.contains(&ViolationType::VenueConflict));
        assert!(kinds.contains(&ViolationType::RestPeriod));
        assert!(kinds.contains(&ViolationType::DurationMismatch));
        assert!(kinds.contains(&ViolationType::OutsideVenueHours));
    }

    #[test]
    fn test_check_ignores_fixed_events() {
        let s = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("E1", 0, 0, at(9, 10), 60).as_break(),
        ]);
        assert!(check_schedule(&s, &config()).is_empty());
    }
}
