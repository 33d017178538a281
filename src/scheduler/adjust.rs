//! Disruption-driven schedule adjustment.
//!
//! # Algorithm
//!
//! 1. Clone the baseline (never mutated) and re-derive every end time. A
//!    duration below one minute or past chrono's range is clamped first.
//! 2. Capture the baseline's chronological order.
//! 3. Order disruptions by their match's baseline position, then by
//!    submission order. Unknown matches, fixed events, zero-minute and
//!    out-of-range edits, and repeated `(match, kind, minutes)` records are
//!    skipped and reported.
//! 4. For each disruption: apply it, then either push later related
//!    matches back (extended duration, late arrival) or pull them forward
//!    (early finish). No match is pulled before its floor: its baseline
//!    start, or its delayed start after a late arrival.
//! 5. Enforce stage exclusivity, reset any undisrupted match that ended up
//!    before its baseline start, then run the sequence validator last.
//!
//! Adjustment is a pure function of `(config, baseline, disruptions)`:
//! calling it again with a longer disruption list recomputes from the
//! baseline instead of building on a previous result.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

use super::applicator::{self, MAX_MATCH_MINUTES};
use super::{PropagationEngine, SequenceValidator};
use crate::error::{Result, ScheduleError};
use crate::models::timestamp;
use crate::models::{Disruption, DisruptionKind, Schedule, TournamentConfig};

/// Why a disruption was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No match with that id in the schedule.
    UnknownMatch,
    /// The match is a fixed event or break.
    FixedEvent,
    /// An identical disruption was already applied.
    Duplicate,
    /// `extraMinutes` is 0.
    ZeroMinutes,
    /// The edited times fall outside the representable range.
    OutOfRange,
}

/// A disruption that was left out of the adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedDisruption {
    /// Disruption id.
    pub disruption_id: String,
    /// Target match id.
    pub match_id: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Timing difference of one match against the baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchChange {
    /// Match id.
    pub match_id: String,
    /// Baseline start.
    #[serde(with = "timestamp::iso8601")]
    pub original_start: NaiveDateTime,
    /// Adjusted start.
    #[serde(with = "timestamp::iso8601")]
    pub adjusted_start: NaiveDateTime,
    /// Baseline duration (minutes).
    pub original_duration: i64,
    /// Adjusted duration (minutes).
    pub adjusted_duration: i64,
}

impl MatchChange {
    /// Start shift in minutes (positive = later).
    pub fn delay_minutes(&self) -> i64 {
        (self.adjusted_start - self.original_start).num_minutes()
    }
}

/// Result of [`adjust_schedule`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustedSchedule {
    /// The repaired schedule.
    pub schedule: Schedule,
    /// Ids of applied disruptions, in application order.
    pub applied: Vec<String>,
    /// Disruptions that were not applied.
    pub skipped: Vec<SkippedDisruption>,
    /// Matches whose start or duration differs from the baseline.
    pub changes: Vec<MatchChange>,
}

impl AdjustedSchedule {
    /// Whether a disruption was applied.
    pub fn was_applied(&self, disruption_id: &str) -> bool {
        self.applied.iter().any(|id| id == disruption_id)
    }

    /// Change record for a match, if its timing changed.
    pub fn change_for(&self, match_id: &str) -> Option<&MatchChange> {
        self.changes.iter().find(|c| c.match_id == match_id)
    }
}

/// Adjusts `baseline` for `disruptions`.
///
/// # Errors
/// [`ScheduleError::EmptySchedule`] if the baseline has no matches. Every
/// per-disruption problem is reported in [`AdjustedSchedule::skipped`]
/// instead of failing the batch.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tourney_schedule::models::{Disruption, DisruptionKind, GameType, Match, Schedule, Team, TournamentConfig};
/// use tourney_schedule::scheduler::adjust_schedule;
///
/// let at = |h: u32, m: u32| NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(h, m, 0).unwrap();
/// let team = |id: u32| Team::new(id, format!("T{id}"), GameType::MobileLegends);
/// let baseline = Schedule::from_matches(vec![
///     Match::new("M1", team(1), team(2), GameType::MobileLegends, 20, at(9, 0)),
///     Match::new("M2", team(3), team(4), GameType::MobileLegends, 20, at(9, 25)),
/// ]);
/// let overrun = Disruption::new("D1", "M1", DisruptionKind::ExtendedDuration, 10);
///
/// let adjusted = adjust_schedule(&TournamentConfig::default(), &baseline, &[overrun]).unwrap();
/// assert_eq!(adjusted.schedule.find_match("M2").unwrap().start_time, at(9, 35));
/// // The baseline is untouched
/// assert_eq!(baseline.find_match("M2").unwrap().start_time, at(9, 25));
/// ```
pub fn adjust_schedule(
    config: &TournamentConfig,
    baseline: &Schedule,
    disruptions: &[Disruption],
) -> Result<AdjustedSchedule> {
    if baseline.is_empty() {
        return Err(ScheduleError::EmptySchedule);
    }

    let mut reference = baseline.clone();
    for m in reference.matches.iter_mut() {
        if m.duration < 1 || m.derived_end().is_none() {
            let clamped = m.duration.clamp(1, MAX_MATCH_MINUTES);
            warn!(match_id = %m.id, duration = m.duration, clamped, "unusable duration clamped");
            m.duration = clamped;
        }
        if m.sync_end_time() {
            debug!(match_id = %m.id, "stale end time re-derived from start and duration");
        }
    }
    let mut working = reference.clone();

    let original_order = reference.chronological_ids();
    let rank: HashMap<&str, usize> = original_order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();

    let mut skipped = Vec::new();
    let mut queue: Vec<(usize, usize, &Disruption)> = Vec::with_capacity(disruptions.len());
    for (submitted, d) in disruptions.iter().enumerate() {
        match rank.get(d.match_id.as_str()) {
            Some(&r) => queue.push((r, submitted, d)),
            None => {
                warn!(disruption = %d.id, match_id = %d.match_id, "disruption targets unknown match, skipped");
                skipped.push(skip(d, SkipReason::UnknownMatch));
            }
        }
    }
    queue.sort_by_key(|&(r, submitted, _)| (r, submitted));

    let engine = PropagationEngine::from_config(config);
    let validator = SequenceValidator::from_config(config);

    let mut floors: HashMap<String, NaiveDateTime> = reference
        .matches
        .iter()
        .map(|m| (m.id.clone(), m.start_time))
        .collect();
    let mut accepted: Vec<&Disruption> = Vec::new();
    let mut applied = Vec::new();
    let mut disrupted: HashSet<String> = HashSet::new();
    let mut late_arrivals: HashSet<String> = HashSet::new();

    for (_, _, d) in queue {
        if accepted.iter().any(|a| a.same_event(d)) {
            debug!(disruption = %d.id, match_id = %d.match_id, "duplicate disruption skipped");
            skipped.push(skip(d, SkipReason::Duplicate));
            continue;
        }
        let Some(idx) = working.position(&d.match_id) else {
            skipped.push(skip(d, SkipReason::UnknownMatch));
            continue;
        };

        let before = working.matches[idx].start_time;
        let updated = match applicator::apply(&working.matches[idx], d) {
            Ok(updated) => updated,
            Err(reason) => {
                skipped.push(skip(d, reason));
                continue;
            }
        };
        working.matches[idx] = updated;
        accepted.push(d);
        applied.push(d.id.clone());
        disrupted.insert(d.match_id.clone());

        if d.kind == DisruptionKind::LateArrival {
            floors.insert(d.match_id.clone(), working.matches[idx].start_time);
            late_arrivals.insert(d.match_id.clone());
        }
        if d.kind.delays() {
            engine.propagate(&mut working, &d.match_id, before);
        } else {
            engine.pull_earlier(&mut working, &d.match_id, &floors);
        }
    }

    engine.enforce_venue_exclusivity(&mut working, &late_arrivals);
    validator.clamp_non_retreat(&mut working, &reference, &disrupted);
    validator.validate(&mut working, &original_order);

    let changes = diff(&reference, &working);
    info!(
        tournament = %config.id,
        applied = applied.len(),
        skipped = skipped.len(),
        changed = changes.len(),
        "schedule adjusted"
    );

    Ok(AdjustedSchedule {
        schedule: working,
        applied,
        skipped,
        changes,
    })
}

fn skip(d: &Disruption, reason: SkipReason) -> SkippedDisruption {
    SkippedDisruption {
        disruption_id: d.id.clone(),
        match_id: d.match_id.clone(),
        reason,
    }
}

fn diff(reference: &Schedule, adjusted: &Schedule) -> Vec<MatchChange> {
    adjusted
        .matches
        .iter()
        .filter_map(|m| {
            let orig = reference.find_match(&m.id)?;
            (orig.start_time != m.start_time || orig.duration != m.duration).then(|| MatchChange {
                match_id: m.id.clone(),
                original_start: orig.start_time,
                adjusted_start: m.start_time,
                original_duration: orig.duration,
                adjusted_duration: m.duration,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GameType, Match, Team};
    use crate::scheduler::propagation::required_gap;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ml(id: &str, a: u32, b: u32, start: NaiveDateTime, dur: i64) -> Match {
        let t = |i: u32| Team::new(i, format!("T{i}"), GameType::MobileLegends);
        Match::new(id, t(a), t(b), GameType::MobileLegends, dur, start)
    }

    fn config() -> TournamentConfig {
        TournamentConfig::default().with_rest_period(15).with_setup_buffer(5)
    }

    fn d(id: &str, match_id: &str, kind: DisruptionKind, n: u32) -> Disruption {
        Disruption::new(id, match_id, kind, n)
    }

    fn start_of(r: &AdjustedSchedule, id: &str) -> NaiveDateTime {
        r.schedule.find_match(id).unwrap().start_time
    }

    #[test]
    fn test_scenario_a_extended_duration() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[d("D1", "M1", DisruptionKind::ExtendedDuration, 10)],
        )
        .unwrap();

        let m1 = r.schedule.find_match("M1").unwrap();
        assert_eq!(m1.end_time, at(9, 30));
        let m2 = r.schedule.find_match("M2").unwrap();
        assert_eq!(m2.start_time, at(9, 35));
        assert_eq!(m2.end_time, at(9, 55));
        assert_eq!(r.change_for("M2").unwrap().delay_minutes(), 10);
    }

    #[test]
    fn test_scenario_b_late_arrival_shared_team() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 1, 3, at(9, 25), 20),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[d("D1", "M1", DisruptionKind::LateArrival, 20)],
        )
        .unwrap();

        let m1 = r.schedule.find_match("M1").unwrap();
        assert_eq!(m1.start_time, at(9, 20));
        assert_eq!(m1.end_time, at(9, 40));
        assert_eq!(start_of(&r, "M2"), at(9, 55));
    }

    #[test]
    fn test_scenario_c_early_finish_keeps_planned_start() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[d("D1", "M1", DisruptionKind::EarlyFinish, 10)],
        )
        .unwrap();

        assert_eq!(r.schedule.find_match("M1").unwrap().end_time, at(9, 10));
        assert_eq!(start_of(&r, "M2"), at(9, 25));
        assert!(r.change_for("M2").is_none());
    }

    #[test]
    fn test_early_finish_recovers_earlier_overrun() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
            ml("M3", 5, 6, at(9, 50), 20),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[
                d("D1", "M1", DisruptionKind::ExtendedDuration, 20),
                d("D2", "M2", DisruptionKind::EarlyFinish, 10),
            ],
        )
        .unwrap();
        // M1 ends 09:40, M2 09:45-09:55 after the cut, M3 back to 10:00
        assert_eq!(start_of(&r, "M2"), at(9, 45));
        assert_eq!(r.schedule.find_match("M2").unwrap().end_time, at(9, 55));
        assert_eq!(start_of(&r, "M3"), at(10, 0));
    }

    #[test]
    fn test_disruptions_follow_original_chronology() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
            ml("M3", 5, 6, at(9, 50), 20),
        ]);
        let late_m3 = d("D1", "M3", DisruptionKind::LateArrival, 10);
        let long_m1 = d("D2", "M1", DisruptionKind::ExtendedDuration, 10);

        let r = adjust_schedule(&config(), &baseline, &[late_m3.clone(), long_m1.clone()]).unwrap();
        // M1 overrun pushes M3 to 10:00 first, then the late arrival adds 10
        assert_eq!(start_of(&r, "M3"), at(10, 10));
        assert_eq!(r.applied, vec!["D2", "D1"]);

        let reordered = adjust_schedule(&config(), &baseline, &[long_m1, late_m3]).unwrap();
        assert_eq!(reordered.schedule, r.schedule);
    }

    #[test]
    fn test_skips_unknown_fixed_and_duplicate() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("E1", 0, 0, at(12, 0), 60).as_break(),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[
                d("D1", "M9", DisruptionKind::LateArrival, 5),
                d("D2", "E1", DisruptionKind::ExtendedDuration, 15),
                d("D3", "M1", DisruptionKind::ExtendedDuration, 5),
                d("D4", "M1", DisruptionKind::ExtendedDuration, 5),
            ],
        )
        .unwrap();

        assert_eq!(r.applied, vec!["D3"]);
        let reasons: Vec<_> = r.skipped.iter().map(|s| (s.disruption_id.as_str(), s.reason)).collect();
        assert!(reasons.contains(&("D1", SkipReason::UnknownMatch)));
        assert!(reasons.contains(&("D2", SkipReason::FixedEvent)));
        assert!(reasons.contains(&("D4", SkipReason::Duplicate)));
        assert_eq!(r.schedule.find_match("E1").unwrap().start_time, at(12, 0));
        assert_eq!(r.schedule.find_match("M1").unwrap().duration, 25);
    }

    #[test]
    fn test_fixed_event_never_moves() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(11, 30), 20),
            ml("E1", 0, 0, at(12, 0), 60).as_break(),
            ml("M2", 3, 4, at(11, 55), 20).fixed(),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[d("D1", "M1", DisruptionKind::ExtendedDuration, 30)],
        )
        .unwrap();
        assert_eq!(start_of(&r, "E1"), at(12, 0));
        assert_eq!(start_of(&r, "M2"), at(11, 55));
        assert_eq!(r.schedule.find_match("M2").unwrap().duration, 20);
    }

    #[test]
    fn test_empty_schedule_is_error() {
        let err = adjust_schedule(&config(), &Schedule::new(), &[]).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptySchedule));
    }

    #[test]
    fn test_stale_end_times_repaired() {
        let mut m = ml("M1", 1, 2, at(9, 0), 20);
        m.end_time = at(10, 0);
        let baseline = Schedule::from_matches(vec![m]);
        let r = adjust_schedule(&config(), &baseline, &[]).unwrap();
        assert_eq!(r.schedule.find_match("M1").unwrap().end_time, at(9, 20));
        assert!(r.changes.is_empty());
    }

    #[test]
    fn test_repeated_calls_recompute_from_baseline() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 3, 4, at(9, 25), 20),
        ]);
        let first = vec![d("D1", "M1", DisruptionKind::ExtendedDuration, 10)];
        let r1 = adjust_schedule(&config(), &baseline, &first).unwrap();
        let r1_again = adjust_schedule(&config(), &baseline, &first).unwrap();
        assert_eq!(r1, r1_again);

        let mut grown = first.clone();
        grown.push(d("D2", "M2", DisruptionKind::LateArrival, 5));
        let r2 = adjust_schedule(&config(), &baseline, &grown).unwrap();
        // 09:35 from the overrun plus 5 late, not compounded on r1
        assert_eq!(start_of(&r2, "M2"), at(9, 40));
    }

    #[test]
    fn test_unrepresentable_duration_clamped() {
        let raw = r#"[{"id": "M1", "team1": {"id": 1, "name": "A", "gameType": "ML"},
            "team2": {"id": 2, "name": "B", "gameType": "ML"}, "gameType": "ML",
            "duration": 9223372036854775807,
            "startTime": "2025-03-01T09:00:00", "endTime": "2025-03-01T09:20:00"}]"#;
        let baseline: Schedule = serde_json::from_str(raw).unwrap();
        let r = adjust_schedule(&config(), &baseline, &[]).unwrap();
        let m1 = r.schedule.find_match("M1").unwrap();
        assert_eq!(m1.duration, MAX_MATCH_MINUTES);
        assert!(m1.is_consistent());
    }

    #[test]
    fn test_stacked_huge_delays_skipped_when_out_of_range() {
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 20),
            ml("M2", 1, 3, at(9, 35), 20),
        ]);
        let delays: Vec<Disruption> = (0..40u32)
            .map(|i| d(&format!("D{}", i + 1), "M1", DisruptionKind::LateArrival, u32::MAX - i))
            .collect();
        let r = adjust_schedule(&config(), &baseline, &delays).unwrap();

        assert!(!r.applied.is_empty());
        assert!(r.skipped.iter().any(|s| s.reason == SkipReason::OutOfRange));
        assert_eq!(r.applied.len() + r.skipped.len(), 40);
        assert!(r.schedule.matches.iter().all(|m| m.is_consistent()));
        let (m1, m2) = (r.schedule.find_match("M1").unwrap(), r.schedule.find_match("M2").unwrap());
        assert!(m2.gap_after(m1) >= 15);
    }

    #[test]
    fn test_zero_minute_disruption_skipped() {
        let baseline = Schedule::from_matches(vec![ml("M1", 1, 2, at(9, 0), 20)]);
        let raw = r#"[{"id": "D1", "matchId": "M1", "type": "late_arrival", "extraMinutes": 0}]"#;
        let disruptions: Vec<Disruption> = serde_json::from_str(raw).unwrap();
        let r = adjust_schedule(&config(), &baseline, &disruptions).unwrap();
        assert!(r.applied.is_empty());
        assert_eq!(r.skipped[0].reason, SkipReason::ZeroMinutes);
        assert!(r.changes.is_empty());
    }

    #[test]
    fn test_late_arrival_shrinks_overlapping_predecessor() {
        // loaded baseline already overlaps on the ML stage
        let baseline = Schedule::from_matches(vec![
            ml("M1", 1, 2, at(9, 0), 40),
            ml("M2", 3, 4, at(9, 30), 20),
        ]);
        let r = adjust_schedule(
            &config(),
            &baseline,
            &[d("D1", "M2", DisruptionKind::LateArrival, 5)],
        )
        .unwrap();

        let m1 = r.schedule.find_match("M1").unwrap();
        assert_eq!(m1.start_time, at(9, 0));
        assert_eq!(m1.duration, 30);
        assert_eq!(start_of(&r, "M2"), at(9, 35));
        let change = r.change_for("M1").unwrap();
        assert_eq!((change.original_duration, change.adjusted_duration), (40, 30));
    }

    fn kind_of(k: u8) -> DisruptionKind {
        match k % 3 {
            0 => DisruptionKind::ExtendedDuration,
            1 => DisruptionKind::LateArrival,
            _ => DisruptionKind::EarlyFinish,
        }
    }

    fn build_baseline(specs: &[(u32, u32, bool, i64, i64, u8)]) -> Schedule {
        let mut cursor = at(9, 0);
        let mut s = Schedule::new();
        for (i, &(a, off, val, gap, dur, pin)) in specs.iter().enumerate() {
            let b = (a - 1 + off) % 6 + 1;
            let game = if val { GameType::Valorant } else { GameType::MobileLegends };
            cursor += chrono::Duration::minutes(gap);
            let t = |id: u32| Team::new(id, format!("T{id}"), game);
            let m = Match::new(format!("M{}", i + 1), t(a), t(b), game, dur, cursor);
            s.add_match(match pin % 8 {
                0 => m.fixed(),
                1 => m.as_break(),
                _ => m,
            });
        }
        s
    }

    proptest! {
        #[test]
        fn prop_adjusted_schedule_invariants(
            specs in prop::collection::vec((1u32..=6, 1u32..=5, any::<bool>(), 0i64..40, 10i64..60, any::<u8>()), 1..10),
            raw in prop::collection::vec((0usize..10, any::<u8>(), 1u32..40), 0..6),
            rest in 0i64..30,
            setup in 0i64..10,
        ) {
            let baseline = build_baseline(&specs);
            let n = baseline.match_count();
            let disruptions: Vec<Disruption> = raw
                .iter()
                .enumerate()
                .map(|(i, &(m, k, mins))| Disruption::new(format!("D{}", i + 1), format!("M{}", m % n + 1), kind_of(k), mins))
                .collect();
            let cfg = TournamentConfig::default().with_rest_period(rest).with_setup_buffer(setup);
            let r = adjust_schedule(&cfg, &baseline, &disruptions).unwrap();

            // end == start + duration
            prop_assert!(r.schedule.matches.iter().all(|m| m.is_consistent()));

            // fixed events and breaks keep their baseline timing and are never disrupted
            for m in r.schedule.matches.iter().filter(|m| m.is_immovable()) {
                let orig = baseline.find_match(&m.id).unwrap();
                prop_assert_eq!((m.start_time, m.duration), (orig.start_time, orig.duration));
            }
            for d in &disruptions {
                if baseline.find_match(&d.match_id).unwrap().is_immovable() {
                    prop_assert!(!r.was_applied(&d.id));
                }
            }

            // related pairs never overlap and keep their gap
            let ms = &r.schedule.matches;
            for i in 0..ms.len() {
                for j in (i + 1)..ms.len() {
                    let (a, b) = (&ms[i], &ms[j]);
                    if a.is_immovable() || b.is_immovable() || !a.is_related(b) {
                        continue;
                    }
                    let (first, second) = if a.start_time <= b.start_time { (a, b) } else { (b, a) };
                    let gap = second.gap_after(first);
                    prop_assert!(gap >= required_gap(first, second, cfg.rest_period, cfg.setup_buffer),
                        "{} -> {} gap {}", first.id, second.id, gap);
                }
            }

            // non-retreat for undisrupted matches
            let disrupted: HashSet<&str> = disruptions
                .iter()
                .filter(|d| r.was_applied(&d.id))
                .map(|d| d.match_id.as_str())
                .collect();
            for m in ms {
                if disrupted.contains(m.id.as_str()) {
                    continue;
                }
                let orig = baseline.find_match(&m.id).unwrap();
                prop_assert!(m.start_time >= orig.start_time, "{} retreated", m.id);
            }

            // deterministic
            let again = adjust_schedule(&cfg, &baseline, &disruptions).unwrap();
            prop_assert_eq!(again, r);
        }
    }
}
