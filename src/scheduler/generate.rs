//! Baseline schedule generation.
//!
//! Builds the day's first-round pairings per game, places them with the
//! [`TimeSlotAllocator`], and pins fixed events and finals.

use tracing::{info, warn};

use super::TimeSlotAllocator;
use crate::error::{Result, ScheduleError};
use crate::models::{FixedEvent, GameType, MatchPair, Schedule, Team, TournamentConfig};
use crate::validation::validate_input;

/// Minimum field size that also gets a semifinal slot.
const SEMIFINAL_MIN_TEAMS: usize = 4;

/// First-round pairings in input order: 1 v 2, 3 v 4, ….
///
/// An odd team out gets no match.
pub fn first_round_pairs(teams: &[&Team]) -> Vec<MatchPair> {
    teams
        .chunks_exact(2)
        .map(|pair| {
            MatchPair::new(pair[0].clone(), pair[1].clone(), 1).with_bracket_type("First Round")
        })
        .collect()
}

/// Generates the baseline schedule for one venue day.
///
/// 1. Fixed events are injected first (`E1, E2, …`) as immovable breaks.
/// 2. Each enabled game, in config order, gets its first-round pairs plus
///    one semifinal between winner placeholders when it has at least four
///    teams. Matches are numbered `M1, M2, …` across games.
/// 3. Matches listed in `finals_matches` become fixed-time finals.
///
/// # Errors
/// [`ScheduleError::InvalidInput`] if the config or team list fails validation.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tourney_schedule::models::{GameType, Team, TournamentConfig};
/// use tourney_schedule::scheduler::generate_schedule;
///
/// let config = TournamentConfig::default()
///     .with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// let teams: Vec<Team> = (1..=4)
///     .map(|i| Team::new(i, format!("ML{i}"), GameType::MobileLegends))
///     .chain((5..=6).map(|i| Team::new(i, format!("VAL{i}"), GameType::Valorant)))
///     .collect();
///
/// let schedule = generate_schedule(&config, &teams, &[], &[]).unwrap();
/// // 2 ML first-round + 1 ML semifinal + 1 Val first-round
/// assert_eq!(schedule.match_count(), 4);
/// ```
pub fn generate_schedule(
    config: &TournamentConfig,
    teams: &[Team],
    fixed_events: &[FixedEvent],
    finals_matches: &[String],
) -> Result<Schedule> {
    validate_input(config, teams).map_err(ScheduleError::InvalidInput)?;

    let mut allocator = TimeSlotAllocator::new(config);
    let mut schedule = Schedule::new();

    let default_stage = config
        .enabled_tracks()
        .next()
        .map(|t| t.game_type)
        .unwrap_or(GameType::MobileLegends);
    for event in allocator.fixed_event_matches(fixed_events, default_stage) {
        schedule.add_match(event);
    }

    let mut next_placeholder_id = teams.iter().map(|t| t.id).max().unwrap_or(0) + 1;

    for track in config.enabled_tracks() {
        let game = track.game_type;
        let roster: Vec<&Team> = teams.iter().filter(|t| t.game_type == game).collect();
        let mut pairs = first_round_pairs(&roster);

        if roster.len() >= SEMIFINAL_MIN_TEAMS {
            let winner = |n: u32, id: u32| Team::new(id, format!("{game} Winner {n}"), game);
            let semi = MatchPair::new(
                winner(1, next_placeholder_id),
                winner(2, next_placeholder_id + 1),
                2,
            )
            .with_bracket_type("Semifinals");
            next_placeholder_id += 2;
            pairs.push(semi);
        }

        let avg = config.average_duration(game).unwrap_or(1);
        for m in allocator.allocate(&pairs, track.period, game, avg) {
            schedule.add_match(m);
        }
    }

    for id in finals_matches {
        match schedule.find_match_mut(id) {
            Some(m) => {
                m.is_fixed_time = true;
                m.round_number = m.round_number.max(3);
                m.description.push_str(" (Finals)");
            }
            None => warn!(match_id = %id, "finals match not found in generated schedule"),
        }
    }

    info!(
        tournament = %config.id,
        matches = schedule.match_count(),
        fixed_events = fixed_events.len(),
        "schedule generated"
    );
    Ok(schedule)
}
