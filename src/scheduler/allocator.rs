//! Time-slot allocator.
//!
//! # Algorithm
//!
//! 1. Each preferred period owns a short list of anchor slots: three evenly
//!    spaced between venue opening and noon (morning), three between noon
//!    and closing (afternoon), and all six for the whole day.
//! 2. The first match of a batch starts at the next unused anchor of its
//!    period. Anchor usage is counted per period across batches, so a
//!    second game sharing a period starts at a later anchor.
//! 3. Every following match starts at the previous match's end plus the
//!    setup buffer. Anchors are advisory for the first match only.
//! 4. Past the predefined anchors, slot `i` is synthesized at
//!    `venue start + 30·i` minutes, so allocation never runs out of slots.
//!
//! # Complexity
//! O(n) per batch.

use chrono::{Duration, NaiveDateTime};
use std::collections::HashMap;
use tracing::debug;

use crate::models::timestamp::saturating_add_minutes;
use crate::models::{FixedEvent, GameType, Match, MatchPair, PreferredPeriod, Team, TournamentConfig};

/// Anchors per half-day.
const ANCHORS_PER_HALF: i32 = 3;
/// Spacing of synthesized slots past the predefined anchors (minutes).
const SYNTHETIC_SLOT_MINUTES: i64 = 30;

/// Places match pairs on the venue timeline.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use tourney_schedule::models::{GameType, MatchPair, PreferredPeriod, Team, TournamentConfig};
/// use tourney_schedule::scheduler::TimeSlotAllocator;
///
/// let config = TournamentConfig::default()
///     .with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// let ml = |id: u32| Team::new(id, format!("T{id}"), GameType::MobileLegends);
/// let pairs = vec![MatchPair::new(ml(1), ml(2), 1), MatchPair::new(ml(3), ml(4), 1)];
///
/// let mut allocator = TimeSlotAllocator::new(&config);
/// let matches = allocator.allocate(&pairs, PreferredPeriod::Morning, GameType::MobileLegends, 20);
/// assert_eq!(matches[0].start_time.format("%H:%M").to_string(), "09:00");
/// assert_eq!(matches[1].start_time.format("%H:%M").to_string(), "09:25");
/// ```
#[derive(Debug, Clone)]
pub struct TimeSlotAllocator {
    venue_start: NaiveDateTime,
    morning: Vec<NaiveDateTime>,
    afternoon: Vec<NaiveDateTime>,
    setup_buffer: i64,
    used: HashMap<PreferredPeriod, usize>,
    next_match_seq: u32,
    next_event_seq: u32,
}

impl TimeSlotAllocator {
    /// Creates an allocator for the config's venue day.
    pub fn new(config: &TournamentConfig) -> Self {
        let venue_start = config.venue_start();
        let venue_end = config.venue_end();
        let midday = config.midday();
        Self {
            venue_start,
            morning: evenly_spaced(venue_start, midday.min(venue_end)),
            afternoon: evenly_spaced(midday.max(venue_start), venue_end),
            setup_buffer: config.setup_buffer.max(0),
            used: HashMap::new(),
            next_match_seq: 0,
            next_event_seq: 0,
        }
    }

    /// Predefined anchors of a period.
    pub fn anchors(&self, period: PreferredPeriod) -> Vec<NaiveDateTime> {
        match period {
            PreferredPeriod::Morning => self.morning.clone(),
            PreferredPeriod::Afternoon => self.afternoon.clone(),
            PreferredPeriod::Wholeday => {
                let mut all = self.morning.clone();
                all.extend_from_slice(&self.afternoon);
                all
            }
        }
    }

    /// Slot `index` of a period, synthesized past the predefined anchors.
    pub fn slot(&self, period: PreferredPeriod, index: usize) -> NaiveDateTime {
        let predefined = match period {
            PreferredPeriod::Morning => self.morning.get(index).copied(),
            PreferredPeriod::Afternoon => self.afternoon.get(index).copied(),
            PreferredPeriod::Wholeday => self
                .morning
                .iter()
                .chain(self.afternoon.iter())
                .nth(index)
                .copied(),
        };
        predefined.unwrap_or_else(|| {
            saturating_add_minutes(self.venue_start, SYNTHETIC_SLOT_MINUTES.saturating_mul(index as i64))
        })
    }

    /// Number of slots of a period already consumed.
    pub fn used_slots(&self, period: PreferredPeriod) -> usize {
        self.used.get(&period).copied().unwrap_or(0)
    }

    /// Assigns start times to `pairs`, in order.
    ///
    /// Match ids continue the allocator's `M1, M2, …` sequence. Output order
    /// is generation order.
    pub fn allocate(
        &mut self,
        pairs: &[MatchPair],
        period: PreferredPeriod,
        game_type: GameType,
        avg_duration: i64,
    ) -> Vec<Match> {
        let duration = avg_duration.max(1);
        let mut matches = Vec::with_capacity(pairs.len());
        let mut last_end: Option<NaiveDateTime> = None;

        for pair in pairs {
            let start = match last_end {
                Some(end) => saturating_add_minutes(end, self.setup_buffer),
                None => self.slot(period, self.used_slots(period)),
            };
            *self.used.entry(period).or_insert(0) += 1;
            self.next_match_seq += 1;

            let m = Match::new(
                format!("M{}", self.next_match_seq),
                pair.team1.clone(),
                pair.team2.clone(),
                game_type,
                duration,
                start,
            )
            .with_round(pair.round_number)
            .with_bracket_type(pair.bracket_type.clone())
            .with_description(pair.description.clone());

            debug!(match_id = %m.id, game = %game_type, start = %m.start_time, duration, "match allocated");
            last_end = Some(m.end_time);
            matches.push(m);
        }

        matches
    }

    /// Turns fixed events into immovable schedule entries (`E1, E2, …`).
    ///
    /// Start and duration are taken verbatim. Events without a stage land on
    /// `default_game`.
    pub fn fixed_event_matches(&mut self, events: &[FixedEvent], default_game: GameType) -> Vec<Match> {
        events
            .iter()
            .map(|ev| {
                self.next_event_seq += 1;
                let game = ev.game_type.unwrap_or(default_game);
                Match::new(
                    format!("E{}", self.next_event_seq),
                    Team::placeholder(game),
                    Team::placeholder(game),
                    game,
                    ev.duration,
                    ev.start_time,
                )
                .with_round(0)
                .with_bracket_type("Fixed Event")
                .with_description(ev.description.clone())
                .as_break()
            })
            .collect()
    }
}

fn evenly_spaced(from: NaiveDateTime, to: NaiveDateTime) -> Vec<NaiveDateTime> {
    let span = (to - from).num_minutes();
    if span <= 0 {
        return Vec::new();
    }
    (0..ANCHORS_PER_HALF)
        .map(|i| from + Duration::minutes(span * i64::from(i) / i64::from(ANCHORS_PER_HALF)))
        .collect()
}
