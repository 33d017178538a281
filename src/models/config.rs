//! Tournament configuration.
//!
//! Read-only input to generation and adjustment. Every field has a default,
//! so a partial JSON document (or `{}`) yields a usable config:
//!
//! | Field | Default |
//! |-------|---------|
//! | `venueDate` | today |
//! | `venueHours` | `["09:00", "18:00"]` |
//! | `restPeriod` | 15 min |
//! | `setupBuffer` | 5 min |
//! | `matchFormat` | `bo3` |
//! | `games` | ML 20–30 min morning, Val 35–50 min afternoon |

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::GameType;
use crate::error::Result;

/// Default minimum rest between two matches of the same team (minutes).
pub const DEFAULT_REST_PERIOD: i64 = 15;
/// Default changeover time between consecutive matches on one stage (minutes).
pub const DEFAULT_SETUP_BUFFER: i64 = 5;

/// Part of the venue day a game prefers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredPeriod {
    /// Venue opening until noon.
    Morning,
    /// Noon until venue close.
    Afternoon,
    /// The whole venue day.
    #[default]
    Wholeday,
}

/// Series length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchFormat {
    /// Best of 1.
    Bo1,
    /// Best of 3.
    #[default]
    Bo3,
    /// Best of 5.
    Bo5,
    /// Best of 7.
    Bo7,
}

impl MatchFormat {
    /// Expected number of games actually played in one series.
    pub fn expected_games(&self) -> i64 {
        match self {
            MatchFormat::Bo1 => 1,
            MatchFormat::Bo3 => 2,
            MatchFormat::Bo5 => 3,
            MatchFormat::Bo7 => 4,
        }
    }
}

/// Venue opening hours for the tournament day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueHours(
    #[serde(with = "timestamp::clock_time")] pub NaiveTime,
    #[serde(with = "timestamp::clock_time")] pub NaiveTime,
);

impl VenueHours {
    /// Creates opening hours from `(hour, minute)` pairs.
    ///
    /// Out-of-range values fall back to midnight.
    pub fn from_hm(open: (u32, u32), close: (u32, u32)) -> Self {
        let at = |(h, m): (u32, u32)| NaiveTime::from_hms_opt(h, m, 0).unwrap_or(NaiveTime::MIN);
        Self(at(open), at(close))
    }

    /// Opening time.
    pub fn open(&self) -> NaiveTime {
        self.0
    }

    /// Closing time.
    pub fn close(&self) -> NaiveTime {
        self.1
    }
}

impl Default for VenueHours {
    fn default() -> Self {
        Self::from_hm((9, 0), (18, 0))
    }
}

/// Single-game duration range (minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    /// Shortest expected game.
    pub min: i64,
    /// Longest expected game.
    pub max: i64,
}

impl DurationRange {
    /// Creates a range.
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

/// Per-game settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTrack {
    /// Which game.
    pub game_type: GameType,
    /// Whether the game is played at this tournament.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Single-game duration range.
    pub duration_range: DurationRange,
    /// Preferred part of the day.
    #[serde(default)]
    pub period: PreferredPeriod,
}

fn enabled_by_default() -> bool {
    true
}

impl GameTrack {
    /// Creates an enabled track.
    pub fn new(game_type: GameType, min: i64, max: i64, period: PreferredPeriod) -> Self {
        Self {
            game_type,
            enabled: true,
            duration_range: DurationRange::new(min, max),
            period,
        }
    }

    /// Disables the track.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// A venue-fixed event (lunch, ceremony) placed before dynamic matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixedEvent {
    /// Exact start time.
    #[serde(with = "timestamp::iso8601")]
    pub start_time: NaiveDateTime,
    /// Length in minutes.
    #[serde(default = "default_fixed_duration")]
    pub duration: i64,
    /// Label shown on the schedule.
    #[serde(default = "default_fixed_description")]
    pub description: String,
    /// Stage the event occupies; `None` uses the first enabled game.
    #[serde(default)]
    pub game_type: Option<GameType>,
}

fn default_fixed_duration() -> i64 {
    60
}

fn default_fixed_description() -> String {
    "Fixed Event".to_string()
}

impl FixedEvent {
    /// Creates a fixed event.
    pub fn new(start_time: NaiveDateTime, duration: i64, description: impl Into<String>) -> Self {
        Self {
            start_time,
            duration,
            description: description.into(),
            game_type: None,
        }
    }

    /// Pins the event to a stage.
    pub fn on_stage(mut self, game_type: GameType) -> Self {
        self.game_type = Some(game_type);
        self
    }
}

/// Tournament-level settings consumed by generation and adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TournamentConfig {
    /// Tournament identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The (single) competition day.
    pub venue_date: NaiveDate,
    /// Opening hours on that day.
    pub venue_hours: VenueHours,
    /// Minimum minutes between two matches of the same team.
    pub rest_period: i64,
    /// Minimum minutes between consecutive matches on one stage.
    pub setup_buffer: i64,
    /// Series length.
    pub match_format: MatchFormat,
    /// Per-game settings, in scheduling order.
    pub games: Vec<GameTrack>,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            venue_date: Local::now().date_naive(),
            venue_hours: VenueHours::default(),
            rest_period: DEFAULT_REST_PERIOD,
            setup_buffer: DEFAULT_SETUP_BUFFER,
            match_format: MatchFormat::default(),
            games: vec![
                GameTrack::new(GameType::MobileLegends, 20, 30, PreferredPeriod::Morning),
                GameTrack::new(GameType::Valorant, 35, 50, PreferredPeriod::Afternoon),
            ],
        }
    }
}

impl TournamentConfig {
    /// Creates a config with defaults and the given identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON config, filling defaults for missing fields.
    ///
    /// # Examples
    ///
    /// ```
    /// use tourney_schedule::models::TournamentConfig;
    ///
    /// let config = TournamentConfig::from_json(r#"{"name": "Campus Cup"}"#).unwrap();
    /// assert_eq!(config.rest_period, 15);
    /// assert_eq!(config.setup_buffer, 5);
    /// ```
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Sets the competition day.
    pub fn with_venue_date(mut self, date: NaiveDate) -> Self {
        self.venue_date = date;
        self
    }

    /// Sets the opening hours.
    pub fn with_venue_hours(mut self, hours: VenueHours) -> Self {
        self.venue_hours = hours;
        self
    }

    /// Sets the rest period.
    pub fn with_rest_period(mut self, minutes: i64) -> Self {
        self.rest_period = minutes;
        self
    }

    /// Sets the setup buffer.
    pub fn with_setup_buffer(mut self, minutes: i64) -> Self {
        self.setup_buffer = minutes;
        self
    }

    /// Sets the series length.
    pub fn with_match_format(mut self, format: MatchFormat) -> Self {
        self.match_format = format;
        self
    }

    /// Replaces the per-game settings.
    pub fn with_games(mut self, games: Vec<GameTrack>) -> Self {
        self.games = games;
        self
    }

    /// Venue opening as a timestamp.
    pub fn venue_start(&self) -> NaiveDateTime {
        self.venue_date.and_time(self.venue_hours.open())
    }

    /// Venue closing as a timestamp.
    pub fn venue_end(&self) -> NaiveDateTime {
        self.venue_date.and_time(self.venue_hours.close())
    }

    /// Noon on the competition day (morning/afternoon boundary).
    pub fn midday(&self) -> NaiveDateTime {
        self.venue_date.and_time(NaiveTime::MIN) + Duration::hours(12)
    }

    /// Settings for a game, if listed.
    pub fn track(&self, game_type: GameType) -> Option<&GameTrack> {
        self.games.iter().find(|g| g.game_type == game_type)
    }

    /// Whether a game is listed and enabled.
    pub fn is_enabled(&self, game_type: GameType) -> bool {
        self.track(game_type).is_some_and(|g| g.enabled)
    }

    /// Enabled games, in config order.
    pub fn enabled_tracks(&self) -> impl Iterator<Item = &GameTrack> {
        self.games.iter().filter(|g| g.enabled)
    }

    /// Average series length for a game: single-game midpoint times expected games.
    pub fn average_duration(&self, game_type: GameType) -> Option<i64> {
        self.track(game_type).map(|g| {
            (g.duration_range.min + g.duration_range.max) * self.match_format.expected_games() / 2
        })
    }
}
