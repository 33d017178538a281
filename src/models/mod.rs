//! Tournament scheduling domain models.
//!
//! Provides the data types shared by generation and adjustment: teams,
//! matches, the day's schedule, disruptions and the tournament config.
//!
//! # Domain Mappings
//!
//! | tourney-schedule | Generic scheduling |
//! |------------------|--------------------|
//! | Match | Activity |
//! | GameType (stage) | Resource |
//! | Team | Shared participant (precedence by rest period) |
//! | Fixed event / break | Frozen assignment |
//! | Schedule | Solution |

mod config;
mod disruption;
mod fixture;
mod schedule;
mod team;
pub mod timestamp;

pub use config::{
    DurationRange, FixedEvent, GameTrack, MatchFormat, PreferredPeriod, TournamentConfig,
    VenueHours, DEFAULT_REST_PERIOD, DEFAULT_SETUP_BUFFER,
};
pub use disruption::{default_description, Disruption, DisruptionKind, DisruptionLog, Registration};
pub use fixture::{Match, MatchPair};
pub use schedule::{Schedule, Violation, ViolationType};
pub use team::{GameType, Team};
