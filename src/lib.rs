//! Esports tournament scheduling with live disruption handling.
//!
//! Builds a one-day bracket schedule across game stages, then keeps it
//! consistent as matches run late, overrun or finish early.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Team`, `Match`, `Schedule`, `Disruption`,
//!   `TournamentConfig`, `FixedEvent`
//! - **`scheduler`**: Generation, disruption adjustment, backends, sessions, KPIs
//! - **`validation`**: Input checks (rosters, duration ranges, venue hours)
//!   and schedule rule checks
//! - **`error`**: Crate error type
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use tourney_schedule::models::{Disruption, DisruptionKind, GameType, Team, TournamentConfig};
//! use tourney_schedule::scheduler::{adjust_schedule, generate_schedule};
//!
//! let config = TournamentConfig::new("t1", "Campus Cup")
//!     .with_venue_date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
//! let mut teams: Vec<Team> = (1..=4)
//!     .map(|i| Team::new(i, format!("ML{i}"), GameType::MobileLegends))
//!     .collect();
//! teams.extend((5..=6).map(|i| Team::new(i, format!("VAL{i}"), GameType::Valorant)));
//!
//! let baseline = generate_schedule(&config, &teams, &[], &[]).unwrap();
//! let late = Disruption::new("D1", "M1", DisruptionKind::LateArrival, 15);
//! let adjusted = adjust_schedule(&config, &baseline, &[late]).unwrap();
//! assert!(adjusted.was_applied("D1"));
//! ```

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, ScheduleError};
