//! Team and game-track model.
//!
//! A team competes in exactly one game. Each game runs on its own stage,
//! so the game type doubles as the venue resource a match occupies.
//!
//! # Identity
//! Teams are identified by `id`. Names are display-only; two teams with the
//! same name are still different teams.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A game played at the tournament (one stage per game).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameType {
    /// Mobile Legends: Bang Bang.
    #[serde(rename = "ML")]
    MobileLegends,
    /// Valorant.
    #[serde(rename = "Val")]
    Valorant,
}

impl GameType {
    /// All supported games, in scheduling order.
    pub const ALL: [GameType; 2] = [GameType::MobileLegends, GameType::Valorant];

    /// Short wire code (`"ML"`, `"Val"`).
    pub fn code(&self) -> &'static str {
        match self {
            GameType::MobileLegends => "ML",
            GameType::Valorant => "Val",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A team participating in the tournament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Unique team identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Game this team plays.
    pub game_type: GameType,
}

impl Team {
    /// Identifier reserved for the placeholder team on fixed events.
    pub const PLACEHOLDER_ID: u32 = 0;

    /// Creates a new team.
    pub fn new(id: u32, name: impl Into<String>, game_type: GameType) -> Self {
        Self {
            id,
            name: name.into(),
            game_type,
        }
    }

    /// Stand-in team used for breaks and other fixed events.
    pub fn placeholder(game_type: GameType) -> Self {
        Self::new(Self::PLACEHOLDER_ID, "Placeholder", game_type)
    }

    /// Whether this is the fixed-event placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.id == Self::PLACEHOLDER_ID
    }
}
