// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! hexciv: the simulation core of a turn-based hex-grid strategy game.
//!
//! The crate owns world state (terrain, units, cities, technology), applies
//! player commands and advances the world one turn at a time. Renderers
//! consume the read-only snapshots it produces.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI driver / command scripts      │
//! ├─────────────────────────────────────┤
//! │   Game facade (world + selection)   │
//! ├─────────────────────────────────────┤
//! │ Commands · Turn engine · Snapshots  │
//! ├─────────────────────────────────────┤
//! │ Map · Entities · Economy · Tech     │
//! └─────────────────────────────────────┘
//! ```
//!
//! All randomness flows from one seeded [`game::GameRng`], so a seed and a
//! command sequence fully determine a game.

pub mod config;
pub mod error;
pub mod game;
pub mod script;

pub use config::{ConfigError, GameConfig};
pub use error::{CommandRejected, CommandResult};

// Re-export key game types at crate root for convenience
pub use game::{
    City, ClickOutcome, Command, Game, Hex, Rules, Tech, TurnReport, Unit, UnitKind, World,
    WorldSnapshot,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Game>();
        assert_send::<WorldSnapshot>();
    }

    #[test]
    fn test_plain_data_is_copy() {
        fn assert_copy<T: Copy>() {}
        assert_copy::<Unit>();
        assert_copy::<ClickOutcome>();
        assert_copy::<game::CombatReport>();
        assert_copy::<game::Selection>();
        assert_copy::<game::SelectionView>();
    }

    #[test]
    fn test_rejection_debug() {
        let debug = format!("{:?}", CommandRejected::NotOwned);
        assert!(debug.contains("NotOwned"));
    }
}
