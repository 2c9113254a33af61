//! Error types for the simulation core.

use thiserror::Error;

use crate::game::{Building, CityId, Hex, Tech, UnitKind};

/// Why a player command had no effect.
///
/// Rejections are ordinary gameplay outcomes: the world is left untouched
/// and the caller decides how to surface them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandRejected {
    /// No unit is selected.
    #[error("no unit selected")]
    NoUnitSelected,
    /// The selected unit belongs to another faction.
    #[error("selected unit is not yours")]
    NotOwned,
    /// The selected unit has no movement left.
    #[error("unit has no movement left")]
    NoMovement,
    /// The target is not exactly one step away.
    #[error("{0} is not adjacent")]
    NotAdjacent(Hex),
    /// The target coordinate is off the map.
    #[error("no tile at {0}")]
    NoTile(Hex),
    /// A friendly unit already stands on the target.
    #[error("{0} is occupied by a friendly unit")]
    FriendlyOccupied(Hex),
    /// A city stands on the target.
    #[error("{0} is occupied by a city")]
    CityOccupied(Hex),
    /// The selected unit is the wrong kind for this command.
    #[error("a {expected} is required")]
    WrongUnitKind {
        /// Kind the command needs.
        expected: UnitKind,
    },
    /// No city with this id.
    #[error("no city with id {0}")]
    NoSuchCity(CityId),
    /// Cities can never build this unit kind.
    #[error("{0} cannot be built")]
    NotBuildable(UnitKind),
    /// The required technology is missing.
    #[error("{0} is not unlocked")]
    Locked(UnitKind),
    /// The city already has this building.
    #[error("{0} already built")]
    AlreadyBuilt(Building),
    /// Not enough gold.
    #[error("costs {cost} gold, treasury holds {available}")]
    InsufficientGold {
        /// Price of the purchase.
        cost: u32,
        /// Gold available.
        available: u32,
    },
    /// The technology's prerequisites are missing.
    #[error("{0} is not yet researchable")]
    NotResearchable(Tech),
    /// The technology is already unlocked.
    #[error("{0} is already researched")]
    AlreadyResearched(Tech),
}

/// Result type for player commands.
pub type CommandResult<T = ()> = Result<T, CommandRejected>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_messages() {
        assert_eq!(CommandRejected::NoUnitSelected.to_string(), "no unit selected");
        assert_eq!(
            CommandRejected::NotAdjacent(Hex::new(3, -1)).to_string(),
            "(3, -1) is not adjacent"
        );
        assert_eq!(
            CommandRejected::InsufficientGold { cost: 40, available: 12 }.to_string(),
            "costs 40 gold, treasury holds 12"
        );
        assert_eq!(
            CommandRejected::NotResearchable(Tech::IronWorking).to_string(),
            "Iron Working is not yet researchable"
        );
    }
}
