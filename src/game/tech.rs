//! Technology graph: unlocks, prerequisites and research progress.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::game::{Building, UnitKind};

/// Science needed to finish any technology.
pub const RESEARCH_COST: u32 = 50;

/// A researchable technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tech {
    /// Unlocks the granary and writing.
    Pottery,
    /// Unlocks bronze working and the wheel.
    Mining,
    /// Unlocks the archer.
    Archery,
    /// Unlocks the monument.
    Writing,
    /// Unlocks barracks and iron working.
    BronzeWorking,
    /// Unlocks the chariot.
    TheWheel,
    /// Unlocks the swordsman.
    IronWorking,
}

impl Tech {
    /// Every technology in tree order.
    pub const ALL: [Tech; 7] = [
        Tech::Pottery,
        Tech::Mining,
        Tech::Archery,
        Tech::Writing,
        Tech::BronzeWorking,
        Tech::TheWheel,
        Tech::IronWorking,
    ];

    /// Technologies that must be unlocked before this one.
    #[must_use]
    pub const fn prerequisites(self) -> &'static [Tech] {
        match self {
            Tech::Pottery | Tech::Mining | Tech::Archery => &[],
            Tech::BronzeWorking | Tech::TheWheel => &[Tech::Mining],
            Tech::Writing => &[Tech::Pottery],
            Tech::IronWorking => &[Tech::BronzeWorking],
        }
    }
}

impl std::fmt::Display for Tech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Tech::Pottery => "Pottery",
            Tech::Mining => "Mining",
            Tech::Archery => "Archery",
            Tech::Writing => "Writing",
            Tech::BronzeWorking => "Bronze Working",
            Tech::TheWheel => "The Wheel",
            Tech::IronWorking => "Iron Working",
        };
        f.write_str(label)
    }
}

/// What happens to accumulated progress when the research target changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResearchSwitch {
    /// Progress carries over to the new target.
    #[default]
    Keep,
    /// Progress is lost when an active target is replaced.
    Discard,
}

/// Unlocked technologies plus the current research target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TechTree {
    unlocked: BTreeSet<Tech>,
    current: Option<Tech>,
    progress: u32,
}

impl TechTree {
    /// Empty tree with nothing researched.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a technology is unlocked.
    #[must_use]
    pub fn is_unlocked(&self, tech: Tech) -> bool {
        self.unlocked.contains(&tech)
    }

    /// Unlocked technologies in tree order.
    pub fn unlocked(&self) -> impl Iterator<Item = Tech> + '_ {
        self.unlocked.iter().copied()
    }

    /// Current research target.
    #[must_use]
    pub const fn current(&self) -> Option<Tech> {
        self.current
    }

    /// Science accumulated toward the current or next target.
    #[must_use]
    pub const fn progress(&self) -> u32 {
        self.progress
    }

    /// Not yet unlocked, with every prerequisite unlocked.
    #[must_use]
    pub fn can_research(&self, tech: Tech) -> bool {
        !self.is_unlocked(tech) && tech.prerequisites().iter().all(|p| self.is_unlocked(*p))
    }

    /// Unlock a technology. Idempotent.
    pub fn unlock(&mut self, tech: Tech) {
        self.unlocked.insert(tech);
    }

    /// Point research at a new target.
    ///
    /// Callers validate the target; this only applies the switch policy.
    /// Science banked while no target was set always carries over.
    pub fn set_target(&mut self, tech: Tech, switch: ResearchSwitch) {
        let replacing = self.current.is_some_and(|current| current != tech);
        if replacing && switch == ResearchSwitch::Discard {
            self.progress = 0;
        }
        self.current = Some(tech);
    }

    /// Add science to research progress.
    ///
    /// Science is banked even with no target; the current target unlocks
    /// once progress reaches [`RESEARCH_COST`]. Returns the technology
    /// unlocked by this contribution, if any.
    pub fn add_progress(&mut self, science: u32) -> Option<Tech> {
        self.progress = self.progress.saturating_add(science);
        let target = self.current?;
        if self.progress >= RESEARCH_COST {
            self.unlock(target);
            self.current = None;
            self.progress = 0;
            return Some(target);
        }
        None
    }

    /// Whether cities may build this unit kind.
    #[must_use]
    pub fn can_build_unit(&self, kind: UnitKind) -> bool {
        match kind {
            UnitKind::Archer => self.is_unlocked(Tech::Archery),
            UnitKind::Chariot => self.is_unlocked(Tech::TheWheel),
            UnitKind::Swordsman => self.is_unlocked(Tech::IronWorking),
            UnitKind::Settler | UnitKind::Warrior | UnitKind::Worker => true,
            UnitKind::Barbarian => false,
        }
    }

    /// Whether cities may construct this building.
    #[must_use]
    pub fn can_build_building(&self, building: Building) -> bool {
        match building {
            Building::Granary => self.is_unlocked(Tech::Pottery),
            Building::Monument => self.is_unlocked(Tech::Writing),
            Building::Barracks => self.is_unlocked(Tech::BronzeWorking),
        }
    }
}
