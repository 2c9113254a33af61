//! Unit and city storage.

use crate::game::{City, CityId, Faction, Hex, Unit, UnitId, UnitKind};

/// Owns every unit and city in the world.
///
/// Lists keep insertion order, which is the order the turn engine
/// processes cities in.
#[derive(Debug, Clone)]
pub struct EntityStore {
    units: Vec<Unit>,
    cities: Vec<City>,
    next_unit_id: UnitId,
    next_city_id: CityId,
}

impl Default for EntityStore {
    fn default() -> Self {
        Self {
            units: Vec::new(),
            cities: Vec::new(),
            next_unit_id: 1,
            next_city_id: 1,
        }
    }
}

impl EntityStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All living units.
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Mutable access to every unit, e.g. for the turn-start refresh.
    pub fn units_mut(&mut self) -> impl Iterator<Item = &mut Unit> {
        self.units.iter_mut()
    }

    /// All cities.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Spawn a unit with its kind's base stats. Returns the new id.
    pub fn spawn_unit(&mut self, kind: UnitKind, owner: Faction, hex: Hex) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        self.units.push(Unit::new(id, kind, owner, hex));
        id
    }

    /// Add a fully built unit, assigning it a fresh id. Returns the id.
    pub fn add_unit(&mut self, mut unit: Unit) -> UnitId {
        let id = self.next_unit_id;
        self.next_unit_id += 1;
        unit.id = id;
        self.units.push(unit);
        id
    }

    /// Remove a unit, returning it if it existed.
    pub fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        let idx = self.units.iter().position(|u| u.id == id)?;
        Some(self.units.remove(idx))
    }

    /// Look up a unit by id.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    /// Look up a unit by id for mutation.
    #[must_use]
    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// First unit standing on the coordinate.
    #[must_use]
    pub fn unit_at(&self, hex: Hex) -> Option<&Unit> {
        self.units.iter().find(|u| u.hex == hex)
    }

    /// First unit on the coordinate owned by someone other than `owner`.
    #[must_use]
    pub fn hostile_unit_at(&self, hex: Hex, owner: Faction) -> Option<&Unit> {
        self.units.iter().find(|u| u.hex == hex && u.owner != owner)
    }

    /// Whether a unit owned by `owner` stands on the coordinate.
    #[must_use]
    pub fn has_friendly_unit_at(&self, hex: Hex, owner: Faction) -> bool {
        self.units.iter().any(|u| u.hex == hex && u.owner == owner)
    }

    /// Found a city. Returns `None` if a city already occupies the tile.
    pub fn found_city(&mut self, owner: Faction, hex: Hex) -> Option<CityId> {
        if self.city_at(hex).is_some() {
            return None;
        }
        let id = self.next_city_id;
        self.next_city_id += 1;
        self.cities.push(City::new(id, owner, hex));
        Some(id)
    }

    /// Add a fully built city, assigning it a fresh id.
    ///
    /// Returns `None` if a city already occupies the tile.
    pub fn add_city(&mut self, mut city: City) -> Option<CityId> {
        if self.city_at(city.hex).is_some() {
            return None;
        }
        let id = self.next_city_id;
        self.next_city_id += 1;
        city.id = id;
        self.cities.push(city);
        Some(id)
    }

    /// Look up a city by id.
    #[must_use]
    pub fn city(&self, id: CityId) -> Option<&City> {
        self.cities.iter().find(|c| c.id == id)
    }

    /// Look up a city by id for mutation.
    #[must_use]
    pub fn city_mut(&mut self, id: CityId) -> Option<&mut City> {
        self.cities.iter_mut().find(|c| c.id == id)
    }

    /// City on the coordinate, if any.
    #[must_use]
    pub fn city_at(&self, hex: Hex) -> Option<&City> {
        self.cities.iter().find(|c| c.hex == hex)
    }

    /// Ids of every city in processing order.
    #[must_use]
    pub fn city_ids(&self) -> Vec<CityId> {
        self.cities.iter().map(|c| c.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_ids_monotonic() {
        let mut store = EntityStore::new();
        let a = store.spawn_unit(UnitKind::Warrior, Faction::Player, Hex::ORIGIN);
        let b = store.spawn_unit(UnitKind::Settler, Faction::Player, Hex::new(1, 0));
        assert_eq!((a, b), (1, 2));

        store.remove_unit(b);
        let c = store.spawn_unit(UnitKind::Archer, Faction::Player, Hex::new(1, 0));
        assert_eq!(c, 3, "ids are never reused");
    }

    #[test]
    fn test_unit_lookup_by_coord() {
        let mut store = EntityStore::new();
        let hex = Hex::new(2, -1);
        store.spawn_unit(UnitKind::Barbarian, Faction::Barbarian, hex);
        assert!(store.unit_at(hex).is_some());
        assert!(store.hostile_unit_at(hex, Faction::Player).is_some());
        assert!(store.hostile_unit_at(hex, Faction::Barbarian).is_none());
        assert!(store.has_friendly_unit_at(hex, Faction::Barbarian));
        assert!(!store.has_friendly_unit_at(hex, Faction::Player));
    }

    #[test]
    fn test_one_city_per_tile() {
        let mut store = EntityStore::new();
        assert_eq!(store.found_city(Faction::Player, Hex::ORIGIN), Some(1));
        assert_eq!(store.found_city(Faction::Player, Hex::ORIGIN), None);
        assert_eq!(store.found_city(Faction::Player, Hex::new(0, 1)), Some(2));
        assert_eq!(store.city_ids(), vec![1, 2]);
        assert_eq!(store.city_at(Hex::new(0, 1)).unwrap().name, "City 2");
    }

    #[test]
    fn test_remove_missing_unit() {
        let mut store = EntityStore::new();
        assert!(store.remove_unit(42).is_none());
    }
}
