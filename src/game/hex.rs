//! Axial hex coordinates.

use serde::{Deserialize, Serialize};

/// Axial offsets of the six neighbors, starting east and turning counter-clockwise.
pub const DIRECTIONS: [Hex; 6] = [
    Hex::new(1, 0),
    Hex::new(1, -1),
    Hex::new(0, -1),
    Hex::new(-1, 0),
    Hex::new(-1, 1),
    Hex::new(0, 1),
];

/// A coordinate on the hex grid in axial form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    /// Column axis.
    pub q: i32,
    /// Row axis.
    pub r: i32,
}

impl Hex {
    /// The map center.
    pub const ORIGIN: Hex = Hex::new(0, 0);

    /// Create a new coordinate.
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Implicit third cube coordinate.
    #[must_use]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Hex distance to another coordinate.
    #[must_use]
    pub const fn distance(self, other: Hex) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let ds = (self.q + self.r - other.q - other.r).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        (dq + ds + dr) / 2
    }

    /// Whether `other` is exactly one step away.
    #[must_use]
    pub const fn is_adjacent(self, other: Hex) -> bool {
        self.distance(other) == 1
    }

    /// The coordinate one step away in the given direction index (taken modulo 6).
    #[must_use]
    pub const fn neighbor(self, direction: usize) -> Hex {
        let d = DIRECTIONS[direction % 6];
        Hex::new(self.q + d.q, self.r + d.r)
    }

    /// All six neighbors in [`DIRECTIONS`] order.
    #[must_use]
    pub fn neighbors(self) -> [Hex; 6] {
        DIRECTIONS.map(|d| Hex::new(self.q + d.q, self.r + d.r))
    }

    /// Euclidean length of the axial vector, used by terrain generation.
    #[must_use]
    pub fn axial_length(self) -> f64 {
        f64::from(self.q).hypot(f64::from(self.r))
    }
}

impl std::fmt::Display for Hex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Every coordinate of a hexagon of the given radius around the origin.
///
/// Order is column-major: `q` ascending, then `r` ascending within the column.
/// Map generation relies on this order being stable.
pub fn hexagon(radius: u32) -> impl Iterator<Item = Hex> {
    let radius = i32::try_from(radius).unwrap_or(i32::MAX / 2);
    (-radius..=radius).flat_map(move |q| {
        let r1 = (-radius).max(-q - radius);
        let r2 = radius.min(-q + radius);
        (r1..=r2).map(move |r| Hex::new(q, r))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_formula() {
        let a = Hex::new(0, 0);
        assert_eq!(a.distance(Hex::new(1, 0)), 1);
        assert_eq!(a.distance(Hex::new(1, -1)), 1);
        assert_eq!(a.distance(Hex::new(2, -1)), 2);
        assert_eq!(a.distance(Hex::new(3, -3)), 3);
        assert_eq!(Hex::new(-2, 1).distance(Hex::new(2, -1)), 4);
        assert_eq!(a.distance(a), 0);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Hex::new(3, -7);
        let b = Hex::new(-4, 2);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn test_neighbors_are_adjacent() {
        let center = Hex::new(2, -3);
        for n in center.neighbors() {
            assert!(center.is_adjacent(n), "{n} should be adjacent to {center}");
        }
        assert_eq!(center.neighbor(0), Hex::new(3, -3));
        assert_eq!(center.neighbor(6), center.neighbor(0));
    }

    #[test]
    fn test_hexagon_tile_count() {
        // 3R(R+1) + 1 tiles
        assert_eq!(hexagon(0).count(), 1);
        assert_eq!(hexagon(1).count(), 7);
        assert_eq!(hexagon(10).count(), 331);
    }

    #[test]
    fn test_hexagon_within_radius() {
        for hex in hexagon(6) {
            assert!(Hex::ORIGIN.distance(hex) <= 6);
            assert_eq!(hex.q + hex.r + hex.s(), 0);
        }
    }
}
