use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// `self + (dx, dy) * scale`, or `None` when a coordinate leaves `i32`.
    pub fn checked_offset(self, dx: i32, dy: i32, scale: i32) -> Option<Self> {
        let x = self.x.checked_add(dx.checked_mul(scale)?)?;
        let y = self.y.checked_add(dy.checked_mul(scale)?)?;
        Some(Self { y, x })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Closed terrain vocabulary shared by the battle grid and the map editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Road,
    Forest,
    River,
    Mountain,
}

impl Terrain {
    pub const ALL: [Terrain; 4] = [Terrain::Road, Terrain::Forest, Terrain::River, Terrain::Mountain];

    /// Road and forest are open to everyone; river and mountain need the
    /// matching capability.
    pub fn is_traversable_by(self, mobility: Mobility) -> bool {
        match self {
            Terrain::Road | Terrain::Forest => true,
            Terrain::River => mobility.cross_water,
            Terrain::Mountain => mobility.cross_mountain,
        }
    }

    /// Tile identifier used by the editor's terrain layer. Road is the base
    /// layer and has no identifier of its own.
    pub fn template_id(self) -> Option<&'static str> {
        match self {
            Terrain::Road => None,
            Terrain::Forest => Some("forest.png"),
            Terrain::River => Some("river.png"),
            Terrain::Mountain => Some("mountain.png"),
        }
    }

    pub fn from_template_id(id: &str) -> Option<Terrain> {
        Terrain::ALL.into_iter().find(|terrain| terrain.template_id() == Some(id))
    }

    pub fn glyph(self) -> char {
        match self {
            Terrain::Road => '.',
            Terrain::Forest => 'T',
            Terrain::River => '~',
            Terrain::Mountain => '^',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Character,
    Building,
    Chest,
}

impl EntityKind {
    pub fn default_mobility(self) -> Mobility {
        match self {
            EntityKind::Character => Mobility::FLYING,
            EntityKind::Building | EntityKind::Chest => Mobility::GROUND,
        }
    }
}

/// Terrain-crossing capabilities of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mobility {
    pub cross_water: bool,
    pub cross_mountain: bool,
}

impl Mobility {
    /// The generic unit used when a query names no entity.
    pub const GROUND: Mobility = Mobility { cross_water: false, cross_mountain: false };
    pub const FLYING: Mobility = Mobility { cross_water: true, cross_mountain: false };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_water_crossers_enter_rivers() {
        assert!(!Terrain::River.is_traversable_by(Mobility::GROUND));
        assert!(Terrain::River.is_traversable_by(Mobility::FLYING));
        assert!(!Terrain::Mountain.is_traversable_by(Mobility::FLYING));
        assert!(Terrain::Forest.is_traversable_by(Mobility::GROUND));
    }

    #[test]
    fn checked_offset_scales_and_rejects_overflow() {
        let origin = Pos::new(3, -2);
        assert_eq!(origin.checked_offset(1, -1, 4), Some(Pos::new(7, -6)));
        assert_eq!(Pos::new(i32::MAX, 0).checked_offset(1, 0, 1), None);
        assert_eq!(origin.checked_offset(0, 2, i32::MAX), None);
    }

    #[test]
    fn terrain_template_ids_round_trip_except_road() {
        for terrain in Terrain::ALL {
            match terrain.template_id() {
                Some(id) => assert_eq!(Terrain::from_template_id(id), Some(terrain)),
                None => assert_eq!(terrain, Terrain::Road),
            }
        }
        assert_eq!(Terrain::from_template_id("lava.png"), None);
    }
}
