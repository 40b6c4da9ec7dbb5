//! Editor map records and their conversion into a playable battlefield.
//!
//! JSON shape:
//! `{"size":[w,h],"layer":{"terrain":[[id|null,..],..],"object":[[id|null,..],..]}}`
//! Both layers are `h` rows of `w` cells; a terrain `null` is plain road.

use std::error::Error;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::battle::Battlefield;
use crate::config::MapConfig;
use crate::entity::Entity;
use crate::types::*;

pub type Layer = Vec<Vec<Option<String>>>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLayers {
    pub terrain: Layer,
    pub object: Layer,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedMap {
    pub size: [usize; 2],
    pub layer: MapLayers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SavedMapError {
    EmptySize,
    LayerShape { layer: &'static str, expected: [usize; 2] },
    UnknownTerrain { pos: Pos, id: String },
}

impl fmt::Display for SavedMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySize => write!(f, "saved map has a zero dimension"),
            Self::LayerShape { layer, expected } => {
                write!(f, "{layer} layer is not {}x{}", expected[0], expected[1])
            }
            Self::UnknownTerrain { pos, id } => write!(f, "unknown terrain {id:?} at {pos}"),
        }
    }
}

impl Error for SavedMapError {}

pub fn blank_layer(width: usize, height: usize) -> Layer {
    vec![vec![None; width]; height]
}

impl SavedMap {
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            size: [width, height],
            layer: MapLayers {
                terrain: blank_layer(width, height),
                object: blank_layer(width, height),
            },
        }
    }

    pub fn width(&self) -> usize {
        self.size[0]
    }

    pub fn height(&self) -> usize {
        self.size[1]
    }

    pub fn validate(&self) -> Result<(), SavedMapError> {
        let [width, height] = self.size;
        if width == 0 || height == 0 {
            return Err(SavedMapError::EmptySize);
        }
        for (name, layer) in [("terrain", &self.layer.terrain), ("object", &self.layer.object)] {
            if layer.len() != height || layer.iter().any(|row| row.len() != width) {
                return Err(SavedMapError::LayerShape { layer: name, expected: self.size });
            }
        }
        Ok(())
    }

    /// Snapshot of a battlefield's terrain and unit templates.
    pub fn from_battlefield(battle: &Battlefield) -> Self {
        let grid = battle.grid();
        let mut map = Self::blank(grid.width(), grid.height());
        for tile in grid.tiles() {
            let (x, y) = (tile.pos.x as usize, tile.pos.y as usize);
            map.layer.terrain[y][x] = tile.terrain.template_id().map(str::to_string);
            map.layer.object[y][x] = tile
                .occupant
                .and_then(|id| battle.unit(id))
                .map(|unit| unit.template_id.clone());
        }
        map
    }
}

impl Battlefield {
    /// Every cell becomes a tile; object identifiers spawn characters.
    pub fn from_saved_map(map: &SavedMap, config: MapConfig) -> Result<Self, SavedMapError> {
        map.validate()?;
        let config = MapConfig { width: map.width(), height: map.height(), ..config };
        let mut battle = Battlefield::new(config);
        for (y, row) in map.layer.terrain.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let pos = Pos { y: y as i32, x: x as i32 };
                let terrain = match cell {
                    None => Terrain::Road,
                    Some(id) => Terrain::from_template_id(id)
                        .ok_or_else(|| SavedMapError::UnknownTerrain { pos, id: id.clone() })?,
                };
                battle.grid_mut().set_terrain(pos, terrain, None);
            }
        }
        for (y, row) in map.layer.object.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(id) = cell {
                    let pos = Pos { y: y as i32, x: x as i32 };
                    battle.spawn(pos, Entity::from_template(EntityKind::Character, id));
                }
            }
        }
        Ok(battle)
    }
}
