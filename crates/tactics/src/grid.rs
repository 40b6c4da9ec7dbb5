//! Tile-indexed map store: terrain, occupancy and the walkability rule.
//! Every other spatial query reads the grid through this module.

use crate::config::MapConfig;
use crate::entity::Entity;
use crate::pathfinding::WalkabilityMatrix;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub pos: Pos,
    pub terrain: Terrain,
    pub occupant: Option<EntityId>,
}

/// A grid cell before and after map generation has written it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TileSlot {
    #[default]
    Empty,
    Tile(Tile),
}

impl TileSlot {
    pub fn tile(&self) -> Option<&Tile> {
        match self {
            TileSlot::Empty => None,
            TileSlot::Tile(tile) => Some(tile),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorldPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct GridMap {
    width: usize,
    height: usize,
    tile_size: f32,
    offset_x: f32,
    offset_y: f32,
    slots: Vec<TileSlot>,
}

impl GridMap {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            tile_size: config.tile_size,
            offset_x: config.offset_x,
            offset_y: config.offset_y,
            slots: vec![TileSlot::Empty; config.width * config.height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// (Re)creates the tile record at `pos`. An entity already standing
    /// elsewhere is lifted off its old tile first.
    pub fn set_terrain(&mut self, pos: Pos, terrain: Terrain, occupant: Option<EntityId>) {
        if !self.in_bounds(pos) {
            tracing::warn!(x = pos.x, y = pos.y, "invalid position for terrain write");
            return;
        }
        if let Some(id) = occupant {
            self.detach(id, pos);
        }
        let idx = self.index(pos);
        self.slots[idx] = TileSlot::Tile(Tile { pos, terrain, occupant });
    }

    pub fn bulk_init(&mut self, tiles: impl IntoIterator<Item = (Pos, Terrain, Option<EntityId>)>) {
        for (pos, terrain, occupant) in tiles {
            self.set_terrain(pos, terrain, occupant);
        }
    }

    /// Replaces the occupant reference of an existing tile. Tiles without
    /// terrain cannot be occupied.
    pub fn set_occupant(&mut self, pos: Pos, occupant: Option<EntityId>) {
        if !self.in_bounds(pos) {
            tracing::warn!(x = pos.x, y = pos.y, "invalid position for occupant write");
            return;
        }
        let idx = self.index(pos);
        if matches!(self.slots[idx], TileSlot::Empty) {
            tracing::debug!(x = pos.x, y = pos.y, "ignoring occupant write on unset tile");
            return;
        }
        if let Some(id) = occupant {
            self.detach(id, pos);
        }
        if let TileSlot::Tile(tile) = &mut self.slots[idx] {
            tile.occupant = occupant;
        }
    }

    pub fn clear_occupant(&mut self, pos: Pos) {
        self.set_occupant(pos, None);
    }

    pub fn tile(&self, pos: Pos) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.slots[self.index(pos)].tile()
    }

    pub fn terrain_at(&self, pos: Pos) -> Option<Terrain> {
        self.tile(pos).map(|tile| tile.terrain)
    }

    pub fn occupant(&self, pos: Pos) -> Option<EntityId> {
        self.tile(pos).and_then(|tile| tile.occupant)
    }

    pub fn is_occupied(&self, pos: Pos) -> bool {
        self.occupant(pos).is_some()
    }

    pub fn position_of(&self, id: EntityId) -> Option<Pos> {
        self.tiles().find(|tile| tile.occupant == Some(id)).map(|tile| tile.pos)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().filter_map(TileSlot::tile)
    }

    /// Whether `for_entity` (or a generic ground unit when `None`) may stand on
    /// `pos`. Unset tiles and tiles held by another entity are never walkable.
    pub fn is_walkable(&self, pos: Pos, for_entity: Option<&Entity>) -> bool {
        let Some(tile) = self.tile(pos) else {
            return false;
        };
        if let Some(occupant) = tile.occupant
            && for_entity.is_none_or(|entity| entity.id != occupant)
        {
            return false;
        }
        let mobility = for_entity.map_or(Mobility::GROUND, |entity| entity.mobility);
        tile.terrain.is_traversable_by(mobility)
    }

    /// Snapshot for the path resolver using the generic-unit view.
    pub fn walkability_matrix(&self) -> WalkabilityMatrix {
        self.walkability_matrix_for(None)
    }

    pub fn walkability_matrix_for(&self, for_entity: Option<&Entity>) -> WalkabilityMatrix {
        let mut matrix = WalkabilityMatrix::blocked(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos { y: y as i32, x: x as i32 };
                if self.is_walkable(pos, for_entity) {
                    matrix.set_open(pos, true);
                }
            }
        }
        matrix
    }

    pub fn grid_to_world_center(&self, pos: Pos) -> WorldPoint {
        if !self.in_bounds(pos) {
            tracing::warn!(x = pos.x, y = pos.y, "invalid grid position for world conversion");
            return WorldPoint::default();
        }
        WorldPoint {
            x: pos.x as f32 * self.tile_size + self.offset_x,
            y: pos.y as f32 * self.tile_size + self.offset_y,
        }
    }

    fn detach(&mut self, id: EntityId, keep: Pos) {
        for slot in &mut self.slots {
            if let TileSlot::Tile(tile) = slot
                && tile.occupant == Some(id)
                && tile.pos != keep
            {
                tile.occupant = None;
            }
        }
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
