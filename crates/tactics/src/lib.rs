pub mod area;
pub mod battle;
pub mod config;
pub mod content;
pub mod entity;
pub mod grid;
pub mod mapgen;
pub mod pathfinding;
pub mod reach;
pub mod saved_map;
pub mod types;

pub use area::{AreaShape, ParseShapeError, compute_area};
pub use battle::{BattleError, Battlefield, MenuAction, MoveOutcome, UnitDetails, UnitMenu};
pub use config::{ConfigError, MapConfig};
pub use entity::{DamageEvent, Entity};
pub use grid::{GridMap, Tile, TileSlot, WorldPoint};
pub use mapgen::generate_battlefield;
pub use pathfinding::{WalkabilityMatrix, find_path};
pub use reach::compute_move_range;
pub use saved_map::{MapLayers, SavedMap, SavedMapError};
pub use types::*;
