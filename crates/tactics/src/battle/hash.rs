//! Stable snapshot hashing for deterministic verification.
//! Covers terrain, occupancy and unit health; pixel layout is ignored.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Battlefield {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.grid.width() as u64);
        hasher.write_u64(self.grid.height() as u64);
        for y in 0..self.grid.height() as i32 {
            for x in 0..self.grid.width() as i32 {
                let pos = Pos { y, x };
                let Some(tile) = self.grid.tile(pos) else {
                    hasher.write_u8(0);
                    continue;
                };
                hasher.write_u8(match tile.terrain {
                    Terrain::Road => 1,
                    Terrain::Forest => 2,
                    Terrain::River => 3,
                    Terrain::Mountain => 4,
                });
                match tile.occupant.and_then(|id| self.units.get(id)) {
                    Some(unit) => {
                        hasher.write_u8(1);
                        hasher.write(unit.template_id.as_bytes());
                        hasher.write_i32(unit.hp);
                        hasher.write_i32(unit.max_hp);
                    }
                    None => hasher.write_u8(0),
                }
            }
        }
        hasher.finish()
    }
}
