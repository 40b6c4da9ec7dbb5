//! Seeded random battlefield: mostly road with scattered forest, river and
//! mountain, and wandering creatures on some of the road tiles.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::battle::Battlefield;
use crate::config::MapConfig;
use crate::content::CREATURES;
use crate::entity::Entity;
use crate::types::*;

const ROAD_BAND: (f64, f64) = (0.1, 0.7);
const SCATTER_TERRAIN: [Terrain; 3] = [Terrain::Forest, Terrain::River, Terrain::Mountain];
const CREATURE_CHANCE: f64 = 0.1;

fn unit_f64(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn pick<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    slice[(rng.next_u64() % slice.len() as u64) as usize]
}

pub fn generate_battlefield(seed: u64, config: MapConfig) -> Battlefield {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut battle = Battlefield::new(config);
    let (width, height) = (config.width as i32, config.height as i32);

    let mut terrain = Vec::with_capacity(config.width * config.height);
    for y in 0..height {
        for x in 0..width {
            let r = unit_f64(&mut rng);
            let kind = if r > ROAD_BAND.0 && r < ROAD_BAND.1 {
                Terrain::Road
            } else {
                pick(&mut rng, &SCATTER_TERRAIN)
            };
            terrain.push((Pos { y, x }, kind, None));
        }
    }
    battle.grid_mut().bulk_init(terrain);

    let mut spawned = 0_usize;
    for y in 0..height {
        for x in 0..width {
            let pos = Pos { y, x };
            let r = unit_f64(&mut rng);
            if battle.grid().terrain_at(pos) != Some(Terrain::Road) || r > CREATURE_CHANCE {
                continue;
            }
            let template = pick(&mut rng, &CREATURES);
            if battle.spawn(pos, Entity::from_template(EntityKind::Character, template.id)).is_some()
            {
                spawned += 1;
            }
        }
    }

    tracing::debug!(seed, width, height, spawned, "battlefield generated");
    battle
}
