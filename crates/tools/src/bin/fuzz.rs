use anyhow::{Result, ensure};
use clap::Parser;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tactics::{Battlefield, MapConfig, Pos, generate_battlefield};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
    #[arg(long, default_value_t = 20)]
    size: usize,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> Option<T> {
    if slice.is_empty() {
        return None;
    }
    Some(slice[rng.next_u64() as usize % slice.len()])
}

fn check_invariants(battle: &Battlefield) -> Result<()> {
    let grid = battle.grid();
    for unit in battle.units() {
        ensure!((0..=unit.max_hp).contains(&unit.hp), "Invariant failed: HP out of range");
        let holders = grid.tiles().filter(|tile| tile.occupant == Some(unit.id)).count();
        ensure!(holders == 1, "Invariant failed: unit on {holders} tiles");
    }
    for tile in grid.tiles() {
        if let Some(unit) = tile.occupant.and_then(|id| battle.unit(id)) {
            ensure!(
                tile.terrain.is_traversable_by(unit.mobility),
                "Invariant failed: unit standing on {:?} at {}",
                tile.terrain,
                tile.pos
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} turns...", args.seed, args.turns);
    let mut battle = generate_battlefield(args.seed, MapConfig::with_size(args.size, args.size));
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed ^ 0x9E37_79B9_7F4A_7C15);
    check_invariants(&battle)?;

    let (mut moves, mut attacks) = (0_u32, 0_u32);
    for _ in 0..args.turns {
        let occupied: Vec<Pos> =
            battle.grid().tiles().filter(|tile| tile.occupant.is_some()).map(|tile| tile.pos).collect();
        let Some(from) = choose(&mut rng, &occupied) else {
            break;
        };

        if rng.next_u64() % 2 == 0 {
            let targets = battle.move_targets(from);
            if let Some(to) = choose(&mut rng, targets.get(1..).unwrap_or_default())
                && let Ok(outcome) = battle.move_unit(from, to)
            {
                ensure!(outcome.path.first() == Some(&from), "Invariant failed: path start");
                ensure!(outcome.path.last() == Some(&to), "Invariant failed: path end");
                ensure!(
                    battle.grid().position_of(outcome.unit) == Some(to),
                    "Invariant failed: unit not at its destination"
                );
                moves += 1;
            }
        } else {
            let targets: Vec<Pos> = battle
                .attack_targets(from)
                .into_iter()
                .filter(|pos| battle.grid().is_occupied(*pos))
                .collect();
            if let Some(to) = choose(&mut rng, &targets) {
                battle.attack(from, to)?;
                attacks += 1;
            }
        }
        battle.end_turn();
        check_invariants(&battle)?;
    }

    println!("Moves: {moves}, attacks: {attacks}");
    println!("Snapshot Hash: {}", battle.snapshot_hash());
    println!("Fuzzing completed successfully.");
    Ok(())
}
