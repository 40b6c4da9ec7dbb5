use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use editor::map_library::{MapLibrary, load_file, write_atomic};
use tactics::{
    AreaShape, Battlefield, MapConfig, Pos, SavedMap, compute_area, compute_move_range,
    find_path, generate_battlefield,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML map configuration; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random battlefield and print it, or save it as map JSON
    Generate {
        #[arg(short, long, default_value_t = 42)]
        seed: u64,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Tiles reachable from a unit within the move budget
    MoveRange {
        #[arg(short, long)]
        map: PathBuf,
        #[arg(short)]
        x: i32,
        #[arg(short)]
        y: i32,
        #[arg(short, long, default_value_t = 3)]
        budget: u32,
    },
    /// Area-of-effect tiles around an origin
    Area {
        #[arg(short)]
        x: i32,
        #[arg(short)]
        y: i32,
        #[arg(short, long, default_value = "cross")]
        shape: AreaShape,
        #[arg(short, long, default_value_t = 1)]
        rings: u32,
    },
    /// Shortest 4-directional path on a saved map
    Path {
        #[arg(short, long)]
        map: PathBuf,
        #[arg(long, value_parser = parse_pos)]
        from: Pos,
        #[arg(long, value_parser = parse_pos)]
        to: Pos,
    },
    /// Names of the maps stored in a map library
    Maps {
        /// Library root; the platform data directory when omitted
        #[arg(short, long)]
        root: Option<PathBuf>,
    },
}

fn parse_pos(s: &str) -> Result<Pos, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Pos::new(x, y))
}

fn load_config(path: Option<&Path>) -> Result<MapConfig> {
    match path {
        Some(path) => MapConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(MapConfig::default()),
    }
}

fn load_battlefield(path: &Path, config: MapConfig) -> Result<Battlefield> {
    let map = load_file(path).with_context(|| format!("Failed to read map: {}", path.display()))?;
    Battlefield::from_saved_map(&map, config)
        .with_context(|| format!("Failed to build battlefield from {}", path.display()))
}

fn render(battle: &Battlefield, marks: &[Pos]) -> String {
    let grid = battle.grid();
    let mut out = String::new();
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let pos = Pos { y, x };
            let glyph = if battle.unit_at(pos).is_some() {
                '@'
            } else if marks.contains(&pos) {
                '*'
            } else {
                grid.terrain_at(pos).map_or(' ', |terrain| terrain.glyph())
            };
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

/// Rings past the farthest map edge from `origin` cannot land inside the map.
fn clamp_rings(rings: u32, origin: Pos, config: &MapConfig) -> u32 {
    let (x, y) = (i64::from(origin.x), i64::from(origin.y));
    let (last_x, last_y) = (config.width as i64 - 1, config.height as i64 - 1);
    let reach = x.abs().max((x - last_x).abs()).max(y.abs()).max((y - last_y).abs());
    rings.min(u32::try_from(reach).unwrap_or(u32::MAX))
}

fn format_positions(positions: &[Pos]) -> String {
    positions.iter().map(Pos::to_string).collect::<Vec<_>>().join(" ")
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    tracing::debug!(width = config.width, height = config.height, "map config loaded");

    match args.command {
        Command::Generate { seed, out } => {
            let battle = generate_battlefield(seed, config);
            match out {
                Some(path) => {
                    write_atomic(&path, &SavedMap::from_battlefield(&battle))
                        .with_context(|| format!("Failed to write map: {}", path.display()))?;
                    println!("Saved {}x{} map to {}", config.width, config.height, path.display());
                }
                None => print!("{}", render(&battle, &[])),
            }
            println!("Units: {}", battle.units().count());
            println!("Snapshot Hash: {}", battle.snapshot_hash());
        }
        Command::MoveRange { map, x, y, budget } => {
            let battle = load_battlefield(&map, config)?;
            let origin = Pos::new(x, y);
            let Some(unit) = battle.unit_at(origin) else {
                bail!("No unit at {origin}");
            };
            let reach = compute_move_range(battle.grid(), origin, budget, Some(unit));
            print!("{}", render(&battle, &reach));
            println!("Reachable ({}): {}", reach.len(), format_positions(&reach));
        }
        Command::Area { x, y, shape, rings } => {
            let origin = Pos::new(x, y);
            let area = compute_area(origin, shape, clamp_rings(rings, origin, &config), |p| {
                p.x >= 0 && p.y >= 0 && (p.x as usize) < config.width && (p.y as usize) < config.height
            });
            println!("{shape} x{rings} at {origin}: {}", format_positions(&area));
        }
        Command::Path { map, from, to } => {
            let battle = load_battlefield(&map, config)?;
            let matrix = battle.grid().walkability_matrix_for(battle.unit_at(from));
            let path = find_path(&matrix, from, to);
            if path.is_empty() {
                println!("No path from {from} to {to}");
            } else {
                print!("{}", render(&battle, &path));
                println!("Path ({} steps): {}", path.len() - 1, format_positions(&path));
            }
        }
        Command::Maps { root } => {
            let library = match root {
                Some(root) => MapLibrary::new(root),
                None => MapLibrary::open_default()?,
            };
            for name in library.list()? {
                println!("{name}");
            }
        }
    }

    Ok(())
}
