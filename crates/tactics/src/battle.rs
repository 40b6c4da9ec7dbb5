//! Battle session: the grid, the unit arena and the player actions built on
//! the spatial queries. Presentation code selects tiles and animates the
//! returned outcomes; all state changes happen here first.

use std::error::Error;
use std::fmt;

use slotmap::SlotMap;

use crate::area::{AreaShape, compute_area};
use crate::config::MapConfig;
use crate::content::creature_template;
use crate::entity::{DamageEvent, Entity};
use crate::grid::{GridMap, WorldPoint};
use crate::pathfinding::find_path;
use crate::reach::compute_move_range;
use crate::types::*;

mod hash;

pub const MOVE_BUDGET: u32 = 3;
pub const ATTACK_SHAPE: AreaShape = AreaShape::Cross;
pub const ATTACK_RINGS: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    Inspect,
    Move,
    Attack,
    EndTurn,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitMenu {
    pub pos: Pos,
    pub unit: EntityId,
    pub actions: Vec<MenuAction>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitDetails {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub description: Option<&'static str>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MoveOutcome {
    pub unit: EntityId,
    pub path: Vec<Pos>,
    pub waypoints: Vec<WorldPoint>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleError {
    NoUnitAt(Pos),
    OutOfRange { from: Pos, to: Pos },
    NoTargetAt(Pos),
}

impl fmt::Display for BattleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoUnitAt(pos) => write!(f, "no unit at {pos}"),
            Self::OutOfRange { from, to } => write!(f, "{to} is out of range from {from}"),
            Self::NoTargetAt(pos) => write!(f, "nothing to attack at {pos}"),
        }
    }
}

impl Error for BattleError {}

#[derive(Clone)]
pub struct Battlefield {
    config: MapConfig,
    grid: GridMap,
    units: SlotMap<EntityId, Entity>,
}

impl Battlefield {
    pub fn new(config: MapConfig) -> Self {
        Self { grid: GridMap::new(&config), config, units: SlotMap::with_key() }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridMap {
        &mut self.grid
    }

    pub fn unit(&self, id: EntityId) -> Option<&Entity> {
        self.units.get(id)
    }

    pub fn units(&self) -> impl Iterator<Item = &Entity> {
        self.units.values()
    }

    pub fn unit_at(&self, pos: Pos) -> Option<&Entity> {
        self.grid.occupant(pos).and_then(|id| self.units.get(id))
    }

    /// Places a new unit on an existing, free tile.
    pub fn spawn(&mut self, pos: Pos, entity: Entity) -> Option<EntityId> {
        if self.grid.tile(pos).is_none() || self.grid.is_occupied(pos) {
            tracing::warn!(x = pos.x, y = pos.y, "cannot spawn on missing or occupied tile");
            return None;
        }
        let id = self.units.insert(entity);
        self.units[id].id = id;
        self.grid.set_occupant(pos, Some(id));
        Some(id)
    }

    pub fn menu_for(&self, pos: Pos) -> Option<UnitMenu> {
        let unit = self.grid.occupant(pos)?;
        Some(UnitMenu {
            pos,
            unit,
            actions: vec![
                MenuAction::Inspect,
                MenuAction::Move,
                MenuAction::Attack,
                MenuAction::EndTurn,
            ],
        })
    }

    pub fn inspect(&self, pos: Pos) -> Option<UnitDetails> {
        let unit = self.unit_at(pos)?;
        Some(UnitDetails {
            name: unit.name.clone(),
            hp: unit.hp,
            max_hp: unit.max_hp,
            attack: unit.attack,
            description: creature_template(&unit.template_id).map(|template| template.description),
        })
    }

    /// Tiles the unit at `pos` may move to, origin included.
    pub fn move_targets(&self, pos: Pos) -> Vec<Pos> {
        match self.unit_at(pos) {
            Some(unit) => compute_move_range(&self.grid, pos, MOVE_BUDGET, Some(unit)),
            None => Vec::new(),
        }
    }

    pub fn attack_targets(&self, pos: Pos) -> Vec<Pos> {
        if !self.grid.is_occupied(pos) {
            return Vec::new();
        }
        compute_area(pos, ATTACK_SHAPE, ATTACK_RINGS, |p| self.grid.in_bounds(p))
    }

    /// Relocates the unit at `from` to `to`. The grid is updated before the
    /// caller animates along the returned path.
    pub fn move_unit(&mut self, from: Pos, to: Pos) -> Result<MoveOutcome, BattleError> {
        let unit = self.unit_at(from).ok_or(BattleError::NoUnitAt(from))?;
        if to == from || !self.move_targets(from).contains(&to) {
            return Err(BattleError::OutOfRange { from, to });
        }
        let id = unit.id;
        let matrix = self.grid.walkability_matrix_for(Some(unit));
        let path = find_path(&matrix, from, to);

        self.grid.clear_occupant(from);
        self.grid.set_occupant(to, Some(id));
        tracing::debug!(from = %from, to = %to, steps = path.len(), "unit moved");

        let waypoints = path.iter().map(|p| self.grid.grid_to_world_center(*p)).collect();
        Ok(MoveOutcome { unit: id, path, waypoints })
    }

    pub fn attack(&mut self, from: Pos, to: Pos) -> Result<DamageEvent, BattleError> {
        let attack = self.unit_at(from).ok_or(BattleError::NoUnitAt(from))?.attack;
        if !self.attack_targets(from).contains(&to) {
            return Err(BattleError::OutOfRange { from, to });
        }
        let target = self.grid.occupant(to).ok_or(BattleError::NoTargetAt(to))?;
        let unit = self.units.get_mut(target).ok_or(BattleError::NoTargetAt(to))?;
        let event = unit.apply_damage(attack);
        tracing::debug!(
            target = %to,
            amount = event.amount,
            hp = event.hp_after,
            "damage applied"
        );
        if unit.is_down() {
            tracing::debug!(target = %to, name = %unit.name, "unit is down");
        }
        Ok(event)
    }

    /// Turn order is not modelled; ending a turn changes nothing.
    pub fn end_turn(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;

    fn open_field(width: usize, height: usize) -> Battlefield {
        let mut battle = Battlefield::new(MapConfig::with_size(width, height));
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                battle.grid_mut().set_terrain(Pos { y, x }, Terrain::Road, None);
            }
        }
        battle
    }

    fn ninja() -> Entity {
        Entity::from_template(EntityKind::Character, keys::NINJA)
    }

    #[test]
    fn spawn_rejects_occupied_and_missing_tiles() {
        let mut battle = Battlefield::new(MapConfig::with_size(3, 3));
        assert!(battle.spawn(Pos { y: 0, x: 0 }, ninja()).is_none());

        battle.grid_mut().set_terrain(Pos { y: 0, x: 0 }, Terrain::Road, None);
        assert!(battle.spawn(Pos { y: 0, x: 0 }, ninja()).is_some());
        assert!(battle.spawn(Pos { y: 0, x: 0 }, ninja()).is_none());
        assert_eq!(battle.units().count(), 1);
    }

    #[test]
    fn menu_only_opens_on_units() {
        let mut battle = open_field(3, 3);
        let pos = Pos { y: 1, x: 1 };
        battle.spawn(pos, ninja()).expect("spawn");

        let menu = battle.menu_for(pos).expect("menu");
        assert_eq!(menu.actions.len(), 4);
        assert!(battle.menu_for(Pos { y: 0, x: 0 }).is_none());
    }

    #[test]
    fn move_relocates_occupant_and_returns_path() {
        let mut battle = open_field(6, 6);
        let from = Pos { y: 0, x: 0 };
        let to = Pos { y: 1, x: 2 };
        let id = battle.spawn(from, ninja()).expect("spawn");

        let outcome = battle.move_unit(from, to).expect("move");

        assert_eq!(outcome.unit, id);
        assert_eq!(outcome.path.first(), Some(&from));
        assert_eq!(outcome.path.last(), Some(&to));
        assert_eq!(outcome.path.len(), 4);
        assert_eq!(outcome.waypoints.len(), 4);
        assert!(!battle.grid().is_occupied(from));
        assert_eq!(battle.grid().position_of(id), Some(to));
    }

    #[test]
    fn move_beyond_budget_is_rejected() {
        let mut battle = open_field(6, 6);
        let from = Pos { y: 0, x: 0 };
        battle.spawn(from, ninja()).expect("spawn");

        let err = battle.move_unit(from, Pos { y: 2, x: 2 }).expect_err("too far");

        assert_eq!(err, BattleError::OutOfRange { from, to: Pos { y: 2, x: 2 } });
        assert!(battle.grid().is_occupied(from));
    }

    #[test]
    fn attack_subtracts_attacker_power() {
        let mut battle = open_field(3, 3);
        let attacker = Pos { y: 1, x: 1 };
        let defender = Pos { y: 0, x: 1 };
        battle
            .spawn(attacker, Entity::from_template(EntityKind::Character, keys::HYDRA))
            .expect("spawn attacker");
        let target = battle.spawn(defender, ninja()).expect("spawn defender");

        let event = battle.attack(attacker, defender).expect("attack");

        assert_eq!(event.target, target);
        assert_eq!(event.hp_after, 80);
        assert_eq!(battle.unit(target).map(|unit| unit.hp), Some(80));
    }

    #[test]
    fn attack_needs_target_in_cross() {
        let mut battle = open_field(3, 3);
        let attacker = Pos { y: 1, x: 1 };
        battle.spawn(attacker, ninja()).expect("spawn");
        battle.spawn(Pos { y: 0, x: 0 }, ninja()).expect("spawn diagonal");

        assert_eq!(
            battle.attack(attacker, Pos { y: 0, x: 0 }),
            Err(BattleError::OutOfRange { from: attacker, to: Pos { y: 0, x: 0 } })
        );
        assert_eq!(
            battle.attack(attacker, Pos { y: 1, x: 2 }),
            Err(BattleError::NoTargetAt(Pos { y: 1, x: 2 }))
        );
    }

    #[test]
    fn downed_units_keep_their_tile() {
        let mut battle = open_field(2, 1);
        let attacker = Pos { y: 0, x: 0 };
        let defender = Pos { y: 0, x: 1 };
        battle
            .spawn(attacker, Entity::from_template(EntityKind::Character, keys::RED_DRAGON))
            .expect("spawn");
        let target = battle.spawn(defender, ninja()).expect("spawn");

        battle.attack(attacker, defender).expect("first hit");
        battle.attack(attacker, defender).expect("second hit");

        assert_eq!(battle.unit(target).map(|unit| unit.hp), Some(0));
        assert_eq!(battle.grid().occupant(defender), Some(target));
    }

    #[test]
    fn inspect_reports_template_details() {
        let mut battle = open_field(2, 2);
        battle.spawn(Pos { y: 1, x: 1 }, ninja()).expect("spawn");

        let details = battle.inspect(Pos { y: 1, x: 1 }).expect("details");

        assert_eq!(details.name, "Ninja");
        assert_eq!((details.hp, details.max_hp, details.attack), (200, 200, 60));
        assert!(details.description.is_some());
    }
}
