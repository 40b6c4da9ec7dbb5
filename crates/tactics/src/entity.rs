//! Combat unit record and the damage rule.
//! Entities do not know where they stand; the grid is asked for that.

use crate::content::{DEFAULT_ATTACK, DEFAULT_HP, creature_template};
use crate::types::*;

#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub template_id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub cost: u32,
    pub mobility: Mobility,
}

/// Result of a damage application, handed to the presentation layer for the
/// floating number and hit flash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageEvent {
    pub target: EntityId,
    pub amount: i32,
    pub hp_before: i32,
    pub hp_after: i32,
}

impl Entity {
    /// Builds a unit at full health from the template table. Unknown templates
    /// get the default stats and use the identifier as their name.
    pub fn from_template(kind: EntityKind, template_id: &str) -> Self {
        let (name, hp, attack) = match creature_template(template_id) {
            Some(template) => (template.name.to_string(), template.hp, template.attack),
            None => (template_id.to_string(), DEFAULT_HP, DEFAULT_ATTACK),
        };
        Self {
            id: EntityId::default(),
            kind,
            template_id: template_id.to_string(),
            name,
            hp,
            max_hp: hp,
            attack,
            cost: 1,
            mobility: kind.default_mobility(),
        }
    }

    pub fn with_mobility(mut self, mobility: Mobility) -> Self {
        self.mobility = mobility;
        self
    }

    /// Subtracts `amount` and clamps into `[0, max_hp]`. Negative amounts heal.
    pub fn apply_damage(&mut self, amount: i32) -> DamageEvent {
        let hp_before = self.hp;
        self.hp = hp_before.saturating_sub(amount).clamp(0, self.max_hp);
        DamageEvent { target: self.id, amount, hp_before, hp_after: self.hp }
    }

    pub fn is_down(&self) -> bool {
        self.hp == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::keys;

    #[test]
    fn damage_clamps_at_zero() {
        let mut entity = Entity::from_template(EntityKind::Character, keys::NINJA);
        entity.hp = 20;
        entity.max_hp = 100;

        let event = entity.apply_damage(30);

        assert_eq!(entity.hp, 0);
        assert_eq!(event.hp_before, 20);
        assert_eq!(event.hp_after, 0);
        assert!(entity.is_down());
    }

    #[test]
    fn negative_damage_heals_up_to_max() {
        let mut entity = Entity::from_template(EntityKind::Character, keys::CERBERUS);
        entity.hp = 140;

        entity.apply_damage(-50);

        assert_eq!(entity.hp, entity.max_hp);
    }

    #[test]
    fn unknown_template_uses_default_stats() {
        let entity = Entity::from_template(EntityKind::Building, "tower.png");
        assert_eq!((entity.hp, entity.max_hp, entity.attack), (100, 100, 25));
        assert_eq!(entity.name, "tower.png");
        assert_eq!(entity.cost, 1);
        assert_eq!(entity.mobility, Mobility::GROUND);
    }

    #[test]
    fn characters_default_to_crossing_water() {
        let entity = Entity::from_template(EntityKind::Character, keys::RED_DRAGON);
        assert_eq!(entity.mobility, Mobility::FLYING);
        assert_eq!(entity.max_hp, 350);
    }
}
