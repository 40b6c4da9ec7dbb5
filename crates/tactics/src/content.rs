//! Static creature templates keyed by the sprite identifier the map layers store.

pub mod keys {
    pub const RED_DRAGON: &str = "021-dragon.png";
    pub const BLUE_DRAGON: &str = "022-dragon-1.png";
    pub const VAMPIRE: &str = "023-demon.png";
    pub const CERBERUS: &str = "024-cerberus.png";
    pub const GREY_WEREWOLF: &str = "025-werewolf.png";
    pub const BLUE_WEREWOLF: &str = "026-werewolf-1.png";
    pub const HYDRA: &str = "027-hydra.png";
    pub const NINJA: &str = "028-ninja.png";
    pub const BLADE_SAMURAI: &str = "029-ninja-1.png";
    pub const BERSERKER: &str = "030-viking.png";
}

pub const DEFAULT_HP: i32 = 100;
pub const DEFAULT_ATTACK: i32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatureTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: i32,
    pub attack: i32,
    pub description: &'static str,
}

pub const CREATURES: [CreatureTemplate; 10] = [
    CreatureTemplate {
        id: keys::RED_DRAGON,
        name: "Red Dragon",
        hp: 350,
        attack: 120,
        description: "Lord of flame. Burns its foes with high health and higher attack.",
    },
    CreatureTemplate {
        id: keys::BLUE_DRAGON,
        name: "Blue Dragon",
        hp: 350,
        attack: 70,
        description: "Wields frost. Slow to act but very hard to bring down.",
    },
    CreatureTemplate {
        id: keys::VAMPIRE,
        name: "Vampire",
        hp: 250,
        attack: 50,
        description: "Night noble that drains life with every strike.",
    },
    CreatureTemplate {
        id: keys::CERBERUS,
        name: "Cerberus",
        hp: 150,
        attack: 50,
        description: "Three-headed gatekeeper that bites often and presses hard.",
    },
    CreatureTemplate {
        id: keys::GREY_WEREWOLF,
        name: "Grey Werewolf",
        hp: 200,
        attack: 65,
        description: "Moonlit berserker that grows stronger as it weakens.",
    },
    CreatureTemplate {
        id: keys::BLUE_WEREWOLF,
        name: "Blue Werewolf",
        hp: 200,
        attack: 60,
        description: "Northern wolf warrior whose bites leave bleeding wounds.",
    },
    CreatureTemplate {
        id: keys::HYDRA,
        name: "Hydra",
        hp: 300,
        attack: 120,
        description: "Many-headed beast that may regrow a little health each round.",
    },
    CreatureTemplate {
        id: keys::NINJA,
        name: "Ninja",
        hp: 200,
        attack: 60,
        description: "Hides in shadow, dodges blows and strikes from behind.",
    },
    CreatureTemplate {
        id: keys::BLADE_SAMURAI,
        name: "Blade Samurai",
        hp: 300,
        attack: 35,
        description: "Dual-blade fighter with fast, light combo attacks.",
    },
    CreatureTemplate {
        id: keys::BERSERKER,
        name: "Berserker",
        hp: 330,
        attack: 45,
        description: "Frontline raider who shrugs off control while enraged.",
    },
];

pub fn creature_template(id: &str) -> Option<&'static CreatureTemplate> {
    CREATURES.iter().find(|template| template.id == id)
}

pub fn creature_ids() -> impl Iterator<Item = &'static str> {
    CREATURES.iter().map(|template| template.id)
}
