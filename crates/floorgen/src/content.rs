use serde::{Deserialize, Serialize};

pub mod keys {
    pub const MONSTER_ORC: &str = "monster_orc";
    pub const MONSTER_TROLL: &str = "monster_troll";
    pub const MONSTER_GOBLIN: &str = "monster_goblin";

    pub const CONSUMABLE_HEALTH_POTION: &str = "consumable_health_potion";
    pub const CONSUMABLE_LIGHTNING_SCROLL: &str = "consumable_lightning_scroll";
    pub const CONSUMABLE_CONFUSION_SCROLL: &str = "consumable_confusion_scroll";
    pub const CONSUMABLE_FIREBALL_SCROLL: &str = "consumable_fireball_scroll";

    pub const EQUIPMENT_SWORD: &str = "equipment_sword";
    pub const EQUIPMENT_CHAIN_MAIL: &str = "equipment_chain_mail";
    pub const EQUIPMENT_POWER_RING: &str = "equipment_power_ring";
    pub const EQUIPMENT_DEFENSE_RING: &str = "equipment_defense_ring";
    pub const EQUIPMENT_OMNI_RING: &str = "equipment_omni_ring";
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Archetype {
    Orc,
    Troll,
    Goblin,
    HealthPotion,
    LightningScroll,
    ConfusionScroll,
    FireballScroll,
    Sword,
    ChainMail,
    PowerRing,
    DefenseRing,
    OmniRing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Monster,
    Item,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterStats {
    pub hp: i32,
    pub defense: i32,
    pub power: i32,
    pub xp_given: u32,
}

impl Archetype {
    pub fn id(self) -> &'static str {
        match self {
            Self::Orc => keys::MONSTER_ORC,
            Self::Troll => keys::MONSTER_TROLL,
            Self::Goblin => keys::MONSTER_GOBLIN,
            Self::HealthPotion => keys::CONSUMABLE_HEALTH_POTION,
            Self::LightningScroll => keys::CONSUMABLE_LIGHTNING_SCROLL,
            Self::ConfusionScroll => keys::CONSUMABLE_CONFUSION_SCROLL,
            Self::FireballScroll => keys::CONSUMABLE_FIREBALL_SCROLL,
            Self::Sword => keys::EQUIPMENT_SWORD,
            Self::ChainMail => keys::EQUIPMENT_CHAIN_MAIL,
            Self::PowerRing => keys::EQUIPMENT_POWER_RING,
            Self::DefenseRing => keys::EQUIPMENT_DEFENSE_RING,
            Self::OmniRing => keys::EQUIPMENT_OMNI_RING,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Orc => "Orc",
            Self::Troll => "Troll",
            Self::Goblin => "Goblin",
            Self::HealthPotion => "Health potion",
            Self::LightningScroll => "Lightning scroll",
            Self::ConfusionScroll => "Confusion scroll",
            Self::FireballScroll => "Fireball scroll",
            Self::Sword => "Sword",
            Self::ChainMail => "Chain mail",
            Self::PowerRing => "Ring of The Gorilla",
            Self::DefenseRing => "Ring of The Wall",
            Self::OmniRing => "Ring of Omni",
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Orc => 'o',
            Self::Troll => 'T',
            Self::Goblin => 'g',
            Self::HealthPotion => '!',
            Self::LightningScroll | Self::ConfusionScroll | Self::FireballScroll => '~',
            Self::Sword => '/',
            Self::ChainMail => '[',
            Self::PowerRing | Self::DefenseRing | Self::OmniRing => '*',
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::Orc | Self::Troll | Self::Goblin => Category::Monster,
            _ => Category::Item,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Orc => 0,
            Self::Troll => 1,
            Self::Goblin => 2,
            Self::HealthPotion => 3,
            Self::LightningScroll => 4,
            Self::ConfusionScroll => 5,
            Self::FireballScroll => 6,
            Self::Sword => 7,
            Self::ChainMail => 8,
            Self::PowerRing => 9,
            Self::DefenseRing => 10,
            Self::OmniRing => 11,
        }
    }

    /// Items dropped next to this archetype whenever it is placed.
    pub fn companions(self) -> &'static [Archetype] {
        match self {
            Self::Goblin => &[Self::Sword, Self::HealthPotion],
            _ => &[],
        }
    }
}

pub fn monster_stats(archetype: Archetype) -> Option<MonsterStats> {
    match archetype {
        Archetype::Orc => Some(MonsterStats { hp: 10, defense: 0, power: 4, xp_given: 30 }),
        Archetype::Troll => Some(MonsterStats { hp: 20, defense: 2, power: 5, xp_given: 90 }),
        Archetype::Goblin => Some(MonsterStats { hp: 2, defense: 1, power: 4, xp_given: 40 }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_monster_has_stats_and_no_item_does() {
        for archetype in [
            Archetype::Orc,
            Archetype::Troll,
            Archetype::Goblin,
            Archetype::HealthPotion,
            Archetype::Sword,
            Archetype::OmniRing,
        ] {
            assert_eq!(
                monster_stats(archetype).is_some(),
                archetype.category() == Category::Monster,
                "{archetype:?}"
            );
        }
    }

    #[test]
    fn companions_are_items() {
        for companion in Archetype::Goblin.companions() {
            assert_eq!(companion.category(), Category::Item);
        }
        assert!(Archetype::Orc.companions().is_empty());
    }
}
