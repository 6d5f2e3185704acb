//! Depth progression rules: entity budgets, spawn tables, and base algorithm rotation.

use serde::{Deserialize, Serialize};

use crate::content::Archetype;

use super::config::Algorithm;

pub const MAX_MONSTERS_BY_DEPTH: [(u32, usize); 3] = [(0, 2), (4, 3), (6, 5)];
pub const MAX_ITEMS_BY_DEPTH: [(u32, usize); 3] = [(0, 1), (4, 2), (6, 3)];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTier {
    pub min_depth: u32,
    pub entries: Vec<(Archetype, u32)>,
}

/// Weighted archetype lists keyed by the depth at which they unlock.
///
/// A lookup at depth `d` merges every tier with `min_depth <= d`. An archetype listed in
/// several unlocked tiers keeps the sum of its weights.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTable {
    pub tiers: Vec<SpawnTier>,
}

impl SpawnTable {
    pub fn new(tiers: Vec<SpawnTier>) -> Self {
        Self { tiers }
    }

    /// Effective `(archetype, weight)` list at `depth`, in first-unlock order.
    pub fn unlocked(&self, depth: u32) -> Vec<(Archetype, u32)> {
        let mut merged: Vec<(Archetype, u32)> = Vec::new();
        for tier in self.tiers.iter().filter(|tier| tier.min_depth <= depth) {
            for &(archetype, weight) in &tier.entries {
                match merged.iter_mut().find(|(existing, _)| *existing == archetype) {
                    Some((_, total)) => *total += weight,
                    None => merged.push((archetype, weight)),
                }
            }
        }
        merged.retain(|&(_, weight)| weight > 0);
        merged
    }
}

fn tier(min_depth: u32, entries: &[(Archetype, u32)]) -> SpawnTier {
    SpawnTier { min_depth, entries: entries.to_vec() }
}

pub fn default_monster_table() -> SpawnTable {
    SpawnTable::new(vec![
        tier(0, &[(Archetype::Orc, 80), (Archetype::Goblin, 50)]),
        tier(3, &[(Archetype::Troll, 15)]),
        tier(5, &[(Archetype::Troll, 30)]),
        tier(7, &[(Archetype::Orc, 25), (Archetype::Troll, 45)]),
    ])
}

pub fn default_item_table() -> SpawnTable {
    SpawnTable::new(vec![
        tier(
            0,
            &[
                (Archetype::HealthPotion, 35),
                (Archetype::PowerRing, 5),
                (Archetype::DefenseRing, 5),
            ],
        ),
        tier(2, &[(Archetype::ConfusionScroll, 10)]),
        tier(
            4,
            &[
                (Archetype::LightningScroll, 25),
                (Archetype::Sword, 10),
                (Archetype::PowerRing, 5),
                (Archetype::DefenseRing, 5),
            ],
        ),
        tier(
            6,
            &[
                (Archetype::FireballScroll, 25),
                (Archetype::ChainMail, 10),
                (Archetype::OmniRing, 5),
            ],
        ),
        tier(
            9,
            &[
                (Archetype::HealthPotion, 20),
                (Archetype::ChainMail, 10),
                (Archetype::ConfusionScroll, 20),
            ],
        ),
    ])
}

/// Value of the highest row whose threshold is not above `depth`, or zero.
pub fn max_value_for_depth(rows: &[(u32, usize)], depth: u32) -> usize {
    rows.iter()
        .filter(|(min_depth, _)| *min_depth <= depth)
        .max_by_key(|(min_depth, _)| *min_depth)
        .map_or(0, |&(_, value)| value)
}

pub fn algorithm_for_depth(depth: u32) -> Algorithm {
    match depth % 3 {
        0 => Algorithm::Cave,
        1 => Algorithm::Rooms,
        _ => Algorithm::Bsp,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn archetypes(table: &SpawnTable, depth: u32) -> BTreeSet<Archetype> {
        table.unlocked(depth).into_iter().map(|(archetype, _)| archetype).collect()
    }

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(max_value_for_depth(&MAX_MONSTERS_BY_DEPTH, 0), 2);
        assert_eq!(max_value_for_depth(&MAX_MONSTERS_BY_DEPTH, 3), 2);
        assert_eq!(max_value_for_depth(&MAX_MONSTERS_BY_DEPTH, 4), 3);
        assert_eq!(max_value_for_depth(&MAX_MONSTERS_BY_DEPTH, 60), 5);
        assert_eq!(max_value_for_depth(&[(2, 9)], 1), 0);
    }

    #[test]
    fn unlocked_archetypes_only_grow_with_depth() {
        for table in [default_monster_table(), default_item_table()] {
            for depth in 0..12 {
                let shallow = archetypes(&table, depth);
                let deeper = archetypes(&table, depth + 1);
                assert!(shallow.is_subset(&deeper), "depth {depth} lost entries");
            }
        }
    }

    #[test]
    fn repeated_archetypes_add_their_weights() {
        let table = default_monster_table();
        assert_eq!(
            table.unlocked(4),
            vec![(Archetype::Orc, 80), (Archetype::Goblin, 50), (Archetype::Troll, 15)]
        );
        assert_eq!(
            table.unlocked(7),
            vec![(Archetype::Orc, 105), (Archetype::Goblin, 50), (Archetype::Troll, 90)]
        );
    }

    #[test]
    fn goblins_can_spawn_from_the_first_floor() {
        let monsters = default_monster_table();
        assert_eq!(monsters.unlocked(0), vec![(Archetype::Orc, 80), (Archetype::Goblin, 50)]);
        assert_eq!(monsters.unlocked(1), monsters.unlocked(0));
    }

    #[test]
    fn early_unlocks_stay_available_deep() {
        let items = default_item_table();
        assert!(archetypes(&items, 10).contains(&Archetype::HealthPotion));
        assert!(archetypes(&items, 10).contains(&Archetype::ConfusionScroll));
        assert!(!archetypes(&items, 1).contains(&Archetype::ConfusionScroll));
    }

    #[test]
    fn algorithm_rotates_with_depth() {
        assert_eq!(algorithm_for_depth(0), Algorithm::Cave);
        assert_eq!(algorithm_for_depth(4), Algorithm::Rooms);
        assert_eq!(algorithm_for_depth(8), Algorithm::Bsp);
    }
}
