//! Monster and item selection, placement on free walkable tiles, entry point and stairs.

use std::collections::BTreeSet;

use rand_chacha::rand_core::Rng;

use crate::content::Archetype;
use crate::types::{Pos, TileKind};

use super::config::PopulationConfig;
use super::grid::TileGrid;
use super::model::EntityPlacement;
use super::progression::{SpawnTable, max_value_for_depth};
use super::seed::{pick_weighted, random_usize};

pub(crate) struct Population {
    pub(crate) entry_tile: Pos,
    pub(crate) down_stairs_tile: Pos,
    pub(crate) entities: Vec<EntityPlacement>,
}

struct Placer<'a> {
    walkable: &'a [Pos],
    occupied: BTreeSet<Pos>,
    attempts: usize,
    /// Entities that may still be placed while one tile stays free for the stairs.
    budget: usize,
}

impl Placer<'_> {
    fn sample_free<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Pos> {
        for _ in 0..self.attempts {
            let pos = self.walkable[random_usize(rng, 0, self.walkable.len() - 1)];
            if !self.occupied.contains(&pos) {
                return Some(pos);
            }
        }
        None
    }

    fn first_free(&self) -> Option<Pos> {
        self.walkable.iter().copied().find(|pos| !self.occupied.contains(pos))
    }

    fn claim(&mut self, pos: Pos) {
        self.occupied.insert(pos);
    }

    fn place<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        archetype: Archetype,
        entities: &mut Vec<EntityPlacement>,
    ) -> Option<Pos> {
        if self.budget == 0 {
            log::debug!("no room left for {archetype:?}");
            return None;
        }
        let Some(pos) = self.sample_free(rng) else {
            log::warn!(
                "no free tile for {archetype:?} after {} attempts, skipping it",
                self.attempts
            );
            return None;
        };
        self.claim(pos);
        self.budget -= 1;
        entities.push(EntityPlacement { archetype, pos });
        Some(pos)
    }

    /// Puts each companion on the first free walkable tile around `anchor`.
    fn place_companions(
        &mut self,
        grid: &TileGrid,
        anchor: Pos,
        companions: &[Archetype],
        entities: &mut Vec<EntityPlacement>,
    ) {
        for &companion in companions {
            if self.budget == 0 {
                return;
            }
            let free = anchor
                .surrounding()
                .into_iter()
                .find(|&pos| grid.is_walkable(pos) && !self.occupied.contains(&pos));
            let Some(pos) = free else {
                log::debug!("no free neighbour of {anchor:?} for companion {companion:?}");
                continue;
            };
            self.claim(pos);
            self.budget -= 1;
            entities.push(EntityPlacement { archetype: companion, pos });
        }
    }
}

fn draw_archetypes<R: Rng + ?Sized>(
    rng: &mut R,
    table: &SpawnTable,
    depth: u32,
    count: usize,
) -> Vec<Archetype> {
    let unlocked = table.unlocked(depth);
    let weights: Vec<u32> = unlocked.iter().map(|&(_, weight)| weight).collect();
    (0..count)
        .filter_map(|_| pick_weighted(rng, &weights).map(|index| unlocked[index].0))
        .collect()
}

/// Chooses the entry tile, places monsters (with companions) and items, then the stairs.
///
/// `grid` must hold at least two walkable tiles so the entry and the stairs differ.
pub(crate) fn populate<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    depth: u32,
    config: &PopulationConfig,
) -> Population {
    let walkable = grid.walkable_positions();
    debug_assert!(walkable.len() >= 2, "population needs two walkable tiles");

    let entry_tile = walkable[random_usize(rng, 0, walkable.len() - 1)];
    let mut placer = Placer {
        walkable: &walkable,
        occupied: BTreeSet::from([entry_tile]),
        attempts: config.placement_attempts.max(1),
        budget: walkable.len().saturating_sub(2),
    };

    let max_monsters = max_value_for_depth(&config.max_monsters_by_depth, depth);
    let max_items = max_value_for_depth(&config.max_items_by_depth, depth);
    let monster_count = random_usize(rng, 0, max_monsters);
    let item_count = random_usize(rng, 0, max_items);
    let monsters = draw_archetypes(rng, &config.monsters, depth, monster_count);
    let items = draw_archetypes(rng, &config.items, depth, item_count);

    let mut entities = Vec::with_capacity(monsters.len() + items.len());
    for archetype in monsters {
        if let Some(pos) = placer.place(rng, archetype, &mut entities) {
            placer.place_companions(grid, pos, archetype.companions(), &mut entities);
        }
    }
    for archetype in items {
        placer.place(rng, archetype, &mut entities);
    }

    // The budget always leaves one tile unclaimed, so the fallback cannot miss.
    let down_stairs_tile = placer
        .sample_free(rng)
        .or_else(|| placer.first_free())
        .unwrap_or(entry_tile);
    grid.set_kind(down_stairs_tile, TileKind::DownStairs);
    if depth > 0 {
        grid.set_kind(entry_tile, TileKind::UpStairs);
    }

    log::debug!(
        "placed {} entities from {monster_count} monster and {item_count} item draws",
        entities.len()
    );
    Population { entry_tile, down_stairs_tile, entities }
}
