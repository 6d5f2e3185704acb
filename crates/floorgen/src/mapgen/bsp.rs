//! Binary space partition layout stored as a handle-indexed arena.

use rand_chacha::rand_core::Rng;
use slotmap::{SlotMap, new_key_type};

use super::config::BspConfig;
use super::dig::carve_tunnel;
use super::grid::TileGrid;
use super::rooms::Room;
use super::seed::{random_fraction, random_usize};
use crate::types::Tile;

new_key_type! {
    pub struct BspNodeId;
}

const SPLIT_LOW: f64 = 0.3;
const SPLIT_HIGH: f64 = 0.7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartitionRect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

#[derive(Clone, Debug)]
pub struct BspNode {
    pub rect: PartitionRect,
    pub children: Option<(BspNodeId, BspNodeId)>,
}

#[derive(Clone, Debug)]
pub struct BspTree {
    nodes: SlotMap<BspNodeId, BspNode>,
    root: BspNodeId,
}

impl BspTree {
    pub fn new(rect: PartitionRect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(BspNode { rect, children: None });
        Self { nodes, root }
    }

    pub fn root(&self) -> BspNodeId {
        self.root
    }

    pub fn node(&self, id: BspNodeId) -> &BspNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Splits `id` along its longer side and recurses into both halves while `depth > 0`.
    ///
    /// A node whose split side is shorter than two tiles stays a leaf.
    pub fn split<R: Rng + ?Sized>(&mut self, id: BspNodeId, depth: u32, rng: &mut R) {
        let rect = self.nodes[id].rect;
        let fraction = random_fraction(rng, SPLIT_LOW, SPLIT_HIGH);
        let split_horizontal = rect.height >= rect.width;
        let span = if split_horizontal { rect.height } else { rect.width };
        if span < 2 {
            return;
        }
        let first = ((span as f64 * fraction) as usize).clamp(1, span - 1);

        let (first_rect, second_rect) = if split_horizontal {
            (
                PartitionRect { height: first, ..rect },
                PartitionRect { y: rect.y + first, height: rect.height - first, ..rect },
            )
        } else {
            (
                PartitionRect { width: first, ..rect },
                PartitionRect { x: rect.x + first, width: rect.width - first, ..rect },
            )
        };

        let first_id = self.nodes.insert(BspNode { rect: first_rect, children: None });
        let second_id = self.nodes.insert(BspNode { rect: second_rect, children: None });
        self.nodes[id].children = Some((first_id, second_id));

        if depth > 0 {
            self.split(first_id, depth - 1, rng);
            self.split(second_id, depth - 1, rng);
        }
    }

    /// Every childless node, left subtree before right.
    pub fn leaves(&self) -> Vec<BspNodeId> {
        let mut leaves = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match self.nodes[id].children {
                Some((first, second)) => {
                    stack.push(second);
                    stack.push(first);
                }
                None => leaves.push(id),
            }
        }
        leaves
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LeafRoom {
    pub leaf: BspNodeId,
    pub padding: Padding,
    pub room: Room,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Padding {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

/// The leaf rectangle shrunk by `padding`, unless what is left has no interior.
fn padded(rect: PartitionRect, padding: Padding) -> Option<Room> {
    let horizontal = padding.left + padding.right;
    let vertical = padding.top + padding.bottom;
    if rect.width <= horizontal || rect.height <= vertical {
        return None;
    }
    let room = Room {
        x: rect.x + padding.left,
        y: rect.y + padding.top,
        width: rect.width - horizontal,
        height: rect.height - vertical,
    };
    room.inner().map(|_| room)
}

fn overlaps(a: &Room, b: &Room) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

pub(crate) struct BspLayout {
    pub(crate) tree: BspTree,
    pub(crate) rooms: Vec<LeafRoom>,
}

pub(crate) fn generate_bsp<R: Rng + ?Sized>(
    grid: &mut TileGrid,
    rng: &mut R,
    config: &BspConfig,
) -> BspLayout {
    let bounds = PartitionRect { x: 0, y: 0, width: grid.width(), height: grid.height() };
    let mut tree = BspTree::new(bounds);
    let root = tree.root();
    tree.split(root, config.split_depth, rng);

    let mut rooms: Vec<LeafRoom> = Vec::new();
    for leaf in tree.leaves() {
        let mut draw = || random_usize(rng, config.min_padding, config.max_padding);
        let padding = Padding { left: draw(), top: draw(), right: draw(), bottom: draw() };
        let Some(room) = padded(tree.node(leaf).rect, padding) else {
            continue;
        };
        if rooms.iter().any(|accepted| overlaps(&accepted.room, &room)) {
            continue;
        }
        rooms.push(LeafRoom { leaf, padding, room });
    }

    for placed in &rooms {
        let room = placed.room;
        grid.slice_mut(room.x, room.y, room.right(), room.bottom()).fill(Tile::floor());
    }
    for pair in rooms.windows(2) {
        carve_tunnel(grid, rng, pair[0].room.center(), pair[1].room.center());
    }

    BspLayout { tree, rooms }
}

#[cfg(test)]
mod tests {
    use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

    use super::*;

    fn split_tree(width: usize, height: usize, depth: u32, seed: u64) -> BspTree {
        let mut tree = BspTree::new(PartitionRect { x: 0, y: 0, width, height });
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let root = tree.root();
        tree.split(root, depth, &mut rng);
        tree
    }

    #[test]
    fn depth_two_split_yields_eight_leaves() {
        let tree = split_tree(70, 30, 2, 11);
        assert_eq!(tree.leaves().len(), 8);
        assert_eq!(tree.len(), 15);
    }

    #[test]
    fn leaves_partition_the_root_exactly() {
        let tree = split_tree(70, 30, 3, 5);
        let mut covered = vec![0_u8; 70 * 30];
        for leaf in tree.leaves() {
            let rect = tree.node(leaf).rect;
            for y in rect.y..rect.y + rect.height {
                for x in rect.x..rect.x + rect.width {
                    covered[y * 70 + x] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&count| count == 1));
    }

    #[test]
    fn split_follows_the_longer_axis() {
        let tree = split_tree(70, 30, 0, 8);
        let (first, second) = tree.node(tree.root()).children.expect("root was split");
        assert_eq!(tree.node(first).rect.height, 30);
        assert_eq!(tree.node(second).rect.height, 30);
        let ratio = tree.node(first).rect.width as f64 / 70.0;
        assert!((0.28..=0.72).contains(&ratio), "split fraction {ratio}");

        let square = split_tree(20, 20, 0, 8);
        let (top, _) = square.node(square.root()).children.expect("root was split");
        assert_eq!(square.node(top).rect.width, 20, "equal sides split horizontally");
    }

    #[test]
    fn leaves_is_repeatable() {
        let tree = split_tree(64, 40, 3, 21);
        assert_eq!(tree.leaves(), tree.leaves());
    }

    #[test]
    fn carved_rooms_sit_inside_their_padded_leaf() {
        for seed in 0..10 {
            let mut grid = TileGrid::filled_with_walls(70, 30);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let config = BspConfig { split_depth: 2, ..BspConfig::default() };
            let layout = generate_bsp(&mut grid, &mut rng, &config);

            assert!(layout.rooms.len() <= 8);
            assert!(!layout.rooms.is_empty());
            for placed in &layout.rooms {
                let rect = layout.tree.node(placed.leaf).rect;
                let room = placed.room;
                let pad = placed.padding;
                assert!((2..=3).contains(&pad.left) && (2..=3).contains(&pad.bottom));
                assert!(room.x >= rect.x + pad.left);
                assert!(room.y >= rect.y + pad.top);
                assert!(room.right() + pad.right < rect.x + rect.width);
                assert!(room.bottom() + pad.bottom < rect.y + rect.height);
            }
            for (index, left) in layout.rooms.iter().enumerate() {
                for right in &layout.rooms[index + 1..] {
                    assert!(!overlaps(&left.room, &right.room));
                }
            }
        }
    }

    #[test]
    fn slivers_left_by_padding_are_dropped() {
        let rect = PartitionRect { x: 2, y: 2, width: 5, height: 6 };
        let even = Padding { left: 1, top: 1, right: 1, bottom: 1 };
        assert_eq!(padded(rect, even), Some(Room { x: 3, y: 3, width: 3, height: 4 }));

        let thin = Padding { left: 2, top: 1, right: 1, bottom: 1 };
        assert_eq!(padded(rect, thin), None);
        let flat = Padding { left: 1, top: 2, right: 1, bottom: 2 };
        assert_eq!(padded(rect, flat), None);
    }
}
