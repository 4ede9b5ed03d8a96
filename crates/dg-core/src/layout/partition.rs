//! Binary space partitioning of the dungeon region
//!
//! Leaves are split breadth-first so split order does not bias the size
//! distribution. Every split node owns exactly two children that tile it.

use std::collections::VecDeque;

use crate::rng::DungeonRng;

use super::region::{Region, SplitAxis};

/// The two halves of a split node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub axis: SplitAxis,
    /// Cut position relative to the parent's origin
    pub offset: i32,
    /// Child holding the parent's origin
    pub left: PartitionNode,
    pub right: PartitionNode,
}

/// A node of the partition tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionNode {
    pub region: Region,
    split: Option<Box<Split>>,
}

impl PartitionNode {
    /// Create an unsplit node
    pub fn leaf(region: Region) -> Self {
        Self {
            region,
            split: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.split.is_none()
    }

    pub fn split(&self) -> Option<&Split> {
        self.split.as_deref()
    }

    /// Left and right children of a split node
    pub fn children(&self) -> Option<(&PartitionNode, &PartitionNode)> {
        self.split.as_deref().map(|s| (&s.left, &s.right))
    }

    /// Try to split this leaf in place along [`Region::cut_range`]
    fn try_split(&mut self, min_size: i32, rng: &mut DungeonRng) -> Option<&mut Split> {
        let (axis, range) = self.region.cut_range(min_size)?;
        let offset = rng.range(range.start, range.end);
        let (left, right) = self.region.split(axis, offset);
        debug_assert!(
            self.region.is_tiled_by(&left, &right),
            "split of {:?} at {} leaves a gap or overlap",
            self.region,
            offset
        );

        let split = self.split.insert(Box::new(Split {
            axis,
            offset,
            left: PartitionNode::leaf(left),
            right: PartitionNode::leaf(right),
        }));
        Some(&mut **split)
    }

    /// Leaf regions in breadth-first order
    pub fn leaves(&self) -> Vec<Region> {
        let mut leaves = Vec::new();
        let mut queue = VecDeque::from([self]);
        while let Some(node) = queue.pop_front() {
            match node.children() {
                Some((left, right)) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
                None => leaves.push(node.region),
            }
        }
        leaves
    }

    pub fn leaf_count(&self) -> usize {
        match self.children() {
            Some((left, right)) => left.leaf_count() + right.leaf_count(),
            None => 1,
        }
    }

    pub fn depth(&self) -> usize {
        match self.children() {
            Some((left, right)) => 1 + left.depth().max(right.depth()),
            None => 0,
        }
    }

    /// Check that every split node is exactly tiled by its children
    pub fn is_tiling(&self) -> bool {
        match self.children() {
            Some((left, right)) => {
                self.region.is_tiled_by(&left.region, &right.region)
                    && left.is_tiling()
                    && right.is_tiling()
            }
            None => self.region.is_valid(),
        }
    }
}

/// Recursively split `region` into leaves no smaller than `min_size`.
///
/// Returns a single leaf when the region is too small to split.
pub fn partition(region: Region, min_size: i32, rng: &mut DungeonRng) -> PartitionNode {
    let mut root = PartitionNode::leaf(region);
    {
        let mut pending = VecDeque::from([&mut root]);
        while let Some(node) = pending.pop_front() {
            if let Some(split) = node.try_split(min_size, rng) {
                pending.push_back(&mut split.left);
                pending.push_back(&mut split.right);
            }
        }
    }
    log::debug!(
        "partitioned {}x{} into {} leaves (depth {})",
        region.width,
        region.height,
        root.leaf_count(),
        root.depth()
    );
    root
}
