use super::node::{Branch, BranchId, Leaf};
use crate::math::Vec3;

/// Owns every branch and leaf of one tree.
///
/// Structure is append-only: branches are pushed parent-first, so a
/// parent's id is always smaller than any of its children's. Only the
/// growth fractions change after construction.
#[derive(Debug, Clone, Default)]
pub struct Skeleton {
    branches: Vec<Branch>,
    leaves: Vec<Leaf>,
    /// Branch ids bucketed by generation, creation order within a bucket
    by_generation: Vec<Vec<BranchId>>,
}

impl Skeleton {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all branches and leaves
    pub fn clear(&mut self) {
        self.branches.clear();
        self.leaves.clear();
        self.by_generation.clear();
    }

    /// Add the trunk (generation 0, no parent)
    pub fn add_root(&mut self, start: Vec3, end: Vec3, radius: f32) -> BranchId {
        self.push_branch(None, 0, start, end, radius)
    }

    /// Add a child of `parent`. Returns `None` if the parent does not exist.
    pub fn add_child(&mut self, parent: BranchId, start: Vec3, end: Vec3, radius: f32) -> Option<BranchId> {
        let generation = self.branches.get(parent)?.generation + 1;
        let id = self.push_branch(Some(parent), generation, start, end, radius);
        self.branches[parent].children.push(id);
        Some(id)
    }

    fn push_branch(
        &mut self,
        parent: Option<BranchId>,
        generation: usize,
        start: Vec3,
        end: Vec3,
        radius: f32,
    ) -> BranchId {
        let id = self.branches.len();
        self.branches.push(Branch {
            start,
            end,
            radius,
            generation,
            growth: 0.0,
            children: Vec::with_capacity(4),
            parent,
        });

        if self.by_generation.len() <= generation {
            self.by_generation.resize_with(generation + 1, Vec::new);
        }
        self.by_generation[generation].push(id);
        id
    }

    /// Attach a leaf. Returns `false` (and drops the leaf) if its parent
    /// branch does not exist.
    pub fn add_leaf(&mut self, leaf: Leaf) -> bool {
        if leaf.parent >= self.branches.len() {
            return false;
        }
        self.leaves.push(leaf);
        true
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn branch(&self, id: BranchId) -> Option<&Branch> {
        self.branches.get(id)
    }

    pub fn leaf(&self, index: usize) -> Option<&Leaf> {
        self.leaves.get(index)
    }

    pub fn root(&self) -> Option<&Branch> {
        self.branches.first()
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    /// Set a branch's growth fraction, clamped to [0, 1]. Unknown ids are ignored.
    pub fn set_branch_growth(&mut self, id: BranchId, growth: f32) {
        if let Some(branch) = self.branches.get_mut(id) {
            branch.growth = clamp_unit(growth);
        }
    }

    /// Set a leaf's growth fraction, clamped to [0, 1]. Unknown indices are ignored.
    pub fn set_leaf_growth(&mut self, index: usize, growth: f32) {
        if let Some(leaf) = self.leaves.get_mut(index) {
            leaf.growth = clamp_unit(growth);
        }
    }

    /// Branch ids in ascending generation order (trunk first).
    ///
    /// Every parent is visited before any of its children.
    pub fn update_order(&self) -> impl Iterator<Item = BranchId> + '_ {
        self.by_generation.iter().flat_map(|ids| ids.iter().copied())
    }

    /// Number of branches in each generation, indexed by generation
    pub fn generation_counts(&self) -> Vec<usize> {
        self.by_generation.iter().map(Vec::len).collect()
    }

    /// Deepest generation present, `None` for an empty skeleton
    pub fn max_generation(&self) -> Option<usize> {
        self.by_generation.len().checked_sub(1)
    }

    /// Number of branches with positive growth, indexed by generation
    pub fn visible_counts_by_generation(&self) -> Vec<usize> {
        self.by_generation
            .iter()
            .map(|ids| ids.iter().filter(|&&id| self.branches[id].is_visible()).count())
            .collect()
    }

    pub fn visible_branch_count(&self) -> usize {
        self.branches.iter().filter(|b| b.is_visible()).count()
    }

    pub fn visible_leaf_count(&self) -> usize {
        self.leaves.iter().filter(|l| l.is_visible()).count()
    }
}

/// Clamp into [0, 1]; NaN collapses to 0
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
