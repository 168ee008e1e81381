//! World-space positions of growing branches.
//!
//! A branch's tip telescopes out from its parent's current tip as its own
//! growth fraction rises, so positions are resolved recursively up the
//! parent chain using the current growth fractions. Depth is bounded by the
//! generation limit, so nothing is cached.

use super::arena::Skeleton;
use super::node::{BranchId, Leaf};
use crate::math::Vec3;

impl Skeleton {
    /// Current world position where a branch begins.
    ///
    /// The trunk starts at its stored start point; every other branch starts
    /// at its parent's current end. Unknown ids resolve to the origin.
    pub fn absolute_start(&self, id: BranchId) -> Vec3 {
        let Some(branch) = self.branch(id) else {
            return Vec3::ZERO;
        };

        match branch.parent {
            None => branch.start,
            Some(parent) => self.absolute_end(parent),
        }
    }

    /// Current world position of a branch tip: its absolute start plus its
    /// full extension scaled by its growth fraction. Unknown ids resolve to
    /// the origin.
    pub fn absolute_end(&self, id: BranchId) -> Vec3 {
        let Some(branch) = self.branch(id) else {
            return Vec3::ZERO;
        };

        self.absolute_start(id) + branch.extension() * branch.growth
    }

    /// Current world position of a leaf, riding along with its parent's tip.
    /// `None` if the parent branch does not exist.
    pub fn leaf_position(&self, leaf: &Leaf) -> Option<Vec3> {
        self.branch(leaf.parent)?;
        Some(self.absolute_end(leaf.parent) + leaf.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trunk straight up, then a branch along +X, then one along +Z.
    fn chain(growths: [f32; 3]) -> Skeleton {
        let mut skeleton = Skeleton::new();
        let a = skeleton.add_root(Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 4.0, 0.0), 0.2);
        let b = skeleton
            .add_child(a, Vec3::new(0.0, 4.0, 0.0), Vec3::new(2.0, 4.0, 0.0), 0.14)
            .unwrap();
        let c = skeleton
            .add_child(b, Vec3::new(2.0, 4.0, 0.0), Vec3::new(2.0, 4.0, 8.0), 0.1)
            .unwrap();

        for (id, growth) in [a, b, c].into_iter().zip(growths) {
            skeleton.set_branch_growth(id, growth);
        }
        skeleton
    }

    #[test]
    fn test_root_start_is_stored_start() {
        let skeleton = chain([0.3, 0.0, 0.0]);
        assert_eq!(skeleton.absolute_start(0), Vec3::ZERO);
    }

    #[test]
    fn test_root_end_scales_with_growth() {
        let skeleton = chain([0.25, 1.0, 1.0]);
        assert!(skeleton.absolute_end(0).approx_eq(&Vec3::new(0.0, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn test_depth_three_closed_form() {
        let skeleton = chain([1.0, 0.5, 0.25]);

        // trunk tip: (0, 4, 0); second tip: + (2, 0, 0) * 0.5; third: + (0, 0, 8) * 0.25
        assert!(skeleton.absolute_end(0).approx_eq(&Vec3::new(0.0, 4.0, 0.0), 1e-5));
        assert!(skeleton.absolute_start(1).approx_eq(&Vec3::new(0.0, 4.0, 0.0), 1e-5));
        assert!(skeleton.absolute_end(1).approx_eq(&Vec3::new(1.0, 4.0, 0.0), 1e-5));
        assert!(skeleton.absolute_start(2).approx_eq(&Vec3::new(1.0, 4.0, 0.0), 1e-5));
        assert!(skeleton.absolute_end(2).approx_eq(&Vec3::new(1.0, 4.0, 2.0), 1e-5));
    }

    #[test]
    fn test_child_end_is_parent_end_plus_scaled_extension() {
        let skeleton = chain([0.6, 0.3, 0.9]);
        for id in 1..3 {
            let branch = skeleton.branch(id).unwrap();
            let parent_end = skeleton.absolute_end(branch.parent.unwrap());
            let expected = parent_end + branch.extension() * branch.growth;
            assert!(skeleton.absolute_end(id).approx_eq(&expected, 1e-5));
        }
    }

    #[test]
    fn test_ungrown_branch_collapses_to_start() {
        let skeleton = chain([1.0, 0.0, 0.0]);
        assert_eq!(skeleton.absolute_start(1), skeleton.absolute_end(1));
        assert_eq!(skeleton.absolute_start(2), skeleton.absolute_end(2));
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let skeleton = chain([1.0, 1.0, 1.0]);
        assert_eq!(skeleton.absolute_start(3), Vec3::ZERO);
        assert_eq!(skeleton.absolute_end(usize::MAX), Vec3::ZERO);
    }

    #[test]
    fn test_leaf_rides_parent_tip() {
        let skeleton = chain([1.0, 0.5, 0.0]);
        let leaf = Leaf::new(1, Vec3::new(0.1, -0.2, 0.3), Vec3::UP, 0.3, 0.0);

        let position = skeleton.leaf_position(&leaf).unwrap();
        assert!(position.approx_eq(&Vec3::new(1.1, 3.8, 0.3), 1e-5));

        let orphan = Leaf::new(7, Vec3::ZERO, Vec3::UP, 0.3, 0.0);
        assert!(skeleton.leaf_position(&orphan).is_none());
    }
}
