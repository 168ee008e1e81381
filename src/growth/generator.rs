use std::f32::consts::TAU;

use super::params::GrowthParams;
use super::random::RandomSource;
use crate::math::Vec3;
use crate::skeleton::{BranchId, Leaf, Skeleton};

/// Trunk segment length
pub const TRUNK_LENGTH: f32 = 3.0;
/// Trunk base radius
pub const TRUNK_RADIUS: f32 = 0.2;
/// Leaves appear on branches of this generation and deeper
pub const LEAF_MIN_GENERATION: usize = 2;

const CHILD_COUNT: (u32, u32) = (2, 4);
const BASE_ELEVATION_DEG: f32 = 30.0;
const ELEVATION_JITTER_DEG: f32 = 20.0;

const LEAF_COUNT: (u32, u32) = (6, 14);
const LEAF_SPREAD: Vec3 = Vec3::new(0.4, 0.3, 0.4);
const LEAF_TILT: f32 = 0.5;
const LEAF_SIZE: (f32, f32) = (0.28, 0.45);
const LEAF_MAX_SPAWN_DELAY: f32 = 4.0;

/// Recursive branch/leaf generator
#[derive(Debug, Clone, Copy)]
pub struct TreeGenerator {
    pub params: GrowthParams,
}

impl TreeGenerator {
    pub fn new(params: GrowthParams) -> Self {
        Self { params }
    }

    /// Replace the contents of `skeleton` with a freshly grown tree.
    ///
    /// Every growth fraction starts at 0.
    pub fn generate(&self, skeleton: &mut Skeleton, rng: &mut impl RandomSource) {
        skeleton.clear();
        self.grow_branch(
            skeleton,
            rng,
            None,
            Vec3::ZERO,
            Vec3::UP,
            TRUNK_LENGTH,
            TRUNK_RADIUS,
            0,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn grow_branch(
        &self,
        skeleton: &mut Skeleton,
        rng: &mut impl RandomSource,
        parent: Option<BranchId>,
        start: Vec3,
        direction: Vec3,
        length: f32,
        radius: f32,
        generation: usize,
    ) {
        let end = start + direction * length;
        let id = match parent {
            None => skeleton.add_root(start, end, radius),
            Some(parent) => match skeleton.add_child(parent, start, end, radius) {
                Some(id) => id,
                None => return,
            },
        };

        if generation < self.params.max_generations {
            let count = rng.uniform_int(CHILD_COUNT.0, CHILD_COUNT.1);
            let variance = self.params.branch_angle_variance.to_radians();

            for i in 0..count {
                // Evenly spaced around the parent, then jittered
                let base_azimuth = i as f32 / count as f32 * TAU;
                let azimuth = base_azimuth + rng.uniform(-1.0, 1.0) * variance;
                let elevation =
                    (BASE_ELEVATION_DEG + rng.uniform(-1.0, 1.0) * ELEVATION_JITTER_DEG).to_radians();
                let child_direction = Vec3::from_spherical(azimuth, elevation).normalize();

                self.grow_branch(
                    skeleton,
                    rng,
                    Some(id),
                    end,
                    child_direction,
                    length * self.params.length_reduction,
                    radius * self.params.radius_reduction,
                    generation + 1,
                );
            }
        }

        if generation >= LEAF_MIN_GENERATION {
            self.attach_leaves(skeleton, rng, id);
        }
    }

    /// Scatter a cluster of leaves around the tip of `branch`
    fn attach_leaves(&self, skeleton: &mut Skeleton, rng: &mut impl RandomSource, branch: BranchId) {
        let count = rng.uniform_int(LEAF_COUNT.0, LEAF_COUNT.1);

        for _ in 0..count {
            let offset = Vec3::new(
                rng.uniform(-LEAF_SPREAD.x, LEAF_SPREAD.x),
                rng.uniform(-LEAF_SPREAD.y, LEAF_SPREAD.y),
                rng.uniform(-LEAF_SPREAD.z, LEAF_SPREAD.z),
            );

            // Mostly upward facing
            let normal = Vec3::new(
                rng.uniform(-LEAF_TILT, LEAF_TILT),
                0.8 + rng.uniform(-1.0, 1.0).abs() * 0.2,
                rng.uniform(-LEAF_TILT, LEAF_TILT),
            )
            .normalize();

            let size = rng.uniform(LEAF_SIZE.0, LEAF_SIZE.1);
            let spawn_delay = rng.uniform(0.0, LEAF_MAX_SPAWN_DELAY);

            skeleton.add_leaf(Leaf::new(branch, offset, normal, size, spawn_delay));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::growth::random::{MidpointRandom, RngSource};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn params(max_generations: usize) -> GrowthParams {
        GrowthParams {
            max_generations,
            ..Default::default()
        }
    }

    fn generate_midpoint(max_generations: usize) -> Skeleton {
        let mut skeleton = Skeleton::new();
        TreeGenerator::new(params(max_generations)).generate(&mut skeleton, &mut MidpointRandom);
        skeleton
    }

    #[test]
    fn test_trunk_only() {
        let skeleton = generate_midpoint(0);

        assert_eq!(skeleton.branch_count(), 1);
        assert_eq!(skeleton.leaf_count(), 0);

        let trunk = skeleton.root().unwrap();
        assert_eq!(trunk.start, Vec3::ZERO);
        assert!(trunk.end.approx_eq(&Vec3::new(0.0, TRUNK_LENGTH, 0.0), 1e-5));
        assert_eq!(trunk.radius, TRUNK_RADIUS);
        assert_eq!(trunk.parent, None);
    }

    #[test]
    fn test_midpoint_tree_shape() {
        let skeleton = generate_midpoint(2);

        // 3 children per branch, 10 leaves per generation-2 branch
        assert_eq!(skeleton.generation_counts(), vec![1, 3, 9]);
        assert_eq!(skeleton.leaf_count(), 90);
    }

    #[test]
    fn test_midpoint_child_geometry() {
        let skeleton = generate_midpoint(1);
        let trunk_end = skeleton.root().unwrap().end;

        for (i, &child_id) in skeleton.root().unwrap().children.iter().enumerate() {
            let child = skeleton.branch(child_id).unwrap();
            let azimuth = i as f32 / 3.0 * TAU;
            let expected_dir = Vec3::from_spherical(azimuth, 30f32.to_radians());

            assert_eq!(child.start, trunk_end);
            assert!(child.end.approx_eq(&(trunk_end + expected_dir * 2.1), 1e-4));
            assert!((child.radius - 0.14).abs() < 1e-6);
            assert_eq!(child.generation, 1);
        }
    }

    #[test]
    fn test_midpoint_leaves_face_up() {
        let skeleton = generate_midpoint(2);
        for leaf in skeleton.leaves() {
            assert!(leaf.normal.approx_eq(&Vec3::UP, 1e-5));
            assert_eq!(leaf.offset, Vec3::ZERO);
            assert!((leaf.size - 0.365).abs() < 1e-5);
            assert_eq!(leaf.spawn_delay, 2.0);
        }
    }

    #[test]
    fn test_random_tree_invariants() {
        let mut rng = RngSource::new(StdRng::seed_from_u64(2024));
        let generator = TreeGenerator::new(params(4));
        let mut skeleton = Skeleton::new();
        generator.generate(&mut skeleton, &mut rng);

        let mut leaves_per_branch = vec![0u32; skeleton.branch_count()];
        for leaf in skeleton.leaves() {
            leaves_per_branch[leaf.parent] += 1;

            assert!(leaf.offset.x.abs() <= 0.4 && leaf.offset.y.abs() <= 0.3 && leaf.offset.z.abs() <= 0.4);
            assert!((leaf.normal.length() - 1.0).abs() < 1e-4);
            assert!(leaf.normal.y > 0.0);
            assert!((0.28..=0.45).contains(&leaf.size));
            assert!((0.0..=4.0).contains(&leaf.spawn_delay));
            assert_eq!(leaf.growth, 0.0);
        }

        for (id, branch) in skeleton.branches().iter().enumerate() {
            assert_eq!(branch.growth, 0.0);

            match branch.parent {
                None => assert_eq!(id, 0),
                Some(parent) => {
                    assert!(parent < id, "parent must be created first");
                    let parent = skeleton.branch(parent).unwrap();
                    assert_eq!(branch.generation, parent.generation + 1);
                    assert_eq!(branch.start, parent.end);
                }
            }

            if branch.generation < 4 {
                assert!((2..=4).contains(&branch.children.len()));
            } else {
                assert!(branch.children.is_empty());
            }

            if branch.generation >= LEAF_MIN_GENERATION {
                assert!((6..=14).contains(&leaves_per_branch[id]));
            } else {
                assert_eq!(leaves_per_branch[id], 0);
            }
        }
    }

    #[test]
    fn test_children_shrink() {
        let skeleton = generate_midpoint(3);
        for branch in skeleton.branches().iter().skip(1) {
            let parent = skeleton.branch(branch.parent.unwrap()).unwrap();
            let ratio = branch.extension().length() / parent.extension().length();
            assert!((ratio - 0.7).abs() < 1e-4);
            assert!((branch.radius / parent.radius - 0.7).abs() < 1e-4);
        }
    }

    #[test]
    fn test_generate_replaces_previous_tree() {
        let generator = TreeGenerator::new(params(2));
        let mut skeleton = Skeleton::new();
        generator.generate(&mut skeleton, &mut MidpointRandom);
        skeleton.set_branch_growth(0, 1.0);

        TreeGenerator::new(params(1)).generate(&mut skeleton, &mut MidpointRandom);
        assert_eq!(skeleton.branch_count(), 4);
        assert_eq!(skeleton.leaf_count(), 0);
        assert_eq!(skeleton.root().unwrap().growth, 0.0);
    }
}
