use crate::skeleton::Skeleton;
use super::shapes::{append_leaf_quad, append_tapered_cylinder};
use super::vertex::VertexBuffer;

/// Tip radius of every branch relative to its base radius
pub const TIP_RADIUS_RATIO: f32 = 0.7;

/// Branch and leaf triangle streams for the current growth state
#[derive(Debug, Clone, Default)]
pub struct TreeMesh {
    pub branches: VertexBuffer,
    pub leaves: VertexBuffer,
}

impl TreeMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both buffers from the skeleton's current growth
    pub fn rebuild(&mut self, skeleton: &Skeleton) {
        rebuild_branch_mesh(skeleton, &mut self.branches);
        rebuild_leaf_mesh(skeleton, &mut self.leaves);
    }

    pub fn clear(&mut self) {
        self.branches.clear();
        self.leaves.clear();
    }
}

/// Replace `buffer` with one tapered cylinder per visible branch, spanning
/// its current absolute start and end.
pub fn rebuild_branch_mesh(skeleton: &Skeleton, buffer: &mut VertexBuffer) {
    buffer.clear();

    for (id, branch) in skeleton.branches().iter().enumerate() {
        if !branch.is_visible() {
            continue;
        }

        let start = skeleton.absolute_start(id);
        let end = skeleton.absolute_end(id);
        append_tapered_cylinder(buffer, start, end, branch.radius, branch.radius * TIP_RADIUS_RATIO);
    }
}

/// Replace `buffer` with one double-sided quad per visible leaf, placed at
/// its parent's current tip and scaled linearly by its growth.
pub fn rebuild_leaf_mesh(skeleton: &Skeleton, buffer: &mut VertexBuffer) {
    buffer.clear();

    for leaf in skeleton.leaves() {
        if !leaf.is_visible() {
            continue;
        }

        let Some(position) = skeleton.leaf_position(leaf) else {
            continue;
        };
        append_leaf_quad(buffer, position, leaf.normal, leaf.size * leaf.growth);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::mesh::shapes::{VERTICES_PER_BRANCH, VERTICES_PER_LEAF};
    use crate::skeleton::Leaf;

    fn create_skeleton() -> Skeleton {
        let mut skeleton = Skeleton::new();
        let root = skeleton.add_root(Vec3::ZERO, Vec3::new(0.0, 4.0, 0.0), 0.2);
        let a = skeleton
            .add_child(root, Vec3::new(0.0, 4.0, 0.0), Vec3::new(2.0, 4.0, 0.0), 0.14)
            .unwrap();
        skeleton
            .add_child(root, Vec3::new(0.0, 4.0, 0.0), Vec3::new(-2.0, 4.0, 0.0), 0.14)
            .unwrap();
        skeleton.add_leaf(Leaf::new(a, Vec3::new(0.1, 0.2, 0.0), Vec3::UP, 0.4, 0.0));
        skeleton.add_leaf(Leaf::new(a, Vec3::ZERO, Vec3::UP, 0.4, 0.0));
        skeleton
    }

    #[test]
    fn test_empty_when_nothing_grown() {
        let skeleton = create_skeleton();
        let mut mesh = TreeMesh::new();
        mesh.rebuild(&skeleton);

        assert!(mesh.branches.is_empty());
        assert!(mesh.leaves.is_empty());
    }

    #[test]
    fn test_only_visible_branches_are_tessellated() {
        let mut skeleton = create_skeleton();
        skeleton.set_branch_growth(0, 1.0);
        skeleton.set_branch_growth(1, 0.5);

        let mut mesh = TreeMesh::new();
        mesh.rebuild(&skeleton);

        assert_eq!(mesh.branches.vertex_count(), 2 * VERTICES_PER_BRANCH);
    }

    #[test]
    fn test_branch_uses_resolved_endpoints() {
        let mut skeleton = create_skeleton();
        skeleton.set_branch_growth(0, 0.5);
        skeleton.set_branch_growth(1, 0.5);

        let mut buffer = VertexBuffer::new();
        rebuild_branch_mesh(&skeleton, &mut buffer);

        // Second cylinder runs from (0, 2, 0) to (1, 2, 0) with radii 0.14 and 0.098
        let second: Vec<_> = buffer.vertices().skip(VERTICES_PER_BRANCH).collect();
        for v in second {
            let (center, radius) = if v.uv[1] == 0.0 {
                (Vec3::new(0.0, 2.0, 0.0), 0.14)
            } else {
                (Vec3::new(1.0, 2.0, 0.0), 0.14 * TIP_RADIUS_RATIO)
            };
            assert!((v.position.distance(&center) - radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_leaves_ride_growing_tip() {
        let mut skeleton = create_skeleton();
        skeleton.set_branch_growth(0, 1.0);
        skeleton.set_branch_growth(1, 0.25);
        skeleton.set_leaf_growth(1, 0.5);

        let mut buffer = VertexBuffer::new();
        rebuild_leaf_mesh(&skeleton, &mut buffer);
        assert_eq!(buffer.vertex_count(), VERTICES_PER_LEAF);

        // Tip at (0.5, 4, 0); half-grown leaf has edge 0.2
        let sum = buffer
            .vertices()
            .take(6)
            .fold(Vec3::ZERO, |acc, v| acc + v.position);
        let first_triangle_pair_center = sum * (1.0 / 6.0);
        assert!((first_triangle_pair_center.y - 4.0).abs() < 1e-5);

        let edge = buffer.vertex(0).unwrap().position.distance(&buffer.vertex(1).unwrap().position);
        assert!((edge - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_leaf_size_scales_linearly() {
        let mut skeleton = create_skeleton();
        skeleton.set_branch_growth(0, 1.0);
        skeleton.set_branch_growth(1, 1.0);

        for growth in [0.1, 0.5, 1.0] {
            skeleton.set_leaf_growth(1, growth);
            let mut buffer = VertexBuffer::new();
            rebuild_leaf_mesh(&skeleton, &mut buffer);

            let edge = buffer.vertex(0).unwrap().position.distance(&buffer.vertex(1).unwrap().position);
            assert!((edge - 0.4 * growth).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rebuild_replaces_contents() {
        let mut skeleton = create_skeleton();
        skeleton.set_branch_growth(0, 1.0);
        skeleton.set_branch_growth(1, 1.0);
        skeleton.set_branch_growth(2, 1.0);
        skeleton.set_leaf_growth(0, 1.0);

        let mut mesh = TreeMesh::new();
        mesh.rebuild(&skeleton);
        mesh.rebuild(&skeleton);

        assert_eq!(mesh.branches.vertex_count(), 3 * VERTICES_PER_BRANCH);
        assert_eq!(mesh.leaves.vertex_count(), VERTICES_PER_LEAF);

        mesh.clear();
        assert!(mesh.branches.is_empty() && mesh.leaves.is_empty());
    }
}
