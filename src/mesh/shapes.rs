use std::f32::consts::TAU;

use super::vertex::{Vertex, VertexBuffer};
use crate::math::Vec3;

/// Sides around each branch cylinder
pub const RADIAL_SEGMENTS: usize = 8;
/// Vertices emitted per branch: two triangles per side
pub const VERTICES_PER_BRANCH: usize = RADIAL_SEGMENTS * 6;
/// Vertices emitted per leaf: two triangles per face, front and back
pub const VERTICES_PER_LEAF: usize = 12;

/// Append an open tapered cylinder from `start` to `end`.
///
/// u wraps the circumference, v runs 0 at the start ring to 1 at the end
/// ring. Normals point radially outward, perpendicular to the axis, and
/// triangles wind counter-clockwise seen from outside.
pub fn append_tapered_cylinder(
    buffer: &mut VertexBuffer,
    start: Vec3,
    end: Vec3,
    start_radius: f32,
    end_radius: f32,
) {
    let (right, up) = (end - start).orthonormal_frame();

    for i in 0..RADIAL_SEGMENTS {
        let t1 = i as f32 / RADIAL_SEGMENTS as f32;
        let t2 = (i + 1) as f32 / RADIAL_SEGMENTS as f32;

        let radial1 = right * (t1 * TAU).cos() + up * (t1 * TAU).sin();
        let radial2 = right * (t2 * TAU).cos() + up * (t2 * TAU).sin();

        let bottom1 = Vertex::new(start + radial1 * start_radius, radial1).with_uv(t1, 0.0);
        let bottom2 = Vertex::new(start + radial2 * start_radius, radial2).with_uv(t2, 0.0);
        let top1 = Vertex::new(end + radial1 * end_radius, radial1).with_uv(t1, 1.0);
        let top2 = Vertex::new(end + radial2 * end_radius, radial2).with_uv(t2, 1.0);

        buffer.push_triangle(bottom1, top1, bottom2);
        buffer.push_triangle(bottom2, top1, top2);
    }
}

/// Append a double-sided square leaf of edge `size` centred on `center`,
/// lying in the plane perpendicular to `normal`.
pub fn append_leaf_quad(buffer: &mut VertexBuffer, center: Vec3, normal: Vec3, size: f32) {
    // Near-vertical normals give a vanishing cross product; fall back to X
    let side = normal.cross(&Vec3::UP);
    let right = if side.length() < 0.01 {
        Vec3::RIGHT
    } else {
        side.normalize()
    };
    let up = normal.cross(&right).normalize();

    let half_right = right * (size * 0.5);
    let half_up = up * (size * 0.5);

    let corners = [
        (center - half_right - half_up, [0.0, 0.0]),
        (center + half_right - half_up, [1.0, 0.0]),
        (center + half_right + half_up, [1.0, 1.0]),
        (center - half_right + half_up, [0.0, 1.0]),
    ];

    let front = |i: usize| {
        let (position, [u, v]) = corners[i];
        Vertex::new(position, normal).with_uv(u, v)
    };
    buffer.push_triangle(front(0), front(1), front(2));
    buffer.push_triangle(front(0), front(2), front(3));

    // Back face: reversed winding, flipped normal
    let back_normal = -normal;
    let back = |i: usize| {
        let (position, [u, v]) = corners[i];
        Vertex::new(position, back_normal).with_uv(u, v)
    };
    buffer.push_triangle(back(0), back(2), back(1));
    buffer.push_triangle(back(0), back(3), back(2));
}
