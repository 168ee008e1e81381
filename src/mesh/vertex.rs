use crate::math::Vec3;

/// Floats per vertex: position (x, y, z, w) + uv (u, v) + normal (x, y, z)
pub const FLOATS_PER_VERTEX: usize = 9;

/// A vertex with position, texture coordinate, and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub uv: [f32; 2],
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            uv: [0.0, 0.0],
            normal,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = [u, v];
        self
    }

    /// Flat layout for the GPU: position(4, w = 1) + uv(2) + normal(3)
    pub fn to_array(&self) -> [f32; FLOATS_PER_VERTEX] {
        [
            self.position.x, self.position.y, self.position.z, 1.0,
            self.uv[0], self.uv[1],
            self.normal.x, self.normal.y, self.normal.z,
        ]
    }

    /// Inverse of [`to_array`](Self::to_array); the w component is dropped
    pub fn from_slice(data: &[f32]) -> Option<Self> {
        if data.len() < FLOATS_PER_VERTEX {
            return None;
        }
        Some(Self {
            position: Vec3::new(data[0], data[1], data[2]),
            uv: [data[4], data[5]],
            normal: Vec3::new(data[6], data[7], data[8]),
        })
    }
}

/// Non-indexed triangle list stored as flat floats.
///
/// Rebuilt in place every frame: clearing keeps the allocation.
#[derive(Debug, Clone, Default)]
pub struct VertexBuffer {
    data: Vec<f32>,
}

impl VertexBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.data.extend_from_slice(&vertex.to_array());
    }

    pub fn push_triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) {
        self.push(a);
        self.push(b);
        self.push(c);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn vertex(&self, index: usize) -> Option<Vertex> {
        let start = index.checked_mul(FLOATS_PER_VERTEX)?;
        Vertex::from_slice(self.data.get(start..start + FLOATS_PER_VERTEX)?)
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.data
            .chunks_exact(FLOATS_PER_VERTEX)
            .filter_map(Vertex::from_slice)
    }
}
