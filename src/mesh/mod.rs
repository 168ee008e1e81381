pub mod generator;
pub mod shapes;
pub mod vertex;

pub use generator::{rebuild_branch_mesh, rebuild_leaf_mesh, TreeMesh, TIP_RADIUS_RATIO};
pub use shapes::{append_leaf_quad, append_tapered_cylinder, RADIAL_SEGMENTS, VERTICES_PER_BRANCH, VERTICES_PER_LEAF};
pub use vertex::{Vertex, VertexBuffer, FLOATS_PER_VERTEX};
