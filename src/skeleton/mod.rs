//! Branch/leaf arena and hierarchical position resolution
//!
//! Branches reference each other by index into a single growable
//! collection. Parent to child links are owned index lists; child to
//! parent links are plain optional indices.

mod arena;
mod node;
mod resolve;

pub use arena::Skeleton;
pub use node::{Branch, BranchId, Leaf};
