use crate::math::Vec3;

/// Index of a branch inside its [`Skeleton`](super::Skeleton)
pub type BranchId = usize;

/// A single branch segment of the tree
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Start point as laid out at generation time (the parent's end point)
    pub start: Vec3,
    /// Fully grown end point as laid out at generation time
    pub end: Vec3,
    /// Radius at the base of the branch
    pub radius: f32,
    /// Depth from the trunk (0 = trunk)
    pub generation: usize,
    /// Growth fraction in [0, 1]
    pub growth: f32,
    /// Child branches, in creation order
    pub children: Vec<BranchId>,
    /// Parent branch, `None` only for the trunk
    pub parent: Option<BranchId>,
}

impl Branch {
    /// Full-grown extension of the branch relative to its start
    pub fn extension(&self) -> Vec3 {
        self.end - self.start
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_visible(&self) -> bool {
        self.growth > 0.0
    }
}

/// A leaf attached near the tip of a branch
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Offset from the parent branch's fully grown end point
    pub offset: Vec3,
    /// Facing direction (unit length)
    pub normal: Vec3,
    /// Edge length of the leaf quad when fully grown
    pub size: f32,
    /// Growth fraction in [0, 1]
    pub growth: f32,
    pub parent: BranchId,
    /// Extra seconds to wait before this leaf may start growing
    pub spawn_delay: f32,
}

impl Leaf {
    pub fn new(parent: BranchId, offset: Vec3, normal: Vec3, size: f32, spawn_delay: f32) -> Self {
        Self {
            offset,
            normal,
            size,
            growth: 0.0,
            parent,
            spawn_delay,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.growth > 0.0
    }
}
