//! A single procedurally generated, animated tree

use rand::rngs::ThreadRng;
use serde::Serialize;

use crate::animation::{GrowthObserver, GrowthScheduler, NullObserver};
use crate::growth::{GrowthParams, RandomSource, RngSource, TreeGenerator};
use crate::math::Vec3;
use crate::mesh::TreeMesh;
use crate::skeleton::{BranchId, Skeleton};

/// Size and progress snapshot, serialized for UI overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    pub branches: usize,
    pub leaves: usize,
    pub branch_vertices: usize,
    pub leaf_vertices: usize,
    pub elapsed: f32,
    pub progress: f32,
}

/// Owns a tree's structure, growth clock, and render buffers.
///
/// Call [`generate`](Self::generate) once, then [`advance`](Self::advance)
/// every frame and read the vertex buffers before the next call.
pub struct GrowingTree<R = RngSource<ThreadRng>> {
    params: GrowthParams,
    skeleton: Skeleton,
    scheduler: GrowthScheduler,
    mesh: TreeMesh,
    rng: R,
    observer: Box<dyn GrowthObserver>,
}

impl GrowingTree {
    /// Tree whose shape is drawn from the thread-local random generator.
    /// Fails if `params` does not pass [`GrowthParams::validate`].
    pub fn new(params: GrowthParams) -> Result<Self, String> {
        Self::with_random(params, RngSource::thread())
    }
}

impl Default for GrowingTree {
    fn default() -> Self {
        Self::from_parts(GrowthParams::default(), RngSource::thread())
    }
}

impl<R: RandomSource> GrowingTree<R> {
    pub fn with_random(params: GrowthParams, rng: R) -> Result<Self, String> {
        params.validate()?;
        Ok(Self::from_parts(params, rng))
    }

    fn from_parts(params: GrowthParams, rng: R) -> Self {
        Self {
            params,
            skeleton: Skeleton::new(),
            scheduler: GrowthScheduler::new(params.total_growth_time),
            mesh: TreeMesh::new(),
            rng,
            observer: Box::new(NullObserver),
        }
    }

    pub fn with_observer(mut self, observer: impl GrowthObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Discard the current tree and grow a new skeleton. Growth and elapsed
    /// time restart from zero and the vertex buffers are emptied.
    pub fn generate(&mut self) {
        TreeGenerator::new(self.params).generate(&mut self.skeleton, &mut self.rng);
        self.scheduler.reset();
        self.mesh.clear();

        log::info!(
            "generated tree: {} branches, {} leaves",
            self.skeleton.branch_count(),
            self.skeleton.leaf_count()
        );
        self.observer.on_generated(&self.skeleton);
    }

    /// Advance the growth clock by `delta_time` seconds, recompute every
    /// growth fraction and rebuild both vertex buffers.
    pub fn advance(&mut self, delta_time: f32) {
        self.scheduler.advance(delta_time, &mut self.skeleton);
        self.mesh.rebuild(&self.skeleton);
        self.observer.on_advanced(self.scheduler.elapsed(), &self.skeleton);
    }

    pub fn params(&self) -> &GrowthParams {
        &self.params
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn mesh(&self) -> &TreeMesh {
        &self.mesh
    }

    /// Branch vertices, 9 floats each (see [`crate::mesh::Vertex::to_array`])
    pub fn branch_vertices(&self) -> &[f32] {
        self.mesh.branches.as_slice()
    }

    /// Leaf vertices, 9 floats each
    pub fn leaf_vertices(&self) -> &[f32] {
        self.mesh.leaves.as_slice()
    }

    pub fn branch_vertex_count(&self) -> usize {
        self.mesh.branches.vertex_count()
    }

    pub fn leaf_vertex_count(&self) -> usize {
        self.mesh.leaves.vertex_count()
    }

    pub fn branch_count(&self) -> usize {
        self.skeleton.branch_count()
    }

    pub fn leaf_count(&self) -> usize {
        self.skeleton.leaf_count()
    }

    /// Seconds of growth since the last [`generate`](Self::generate)
    pub fn elapsed(&self) -> f32 {
        self.scheduler.elapsed()
    }

    /// Elapsed over total growth time. Unclamped; clamp for display.
    pub fn growth_progress(&self) -> f32 {
        self.scheduler.progress()
    }

    /// True once every branch and leaf has finished growing
    pub fn is_fully_grown(&self) -> bool {
        !self.skeleton.is_empty()
            && self.skeleton.branches().iter().all(|b| b.growth >= 1.0)
            && self.skeleton.leaves().iter().all(|l| l.growth >= 1.0)
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            branches: self.branch_count(),
            leaves: self.leaf_count(),
            branch_vertices: self.branch_vertex_count(),
            leaf_vertices: self.leaf_vertex_count(),
            elapsed: self.elapsed(),
            progress: self.growth_progress(),
        }
    }

    pub fn absolute_branch_start(&self, id: BranchId) -> Vec3 {
        self.skeleton.absolute_start(id)
    }

    pub fn absolute_branch_end(&self, id: BranchId) -> Vec3 {
        self.skeleton.absolute_end(id)
    }
}
