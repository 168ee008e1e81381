//! Time-driven growth of branches and leaves.
//!
//! Growth fractions are recomputed from the total elapsed time on every
//! update rather than integrated frame by frame, so dropped frames and
//! uneven frame times never desynchronise the animation.

use crate::skeleton::{Branch, Leaf, Skeleton};

/// A child branch may start once its parent has grown past this fraction
pub const CHILD_GATE: f32 = 0.6;
/// A leaf may start once its branch has grown past this fraction
pub const LEAF_GATE: f32 = 0.4;

/// Growth timing derived from the total growth time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthTimings {
    /// Stagger between the earliest start of successive generations
    pub generation_delay: f32,
    /// Time for one branch to grow from 0 to 1
    pub branch_duration: f32,
    /// Extra wait after a branch's generation start before its leaves
    pub leaf_start_offset: f32,
    /// Time for one leaf to grow from 0 to 1
    pub leaf_duration: f32,
}

impl GrowthTimings {
    pub fn from_total(total_growth_time: f32) -> Self {
        Self {
            generation_delay: total_growth_time * 0.15,
            branch_duration: total_growth_time * 0.4,
            leaf_start_offset: total_growth_time * 0.1,
            leaf_duration: total_growth_time * 0.1,
        }
    }

    /// Earliest time a branch of this generation may start
    pub fn scheduled_start(&self, generation: usize) -> f32 {
        generation as f32 * self.generation_delay
    }

    /// Time at which a parent of this generation, started on schedule,
    /// passes the child gate
    pub fn parent_ready_time(&self, parent_generation: usize) -> f32 {
        CHILD_GATE * self.branch_duration + self.scheduled_start(parent_generation)
    }

    /// Start time of a leaf on a branch of `branch_generation`
    pub fn leaf_start(&self, branch_generation: usize, spawn_delay: f32) -> f32 {
        self.scheduled_start(branch_generation) + self.leaf_start_offset + spawn_delay
    }
}

/// Accumulates elapsed time and drives every growth fraction from it
#[derive(Debug, Clone)]
pub struct GrowthScheduler {
    timings: GrowthTimings,
    total_growth_time: f32,
    elapsed: f32,
}

impl GrowthScheduler {
    pub fn new(total_growth_time: f32) -> Self {
        Self {
            timings: GrowthTimings::from_total(total_growth_time),
            total_growth_time,
            elapsed: 0.0,
        }
    }

    pub fn timings(&self) -> &GrowthTimings {
        &self.timings
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Elapsed time over total growth time. Not clamped: exceeds 1 once
    /// the tree is fully grown.
    pub fn progress(&self) -> f32 {
        if self.total_growth_time > 0.0 {
            self.elapsed / self.total_growth_time
        } else {
            0.0
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Add `delta_time` seconds (negative or NaN counts as zero) and
    /// recompute all growth fractions.
    pub fn advance(&mut self, delta_time: f32, skeleton: &mut Skeleton) {
        self.elapsed += delta_time.max(0.0);
        self.apply(skeleton);
    }

    /// Recompute all growth fractions for the current elapsed time.
    ///
    /// Branches are visited in ascending generation order so each child
    /// sees its parent's already updated growth.
    pub fn apply(&self, skeleton: &mut Skeleton) {
        let order: Vec<_> = skeleton.update_order().collect();
        for id in order {
            let growth = skeleton
                .branch(id)
                .and_then(|branch| self.branch_growth(skeleton, branch));
            if let Some(growth) = growth {
                skeleton.set_branch_growth(id, growth);
            }
        }

        for index in 0..skeleton.leaf_count() {
            let growth = skeleton
                .leaf(index)
                .and_then(|leaf| self.leaf_growth(skeleton, leaf));
            if let Some(growth) = growth {
                skeleton.set_leaf_growth(index, growth);
            }
        }
    }

    /// New growth for a branch, or `None` to keep its current value
    fn branch_growth(&self, skeleton: &Skeleton, branch: &Branch) -> Option<f32> {
        let scheduled = self.timings.scheduled_start(branch.generation);
        if self.elapsed <= scheduled {
            return None;
        }

        let start = match branch.parent {
            None => scheduled,
            Some(parent) => {
                let parent = skeleton.branch(parent)?;
                if parent.growth <= CHILD_GATE {
                    return None;
                }
                scheduled.max(self.timings.parent_ready_time(parent.generation))
            }
        };

        Some(fraction(self.elapsed - start, self.timings.branch_duration))
    }

    /// New growth for a leaf, or `None` to keep its current value
    fn leaf_growth(&self, skeleton: &Skeleton, leaf: &Leaf) -> Option<f32> {
        let parent = skeleton.branch(leaf.parent)?;
        if parent.growth <= LEAF_GATE {
            return None;
        }

        let start = self.timings.leaf_start(parent.generation, leaf.spawn_delay);
        if self.elapsed <= start {
            return None;
        }

        Some(fraction(self.elapsed - start, self.timings.leaf_duration))
    }
}

fn fraction(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        return 1.0;
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
