//! Optional instrumentation hooks for generation and growth

use crate::skeleton::Skeleton;

/// Receives notifications from a [`GrowingTree`](crate::tree::GrowingTree).
///
/// Both methods default to doing nothing.
pub trait GrowthObserver {
    /// Called after a new tree has been generated
    fn on_generated(&mut self, _skeleton: &Skeleton) {}

    /// Called after every growth update, once meshes are rebuilt
    fn on_advanced(&mut self, _elapsed: f32, _skeleton: &Skeleton) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl GrowthObserver for NullObserver {}

/// Writes generation statistics and periodic visibility reports through `log`
#[derive(Debug, Clone)]
pub struct LogObserver {
    /// Seconds of simulated time between growth reports
    pub interval: f32,
    last_report: f32,
}

impl Default for LogObserver {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl LogObserver {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            last_report: 0.0,
        }
    }

    /// True when more than `interval` seconds passed since the last report
    fn due(&mut self, elapsed: f32) -> bool {
        if elapsed - self.last_report > self.interval {
            self.last_report = elapsed;
            true
        } else {
            false
        }
    }
}

impl GrowthObserver for LogObserver {
    fn on_generated(&mut self, skeleton: &Skeleton) {
        self.last_report = 0.0;
        log::debug!("{}", generation_summary(skeleton));
    }

    fn on_advanced(&mut self, elapsed: f32, skeleton: &Skeleton) {
        if self.due(elapsed) {
            log::debug!("{}", growth_summary(elapsed, skeleton));
        }
    }
}

/// One-line summary of a freshly generated skeleton
pub fn generation_summary(skeleton: &Skeleton) -> String {
    format!(
        "generated {} branches (per generation: {:?}), {} leaves",
        skeleton.branch_count(),
        skeleton.generation_counts(),
        skeleton.leaf_count()
    )
}

/// One-line summary of how much of the tree is visible at `elapsed`
pub fn growth_summary(elapsed: f32, skeleton: &Skeleton) -> String {
    format!(
        "t={:.1}s visible branches per generation: {:?}, visible leaves: {}/{}",
        elapsed,
        skeleton.visible_counts_by_generation(),
        skeleton.visible_leaf_count(),
        skeleton.leaf_count()
    )
}
