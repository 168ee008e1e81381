//! Growth animation for generated trees
//!
//! Branches emerge generation by generation, each waiting for its parent
//! to be partly grown; leaves follow once their branch is established.

mod observer;
mod schedule;

pub use observer::{generation_summary, growth_summary, GrowthObserver, LogObserver, NullObserver};
pub use schedule::{GrowthScheduler, GrowthTimings, CHILD_GATE, LEAF_GATE};
