//! Randomized branch/leaf generation and its parameters

pub mod generator;
pub mod params;
pub mod random;

pub use generator::TreeGenerator;
pub use params::GrowthParams;
pub use random::{MidpointRandom, RandomSource, RngSource};
