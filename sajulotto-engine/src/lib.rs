pub mod merger;
pub mod pools;
pub mod profile;
pub mod sampler;
pub mod strategy;
pub mod weights;
