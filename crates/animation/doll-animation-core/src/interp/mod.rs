//! Interpolation helpers shared by the sampler and blended poses.

pub mod functions;
