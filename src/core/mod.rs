//! Core processing building blocks: processing parameters and the per-pixel
//! background transform. These are internal primitives consumed by the
//! high-level `api` module.
pub mod params;
pub mod processing;
