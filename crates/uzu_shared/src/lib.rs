//! # Uzu Shared
//!
//! Plain-data math types exchanged between the pool layer and the host
//! simulation. The host owns the real scene representation; these types
//! only carry the spawn position and orientation across the boundary.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod math;

pub use math::{Quaternion, Transform, Vec3};
