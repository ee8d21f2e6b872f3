//! # Containers
//!
//! Pre-allocated storage used by the pools.
//!
//! ## Design Philosophy
//!
//! Memory is reserved when the container is built. Adding to a full
//! container is reported as an error; it never silently reallocates.

mod fixed_list;

pub use fixed_list::FixedList;
