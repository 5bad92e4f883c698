//! # Domain Layer
//!
//! Platforms, task requests and outcomes, prices and comparisons.
//!
//! Nothing here performs I/O.

pub mod entities;
pub mod value_objects;
