//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! - [`PlatformId`], [`TaskId`]: string-based identifiers
//! - [`RawPrice`], [`PriceNormalizer`]: reported prices and their normalization
//! - [`TaskState`]: remote task lifecycle

pub mod enums;
pub mod ids;
pub mod price;

pub use enums::{ParseEnumError, TaskState};
pub use ids::{PlatformId, TaskId};
pub use price::{NOT_AVAILABLE, PriceNormalizer, RawPrice};
