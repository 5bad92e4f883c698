//! # Application Layer
//!
//! Use cases over the domain: searching platforms, polling tasks and
//! comparing prices.

pub mod error;
pub mod services;

pub use error::{ApplicationError, ApplicationResult, InfrastructureError};
