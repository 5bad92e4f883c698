//! # Task API
//!
//! Integration with the remote mobile-automation task API.
//!
//! - [`RemoteTaskClient`]: port consumed by the application layer
//! - [`MobileRunClient`]: HTTP implementation
//! - [`detect_status`]: tolerant parsing of the two status response shapes

pub mod error;
pub mod http_client;
pub mod mobilerun;
pub mod status;
pub mod traits;

pub use error::{TaskApiError, TaskApiResult};
pub use mobilerun::{MobileRunClient, TaskApiConfig};
pub use status::detect_status;
pub use traits::{RawStatus, RemoteTaskClient};
