//! CourseNote backend library.
//!
//! Courses and their notes, kept in MongoDB and served over a JSON API.
//! The crate follows a hexagonal layout: [`domain`] owns entities, ports,
//! and services; [`inbound`] and [`outbound`] hold the adapters.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
