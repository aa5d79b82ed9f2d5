//! Server module for building the HTTP surface
//!
//! `ServerBuilder` compiles the configured links at startup and registers:
//! - Health check routes
//! - Link introspection, row and navigation routes
//! - API reference page routes

pub mod builder;
pub mod host;
pub mod reference;
pub mod router;

pub use builder::ServerBuilder;
pub use host::ServerHost;
pub use reference::{Area, PageMetadata, RenderedPage};
