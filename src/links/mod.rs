//! Link compilation, registry, runtime and HTTP handlers

pub mod compiler;
pub mod handlers;
pub mod registry;
pub mod service;

pub use compiler::{CompiledLink, compile};
pub use registry::LinkRegistry;
pub use service::{CascadeReport, LinkRuntime, Navigation};
