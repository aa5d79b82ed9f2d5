//! Storage backends for link rows

pub mod in_memory;

pub use in_memory::InMemoryLinkStore;
