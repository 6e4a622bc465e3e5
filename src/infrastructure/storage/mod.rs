//! Storage adapters that live in process memory

pub mod memory;

pub use memory::InMemoryStorage;
