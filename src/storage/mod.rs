//! Storage implementations for record collections

pub mod in_memory;

pub use in_memory::InMemoryRecordService;
