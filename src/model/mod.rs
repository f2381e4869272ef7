//src/model/mod.rs
pub mod elements;
pub mod record;

// Re-exports for cleaner imports
pub use record::{Branch, IdentifierRecord, RecordKind};
