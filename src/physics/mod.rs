// src/physics/mod.rs
pub mod field;
pub mod spectrum;

pub use field::{FieldModel, Point3};
pub use spectrum::Band;
