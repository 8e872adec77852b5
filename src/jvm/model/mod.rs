//! Semantic model of classes, methods, and fields

mod class;
mod field;
mod method;

pub use class::*;
pub use field::*;
pub use method::*;
