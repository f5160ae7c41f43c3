//! Normalized dataset entities.

pub mod types;

pub use types::OrderRecord;
