//! Import file generation
//!
//! Serializes validated records into the flat key-value point import format.

pub mod imp;

pub use imp::ImpGenerator;
