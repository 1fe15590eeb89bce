//! Coordinate reference system transformations.
//!
//! Implements the RD New grid approximation from scratch without external
//! dependencies.

pub mod rd;

pub use rd::RdNew;
