//! Colony services
//!
//! Business logic for the console: the terminal interpreter, the two
//! simulated entity managers, missions and the perimeter scan. Every
//! operation takes the `Colony` context explicitly.

pub mod expendables;
pub mod missions;
pub mod scan;
pub mod ship;
pub mod terminal;
