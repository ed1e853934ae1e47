//! Niflheim Colony Console
//!
//! Command console for the Niflheim ice-world colony: a terminal command
//! interpreter, simulated expendables and ship, missions that play out over
//! time, and a capped mission log.
//!
//! # Overview
//!
//! All state lives in one [`colony::Colony`] context that every service
//! receives explicitly. Delayed output and recurring simulation ticks are
//! queued as data in a virtual-time scheduler, so the whole simulation can be
//! driven deterministically by calling [`ColonyEngine::advance`].
//!
//! # Modules
//!
//! - [`engine`] - Engine owning the colony and running scheduled tasks
//! - [`colony`] - The shared context and its task type
//! - [`models`] - Domain models (expendables, ship, missions, log, map)
//! - [`services`] - Terminal interpreter, managers, missions and scan
//! - [`scheduler`] - Virtual-time task queue and clocks
//! - [`console`] - Line-oriented front end used by the binary
//! - [`io`] - Input/output abstractions for testing
//! - [`ui`] - Presentation of lines and dashboards
//!
//! # Example
//!
//! ```rust
//! use niflheim::ColonyEngine;
//!
//! let mut engine = ColonyEngine::with_seed(42);
//! engine.submit("scan");
//! engine.advance(3_000);
//! assert!(engine.colony().terminal().shows("Scan complete. Results:"));
//! ```

pub mod cli;
pub mod colony;
pub mod config;
pub mod console;
pub mod engine;
pub mod io;
pub mod logging;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use colony::{Colony, Task};
pub use config::ColonyConfig;
pub use engine::{ColonyEngine, EngineState};
pub use models::errors::{ColonyError, ColonyResult};
