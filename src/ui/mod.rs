//! User interface and presentation
//!
//! Presenters turn terminal lines and colony state into text for the
//! console, keeping formatting out of the services.

pub mod presenters;
