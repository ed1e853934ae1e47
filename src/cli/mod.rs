//! Command-line parsing for the console binary

pub mod args;
