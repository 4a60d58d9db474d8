//! Command-line host for playing and checking dialogue sets

pub mod play;
