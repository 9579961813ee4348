//! Vision-host daemon: turns the latest face-offset angle into motor
//! commands and serves them to the motor host over HTTP.
//!
//! Face detection itself is an external collaborator; it only has to
//! publish angles through [`SharedAngle`].

pub mod policy;
pub mod source;
pub mod web;

pub use source::{AngleSource, SharedAngle};
pub use web::{app, AppState, TrackerSettings};
