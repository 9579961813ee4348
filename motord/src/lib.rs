//! Motor-host daemon: polls the vision host for commands and drives
//! the stepper core, recentering the platform before every exit.

pub mod channel;
pub mod manual;
pub mod run;

pub use channel::{CommandClient, PollError};
