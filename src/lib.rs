//! Junction Simulation Library
//!
//! A four-way junction signal and vehicle queueing simulation that can run
//! independently or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
