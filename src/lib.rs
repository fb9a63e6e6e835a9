//! Focus Timer library
//!
//! A minimal Pomodoro-style focus timer: a countdown engine on a
//! background thread plus an egui settings panel persisting the three
//! timer preferences.

pub mod app;
pub mod constant;
pub mod prefs;
pub mod style;
pub mod timer;
pub mod ui;
pub mod validate;
