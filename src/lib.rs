//! Keys Check - terminal keyboard tester
//!
//! Renders a full-size keyboard, highlights keys as they are pressed on the
//! physical keyboard, counts presses, and identifies the connected USB
//! keyboard through the platform's USB device information.

pub mod config;
pub mod device;
pub mod keyboard;
pub mod logging;
pub mod ui;

pub use config::Config;
