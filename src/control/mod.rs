//! Compound operations built from single driver calls: glides, clicks,
//! hotkeys, clipboard pastes, captures and window resolution.
//!
//! Everything here is synchronous and runs on a blocking worker.

pub mod keyboard;
pub mod mouse;
pub mod screen;
pub mod window;

pub use window::{WindowRef, WindowResolver};
