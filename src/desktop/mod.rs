//! Desktop driver layer
//!
//! The OS binding surface the server is built on, split into four capability
//! sets behind traits:
//! - `InputDriver` - cursor, buttons, wheel, keys, text (enigo)
//! - `DisplayDriver` - screen size and capture (xcap)
//! - `ClipboardDriver` - text and image clipboard (arboard)
//! - `WindowDriver` - enumeration, focus, placement, close
//!
//! ## Supported Platforms
//!
//! - **Windows**: full window management through Win32
//! - **macOS / Linux**: window listing only; focus and placement report `Unsupported`
//!
//! `VirtualDesktop` implements all four in memory for dry runs and tests.

pub mod clipboard;
pub mod input;
pub mod keys;
pub mod platform;
pub mod screenshot;
pub mod types;
pub mod virtual_desktop;

// Re-export main types
pub use keys::Key;
pub use platform::{ClipboardDriver, DisplayDriver, Drivers, InputDriver, WindowDriver};
pub use types::{
    Direction, MouseButton, Placement, Point, Region, Rgb, WindowHandle, WindowInfo, WindowRect,
};
pub use virtual_desktop::{InputEvent, VirtualDesktop};
