//! Reusable UI components

pub mod help_overlay;
pub mod keybindings;

pub use help_overlay::HelpOverlay;
pub use keybindings::{KeyAction, KeybindingContext};
