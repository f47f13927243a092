//! UI module for the turntable TUI.

pub mod layout;
pub mod theme;
pub mod widgets;

pub use layout::*;
