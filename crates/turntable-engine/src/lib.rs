//! turntable-engine: Headless engine for the turntable timeline controller
//!
//! This crate provides the core logic shared by the TUI and CLI:
//! - Timeline data model and preset tables
//! - Configuration loading
//! - HTTP client for the turntable service
//! - Request lifecycle tracking
//! - JSON editor validation and health readout formatting

pub mod client;
pub mod config;
pub mod editor;
pub mod health;
pub mod logging;
pub mod presets;
pub mod request;
pub mod timeline;

// Re-export commonly used types
pub use client::{RequestError, TurntableClient};
pub use config::{Admission, Config, ConfigError, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use editor::{EditorError, EditorState, SUBMIT_BLOCKED_MESSAGE};
pub use health::health_text;
pub use logging::{init_logging, LogTarget};
pub use presets::{resolve_trigger, PresetError, PresetRevision, PresetTable, Trigger};
pub use request::{RequestId, RequestState, RequestTracker};
pub use timeline::{Ease, MotionParams, Segment, Timeline};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
