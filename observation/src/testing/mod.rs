//! Testing utilities for code built on the observation system.
//!
//! This module provides:
//! - A recording listener capturing every event it receives

mod recording;

pub use recording::{RecordedEvent, RecordingListener};
