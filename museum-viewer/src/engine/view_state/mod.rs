//! Session view state and the controller that owns it.
//!
//! The controller is a Bevy resource. Intent sources (RPC, keyboard, wheel)
//! mutate it; viewport systems react through change detection and never write.

/// The controller resource and its state snapshot.
pub mod controller;

/// Camera and view modes plus the derived camera rule.
pub mod modes;

/// Scroll container measurements to normalised progress.
pub mod scroll;

pub use controller::{ViewState, ViewStateController};
pub use modes::{CameraMode, ViewMode, derive_camera_mode};
