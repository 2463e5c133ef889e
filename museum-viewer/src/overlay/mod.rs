//! Overlay contract between the viewer and the host page.
//!
//! The host renders the dock, description card and archive grid from an
//! [`snapshot::OverlaySnapshot`] and reports user actions as
//! [`intent::OverlayIntent`]s. Native builds render a minimal text overlay and
//! map keyboard and wheel input onto the same intents.

/// Intents, nav-button mirroring and the controller dispatch.
pub mod intent;

/// Native text overlay and input shortcuts.
#[cfg(not(target_arch = "wasm32"))]
pub mod native;

/// Serialisable overlay state served to the host page.
pub mod snapshot;
