//! Showcase stage around the active exhibit.
//!
//! A floating mount carries the turntable; the turntable carries the
//! placeholder knot and whichever model is loaded. Lighting, fog, ground and
//! dust are static dressing.

/// Lights, background, fog and ground disc.
pub mod dressing;

/// Seeded dust motes drifting through the stage volume.
pub mod dust;

/// Procedural torus knot shown for pending restorations.
pub mod placeholder;

/// Startup assembly of the stage hierarchy.
pub mod stage;

/// Scroll-driven turntable and floating mount.
pub mod turntable;
