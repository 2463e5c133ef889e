//! Showcase camera: scripted cinematic pose and pointer-driven orbit.

/// Orbit rig, cinematic drift and the camera controller system.
pub mod showcase_camera;
