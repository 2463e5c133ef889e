use bevy::math::Vec3;

/// Rest position of the showcase camera; it always looks at the origin.
pub const CAMERA_REST_POSITION: Vec3 = Vec3::new(4.0, 2.0, 5.0);
pub const CAMERA_FOV_DEGREES: f32 = 40.0;

/// Idle vertical drift of the cinematic camera: `y = rest.y + sin(t * freq) * amplitude`.
pub const CAMERA_BOB_AMPLITUDE: f32 = 0.1;
pub const CAMERA_BOB_FREQUENCY: f32 = 0.2;

/// Full article scroll maps to this many turntable revolutions.
pub const TURNS_PER_SCROLL: f32 = 2.0;

/// Fraction of the remaining rotation covered per reference frame.
pub const ROTATION_SMOOTHING: f32 = 0.05;
pub const REFERENCE_FRAME_RATE: f32 = 60.0;

/// Orbit controls.
pub const ORBIT_YAW_SENSITIVITY: f32 = 0.0060;
pub const ORBIT_PITCH_SENSITIVITY: f32 = 0.0050;
pub const ORBIT_MAX_POLAR_ANGLE: f32 = std::f32::consts::PI / 1.5;
pub const ORBIT_MIN_DISTANCE: f32 = 2.5;
pub const ORBIT_MAX_DISTANCE: f32 = 14.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.1;
/// Rate at which the cinematic camera eases back to its rest pose.
pub const ORBIT_RETURN_RATE: f32 = 2.5;

/// Floating mount bob.
pub const FLOAT_SPEED: f32 = 1.5;
pub const FLOAT_RANGE: f32 = 0.1;
pub const FLOAT_WOBBLE: f32 = 0.2;

/// Loaded models are scaled so their bounding sphere has this radius.
pub const MODEL_FIT_RADIUS: f32 = 1.6;

/// Virtual article used for native wheel scrolling (pixels).
pub const NATIVE_ARTICLE_HEIGHT: f32 = 12_000.0;
pub const NATIVE_VIEWPORT_HEIGHT: f32 = 900.0;
pub const NATIVE_WHEEL_LINE_PIXELS: f32 = 40.0;
