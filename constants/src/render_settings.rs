use bevy::color::Color;

/// Page background, also used as fog colour so the stage fades into the article.
pub const BACKGROUND_COLOUR: Color = Color::srgb(0.918, 0.910, 0.882);

/// Linear fog range in world units.
pub const FOG_START: f32 = 5.0;
pub const FOG_END: f32 = 25.0;

/// Terracotta finish of the restoration-pending placeholder.
pub const PLACEHOLDER_COLOUR: Color = Color::srgb(0.753, 0.337, 0.129);
pub const PLACEHOLDER_ROUGHNESS: f32 = 0.4;
pub const PLACEHOLDER_METALLIC: f32 = 0.1;

/// Torus knot placeholder geometry.
pub const PLACEHOLDER_KNOT_RADIUS: f32 = 1.0;
pub const PLACEHOLDER_KNOT_TUBE: f32 = 0.3;
pub const PLACEHOLDER_KNOT_TUBULAR_SEGMENTS: usize = 128;
pub const PLACEHOLDER_KNOT_RADIAL_SEGMENTS: usize = 16;
pub const PLACEHOLDER_KNOT_P: u32 = 2;
pub const PLACEHOLDER_KNOT_Q: u32 = 3;

/// Ancient dust drifting around the stage.
pub const DUST_COUNT: usize = 60;
pub const DUST_VOLUME: f32 = 10.0;
pub const DUST_MOTE_RADIUS: f32 = 0.015;
pub const DUST_SPEED: f32 = 0.4;
pub const DUST_NOISE: f32 = 0.5;
pub const DUST_COLOUR: Color = Color::srgba(0.706, 0.608, 0.341, 0.4);
pub const DUST_SEED: u64 = 0x0B45_7A11;

/// Contact shadow receiver below the turntable.
pub const GROUND_Y: f32 = -1.4;
pub const GROUND_RADIUS: f32 = 5.0;
pub const GROUND_COLOUR: Color = Color::srgb(0.898, 0.890, 0.859);

/// Key and fill light brightness (lux) and ambient level.
pub const KEY_LIGHT_ILLUMINANCE: f32 = 6_000.0;
pub const FILL_LIGHT_INTENSITY: f32 = 250_000.0;
pub const AMBIENT_BRIGHTNESS: f32 = 400.0;
