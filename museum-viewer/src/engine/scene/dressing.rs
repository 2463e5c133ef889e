use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use constants::render_settings::{
    AMBIENT_BRIGHTNESS, BACKGROUND_COLOUR, FILL_LIGHT_INTENSITY, FOG_END, FOG_START,
    GROUND_COLOUR, GROUND_RADIUS, GROUND_Y, KEY_LIGHT_ILLUMINANCE,
};

#[derive(Component)]
pub struct GroundDisc;

/// Linear fog in the page colour so distant geometry dissolves into the article.
pub fn stage_fog() -> DistanceFog {
    DistanceFog {
        color: BACKGROUND_COLOUR,
        falloff: FogFalloff::Linear {
            start: FOG_START,
            end: FOG_END,
        },
        ..default()
    }
}

/// Background, ambient level, key and fill lights, and the contact disc.
pub fn spawn_stage_dressing(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    commands.insert_resource(ClearColor(BACKGROUND_COLOUR));
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: KEY_LIGHT_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Key light"),
    ));

    commands.spawn((
        PointLight {
            intensity: FILL_LIGHT_INTENSITY,
            color: Color::srgb(1.0, 0.94, 0.86),
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(-4.0, 3.0, -3.0),
        Name::new("Fill light"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Circle::new(GROUND_RADIUS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: GROUND_COLOUR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, GROUND_Y, 0.0)
            .with_rotation(Quat::from_rotation_x(-std::f32::consts::FRAC_PI_2)),
        GroundDisc,
        Name::new("Ground disc"),
    ));
}
