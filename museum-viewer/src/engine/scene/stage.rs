use crate::engine::scene::dressing::spawn_stage_dressing;
use crate::engine::scene::dust::spawn_dust;
use crate::engine::scene::placeholder::spawn_placeholder;
use crate::engine::scene::turntable::{FloatingMount, Turntable};
use bevy::prelude::*;

/// Build the showcase: floating mount, turntable with the placeholder knot,
/// lights, ground and dust. Loaded models are attached to the turntable later.
pub fn setup_showcase_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    spawn_stage_dressing(&mut commands, &mut meshes, &mut materials);

    let mount = commands
        .spawn((
            FloatingMount,
            Transform::default(),
            Visibility::default(),
            Name::new("Floating mount"),
        ))
        .id();
    let turntable = commands
        .spawn((
            Turntable::default(),
            Transform::default(),
            Visibility::default(),
            Name::new("Turntable"),
        ))
        .id();
    commands.entity(mount).add_child(turntable);

    spawn_placeholder(&mut commands, turntable, &mut meshes, &mut materials);
    spawn_dust(&mut commands, &mut meshes, &mut materials);
}
