use crate::engine::view_state::{CameraMode, ViewStateController};
use bevy::prelude::*;
use constants::showcase::{
    FLOAT_RANGE, FLOAT_SPEED, FLOAT_WOBBLE, REFERENCE_FRAME_RATE, ROTATION_SMOOTHING,
    TURNS_PER_SCROLL,
};
use std::f32::consts::TAU;

/// Yaw carrier for the exhibit. Models and the placeholder are its children.
#[derive(Component, Debug, Default)]
pub struct Turntable {
    pub angle: f32,
}

/// Parent of the turntable; bobs gently in place.
#[derive(Component, Debug, Default)]
pub struct FloatingMount;

/// Turntable angle for a scroll position.
pub fn turntable_target(scroll_progress: f32) -> f32 {
    scroll_progress * TURNS_PER_SCROLL * TAU
}

/// Exponential approach toward `target`: covers `ROTATION_SMOOTHING` of the
/// gap per reference frame regardless of the actual frame time.
pub fn smooth_rotation(current: f32, target: f32, delta_secs: f32) -> f32 {
    let keep = (1.0 - ROTATION_SMOOTHING).powf(delta_secs.max(0.0) * REFERENCE_FRAME_RATE);
    target + (current - target) * keep
}

/// Scroll-driven rotation, suspended while the orbit camera is active.
pub fn drive_turntable(
    time: Res<Time>,
    controller: Option<Res<ViewStateController>>,
    mut turntables: Query<(&mut Turntable, &mut Transform)>,
) {
    let Some(controller) = controller else {
        return;
    };
    let state = controller.state();
    if state.camera_mode == CameraMode::Orbit {
        return;
    }

    let target = turntable_target(state.scroll_progress);
    for (mut turntable, mut transform) in &mut turntables {
        turntable.angle = smooth_rotation(turntable.angle, target, time.delta_secs());
        transform.rotation = Quat::from_rotation_y(turntable.angle);
    }
}

/// Bob height and wobble at `elapsed` seconds. Wobble is zero outside
/// cinematic mode.
pub fn float_pose(elapsed: f32, cinematic: bool) -> (f32, Quat) {
    let t = elapsed * FLOAT_SPEED;
    let height = (t / 4.0).sin() * FLOAT_RANGE;

    let intensity = if cinematic { FLOAT_WOBBLE } else { 0.0 };
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        (t / 4.0).cos() / 8.0 * intensity,
        (t / 4.0).sin() / 8.0 * intensity,
        (t / 4.0).sin() / 20.0 * intensity,
    );
    (height, rotation)
}

pub fn float_mount(
    time: Res<Time>,
    controller: Option<Res<ViewStateController>>,
    mut mounts: Query<&mut Transform, With<FloatingMount>>,
) {
    let cinematic = controller
        .map(|controller| controller.state().camera_mode == CameraMode::Cinematic)
        .unwrap_or(true);
    let (height, rotation) = float_pose(time.elapsed_secs(), cinematic);

    for mut transform in &mut mounts {
        transform.translation.y = height;
        transform.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn one_reference_frame_covers_five_percent() {
        let next = smooth_rotation(0.0, 10.0, FRAME);
        assert!((next - 0.5).abs() < 1e-4);
    }

    #[test]
    fn smoothing_is_frame_rate_independent() {
        let at_60 = smooth_rotation(smooth_rotation(0.0, 1.0, FRAME), 1.0, FRAME);
        let at_30 = smooth_rotation(0.0, 1.0, 2.0 * FRAME);
        assert!((at_60 - at_30).abs() < 1e-5);
    }

    #[test]
    fn rotation_converges_on_target() {
        let target = turntable_target(0.5);
        assert!((target - TAU).abs() < 1e-5);

        let mut angle = 0.0;
        for _ in 0..600 {
            angle = smooth_rotation(angle, target, FRAME);
        }
        assert!((angle - target).abs() < 1e-3);
    }

    #[test]
    fn zero_delta_holds_position() {
        assert_eq!(smooth_rotation(1.25, 4.0, 0.0), 1.25);
    }

    #[test]
    fn full_scroll_is_two_turns() {
        assert!((turntable_target(1.0) - 2.0 * TAU).abs() < 1e-5);
        assert_eq!(turntable_target(0.0), 0.0);
    }

    #[test]
    fn float_stays_in_range_and_wobble_is_cinematic_only() {
        for step in 0..200 {
            let t = step as f32 * 0.37;
            let (height, _) = float_pose(t, true);
            assert!(height.abs() <= FLOAT_RANGE + 1e-6);
            let (_, still) = float_pose(t, false);
            assert!(still.angle_between(Quat::IDENTITY) < 1e-6);
        }
    }

    #[test]
    fn turntable_is_frozen_in_orbit() {
        use crate::engine::catalog::LocalizedCatalogs;

        let mut controller = ViewStateController::new(LocalizedCatalogs::placeholder());
        controller.update_scroll_progress(500.0, 1500.0, 500.0);
        controller.set_camera_mode(CameraMode::Orbit);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(controller)
            .add_systems(Update, drive_turntable);
        let entity = app
            .world_mut()
            .spawn((Turntable::default(), Transform::default()))
            .id();

        app.update();
        app.update();
        assert_eq!(app.world().get::<Turntable>(entity).unwrap().angle, 0.0);
    }
}
