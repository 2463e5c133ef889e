use crate::engine::scene::dressing::stage_fog;
use crate::engine::view_state::{CameraMode, ViewStateController};
use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use constants::showcase::{
    CAMERA_BOB_AMPLITUDE, CAMERA_BOB_FREQUENCY, CAMERA_FOV_DEGREES, CAMERA_REST_POSITION,
    ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR_ANGLE, ORBIT_MIN_DISTANCE, ORBIT_PITCH_SENSITIVITY,
    ORBIT_RETURN_RATE, ORBIT_YAW_SENSITIVITY, ORBIT_ZOOM_STEP,
};

/// Polar angle is kept just off the pole so `looking_at` has a stable up axis.
const MIN_POLAR_ANGLE: f32 = 1e-3;

#[derive(Component)]
pub struct ShowcaseCamera;

/// Spherical camera pose around the origin. Polar angle is measured from +Y.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OrbitRig {
    pub yaw: f32,
    pub polar: f32,
    pub distance: f32,
}

impl Default for OrbitRig {
    fn default() -> Self {
        Self::rest()
    }
}

impl OrbitRig {
    /// Pose matching the cinematic rest position.
    pub fn rest() -> Self {
        Self::from_position(CAMERA_REST_POSITION)
    }

    pub fn from_position(position: Vec3) -> Self {
        let distance = position.length().max(f32::EPSILON);
        Self {
            yaw: position.x.atan2(position.z),
            polar: (position.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
        }
    }

    pub fn position(&self) -> Vec3 {
        let ring = self.distance * self.polar.sin();
        Vec3::new(
            ring * self.yaw.sin(),
            self.distance * self.polar.cos(),
            ring * self.yaw.cos(),
        )
    }

    /// Apply a pointer drag in pixels. No panning; polar angle stays within
    /// the orbit limit.
    pub fn rotate(&mut self, drag: Vec2) {
        self.yaw -= drag.x * ORBIT_YAW_SENSITIVITY;
        self.polar = (self.polar - drag.y * ORBIT_PITCH_SENSITIVITY)
            .clamp(MIN_POLAR_ANGLE, ORBIT_MAX_POLAR_ANGLE);
    }

    /// Wheel zoom in line units; positive scrolls in.
    pub fn zoom(&mut self, lines: f32) {
        let factor = (1.0 - lines * ORBIT_ZOOM_STEP).max(0.1);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Exponential return toward `rest`, taking the short way around in yaw.
    pub fn ease_toward(&mut self, rest: &OrbitRig, delta_secs: f32) {
        let t = 1.0 - (-ORBIT_RETURN_RATE * delta_secs.max(0.0)).exp();
        let yaw_gap = (rest.yaw - self.yaw + std::f32::consts::PI)
            .rem_euclid(std::f32::consts::TAU)
            - std::f32::consts::PI;
        self.yaw += yaw_gap * t;
        self.polar += (rest.polar - self.polar) * t;
        self.distance += (rest.distance - self.distance) * t;
    }
}

/// Idle vertical drift of the cinematic camera.
pub fn cinematic_bob(elapsed: f32) -> f32 {
    (elapsed * CAMERA_BOB_FREQUENCY).sin() * CAMERA_BOB_AMPLITUDE
}

pub fn spawn_showcase_camera(mut commands: Commands) {
    commands.init_resource::<OrbitRig>();
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_REST_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        stage_fog(),
        ShowcaseCamera,
    ));
}

/// Orbit mode follows the pointer; cinematic mode eases back to the rest pose
/// and drifts. Both always look at the exhibit.
pub fn showcase_camera_controller(
    mut camera_query: Query<&mut Transform, With<ShowcaseCamera>>,
    mut rig: ResMut<OrbitRig>,
    controller: Option<Res<ViewStateController>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    time: Res<Time>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mode = controller
        .map(|controller| controller.state().camera_mode)
        .unwrap_or_default();

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let scroll_lines: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y * 0.05,
        })
        .sum();

    let position = match mode {
        CameraMode::Orbit => {
            if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
                rig.rotate(mouse_delta);
            }
            if scroll_lines.abs() > f32::EPSILON {
                rig.zoom(scroll_lines);
            }
            rig.position()
        }
        CameraMode::Cinematic => {
            rig.ease_toward(&OrbitRig::rest(), time.delta_secs());
            rig.position() + Vec3::Y * cinematic_bob(time.elapsed_secs())
        }
    };

    *camera_transform = Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn rest_rig_reproduces_rest_position() {
        assert!(close(OrbitRig::rest().position(), CAMERA_REST_POSITION));
    }

    #[test]
    fn polar_angle_is_limited() {
        let mut rig = OrbitRig::rest();
        rig.rotate(Vec2::new(0.0, -100_000.0));
        assert_eq!(rig.polar, ORBIT_MAX_POLAR_ANGLE);
        rig.rotate(Vec2::new(0.0, 100_000.0));
        assert_eq!(rig.polar, MIN_POLAR_ANGLE);
        assert!(rig.position().y > 0.0);
    }

    #[test]
    fn dragging_never_moves_the_target_distance() {
        let mut rig = OrbitRig::rest();
        let distance = rig.distance;
        rig.rotate(Vec2::new(250.0, 40.0));
        assert!((rig.position().length() - distance).abs() < 1e-4);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut rig = OrbitRig::rest();
        for _ in 0..100 {
            rig.zoom(3.0);
        }
        assert_eq!(rig.distance, ORBIT_MIN_DISTANCE);
        for _ in 0..100 {
            rig.zoom(-3.0);
        }
        assert_eq!(rig.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn cinematic_return_settles_at_rest() {
        let mut rig = OrbitRig {
            yaw: 3.0,
            polar: 0.3,
            distance: 12.0,
        };
        let rest = OrbitRig::rest();
        for _ in 0..600 {
            rig.ease_toward(&rest, 1.0 / 60.0);
        }
        assert!(close(rig.position(), CAMERA_REST_POSITION));
    }

    #[test]
    fn yaw_returns_the_short_way_round() {
        let rest = OrbitRig::rest();
        let mut rig = OrbitRig {
            yaw: rest.yaw + std::f32::consts::TAU - 0.2,
            ..rest
        };
        rig.ease_toward(&rest, 1.0 / 60.0);
        assert!(rig.yaw > rest.yaw + std::f32::consts::TAU - 0.2);
    }

    #[test]
    fn bob_matches_idle_drift() {
        assert_eq!(cinematic_bob(0.0), 0.0);
        let quarter = std::f32::consts::FRAC_PI_2 / CAMERA_BOB_FREQUENCY;
        assert!((cinematic_bob(quarter) - CAMERA_BOB_AMPLITUDE).abs() < 1e-5);
    }
}
