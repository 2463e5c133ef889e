use bevy::prelude::*;
use constants::render_settings::{
    DUST_COLOUR, DUST_COUNT, DUST_MOTE_RADIUS, DUST_NOISE, DUST_SEED, DUST_SPEED, DUST_VOLUME,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct DustMote {
    pub origin: Vec3,
    pub phase: f32,
    pub speed: f32,
}

impl DustMote {
    /// Drift around the origin; bounded by `DUST_NOISE` on each axis.
    pub fn position_at(&self, elapsed: f32) -> Vec3 {
        let t = elapsed * self.speed + self.phase;
        self.origin
            + Vec3::new(t.sin(), (t * 0.8).cos(), (t * 0.6).sin()) * DUST_NOISE
    }
}

/// Same seed, same layout.
pub fn dust_layout(seed: u64, count: usize, volume: f32) -> Vec<DustMote> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = volume * 0.5;

    (0..count)
        .map(|_| DustMote {
            origin: Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            ),
            phase: rng.gen_range(0.0..TAU),
            speed: DUST_SPEED * rng.gen_range(0.5..1.5),
        })
        .collect()
}

pub fn spawn_dust(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let mesh = meshes.add(Sphere::new(DUST_MOTE_RADIUS));
    let material = materials.add(StandardMaterial {
        base_color: DUST_COLOUR,
        emissive: DUST_COLOUR.to_linear(),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });

    for mote in dust_layout(DUST_SEED, DUST_COUNT, DUST_VOLUME) {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(mote.origin),
            mote,
        ));
    }
}

pub fn drift_dust(time: Res<Time>, mut motes: Query<(&DustMote, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (mote, mut transform) in &mut motes {
        transform.translation = mote.position_at(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_seeded() {
        assert_eq!(dust_layout(7, 20, 10.0), dust_layout(7, 20, 10.0));
        assert_ne!(dust_layout(7, 20, 10.0), dust_layout(8, 20, 10.0));
    }

    #[test]
    fn motes_fill_the_volume() {
        let layout = dust_layout(DUST_SEED, DUST_COUNT, DUST_VOLUME);
        assert_eq!(layout.len(), DUST_COUNT);
        for mote in &layout {
            assert!(mote.origin.abs().max_element() <= DUST_VOLUME * 0.5);
            assert!(mote.speed >= DUST_SPEED * 0.5 && mote.speed <= DUST_SPEED * 1.5);
        }
    }

    #[test]
    fn drift_is_bounded() {
        let mote = DustMote {
            origin: Vec3::ONE,
            phase: 0.3,
            speed: 1.0,
        };
        for step in 0..100 {
            let offset = mote.position_at(step as f32 * 0.25) - mote.origin;
            assert!(offset.abs().max_element() <= DUST_NOISE + 1e-6);
        }
    }
}
