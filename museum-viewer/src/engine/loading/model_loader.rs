use crate::engine::catalog::{Artifact, ArtifactId, ModelFormat, ModelRef};
use crate::engine::scene::placeholder::PlaceholderExhibit;
use crate::engine::scene::turntable::Turntable;
use crate::engine::view_state::ViewStateController;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::render::primitives::Aabb;
use constants::showcase::MODEL_FIT_RADIUS;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelLoadState {
    /// No model reference; the placeholder is the exhibit.
    #[default]
    Placeholder,
    Loading,
    Loaded,
    Failed,
    /// Format without a registered loader in this build.
    Unsupported,
}

/// What the slot should do for a newly active artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotPlan {
    Placeholder,
    Load(ModelRef),
    Unsupported(ModelRef),
}

impl SlotPlan {
    pub fn for_artifact(artifact: &Artifact) -> Self {
        match &artifact.model {
            None => Self::Placeholder,
            Some(model) => match model.format {
                ModelFormat::Gltf => Self::Load(model.clone()),
                ModelFormat::Fbx | ModelFormat::Obj => Self::Unsupported(model.clone()),
            },
        }
    }
}

/// Marker on a model root waiting for its mesh bounds.
#[derive(Component)]
pub struct PendingFit;

#[derive(Component)]
pub struct LoadedModel;

/// The single model slot. A new selection supersedes whatever is in flight:
/// the old scene is despawned and its handle dropped, so a late result has
/// nowhere to land.
#[derive(Resource, Default, Debug)]
pub struct ModelSlot {
    artifact: Option<ArtifactId>,
    model: Option<ModelRef>,
    /// Whole glTF file. Parse and IO failures are reported on this handle,
    /// not on the labelled scene.
    source: Option<Handle<Gltf>>,
    handle: Option<Handle<Scene>>,
    entity: Option<Entity>,
    state: ModelLoadState,
}

impl ModelSlot {
    pub fn state(&self) -> ModelLoadState {
        self.state
    }

    /// `true` when `artifact` is not what the slot currently holds. A language
    /// switch keeps ids and models, so it never reloads.
    pub fn needs_swap(&self, artifact: &Artifact) -> bool {
        self.artifact.as_ref() != Some(&artifact.id) || self.model != artifact.model
    }

    fn notify(&self, rpc_interface: &mut WebRpcInterface) {
        rpc_interface.send_notification(
            "model_load_state",
            serde_json::json!({
                "id": self.artifact.as_ref().map(ArtifactId::as_str),
                "path": self.model.as_ref().map(|model| model.path.as_str()),
                "format": self.model.as_ref().map(|model| model.format),
                "state": self.state,
            }),
        );
    }
}

/// Follow the active artifact: tear down the previous model and start the
/// next one, with the placeholder shown until it is ready.
pub fn sync_model_slot(
    mut commands: Commands,
    controller: Option<Res<ViewStateController>>,
    mut slot: ResMut<ModelSlot>,
    asset_server: Res<AssetServer>,
    turntables: Query<Entity, With<Turntable>>,
    mut placeholders: Query<&mut Visibility, With<PlaceholderExhibit>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(controller) = controller else {
        return;
    };
    let Some(artifact) = controller.active_artifact() else {
        return;
    };
    if !slot.needs_swap(artifact) {
        return;
    }
    let Ok(turntable) = turntables.single() else {
        return;
    };

    if let Some(previous) = slot.entity.take() {
        commands.entity(previous).despawn();
    }
    slot.handle = None;
    slot.source = None;
    slot.artifact = Some(artifact.id.clone());
    slot.model = artifact.model.clone();

    for mut visibility in &mut placeholders {
        *visibility = Visibility::Inherited;
    }

    match SlotPlan::for_artifact(artifact) {
        SlotPlan::Placeholder => {
            slot.state = ModelLoadState::Placeholder;
        }
        SlotPlan::Unsupported(model) => {
            warn!(
                "No {} loader available for {}, keeping placeholder",
                model.format.as_str(),
                model.path
            );
            slot.state = ModelLoadState::Unsupported;
        }
        SlotPlan::Load(model) => {
            info!("Loading model {} for {}", model.path, artifact.id);
            let source: Handle<Gltf> = asset_server.load(model.path.clone());
            let handle: Handle<Scene> =
                asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.path.clone()));
            let entity = commands
                .spawn((
                    SceneRoot(handle.clone()),
                    Transform::default(),
                    Visibility::Hidden,
                    PendingFit,
                    LoadedModel,
                    Name::new(artifact.name.clone()),
                ))
                .id();
            commands.entity(turntable).add_child(entity);

            slot.source = Some(source);
            slot.handle = Some(handle);
            slot.entity = Some(entity);
            slot.state = ModelLoadState::Loading;
        }
    }

    slot.notify(&mut rpc_interface);
}

/// Outcome of an in-flight load, or `None` while it is still pending.
pub fn load_outcome(
    asset_server: &AssetServer,
    source: &Handle<Gltf>,
    scene: &Handle<Scene>,
) -> Option<Result<(), String>> {
    if asset_server.is_loaded_with_dependencies(scene) {
        return Some(Ok(()));
    }

    for state in [
        asset_server.get_load_state(source),
        asset_server.get_load_state(scene),
    ] {
        if let Some(LoadState::Failed(err)) = state {
            return Some(Err(err.to_string()));
        }
    }

    let scene_settled = matches!(asset_server.get_load_state(scene), Some(LoadState::Loaded));
    match asset_server.get_recursive_dependency_load_state(source) {
        Some(RecursiveDependencyLoadState::Failed(err)) => Some(Err(err.to_string())),
        // Labelled assets settle before their file, so a finished file whose
        // scene never settled has no default scene at all.
        Some(RecursiveDependencyLoadState::Loaded) if !scene_settled => {
            Some(Err("file contains no default scene".to_string()))
        }
        _ => None,
    }
}

/// Resolve the in-flight load. Failures are logged once and leave the
/// placeholder up; there is no retry.
pub fn watch_model_load(
    mut commands: Commands,
    mut slot: ResMut<ModelSlot>,
    asset_server: Res<AssetServer>,
    mut placeholders: Query<&mut Visibility, (With<PlaceholderExhibit>, Without<LoadedModel>)>,
    mut models: Query<&mut Visibility, (With<LoadedModel>, Without<PlaceholderExhibit>)>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if slot.state != ModelLoadState::Loading {
        return;
    }
    let (Some(source), Some(handle)) = (slot.source.as_ref(), slot.handle.as_ref()) else {
        return;
    };

    match load_outcome(&asset_server, source, handle) {
        None => {}
        Some(Ok(())) => {
            for mut visibility in &mut placeholders {
                *visibility = Visibility::Hidden;
            }
            if let Some(entity) = slot.entity {
                if let Ok(mut visibility) = models.get_mut(entity) {
                    *visibility = Visibility::Inherited;
                }
            }
            info!("✓ Model ready: {:?}", slot.model.as_ref().map(|m| &m.path));
            slot.state = ModelLoadState::Loaded;
            slot.notify(&mut rpc_interface);
        }
        Some(Err(reason)) => {
            error!(
                "Model {:?} failed to load: {}",
                slot.model.as_ref().map(|m| &m.path),
                reason
            );
            if let Some(entity) = slot.entity.take() {
                commands.entity(entity).despawn();
            }
            slot.source = None;
            slot.handle = None;
            slot.state = ModelLoadState::Failed;
            slot.notify(&mut rpc_interface);
        }
    }
}

/// Transform that centres a box on the origin and scales its bounding sphere
/// to `MODEL_FIT_RADIUS`.
pub fn fit_transform(min: Vec3, max: Vec3) -> Option<Transform> {
    let radius = (max - min).length() * 0.5;
    if !radius.is_finite() || radius <= f32::EPSILON {
        return None;
    }
    let scale = MODEL_FIT_RADIUS / radius;
    let centre = (min + max) * 0.5;
    Some(Transform::from_translation(-centre * scale).with_scale(Vec3::splat(scale)))
}

/// Auto-fit model roots once their meshes have bounds.
pub fn fit_loaded_models(
    mut commands: Commands,
    mut roots: Query<(Entity, &mut Transform, &GlobalTransform), With<PendingFit>>,
    children: Query<&Children>,
    bounds: Query<(&Aabb, &GlobalTransform)>,
) {
    for (root, mut transform, root_global) in &mut roots {
        let to_local = root_global.affine().inverse();
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut found = false;

        for descendant in children.iter_descendants(root) {
            let Ok((aabb, global)) = bounds.get(descendant) else {
                continue;
            };
            let mesh_to_root = to_local * global.affine();
            let centre = Vec3::from(aabb.center);
            let half = Vec3::from(aabb.half_extents);
            for corner in [
                Vec3::new(-1.0, -1.0, -1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(-1.0, 1.0, 1.0),
                Vec3::new(1.0, -1.0, -1.0),
                Vec3::new(1.0, -1.0, 1.0),
                Vec3::new(1.0, 1.0, -1.0),
                Vec3::new(1.0, 1.0, 1.0),
            ] {
                let point = mesh_to_root.transform_point3(centre + half * corner);
                min = min.min(point);
                max = max.max(point);
            }
            found = true;
        }

        if !found {
            continue;
        }

        if let Some(fitted) = fit_transform(min, max) {
            *transform = fitted;
            debug!("Model fitted with scale {:.3}", fitted.scale.x);
        }
        commands.entity(root).remove::<PendingFit>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(index: usize, model: Option<&str>) -> Artifact {
        Artifact {
            id: ArtifactId::from_index(index),
            name: format!("Item {index}"),
            model: model.map(|path| ModelRef::new(path, None)),
            description: String::new(),
            chapter: None,
        }
    }

    #[test]
    fn plan_follows_model_reference() {
        assert_eq!(SlotPlan::for_artifact(&artifact(0, None)), SlotPlan::Placeholder);
        assert!(matches!(
            SlotPlan::for_artifact(&artifact(1, Some("3dmodels/gate_opt.glb"))),
            SlotPlan::Load(_)
        ));
        assert!(matches!(
            SlotPlan::for_artifact(&artifact(2, Some("3dmodels/column.fbx"))),
            SlotPlan::Unsupported(_)
        ));
    }

    #[test]
    fn swap_only_when_artifact_changes() {
        let mut slot = ModelSlot::default();
        let gate = artifact(1, Some("3dmodels/gate_opt.glb"));
        assert!(slot.needs_swap(&gate));

        slot.artifact = Some(gate.id.clone());
        slot.model = gate.model.clone();
        assert!(!slot.needs_swap(&gate));

        let mut renamed = gate.clone();
        renamed.name = "دروازه".to_string();
        assert!(!slot.needs_swap(&renamed));

        assert!(slot.needs_swap(&artifact(2, Some("3dmodels/gate_opt.glb"))));
    }

    #[test]
    fn fit_centres_and_scales_to_radius() {
        let fitted = fit_transform(Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 2.0, 2.0)).unwrap();
        let scale = fitted.scale.x;
        let half_diagonal = Vec3::splat(2.0).length() * 0.5;
        assert!((scale * half_diagonal - MODEL_FIT_RADIUS).abs() < 1e-5);

        let centre = fitted.transform_point(Vec3::new(3.0, 1.0, 1.0));
        assert!(centre.length() < 1e-5);
    }

    #[test]
    fn degenerate_bounds_are_not_fitted() {
        assert!(fit_transform(Vec3::ONE, Vec3::ONE).is_none());
        assert!(fit_transform(Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)).is_none());
    }

    #[test]
    fn slot_tracks_selection_and_supersedes() {
        use crate::engine::catalog::{CatalogSeed, LocalizedCatalogs, SeedRecord};

        let seed = CatalogSeed {
            en: vec![
                SeedRecord {
                    name: "Pending".to_string(),
                    ..Default::default()
                },
                SeedRecord {
                    name: "Column".to_string(),
                    model: Some("3dmodels/column.fbx".to_string()),
                    ..Default::default()
                },
            ],
            fa: Vec::new(),
        };
        let controller =
            ViewStateController::new(LocalizedCatalogs::from_seed(&seed).unwrap().catalogs);

        let mut app = App::new();
        app.add_plugins((MinimalPlugins, AssetPlugin::default()))
            .init_asset::<Scene>()
            .init_resource::<ModelSlot>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(controller)
            .add_systems(Update, sync_model_slot);
        app.world_mut().spawn((Turntable::default(), Transform::default()));

        app.update();
        assert_eq!(
            app.world().resource::<ModelSlot>().state(),
            ModelLoadState::Placeholder
        );

        app.world_mut()
            .resource_mut::<ViewStateController>()
            .next();
        app.update();
        assert_eq!(
            app.world().resource::<ModelSlot>().state(),
            ModelLoadState::Unsupported
        );

        let sent = app
            .world()
            .resource::<WebRpcInterface>()
            .pending_notifications()
            .iter()
            .filter(|n| n.method == "model_load_state")
            .count();
        assert_eq!(sent, 2);
    }

    mod loading {
        use super::*;
        use crate::engine::catalog::{CatalogSeed, LocalizedCatalogs, SeedRecord};
        use bevy::asset::AssetMetaCheck;
        use bevy::asset::io::memory::{Dir, MemoryAssetReader};
        use bevy::asset::io::{AssetSource, AssetSourceId};
        use bevy::gltf::GltfPlugin;
        use bevy::render::mesh::MeshPlugin;
        use bevy::scene::ScenePlugin;
        use std::path::Path;
        use std::time::Duration;

        fn model_app(dir: Dir, model_path: &str) -> (App, Entity) {
            let seed = CatalogSeed {
                en: vec![SeedRecord {
                    name: "Pot".to_string(),
                    model: Some(model_path.to_string()),
                    ..Default::default()
                }],
                fa: Vec::new(),
            };
            let controller =
                ViewStateController::new(LocalizedCatalogs::from_seed(&seed).unwrap().catalogs);

            let reader = MemoryAssetReader { root: dir };
            let mut app = App::new();
            app.register_asset_source(
                AssetSourceId::Default,
                AssetSource::build().with_reader(move || Box::new(reader.clone())),
            )
            .add_plugins((
                MinimalPlugins,
                AssetPlugin {
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                },
                ScenePlugin,
                MeshPlugin,
                GltfPlugin::default(),
            ))
            .init_resource::<ModelSlot>()
            .init_resource::<WebRpcInterface>()
            .insert_resource(controller)
            .add_systems(Update, (sync_model_slot, watch_model_load).chain());
            app.finish();
            app.cleanup();

            let turntable = app
                .world_mut()
                .spawn((Turntable::default(), Transform::default(), Visibility::default()))
                .id();
            let placeholder = app
                .world_mut()
                .spawn((PlaceholderExhibit, Transform::default(), Visibility::Inherited))
                .id();
            app.world_mut().entity_mut(turntable).add_child(placeholder);
            (app, placeholder)
        }

        fn run_until_settled(app: &mut App) {
            for _ in 0..1000 {
                app.update();
                if app.world().resource::<ModelSlot>().state() != ModelLoadState::Loading {
                    return;
                }
                std::thread::sleep(Duration::from_millis(2));
            }
        }

        fn reported_states(app: &App) -> Vec<String> {
            app.world()
                .resource::<WebRpcInterface>()
                .pending_notifications()
                .iter()
                .filter(|n| n.method == "model_load_state")
                .filter_map(|n| n.params["state"].as_str().map(str::to_string))
                .collect()
        }

        #[test]
        fn missing_or_corrupt_files_fail_once_and_keep_placeholder() {
            for path in ["3dmodels/missing.glb", "3dmodels/broken.glb"] {
                let dir = Dir::default();
                dir.insert_asset(Path::new("3dmodels/broken.glb"), b"not a gltf file".to_vec());
                let (mut app, placeholder) = model_app(dir, path);

                app.update();
                let slot = app.world().resource::<ModelSlot>();
                assert_eq!(slot.state(), ModelLoadState::Loading, "{path}");
                let model = slot.entity.unwrap();

                run_until_settled(&mut app);
                assert_eq!(
                    app.world().resource::<ModelSlot>().state(),
                    ModelLoadState::Failed,
                    "{path}"
                );

                for _ in 0..10 {
                    app.update();
                }
                assert_eq!(
                    app.world().resource::<ModelSlot>().state(),
                    ModelLoadState::Failed
                );
                assert!(app.world().get_entity(model).is_err(), "{path}");
                assert_eq!(
                    app.world().get::<Visibility>(placeholder),
                    Some(&Visibility::Inherited)
                );
                assert_eq!(reported_states(&app), vec!["loading", "failed"], "{path}");
            }
        }
    }
}
