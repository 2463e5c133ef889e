use crate::engine::catalog::{
    Artifact, ArtifactCatalog, ArtifactId, Language, LayoutDirection, LocalizedCatalogs,
};
use crate::engine::view_state::modes::{CameraMode, ViewMode, derive_camera_mode};
use crate::engine::view_state::scroll::scroll_progress;
use bevy::prelude::*;
use serde::Serialize;

/// Mutable session state. Only [`ViewStateController`] writes it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub active_artifact_id: ArtifactId,
    pub camera_mode: CameraMode,
    pub view_mode: ViewMode,
    pub description_visible: bool,
    pub scroll_progress: f32,
    pub language: Language,
}

/// Single owner of the session state and its transition rules.
///
/// Every UI intent is funnelled through these operations; the viewport and
/// the RPC broadcaster only read. All operations are total: unknown ids and
/// degenerate scroll measurements leave the last valid state in place.
#[derive(Resource, Debug, Clone)]
pub struct ViewStateController {
    catalogs: LocalizedCatalogs,
    state: ViewState,
}

impl ViewStateController {
    /// Start a session on the first artifact with default modes.
    pub fn new(catalogs: LocalizedCatalogs) -> Self {
        let catalogs = if catalogs.catalog(Language::En).is_empty() {
            warn!("Empty catalog supplied, using placeholder exhibit");
            LocalizedCatalogs::placeholder()
        } else {
            catalogs
        };

        let active_artifact_id = catalogs
            .catalog(Language::En)
            .first()
            .map(|artifact| artifact.id.clone())
            .unwrap_or_else(|| ArtifactId::from_index(0));

        Self {
            catalogs,
            state: ViewState {
                active_artifact_id,
                camera_mode: CameraMode::Cinematic,
                view_mode: ViewMode::Article,
                description_visible: true,
                scroll_progress: 0.0,
                language: Language::En,
            },
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Owned copy of the state for the host page.
    pub fn snapshot(&self) -> ViewState {
        self.state.clone()
    }

    /// Catalog in the current language.
    pub fn catalog(&self) -> &ArtifactCatalog {
        self.catalogs.catalog(self.state.language)
    }

    pub fn catalogs(&self) -> &LocalizedCatalogs {
        &self.catalogs
    }

    /// Position of the active artifact, falling back to the first entry.
    pub fn active_index(&self) -> usize {
        self.catalog()
            .position(self.state.active_artifact_id.as_str())
            .unwrap_or(0)
    }

    /// Active artifact, resolved against the current language catalog.
    pub fn active_artifact(&self) -> Option<&Artifact> {
        self.catalog()
            .find(self.state.active_artifact_id.as_str())
            .or_else(|| self.catalog().first())
    }

    pub fn layout_direction(&self) -> LayoutDirection {
        self.state.language.direction()
    }

    /// Make `id` active. Unknown ids are ignored and reported as `false`.
    pub fn select_artifact(&mut self, id: &str) -> bool {
        let Some(found) = self.catalog().find(id).map(|artifact| artifact.id.clone()) else {
            debug!("Ignoring selection of unknown artifact '{}'", id);
            return false;
        };

        self.state.active_artifact_id = found;
        true
    }

    /// Advance one position in catalog order, wrapping after the last artifact.
    pub fn next(&mut self) {
        self.step(1);
    }

    /// Retreat one position in catalog order, wrapping before the first artifact.
    pub fn prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, offset: isize) {
        let len = self.catalog().len();
        if len == 0 {
            return;
        }

        let index = self.active_index() as isize;
        let target = (index + offset).rem_euclid(len as isize) as usize;
        if let Some(id) = self.catalog().get(target).map(|artifact| artifact.id.clone()) {
            self.state.active_artifact_id = id;
        }
    }

    /// Explicit camera choice; always honoured.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.state.camera_mode = mode;
    }

    /// Switch page mode and apply the one-shot derived camera rule.
    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.view_mode = mode;
        self.state.camera_mode = derive_camera_mode(mode, self.state.camera_mode);
    }

    pub fn toggle_description_visible(&mut self) {
        self.state.description_visible = !self.state.description_visible;
    }

    /// Recompute scroll progress from raw container measurements. Returns
    /// `false` and keeps the previous value when there is no scrollable range.
    pub fn update_scroll_progress(
        &mut self,
        scroll_top: f32,
        scroll_height: f32,
        client_height: f32,
    ) -> bool {
        match scroll_progress(scroll_top, scroll_height, client_height) {
            Some(progress) => {
                self.state.scroll_progress = progress;
                true
            }
            None => false,
        }
    }

    /// Switch to the parallel catalog for `language`. Ids are shared between
    /// languages so the active artifact is kept.
    pub fn set_language(&mut self, language: Language) {
        self.state.language = language;

        if self.catalog().contains(self.state.active_artifact_id.as_str()) {
            return;
        }

        if let Some(first) = self.catalog().first().map(|artifact| artifact.id.clone()) {
            warn!(
                "Artifact '{}' missing from {:?} catalog, falling back to '{}'",
                self.state.active_artifact_id, language, first
            );
            self.state.active_artifact_id = first;
        }
    }

    /// Select the artifact bound to a narrative anchor key.
    pub fn open_anchor(&mut self, key: &str) -> bool {
        let Some(id) = self.catalogs.anchor(key).cloned() else {
            debug!("Ignoring unknown narrative anchor '{}'", key);
            return false;
        };
        self.select_artifact(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{CatalogSeed, SeedRecord};

    fn catalogs(count: usize) -> LocalizedCatalogs {
        let rows = |prefix: &str| -> Vec<SeedRecord> {
            (0..count)
                .map(|i| SeedRecord {
                    name: format!("{prefix} {i}"),
                    model: Some(format!("3dmodels/item_{i}.glb")),
                    description: format!("{prefix} description {i}"),
                    anchor: Some(format!("anchor-{i}")),
                    ..Default::default()
                })
                .collect()
        };
        let seed = CatalogSeed {
            en: rows("Item"),
            fa: rows("شیء"),
        };
        LocalizedCatalogs::from_seed(&seed).unwrap().catalogs
    }

    fn controller() -> ViewStateController {
        ViewStateController::new(catalogs(20))
    }

    #[test]
    fn defaults() {
        let c = controller();
        let state = c.state();
        assert_eq!(state.active_artifact_id, "artifact-0");
        assert_eq!(state.camera_mode, CameraMode::Cinematic);
        assert_eq!(state.view_mode, ViewMode::Article);
        assert!(state.description_visible);
        assert_eq!(state.scroll_progress, 0.0);
        assert_eq!(state.language, Language::En);
    }

    #[test]
    fn select_every_known_id() {
        let mut c = controller();
        let ids: Vec<String> = c.catalog().iter().map(|a| a.id.to_string()).collect();
        for id in ids {
            assert!(c.select_artifact(&id));
            assert_eq!(c.state().active_artifact_id, id.as_str());
        }
    }

    #[test]
    fn unknown_id_keeps_last_valid_selection() {
        let mut c = controller();
        c.select_artifact("artifact-7");
        c.set_view_mode(ViewMode::Archive);

        assert!(!c.select_artifact("artifact-99"));
        assert!(!c.select_artifact(""));
        assert_eq!(c.state().active_artifact_id, "artifact-7");
        assert_eq!(c.state().view_mode, ViewMode::Archive);
    }

    #[test]
    fn selection_does_not_touch_view_mode() {
        let mut c = controller();
        c.set_view_mode(ViewMode::Cinema);
        c.select_artifact("artifact-4");
        assert_eq!(c.state().view_mode, ViewMode::Cinema);
    }

    #[test]
    fn prev_from_first_wraps_to_last() {
        let mut c = controller();
        c.prev();
        assert_eq!(c.state().active_artifact_id, "artifact-19");
    }

    #[test]
    fn next_catalog_length_times_is_identity() {
        let mut c = controller();
        c.select_artifact("artifact-5");
        for _ in 0..20 {
            c.next();
        }
        assert_eq!(c.state().active_artifact_id, "artifact-5");
    }

    #[test]
    fn next_and_prev_are_inverse() {
        let mut c = controller();
        for start in ["artifact-0", "artifact-10", "artifact-19"] {
            c.select_artifact(start);
            c.next();
            c.prev();
            assert_eq!(c.state().active_artifact_id, start);
            c.prev();
            c.next();
            assert_eq!(c.state().active_artifact_id, start);
        }
    }

    #[test]
    fn single_item_catalog_navigation_stays_put() {
        let mut c = ViewStateController::new(catalogs(1));
        c.next();
        assert_eq!(c.state().active_artifact_id, "artifact-0");
        c.prev();
        assert_eq!(c.state().active_artifact_id, "artifact-0");
    }

    #[test]
    fn view_mode_derives_camera_once() {
        let mut c = controller();

        c.set_view_mode(ViewMode::Cinema);
        assert_eq!(c.state().camera_mode, CameraMode::Orbit);

        // An explicit choice overrides the derived one until the next transition.
        c.set_camera_mode(CameraMode::Cinematic);
        assert_eq!(c.state().camera_mode, CameraMode::Cinematic);

        c.set_view_mode(ViewMode::Archive);
        assert_eq!(c.state().camera_mode, CameraMode::Cinematic);

        c.set_camera_mode(CameraMode::Orbit);
        c.set_view_mode(ViewMode::Article);
        assert_eq!(c.state().camera_mode, CameraMode::Cinematic);
    }

    #[test]
    fn cinema_forces_orbit_from_any_camera() {
        for camera in [CameraMode::Cinematic, CameraMode::Orbit] {
            let mut c = controller();
            c.set_camera_mode(camera);
            c.set_view_mode(ViewMode::Cinema);
            assert_eq!(c.state().camera_mode, CameraMode::Orbit);
        }
    }

    #[test]
    fn description_toggle_twice_is_identity() {
        let mut c = controller();
        c.toggle_description_visible();
        assert!(!c.state().description_visible);
        c.toggle_description_visible();
        assert!(c.state().description_visible);
    }

    #[test]
    fn scroll_progress_scenario() {
        let mut c = controller();
        assert!(c.update_scroll_progress(50.0, 250.0, 50.0));
        assert_eq!(c.state().scroll_progress, 0.25);
    }

    #[test]
    fn scroll_progress_stays_in_unit_range() {
        let mut c = controller();
        let samples = [
            (-100.0, 500.0, 100.0),
            (0.0, 500.0, 100.0),
            (250.0, 500.0, 100.0),
            (1e9, 500.0, 100.0),
            (10.0, 50.0, 100.0),
            (f32::NAN, 500.0, 100.0),
        ];
        for (top, height, client) in samples {
            c.update_scroll_progress(top, height, client);
            let progress = c.state().scroll_progress;
            assert!((0.0..=1.0).contains(&progress), "{progress} out of range");
        }
    }

    #[test]
    fn unscrollable_container_leaves_progress_unchanged() {
        let mut c = controller();
        c.update_scroll_progress(300.0, 1100.0, 100.0);
        assert!(!c.update_scroll_progress(0.0, 640.0, 640.0));
        assert_eq!(c.state().scroll_progress, 0.3);
    }

    #[test]
    fn language_switch_keeps_active_id_and_localises_name() {
        let mut c = controller();
        c.select_artifact("artifact-3");
        let english = c.active_artifact().unwrap().name.clone();

        c.set_language(Language::Fa);
        let artifact = c.active_artifact().unwrap();
        assert_eq!(c.state().active_artifact_id, "artifact-3");
        assert_eq!(artifact.name, "شیء 3");
        assert_ne!(artifact.name, english);
        assert_eq!(c.active_index(), 3);
        assert_eq!(c.layout_direction(), LayoutDirection::Rtl);
    }

    #[test]
    fn anchors_select_without_changing_modes() {
        let mut c = controller();
        assert!(c.open_anchor("anchor-12"));
        assert_eq!(c.state().active_artifact_id, "artifact-12");
        assert!(!c.open_anchor("no-such-figure"));
        assert_eq!(c.state().active_artifact_id, "artifact-12");
        assert_eq!(c.state().view_mode, ViewMode::Article);
    }

    #[test]
    fn empty_catalog_is_replaced_by_placeholder() {
        let c = ViewStateController::new(LocalizedCatalogs::default());
        let artifact = c.active_artifact().unwrap();
        assert!(artifact.is_restoration_pending());
        assert_eq!(c.catalog().len(), 1);
    }
}
