use crate::engine::catalog::{Language, LayoutDirection};
use crate::engine::view_state::{CameraMode, ViewMode, ViewStateController};
use serde::Serialize;

/// Description card contents for the active artifact.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptionCard {
    pub id: String,
    pub label: String,
    pub name: String,
    pub description: String,
    pub restoration_pending: bool,
    pub visible: bool,
}

/// One cell of the archive grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArchiveTile {
    pub index_label: String,
    pub id: String,
    pub name: String,
    pub description: String,
    pub restoration_pending: bool,
    pub active: bool,
}

/// Everything the host page needs to render the dock, card and grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlaySnapshot {
    pub counter: String,
    pub total: usize,
    pub card: Option<DescriptionCard>,
    pub view_mode: ViewMode,
    pub camera_mode: CameraMode,
    pub language: Language,
    pub direction: LayoutDirection,
    pub article_open: bool,
    pub archive_open: bool,
    pub tiles: Vec<ArchiveTile>,
}

impl OverlaySnapshot {
    pub fn from_controller(controller: &ViewStateController) -> Self {
        let state = controller.state();
        let catalog = controller.catalog();
        let active_index = controller.active_index();

        let card = controller.active_artifact().map(|artifact| DescriptionCard {
            id: artifact.id.to_string(),
            label: format!("{:02}", active_index + 1),
            name: artifact.name.clone(),
            description: artifact.description.clone(),
            restoration_pending: artifact.is_restoration_pending(),
            visible: state.description_visible && state.view_mode.shows_description_card(),
        });

        let tiles = catalog
            .iter()
            .enumerate()
            .map(|(index, artifact)| ArchiveTile {
                index_label: format!("{:02}", index + 1),
                id: artifact.id.to_string(),
                name: artifact.name.clone(),
                description: artifact.description.clone(),
                restoration_pending: artifact.is_restoration_pending(),
                active: index == active_index,
            })
            .collect();

        Self {
            counter: format!("{:02} / {:02}", active_index + 1, catalog.len()),
            total: catalog.len(),
            card,
            view_mode: state.view_mode,
            camera_mode: state.camera_mode,
            language: state.language,
            direction: controller.layout_direction(),
            article_open: state.view_mode == ViewMode::Article,
            archive_open: state.view_mode == ViewMode::Archive,
            tiles,
        }
    }
}
