use crate::engine::catalog::{Language, LayoutDirection};
use crate::engine::view_state::{CameraMode, ViewMode, ViewStateController};
use bevy::prelude::*;

/// User action emitted by the overlay. Each maps to exactly one controller
/// operation, or a fixed pair for archive tiles.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayIntent {
    Next,
    Prev,
    SelectArtifact(String),
    /// Archive tile click: select, then return to the article.
    SelectTile(String),
    SetViewMode(ViewMode),
    /// Research dock button: Article <-> Cinema.
    ToggleResearch,
    /// Close button on the article sidebar.
    CloseArticle,
    ToggleDescription,
    SetCameraMode(CameraMode),
    ToggleCamera,
    SetLanguage(Language),
    ToggleLanguage,
    OpenAnchor(String),
    Scroll {
        scroll_top: f32,
        scroll_height: f32,
        client_height: f32,
    },
}

/// Dock navigation buttons by on-screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    VisualLeft,
    VisualRight,
}

impl NavButton {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "left" => Some(Self::VisualLeft),
            "right" => Some(Self::VisualRight),
            _ => None,
        }
    }
}

/// Resolve a visual nav button against the layout direction. Mirroring only
/// moves the buttons; catalog traversal direction is fixed.
pub fn nav_intent(button: NavButton, direction: LayoutDirection) -> OverlayIntent {
    match (button, direction) {
        (NavButton::VisualLeft, LayoutDirection::Ltr)
        | (NavButton::VisualRight, LayoutDirection::Rtl) => OverlayIntent::Prev,
        (NavButton::VisualRight, LayoutDirection::Ltr)
        | (NavButton::VisualLeft, LayoutDirection::Rtl) => OverlayIntent::Next,
    }
}

/// Apply an intent to the controller. Returns `false` when the controller
/// ignored it (unknown id or anchor, unscrollable container).
pub fn apply_intent(controller: &mut ViewStateController, intent: &OverlayIntent) -> bool {
    match intent {
        OverlayIntent::Next => controller.next(),
        OverlayIntent::Prev => controller.prev(),
        OverlayIntent::SelectArtifact(id) => return controller.select_artifact(id),
        OverlayIntent::SelectTile(id) => {
            // A stale tile only skips the selection; the page still returns
            // to the article.
            let selected = controller.select_artifact(id);
            controller.set_view_mode(ViewMode::Article);
            return selected;
        }
        OverlayIntent::SetViewMode(mode) => controller.set_view_mode(*mode),
        OverlayIntent::ToggleResearch => {
            let target = if controller.state().view_mode == ViewMode::Article {
                ViewMode::Cinema
            } else {
                ViewMode::Article
            };
            controller.set_view_mode(target);
        }
        OverlayIntent::CloseArticle => controller.set_view_mode(ViewMode::Cinema),
        OverlayIntent::ToggleDescription => controller.toggle_description_visible(),
        OverlayIntent::SetCameraMode(mode) => controller.set_camera_mode(*mode),
        OverlayIntent::ToggleCamera => {
            let target = controller.state().camera_mode.opposite();
            controller.set_camera_mode(target);
        }
        OverlayIntent::SetLanguage(language) => controller.set_language(*language),
        OverlayIntent::ToggleLanguage => {
            let target = controller.state().language.opposite();
            controller.set_language(target);
        }
        OverlayIntent::OpenAnchor(key) => return controller.open_anchor(key),
        OverlayIntent::Scroll {
            scroll_top,
            scroll_height,
            client_height,
        } => {
            return controller.update_scroll_progress(*scroll_top, *scroll_height, *client_height);
        }
    }
    true
}

/// Where an intent came from, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentSource {
    Keyboard,
    Wheel,
}

/// Event carrying an intent from native input systems to the controller.
#[derive(Event, Debug, Clone)]
pub struct OverlayIntentEvent {
    pub intent: OverlayIntent,
    pub source: IntentSource,
}

/// Drain queued intents into the controller in arrival order.
pub fn apply_overlay_intents(
    mut events: EventReader<OverlayIntentEvent>,
    controller: Option<ResMut<ViewStateController>>,
) {
    let Some(mut controller) = controller else {
        events.clear();
        return;
    };

    for event in events.read() {
        let before = controller.state().clone();
        let accepted = apply_intent(controller.bypass_change_detection(), &event.intent);

        if controller.state() != &before {
            controller.set_changed();
            debug!("{:?} intent {:?} applied", event.source, event.intent);
        } else if !accepted {
            debug!("{:?} intent {:?} ignored", event.source, event.intent);
        }
    }
}
