use bevy::prelude::*;
use bevy::window::PresentMode;

const WINDOW_TITLE: &str = "Bastam Digital Archive";

/// Canvas-bound window on the web, a plain window natively.
pub fn create_window_config() -> Window {
    #[cfg(target_arch = "wasm32")]
    {
        Window {
            title: WINDOW_TITLE.to_string(),
            canvas: Some("#bevy".into()),
            fit_canvas_to_parent: true,
            prevent_default_event_handling: false,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        Window {
            title: WINDOW_TITLE.to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}
