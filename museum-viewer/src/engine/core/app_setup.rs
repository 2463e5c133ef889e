use bevy::asset::AssetMetaCheck;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use constants::catalog::CATALOG_SEED_EXTENSION;

use crate::curator::CuratorPlugin;
use crate::engine::camera::showcase_camera::{showcase_camera_controller, spawn_showcase_camera};
use crate::engine::catalog::CatalogSeed;
use crate::engine::core::app_state::{AppState, transition_to_running};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::catalog_loader::{
    CatalogLoader, install_catalog_when_ready, start_loading,
};
use crate::engine::loading::model_loader::{
    ModelSlot, fit_loaded_models, sync_model_slot, watch_model_load,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::dust::drift_dust;
use crate::engine::scene::stage::setup_showcase_stage;
use crate::engine::scene::turntable::{drive_turntable, float_mount};
use crate::overlay::intent::{OverlayIntentEvent, apply_overlay_intents};
use crate::rpc::web_rpc::{WebRpcPlugin, broadcast_view_state, handle_rpc_messages};

#[cfg(not(target_arch = "wasm32"))]
use crate::overlay::native::{
    create_native_overlays, handle_overlay_keyboard_shortcuts, native_article_scroll,
    update_native_overlays,
};

const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=warn,museum_viewer=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        // Registers the catalog seed as a loadable asset type.
        .add_plugins(JsonAssetPlugin::<CatalogSeed>::new(&[CATALOG_SEED_EXTENSION]))
        .add_plugins(WebRpcPlugin)
        .add_plugins(CuratorPlugin);

    app.init_resource::<LoadingProgress>()
        .init_resource::<CatalogLoader>()
        .init_resource::<ModelSlot>()
        .add_event::<OverlayIntentEvent>();

    app.add_systems(
        Startup,
        (setup_showcase_stage, spawn_showcase_camera, start_loading),
    )
    .add_systems(
        Update,
        (install_catalog_when_ready, transition_to_running)
            .chain()
            .run_if(in_state(AppState::Loading)),
    );

    // Controller writers run before the readers; broadcasting sees every
    // change made this frame.
    app.add_systems(
        Update,
        apply_overlay_intents
            .after(handle_rpc_messages)
            .before(broadcast_view_state),
    );

    let viewport_systems = (
        sync_model_slot,
        watch_model_load,
        fit_loaded_models,
        drive_turntable,
        float_mount,
        drift_dust,
        showcase_camera_controller,
    );

    app.add_systems(
        Update,
        viewport_systems
            .after(apply_overlay_intents)
            .run_if(in_state(AppState::Running)),
    );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, create_native_overlays).add_systems(
            Update,
            (
                (handle_overlay_keyboard_shortcuts, native_article_scroll)
                    .before(apply_overlay_intents),
                update_native_overlays.after(apply_overlay_intents),
            )
                .run_if(in_state(AppState::Running)),
        );
    }

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
