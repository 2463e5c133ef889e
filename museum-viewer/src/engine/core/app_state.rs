use crate::engine::loading::progress::LoadingProgress;
use crate::engine::view_state::ViewStateController;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Enter `Running` once the controller exists, and tell the host page.
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    controller: Option<Res<ViewStateController>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.catalog_installed {
        return;
    }
    let Some(controller) = controller else {
        return;
    };

    info!("→ Catalog installed, transitioning to Running state");
    rpc_interface.send_notification(
        "loading_complete",
        serde_json::json!({
            "artifacts": controller.catalog().len(),
            "issues": loading_progress.catalog_issues,
        }),
    );
    next_state.set(AppState::Running);
}
