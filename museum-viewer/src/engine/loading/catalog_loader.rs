use crate::engine::catalog::{CatalogError, CatalogSeed, LocalizedCatalogs};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::view_state::ViewStateController;
use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::catalog::CATALOG_SEED_PATH;

#[derive(Resource, Default)]
pub struct CatalogLoader {
    handle: Option<Handle<CatalogSeed>>,
}

pub fn start_loading(mut catalog_loader: ResMut<CatalogLoader>, asset_server: Res<AssetServer>) {
    info!("Loading catalog seed from {}", CATALOG_SEED_PATH);
    catalog_loader.handle = Some(asset_server.load(CATALOG_SEED_PATH));
}

/// Catalogs for a seed outcome. Never fails: an unusable seed yields the
/// placeholder catalog and the reason.
pub fn resolve_catalogs(
    seed: Result<&CatalogSeed, CatalogError>,
) -> (LocalizedCatalogs, Vec<CatalogError>) {
    match seed.and_then(LocalizedCatalogs::from_seed) {
        Ok(build) => (build.catalogs, build.issues),
        Err(error) => (LocalizedCatalogs::placeholder(), vec![error]),
    }
}

/// Install the controller once the seed has loaded or definitively failed.
pub fn install_catalog_when_ready(
    mut commands: Commands,
    catalog_loader: Res<CatalogLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    seeds: Res<Assets<CatalogSeed>>,
) {
    if loading_progress.catalog_installed {
        return;
    }
    let Some(handle) = catalog_loader.handle.as_ref() else {
        return;
    };

    let outcome = match seeds.get(handle) {
        Some(seed) => Ok(seed),
        None => match asset_server.get_load_state(handle) {
            Some(LoadState::Failed(err)) => Err(CatalogError::Unreadable(err.to_string())),
            _ => return,
        },
    };

    let (catalogs, issues) = resolve_catalogs(outcome);
    for issue in &issues {
        warn!("Catalog: {}", issue);
    }

    let controller = ViewStateController::new(catalogs);
    info!(
        "✓ Catalog ready: {} artifacts, {} anchors",
        controller.catalog().len(),
        controller.catalogs().anchor_keys().count()
    );

    commands.insert_resource(controller);
    loading_progress.catalog_issues = issues.iter().map(ToString::to_string).collect();
    loading_progress.catalog_installed = true;
}
