use bevy::prelude::*;

/// Startup bookkeeping consulted by the state transitions.
#[derive(Resource, Default, Debug)]
pub struct LoadingProgress {
    pub catalog_installed: bool,
    /// Recovered catalog problems, reported to the host once loading completes.
    pub catalog_issues: Vec<String>,
}
