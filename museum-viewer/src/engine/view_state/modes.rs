use serde::{Deserialize, Serialize};

/// Whether the turntable follows the article scroll or the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CameraMode {
    #[default]
    Cinematic,
    Orbit,
}

impl CameraMode {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cinematic" => Some(Self::Cinematic),
            "orbit" => Some(Self::Orbit),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::Cinematic => Self::Orbit,
            Self::Orbit => Self::Cinematic,
        }
    }
}

/// Top-level page mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViewMode {
    /// Long-form reading with the viewport beside the article.
    #[default]
    Article,
    /// Full-screen showcase of the active artifact.
    Cinema,
    /// Grid of every artifact in the catalog.
    Archive,
}

impl ViewMode {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "article" => Some(Self::Article),
            "cinema" => Some(Self::Cinema),
            "archive" => Some(Self::Archive),
            _ => None,
        }
    }

    /// Modes in which the description card may be shown.
    pub fn shows_description_card(self) -> bool {
        matches!(self, Self::Article | Self::Cinema)
    }
}

/// Camera mode implied by entering `view_mode`.
///
/// Applied once, at the view-mode transition. A later explicit camera choice
/// stands until the next transition.
pub fn derive_camera_mode(view_mode: ViewMode, previous: CameraMode) -> CameraMode {
    match view_mode {
        ViewMode::Cinema => CameraMode::Orbit,
        ViewMode::Article => CameraMode::Cinematic,
        ViewMode::Archive => previous,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cinema_forces_orbit_and_article_forces_cinematic() {
        for previous in [CameraMode::Cinematic, CameraMode::Orbit] {
            assert_eq!(derive_camera_mode(ViewMode::Cinema, previous), CameraMode::Orbit);
            assert_eq!(
                derive_camera_mode(ViewMode::Article, previous),
                CameraMode::Cinematic
            );
        }
    }

    #[test]
    fn archive_keeps_previous_camera() {
        assert_eq!(
            derive_camera_mode(ViewMode::Archive, CameraMode::Orbit),
            CameraMode::Orbit
        );
        assert_eq!(
            derive_camera_mode(ViewMode::Archive, CameraMode::Cinematic),
            CameraMode::Cinematic
        );
    }

    #[test]
    fn modes_parse_case_insensitively() {
        assert_eq!(ViewMode::from_string("CINEMA"), Some(ViewMode::Cinema));
        assert_eq!(CameraMode::from_string("Orbit"), Some(CameraMode::Orbit));
        assert_eq!(ViewMode::from_string("gallery"), None);
    }

    #[test]
    fn wire_names_match_host_enums() {
        assert_eq!(
            serde_json::to_value(CameraMode::Cinematic).unwrap(),
            serde_json::json!("CINEMATIC")
        );
        assert_eq!(
            serde_json::to_value(ViewMode::Archive).unwrap(),
            serde_json::json!("ARCHIVE")
        );
    }
}
