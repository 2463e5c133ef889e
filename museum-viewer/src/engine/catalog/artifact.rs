use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable, language-invariant artifact identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    /// Id for the artifact at `index` in catalog order.
    pub fn from_index(index: usize) -> Self {
        Self(format!("{}{}", constants::catalog::ARTIFACT_ID_PREFIX, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ArtifactId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ArtifactId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ArtifactId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Loader family used for a model asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Binary or text glTF, the default interchange format.
    #[default]
    Gltf,
    Fbx,
    Obj,
}

impl ModelFormat {
    /// Infer the format from a file extension. Unknown or missing extensions
    /// resolve to glTF.
    pub fn from_path(path: &str) -> Self {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        let Some((_, extension)) = file_name.rsplit_once('.') else {
            return Self::default();
        };

        match extension.to_ascii_lowercase().as_str() {
            "fbx" => Self::Fbx,
            "obj" => Self::Obj,
            _ => Self::Gltf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gltf => "gltf",
            Self::Fbx => "fbx",
            Self::Obj => "obj",
        }
    }
}

/// Locator of a model asset plus the loader family chosen at catalog build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRef {
    pub path: String,
    pub format: ModelFormat,
}

impl ModelRef {
    /// Build a reference, sniffing the format only when none was declared.
    pub fn new(path: impl Into<String>, declared: Option<ModelFormat>) -> Self {
        let path = path.into();
        let format = declared.unwrap_or_else(|| ModelFormat::from_path(&path));
        Self { path, format }
    }

    /// Last path segment, used as the curator's file name hint.
    pub fn file_name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Page language. Farsi switches the overlay to right-to-left layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fa,
}

impl Language {
    pub fn from_string(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Some(Self::En),
            "fa" | "farsi" | "persian" => Some(Self::Fa),
            _ => None,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::En => Self::Fa,
            Self::Fa => Self::En,
        }
    }

    pub fn direction(self) -> LayoutDirection {
        match self {
            Self::En => LayoutDirection::Ltr,
            Self::Fa => LayoutDirection::Rtl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutDirection {
    Ltr,
    Rtl,
}

/// One exhibit. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
    pub id: ArtifactId,
    pub name: String,
    /// `None` renders the placeholder and flags the restoration as pending.
    pub model: Option<ModelRef>,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
}

impl Artifact {
    pub fn file_name(&self) -> Option<&str> {
        self.model.as_ref().map(ModelRef::file_name)
    }

    pub fn is_restoration_pending(&self) -> bool {
        self.model.is_none()
    }
}
