use crate::engine::catalog::artifact::{Artifact, ArtifactId, Language, ModelRef};
use crate::engine::catalog::seed::{CatalogError, CatalogSeed, SeedRecord};
use std::collections::HashMap;

/// Ordered, immutable artifact list for one language.
#[derive(Debug, Clone, Default)]
pub struct ArtifactCatalog {
    artifacts: Vec<Artifact>,
    positions: HashMap<ArtifactId, usize>,
}

impl ArtifactCatalog {
    pub fn new(artifacts: Vec<Artifact>) -> Self {
        let positions = artifacts
            .iter()
            .enumerate()
            .map(|(index, artifact)| (artifact.id.clone(), index))
            .collect();
        Self {
            artifacts,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Artifact> {
        self.artifacts.get(index)
    }

    pub fn first(&self) -> Option<&Artifact> {
        self.artifacts.first()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Artifact> {
        self.position(id).and_then(|index| self.artifacts.get(index))
    }
}

/// The English catalog, its positional Farsi twin, and the narrative anchor map.
#[derive(Debug, Clone, Default)]
pub struct LocalizedCatalogs {
    en: ArtifactCatalog,
    fa: ArtifactCatalog,
    anchors: HashMap<String, ArtifactId>,
}

/// Catalogs built from a seed together with the recoverable issues found.
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalogs: LocalizedCatalogs,
    pub issues: Vec<CatalogError>,
}

impl LocalizedCatalogs {
    /// Build both language catalogs. Only an empty English list is fatal;
    /// misaligned Farsi rows fall back to English text and duplicate anchors
    /// keep their first binding.
    pub fn from_seed(seed: &CatalogSeed) -> Result<CatalogBuild, CatalogError> {
        if seed.en.is_empty() {
            return Err(CatalogError::EmptySeed);
        }

        let mut issues = Vec::new();

        if seed.fa.len() != seed.en.len() {
            issues.push(CatalogError::Misaligned {
                language: Language::Fa,
                primary: seed.en.len(),
                localized: seed.fa.len(),
            });
        }

        let en: Vec<Artifact> = seed
            .en
            .iter()
            .enumerate()
            .map(|(index, record)| build_artifact(index, record, record))
            .collect();

        let fa: Vec<Artifact> = seed
            .en
            .iter()
            .enumerate()
            .map(|(index, primary)| {
                let localized = seed.fa.get(index).unwrap_or(primary);
                build_artifact(index, primary, localized)
            })
            .collect();

        let mut anchors: HashMap<String, ArtifactId> = HashMap::new();
        for (index, record) in seed.en.iter().enumerate() {
            let Some(anchor) = record.anchor.as_deref().map(normalize_anchor) else {
                continue;
            };
            let id = ArtifactId::from_index(index);
            match anchors.get(&anchor) {
                Some(first) => issues.push(CatalogError::DuplicateAnchor {
                    anchor,
                    first: first.to_string(),
                    duplicate: id.to_string(),
                }),
                None => {
                    anchors.insert(anchor, id);
                }
            }
        }

        Ok(CatalogBuild {
            catalogs: Self {
                en: ArtifactCatalog::new(en),
                fa: ArtifactCatalog::new(fa),
                anchors,
            },
            issues,
        })
    }

    /// Single placeholder exhibit used when no seed could be read.
    pub fn placeholder() -> Self {
        let seed = CatalogSeed {
            en: vec![SeedRecord {
                name: "Digital Restoration Pending".to_string(),
                description: "The archive catalogue is currently unavailable.".to_string(),
                ..Default::default()
            }],
            fa: vec![SeedRecord {
                name: "بازسازی دیجیتال در انتظار".to_string(),
                description: "فهرست آرشیو در حال حاضر در دسترس نیست.".to_string(),
                ..Default::default()
            }],
        };

        match Self::from_seed(&seed) {
            Ok(build) => build.catalogs,
            Err(_) => Self::default(),
        }
    }

    pub fn catalog(&self, language: Language) -> &ArtifactCatalog {
        match language {
            Language::En => &self.en,
            Language::Fa => &self.fa,
        }
    }

    /// Artifact bound to a narrative anchor key, if any.
    pub fn anchor(&self, key: &str) -> Option<&ArtifactId> {
        self.anchors.get(&normalize_anchor(key))
    }

    pub fn anchor_keys(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }
}

fn build_artifact(index: usize, primary: &SeedRecord, localized: &SeedRecord) -> Artifact {
    Artifact {
        id: ArtifactId::from_index(index),
        name: localized.name.clone(),
        model: primary
            .model
            .as_ref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| ModelRef::new(path.clone(), primary.format)),
        description: localized.description.clone(),
        chapter: primary.chapter.clone(),
    }
}

fn normalize_anchor(key: &str) -> String {
    key.trim().to_ascii_lowercase()
}
