use crate::engine::catalog::artifact::{Language, ModelFormat};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One seed row as entered by the archive team.
/// Language-invariant fields (model, format, chapter, anchor) are read from the
/// English list; the localised lists only need name and description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedRecord {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chapter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ModelFormat>,
}

/// Catalog seed as a Bevy asset. Mirrors the JSON structure exactly: one
/// ordered list per language, aligned by position.
#[derive(Asset, Debug, Clone, Default, Serialize, Deserialize, TypePath)]
pub struct CatalogSeed {
    pub en: Vec<SeedRecord>,
    #[serde(default)]
    pub fa: Vec<SeedRecord>,
}

/// Problems found while turning seed data into catalogs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("catalog seed contains no English records")]
    EmptySeed,
    #[error("{language:?} list has {localized} records but the English list has {primary}")]
    Misaligned {
        language: Language,
        primary: usize,
        localized: usize,
    },
    #[error("anchor '{anchor}' is bound to both {first} and {duplicate}")]
    DuplicateAnchor {
        anchor: String,
        first: String,
        duplicate: String,
    },
    #[error("catalog seed could not be loaded: {0}")]
    Unreadable(String),
}
