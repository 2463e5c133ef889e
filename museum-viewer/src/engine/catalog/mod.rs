//! Artifact catalog built once from seed data.
//!
//! One immutable, ordered catalog per language. Ids are derived from catalog
//! position so they survive a language switch unchanged.

/// Artifact records, ids, model references and language tags.
pub mod artifact;

/// Per-language catalogs and the narrative anchor map.
pub mod collection;

/// JSON seed asset and catalog construction errors.
pub mod seed;

pub use artifact::{Artifact, ArtifactId, Language, LayoutDirection, ModelFormat, ModelRef};
pub use collection::{ArtifactCatalog, CatalogBuild, LocalizedCatalogs};
pub use seed::{CatalogError, CatalogSeed, SeedRecord};
