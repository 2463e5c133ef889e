/// Seed file holding the per-language artifact lists, relative to the asset root.
pub const CATALOG_SEED_PATH: &str = "catalog/museum.catalog.json";

/// Extension registered with the JSON asset loader for catalog seeds.
pub const CATALOG_SEED_EXTENSION: &str = "catalog.json";

/// Artifact ids are derived from catalog position: `artifact-0`, `artifact-1`, ...
pub const ARTIFACT_ID_PREFIX: &str = "artifact-";
