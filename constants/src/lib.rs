/// Catalog seed locations and artifact id conventions.
pub mod catalog;

/// Scene dressing: colours, fog, lights and decorative particles.
pub mod render_settings;

/// Showcase camera and turntable motion parameters.
pub mod showcase;
