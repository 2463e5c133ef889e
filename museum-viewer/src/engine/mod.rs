pub mod camera;
pub mod catalog;
pub mod core;
pub mod loading;
pub mod scene;
pub mod view_state;
