//! JSON-RPC 2.0 bridge between the viewer and its host page.
//!
//! The viewer runs inside an iframe; the host page owns the article text,
//! dock and archive grid and talks to the viewer over `postMessage`.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Viewer (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Apply intent to controller
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! Requests without an ID are executed and produce no response, so the host
//! may fire intents as notifications.
//!
//! ## Methods
//!
//! ### Queries
//! - `get_view_state`: current session state
//! - `get_catalog`: artifacts in the current language plus anchor bindings
//! - `get_overlay`: counter, description card and archive tiles
//!
//! ### Intents
//! All intent methods reply `{ applied, state, overlay }`.
//! - `select_artifact { id }`, `next_artifact`, `prev_artifact`
//! - `nav_button { button: "left" | "right" }`: resolved against layout direction
//! - `set_view_mode { mode }`, `toggle_research`, `close_article`
//! - `select_tile { id }`: select, then return to the article
//! - `set_camera_mode { mode }`, `toggle_camera_mode`, `toggle_description`
//! - `update_scroll { scroll_top, scroll_height, client_height }`
//! - `set_language { language }`, `toggle_language`
//! - `open_anchor { key }`
//!
//! ### Curator
//! - `curator_describe { file_name? }`, `curator_ask { question, context? }`:
//!   reply `{ queued }` at once; the text follows as `curator_reply`.
//!
//! ## Notifications
//! - `view_state_changed { state, overlay }`: after any state change
//! - `model_load_state { id, path, format, state }`
//! - `curator_reply { request_id, kind, text, fallback }`
//! - `loading_complete { artifacts, issues }`
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Message queue, dispatch and outgoing notifications.
pub mod web_rpc;
