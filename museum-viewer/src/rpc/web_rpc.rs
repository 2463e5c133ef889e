use crate::curator::{CuratorRequest, ask_query, describe_query};
use crate::curator::prompt::CuratorQuery;
use crate::engine::catalog::Language;
use crate::engine::view_state::{CameraMode, ViewMode, ViewStateController};
use crate::overlay::intent::{NavButton, OverlayIntent, apply_intent, nav_intent};
use crate::overlay::snapshot::OverlaySnapshot;
use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;
const INTERNAL_ERROR: i32 = -32603;

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Outgoing traffic to the host page, flushed once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    #[cfg(test)]
    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }

    #[cfg(test)]
    pub fn pending_responses(&self) -> &[RpcResponse] {
        &self.outgoing_responses
    }
}

/// Plugin establishing the postMessage bridge to the host page.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    broadcast_view_state,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) = window
                .add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("Window object not available"),
    }

    // Ownership passes to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw message text received from the host page.
#[derive(Event)]
pub struct IncomingRpcMessage {
    pub content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Parse and dispatch host messages. State changes made here are published by
/// [`broadcast_view_state`] in the same frame.
pub fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut controller: Option<ResMut<ViewStateController>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut curator_requests: EventWriter<CuratorRequest>,
) {
    let mut curator_jobs = Vec::new();

    for event in events.read() {
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Discarding malformed RPC message: {}", parse_error);
                rpc_interface.queue_response(create_error_response(
                    None,
                    INVALID_REQUEST,
                    "Invalid request",
                    Some(serde_json::json!({"reason": parse_error.to_string()})),
                ));
                continue;
            }
        };

        let Some(controller) = controller.as_mut() else {
            if let Some(id) = request.id {
                rpc_interface.queue_response(create_error_response(
                    Some(id),
                    INTERNAL_ERROR,
                    "Catalog is still loading",
                    None,
                ));
            }
            continue;
        };

        let before = controller.state().clone();
        let response =
            handle_rpc_request(&request, controller.bypass_change_detection(), &mut curator_jobs);
        if controller.state() != &before {
            controller.set_changed();
        }

        if let Some(response) = response {
            rpc_interface.queue_response(response);
        }
    }

    curator_requests.write_batch(curator_jobs);
}

/// Run one request against the controller. Requests without an id are
/// executed as notifications and produce no response.
fn handle_rpc_request(
    request: &RpcRequest,
    controller: &mut ViewStateController,
    curator_jobs: &mut Vec<CuratorRequest>,
) -> Option<RpcResponse> {
    let result = if request.jsonrpc != "2.0" {
        Err(RpcError {
            code: INVALID_REQUEST,
            message: "Invalid request".to_string(),
            data: Some(serde_json::json!({"jsonrpc": request.jsonrpc})),
        })
    } else {
        dispatch_method(request, controller, curator_jobs)
    };

    if let Err(error) = &result {
        debug!("RPC {} rejected: {}", request.method, error.message);
    }

    let id = request.id.clone()?;
    Some(match result {
        Ok(result_value) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        },
        Err(error) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: None,
            error: Some(error),
            id: Some(id),
        },
    })
}

fn dispatch_method(
    request: &RpcRequest,
    controller: &mut ViewStateController,
    curator_jobs: &mut Vec<CuratorRequest>,
) -> Result<serde_json::Value, RpcError> {
    let params = &request.params;

    let intent = match request.method.as_str() {
        "get_view_state" => return to_json(&controller.snapshot()),
        "get_overlay" => return to_json(&OverlaySnapshot::from_controller(controller)),
        "get_catalog" => return handle_get_catalog(controller),
        "curator_describe" => {
            let query = parse_describe(params, controller);
            return queue_curator(request, query, curator_jobs);
        }
        "curator_ask" => {
            let query = parse_ask(params, controller)?;
            return queue_curator(request, query, curator_jobs);
        }
        "select_artifact" => OverlayIntent::SelectArtifact(parse_id(params)?),
        "select_tile" => OverlayIntent::SelectTile(parse_id(params)?),
        "next_artifact" => OverlayIntent::Next,
        "prev_artifact" => OverlayIntent::Prev,
        "nav_button" => {
            let button = parse_string_param(params, "button")?;
            let button = NavButton::from_string(&button).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown nav button: {}", button))
            })?;
            nav_intent(button, controller.layout_direction())
        }
        "set_view_mode" => {
            let mode = parse_string_param(params, "mode")?;
            OverlayIntent::SetViewMode(ViewMode::from_string(&mode).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown view mode: {}", mode))
            })?)
        }
        "toggle_research" => OverlayIntent::ToggleResearch,
        "close_article" => OverlayIntent::CloseArticle,
        "set_camera_mode" => {
            let mode = parse_string_param(params, "mode")?;
            OverlayIntent::SetCameraMode(CameraMode::from_string(&mode).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown camera mode: {}", mode))
            })?)
        }
        "toggle_camera_mode" => OverlayIntent::ToggleCamera,
        "toggle_description" => OverlayIntent::ToggleDescription,
        "update_scroll" => {
            #[derive(Deserialize)]
            struct ScrollParams {
                scroll_top: f32,
                scroll_height: f32,
                client_height: f32,
            }
            let scroll: ScrollParams = parse_params(
                params,
                "Expected 'scroll_top', 'scroll_height' and 'client_height'",
            )?;
            OverlayIntent::Scroll {
                scroll_top: scroll.scroll_top,
                scroll_height: scroll.scroll_height,
                client_height: scroll.client_height,
            }
        }
        "set_language" => {
            let language = parse_string_param(params, "language")?;
            OverlayIntent::SetLanguage(Language::from_string(&language).ok_or_else(|| {
                RpcError::invalid_params(&format!("Unknown language: {}", language))
            })?)
        }
        "toggle_language" => OverlayIntent::ToggleLanguage,
        "open_anchor" => OverlayIntent::OpenAnchor(parse_string_param(params, "key")?),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Err(RpcError {
                code: METHOD_NOT_FOUND,
                message: "Method not found".to_string(),
                data: Some(serde_json::json!({"method": request.method})),
            });
        }
    };

    let applied = apply_intent(controller, &intent);
    Ok(serde_json::json!({
        "applied": applied,
        "state": to_json(&controller.snapshot())?,
        "overlay": to_json(&OverlaySnapshot::from_controller(controller))?,
    }))
}

fn handle_get_catalog(controller: &ViewStateController) -> Result<serde_json::Value, RpcError> {
    let artifacts: Vec<_> = controller.catalog().iter().collect();
    let anchors: serde_json::Map<String, serde_json::Value> = controller
        .catalogs()
        .anchor_keys()
        .filter_map(|key| {
            let id = controller.catalogs().anchor(key)?;
            Some((key.to_string(), serde_json::Value::String(id.to_string())))
        })
        .collect();

    Ok(serde_json::json!({
        "language": controller.state().language,
        "direction": controller.layout_direction(),
        "artifacts": to_json(&artifacts)?,
        "anchors": anchors,
    }))
}

fn queue_curator(
    request: &RpcRequest,
    query: CuratorQuery,
    curator_jobs: &mut Vec<CuratorRequest>,
) -> Result<serde_json::Value, RpcError> {
    let kind = query.kind();
    curator_jobs.push(CuratorRequest {
        request_id: request.id.clone(),
        query,
    });
    Ok(serde_json::json!({"queued": true, "kind": kind}))
}

/// `file_name` is optional and defaults to the active artifact.
fn parse_describe(params: &serde_json::Value, controller: &ViewStateController) -> CuratorQuery {
    match params.get("file_name").and_then(serde_json::Value::as_str) {
        Some(file_name) => CuratorQuery::Describe {
            file_name: file_name.to_string(),
        },
        None => match controller.active_artifact() {
            Some(artifact) => describe_query(artifact),
            None => CuratorQuery::Describe {
                file_name: String::new(),
            },
        },
    }
}

/// `context` is optional and defaults to the active artifact description.
fn parse_ask(
    params: &serde_json::Value,
    controller: &ViewStateController,
) -> Result<CuratorQuery, RpcError> {
    let question = parse_string_param(params, "question")?;
    Ok(
        match params.get("context").and_then(serde_json::Value::as_str) {
            Some(context) => CuratorQuery::Ask {
                question,
                context: context.to_string(),
            },
            None => ask_query(controller.active_artifact(), &question),
        },
    )
}

fn parse_id(params: &serde_json::Value) -> Result<String, RpcError> {
    parse_string_param(params, "id")
}

fn parse_string_param(params: &serde_json::Value, name: &str) -> Result<String, RpcError> {
    params
        .get(name)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| RpcError::invalid_params(&format!("Expected '{}' parameter", name)))
}

fn parse_params<T: DeserializeOwned>(
    params: &serde_json::Value,
    expected: &str,
) -> Result<T, RpcError> {
    serde_json::from_value(params.clone()).map_err(|_| RpcError::invalid_params(expected))
}

fn to_json<T: Serialize>(value: &T) -> Result<serde_json::Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(&e.to_string()))
}

fn create_error_response(
    id: Option<serde_json::Value>,
    code: i32,
    message: &str,
    data: Option<serde_json::Value>,
) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(RpcError {
            code,
            message: message.to_string(),
            data,
        }),
        id,
    }
}

/// Publish the controller state whenever it changed this frame, including the
/// first frame after the catalog is installed.
pub fn broadcast_view_state(
    controller: Option<Res<ViewStateController>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(controller) = controller else {
        return;
    };
    if !controller.is_changed() {
        return;
    }

    let payload = to_json(&controller.snapshot()).and_then(|state| {
        Ok(serde_json::json!({
            "state": state,
            "overlay": to_json(&OverlaySnapshot::from_controller(&controller))?,
        }))
    });

    match payload {
        Ok(params) => rpc_interface.send_notification("view_state_changed", params),
        Err(e) => error!("Failed to serialise view state: {}", e.message),
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

impl RpcError {
    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: INTERNAL_ERROR,
            message: message.to_string(),
            data: None,
        }
    }
}
