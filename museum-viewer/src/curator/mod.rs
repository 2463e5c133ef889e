//! Best-effort curator commentary for the active artifact.
//!
//! Requests arrive as [`CuratorRequest`] events (from the RPC bridge or the
//! native keyboard), run off the frame loop (one long-lived worker thread
//! natively, a local future on the web), and come back through
//! [`CuratorInbox`] as `curator_reply` notifications. Every failure is
//! replaced by a pre-authored line, so the host always gets text.

/// HTTP client and typed errors for the text-generation service.
pub mod client;

/// System instruction, prompt builders and fallback lines.
pub mod prompt;

use crate::engine::catalog::Artifact;
use crate::rpc::web_rpc::WebRpcInterface;
use bevy::prelude::*;
use client::{CuratorError, CuratorSettings, GenerativeClient};
use prompt::CuratorQuery;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Final text for one query, flagged when it is a fallback line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuratorAnswer {
    pub text: String,
    pub fallback: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct CuratorAssistant {
    client: GenerativeClient,
}

impl CuratorAssistant {
    pub fn new(settings: CuratorSettings) -> Self {
        Self {
            client: GenerativeClient::new(settings),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_configured()
    }

    fn resolve(query: &CuratorQuery, result: Result<String, CuratorError>) -> CuratorAnswer {
        match result {
            Ok(text) => CuratorAnswer {
                text,
                fallback: false,
            },
            Err(error) => {
                match error {
                    CuratorError::MissingCredential => {
                        debug!("Curator {} skipped: {}", query.kind(), error)
                    }
                    _ => warn!("Curator {} failed: {}", query.kind(), error),
                }
                CuratorAnswer {
                    text: query.fallback(&error).to_string(),
                    fallback: true,
                }
            }
        }
    }

    /// Blocking; call from a background thread.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn answer(&self, query: &CuratorQuery) -> CuratorAnswer {
        Self::resolve(query, self.client.generate(&query.prompt()))
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn answer(&self, query: &CuratorQuery) -> CuratorAnswer {
        Self::resolve(query, self.client.generate(&query.prompt()).await)
    }
}

/// Describe query for an artifact. Placeholder exhibits are described by
/// name since they have no file.
pub fn describe_query(artifact: &Artifact) -> CuratorQuery {
    CuratorQuery::Describe {
        file_name: artifact
            .file_name()
            .unwrap_or(artifact.name.as_str())
            .to_string(),
    }
}

pub fn ask_query(artifact: Option<&Artifact>, question: &str) -> CuratorQuery {
    CuratorQuery::Ask {
        question: question.to_string(),
        context: artifact
            .map(|artifact| artifact.description.clone())
            .unwrap_or_default(),
    }
}

#[derive(Event, Debug, Clone)]
pub struct CuratorRequest {
    /// JSON-RPC id of the originating call, echoed in the reply.
    pub request_id: Option<serde_json::Value>,
    pub query: CuratorQuery,
}

#[derive(Debug, Clone, Serialize)]
pub struct CuratorReply {
    pub request_id: Option<serde_json::Value>,
    pub kind: &'static str,
    pub text: String,
    pub fallback: bool,
}

impl CuratorReply {
    fn new(request: &CuratorRequest, answer: CuratorAnswer) -> Self {
        Self {
            request_id: request.request_id.clone(),
            kind: request.query.kind(),
            text: answer.text,
            fallback: answer.fallback,
        }
    }
}

/// Replies produced off the frame loop, drained once per frame.
#[derive(Resource, Default, Clone)]
pub struct CuratorInbox(Arc<Mutex<Vec<CuratorReply>>>);

impl CuratorInbox {
    fn push(&self, reply: CuratorReply) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(reply);
        }
    }

    fn drain(&self) -> Vec<CuratorReply> {
        self.0
            .lock()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

/// Requests waiting for the worker before new ones are refused.
#[cfg(not(target_arch = "wasm32"))]
const CURATOR_QUEUE_DEPTH: usize = 32;

/// Sender side of the single native curator thread. Requests are answered
/// one at a time, in submission order.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Resource, Clone)]
pub struct CuratorWorker {
    jobs: crossbeam_channel::Sender<CuratorRequest>,
}

#[cfg(not(target_arch = "wasm32"))]
impl CuratorWorker {
    pub fn spawn(assistant: CuratorAssistant, inbox: CuratorInbox) -> Option<Self> {
        let (jobs, queue) = crossbeam_channel::bounded::<CuratorRequest>(CURATOR_QUEUE_DEPTH);
        let spawned = std::thread::Builder::new()
            .name("curator".to_string())
            .spawn(move || {
                while let Ok(request) = queue.recv() {
                    let answer = assistant.answer(&request.query);
                    inbox.push(CuratorReply::new(&request, answer));
                }
                debug!("Curator worker stopped");
            });

        match spawned {
            Ok(_) => Some(Self { jobs }),
            Err(e) => {
                error!("Failed to start curator worker: {}", e);
                None
            }
        }
    }

    /// Hands the request back when the queue is full or the worker is gone.
    pub fn submit(&self, request: CuratorRequest) -> Result<(), CuratorRequest> {
        self.jobs.try_send(request).map_err(|e| e.into_inner())
    }
}

pub struct CuratorPlugin;

impl Plugin for CuratorPlugin {
    fn build(&self, app: &mut App) {
        let assistant = CuratorAssistant::new(CuratorSettings::from_env());
        if !assistant.is_configured() {
            info!("API_KEY not set, curator will answer with archive fallbacks");
        }
        let inbox = CuratorInbox::default();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(worker) = CuratorWorker::spawn(assistant.clone(), inbox.clone()) {
            app.insert_resource(worker);
        }

        app.insert_resource(assistant)
            .insert_resource(inbox)
            .add_event::<CuratorRequest>()
            .add_systems(
                Update,
                (dispatch_curator_requests, deliver_curator_replies).chain(),
            );
    }
}

/// Answer a request the worker could not take with its fallback line.
#[cfg(not(target_arch = "wasm32"))]
fn refuse(request: &CuratorRequest, inbox: &CuratorInbox) {
    let answer = CuratorAssistant::resolve(&request.query, Err(CuratorError::Busy));
    inbox.push(CuratorReply::new(request, answer));
}

#[cfg(not(target_arch = "wasm32"))]
fn dispatch_curator_requests(
    mut requests: EventReader<CuratorRequest>,
    worker: Option<Res<CuratorWorker>>,
    inbox: Res<CuratorInbox>,
) {
    for request in requests.read() {
        let Some(worker) = worker.as_ref() else {
            refuse(request, &inbox);
            continue;
        };
        if let Err(request) = worker.submit(request.clone()) {
            refuse(&request, &inbox);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn dispatch_curator_requests(
    mut requests: EventReader<CuratorRequest>,
    assistant: Res<CuratorAssistant>,
    inbox: Res<CuratorInbox>,
) {
    for request in requests.read() {
        let assistant = assistant.clone();
        let inbox = inbox.clone();
        let request = request.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let answer = assistant.answer(&request.query).await;
            inbox.push(CuratorReply::new(&request, answer));
        });
    }
}

fn deliver_curator_replies(inbox: Res<CuratorInbox>, mut rpc_interface: ResMut<WebRpcInterface>) {
    for reply in inbox.drain() {
        info!("Curator {}: {}", reply.kind, reply.text);
        match serde_json::to_value(&reply) {
            Ok(params) => rpc_interface.send_notification("curator_reply", params),
            Err(e) => error!("Failed to serialise curator reply: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::{ArtifactId, ModelRef};

    fn artifact(model: Option<&str>) -> Artifact {
        Artifact {
            id: ArtifactId::from_index(7),
            name: "Bulla (Clay Sealing)".to_string(),
            model: model.map(|path| ModelRef::new(path, None)),
            description: "A clay sealing stamped with a royal seal.".to_string(),
            chapter: None,
        }
    }

    #[test]
    fn describe_uses_file_name_or_falls_back_to_name() {
        assert_eq!(
            describe_query(&artifact(Some("3dmodels/Bulla_opt.glb"))),
            CuratorQuery::Describe {
                file_name: "Bulla_opt.glb".to_string()
            }
        );
        assert_eq!(
            describe_query(&artifact(None)),
            CuratorQuery::Describe {
                file_name: "Bulla (Clay Sealing)".to_string()
            }
        );
    }

    #[test]
    fn ask_carries_active_description_as_context() {
        let query = ask_query(Some(&artifact(None)), "Who sealed it?");
        assert_eq!(
            query,
            CuratorQuery::Ask {
                question: "Who sealed it?".to_string(),
                context: "A clay sealing stamped with a royal seal.".to_string(),
            }
        );
    }

    #[test]
    fn offline_assistant_answers_with_fallbacks() {
        let assistant = CuratorAssistant::new(CuratorSettings::offline());
        let describe = assistant.answer(&describe_query(&artifact(None)));
        assert_eq!(describe.text, prompt::DESCRIBE_FAILED);
        assert!(describe.fallback);

        let ask = assistant.answer(&ask_query(None, "Why?"));
        assert_eq!(ask.text, prompt::ASK_FAILED);
    }

    #[test]
    fn successful_text_is_passed_through() {
        let query = ask_query(None, "Age?");
        let answer = CuratorAssistant::resolve(&query, Ok("Seventh century BCE.".to_string()));
        assert_eq!(answer.text, "Seventh century BCE.");
        assert!(!answer.fallback);
    }

    #[test]
    fn replies_become_notifications() {
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<CuratorInbox>()
            .add_systems(Update, deliver_curator_replies);

        let request = CuratorRequest {
            request_id: Some(serde_json::json!(4)),
            query: describe_query(&artifact(None)),
        };
        app.world().resource::<CuratorInbox>().push(CuratorReply::new(
            &request,
            CuratorAnswer {
                text: "History unknown.".to_string(),
                fallback: true,
            },
        ));
        app.update();

        let rpc = app.world().resource::<WebRpcInterface>();
        let sent = rpc.pending_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, "curator_reply");
        assert_eq!(sent[0].params["request_id"], 4);
        assert_eq!(sent[0].params["kind"], "describe");
        assert_eq!(sent[0].params["fallback"], true);
        assert!(app.world().resource::<CuratorInbox>().drain().is_empty());
    }

    fn drain_until(inbox: &CuratorInbox, count: usize) -> Vec<CuratorReply> {
        let mut replies = Vec::new();
        for _ in 0..500 {
            replies.extend(inbox.drain());
            if replies.len() >= count {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(2));
        }
        replies
    }

    #[test]
    fn worker_answers_requests_in_order() {
        let inbox = CuratorInbox::default();
        let assistant = CuratorAssistant::new(CuratorSettings::offline());
        let worker = CuratorWorker::spawn(assistant, inbox.clone()).unwrap();

        for id in 0..3 {
            let submitted = worker.submit(CuratorRequest {
                request_id: Some(serde_json::json!(id)),
                query: ask_query(None, "When was it built?"),
            });
            assert!(submitted.is_ok());
        }

        let replies = drain_until(&inbox, 3);
        let ids: Vec<_> = replies.iter().map(|r| r.request_id.clone()).collect();
        assert_eq!(
            ids,
            vec![
                Some(serde_json::json!(0)),
                Some(serde_json::json!(1)),
                Some(serde_json::json!(2))
            ]
        );
        assert!(replies.iter().all(|r| r.fallback && r.text == prompt::ASK_FAILED));
    }

    #[test]
    fn full_queue_hands_request_back() {
        let (jobs, _queue) = crossbeam_channel::bounded(0);
        let worker = CuratorWorker { jobs };
        let request = CuratorRequest {
            request_id: Some(serde_json::json!(9)),
            query: ask_query(None, "Why?"),
        };
        let returned = worker.submit(request).unwrap_err();
        assert_eq!(returned.request_id, Some(serde_json::json!(9)));
    }

    #[test]
    fn refused_requests_still_get_a_reply() {
        let (jobs, _queue) = crossbeam_channel::bounded(0);
        let mut app = App::new();
        app.init_resource::<WebRpcInterface>()
            .init_resource::<CuratorInbox>()
            .insert_resource(CuratorWorker { jobs })
            .add_event::<CuratorRequest>()
            .add_systems(
                Update,
                (dispatch_curator_requests, deliver_curator_replies).chain(),
            );

        app.world_mut().send_event(CuratorRequest {
            request_id: Some(serde_json::json!(11)),
            query: describe_query(&artifact(Some("3dmodels/Bulla_opt.glb"))),
        });
        app.update();

        let sent = app.world().resource::<WebRpcInterface>().pending_notifications();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].params["request_id"], 11);
        assert_eq!(sent[0].params["fallback"], true);
        assert_eq!(sent[0].params["text"], prompt::DESCRIBE_FAILED);
    }
}
