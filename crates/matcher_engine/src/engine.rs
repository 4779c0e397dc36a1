use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::engine_warn;
use matcher_core::{Effect, OpKind};

use crate::{EngineEvent, FailureKind, ResumeService, ServiceError};

/// Receives completions from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs request effects on a background tokio runtime.
///
/// Requests are not serialized: every effect is spawned as soon as it
/// arrives, and completions reach the sink in the order they settle.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<Effect>,
    sink: Arc<dyn EventSink>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn ResumeService>, sink: Arc<dyn EventSink>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Effect>();
        let thread_sink = sink.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(effect) = cmd_rx.recv() {
                let service = service.clone();
                let sink = thread_sink.clone();
                runtime.spawn(async move {
                    if let Some(event) = perform_request(service.as_ref(), effect).await {
                        sink.emit(event);
                    }
                });
            }
        });

        Self { cmd_tx, sink }
    }

    pub fn execute(&self, effect: Effect) {
        if effect.request_id().is_none() {
            engine_warn!("EngineHandle ignores non-request effect {:?}", effect);
            return;
        }
        // A stopped engine thread must still settle the request.
        if let Err(mpsc::SendError(effect)) = self.cmd_tx.send(effect) {
            engine_warn!("Engine thread is gone; failing request {:?}", effect.request_id());
            let error = ServiceError::new(FailureKind::Network, "engine stopped");
            if let Some(event) = failed_event(effect, error) {
                self.sink.emit(event);
            }
        }
    }
}

fn failed_event(effect: Effect, error: ServiceError) -> Option<EngineEvent> {
    let event = match effect {
        Effect::UploadSingle { request_id, .. } => EngineEvent::UploadCompleted {
            request_id,
            op: OpKind::UploadSingle,
            result: Err(error),
        },
        Effect::UploadBatch { request_id, .. } => EngineEvent::UploadCompleted {
            request_id,
            op: OpKind::UploadBatch,
            result: Err(error),
        },
        Effect::Match { request_id, .. } => EngineEvent::MatchCompleted {
            request_id,
            result: Err(error),
        },
        Effect::Notify(_) => return None,
    };
    Some(event)
}

/// Issues the network call for a request effect and reports how it settled.
/// Returns `None` for effects that do not touch the network.
pub async fn perform_request(service: &dyn ResumeService, effect: Effect) -> Option<EngineEvent> {
    let event = match effect {
        Effect::UploadSingle { request_id, file } => EngineEvent::UploadCompleted {
            request_id,
            op: OpKind::UploadSingle,
            result: service.upload_single(&file).await,
        },
        Effect::UploadBatch { request_id, files } => EngineEvent::UploadCompleted {
            request_id,
            op: OpKind::UploadBatch,
            result: service.upload_batch(&files).await,
        },
        Effect::Match {
            request_id,
            text,
            top_k,
        } => EngineEvent::MatchCompleted {
            request_id,
            result: service.match_job_description(&text, top_k).await,
        },
        Effect::Notify(_) => return None,
    };
    Some(event)
}
