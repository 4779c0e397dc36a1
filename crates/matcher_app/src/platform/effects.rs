use std::sync::{mpsc, Arc};

use engine_logging::engine_debug;
use matcher_core::{Effect, Notice};
use matcher_engine::{EngineEvent, EngineHandle, EventSink, ResumeService};

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppInput {
    Line(String),
    Engine(EngineEvent),
    InputClosed,
}

struct InputForwarder {
    tx: mpsc::Sender<AppInput>,
}

impl EventSink for InputForwarder {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppInput::Engine(event));
    }
}

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn ResumeService>, input_tx: mpsc::Sender<AppInput>) -> Self {
        let sink = Arc::new(InputForwarder { tx: input_tx });
        Self {
            engine: EngineHandle::new(service, sink),
        }
    }

    /// Hands request effects to the engine and returns the notices to display.
    pub fn run(&self, effects: Vec<Effect>) -> Vec<Notice> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::Notify(notice) => notices.push(notice),
                request => {
                    engine_debug!("Dispatching request {:?}", request.request_id());
                    self.engine.execute(request);
                }
            }
        }
        notices
    }
}
