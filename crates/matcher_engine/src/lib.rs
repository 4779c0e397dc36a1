//! Matcher engine: remote service client and effect execution.
mod controller;
mod engine;
mod service;
mod types;

pub use controller::Controller;
pub use engine::{perform_request, ChannelEventSink, EngineHandle, EventSink};
pub use service::{ReqwestService, ResumeService, ServiceSettings, DEFAULT_BASE_ADDRESS};
pub use types::{
    EngineEvent, FailureKind, MatchEntry, MatchRequest, MatchResponse, ServiceError, UploadReply,
};
