use matcher_core::{MatchOutcome, MatchResult, Msg, OpKind, RequestId, UploadOutcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body returned by both upload endpoints. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct UploadReply {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRequest<'a> {
    pub text: &'a str,
    pub top_k: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub matches: Option<Vec<MatchEntry>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchEntry {
    pub resume_id: String,
    pub score: f64,
}

impl MatchResponse {
    /// Ranked results in server order; an absent list is empty.
    pub fn into_results(self) -> Vec<MatchResult> {
        self.matches
            .unwrap_or_default()
            .into_iter()
            .map(|entry| MatchResult {
                resume_id: entry.resume_id,
                raw_score: entry.score,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidAddress,
    Network,
    Timeout,
    Encode,
    Decode,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind:?}: {message}")]
pub struct ServiceError {
    pub kind: FailureKind,
    pub message: String,
}

impl ServiceError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Completion of a request effect, reported back to whoever drives `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    UploadCompleted {
        request_id: RequestId,
        op: OpKind,
        result: Result<UploadReply, ServiceError>,
    },
    MatchCompleted {
        request_id: RequestId,
        result: Result<Vec<MatchResult>, ServiceError>,
    },
}

impl EngineEvent {
    pub fn into_msg(self) -> Msg {
        match self {
            EngineEvent::UploadCompleted {
                request_id,
                op,
                result,
            } => Msg::UploadFinished {
                request_id,
                op,
                outcome: match result {
                    Ok(reply) => UploadOutcome::Uploaded {
                        message: reply.message,
                    },
                    Err(err) => UploadOutcome::Failed {
                        reason: err.to_string(),
                    },
                },
            },
            EngineEvent::MatchCompleted { request_id, result } => Msg::MatchFinished {
                request_id,
                outcome: match result {
                    Ok(matches) => MatchOutcome::Matches(matches),
                    Err(err) => MatchOutcome::Failed {
                        reason: err.to_string(),
                    },
                },
            },
        }
    }
}
