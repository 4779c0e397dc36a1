use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, MatchRowView};
use crate::SelectionStore;

pub type RequestId = u64;

/// Number of matches requested when the user does not ask for another count.
pub const DEFAULT_TOP_K: u32 = 5;

/// The three network-issuing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    UploadSingle,
    UploadBatch,
    Match,
}

impl OpKind {
    /// Status phrase shown while an operation of this kind is in flight.
    pub fn status_phrase(self) -> &'static str {
        match self {
            OpKind::UploadSingle => "Uploading resume...",
            OpKind::UploadBatch => "Uploading resumes...",
            OpKind::Match => "Processing AI embeddings...",
        }
    }

    /// Success text used when the server does not provide a message.
    pub fn default_upload_message(self) -> &'static str {
        match self {
            OpKind::UploadBatch => "Resumes uploaded",
            OpKind::UploadSingle | OpKind::Match => "Resume uploaded",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub resume_id: String,
    pub raw_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiPhase {
    Idle,
    Busy { op: OpKind, message: &'static str },
}

/// Process-wide UI state.
///
/// Busy/status are derived from the set of in-flight requests, so they clear
/// together once the last outstanding request settles.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    selection: SelectionStore,
    in_flight: BTreeMap<RequestId, OpKind>,
    results: Vec<MatchResult>,
    last_request_id: RequestId,
    latest_match: Option<RequestId>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        let results: Vec<MatchRowView> = self
            .results
            .iter()
            .enumerate()
            .map(|(index, result)| MatchRowView::new(index + 1, result))
            .collect();
        AppViewModel {
            busy,
            status_message: self.status_message().to_string(),
            file_names: self.selection.files().iter().map(|f| f.name.clone()).collect(),
            job_description: self.selection.job_description().to_string(),
            show_placeholder: !busy && results.is_empty(),
            results,
            dirty: self.dirty,
        }
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn phase(&self) -> UiPhase {
        // The most recently started request owns the status line.
        match self.in_flight.iter().next_back() {
            Some((_, &op)) => UiPhase::Busy {
                op,
                message: op.status_phrase(),
            },
            None => UiPhase::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Empty while idle.
    pub fn status_message(&self) -> &'static str {
        match self.phase() {
            UiPhase::Busy { message, .. } => message,
            UiPhase::Idle => "",
        }
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn selection_mut(&mut self) -> &mut SelectionStore {
        &mut self.selection
    }

    /// Allocates a request id and enters `Busy`. Starting a match clears the
    /// current results.
    pub(crate) fn begin_request(&mut self, op: OpKind) -> RequestId {
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.in_flight.insert(request_id, op);
        if op == OpKind::Match {
            self.results.clear();
            self.latest_match = Some(request_id);
        }
        self.mark_dirty();
        request_id
    }

    /// Removes a request from the in-flight set. Returns the operation kind it
    /// was issued for, or `None` if the id is unknown or already settled.
    pub(crate) fn settle_request(&mut self, request_id: RequestId) -> Option<OpKind> {
        let op = self.in_flight.remove(&request_id)?;
        self.mark_dirty();
        Some(op)
    }

    pub(crate) fn is_latest_match(&self, request_id: RequestId) -> bool {
        self.latest_match == Some(request_id)
    }

    pub(crate) fn replace_results(&mut self, results: Vec<MatchResult>) {
        self.results = results;
        self.mark_dirty();
    }
}
