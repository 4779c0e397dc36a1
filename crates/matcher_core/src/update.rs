use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::{AppState, Effect, MatchOutcome, Msg, Notice, OpKind, UploadOutcome};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesSelected(files) => {
            engine_debug!("Selection replaced with {} file(s)", files.len());
            state.selection_mut().set_files(files);
            state.mark_dirty();
            Vec::new()
        }
        Msg::JobDescriptionChanged(text) => {
            state.selection_mut().set_job_description(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UploadSingleClicked => {
            let Some(file) = state.selection().files().first().cloned() else {
                return (state, vec![no_file_selected(OpKind::UploadSingle)]);
            };
            let request_id = state.begin_request(OpKind::UploadSingle);
            engine_info!(
                "UploadSingle request_id={} file={} bytes={}",
                request_id,
                file.name,
                file.bytes.len()
            );
            vec![Effect::UploadSingle { request_id, file }]
        }
        Msg::UploadBatchClicked => {
            if state.selection().files().is_empty() {
                return (state, vec![no_file_selected(OpKind::UploadBatch)]);
            }
            let files = state.selection().files().to_vec();
            let request_id = state.begin_request(OpKind::UploadBatch);
            engine_info!("UploadBatch request_id={} files={}", request_id, files.len());
            vec![Effect::UploadBatch { request_id, files }]
        }
        Msg::MatchClicked { top_k } => {
            let Some(text) = state.selection().trimmed_job_description().map(str::to_owned) else {
                return (state, vec![Effect::Notify(Notice::EmptyJobDescription)]);
            };
            let request_id = state.begin_request(OpKind::Match);
            engine_info!(
                "Match request_id={} text_len={} top_k={}",
                request_id,
                text.len(),
                top_k
            );
            vec![Effect::Match {
                request_id,
                text,
                top_k,
            }]
        }
        Msg::UploadFinished {
            request_id,
            op,
            outcome,
        } => {
            if state.settle_request(request_id).is_none() {
                engine_warn!("Ignoring completion for unknown request {}", request_id);
                return (state, Vec::new());
            }
            let notice = match outcome {
                UploadOutcome::Uploaded { message } => {
                    let message = message
                        .filter(|text| !text.is_empty())
                        .unwrap_or_else(|| op.default_upload_message().to_string());
                    Notice::Uploaded { op, message }
                }
                UploadOutcome::Failed { reason } => {
                    engine_warn!("Upload request {} failed: {}", request_id, reason);
                    Notice::UploadFailed
                }
            };
            vec![Effect::Notify(notice)]
        }
        Msg::MatchFinished {
            request_id,
            outcome,
        } => {
            if state.settle_request(request_id).is_none() {
                engine_warn!("Ignoring completion for unknown request {}", request_id);
                return (state, Vec::new());
            }
            if !state.is_latest_match(request_id) {
                engine_debug!("Discarding stale match response {}", request_id);
                return (state, Vec::new());
            }
            match outcome {
                MatchOutcome::Matches(matches) if matches.is_empty() => {
                    vec![Effect::Notify(Notice::NoMatches)]
                }
                MatchOutcome::Matches(matches) => {
                    engine_info!("Match request {} returned {} result(s)", request_id, matches.len());
                    state.replace_results(matches);
                    Vec::new()
                }
                MatchOutcome::Failed { reason } => {
                    engine_warn!("Match request {} failed: {}", request_id, reason);
                    vec![Effect::Notify(Notice::MatchFailed)]
                }
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn no_file_selected(op: OpKind) -> Effect {
    Effect::Notify(Notice::NoFileSelected { op })
}
