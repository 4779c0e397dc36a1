use std::collections::VecDeque;

use matcher_core::{update, AppState, AppViewModel, Effect, FileHandle, Msg, Notice};

use crate::{perform_request, ResumeService};

/// Command surface for a presentation layer.
///
/// Each operation runs to completion before returning: the request is
/// issued, awaited, fed back into `update`, and the notices it produced are
/// returned for one-shot display.
pub struct Controller<S> {
    service: S,
    state: AppState,
}

impl<S: ResumeService> Controller<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn set_files(&mut self, files: Vec<FileHandle>) {
        self.dispatch(Msg::FilesSelected(files));
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.dispatch(Msg::JobDescriptionChanged(text.into()));
    }

    pub async fn upload_single(&mut self) -> Vec<Notice> {
        self.run(Msg::UploadSingleClicked).await
    }

    pub async fn upload_batch(&mut self) -> Vec<Notice> {
        self.run(Msg::UploadBatchClicked).await
    }

    pub async fn match_job_description(
        &mut self,
        text: impl Into<String>,
        top_k: u32,
    ) -> Vec<Notice> {
        self.set_job_description(text);
        self.run(Msg::MatchClicked { top_k }).await
    }

    fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        effects
    }

    async fn run(&mut self, msg: Msg) -> Vec<Notice> {
        let mut notices = Vec::new();
        let mut pending: VecDeque<Effect> = self.dispatch(msg).into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                Effect::Notify(notice) => notices.push(notice),
                request => {
                    if let Some(event) = perform_request(&self.service, request).await {
                        pending.extend(self.dispatch(event.into_msg()));
                    }
                }
            }
        }
        notices
    }
}
