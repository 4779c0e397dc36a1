//! Matcher core: pure state machine, selection store and view-model helpers.
mod effect;
mod msg;
mod notice;
mod score;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::{MatchOutcome, Msg, UploadOutcome};
pub use notice::{Notice, NoticeCategory};
pub use score::normalize_score;
pub use selection::{FileHandle, SelectionStore};
pub use state::{AppState, MatchResult, OpKind, RequestId, UiPhase, DEFAULT_TOP_K};
pub use update::update;
pub use view_model::{AppViewModel, MatchRowView, FALLBACK_STATUS, PLACEHOLDER_HINT};
