use crate::{normalize_score, MatchResult};

/// Shown when busy but no operation-specific phrase is available.
pub const FALLBACK_STATUS: &str = "Processing...";
/// Shown when idle with nothing to display.
pub const PLACEHOLDER_HINT: &str = "Upload resumes and match with a job description";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub busy: bool,
    pub status_message: String,
    pub file_names: Vec<String>,
    pub job_description: String,
    pub results: Vec<MatchRowView>,
    pub show_placeholder: bool,
    pub dirty: bool,
}

impl AppViewModel {
    /// Text for the status line, if one should be shown at all.
    pub fn status_line(&self) -> Option<&str> {
        if !self.status_message.is_empty() {
            Some(&self.status_message)
        } else if self.busy {
            Some(FALLBACK_STATUS)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchRowView {
    /// 1-based position in the server's ranking.
    pub rank: usize,
    pub resume_id: String,
    pub raw_score: f64,
    /// `raw_score` normalized to `[0, 100]`.
    pub percent: f64,
}

impl MatchRowView {
    pub(crate) fn new(rank: usize, result: &MatchResult) -> Self {
        Self {
            rank,
            resume_id: result.resume_id.clone(),
            raw_score: result.raw_score,
            percent: normalize_score(result.raw_score),
        }
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    /// Filled cells of a score bar `columns` wide.
    pub fn bar_width(&self, columns: usize) -> usize {
        let filled = (self.percent / 100.0 * columns as f64).round() as usize;
        filled.min(columns)
    }
}
