use std::sync::Once;

use matcher_core::{
    update, AppState, Effect, MatchOutcome, MatchResult, Msg, Notice, NoticeCategory, UiPhase,
    DEFAULT_TOP_K, PLACEHOLDER_HINT,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn result(resume_id: &str, raw_score: f64) -> MatchResult {
    MatchResult {
        resume_id: resume_id.to_string(),
        raw_score,
    }
}

fn start_match(state: AppState, text: &str, top_k: u32) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::JobDescriptionChanged(text.to_string()));
    update(state, Msg::MatchClicked { top_k })
}

fn finish(state: AppState, request_id: u64, outcome: MatchOutcome) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::MatchFinished {
            request_id,
            outcome,
        },
    )
}

#[test]
fn blank_job_description_is_rejected_without_request() {
    init_logging();
    for text in ["", "  ", "\n\t "] {
        let (state, effects) = start_match(AppState::new(), text, DEFAULT_TOP_K);
        assert_eq!(effects, vec![Effect::Notify(Notice::EmptyJobDescription)]);
        assert_eq!(state.phase(), UiPhase::Idle);
        assert_eq!(state.in_flight_count(), 0);
    }
    assert_eq!(
        Notice::EmptyJobDescription.category(),
        NoticeCategory::Validation
    );
}

#[test]
fn match_sends_trimmed_text_and_clears_previous_results() {
    init_logging();
    let (state, _) = start_match(AppState::new(), "rust engineer", 5);
    let (state, _) = finish(state, 1, MatchOutcome::Matches(vec![result("old", 0.5)]));
    assert_eq!(state.results().len(), 1);

    let (state, effects) = start_match(state, "  senior rust engineer \n", 3);

    assert_eq!(
        effects,
        vec![Effect::Match {
            request_id: 2,
            text: "senior rust engineer".to_string(),
            top_k: 3,
        }]
    );
    assert!(state.results().is_empty());
    assert_eq!(state.status_message(), "Processing AI embeddings...");
    assert!(state.view().busy);
    assert!(!state.view().show_placeholder);
}

#[test]
fn matches_replace_results_in_server_order() {
    init_logging();
    let matches = vec![result("r3", 0.2), result("r1", 0.9), result("r2", 0.4)];
    let (state, _) = start_match(AppState::new(), "data engineer", 5);
    let (state, effects) = finish(state, 1, MatchOutcome::Matches(matches.clone()));

    assert!(effects.is_empty());
    assert_eq!(state.results(), matches.as_slice());
    assert_eq!(state.phase(), UiPhase::Idle);
    assert_eq!(state.status_message(), "");
}

#[test]
fn empty_match_list_is_an_empty_result_notice() {
    init_logging();
    let (state, _) = start_match(AppState::new(), "data engineer", 5);
    let (state, effects) = finish(state, 1, MatchOutcome::Matches(Vec::new()));

    assert_eq!(effects, vec![Effect::Notify(Notice::NoMatches)]);
    assert_eq!(Notice::NoMatches.category(), NoticeCategory::EmptyResult);
    assert!(state.results().is_empty());
    assert!(!state.is_busy());
}

#[test]
fn failed_match_leaves_results_empty() {
    init_logging();
    let (state, _) = start_match(AppState::new(), "data engineer", 5);
    let (state, effects) = finish(
        state,
        1,
        MatchOutcome::Failed {
            reason: "decode error".to_string(),
        },
    );

    assert_eq!(effects, vec![Effect::Notify(Notice::MatchFailed)]);
    assert!(state.results().is_empty());
    assert_eq!(state.phase(), UiPhase::Idle);
    assert!(state.view().show_placeholder);
}

#[test]
fn view_normalizes_scores_lazily() {
    init_logging();
    let (state, _) = start_match(AppState::new(), "backend", 5);
    let (state, _) = finish(
        state,
        1,
        MatchOutcome::Matches(vec![result("r1", 1.5), result("r2", 0.3)]),
    );

    let view = state.view();
    let rows: Vec<_> = view
        .results
        .iter()
        .map(|row| (row.rank, row.resume_id.as_str(), row.percent))
        .collect();
    assert_eq!(rows, vec![(1, "r1", 100.0), (2, "r2", 30.0)]);
    assert_eq!(view.results[0].raw_score, 1.5);
    assert_eq!(view.results[0].percent_label(), "100.0%");
    assert_eq!(view.results[1].percent_label(), "30.0%");
    assert_eq!(view.results[0].bar_width(20), 20);
    assert_eq!(view.results[1].bar_width(20), 6);
    assert!(!view.show_placeholder);
}

#[test]
fn placeholder_shows_only_when_idle_without_results() {
    init_logging();
    let view = AppState::new().view();
    assert!(view.show_placeholder);
    assert_eq!(view.status_line(), None);
    assert!(!PLACEHOLDER_HINT.is_empty());
}
