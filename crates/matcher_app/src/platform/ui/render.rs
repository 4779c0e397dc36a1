use matcher_core::{AppViewModel, Notice, NoticeCategory, PLACEHOLDER_HINT};

const BAR_COLUMNS: usize = 30;
const JD_PREVIEW_CHARS: usize = 60;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(status) = view.status_line() {
        lines.push(format!("... {status}"));
    }

    let selection = if view.file_names.is_empty() {
        "none".to_string()
    } else {
        view.file_names.join(", ")
    };
    lines.push(format!("Selected: {selection}"));
    lines.push(format!("Job description: {}", preview(&view.job_description)));

    if !view.results.is_empty() {
        lines.push("Matching Results".to_string());
        for row in &view.results {
            let filled = row.bar_width(BAR_COLUMNS);
            lines.push(format!(
                "{:>2}. {:<24} {:>6}  [{}{}]",
                row.rank,
                row.resume_id,
                row.percent_label(),
                "#".repeat(filled),
                " ".repeat(BAR_COLUMNS - filled)
            ));
        }
    } else if view.show_placeholder {
        lines.push(PLACEHOLDER_HINT.to_string());
    }

    lines
}

pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.category() {
        NoticeCategory::Validation => "!",
        NoticeCategory::Transport => "x",
        NoticeCategory::EmptyResult => "-",
        NoticeCategory::Success => "+",
    };
    format!("[{tag}] {notice}")
}

fn preview(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return "(empty)".to_string();
    }
    if collapsed.chars().count() <= JD_PREVIEW_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(JD_PREVIEW_CHARS).collect();
    format!("{cut}...")
}
