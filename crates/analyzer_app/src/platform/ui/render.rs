use std::fmt::Write;

use analyzer_core::{AppViewModel, FormView, ResultView, Screen, ScoreTier};

const BAR_WIDTH: usize = 30;

/// Renders the view model as plain text for the terminal.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    out.push_str("Resume Analyzer\n");
    out.push_str("===============\n");

    match &view.screen {
        Screen::Form(form) => render_form(&mut out, form),
        Screen::Result(result) => render_result(&mut out, result),
    }

    if let Some(notification) = &view.notification {
        let _ = writeln!(out, "\n! {}: {}", notification.title, notification.description);
    }
    out
}

fn render_form(out: &mut String, form: &FormView) {
    match &form.file_name {
        Some(name) => {
            let _ = writeln!(out, "Resume: {name}");
        }
        None => out.push_str("Resume: (none selected, PDF format only)\n"),
    }
    let chars = form.job_description.trim().chars().count();
    if chars == 0 {
        out.push_str("Job description: (empty)\n");
    } else {
        let _ = writeln!(out, "Job description: {chars} characters");
    }
    let _ = writeln!(out, "[ {} ]", form.submit_label);
}

fn render_result(out: &mut String, result: &ResultView) {
    let marker = match result.category.tier {
        ScoreTier::Excellent => "+",
        ScoreTier::Good => "~",
        ScoreTier::Poor => "-",
    };
    let _ = writeln!(out, "Match Score: {}%", result.rounded_percentage);
    let _ = writeln!(out, "{}", progress_bar(result.match_percentage));
    let _ = writeln!(out, "{marker} {}", result.category.label);

    if !result.missing_keywords.is_empty() {
        out.push_str("\nMissing Keywords\n");
        for keyword in &result.missing_keywords {
            let _ = writeln!(out, "  - {keyword}");
        }
    }

    out.push_str("\nAI Improvement Suggestions\n");
    for line in result.improvement_summary.lines() {
        let _ = writeln!(out, "  {line}");
    }
    out.push_str("\n[ Analyze Another Resume ]\n");
}

fn progress_bar(percentage: f64) -> String {
    // Out-of-range scores are shown as-is in the label; only the bar is bounded.
    let fraction = if percentage.is_finite() {
        (percentage / 100.0).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (fraction * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
