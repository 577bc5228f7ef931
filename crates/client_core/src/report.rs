use std::fmt::Write as _;

use shared::protocol::{PhaseStatus, ResultsDashboard};

/// Plain-text rendering of a results dashboard, suitable for a terminal or
/// a downloadable report file.
pub fn render_report(dashboard: &ResultsDashboard) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Assessment Results");
    let _ = writeln!(out, "Your Cybercrime Law Advisor Career Analysis");
    let _ = writeln!(
        out,
        "Completed: {}",
        dashboard.completed_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendation: {}", dashboard.recommendation);
    let _ = writeln!(out);

    for line in &dashboard.score_lines {
        let _ = writeln!(
            out,
            "  {:<28} {:>3}%  [{}]",
            line.label,
            line.score,
            bar(line.score)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended Career Paths");
    for path in &dashboard.career_paths {
        let _ = writeln!(out, "  {} ({})", path.title, path.fit.label());
        let _ = writeln!(out, "    {}", path.description);
        for requirement in &path.requirements {
            let _ = writeln!(out, "    - {requirement}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Personalized Learning Path");
    for phase in &dashboard.learning_path {
        let marker = match phase.status {
            PhaseStatus::Completed => "[x]",
            PhaseStatus::Current => "[>]",
            PhaseStatus::Locked => "[ ]",
        };
        let _ = writeln!(
            out,
            "  {marker} {} Level ({}) - {}",
            phase.phase,
            phase.duration,
            phase.status.label()
        );
        let _ = writeln!(out, "      {}", phase.courses.join(", "));
    }

    out
}

fn bar(score: u32) -> String {
    let filled = (score.min(100) / 5) as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(20 - filled))
}

#[cfg(test)]
#[path = "tests/report_tests.rs"]
mod tests;
