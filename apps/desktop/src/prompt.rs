use std::fmt::Write as _;

use shared::{
    domain::{AnswerValue, Question, QuestionKind, SCALE_LABELS},
    protocol::{FlowSnapshot, LandingContent},
};

/// One line of terminal input, interpreted against the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Answer(AnswerValue),
    Next,
    Previous,
    Quit,
    Invalid(String),
}

pub fn parse_input(line: &str, question: &Question) -> Input {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "" | "n" | "next" => return Input::Next,
        "p" | "prev" | "previous" => return Input::Previous,
        "q" | "quit" => return Input::Quit,
        _ => {}
    }

    let Ok(number) = line.parse::<i64>() else {
        return Input::Invalid(format!("Unrecognised input '{line}'. {}", hint(question)));
    };

    match &question.kind {
        QuestionKind::Choice { options } | QuestionKind::Scenario { options } => {
            let picked = usize::try_from(number)
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| options.get(i));
            match picked {
                Some(option) => Input::Answer(AnswerValue::Choice(option.clone())),
                None => Input::Invalid(format!("No option {number}. {}", hint(question))),
            }
        }
        QuestionKind::Scale { .. } => {
            let value = AnswerValue::Scale(number);
            match question.check_answer(&value) {
                Ok(()) => Input::Answer(value),
                Err(err) => Input::Invalid(format!("{err}. {}", hint(question))),
            }
        }
    }
}

fn hint(question: &Question) -> String {
    match &question.kind {
        QuestionKind::Choice { options } | QuestionKind::Scenario { options } => format!(
            "Enter 1-{}, n for next, p for previous, q to quit.",
            options.len()
        ),
        QuestionKind::Scale { min, max, .. } => {
            format!("Enter {min}-{max}, n for next, p for previous, q to quit.")
        }
    }
}

pub fn render_question(snapshot: &FlowSnapshot) -> String {
    let mut out = String::new();
    let question = &snapshot.question;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Question {} of {}  ({:.0}% complete)",
        snapshot.position, snapshot.total, snapshot.progress_percent
    );
    let _ = writeln!(out, "{}", snapshot.category_label);
    let _ = writeln!(out, "{}", question.prompt);
    if let Some(guidance) = &snapshot.guidance {
        let _ = writeln!(out, "{guidance}");
    }

    match &question.kind {
        QuestionKind::Choice { options } | QuestionKind::Scenario { options } => {
            for (i, option) in options.iter().enumerate() {
                let marker = match &snapshot.answer {
                    Some(AnswerValue::Choice(chosen)) if chosen == option => "*",
                    _ => " ",
                };
                let _ = writeln!(out, " {marker} {}. {option}", i + 1);
            }
        }
        QuestionKind::Scale { min, max, .. } => {
            let _ = writeln!(
                out,
                "  {min} = {}, {} = {}",
                SCALE_LABELS[0],
                (min + max) / 2,
                SCALE_LABELS[1]
            );
            let _ = writeln!(out, "  {max} = {}", SCALE_LABELS[2]);
            if let Some(value) = &snapshot.display_value {
                let state = if snapshot.answer.is_some() {
                    "selected"
                } else {
                    "not yet answered"
                };
                let _ = writeln!(out, "  Current value: {value} ({state})");
            }
        }
    }

    let back = if snapshot.can_retreat { "[p] Previous  " } else { "" };
    let forward = if snapshot.can_advance {
        format!("[n] {}", snapshot.primary_action.label())
    } else {
        format!("[n] {} (answer first)", snapshot.primary_action.label())
    };
    let _ = writeln!(out, "{back}{forward}  [q] Quit");
    out
}

pub fn render_landing(landing: &LandingContent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", landing.badge);
    let _ = writeln!(out, "{} - {}", landing.title, landing.subtitle);
    let _ = writeln!(out, "{}", landing.summary);
    let _ = writeln!(out);
    for feature in &landing.features {
        let _ = writeln!(out, "  * {}: {}", feature.title, feature.description);
    }
    let _ = writeln!(out);
    for stat in &landing.stats {
        let _ = writeln!(out, "  {} {}", stat.value, stat.label);
    }
    out
}

#[cfg(test)]
#[path = "tests/prompt_tests.rs"]
mod tests;
