use ask_core::entities::Question;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

const LIST_HEADERS: [&str; 5] = ["id", "status", "created_at", "tags", "title"];

/// Render a serializable response as pretty or single-line JSON.
fn render_json<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Json | OutputFormat::Table => Ok(serde_json::to_string_pretty(value)?),
    }
}

/// Render an ordered result set. Order is preserved in every format.
pub fn render_questions(questions: &[Question], format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render_json(&questions, format);
    }
    if questions.is_empty() {
        return Ok(String::from("(no questions)"));
    }

    let rows = questions.iter().map(list_row).collect::<Vec<_>>();
    Ok(table::render_entity_table(&LIST_HEADERS, &rows, table_options()))
}

/// Render a single question; the table form is a key/value listing with content.
pub fn render_question(question: &Question, format: OutputFormat) -> anyhow::Result<String> {
    if format != OutputFormat::Table {
        return render_json(question, format);
    }

    let mut rows = LIST_HEADERS
        .iter()
        .zip(list_row(question))
        .map(|(key, value)| vec![(*key).to_string(), value])
        .collect::<Vec<_>>();
    rows.push(vec![String::from("content"), question.content.clone()]);

    Ok(table::render_entity_table(&["key", "value"], &rows, table_options()))
}

pub fn output_questions(questions: &[Question], format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_questions(questions, format)?);
    Ok(())
}

pub fn output_question(question: &Question, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render_question(question, format)?);
    Ok(())
}

fn list_row(question: &Question) -> Vec<String> {
    let status = if question.is_resolved {
        "resolved"
    } else {
        "unresolved"
    };
    let tags = question.tag_names().join(",");
    vec![
        question.id.to_string(),
        status.to_string(),
        question.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        if tags.is_empty() { String::from("-") } else { tags },
        question.title.clone(),
    ]
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}
