//! Markdown and JSON rendering for board and widget views.

use std::fmt::Write;

use serde::Serialize;

use crate::breakdown::EMPTY_SLOT;
use crate::domain::ProjectLanguageAnalytics;
use crate::widget::{BoardCard, WidgetRow, board_cards, board_title, widget_columns};

/// Render the full-page board as Markdown.
pub fn render_board_markdown(metrics: &ProjectLanguageAnalytics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {}\n", board_title(metrics));
    for card in board_cards(metrics) {
        append_card(&mut output, &card);
    }
    output
}

/// Render widget table rows as a Markdown table.
pub fn render_widget_markdown(title: &str, rows: &[WidgetRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {title}\n");

    let columns = widget_columns();
    let header: Vec<&str> = columns.iter().map(|column| column.label).collect();
    let _ = writeln!(output, "| {} |", header.join(" | "));
    let _ = writeln!(output, "| {} |", vec!["---"; columns.len()].join(" | "));
    for row in rows {
        let _ = writeln!(output, "| {} | {} |", row.name, row.languages);
    }
    output
}

/// Render any serializable view payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn append_card(output: &mut String, card: &BoardCard) {
    let _ = writeln!(output, "## {}\n", card.name);
    let filled: Vec<&str> = card
        .top_languages
        .iter()
        .filter(|cell| cell.as_str() != EMPTY_SLOT)
        .map(String::as_str)
        .collect();
    if filled.is_empty() {
        let _ = writeln!(output, "No languages above the display threshold.");
    } else {
        for cell in filled {
            let _ = writeln!(output, "- {cell}");
        }
    }
    let _ = writeln!(output);
}
