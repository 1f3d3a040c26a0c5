//! Widget lifecycle vocabulary and view-row projection.

use serde::{Deserialize, Serialize};

use crate::breakdown::{TOP_LANGUAGES, join_top_languages, top_language_cells};
use crate::domain::ProjectLanguageAnalytics;
use crate::table::{Column, text_compare};

/// Result of a widget lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetStatus {
    /// The operation completed.
    Success,
    /// The operation failed; the host decides how to surface the message.
    Failure(String),
}

impl WidgetStatus {
    /// Failure with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// True for [`WidgetStatus::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

/// Settings envelope the host hands to every lifecycle operation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostSettings {
    /// Widget title chosen by the user.
    pub name: String,
    /// Raw persisted custom-settings blob, when one exists.
    pub custom_data: Option<String>,
}

/// One row of the widget's sortable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetRow {
    /// Repository name.
    pub name: String,
    /// Top language names joined with `", "`, or `"Not defined"`.
    pub languages: String,
}

/// One repository card on the full-page board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardCard {
    /// Repository name.
    pub name: String,
    /// Exactly three `"<name> <pct>%"` cells, padded with `"-"`.
    pub top_languages: [String; TOP_LANGUAGES],
}

/// Build widget table rows, one per repository in service order.
pub fn widget_rows(metrics: &ProjectLanguageAnalytics) -> Vec<WidgetRow> {
    metrics
        .repository_language_analytics
        .iter()
        .map(|repository| WidgetRow {
            name: repository.name.clone(),
            languages: join_top_languages(&repository.language_breakdown),
        })
        .collect()
}

/// Build board cards, one per repository in service order.
pub fn board_cards(metrics: &ProjectLanguageAnalytics) -> Vec<BoardCard> {
    metrics
        .repository_language_analytics
        .iter()
        .map(|repository| BoardCard {
            name: repository.name.clone(),
            top_languages: top_language_cells(&repository.language_breakdown),
        })
        .collect()
}

/// Title of the full-page board.
pub fn board_title(metrics: &ProjectLanguageAnalytics) -> String {
    format!(
        "Language Breakdown ({})",
        metrics.repository_language_analytics.len()
    )
}

/// Column declarations for the widget table.
///
/// Both columns compare as text, including the languages column; see
/// [`crate::table::natural_compare`] for the opt-in numeric-aware
/// alternative.
pub fn widget_columns() -> Vec<Column<WidgetRow>> {
    vec![
        Column {
            id: "name",
            label: "Repository Name",
            compare: |a, b| text_compare(&a.name, &b.name),
        },
        Column {
            id: "languages",
            label: "Languages",
            compare: |a, b| text_compare(&a.languages, &b.languages),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::{WidgetStatus, board_cards, board_title, widget_columns, widget_rows};
    use crate::domain::{LanguageStatistic, ProjectLanguageAnalytics, RepositoryLanguageAnalytics};

    fn sample_metrics() -> ProjectLanguageAnalytics {
        ProjectLanguageAnalytics {
            repository_language_analytics: vec![
                RepositoryLanguageAnalytics::new(
                    "repoA",
                    vec![
                        LanguageStatistic::new("C#", 55.0),
                        LanguageStatistic::new("TS", 30.0),
                        LanguageStatistic::new("HTML", 10.0),
                        LanguageStatistic::new("CSS", 2.0),
                        LanguageStatistic::new("JSON", 0.5),
                    ],
                ),
                RepositoryLanguageAnalytics::new(
                    "repoB",
                    vec![LanguageStatistic::new("Markdown", 100.0)],
                ),
                RepositoryLanguageAnalytics::new("repoC", Vec::new()),
            ],
        }
    }

    #[test]
    fn widget_rows_join_top_languages_per_repository() {
        let rows = widget_rows(&sample_metrics());

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].name, "repoA");
        assert_eq!(rows[0].languages, "C#, TS, HTML");
        assert_eq!(rows[1].languages, "Markdown");
        assert_eq!(rows[2].languages, "Not defined");
    }

    #[test]
    fn board_cards_project_three_slots_per_repository() {
        let cards = board_cards(&sample_metrics());

        assert_eq!(cards[0].top_languages, ["C# 55%", "TS 30%", "HTML 10%"]);
        assert_eq!(cards[1].top_languages, ["Markdown 100%", "-", "-"]);
        assert_eq!(cards[2].top_languages, ["-", "-", "-"]);
    }

    #[test]
    fn board_title_counts_repositories() {
        assert_eq!(board_title(&sample_metrics()), "Language Breakdown (3)");

        let empty = ProjectLanguageAnalytics {
            repository_language_analytics: Vec::new(),
        };
        assert_eq!(board_title(&empty), "Language Breakdown (0)");
    }

    #[test]
    fn widget_columns_declare_stable_ids() {
        let columns = widget_columns();
        let ids: Vec<&str> = columns.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["name", "languages"]);
    }

    #[test]
    fn widget_status_helpers() {
        assert!(WidgetStatus::Success.is_success());
        let status = WidgetStatus::failure("boom");
        assert_eq!(status, WidgetStatus::Failure("boom".to_string()));
    }
}
