//! Ranking and formatting of one repository's language breakdown.
//!
//! Both display variants share the same pipeline: stable sort descending by
//! percentage, then drop everything at or below [`MIN_PERCENTAGE`]. Entries
//! without a reported percentage are treated as absent, not as zero.

use crate::domain::LanguageStatistic;

/// Entries at or below this share are hidden from every view.
pub const MIN_PERCENTAGE: f64 = 1.0;

/// Number of languages shown per repository.
pub const TOP_LANGUAGES: usize = 3;

/// Placeholder when a repository has no displayable languages.
pub const NOT_DEFINED: &str = "Not defined";

/// Placeholder for an empty top-language slot.
pub const EMPTY_SLOT: &str = "-";

/// A language that survived filtering, with its resolved percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedLanguage {
    /// Language name.
    pub name: String,
    /// Percentage of code, strictly above [`MIN_PERCENTAGE`].
    pub percentage: f64,
}

/// Rank a breakdown: descending by percentage, ties in input order, entries
/// at or below [`MIN_PERCENTAGE`] or without a percentage removed.
pub fn rank_breakdown(breakdown: &[LanguageStatistic]) -> Vec<RankedLanguage> {
    let mut ranked: Vec<RankedLanguage> = breakdown
        .iter()
        .filter_map(|statistic| {
            let percentage = statistic.language_percentage?;
            if percentage > MIN_PERCENTAGE {
                Some(RankedLanguage {
                    name: statistic.name.clone(),
                    percentage,
                })
            } else {
                None
            }
        })
        .collect();

    // Stable sort keeps input order for equal percentages.
    ranked.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked
}

/// Join the top-ranked language names with `", "`.
///
/// At most [`TOP_LANGUAGES`] names appear; an empty result becomes
/// [`NOT_DEFINED`].
pub fn join_top_languages(breakdown: &[LanguageStatistic]) -> String {
    let ranked = rank_breakdown(breakdown);
    if ranked.is_empty() {
        return NOT_DEFINED.to_string();
    }

    ranked
        .iter()
        .take(TOP_LANGUAGES)
        .map(|language| language.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Project the ranking onto exactly [`TOP_LANGUAGES`] display cells.
///
/// Each filled slot reads `"<name> <percentage>%"`; missing slots read
/// [`EMPTY_SLOT`].
pub fn top_language_cells(breakdown: &[LanguageStatistic]) -> [String; TOP_LANGUAGES] {
    let ranked = rank_breakdown(breakdown);
    std::array::from_fn(|slot| match ranked.get(slot) {
        Some(language) => format!("{} {}%", language.name, language.percentage),
        None => EMPTY_SLOT.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        EMPTY_SLOT, NOT_DEFINED, RankedLanguage, join_top_languages, rank_breakdown,
        top_language_cells,
    };
    use crate::domain::LanguageStatistic;

    fn repo_a_breakdown() -> Vec<LanguageStatistic> {
        vec![
            LanguageStatistic::new("C#", 55.0),
            LanguageStatistic::new("TS", 30.0),
            LanguageStatistic::new("HTML", 10.0),
            LanguageStatistic::new("CSS", 2.0),
            LanguageStatistic::new("JSON", 0.5),
        ]
    }

    #[test]
    fn ranking_filters_and_orders_descending() {
        let ranked = rank_breakdown(&repo_a_breakdown());
        let names: Vec<&str> = ranked.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["C#", "TS", "HTML", "CSS"]);
    }

    #[test]
    fn ranking_excludes_exactly_one_percent() {
        let breakdown = vec![
            LanguageStatistic::new("Rust", 1.0),
            LanguageStatistic::new("Go", 1.01),
        ];
        let ranked = rank_breakdown(&breakdown);
        assert_eq!(
            ranked,
            vec![RankedLanguage {
                name: "Go".to_string(),
                percentage: 1.01,
            }]
        );
    }

    #[test]
    fn ranking_skips_entries_without_percentage() {
        let breakdown = vec![
            LanguageStatistic {
                name: "Mystery".to_string(),
                files_count: Some(4),
                language_percentage: None,
            },
            LanguageStatistic::new("Rust", 99.0),
        ];
        let ranked = rank_breakdown(&breakdown);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "Rust");
    }

    #[test]
    fn ranking_keeps_input_order_for_ties() {
        let breakdown = vec![
            LanguageStatistic::new("First", 20.0),
            LanguageStatistic::new("Second", 20.0),
            LanguageStatistic::new("Third", 40.0),
        ];
        let names: Vec<String> = rank_breakdown(&breakdown)
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["Third", "First", "Second"]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let breakdown = repo_a_breakdown();
        assert_eq!(rank_breakdown(&breakdown), rank_breakdown(&breakdown));
    }

    #[test]
    fn joined_variant_takes_top_three_names() {
        assert_eq!(join_top_languages(&repo_a_breakdown()), "C#, TS, HTML");
    }

    #[test]
    fn joined_variant_handles_single_language() {
        let breakdown = vec![
            LanguageStatistic::new("Markdown", 100.0),
            LanguageStatistic::new("YAML", 0.4),
        ];
        assert_eq!(join_top_languages(&breakdown), "Markdown");
    }

    #[test]
    fn joined_variant_falls_back_when_empty() {
        assert_eq!(join_top_languages(&[]), NOT_DEFINED);

        let all_below_threshold = vec![LanguageStatistic::new("JSON", 0.5)];
        assert_eq!(join_top_languages(&all_below_threshold), NOT_DEFINED);
    }

    #[test]
    fn cells_fill_all_three_slots() {
        let cells = top_language_cells(&repo_a_breakdown());
        assert_eq!(cells, ["C# 55%", "TS 30%", "HTML 10%"]);
    }

    #[test]
    fn cells_pad_missing_slots() {
        let breakdown = vec![LanguageStatistic::new("Markdown", 100.0)];
        let cells = top_language_cells(&breakdown);
        assert_eq!(cells, ["Markdown 100%", EMPTY_SLOT, EMPTY_SLOT]);
    }

    #[test]
    fn cells_are_all_empty_for_empty_breakdown() {
        let cells = top_language_cells(&[]);
        assert_eq!(cells, [EMPTY_SLOT, EMPTY_SLOT, EMPTY_SLOT]);
    }

    #[test]
    fn cells_keep_fractional_percentages() {
        let breakdown = vec![LanguageStatistic::new("Shell", 1.5)];
        let cells = top_language_cells(&breakdown);
        assert_eq!(cells[0], "Shell 1.5%");
    }
}
