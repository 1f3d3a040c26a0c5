//! Domain entities for langboard.

use serde::{Deserialize, Serialize};

/// One language's share of a repository's code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStatistic {
    /// Language name as reported by the analytics service.
    pub name: String,
    /// Number of files attributed to the language, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_count: Option<u64>,
    /// Percentage of code in this language, 0-100. Absent when the service
    /// has not computed a share for the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_percentage: Option<f64>,
}

impl LanguageStatistic {
    /// Create a statistic with a known percentage.
    pub fn new(name: impl Into<String>, language_percentage: f64) -> Self {
        Self {
            name: name.into(),
            files_count: None,
            language_percentage: Some(language_percentage),
        }
    }
}

/// Language composition of a single repository.
///
/// Percentages within one breakdown are not guaranteed to sum to 100; the
/// service rounds and may omit an "Other" bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryLanguageAnalytics {
    /// Repository identifier, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Repository name, unique within a project.
    pub name: String,
    /// Unordered per-language shares for the repository.
    #[serde(default)]
    pub language_breakdown: Vec<LanguageStatistic>,
}

impl RepositoryLanguageAnalytics {
    /// Create analytics for a named repository.
    pub fn new(name: impl Into<String>, language_breakdown: Vec<LanguageStatistic>) -> Self {
        Self {
            id: None,
            name: name.into(),
            language_breakdown,
        }
    }
}

/// Language analytics for every repository in a project.
///
/// Repository order is preserved as received; only views apply sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLanguageAnalytics {
    /// Per-repository analytics in service order.
    #[serde(default)]
    pub repository_language_analytics: Vec<RepositoryLanguageAnalytics>,
}
