#![deny(missing_docs)]
//! Langboard core library.
//!
//! Transforms per-repository language analytics into filtered, ranked, and
//! formatted view rows, and owns the widget settings lifecycle shared by the
//! langboard shells.

pub mod breakdown;
pub mod domain;
pub mod error;
pub mod render;
pub mod settings;
pub mod table;
pub mod widget;

pub use breakdown::{
    EMPTY_SLOT, MIN_PERCENTAGE, NOT_DEFINED, RankedLanguage, TOP_LANGUAGES, join_top_languages,
    rank_breakdown, top_language_cells,
};
pub use domain::{LanguageStatistic, ProjectLanguageAnalytics, RepositoryLanguageAnalytics};
pub use error::{LangboardError, Result};
pub use render::{render_board_markdown, render_json, render_widget_markdown};
pub use settings::{
    AlwaysValid, CustomSettings, SETTINGS_VERSION, SaveStatus, SettingsLoad, SettingsStore,
    SettingsValidator, SettingsVersion, StorePhase, WidgetSettings,
};
pub use table::{
    Column, Comparator, RowListener, SortOrder, TableViewModel, natural_compare, text_compare,
};
pub use widget::{
    BoardCard, HostSettings, WidgetRow, WidgetStatus, board_cards, board_title, widget_columns,
    widget_rows,
};
