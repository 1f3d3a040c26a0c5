//! Widget lifecycle driver and settings-blob persistence.
//!
//! Plays the host runtime's part: hands settings envelopes to the widget,
//! persists the custom-settings blob to a config file, and converts every
//! lifecycle failure into a status instead of a fault.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use langboard_core::{
    CustomSettings, HostSettings, LangboardError, SaveStatus, SettingsStore, TableViewModel,
    WidgetRow, WidgetSettings, WidgetStatus, widget_columns, widget_rows,
};

use crate::CliResult;
use crate::gateway::AnalyticsClient;

/// Boxed future returned by lifecycle operations.
pub type LifecycleFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host-facing widget contract.
///
/// Each operation catches its own errors and reports them through the
/// returned status; none of them panic or propagate across the boundary.
pub trait WidgetLifecycle {
    /// Called before the widget is first shown; no data is required yet.
    fn preload<'a>(&'a mut self, settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus>;
    /// Load settings and metrics, then build the table rows.
    fn load<'a>(&'a mut self, settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus>;
    /// Re-run the load path with fresh settings.
    fn reload<'a>(&'a mut self, settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus>;
    /// Validate and release the current settings for persistence.
    fn on_save<'a>(&'a mut self) -> LifecycleFuture<'a, SaveStatus>;
}

/// The language breakdown widget: one instance per dashboard placement,
/// owning its settings store and table state exclusively.
pub struct BoardWidget<C> {
    client: C,
    project: String,
    title: String,
    store: SettingsStore,
    table: TableViewModel<WidgetRow>,
}

impl<C: AnalyticsClient> BoardWidget<C> {
    /// Create a widget bound to a project and an analytics client.
    pub fn new(client: C, project: impl Into<String>) -> Self {
        Self {
            client,
            project: project.into(),
            title: String::new(),
            store: SettingsStore::new(),
            table: TableViewModel::new(widget_columns(), Vec::new()),
        }
    }

    /// Current widget title, taken from the host settings envelope.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The sortable table over the current rows.
    pub fn table(&self) -> &TableViewModel<WidgetRow> {
        &self.table
    }

    /// Mutable access to the table, e.g. to apply a sort.
    pub fn table_mut(&mut self) -> &mut TableViewModel<WidgetRow> {
        &mut self.table
    }

    /// Current widget settings.
    pub fn settings(&self) -> &WidgetSettings {
        self.store.settings()
    }

    /// Merge a partial settings object and return the pending-change
    /// envelope to notify the host with.
    pub fn update_settings(&mut self, partial: &WidgetSettings) -> Result<CustomSettings, LangboardError> {
        self.store.update(partial)
    }

    async fn apply_settings(&mut self, settings: &HostSettings) -> Result<(), LangboardError> {
        let outcome = self.store.load(settings.custom_data.as_deref());
        if let Some(corruption) = outcome.corruption() {
            log::warn!("persisted widget settings were corrupt, using defaults: {corruption}");
        }

        let metrics = self
            .client
            .project_language_analytics(&self.project)
            .await?;

        self.title = settings.name.clone();
        self.table.set_rows(widget_rows(&metrics));
        Ok(())
    }
}

impl<C: AnalyticsClient> WidgetLifecycle for BoardWidget<C> {
    fn preload<'a>(&'a mut self, _settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus> {
        Box::pin(async { WidgetStatus::Success })
    }

    fn load<'a>(&'a mut self, settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus> {
        Box::pin(async move {
            match self.apply_settings(settings).await {
                Ok(()) => WidgetStatus::Success,
                Err(error) => {
                    log::error!("widget load failed: {error}");
                    WidgetStatus::failure(error.to_string())
                }
            }
        })
    }

    fn reload<'a>(&'a mut self, settings: &'a HostSettings) -> LifecycleFuture<'a, WidgetStatus> {
        self.load(settings)
    }

    fn on_save<'a>(&'a mut self) -> LifecycleFuture<'a, SaveStatus> {
        Box::pin(async { self.store.save() })
    }
}

/// Resolve the local path where the widget settings blob is stored.
pub fn settings_store_path(settings_path: Option<PathBuf>) -> CliResult<PathBuf> {
    if let Some(path) = settings_path {
        return Ok(path);
    }
    if let Ok(path) = std::env::var("LANGBOARD_SETTINGS_PATH") {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }
    if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
        if !base.trim().is_empty() {
            return Ok(PathBuf::from(base)
                .join("langboard")
                .join("widget-settings.json"));
        }
    }
    if let Ok(home) = std::env::var("HOME") {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home).join(".config/langboard/widget-settings.json"));
        }
    }
    Err("unable to resolve settings storage path".into())
}

/// Read the raw custom-settings data from a persisted envelope file.
///
/// A missing, unreadable, or corrupt envelope is treated as "no settings";
/// the degradation is logged, never raised.
pub async fn read_custom_settings(path: &Path) -> Option<String> {
    let contents = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(error) => {
            log::debug!("no settings envelope at {}: {error}", path.display());
            return None;
        }
    };

    match serde_json::from_str::<CustomSettings>(&contents) {
        Ok(envelope) => Some(envelope.data),
        Err(error) => {
            log::warn!(
                "settings envelope at {} is corrupt, ignoring it: {error}",
                path.display()
            );
            None
        }
    }
}

/// Persist a settings envelope, creating parent directories as needed.
pub async fn write_custom_settings(path: &Path, custom: &CustomSettings) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(custom)?;
    tokio::fs::write(path, payload).await?;
    Ok(())
}
