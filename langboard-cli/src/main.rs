#![deny(missing_docs)]
//! Langboard command-line interface.
//!
//! Renders per-repository language composition for a hosted project, either
//! as a full board page or as the embeddable widget table, and manages the
//! widget's persisted settings.

mod gateway;
mod widget_host;

use clap::{Args, Parser, Subcommand, ValueEnum};
use langboard_core::{
    EMPTY_SLOT, HostSettings, SaveStatus, SettingsLoad, SettingsStore, SortOrder, WidgetRow,
    WidgetSettings, WidgetStatus, board_cards, render_board_markdown, render_json,
    render_widget_markdown,
};
use std::fmt::Write;
use std::path::PathBuf;
use std::time::Duration;

use gateway::{AnalyticsClient, DEFAULT_TIMEOUT_SECS, RestAnalyticsClient, resolve_project_context};
use widget_host::{
    BoardWidget, WidgetLifecycle, read_custom_settings, settings_store_path, write_custom_settings,
};

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(name = "langboard", version, about = "Language breakdown board CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct ConnectionArgs {
    /// Base URL of the host organization, e.g. https://dev.example.com/acme.
    #[arg(long, env = "LANGBOARD_ORG_URL")]
    org_url: Option<String>,
    /// Project name or identifier to resolve analytics for.
    #[arg(long, env = "LANGBOARD_PROJECT")]
    project: Option<String>,
    /// Personal access token for the analytics service.
    #[arg(long, env = "LANGBOARD_TOKEN")]
    token: Option<String>,
    /// Request timeout in seconds for analytics calls.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

#[derive(Args, Clone)]
struct SettingsArgs {
    /// Override the widget settings file path.
    #[arg(long)]
    settings_path: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Output format for view data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the view to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum SortColumn {
    Name,
    Languages,
}

impl SortColumn {
    fn index(self) -> usize {
        match self {
            SortColumn::Name => 0,
            SortColumn::Languages => 1,
        }
    }
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum SortDirection {
    Asc,
    Desc,
}

impl From<SortDirection> for SortOrder {
    fn from(value: SortDirection) -> Self {
        match value {
            SortDirection::Asc => SortOrder::Ascending,
            SortDirection::Desc => SortOrder::Descending,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the full-page language breakdown board.
    Board {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Render the dashboard widget table.
    Widget {
        #[command(flatten)]
        connection: ConnectionArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        report: OutputArgs,
        /// Column to sort the table by.
        #[arg(long, value_enum)]
        sort_by: Option<SortColumn>,
        /// Sort direction.
        #[arg(long, value_enum, default_value_t = SortDirection::Asc)]
        order: SortDirection,
        /// Widget title.
        #[arg(long, default_value = "Language Breakdown")]
        title: String,
    },
    /// Update and persist widget settings.
    Configure {
        #[command(flatten)]
        settings: SettingsArgs,
        /// Settings fields as key=value pairs; values parse as JSON when
        /// possible, otherwise as strings.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Board { connection, report } => run_board(connection, report).await?,
        Commands::Widget {
            connection,
            settings,
            report,
            sort_by,
            order,
            title,
        } => run_widget(connection, settings, report, sort_by, order, title).await?,
        Commands::Configure { settings, set } => run_configure(settings.settings_path, set).await?,
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_board(connection: ConnectionArgs, report: OutputArgs) -> CliResult<()> {
    let context = match resolve_project_context(
        connection.org_url.as_deref(),
        connection.project.as_deref(),
    ) {
        Ok(context) => context,
        Err(error) => {
            // No partial initialization: the page stays blank.
            log::error!("board initialization failed: {error}");
            return Ok(());
        }
    };

    let client = RestAnalyticsClient::new(
        &context.org_url,
        connection.token.clone(),
        Duration::from_secs(connection.timeout_secs),
    )?;
    let metrics = match client.project_language_analytics(&context.project).await {
        Ok(metrics) => metrics,
        Err(error) => {
            log::error!("board load failed: {error}");
            return Err(error.into());
        }
    };
    log::info!(
        "board loaded with {} repositories",
        metrics.repository_language_analytics.len()
    );

    let contents = match report.format {
        OutputFormat::Text => render_board_text(&metrics),
        OutputFormat::Markdown => render_board_markdown(&metrics),
        OutputFormat::Json => render_json(&board_cards(&metrics))?,
    };
    emit_output(&report, contents).await
}

async fn run_widget(
    connection: ConnectionArgs,
    settings: SettingsArgs,
    report: OutputArgs,
    sort_by: Option<SortColumn>,
    order: SortDirection,
    title: String,
) -> CliResult<()> {
    let context = match resolve_project_context(
        connection.org_url.as_deref(),
        connection.project.as_deref(),
    ) {
        Ok(context) => context,
        Err(error) => {
            log::error!("widget initialization failed: {error}");
            return Ok(());
        }
    };

    let client = RestAnalyticsClient::new(
        &context.org_url,
        connection.token.clone(),
        Duration::from_secs(connection.timeout_secs),
    )?;

    let path = settings_store_path(settings.settings_path)?;
    let custom_data = read_custom_settings(&path).await;
    let host_settings = HostSettings {
        name: title,
        custom_data,
    };

    let mut widget = BoardWidget::new(client, context.project.clone());
    match widget.load(&host_settings).await {
        WidgetStatus::Success => log::info!("widget loaded for project {}", context.project),
        WidgetStatus::Failure(message) => return Err(message.into()),
    }

    if let Some(column) = sort_by {
        widget.table_mut().sort_by(column.index(), order.into());
    }

    let contents = match report.format {
        OutputFormat::Text => render_widget_text(widget.title(), widget.table().rows()),
        OutputFormat::Markdown => render_widget_markdown(widget.title(), widget.table().rows()),
        OutputFormat::Json => render_json(widget.table().rows())?,
    };
    emit_output(&report, contents).await
}

async fn run_configure(settings_path: Option<PathBuf>, set: Vec<String>) -> CliResult<()> {
    let path = settings_store_path(settings_path)?;
    let mut store = SettingsStore::new();

    let raw = read_custom_settings(&path).await;
    let outcome = store.load(raw.as_deref());
    if let Some(corruption) = outcome.corruption() {
        log::warn!("persisted widget settings were corrupt, starting empty: {corruption}");
    }
    if outcome == SettingsLoad::DefaultedEmpty {
        log::info!("no persisted widget settings, starting empty");
    }

    if set.is_empty() {
        println!("{}", serde_json::to_string_pretty(store.settings())?);
        return Ok(());
    }

    let partial = parse_set_pairs(&set)?;
    let pending = store.update(&partial)?;
    log::info!("pending settings change: {}", pending.data);

    match store.save() {
        SaveStatus::Valid(custom) => {
            write_custom_settings(&path, &custom).await?;
            println!("Settings saved to {}", path.display());
            Ok(())
        }
        SaveStatus::Invalid => Err("settings were rejected by validation".into()),
    }
}

fn parse_set_pairs(pairs: &[String]) -> CliResult<WidgetSettings> {
    let mut partial = WidgetSettings::default();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(format!("invalid --set value (expected KEY=VALUE): {pair}").into());
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("invalid --set value (empty key): {pair}").into());
        }
        let value = serde_json::from_str::<serde_json::Value>(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        partial.set(key, value);
    }
    Ok(partial)
}

fn render_board_text(metrics: &langboard_core::ProjectLanguageAnalytics) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{}", langboard_core::board_title(metrics));
    let _ = writeln!(output);
    for card in board_cards(metrics) {
        let _ = writeln!(output, "Repository: {}", card.name);
        let filled: Vec<&str> = card
            .top_languages
            .iter()
            .filter(|cell| cell.as_str() != EMPTY_SLOT)
            .map(String::as_str)
            .collect();
        if filled.is_empty() {
            let _ = writeln!(output, "- no languages above the display threshold");
        } else {
            for cell in filled {
                let _ = writeln!(output, "- {cell}");
            }
        }
        let _ = writeln!(output);
    }
    output
}

fn render_widget_text(title: &str, rows: &[WidgetRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{title}");
    let _ = writeln!(output);
    for row in rows {
        let _ = writeln!(output, "{}: {}", row.name, row.languages);
    }
    output
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}
