//! reelscout - TMDB movie search CLI.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use reelscout_api::tmdb::{LocalTmdbApi, TmdbClient};
use reelscout_db::{KvStore, open_db};
use reelscout_search::input::fetch_suggestions;
use reelscout_search::item::ItemIdentity;
use reelscout_search::{
    ERROR_TITLE, ErrorScreen, FetchAction, HistoryStore, ResultSnapshot, SearchCategory,
    SearchContext, SearchDispatcher, SearchError, SearchMode, SearchResultController,
    SearchTarget, SuggestionItem, spawn_search_results,
};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};

/// Binary name used for shell completions.
const BIN_NAME: &str = "reelscout";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "reelscout", about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Search movie titles, keywords, or people by text.
    Search(SearchArgs),
    /// Browse movies featuring a person or tagged with a keyword.
    Discover(DiscoverArgs),
    /// Show "search as" options and suggestions for typed text.
    Suggest(SuggestArgs),
    /// List TMDB movie genres.
    Genres,
    /// Recent-search history.
    History(HistoryCommand),
    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// What typed text is searched as.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SearchAs {
    /// Movie titles.
    Keyword,
    /// TMDB keywords.
    Hashtag,
    /// People.
    Actor,
}

impl SearchAs {
    /// Returns true if `item` is the option row for this kind.
    const fn matches(self, item: &SuggestionItem) -> bool {
        matches!(
            (self, item),
            (Self::Keyword, SuggestionItem::Keyword(_))
                | (Self::Hashtag, SuggestionItem::Hashtag(_))
                | (Self::Actor, SuggestionItem::Actor(_))
        )
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Text to search for.
    query: String,

    /// Search the text as movie titles, keywords, or people.
    #[arg(long = "as", value_enum, default_value_t = SearchAs::Keyword)]
    kind: SearchAs,

    /// Number of result pages to load.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

/// Arguments for the `discover` subcommand.
#[derive(clap::Args)]
#[command(group(
    clap::ArgGroup::new("filter")
        .required(true)
        .args(["cast", "keyword"])
))]
struct DiscoverArgs {
    /// TMDB person ID to filter by cast.
    #[arg(long)]
    cast: Option<u64>,

    /// TMDB keyword ID to filter by.
    #[arg(long)]
    keyword: Option<u64>,

    /// Display name for the screen title.
    #[arg(long)]
    name: Option<String>,

    /// Number of result pages to load.
    #[arg(long, default_value_t = 1)]
    pages: u32,
}

/// Arguments for the `suggest` subcommand.
#[derive(clap::Args)]
struct SuggestArgs {
    /// Typed text.
    text: String,
}

/// Arguments for the `history` subcommand.
#[derive(clap::Args)]
struct HistoryCommand {
    /// History subcommand to run.
    #[command(subcommand)]
    command: HistorySubcommands,
}

/// Available history subcommands.
#[derive(Subcommand)]
enum HistorySubcommands {
    /// List recent searches, newest first.
    List,
    /// Remove every recent search.
    Clear,
    /// Record text as a recent title search.
    Add {
        /// Text to record.
        text: String,
    },
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from the `TMDB_API_TOKEN` environment variable.
///
/// # Errors
///
/// Returns an error if `TMDB_API_TOKEN` is not set or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    let api_token = std::env::var("TMDB_API_TOKEN")
        .context("TMDB_API_TOKEN environment variable is required")?;

    TmdbClient::builder()
        .api_token(api_token)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .timeout(config.timeout())
        .build()
        .context("failed to build TMDB client")
}

/// Opens the recent-search history in the local database.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or read.
fn open_history(dir: Option<&PathBuf>) -> Result<HistoryStore<KvStore>> {
    let conn = open_db(dir).context("failed to open database")?;
    HistoryStore::open(KvStore::new(conn)).context("failed to load search history")
}

/// Short label for a row identity.
fn identity_label(identity: &ItemIdentity) -> String {
    match identity {
        ItemIdentity::Movie(id) | ItemIdentity::Person(id) | ItemIdentity::Hashtag(id) => {
            id.to_string()
        }
        ItemIdentity::Text(..) => String::from("-"),
    }
}

/// Logs one input screen row.
fn render_suggestion(item: &SuggestionItem) {
    tracing::info!(
        "{}\t{}\t\t{}",
        identity_label(&item.identity()),
        item.title().unwrap_or_default(),
        item.subtitle().unwrap_or_default(),
    );
}

/// Logs a result screen.
///
/// # Errors
///
/// Returns an error if the screen ended in a failed fetch.
fn render_results(snapshot: &ResultSnapshot) -> Result<()> {
    if snapshot.error == Some(SearchError::FetchFailed) {
        anyhow::bail!(
            "{ERROR_TITLE}: {}",
            SearchError::FetchFailed.message(ErrorScreen::Results)
        );
    }

    tracing::info!("{}", snapshot.title);
    if snapshot.items.is_empty() {
        tracing::info!(
            "{ERROR_TITLE}: {}",
            SearchError::NoData.message(ErrorScreen::Results)
        );
        return Ok(());
    }

    tracing::info!(
        "Page {}/{} ({} results)",
        snapshot.pagination.current_page,
        snapshot.pagination.total_pages,
        snapshot.pagination.total_results,
    );
    tracing::info!("ID\tTitle\t\t\tDetail");
    for item in &snapshot.items {
        tracing::info!(
            "{}\t{}\t\t{}",
            identity_label(&item.identity()),
            item.title().unwrap_or_default(),
            item.subtitle().unwrap_or_default(),
        );
    }
    Ok(())
}

/// Runs a result screen for `target` and loads up to `pages` pages.
///
/// # Errors
///
/// Returns an error if the screen task panics or a fetch fails.
#[instrument(skip_all)]
async fn run_result_screen(
    client: TmdbClient,
    target: SearchTarget,
    config: &AppConfig,
    pages: u32,
) -> Result<()> {
    let dispatcher = SearchDispatcher::new(target)
        .with_people_options(config.tmdb.language.clone(), config.tmdb.include_adult);
    let controller = SearchResultController::new(dispatcher)
        .with_load_more_threshold(config.search.load_more_threshold);
    let (handle, task) = spawn_search_results(Arc::new(client), controller);

    let mut snapshot = handle.fetch(FetchAction::Refresh).await;
    for _ in 1..pages {
        if snapshot.error.is_some() || !snapshot.pagination.has_more() {
            break;
        }
        snapshot = handle.fetch(FetchAction::LoadMore).await;
    }

    drop(handle);
    task.await.context("result screen task failed")?;
    render_results(&snapshot)
}

/// Runs the `search` subcommand.
///
/// The chosen "search as" option is recorded in history like a selection
/// on the input screen.
///
/// # Errors
///
/// Returns an error if config, client setup, or the search fails.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let option = SuggestionItem::search_options(&args.query)
        .into_iter()
        .find(|item| args.kind.matches(item))
        .context("no search option for the requested kind")?;
    let Some(target) = option.search_target() else {
        tracing::info!(
            "{ERROR_TITLE}: {}",
            SearchError::NoData.message(ErrorScreen::Results)
        );
        return Ok(());
    };

    match open_history(dir) {
        Ok(mut history) => {
            if let Err(e) = history.record_selection(&option) {
                tracing::warn!(error = %e, "failed to record search history");
            }
        }
        Err(e) => tracing::warn!(error = %e, "search history unavailable"),
    }

    run_result_screen(client, target, &config, args.pages).await
}

/// Runs the `discover` subcommand.
///
/// # Errors
///
/// Returns an error if config, client setup, or the request fails.
#[instrument(skip_all)]
async fn run_discover(args: &DiscoverArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let category = match (args.cast, args.keyword) {
        (Some(id), _) => SearchCategory::Actor(SearchContext::new(Some(id), args.name.clone())),
        (None, Some(id)) => {
            SearchCategory::Hashtag(SearchContext::new(Some(id), args.name.clone()))
        }
        (None, None) => anyhow::bail!("either --cast or --keyword is required"),
    };
    let target = SearchTarget {
        category,
        mode: SearchMode::Discovery,
        query: None,
    };

    run_result_screen(client, target, &config, args.pages).await
}

/// Runs the `suggest` subcommand.
///
/// # Errors
///
/// Returns an error if config, client setup, or either suggestion request fails.
#[instrument(skip_all)]
async fn run_suggest(args: &SuggestArgs, dir: Option<&PathBuf>) -> Result<()> {
    // Empty text shows history instead of suggestions.
    if args.text.is_empty() {
        return run_history_list(dir);
    }

    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    tracing::info!("Search as:");
    for option in SuggestionItem::search_options(&args.text) {
        render_suggestion(&option);
    }

    let suggestions = fetch_suggestions(&client, &args.text, &config.input_options())
        .await
        .context("TMDB suggestion requests failed")?;
    tracing::info!("Suggestions ({}):", suggestions.len());
    for item in &suggestions {
        render_suggestion(item);
    }

    Ok(())
}

/// Runs the `genres` subcommand.
///
/// # Errors
///
/// Returns an error if config, client setup, or the request fails.
#[instrument(skip_all)]
async fn run_genres(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let response = client
        .movie_genres(&config.tmdb.language)
        .await
        .context("TMDB genre/movie/list request failed")?;

    tracing::info!("ID\tName");
    for genre in &response.genres {
        tracing::info!("{}\t{}", genre.id, genre.name);
    }

    Ok(())
}

/// Runs the `history list` subcommand.
///
/// # Errors
///
/// Returns an error if the database cannot be opened.
#[instrument(skip_all)]
fn run_history_list(dir: Option<&PathBuf>) -> Result<()> {
    let history = open_history(dir)?;
    let items = history.list();

    if items.is_empty() {
        tracing::info!(
            "{ERROR_TITLE}: {}",
            SearchError::NoData.message(ErrorScreen::Input)
        );
        return Ok(());
    }

    tracing::info!("Recent searches ({}):", items.len());
    for item in &items {
        render_suggestion(item);
    }

    Ok(())
}

/// Runs the `history clear` subcommand.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or written.
#[instrument(skip_all)]
fn run_history_clear(dir: Option<&PathBuf>) -> Result<()> {
    let mut history = open_history(dir)?;
    history.clear().context("failed to clear search history")?;
    tracing::info!("Search history cleared");
    Ok(())
}

/// Runs the `history add` subcommand.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or written.
#[instrument(skip_all)]
fn run_history_add(text: &str, dir: Option<&PathBuf>) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("history text must not be empty");
    }
    let mut history = open_history(dir)?;
    history
        .record_keyword(text)
        .context("failed to record search history")?;
    tracing::info!("Recorded \"{text}\"");
    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    clap_complete::generate(args.shell, &mut cmd, BIN_NAME, &mut std::io::stdout());
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Discover(args) => run_discover(&args, dir).await,
        Commands::Suggest(args) => run_suggest(&args, dir).await,
        Commands::Genres => run_genres(dir).await,
        Commands::History(history) => match history.command {
            HistorySubcommands::List => run_history_list(dir),
            HistorySubcommands::Clear => run_history_clear(dir),
            HistorySubcommands::Add { text } => run_history_add(&text, dir),
        },
        Commands::Completions(args) => {
            run_completions(&args);
            Ok(())
        }
    }
}
