//! whatmovie - random movie suggestions from a TMDB backend proxy.

/// Application configuration (TOML).
mod config;
/// Plain-text output for one-shot subcommands.
mod report;
/// Terminal UI.
mod tui;

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;
use whatmovie_api::backend::{BackendClient, DEFAULT_BASE_URL, MovieApi};
use whatmovie_picker::movie::normalize_movies;
use whatmovie_picker::{
    FilterCriteria, MinRating, MovieCard, PickerError, PickerState, PoolManager, search_addon,
};

use crate::config::{AppConfig, resolve_config_path};

/// Environment variable overriding the configured backend URL.
const BASE_URL_ENV: &str = "WHATMOVIE_BASE_URL";

/// CLI argument parser.
#[derive(Parser)]
#[command(name = "whatmovie", about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Backend proxy URL (default: $WHATMOVIE_BASE_URL, then config, then http://localhost:3000/).
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the popular movies feed.
    Popular,
    /// List one page of a filtered search.
    Search(SearchArgs),
    /// Look up the runtime of a movie.
    Runtime(MovieIdArgs),
    /// Look up the first trailer of a movie.
    Trailer(MovieIdArgs),
    /// Pick a movie and print it with its runtime and trailer.
    Suggest(FilterArgs),
    /// Browse suggestions in an interactive terminal UI.
    Pick(FilterArgs),
    /// List the genre IDs accepted by --genres.
    Genres,
    /// Print a shell completion script.
    Completions(CompletionsArgs),
}

/// Filter flags shared by `search`, `suggest` and `pick`.
#[derive(clap::Args)]
struct FilterArgs {
    /// Earliest release year (e.g. 1990).
    #[arg(long)]
    year_from: Option<u32>,

    /// Latest release year (e.g. 1999).
    #[arg(long)]
    year_to: Option<u32>,

    /// Minimum vote average, 0-10 with one decimal (e.g. 7.5).
    #[arg(long)]
    min_rating: Option<MinRating>,

    /// Comma-separated genre IDs (e.g. "28,12"). See `whatmovie genres`.
    #[arg(long, value_delimiter = ',')]
    genres: Vec<u32>,
}

impl FilterArgs {
    /// Returns `true` if no filter flag was given.
    const fn is_empty(&self) -> bool {
        self.year_from.is_none()
            && self.year_to.is_none()
            && self.min_rating.is_none()
            && self.genres.is_empty()
    }

    /// Validates the flags into criteria.
    ///
    /// # Errors
    ///
    /// Returns an error if a year is malformed or the range is inverted.
    fn to_criteria(&self) -> Result<FilterCriteria> {
        FilterCriteria::new(
            self.year_from,
            self.year_to,
            self.min_rating,
            self.genres.clone(),
        )
        .context("invalid filter")
    }

    /// Uses the flags if any were given, otherwise the configured filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the flags or the configured filter are invalid.
    fn resolve(&self, config: &AppConfig) -> Result<FilterCriteria> {
        if self.is_empty() {
            config.initial_criteria()
        } else {
            self.to_criteria()
        }
    }
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Filter flags.
    #[command(flatten)]
    filter: FilterArgs,

    /// Result page (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `runtime` and `trailer` subcommands.
#[derive(clap::Args)]
struct MovieIdArgs {
    /// TMDB movie ID (e.g. 27205).
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `completions` subcommand.
#[derive(clap::Args)]
struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    shell: Shell,
}

/// Picks the backend URL: flag, then environment, then config, then default.
///
/// The path always ends with `/` so endpoint paths join below it.
///
/// # Errors
///
/// Returns an error if the chosen value is not an absolute `http`/`https` URL.
fn resolve_base_url(
    flag: Option<&str>,
    env: Option<String>,
    config: &AppConfig,
) -> Result<Url> {
    let raw = flag
        .map(String::from)
        .or(env)
        .or_else(|| config.backend.base_url.clone())
        .unwrap_or_else(|| String::from(DEFAULT_BASE_URL));

    let mut url = Url::parse(&raw).with_context(|| format!("invalid backend URL: {raw}"))?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        bail!("invalid backend URL: {raw} (expected an http:// or https:// URL)");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Builds a backend client.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all, fields(base_url = %base_url))]
fn build_backend_client(base_url: Url) -> Result<BackendClient> {
    BackendClient::builder()
        .base_url(base_url)
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build backend client")
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_popular(client: &BackendClient) -> Result<()> {
    let response = client
        .popular()
        .await
        .context("popular request failed")?;

    let movies = normalize_movies(&response.results);
    report::log_movies(&movies, response.total_pages);
    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the flags are invalid, the request fails, or
/// nothing matched.
#[instrument(skip_all)]
async fn run_search(client: &BackendClient, args: &SearchArgs) -> Result<()> {
    let criteria = args.filter.to_criteria()?;
    let addon = search_addon(&criteria, args.page);
    tracing::debug!(url_addon = %addon, "searching");

    let response = client
        .search(&addon)
        .await
        .context("search request failed")?;

    if response.results.is_empty() {
        return Err(PickerError::NoResults.into());
    }
    let movies = normalize_movies(&response.results);
    report::log_movies(&movies, Some(response.total_pages));
    Ok(())
}

/// Runs the `runtime` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_runtime(client: &BackendClient, args: &MovieIdArgs) -> Result<()> {
    let response = client
        .runtime(args.id)
        .await
        .context("runtime request failed")?;

    report::log_runtime(args.id, response.runtime);
    Ok(())
}

/// Runs the `trailer` subcommand.
///
/// # Errors
///
/// Returns an error if the request fails.
#[instrument(skip_all)]
async fn run_trailer(client: &BackendClient, args: &MovieIdArgs) -> Result<()> {
    let response = client
        .trailer(args.id)
        .await
        .context("trailer request failed")?;

    match response.first_key() {
        Some(key) => tracing::info!(
            "{}: {}",
            args.id,
            whatmovie_picker::display::trailer_url(key)
        ),
        None => tracing::info!("{}: no trailer", args.id),
    }
    Ok(())
}

/// Runs the `suggest` subcommand: one generate cycle, then the card.
///
/// # Errors
///
/// Returns the user-facing [`PickerError`] if no movie could be fetched.
#[instrument(skip_all, fields(criteria = %criteria))]
async fn run_suggest(client: BackendClient, criteria: FilterCriteria) -> Result<()> {
    let mut manager = PoolManager::new(Arc::new(client));
    let mut state = PickerState::new(criteria);

    manager.generate(&mut state).await?;
    manager.settle(&mut state).await;

    let card = MovieCard::from_selection(state.selection()).context("no movie selected")?;
    report::log_card(&card);
    Ok(())
}

/// Runs the `completions` subcommand.
fn run_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_owned();
    clap_complete::generate(args.shell, &mut cmd, name, &mut io::stdout());
}

/// Installs the tracing subscriber.
///
/// `quiet` drops the console layer (the TUI owns the terminal); spans
/// still reach the OTLP exporter when it is enabled.
fn init_tracing(quiet: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = (!quiet).then(|| tracing_subscriber::fmt::layer().with_target(false));
    let registry = tracing_subscriber::registry().with(env_filter).with(fmt_layer);

    #[cfg(not(feature = "otel"))]
    registry.init();

    #[cfg(feature = "otel")]
    {
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

        registry.with(otel_layer).init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Pick(_)));

    match cli.command {
        Commands::Genres => {
            report::log_genres();
            return Ok(());
        }
        Commands::Completions(ref args) => {
            run_completions(args);
            return Ok(());
        }
        _ => {}
    }

    let config_path = resolve_config_path(cli.dir.as_ref()).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;
    let env_base_url = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.is_empty());
    let base_url = resolve_base_url(cli.base_url.as_deref(), env_base_url, &config)?;
    let client = build_backend_client(base_url)?;

    match cli.command {
        Commands::Popular => run_popular(&client).await,
        Commands::Search(args) => run_search(&client, &args).await,
        Commands::Runtime(args) => run_runtime(&client, &args).await,
        Commands::Trailer(args) => run_trailer(&client, &args).await,
        Commands::Suggest(args) => run_suggest(client, args.resolve(&config)?).await,
        Commands::Pick(args) => {
            let criteria = args.resolve(&config)?;
            tui::run_picker(Arc::new(client), criteria)
                .await
                .context("picker TUI failed")
        }
        Commands::Genres | Commands::Completions(_) => Ok(()),
    }
}
