use anyhow::{Context, Result};
use book_finder::config::{find_config_file, get_config, load_config, Config};
use book_finder::favorites::{Favorites, JsonFileStore};
use book_finder::models::{
    Favorite, QueryBuilder, SearchMode, SearchQuery, SearchResultSet, SortPreference,
};
use book_finder::session::{SearchSession, Ticket};
use book_finder::sources::{Dispatch, DispatchError, Dispatcher};
use book_finder::ui::{self, Spinner, Status};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Finder - Search Open Library (with Google Books fallback) and keep a favorites list
#[derive(Parser, Debug)]
#[command(name = "book-finder")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search books and keep a list of favorites", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Show all environment variables
    #[arg(long)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Field the query is matched against
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    All,
    Title,
    Author,
    Subject,
}

impl From<Mode> for SearchMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::All => SearchMode::All,
            Mode::Title => SearchMode::Title,
            Mode::Author => SearchMode::Author,
            Mode::Subject => SearchMode::Subject,
        }
    }
}

/// Result ordering
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Sort {
    /// Provider order
    Relevance,
    /// Newest first
    New,
    /// Oldest first
    Old,
}

impl From<Sort> for SortPreference {
    fn from(sort: Sort) -> Self {
        match sort {
            Sort::Relevance => SortPreference::Relevance,
            Sort::New => SortPreference::New,
            Sort::Old => SortPreference::Old,
        }
    }
}

/// Options shared by `search` and `interactive`
#[derive(clap::Args, Debug, Clone)]
struct FilterArgs {
    /// Field to match (default from config: all)
    #[arg(long, short, value_enum)]
    mode: Option<Mode>,

    /// Earliest first-publish year (inclusive)
    #[arg(long)]
    year_start: Option<i32>,

    /// Latest first-publish year (inclusive)
    #[arg(long)]
    year_end: Option<i32>,

    /// Sort order (default from config: relevance)
    #[arg(long, short, value_enum)]
    sort: Option<Sort>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search for books
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page number (1-based)
        #[arg(long, short, default_value_t = 1)]
        page: usize,

        /// Save the result with this key to favorites (repeatable)
        #[arg(long, short)]
        bookmark: Vec<String>,
    },

    /// Read queries line by line; only the latest query's results are shown
    #[command(alias = "i")]
    Interactive {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Manage favorites
    #[command(alias = "fav")]
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show all environment variables
    Env,
}

#[derive(Subcommand, Debug)]
enum FavoritesAction {
    /// List favorites, most recent first
    List,

    /// Add a favorite (moves it to the front if already saved)
    Add(FavoriteArgs),

    /// Add the favorite if missing, otherwise remove it
    Toggle(FavoriteArgs),

    /// Remove a favorite by key
    Remove {
        /// Document key
        key: String,
    },

    /// Remove all favorites
    Clear,
}

#[derive(clap::Args, Debug)]
struct FavoriteArgs {
    /// Document key (e.g. /works/OL45883W)
    key: String,

    /// Book title
    #[arg(long, short)]
    title: String,

    /// Author name (repeatable)
    #[arg(long, short)]
    author: Vec<String>,

    /// Cover image URL
    #[arg(long)]
    cover: Option<String>,
}

impl From<FavoriteArgs> for Favorite {
    fn from(args: FavoriteArgs) -> Self {
        let mut favorite = Favorite::new(args.key, args.title);
        favorite.authors = args.author;
        favorite.cover_url = args.cover;
        favorite
    }
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a config file with default values
    Init {
        /// Destination (default: <config dir>/book-finder/config.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

/// Print all environment variables
fn print_env_vars() {
    println!("Book Finder Environment Variables");
    println!("=================================");
    println!();
    println!("Providers:");
    println!("  GOOGLE_BOOKS_API_KEY                        Google Books API key (optional)");
    println!("  BOOK_FINDER_PROVIDERS__OPEN_LIBRARY_URL     Primary API base URL");
    println!("  BOOK_FINDER_PROVIDERS__GOOGLE_BOOKS_URL     Fallback API base URL");
    println!();
    println!("Search:");
    println!("  BOOK_FINDER_SEARCH__PAGE_SIZE               Results per page (default: 20)");
    println!("  BOOK_FINDER_SEARCH__DEBOUNCE_MS             Interactive debounce delay (default: 400)");
    println!("  BOOK_FINDER_SEARCH__DEFAULT_MODE            all | title | author | subject");
    println!("  BOOK_FINDER_SEARCH__DEFAULT_SORT            relevance | new | old");
    println!();
    println!("HTTP:");
    println!("  BOOK_FINDER_HTTP__TIMEOUT_SECS              Request timeout (default: 30)");
    println!("  BOOK_FINDER_HTTP__CONNECT_TIMEOUT_SECS      Connect timeout (default: 10)");
    println!("  BOOK_FINDER_HTTP__USER_AGENT                Custom User-Agent");
    println!();
    println!("Favorites:");
    println!("  BOOK_FINDER_FAVORITES__PATH                 Favorites file location");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                                    Rust logging level (e.g. debug, info, warn)");
}

fn load_configuration(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        load_config(path).with_context(|| format!("Failed to load {}", path.display()))?
    } else if let Some(path) = find_config_file() {
        load_config(&path).with_context(|| format!("Failed to load {}", path.display()))?
    } else {
        get_config()?
    };

    if let Some(timeout) = cli.timeout {
        config.http.timeout_secs = timeout;
    }
    Ok(config)
}

fn init_tracing(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("book_finder={}", level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.env {
        print_env_vars();
        return Ok(());
    }

    let config = load_configuration(&cli)?;
    init_tracing(&cli, &config);

    match cli.command {
        Some(Commands::Search {
            ref query,
            ref filters,
            page,
            ref bookmark,
        }) => {
            let dispatcher = Dispatcher::from_config(&config);
            let Some(search_query) = build_query(query, filters, page, &config) else {
                if !cli.quiet {
                    ui::print_status(Status::Warning, "Empty query, nothing to search");
                }
                return Ok(());
            };

            let mut favorites = favorites_for_search(&config);

            let spinner = if cli.quiet || !std::io::stderr().is_terminal() {
                Spinner::hidden()
            } else {
                Spinner::new(&format!("Searching for \"{}\"...", search_query.text))
            };
            let started = Instant::now();
            let outcome = dispatcher.search(&search_query).await;
            spinner.finish();

            let dispatch = outcome.map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;
            if dispatch.used_fallback() && !cli.quiet {
                ui::print_status(
                    Status::Warning,
                    &format!(
                        "{} unavailable, showing results from {}",
                        dispatcher.primary().name(),
                        dispatch.provider
                    ),
                );
            }

            if !bookmark.is_empty() {
                let favs = favorites
                    .as_mut()
                    .context("Favorites storage is unavailable")?;
                for key in bookmark {
                    match dispatch.result.find(key) {
                        Some(doc) => {
                            favs.add_document(doc)?;
                            if !cli.quiet {
                                ui::print_status(
                                    Status::Favorite,
                                    &format!("Saved \"{}\" to favorites", doc.title),
                                );
                            }
                        }
                        None => ui::print_status(
                            Status::Warning,
                            &format!("No result with key {} on this page", key),
                        ),
                    }
                }
            }

            output_results(
                &search_query,
                &dispatch,
                started.elapsed(),
                cli.output,
                favorites.as_ref(),
            )?;
        }

        Some(Commands::Interactive { ref filters }) => {
            let dispatcher = Dispatcher::from_config(&config);
            let session = Arc::new(SearchSession::new(Duration::from_millis(
                config.search.debounce_ms,
            )));
            let favorites = open_favorites(&config)?;
            run_interactive(dispatcher, session, favorites, filters.clone(), &config, cli.output)
                .await?;
        }

        Some(Commands::Favorites { action }) => {
            let mut favorites = open_favorites(&config)?;
            match action {
                FavoritesAction::List => output_favorites(&favorites, cli.output)?,
                FavoritesAction::Add(args) => {
                    let favorite = Favorite::from(args);
                    let title = favorite.title.clone();
                    favorites.add(favorite)?;
                    if !cli.quiet {
                        ui::print_status(Status::Favorite, &format!("Saved \"{}\"", title));
                    }
                }
                FavoritesAction::Toggle(args) => {
                    let favorite = Favorite::from(args);
                    let title = favorite.title.clone();
                    let saved = favorites.toggle(favorite)?;
                    if !cli.quiet {
                        let msg = if saved {
                            format!("Saved \"{}\"", title)
                        } else {
                            format!("Removed \"{}\"", title)
                        };
                        ui::print_status(Status::Favorite, &msg);
                    }
                }
                FavoritesAction::Remove { key } => {
                    if favorites.remove(&key)? {
                        if !cli.quiet {
                            ui::print_status(Status::Success, &format!("Removed {}", key));
                        }
                    } else {
                        anyhow::bail!("No favorite with key {}", key);
                    }
                }
                FavoritesAction::Clear => {
                    favorites.clear()?;
                    if !cli.quiet {
                        ui::print_status(Status::Success, "Cleared favorites");
                    }
                }
            }
        }

        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { path, force } => {
                let path = path.unwrap_or_else(|| book_finder::config::config_dir().join("config.toml"));
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                let mut defaults = Config::default();
                defaults.providers.google_books_api_key = None;
                defaults.save_file(&path)?;
                if !cli.quiet {
                    ui::print_status(Status::Success, &format!("Wrote {}", path.display()));
                }
            }
            ConfigAction::Show => {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        },

        Some(Commands::Env) => print_env_vars(),

        None => {
            println!("book-finder {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Use --help for usage information");
            println!();
            println!("Commands:");
            println!("  search <query>     - Search for books");
            println!("  interactive        - Search as you type, one query per line");
            println!("  favorites list     - Show saved favorites");
            println!("  config init        - Write a default config file");
        }
    }

    Ok(())
}

fn build_query(
    text: &str,
    filters: &FilterArgs,
    page: usize,
    config: &Config,
) -> Option<SearchQuery> {
    if let (Some(start), Some(end)) = (filters.year_start, filters.year_end) {
        if start > end {
            tracing::warn!(start, end, "year range is empty; no results can match");
        }
    }

    QueryBuilder::new(text)
        .mode(filters.mode.map(Into::into).unwrap_or(config.search.default_mode))
        .sort(filters.sort.map(Into::into).unwrap_or(config.search.default_sort))
        .year_start(filters.year_start)
        .year_end(filters.year_end)
        .page(page)
        .page_size(config.search.page_size)
        .build()
}

fn open_favorites(config: &Config) -> Result<Favorites<JsonFileStore>> {
    let store = JsonFileStore::new(config.favorites.resolved_path());
    let path = store.path().to_path_buf();
    Favorites::open(store)
        .with_context(|| format!("Failed to open favorites at {}", path.display()))
}

/// Favorites for marking search results; a search still runs without them
fn favorites_for_search(config: &Config) -> Option<Favorites<JsonFileStore>> {
    match open_favorites(config) {
        Ok(favorites) => Some(favorites),
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "favorites unavailable");
            None
        }
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if ui::is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn output_results(
    query: &SearchQuery,
    dispatch: &Dispatch,
    elapsed: Duration,
    format: OutputFormat,
    favorites: Option<&Favorites<JsonFileStore>>,
) -> Result<()> {
    let result: &SearchResultSet = &dispatch.result;
    let is_favorite = |key: &str| favorites.is_some_and(|f| f.contains(key));

    match resolve_format(format) {
        OutputFormat::Json => {
            let body = serde_json::json!({
                "query": query,
                "provider": dispatch.provider,
                "fallback": dispatch.used_fallback(),
                "total": result.total,
                "page": result.page,
                "total_pages": result.total_pages(),
                "documents": result.documents,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        OutputFormat::Plain => {
            for doc in &result.documents {
                let year = doc
                    .first_publish_year
                    .map(|y| y.to_string())
                    .unwrap_or_else(|| "????".to_string());
                let star = if is_favorite(&doc.key) { " ★" } else { "" };
                println!("{} - {} ({}){}", doc.title, doc.author_line(), year, star);
                println!("  Key: {}", doc.key);
                if let Some(ref cover) = doc.cover_url {
                    println!("  Cover: {}", cover);
                }
                println!();
            }
            println!(
                "Page {} of {} ({} total, via {})",
                result.page,
                result.total_pages(),
                result.total,
                dispatch.provider
            );
        }
        OutputFormat::Table => {
            ui::print_search_header(&query.text, result, elapsed);
            if result.documents.is_empty() {
                ui::print_status(Status::Info, "No books matched on this page");
            } else {
                println!("{}", ui::documents_table(&result.documents, is_favorite));
            }
            if result.has_more() {
                println!("Next page: --page {}", result.page + 1);
            }
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}

fn output_favorites(favorites: &Favorites<JsonFileStore>, format: OutputFormat) -> Result<()> {
    match resolve_format(format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(favorites.entries())?);
        }
        OutputFormat::Plain => {
            for fav in favorites.entries() {
                println!("{} - {} [{}]", fav.title, fav.authors.join(", "), fav.key);
            }
        }
        OutputFormat::Table => {
            ui::print_section(&format!("Favorites ({})", favorites.len()));
            if favorites.is_empty() {
                ui::print_status(Status::Info, "No favorites yet");
            } else {
                println!("{}", ui::favorites_table(favorites.entries()));
            }
        }
        OutputFormat::Auto => unreachable!(),
    }
    Ok(())
}

type Outcome = (Ticket, SearchQuery, Duration, Result<Dispatch, DispatchError>);

/// Interactive loop: every input line commits a query. Lines starting with
/// `+` bookmark a key from the results currently on screen.
async fn run_interactive(
    dispatcher: Dispatcher,
    session: Arc<SearchSession>,
    mut favorites: Favorites<JsonFileStore>,
    filters: FilterArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Outcome>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_task: Option<tokio::task::JoinHandle<()>> = None;
    let mut shown: Option<Dispatch> = None;

    let show = |outcome: Outcome, favorites: &Favorites<JsonFileStore>, shown: &mut Option<Dispatch>| {
        let (ticket, query, elapsed, result) = outcome;
        let Some(result) = session.accept(ticket, result) else {
            return;
        };
        match result {
            Ok(dispatch) => {
                if let Err(e) = output_results(&query, &dispatch, elapsed, format, Some(favorites)) {
                    ui::print_status(Status::Error, &e.to_string());
                }
                *shown = Some(dispatch);
            }
            Err(e) => ui::print_status(Status::Error, &format!("Search failed: {}", e)),
        }
    };

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };

                if let Some(key) = line.trim().strip_prefix('+') {
                    let key = key.trim();
                    match shown.as_ref().and_then(|d| d.result.find(key)) {
                        Some(doc) => {
                            favorites.add_document(doc)?;
                            ui::print_status(Status::Favorite, &format!("Saved \"{}\"", doc.title));
                        }
                        None => ui::print_status(Status::Warning, &format!("No result with key {}", key)),
                    }
                    continue;
                }

                let Some(query) = build_query(&line, &filters, 1, config) else {
                    continue;
                };

                let ticket = session.commit();
                let session = session.clone();
                let dispatcher = dispatcher.clone();
                let tx = tx.clone();
                last_task = Some(tokio::spawn(async move {
                    if !session.debounce(ticket).await {
                        return;
                    }
                    let started = Instant::now();
                    let result = dispatcher.search(&query).await;
                    let _ = tx.send((ticket, query, started.elapsed(), result));
                }));
            }
            Some(outcome) = rx.recv() => show(outcome, &favorites, &mut shown),
        }
    }

    // Input closed: let the latest query finish, then show whatever is current
    finish_task(last_task).await;
    while let Ok(outcome) = rx.try_recv() {
        show(outcome, &favorites, &mut shown);
    }
    Ok(())
}

/// Wait for a search task; false if it panicked or was cancelled
async fn finish_task(task: Option<tokio::task::JoinHandle<()>>) -> bool {
    let Some(task) = task else {
        return true;
    };
    match task.await {
        Ok(()) => true,
        Err(e) => {
            ui::print_status(Status::Error, &format!("Search task failed: {}", e));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_version() {
        use clap::CommandFactory;
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["book-finder"]);
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
        assert_eq!(cli.output, OutputFormat::Auto);
        assert!(cli.timeout.is_none());
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_search_command() {
        let cli = Cli::parse_from(["book-finder", "search", "dune"]);
        match &cli.command {
            Some(Commands::Search {
                query,
                page,
                filters,
                bookmark,
            }) => {
                assert_eq!(query, "dune");
                assert_eq!(*page, 1);
                assert!(filters.mode.is_none());
                assert!(bookmark.is_empty());
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_cli_search_with_options() {
        let cli = Cli::parse_from([
            "book-finder",
            "search",
            "dune",
            "--mode",
            "title",
            "--year-start",
            "2000",
            "--year-end",
            "2020",
            "--sort",
            "old",
            "--page",
            "2",
            "--bookmark",
            "/works/OL1W",
        ]);
        match &cli.command {
            Some(Commands::Search {
                filters,
                page,
                bookmark,
                ..
            }) => {
                assert_eq!(filters.mode, Some(Mode::Title));
                assert_eq!(filters.year_start, Some(2000));
                assert_eq!(filters.year_end, Some(2020));
                assert_eq!(filters.sort, Some(Sort::Old));
                assert_eq!(*page, 2);
                assert_eq!(bookmark, &vec!["/works/OL1W".to_string()]);
            }
            _ => panic!("Expected Search command"),
        }
    }

    #[test]
    fn test_build_query_uses_config_defaults() {
        let mut config = Config::default();
        config.search.default_mode = SearchMode::Author;
        config.search.page_size = 5;

        let filters = FilterArgs {
            mode: None,
            year_start: None,
            year_end: None,
            sort: Some(Sort::New),
        };
        let query = build_query("  le guin ", &filters, 0, &config).unwrap();
        assert_eq!(query.text, "le guin");
        assert_eq!(query.mode, SearchMode::Author);
        assert_eq!(query.sort, SortPreference::New);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 5);

        assert!(build_query("   ", &filters, 1, &config).is_none());
    }

    #[test]
    fn test_cli_favorites_add() {
        let cli = Cli::parse_from([
            "book-finder",
            "favorites",
            "add",
            "/works/OL1W",
            "--title",
            "Dune",
            "--author",
            "Frank Herbert",
        ]);
        match cli.command {
            Some(Commands::Favorites {
                action: FavoritesAction::Add(args),
            }) => {
                let fav = Favorite::from(args);
                assert_eq!(fav.key, "/works/OL1W");
                assert_eq!(fav.authors, vec!["Frank Herbert".to_string()]);
            }
            _ => panic!("Expected Favorites Add command"),
        }
    }

    #[test]
    fn test_cli_config_init() {
        let cli = Cli::parse_from(["book-finder", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init { force: true, .. }
            })
        ));
    }

    #[test]
    fn test_unreadable_favorites_do_not_block_search() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        // A directory cannot be read as the favorites file
        config.favorites.path = Some(dir.path().to_path_buf());

        assert!(open_favorites(&config).is_err());
        assert!(favorites_for_search(&config).is_none());

        config.favorites.path = Some(dir.path().join("favorites.json"));
        assert!(favorites_for_search(&config).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_finish_task_reports_panic() {
        assert!(finish_task(None).await);

        let ok = tokio::spawn(async {});
        assert!(finish_task(Some(ok)).await);

        let failed = tokio::spawn(async { panic!("search blew up") });
        assert!(!finish_task(Some(failed)).await);
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["book-finder", "favorites", "list", "-o", "json", "-q"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.quiet);
    }
}
