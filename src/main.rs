use anyhow::{Context, Result};
use book_search::api;
use book_search::config::{find_config_file, load_config, write_template, CONFIG_FILE_NAME};
use book_search::facade::{BooksFacade, ProviderReport, ProviderSelection, SearchStatistics};
use book_search::models::{
    AladinQueryType, AladinSearchRequest, AladinSearchTarget, AladinSort, KakaoSearchRequest,
    KakaoSort, KakaoTarget, NaverSearchRequest, NaverSort, SearchRequest,
};
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Book Search - search Aladin, Kakao and Naver book catalogues
#[derive(Parser, Debug)]
#[command(name = "book-search")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search Aladin, Kakao and Naver book catalogues", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show all environment variables
    #[arg(long, global = true)]
    env: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Host to bind to (default: server.host from config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: server.port from config)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Search Aladin
    Aladin {
        /// Search query string
        query: String,

        #[arg(long, value_enum, default_value_t = AladinQueryType::Keyword)]
        query_type: AladinQueryType,

        /// Results per page (1-100)
        #[arg(long, short, default_value_t = 10)]
        max_results: u32,

        /// Result page, starting at 1
        #[arg(long, default_value_t = 1)]
        start: u32,

        #[arg(long, value_enum, default_value_t = AladinSearchTarget::Book)]
        search_target: AladinSearchTarget,

        #[arg(long, value_enum, default_value_t = AladinSort::PublishTime)]
        sort: AladinSort,
    },

    /// Search Kakao
    Kakao {
        /// Search query string
        query: String,

        /// Restrict the search to one field
        #[arg(long, value_enum)]
        target: Option<KakaoTarget>,

        #[arg(long, value_enum, default_value_t = KakaoSort::Accuracy)]
        sort: KakaoSort,

        /// Result page (1-50)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Documents per page (1-50)
        #[arg(long, default_value_t = 10)]
        size: u32,
    },

    /// Search Naver
    Naver {
        /// Search query string
        query: String,

        /// Results per page (1-100)
        #[arg(long, default_value_t = 10)]
        display: u32,

        /// Index of the first result (1-1000)
        #[arg(long, default_value_t = 1)]
        start: u32,

        #[arg(long, value_enum, default_value_t = NaverSort::Sim)]
        sort: NaverSort,
    },

    /// Search every provider concurrently and print a summary
    All {
        /// Search keyword
        keyword: String,

        #[arg(long)]
        skip_aladin: bool,

        #[arg(long)]
        skip_kakao: bool,

        #[arg(long)]
        skip_naver: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Write a configuration template without credentials
    Init {
        /// Where to write the file
        #[arg(long, default_value = CONFIG_FILE_NAME)]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Print all supported environment variables and exit
fn print_env_vars() {
    println!("Book Search - Environment Variables");
    println!();
    println!("Credentials:");
    println!("  ALADIN_TTB_KEY              Aladin TTB key");
    println!("  KAKAO_REST_API_KEY          Kakao REST API key");
    println!("  NAVER_CLIENT_ID             Naver application client id");
    println!("  NAVER_CLIENT_SECRET         Naver application client secret");
    println!();
    println!("Overrides (take precedence over the config file):");
    println!("  BOOK_SEARCH_PROVIDERS__<PROVIDER>__BASE_URL      Provider base URL");
    println!("  BOOK_SEARCH_PROVIDERS__<PROVIDER>__API_KEY       Primary credential");
    println!("  BOOK_SEARCH_PROVIDERS__NAVER__API_SECRET         Naver client secret");
    println!("  BOOK_SEARCH_PROVIDERS__<PROVIDER>__TIMEOUT_SECS  Per-call timeout (default: 10)");
    println!("  BOOK_SEARCH_SERVER__HOST                         HTTP bind host (default: 127.0.0.1)");
    println!("  BOOK_SEARCH_SERVER__PORT                         HTTP port (default: 8080)");
    println!("  BOOK_SEARCH_LOGGING__LEVEL                       Log level (default: info)");
    println!("  BOOK_SEARCH_LOGGING__FORMAT                      'json' for structured logs");
    println!();
    println!("Other Settings:");
    println!("  RUST_LOG                    Rust logging filter (e.g., book_search=debug)");
    println!();
    println!("Example:");
    println!("  export KAKAO_REST_API_KEY=\"your-key-here\"");
    println!("  export BOOK_SEARCH_PROVIDERS__KAKAO__TIMEOUT_SECS=\"5\"");
    std::process::exit(0);
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| format!("book_search={},tower_http={}", level, level)),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
        }))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run_search(facade: &BooksFacade, request: SearchRequest) -> Result<()> {
    let result = facade.search(&request).await?;
    print_json(&result)
}

fn report_summary(report: Option<&ProviderReport>) -> serde_json::Value {
    match report {
        None => json!({ "status": "skipped" }),
        Some(ProviderReport::Success(result)) => json!({
            "status": "success",
            "total": result.total(),
            "items": result.item_count(),
        }),
        Some(ProviderReport::Failure(failure)) => json!({
            "status": "failure",
            "kind": failure.kind,
            "upstreamStatus": failure.status,
            "message": failure.message,
        }),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Show environment variables and exit if requested
    if cli.env {
        print_env_vars();
    }

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let config = load_config(config_path.as_deref()).context("Failed to load configuration")?;

    // Initialize tracing based on verbosity, falling back to the configured level
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let log_level = if cli.quiet { "error" } else { log_level };
    init_tracing(log_level, config.logging.is_json());

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = tokio::net::lookup_host((host.as_str(), port))
                .await?
                .next()
                .with_context(|| format!("Could not resolve {}:{}", host, port))?;

            let facade = BooksFacade::from_config(&config)?;
            api::serve(facade, addr).await?;
        }

        Commands::Aladin {
            query,
            query_type,
            max_results,
            start,
            search_target,
            sort,
        } => {
            let request = AladinSearchRequest::new(query)
                .query_type(query_type)
                .max_results(max_results)
                .start(start)
                .search_target(search_target)
                .sort(sort);
            run_search(&BooksFacade::from_config(&config)?, request.into()).await?;
        }

        Commands::Kakao {
            query,
            target,
            sort,
            page,
            size,
        } => {
            let mut request = KakaoSearchRequest::new(query).sort(sort).page(page).size(size);
            request.target = target;
            run_search(&BooksFacade::from_config(&config)?, request.into()).await?;
        }

        Commands::Naver {
            query,
            display,
            start,
            sort,
        } => {
            let request = NaverSearchRequest::new(query)
                .display(display)
                .start(start)
                .sort(sort);
            run_search(&BooksFacade::from_config(&config)?, request.into()).await?;
        }

        Commands::All {
            keyword,
            skip_aladin,
            skip_kakao,
            skip_naver,
        } => {
            let selection = ProviderSelection {
                aladin: !skip_aladin,
                kakao: !skip_kakao,
                naver: !skip_naver,
            };
            let facade = BooksFacade::from_config(&config)?;
            let result = facade.search_multiple(&keyword, selection).await;

            print_json(&json!({
                "keyword": result.keyword,
                "searchedAt": result.searched_at,
                "statistics": SearchStatistics::from(&result),
                "aladin": report_summary(result.aladin.as_ref()),
                "kakao": report_summary(result.kakao.as_ref()),
                "naver": report_summary(result.naver.as_ref()),
            }))?;
        }

        Commands::Config { command } => match command {
            ConfigCommands::Init { path, force } => {
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                write_template(&path)?;
                if !cli.quiet {
                    eprintln!("Wrote configuration template to {}", path.display());
                }
            }
        },
    }

    Ok(())
}
