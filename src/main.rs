//! List Jiggler - shareable, sortable lists that live in a URL
//!
//! A CLI tool that creates and reorders URL-encoded lists and merges
//! several orderings of the same list into a consensus ranking.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (invalid link, config, I/O, etc.)
//!   2 - Compared lists do not contain the same items

use anyhow::{anyhow, Context, Result};
use listjiggler::cli::{Args, Command, ListFormat, ReportFormat};
use listjiggler::codec::{payload_from_link, share_link};
use listjiggler::compare::{compare_links, CompareOptions};
use listjiggler::config::{Config, CONFIG_FILE_NAME};
use listjiggler::editing::parse_bulk_input;
use listjiggler::models::ListPayload;
use listjiggler::ranking::{rbo, validate};
use listjiggler::{export, preview, report};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Load configuration before logging so `[general] verbose` applies
    let (config, config_source) = match prepare_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(config.log_level(args.quiet));

    debug!("List Jiggler v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    match config_source {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => debug!("No config file loaded, using defaults"),
    }

    match run(args.command, &config) {
        Ok(exit_code) => {
            std::process::exit(exit_code);
        }
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle init-config: generate a default .listjiggler.toml.
fn handle_init_config() -> Result<i32> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        return Ok(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to customize the base URL, persistence, and previews.");
    Ok(0)
}

/// Initialize logging at `level`.
///
/// Logs go to stderr so stdout stays clean for links and reports.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load the config file, apply CLI overrides and validate the result.
///
/// Also returns the path the config was read from, if any.
fn prepare_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    let (mut config, source) = load_config(args)?;
    config.merge_with_args(args);
    config.validate()?;
    Ok((config, source))
}

/// Dispatch the subcommand. Returns the process exit code.
fn run(command: Command, config: &Config) -> Result<i32> {
    match command {
        Command::Create {
            title,
            items,
            bulk,
            bulk_file,
        } => handle_create(config, title, items, bulk, bulk_file),
        Command::Show { link, format } => handle_show(&link, format),
        Command::Move { link, from, to } => handle_move(config, &link, from, to),
        Command::Compare {
            links,
            input,
            title,
            format,
            output,
            ..
        } => handle_compare(config, links, input, title, format, output),
        Command::Score { first, second, .. } => handle_score(config, &first, &second),
        Command::Preview { link, oembed } => handle_preview(config, &link, oembed),
        Command::InitConfig => handle_init_config(),
    }
}

/// Decode a link, turning codec failures into the user-facing message.
fn decode_link(link: &str) -> Result<ListPayload> {
    payload_from_link(link).map_err(|e| anyhow!("{} ({})", e.user_message(), e))
}

fn handle_create(
    config: &Config,
    title: Option<String>,
    items: Vec<String>,
    bulk: Option<String>,
    bulk_file: Option<PathBuf>,
) -> Result<i32> {
    let mut all_items = Vec::new();
    all_items.extend(items);
    if let Some(text) = bulk {
        all_items.extend(parse_bulk_input(&text));
    }
    if let Some(path) = bulk_file {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        all_items.extend(parse_bulk_input(&text));
    }

    let payload = ListPayload::with_default_title(
        title.unwrap_or_default(),
        Vec::new(),
        &config.create.default_title,
    )
    .with_items(all_items);

    if payload.is_empty() {
        return Err(anyhow!("No items to add"));
    }
    if !validate(std::slice::from_ref(&payload.items)) {
        warn!("The list repeats an item; it cannot be compared with other lists");
    }

    info!("Created \"{}\" with {} items", payload.title, payload.len());
    println!("{}", share_link(&config.links.base_url, &payload)?);
    Ok(0)
}

fn handle_show(link: &str, format: ListFormat) -> Result<i32> {
    let payload = decode_link(link)?;

    match format {
        ListFormat::Text => print!("{}", payload),
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&payload)?),
    }
    Ok(0)
}

fn handle_move(config: &Config, link: &str, from: usize, to: usize) -> Result<i32> {
    let payload = decode_link(link)?;
    let moved = payload.move_item(from - 1, to - 1)?;

    debug!("Moved item {} to position {}", from, to);
    println!("{}", share_link(&config.links.base_url, &moved)?);
    Ok(0)
}

fn handle_compare(
    config: &Config,
    mut links: Vec<String>,
    input: Option<PathBuf>,
    title: Option<String>,
    format: ReportFormat,
    output: Option<PathBuf>,
) -> Result<i32> {
    if let Some(path) = input {
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        links.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from),
        );
    }

    let options = CompareOptions {
        persistence: config.ranking.persistence,
        title,
        base_url: Some(config.links.base_url.clone()),
    };

    let comparison = match compare_links(&links, &options) {
        Ok(comparison) => comparison,
        Err(e) => {
            warn!("Comparison failed: {}", e);
            eprintln!("❌ {}", e.user_message());
            return Ok(if e.is_shape_mismatch() { 2 } else { 1 });
        }
    };

    let rendered = match format {
        ReportFormat::Text => {
            let mut text = report::generate_text_report(&comparison);
            if let Some(ref link) = comparison.consensus_link {
                text.push_str(&format!("\nConsensus link: {}\n", link));
            }
            text
        }
        ReportFormat::Markdown => report::generate_markdown_report(&comparison),
        ReportFormat::Json => report::generate_json_report(&comparison)?,
        ReportFormat::Csv => export::generate_csv(&comparison)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!("✅ Report saved to: {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(0)
}

fn handle_score(config: &Config, first: &str, second: &str) -> Result<i32> {
    let a = decode_link(first)?;
    let b = decode_link(second)?;

    if !validate(&[a.items.clone(), b.items.clone()]) {
        warn!("The lists do not contain the same items; scoring them anyway");
    }

    let score = rbo(a.items.as_slice(), b.items.as_slice(), config.ranking.persistence);
    println!("{:.6}", score);
    Ok(0)
}

fn handle_preview(config: &Config, link: &str, oembed: bool) -> Result<i32> {
    let payload = decode_link(link)?;
    let settings = config.preview_settings();

    if oembed {
        let doc = preview::oembed(&payload, &settings);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let summary = preview::link_preview(&payload, &settings);
        println!("{}\n{}", summary.title, summary.description);
    }
    Ok(0)
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems are reported on stderr.
fn load_config(args: &Args) -> Result<(Config, Option<PathBuf>)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, Some(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, Some(PathBuf::from(CONFIG_FILE_NAME)))),
        Ok(None) => Ok((Config::default(), None)),
        Err(e) => {
            eprintln!("⚠️  Failed to load config, using defaults: {:#}", e);
            Ok((Config::default(), None))
        }
    }
}
