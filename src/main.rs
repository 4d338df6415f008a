//! Auction-Scout main entry point
//!
//! This is the command-line front end for the cached auction scanner.

use anyhow::Context;
use auction_scout::config::{load_config_with_hash, validate, Config};
use auction_scout::output::{clipboard_from_config, Clipboard, ConsolePresenter};
use auction_scout::{HttpPageSource, MatchCriteria, Scanner};
use clap::Parser;
use std::io::Stdout;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Auction-Scout: search the auction house by name and lore
///
/// Scans every page of the auction listing API, keeps the pages cached for a
/// short window, and prints auctions whose name contains one of the keywords
/// and whose lore contains both required strings, cheapest first.
#[derive(Parser, Debug)]
#[command(name = "auction-scout")]
#[command(version)]
#[command(about = "Search the auction house by item name and lore", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated item name keywords (case-insensitive)
    #[arg(short, long, default_value = "")]
    keywords: String,

    /// First string the item lore must contain (case-sensitive)
    #[arg(long, default_value = "")]
    lore1: String,

    /// Second string the item lore must contain (case-sensitive)
    #[arg(long, default_value = "")]
    lore2: String,

    /// Read searches from stdin, reusing the page cache between them
    #[arg(short, long)]
    interactive: bool,

    /// Override the number of concurrent page fetches
    #[arg(long)]
    batch_width: Option<usize>,

    /// Override how long fetched pages are trusted (seconds)
    #[arg(long)]
    staleness_secs: Option<u64>,

    /// Override the auction API endpoint
    #[arg(long)]
    base_url: Option<String>,

    /// Print the effective configuration without scanning
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// A line typed in interactive mode
#[derive(Debug, PartialEq)]
enum Command {
    /// `keywords | lore1 | lore2`
    Search(MatchCriteria),
    /// `copy N`
    Copy(usize),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = load_effective_config(&cli)?;

    if cli.dry_run {
        print_config(&config);
        return Ok(());
    }

    let mut scanner =
        Scanner::from_config(&config).context("Failed to initialize the auction client")?;
    let clipboard = clipboard_from_config(&config.clipboard);
    let mut presenter = ConsolePresenter::new(std::io::stdout());

    if cli.interactive {
        run_interactive(&mut scanner, &mut presenter, clipboard.as_ref()).await
    } else {
        let criteria = MatchCriteria::from_filter(&cli.keywords, cli.lore1, cli.lore2);
        scanner
            .scan_and_present(&criteria, &mut presenter)
            .await
            .context("Failed to print results")?;
        Ok(())
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("auction_scout=info,warn"),
            1 => EnvFilter::new("auction_scout=debug,info"),
            2 => EnvFilter::new("auction_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load_effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(width) = cli.batch_width {
        config.scan.batch_width = width;
    }
    if let Some(secs) = cli.staleness_secs {
        config.scan.staleness_secs = secs;
    }
    if let Some(url) = &cli.base_url {
        config.api.base_url = url.clone();
    }

    validate(&config).context("Invalid configuration")?;
    Ok(config)
}

/// Handles the --dry-run mode
fn print_config(config: &Config) {
    println!("=== Auction-Scout Dry Run ===\n");

    println!("API:");
    println!("  Base URL: {}", config.api.base_url);
    println!("  Timeout: {}s (connect {}s)", config.api.timeout_secs, config.api.connect_timeout_secs);
    println!("  User agent: {}", config.api.user_agent);

    println!("\nScan:");
    println!("  Batch width: {}", config.scan.batch_width);
    println!("  Window size: {} pages", config.scan.window_size);
    println!("  Staleness window: {}s", config.scan.staleness_secs);

    println!("\nClipboard:");
    match &config.clipboard.command {
        Some(command) => println!("  Command: {}", command.join(" ")),
        None => println!("  Command: (none)"),
    }

    println!("\n✓ Configuration is valid");
}

/// Runs searches read from stdin until `quit` or end of input
async fn run_interactive(
    scanner: &mut Scanner<HttpPageSource>,
    presenter: &mut ConsolePresenter<Stdout>,
    clipboard: &dyn Clipboard,
) -> anyhow::Result<()> {
    print_help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match parse_command(&line) {
            Command::Search(criteria) => {
                println!("Scanning...");
                scanner
                    .scan_and_present(&criteria, presenter)
                    .await
                    .context("Failed to print results")?;
            }
            Command::Copy(number) => match presenter.entry(number) {
                Some(entry) => {
                    if entry.activate(clipboard) {
                        println!("Copied to clipboard: {}", entry.view_command);
                    }
                }
                None => println!("No result #{}", number),
            },
            Command::Help => print_help(),
            Command::Quit => break,
            Command::Empty => {}
            Command::Invalid(message) => println!("{}", message),
        }
    }

    Ok(())
}

fn print_help() {
    println!("Enter a search as: keywords | lore text 1 | lore text 2");
    println!("  copy N   copy the view command of result N");
    println!("  help     show this message");
    println!("  quit     exit");
}

/// Parses one interactive input line
fn parse_command(line: &str) -> Command {
    let line = line.trim();

    match line {
        "" => return Command::Empty,
        "quit" | "exit" => return Command::Quit,
        "help" | "?" => return Command::Help,
        _ => {}
    }

    if let Some(rest) = line.strip_prefix("copy") {
        if rest.is_empty() || rest.starts_with(char::is_whitespace) {
            return match rest.trim().parse::<usize>() {
                Ok(number) => Command::Copy(number),
                Err(_) => Command::Invalid(format!("Usage: copy N (got '{}')", rest.trim())),
            };
        }
    }

    // Lore text is matched verbatim, so only the separators' own padding is trimmed
    let mut parts = line.splitn(3, '|');
    let keywords = parts.next().unwrap_or_default();
    let lore1 = parts.next().map(str::trim).unwrap_or_default();
    let lore2 = parts.next().map(str::trim).unwrap_or_default();

    Command::Search(MatchCriteria::from_filter(keywords, lore1, lore2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        assert_eq!(
            parse_command("hyperion, valkyrie | Wise V | Ultimate"),
            Command::Search(MatchCriteria::from_filter("hyperion, valkyrie", "Wise V", "Ultimate"))
        );
    }

    #[test]
    fn test_parse_search_without_lore() {
        assert_eq!(
            parse_command("terminator"),
            Command::Search(MatchCriteria::from_filter("terminator", "", ""))
        );
    }

    #[test]
    fn test_parse_copy() {
        assert_eq!(parse_command("copy 3"), Command::Copy(3));
        assert!(matches!(parse_command("copy x"), Command::Invalid(_)));
        assert!(matches!(parse_command("copy"), Command::Invalid(_)));
    }

    #[test]
    fn test_copy_prefix_inside_keyword_is_a_search() {
        assert!(matches!(parse_command("copycat"), Command::Search(_)));
    }

    #[test]
    fn test_parse_control_words() {
        assert_eq!(parse_command("quit"), Command::Quit);
        assert_eq!(parse_command("exit"), Command::Quit);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("   "), Command::Empty);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::parse_from([
            "auction-scout",
            "-k",
            "hyperion",
            "--lore1",
            "Wise",
            "--batch-width",
            "3",
        ]);
        assert_eq!(cli.keywords, "hyperion");
        assert_eq!(cli.lore1, "Wise");
        assert_eq!(cli.batch_width, Some(3));

        let config = load_effective_config(&cli).unwrap();
        assert_eq!(config.scan.batch_width, 3);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let cli = Cli::parse_from(["auction-scout", "--batch-width", "0"]);
        assert!(load_effective_config(&cli).is_err());
    }
}
