use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use gutentext_core::{ARCHIVE_ROOT, TextClient, TextConfig, WorkId, default_cache_dir, strip_headers};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{format_size, print_banner, print_detail, print_info, print_step, print_success, print_timing};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Download a Project Gutenberg book and strip the license boilerplate
#[derive(Parser, Debug)]
#[command(name = "gutentext")]
#[command(author = "Gutentext Contributors")]
#[command(version)]
#[command(about = "Download Project Gutenberg books and strip their boilerplate", long_about = None)]
struct Args {
    /// Book id to download, local text file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Print the full text, including header, footer and license
    #[arg(long)]
    keep_headers: bool,

    /// Directory for the compressed text cache
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Archive root URL (use a mirror)
    #[arg(long, default_value = ARCHIVE_ROOT, value_name = "URL")]
    archive_root: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Where the raw text comes from
#[derive(Debug, PartialEq, Eq)]
enum Source {
    Stdin,
    Book(WorkId),
    File(PathBuf),
}

impl Source {
    fn from_input(input: &str) -> Self {
        if input == "-" {
            Self::Stdin
        } else if let Ok(id) = input.parse::<WorkId>() {
            Self::Book(id)
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "gutentext_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_config(args: &Args) -> TextConfig {
    let mut builder = TextConfig::builder()
        .cache_dir(args.cache_dir.clone().unwrap_or_else(default_cache_dir))
        .archive_root(args.archive_root.clone())
        .timeout(args.timeout);

    if let Some(user_agent) = &args.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }

    builder.build()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let started = Instant::now();
    let source = Source::from_input(&args.input);
    tracing::debug!(?source, "reading input");

    let text = match source {
        Source::Stdin => {
            if args.verbose {
                print_step(1, 3, "Reading from stdin");
            }
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer).context("Failed to read from stdin")?;
            buffer
        }
        Source::Book(id) => {
            let config = build_config(&args);
            if args.verbose {
                print_step(1, 3, &format!("Fetching book {}", id.to_string().bright_white().underline()));
                print_detail("Cache", &config.cache_dir.display().to_string());
            }

            let client = TextClient::new(&config).context("Failed to create HTTP client")?;
            client
                .get_text_by_id(id)
                .with_context(|| format!("Failed to get text for book {}", id))?
        }
        Source::File(path) => {
            if args.verbose {
                print_step(1, 3, &format!("Reading from file {}", path.display().bright_white()));
            }
            fs::read(&path).with_context(|| format!("Failed to read file: {}", path.display()))?
        }
    };

    if args.verbose {
        print_detail("Size", &format_size(text.len()));
        print_timing("Acquired", started.elapsed());
        eprintln!();
    }

    let output = if args.keep_headers {
        if args.verbose {
            print_step(2, 3, "Keeping headers and footers");
        }
        text
    } else {
        if args.verbose {
            print_step(2, 3, "Stripping headers and footers");
        }
        let stripped = strip_headers(&text);
        if args.verbose {
            print_detail("Removed", &format_size(text.len().saturating_sub(stripped.len())));
            eprintln!();
        }
        stripped
    };

    if args.verbose {
        print_step(3, 3, "Writing output");
    }

    match args.output {
        Some(path) => {
            fs::write(&path, &output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&output).context("Failed to write to stdout")?;
            stdout.flush().context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
