//! commitpack - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use commitpack::collect::collect_from_path;
use commitpack::input::{load_analysis, load_change_set};
use commitpack::prompt::DEFAULT_MAX_DIFF_CHARS;
use commitpack::{BuildMode, PromptBuilder, PromptConfig};

/// Build a commit message prompt from pending changes.
#[derive(Parser, Debug)]
#[command(name = "commitpack")]
#[command(about = "Build a size-bounded commit message prompt from pending changes")]
#[command(version)]
struct Cli {
    /// Change set JSON file ("-" for stdin)
    #[arg(long, conflicts_with = "from_git")]
    changes: Option<PathBuf>,

    /// Collect the change set from the git working tree at PATH
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = ".")]
    from_git: Option<PathBuf>,

    /// Analysis result JSON file; switches to the analysis-aware template
    #[arg(long)]
    analysis: Option<PathBuf>,

    /// Emit a plain-text summary prompt without diffs
    #[arg(long)]
    simple: bool,

    /// Ceiling on verbatim diff characters
    #[arg(long, default_value_t = DEFAULT_MAX_DIFF_CHARS)]
    max_chars: usize,

    /// Log budget decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "commitpack=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let change_set = match (&cli.changes, &cli.from_git) {
        (Some(path), _) => load_change_set(path).context("Failed to load change set")?,
        (None, Some(repo_path)) => collect_from_path(repo_path)
            .context("Failed to collect changes from the working tree")?,
        (None, None) => bail!("No input given. Pass --changes <FILE> or --from-git [PATH]."),
    };

    let analysis = cli
        .analysis
        .as_deref()
        .map(load_analysis)
        .transpose()
        .context("Failed to load analysis result")?;

    let mode = if cli.simple {
        BuildMode::Simple
    } else {
        BuildMode::Structured
    };

    let builder = PromptBuilder::new(analysis).with_config(PromptConfig {
        max_diff_chars: cli.max_chars,
    });

    let prompt = builder
        .build_with_mode(&change_set, mode)
        .context("Failed to build prompt")?;

    println!("{prompt}");

    Ok(())
}
