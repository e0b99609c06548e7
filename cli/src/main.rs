mod config;

use std::path::{Path, PathBuf};

use clap::Parser;
use docopt_completion_core::{Joiner, validate_tree};
use docopt_completion_discovery::acquire::read_help_file;
use docopt_completion_discovery::discover_usage;
use docopt_completion_discovery::parser::{ParseMode, ParsedUsage, parse_usage_with_mode};
use docopt_completion_render::install::install;
use docopt_completion_render::targets::detect_targets;
use docopt_completion_render::{BashRenderer, InstallTarget, Renderers, Shell, WriteOutcome};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;

/// Output format for `--print-tree`.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum TreeFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "docopt-completion")]
#[command(version, about = "Generate bash and zsh completion scripts for docopt-based tools")]
struct Cli {
    /// Command to generate completion for (name on PATH or a path).
    command: String,
    /// Write a single zsh completion file to the output directory.
    #[arg(long, conflicts_with = "manual_bash")]
    manual_zsh: bool,
    /// Write a single bash completion file to the output directory.
    #[arg(long)]
    manual_bash: bool,
    /// Output directory for manual modes (default: current directory).
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,
    /// Read usage text from a file (`-` for stdin) instead of running the command.
    #[arg(long, value_name = "PATH")]
    help_file: Option<PathBuf>,
    /// Usage parsing strategy.
    #[arg(long, value_enum)]
    mode: Option<ParseMode>,
    /// Print the parsed command tree and help map instead of writing files.
    #[arg(long, value_enum, value_name = "FORMAT")]
    print_tree: Option<TreeFormat>,
    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct TreeReport<'a> {
    command: &'a str,
    #[serde(flatten)]
    parsed: &'a ParsedUsage,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.parse_mode = mode;
    }

    let root = completion_name(&cli.command)?;

    if let Some(format) = cli.print_tree {
        let parsed = acquire_and_parse(&cli, &config)?;
        return print_tree(&root, &parsed, format);
    }

    let manual = if cli.manual_zsh {
        Some(Shell::Zsh)
    } else if cli.manual_bash {
        Some(Shell::Bash)
    } else {
        None
    };
    let targets = match manual {
        Some(shell) => {
            let dir = cli.output_dir.clone().unwrap_or_else(|| PathBuf::from("."));
            vec![InstallTarget::manual(shell, dir)]
        }
        None => {
            if cli.output_dir.is_some() {
                return Err("--output-dir requires --manual-zsh or --manual-bash".to_string());
            }
            detect_targets(&config.target_env()).map_err(|err| {
                format!(
                    "{err}. Use --manual-zsh or --manual-bash to write the file to the current directory"
                )
            })?
        }
    };
    debug!(targets = targets.len(), "Resolved completion targets");

    let parsed = acquire_and_parse(&cli, &config)?;
    let joiners = [Joiner::Underscore, config.bash.joiner];
    for problem in validate_tree(&root, &parsed.tree, &joiners) {
        warn!(command = %root, "{problem}");
    }

    let renderers = Renderers {
        bash: BashRenderer::new(config.bash),
        ..Renderers::default()
    };
    let outcomes = install(&renderers, &root, &parsed.tree, &parsed.help, &targets);
    report(&outcomes)
}

/// Name the completion is registered under: the command's file name.
fn completion_name(command: &str) -> Result<String, String> {
    Path::new(command)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| format!("Invalid command name '{command}'"))
}

fn acquire_and_parse(cli: &Cli, config: &GeneratorConfig) -> Result<ParsedUsage, String> {
    match &cli.help_file {
        Some(path) => {
            let text = read_help_file(path).map_err(|err| err.to_string())?;
            parse_usage_with_mode(&text, config.parse_mode).map_err(|err| err.to_string())
        }
        None => discover_usage(&cli.command, &config.help_invocation(), config.parse_mode)
            .map_err(|err| err.to_string()),
    }
}

fn print_tree(root: &str, parsed: &ParsedUsage, format: TreeFormat) -> Result<(), String> {
    let report = TreeReport {
        command: root,
        parsed,
    };
    let raw = match format {
        TreeFormat::Json => serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize tree: {err}"))?,
        TreeFormat::Yaml => serde_yaml::to_string(&report)
            .map_err(|err| format!("Failed to serialize tree: {err}"))?,
    };
    println!("{}", raw.trim_end());
    Ok(())
}

fn report(outcomes: &[WriteOutcome]) -> Result<(), String> {
    for outcome in outcomes {
        if outcome.is_written() {
            println!("{outcome}");
        } else {
            eprintln!("{outcome}");
        }
    }
    if outcomes.iter().any(WriteOutcome::is_written) {
        Ok(())
    } else {
        Err("No completion file could be written".to_string())
    }
}
