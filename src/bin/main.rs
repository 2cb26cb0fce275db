//! CLI tool for WMI Explorer (wmix)

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use colored::Colorize;
#[cfg(feature = "cli")]
use std::io::{self, BufWriter, Write};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use wmixlib::{
    provider::mock::MockProvider, ExplorerConfig, JsonReport, OutputFormat, Provider, TextReport,
    WalkOptions, WalkOutcome, Walker,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "wmix")]
#[command(about = "WMI Explorer: walk and browse WMI namespaces, classes, and properties", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use the built-in sample tree instead of the live WMI service
    #[arg(long, global = true)]
    demo: bool,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Recursively print every class instance under a namespace (default)
    Walk(WalkArgs),
    /// Launch Graphical User Interface (GUI) - three-pane browser
    #[cfg(feature = "gui")]
    Gui,
    /// Launch Terminal User Interface (TUI) - three-pane browser
    Tui,
    /// Configuration helpers
    Config {
        #[command(subcommand)]
        action: ConfigSubcommand,
    },
}

#[cfg(feature = "cli")]
#[derive(Args, Default)]
struct WalkArgs {
    /// Namespace to start from (e.g. root or root\cimv2)
    #[arg(short, long)]
    namespace: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Report every class, ignoring the exclusion list
    #[arg(long)]
    no_exclusions: bool,

    /// Maximum depth below the start namespace
    #[arg(long)]
    max_depth: Option<usize>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Print a sample configuration file
    Sample,
}

#[cfg(feature = "cli")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::init();

    let command = cli.command.unwrap_or(Commands::Walk(WalkArgs::default()));

    // Config helpers need neither a config file nor a provider
    if let Commands::Config { action } = &command {
        match action {
            ConfigSubcommand::Sample => print!("{}", ExplorerConfig::sample_toml()),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            ExplorerConfig::from_toml_file(&path.to_string_lossy())?
        }
        None => ExplorerConfig::default(),
    };

    if cli.demo {
        log::info!("Using the built-in sample tree");
        return dispatch(command, config, MockProvider::demo());
    }

    dispatch(command, config, wmixlib::provider::default_provider()?)
}

#[cfg(feature = "cli")]
fn dispatch<P: Provider + 'static>(
    command: Commands,
    config: ExplorerConfig,
    provider: P,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Walk(args) => handle_walk(&args, config, provider)?,

        #[cfg(feature = "gui")]
        Commands::Gui => {
            wmixlib::gui::run(provider).map_err(|e| format!("GUI error: {}", e))?;
        }

        Commands::Tui => {
            wmixlib::tui::run(provider)?;
        }

        Commands::Config { .. } => {}
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn handle_walk<P: Provider>(
    args: &WalkArgs,
    mut config: ExplorerConfig,
    provider: P,
) -> Result<(), Box<dyn std::error::Error>> {
    // Command-line flags override the config file
    if let Some(namespace) = &args.namespace {
        config.start_namespace = namespace.clone();
    }
    if let Some(format) = args.format {
        config.format = format;
    }
    if args.no_exclusions {
        config.apply_exclusions = false;
    }
    if args.max_depth.is_some() {
        config.max_depth = args.max_depth;
    }

    let start = config.start_path()?;
    let walker = Walker::new(provider, config.exclusion_set()).with_options(WalkOptions {
        max_depth: config.max_depth,
    });
    log::info!(
        "Walking {} with {} exclusion patterns",
        start,
        walker.exclusions().len()
    );

    let outcome = match config.format {
        OutputFormat::Text => {
            let stdout = io::stdout();
            let mut report = TextReport::new(BufWriter::new(stdout.lock()));
            let outcome = walker.walk(&start, &mut report)?;
            report.into_inner().flush()?;
            outcome
        }
        OutputFormat::Json => {
            let mut report = JsonReport::new();
            let outcome = walker.walk(&start, &mut report)?;
            report.finish(&start, outcome.clone(), io::stdout().lock())?;
            outcome
        }
    };

    print_summary(&outcome);
    Ok(())
}

/// Totals go to stderr so stdout stays a clean report
#[cfg(feature = "cli")]
fn print_summary(outcome: &WalkOutcome) {
    let failures = outcome.namespaces_failed + outcome.namespace_errors + outcome.class_errors;
    let status = if failures == 0 {
        "Done".green().bold()
    } else {
        "Done with errors".yellow().bold()
    };
    eprintln!(
        "{} {} namespaces ({} unreachable), {} classes ({} excluded, {} failed), {} property lines in {}",
        status,
        outcome.namespaces_visited,
        outcome.namespaces_failed,
        outcome.classes_reported,
        outcome.classes_excluded,
        outcome.class_errors,
        outcome.property_lines,
        format_elapsed(outcome.elapsed_ms).cyan()
    );
}

/// Format milliseconds in human-readable form
#[cfg(feature = "cli")]
fn format_elapsed(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{:.1} ms", ms)
    } else if ms < 60_000.0 {
        format!("{:.2} s", ms / 1000.0)
    } else {
        let secs = (ms / 1000.0) as u64;
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI features not enabled. Please compile with --features cli");
    std::process::exit(1);
}
