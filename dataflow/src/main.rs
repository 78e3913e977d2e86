use anyhow::Context;
use clap::{Parser, Subcommand};
use dataflow::events::{EventSink, LoggingEventSink};
use dataflow::harness::{
    apply_operations, generate, validate, ApplyOutcome, GeneratorConfig, HarnessConfig, Menu,
    Session,
};
use dataflow::observability::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::error;

/// Reference interpreter and verification harness for key/value dataflow programs
#[derive(Parser)]
#[command(name = "dataflow", version)]
#[command(about = "Generate partitions, compute reference results and validate them", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a harness configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Override the partition path prefix
    #[arg(long, global = true)]
    partition_prefix: Option<PathBuf>,

    /// Override the program path
    #[arg(long, global = true)]
    program: Option<PathBuf>,

    /// Override the result path
    #[arg(long, global = true)]
    result: Option<PathBuf>,

    /// Override the expected result path
    #[arg(long, global = true)]
    expected: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write random partition files
    Generate {
        /// Number of partitions (one key per partition)
        #[arg(short, long)]
        keys: usize,

        /// Rows per partition
        #[arg(short = 'n', long)]
        values_per_key: usize,

        /// Largest generated value
        #[arg(short, long)]
        max_value: i64,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply the program to the partitions and write the result
    Apply {
        /// Number of partitions to read (default: the program's setting)
        #[arg(short, long)]
        partitions: Option<usize>,

        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare the result with the expected result
    Validate,
    /// Interactive menu (default command)
    Menu,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    let sink: Arc<dyn EventSink> = Arc::new(LoggingEventSink::debug());

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Generate {
            keys,
            values_per_key,
            max_value,
            seed,
        } => {
            let mut generator = GeneratorConfig::new(keys, values_per_key, max_value);
            if let Some(seed) = seed {
                generator = generator.with_seed(seed);
            }
            let count = generate(&config.partitions(), &generator)?;
            println!("Generated {count} partitions.");
        }
        Commands::Apply { partitions, json } => {
            match apply_operations(&config, partitions, sink)? {
                ApplyOutcome::Completed(report) if json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                ApplyOutcome::Completed(report) => println!(
                    "Result written to {} ({} rows, sha256 {}).",
                    config.result_path.display(),
                    report.output_rows,
                    report.digest
                ),
                ApplyOutcome::NothingToProcess => println!("No partitions to process."),
            }
        }
        Commands::Validate => {
            let outcome = validate(&config.result_path, &config.expected_path)?;
            println!("{outcome}");
            if !outcome.is_correct() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Menu => {
            let stdin = std::io::stdin();
            let session = Session::new(config).with_event_sink(sink);
            Menu::new(stdin.lock(), std::io::stdout(), session).run()?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_config(cli: &Cli) -> anyhow::Result<HarnessConfig> {
    let mut config = match &cli.config {
        Some(path) => HarnessConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => HarnessConfig::default(),
    };

    if let Some(prefix) = &cli.partition_prefix {
        config = config.with_partition_prefix(prefix);
    }
    if let Some(program) = &cli.program {
        config = config.with_program_path(program);
    }
    if let Some(result) = &cli.result {
        config = config.with_result_path(result);
    }
    if let Some(expected) = &cli.expected {
        config = config.with_expected_path(expected);
    }
    Ok(config)
}
