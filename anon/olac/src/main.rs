use std::fs;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::{info, LevelFilter};
use ola::{Anonymization, Anonymizer, MetricKind};

mod job;

use job::{CliError, Job};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MetricArg {
    Precision,
    Discernibility,
}

impl From<MetricArg> for MetricKind {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Precision => MetricKind::Precision,
            MetricArg::Discernibility => MetricKind::Discernibility,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "olac",
    version,
    about = "k-anonymize a table with Optimal Lattice Anonymization",
    long_about = "olac searches the lattice of generalization strategies for the\n\
        k-minimal ones, picks the strategy with the least information loss and\n\
        writes the generalized table with undersized classes suppressed.\n\n\
        EXAMPLES:\n\
        \n  olac anonymize job.json                      Anonymize with the job's settings\n\
        \n  olac anonymize -k 5 --format json job.json   Override k, print JSON\n\
        \n  olac -vv anonymize -o release.json job.json  Debug logging, write the release"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Anonymize the table described by a JSON job file
    Anonymize(AnonymizeArgs),
}

#[derive(Debug, Args)]
struct AnonymizeArgs {
    /// Job file with the table, hierarchies and configuration
    job: PathBuf,

    /// Minimum equivalence class size
    #[arg(short, long)]
    k: Option<usize>,

    /// Largest fraction of records that may be suppressed, in [0, 1]
    #[arg(long)]
    max_suppression: Option<f64>,

    /// Information-loss metric used to rank k-minimal strategies
    #[arg(long, value_enum)]
    metric: Option<MetricArg>,

    #[arg(long, value_enum, default_value_t = OutputMode::Text)]
    format: OutputMode,

    /// Write the released table as JSON to this path
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn anonymize(args: &AnonymizeArgs) -> Result<Anonymization, CliError> {
    let job = Job::load(&args.job)?;
    let mut config = job.config;
    if let Some(k) = args.k {
        config.k = k;
    }
    if let Some(max_suppression) = args.max_suppression {
        config.max_suppression = max_suppression;
    }
    if let Some(metric) = args.metric {
        config.metric = metric.into();
    }

    let table = job.table()?;
    let rules = job.rules()?;
    info!(
        "{} records, k = {}, max suppression = {}, metric = {}",
        table.len(),
        config.k,
        config.max_suppression,
        config.metric
    );
    let result = Anonymizer::new(config).run(&table, &rules)?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&result.release)?;
        fs::write(path, json).map_err(|source| CliError::Write {
            path: path.clone(),
            source,
        })?;
        info!("release written to {}", path.display());
    }
    Ok(result)
}

fn render_text(result: &Anonymization) -> String {
    let report = &result.report;
    let stats = &result.stats;
    let mut out = String::new();
    out.push_str(&format!(
        "optimal strategy {} over [{}], loss {}\n",
        report.optimal,
        report.attributes.join(", "),
        report.loss
    ));
    out.push_str(&format!(
        "{} of {} lattice nodes; {}\n",
        report.lattice.visited, report.total_nodes, report.lattice
    ));
    let k_minimal: Vec<String> = report.k_minimal.iter().map(|s| s.to_string()).collect();
    out.push_str(&format!("k-minimal: {}\n", k_minimal.join(" ")));
    out.push_str(&format!(
        "{} classes before suppression, {} suppressed classes, {} suppressed records ({}%)\n",
        stats.classes_before_suppression,
        stats.suppressed_classes,
        stats.suppressed_records,
        stats.percent_suppressed
    ));
    out.push('\n');
    out.push_str(&result.release.columns().join(","));
    out.push('\n');
    for row in result.release.rows() {
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Anonymize(args) => match anonymize(&args) {
            Ok(result) => {
                match args.format {
                    OutputMode::Text => print!("{}", render_text(&result)),
                    OutputMode::Json => match serde_json::to_string_pretty(&result) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("error: {e}");
                            return 2;
                        }
                    },
                }
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                e.exit_code()
            }
        },
    }
}

fn main() {
    std::process::exit(run_cli());
}
