use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{ArgAction, Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use sortinghat::matrix::{read_matrix_csv, write_matrix_csv};
use sortinghat::{
    generate_feature_seeded, rescale, rescale_checked, ClassParam, FeatureSpec, RescaleAxis,
};

#[derive(Parser)]
#[command(version, about = "Synthetic class features and min-max rescaling")]
struct Cli {
    // -v for info, -vv for debug, -vvv for trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sample a normally-distributed feature for each class and write it as csv
    Generate {
        /// Class labels, in output order
        #[arg(long, value_delimiter = ',', required = true)]
        labels: Vec<String>,
        /// One mean for all classes, or one per label
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true, required = true)]
        means: Vec<f64>,
        /// One standard deviation for all classes, or one per label
        #[arg(long, value_delimiter = ',', required = true)]
        stds: Vec<f64>,
        /// One sample count for all classes, or one per label
        #[arg(long, value_delimiter = ',', required = true)]
        counts: Vec<usize>,
        /// Name of the value column
        #[arg(long)]
        feature: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        /// Values at or below this become exactly this
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        /// Values at or above this become exactly this
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Min-max rescale a numeric csv matrix to [0, 1]
    Rescale {
        #[arg(short, long)]
        input: PathBuf,
        /// 0 rescales each column, 1 each row
        #[arg(long, default_value_t = 0)]
        axis: usize,
        /// Skip the first line of the input
        #[arg(long)]
        has_headers: bool,
        /// Fail on constant slices instead of writing NaN
        #[arg(long)]
        strict: bool,
        /// Defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

fn open_output(path: &Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    Ok(writer)
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate {
            labels,
            means,
            stds,
            counts,
            feature,
            seed,
            min,
            max,
            output,
        } => {
            let now = Instant::now();
            let spec = FeatureSpec {
                means: ClassParam::from_cli(means),
                stds: ClassParam::from_cli(stds),
                sample_counts: ClassParam::from_cli(counts),
                labels,
                feature_name: feature,
                min_clamp: min,
                max_clamp: max,
            };
            let table = generate_feature_seeded(&spec, seed)?;
            table.write_csv(open_output(&output)?)?;
            info!(
                "Generated {} rows for {} classes [{}ms]",
                table.len(),
                spec.labels.len(),
                now.elapsed().as_millis()
            );
        }
        Command::Rescale {
            input,
            axis,
            has_headers,
            strict,
            output,
        } => {
            let axis = RescaleAxis::try_from(axis)?;

            let now = Instant::now();
            let matrix = read_matrix_csv(&input, has_headers)?;
            info!(
                "Loaded {}x{} matrix from {} [{}ms]",
                matrix.nrows(),
                matrix.ncols(),
                input.display(),
                now.elapsed().as_millis()
            );

            let now = Instant::now();
            let rescaled = if strict {
                rescale_checked(matrix.view(), axis)?
            } else {
                rescale(matrix.view(), axis)
            };
            write_matrix_csv(rescaled.view(), open_output(&output)?)?;
            info!("Rescaled along axis {} [{}ms]", axis.index(), now.elapsed().as_millis());
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        error!("{}", e);
        std::process::exit(1);
    }
}
