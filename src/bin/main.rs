//! kernmat Command Line Interface
//!
//! Computes polynomial or RBF kernel matrices between feature matrices
//! stored as CSV or JSON, and inspects saved results.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use kernmat::core::{KernelError, Parallelism, RbfStrategy, Result};
use kernmat::data::read_matrix;
use kernmat::utils::{memory, stats};
use kernmat::{KernelComputer, KernelMatrixRecord, KernelSpec};
use log::{error, info};
use ndarray::Array2;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "kernmat")]
#[command(about = "Compute polynomial and RBF kernel matrices")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "kernmat contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Polynomial kernel (<x, y> + c)^p
    Polynomial(PolynomialArgs),
    /// Gaussian RBF kernel exp(-gamma ||x - y||²)
    Rbf(RbfArgs),
    /// Display a saved kernel matrix summary
    Info(InfoArgs),
}

#[derive(Args)]
struct MatrixArgs {
    /// Feature matrix X (CSV or JSON)
    #[arg(long)]
    x: PathBuf,

    /// Feature matrix Y (defaults to X)
    #[arg(long)]
    y: Option<PathBuf>,

    /// Output record file (prints the matrix to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Distribute output rows across threads
    #[arg(long)]
    parallel: bool,

    /// Number of worker threads (implies --parallel)
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args)]
struct PolynomialArgs {
    #[command(flatten)]
    matrices: MatrixArgs,

    /// Independent term c
    #[arg(short = 'c', long, default_value = "1.0", allow_hyphen_values = true)]
    coef0: f64,

    /// Degree p
    #[arg(short = 'p', long, default_value = "2")]
    degree: u32,
}

#[derive(Args)]
struct RbfArgs {
    #[command(flatten)]
    matrices: MatrixArgs,

    /// Kernel width gamma
    #[arg(short, long, allow_hyphen_values = true)]
    gamma: f64,

    /// Squared distance algorithm
    #[arg(long, default_value = "row-broadcast")]
    strategy: CliRbfStrategy,
}

#[derive(ValueEnum, Clone, Debug)]
enum CliRbfStrategy {
    /// Direct difference-then-square per row (stable, default)
    #[value(name = "row-broadcast")]
    RowBroadcast,
    /// ||x||² + ||y||² - 2x·y via one matrix product (faster, less stable)
    #[value(name = "expanded")]
    Expanded,
}

impl From<CliRbfStrategy> for RbfStrategy {
    fn from(cli_strategy: CliRbfStrategy) -> Self {
        match cli_strategy {
            CliRbfStrategy::RowBroadcast => RbfStrategy::RowBroadcast,
            CliRbfStrategy::Expanded => RbfStrategy::Expanded,
        }
    }
}

#[derive(Args)]
struct InfoArgs {
    /// Saved kernel matrix record
    record: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Polynomial(args) => {
            let spec = KernelSpec::Polynomial {
                c: args.coef0,
                p: args.degree,
            };
            kernel_command(&args.matrices, KernelComputer::new(spec))
        }
        Commands::Rbf(args) => {
            let computer = KernelComputer::new(KernelSpec::Rbf { gamma: args.gamma })
                .with_rbf_strategy(args.strategy.into());
            kernel_command(&args.matrices, computer)
        }
        Commands::Info(args) => info_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn kernel_command(args: &MatrixArgs, computer: KernelComputer) -> Result<()> {
    let spec = computer.spec();
    spec.validate()?;
    info!("Computing {spec} kernel matrix");

    let parallelism = configure_parallelism(args)?;
    let computer = computer.with_parallelism(parallelism);

    info!("Loading X from: {:?}", args.x);
    let x = read_matrix(&args.x)?;
    let y = match &args.y {
        Some(path) => {
            info!("Loading Y from: {path:?}");
            Some(read_matrix(path)?)
        }
        None => None,
    };

    let matrix = match &y {
        Some(y) => {
            info!("X: {} x {}, Y: {} x {}", x.nrows(), x.ncols(), y.nrows(), y.ncols());
            log_memory(x.nrows(), y.nrows());
            computer.compute(&x, y)?
        }
        None => {
            info!("X: {} x {} (Gram matrix)", x.nrows(), x.ncols());
            log_memory(x.nrows(), x.nrows());
            computer.compute_gram(&x)?
        }
    };

    let summary = stats::kernel_matrix_stats(&matrix);
    info!(
        "Kernel matrix {} x {}: min={:.6}, max={:.6}, mean={:.6}",
        summary.rows, summary.cols, summary.min, summary.max, summary.mean
    );

    if let Some(output_path) = &args.output {
        KernelMatrixRecord::new(spec, &matrix).save_to_file(output_path)?;
        info!("Kernel matrix saved to: {output_path:?}");
    } else {
        print_matrix(&matrix);
    }

    Ok(())
}

fn configure_parallelism(args: &MatrixArgs) -> Result<Parallelism> {
    if let Some(threads) = args.threads {
        if threads == 0 {
            return Err(KernelError::InvalidParameter(
                "Thread count must be positive".to_string(),
            ));
        }
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| KernelError::InvalidParameter(e.to_string()))?;
        info!("Using {threads} worker threads");
        return Ok(Parallelism::Rows);
    }

    Ok(if args.parallel {
        Parallelism::Rows
    } else {
        Parallelism::Sequential
    })
}

fn log_memory(n: usize, m: usize) {
    let bytes = memory::estimate_kernel_matrix_memory(n, m);
    info!("Output matrix needs {:.2} MB", bytes as f64 / (1024.0 * 1024.0));
}

fn print_matrix(matrix: &Array2<f64>) {
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.6e}")).collect();
        println!("{}", line.join(" "));
    }
}

fn info_command(args: InfoArgs) -> Result<()> {
    info!("Loading kernel matrix from: {:?}", args.record);
    let record = KernelMatrixRecord::load_from_file(&args.record)?;
    let matrix = record.to_matrix()?;

    record.print_summary();

    let summary = stats::kernel_matrix_stats(&matrix);
    println!("\nValues:");
    println!("  Min:  {:.6}", summary.min);
    println!("  Max:  {:.6}", summary.max);
    println!("  Mean: {:.6}", summary.mean);

    if matrix.nrows() == matrix.ncols() {
        println!(
            "  Symmetric: {}",
            kernmat::utils::validation::is_symmetric(&matrix, 1e-9)
        );
    }

    Ok(())
}
