//! Stowage container loading CLI

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use stowage::packing::{ContainerSpec, Packer};
use stowage::{Solver, Strategy};
use stowage_cli::{template, Job, RunReport};

#[derive(Parser)]
#[command(name = "stowage")]
#[command(about = "Load boxes and cylinders into shipping containers")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a packing job
    Pack {
        /// Path to the JSON job file
        job: PathBuf,

        /// Strategy (overrides the job file)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Number of containers (overrides the job file)
        #[arg(short, long)]
        containers: Option<usize>,

        /// Output file for the result (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run a job with both strategies and compare
    Compare {
        /// Path to the JSON job file
        job: PathBuf,

        /// Number of containers (overrides the job file)
        #[arg(short, long)]
        containers: Option<usize>,
    },

    /// List standard containers
    Presets,

    /// Write an example job file
    Template {
        /// Output path (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// First Fit Decreasing
    Ffd,
    /// Best Fit Decreasing
    Bfd,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Ffd => Strategy::FirstFitDecreasing,
            StrategyArg::Bfd => Strategy::BestFitDecreasing,
        }
    }
}

fn load_job(path: &Path, containers: Option<usize>) -> anyhow::Result<Job> {
    let mut job =
        Job::from_file(path).with_context(|| format!("loading job {}", path.display()))?;
    if let Some(n) = containers {
        job = job.with_containers(n);
    }
    Ok(job)
}

fn run(job: &Job) -> anyhow::Result<RunReport> {
    let packer = Packer::new(job.config.clone());
    let result = packer
        .solve(&job.items, &job.container)
        .with_context(|| format!("packing with {}", job.config.strategy))?;
    Ok(RunReport::new(result, &job.container, &job.config))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Pack {
            job,
            strategy,
            containers,
            output,
        } => {
            let mut job = load_job(&job, containers)?;
            if let Some(s) = strategy {
                job = job.with_strategy(s.into());
            }

            log::info!(
                "Packing {} instances into {} x {}",
                job.instance_count(),
                job.config.container_count,
                job.container.name()
            );
            let report = run(&job)?;
            report.print_summary();

            if let Some(path) = output {
                report
                    .save_json(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nResult saved to: {}", path.display());
            }
        }

        Commands::Compare { job, containers } => {
            let job = load_job(&job, containers)?;
            let ffd = job.clone().with_strategy(Strategy::FirstFitDecreasing);
            let bfd = job.with_strategy(Strategy::BestFitDecreasing);

            let (ffd, bfd) = rayon::join(|| run(&ffd), || run(&bfd));
            let (ffd, bfd) = (ffd?, bfd?);
            ffd.print_summary();
            bfd.print_summary();

            println!("\nStrategy Comparison:");
            println!("{:-<60}", "");
            for report in [&ffd, &bfd] {
                println!(
                    "  {:<28} placed={:<5} util={:.1}% time={}ms",
                    report.summary.strategy,
                    report.summary.total_placed,
                    report.summary.utilization_percent,
                    report.summary.time_ms
                );
            }
        }

        Commands::Presets => {
            println!("Standard Containers:");
            println!("====================");
            for c in ContainerSpec::presets() {
                println!(
                    "  {:<14} {:>6.2} x {:>5.2} x {:>5.2} m  {:>9.0} kg",
                    c.name(),
                    c.length(),
                    c.width(),
                    c.height(),
                    c.max_payload()
                );
            }
            println!("\nUse '\"preset\": \"<NAME>\"' in a job file to select one");
        }

        Commands::Template { output } => {
            let json = serde_json::to_string_pretty(&template())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Template saved to: {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
