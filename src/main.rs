use anyhow::{bail, Context, Result};
use clap::Parser;
use rand::{rngs::StdRng, thread_rng, Rng, SeedableRng};
use std::{io, path::PathBuf, time::Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tsp_heuristics::{
    instance::{self, Instance, InstanceFormat},
    report::{default_report_path, Outcome, ReportFormat, ReportWriter},
    Heuristic, ZeroCostPolicy,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Opt {
    /// A path to a problem instance, else reads from stdin
    file: Option<PathBuf>,

    /// Instance format, guessed from the file extension by default
    #[arg(long, value_enum)]
    format: Option<InstanceFormat>,

    /// Ignore the input and generate a random metric instance with this many vertices
    #[arg(long, conflicts_with = "file")]
    random: Option<usize>,

    /// Seed for --random
    #[arg(long, requires = "random")]
    seed: Option<u64>,

    /// Heuristics to run, in order. Runs all of them by default
    #[arg(short = 'H', long = "heuristic", value_enum)]
    heuristics: Vec<Heuristic>,

    /// How shortest-path trees treat a tentative distance of zero
    #[arg(long, value_enum, default_value_t)]
    zero_cost: ZeroCostPolicy,

    /// Report file to append results to
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Do not write a report file
    #[arg(long, conflicts_with = "report")]
    no_report: bool,

    #[arg(long, value_enum, default_value_t)]
    report_format: ReportFormat,

    /// Include the visiting order of each tour in the output
    #[arg(long)]
    show_tour: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tsp_heuristics=info")),
        )
        .with_writer(io::stderr)
        .init();
    let opt = Opt::parse();

    let instance = read_instance(&opt)?;
    let n = instance.matrix.len();
    info!("Instance {} has {} vertices", instance.name, n);
    if !instance.matrix.is_symmetric() {
        warn!("Cost matrix is not symmetric, tour costs are only meaningful for metric instances");
    }

    let mut report = if opt.no_report {
        None
    } else {
        let path = opt.report.clone().unwrap_or_else(default_report_path);
        Some(
            ReportWriter::open(&path)
                .with_context(|| format!("cannot open report {}", path.display()))?,
        )
    };

    let heuristics = if opt.heuristics.is_empty() {
        Heuristic::ALL.to_vec()
    } else {
        opt.heuristics.clone()
    };
    for heuristic in heuristics {
        let start = Instant::now();
        let tour = heuristic
            .run(&instance.matrix, opt.zero_cost)
            .with_context(|| format!("{heuristic} failed on {}", instance.name))?;
        let elapsed = start.elapsed();
        info!("{} finished in {:?}", heuristic, elapsed);

        let outcome = Outcome::new(&instance.name, heuristic, tour, elapsed, opt.show_tour);
        let line = outcome.to_line(opt.report_format)?;
        println!("{line}");
        if let Some(report) = report.as_mut() {
            report
                .append(&line)
                .with_context(|| format!("cannot append to {}", report.path().display()))?;
        }
    }

    if let Some(report) = report {
        info!("Report written to {}", report.path().display());
    }
    Ok(())
}

fn read_instance(opt: &Opt) -> Result<Instance> {
    if let Some(n) = opt.random {
        if n == 0 {
            bail!("--random needs at least one vertex");
        }
        let seed = opt.seed.unwrap_or_else(|| thread_rng().gen());
        info!("Generating random metric instance with seed {}", seed);
        return Ok(Instance {
            name: format!("random-{n}-{seed}"),
            matrix: instance::random_metric(n, &mut StdRng::seed_from_u64(seed))?,
        });
    }

    match &opt.file {
        Some(path) => instance::load(path, opt.format)
            .with_context(|| format!("cannot load instance {}", path.display())),
        None => {
            info!("Reading from stdin");
            let mut instance = instance::parse(
                io::stdin().lock(),
                opt.format.unwrap_or(InstanceFormat::Tsplib),
            )
            .context("cannot parse instance from stdin")?;
            if instance.name.is_empty() {
                instance.name = "stdin".to_owned();
            }
            Ok(instance)
        }
    }
}
