use clap::Parser;
use cycle_rotation_solver::{
    error::SolveError,
    parser::{parse_input_file, parse_reader},
    search::{SearchConfig, DEFAULT_MAX_STATES},
    solve_instance,
    solver::DEFAULT_TARGET_LIMIT,
    Answer, SolverConfig, TargetPolicy,
};
use log::{error, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Minimum number of cycle rotations turning the current configuration into the expected one
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input file (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Give up once this many permutations have been visited
    #[arg(long, default_value_t = DEFAULT_MAX_STATES)]
    max_states: usize,

    /// Expand each search layer on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Accept any relabeling that maps the current graph onto the expected one
    #[arg(long)]
    all_targets: bool,

    /// Maximum number of relabelings considered with --all-targets
    #[arg(long, default_value_t = DEFAULT_TARGET_LIMIT)]
    target_limit: usize,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            search: SearchConfig {
                max_states: self.max_states,
                parallel: self.parallel,
            },
            targets: if self.all_targets {
                TargetPolicy::AllIsomorphisms {
                    limit: self.target_limit,
                }
            } else {
                TargetPolicy::FirstIsomorphism
            },
        }
    }
}

fn run(args: &Args) -> Result<Answer, SolveError> {
    let instance = match &args.input {
        Some(path) => parse_input_file(path)?,
        None => parse_reader(io::stdin().lock())?,
    };
    info!(
        "Read {} edges per configuration over {} vertices",
        instance.current_edges.len(),
        instance.vertex_bound()
    );

    solve_instance(&instance, &args.solver_config())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let start_time = Instant::now();
    let answer = run(&args).unwrap_or_else(|e| {
        error!("{}", e);
        Answer::Impossible
    });
    info!("Solved in {:.3} ms", start_time.elapsed().as_secs_f64() * 1000.0);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", answer)?;
    stdout.flush()?;

    Ok(())
}
