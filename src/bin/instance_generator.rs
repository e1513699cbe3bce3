use clap::Parser;
use cycle_rotation_solver::generator::{generate_instance, GeneratorConfig};
use cycle_rotation_solver::Edge;
use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// Input Generator for the cycle rotation solver.
///
/// Writes an instance in the format read by `rotation-solver`:
///
/// <E>
/// <E lines "u v": current edges>
/// <E lines "u v": expected edges>
///
/// The current graph is a random connected graph (spanning tree plus chords). The
/// expected graph is the current one relabeled by `scramble` random rotations along
/// its simple cycles, so every generated instance is solvable.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate random instances for the cycle rotation solver"
)]
struct Args {
    /// Number of vertices
    #[arg(long)]
    vertices: usize,

    /// Edges added on top of the random spanning tree
    #[arg(long, default_value_t = 2)]
    extra_edges: usize,

    /// Number of random cycle rotations applied to the expected configuration
    #[arg(long, default_value_t = 3)]
    scramble: usize,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Write one edge per line
fn write_edges<W: Write>(writer: &mut W, edges: &[Edge]) -> io::Result<()> {
    for (u, v) in edges {
        writeln!(writer, "{} {}", u, v)?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if args.vertices == 0 {
        return Err("vertices must be positive".into());
    }

    // Initialize RNG
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let config = GeneratorConfig {
        vertices: args.vertices,
        extra_edges: args.extra_edges,
        scramble: args.scramble,
    };
    let generated = generate_instance(&config, &mut rng)?;
    let instance = &generated.instance;

    // Stats go to the log, never into the instance
    info!("Generated instance:");
    info!("  vertices = {}", args.vertices);
    info!("  edges = {}", instance.current_edges.len());
    info!("  simple cycles = {}", generated.generator_count);
    info!("  scramble rotations = {}", args.scramble);
    info!("  seed = {}", seed);
    info!("  relabeling = {:?}", generated.scramble);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    writeln!(writer, "{}", instance.current_edges.len())?;
    write_edges(&mut writer, &instance.current_edges)?;
    write_edges(&mut writer, &instance.expected_edges)?;

    // Flush explicitly
    writer.flush()?;

    Ok(())
}
