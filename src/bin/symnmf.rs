//! Command-line driver: `symnmf <k> <goal> <file>`.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use symnmf::{io, Goal, SymNmf};

#[derive(Parser)]
#[command(version, about = "Cluster points with symmetric non-negative matrix factorization")]
struct Opts {
    /// Number of clusters (used by the `symnmf` goal).
    k: usize,

    /// One of: sym, ddg, norm, symnmf.
    goal: Goal,

    /// Input file: one point per line, comma-separated coordinates.
    file: PathBuf,

    /// Seed for the initial factor matrix.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Maximum number of update iterations.
    #[arg(long, default_value_t = symnmf::cluster::DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Convergence threshold on the squared change of H.
    #[arg(long, default_value_t = symnmf::cluster::DEFAULT_TOL)]
    tol: f64,

    /// Damping factor in (0, 1]; 1 is the undamped update.
    #[arg(long, default_value_t = symnmf::cluster::DEFAULT_DAMPING)]
    damping: f64,
}

fn run(opts: &Opts) -> anyhow::Result<String> {
    anyhow::ensure!(
        !(opts.goal.needs_k() && opts.k == 0),
        "goal {} needs k >= 1",
        opts.goal
    );

    let points = io::read_points(&opts.file)
        .with_context(|| format!("failed to read points from {}", opts.file.display()))?;

    let model = SymNmf::new(opts.k)
        .with_seed(opts.seed)
        .with_max_iter(opts.max_iter)
        .with_tol(opts.tol)
        .with_damping(opts.damping);

    let result = opts
        .goal
        .run(&points, &model)
        .with_context(|| format!("goal {} failed", opts.goal))?;

    Ok(io::format_matrix(&result))
}

/// First paragraph of a clap error, folded onto one line.
fn usage_line(err: &clap::Error) -> String {
    let text = err.to_string();
    let head: Vec<&str> = text
        .lines()
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect();
    if head.is_empty() {
        format!("error: {}", err.kind())
    } else {
        head.join(" ")
    }
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        // --help and --version go to stdout and exit 0.
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("{}", usage_line(&err));
            return ExitCode::from(2);
        }
    };

    // Render fully before printing so a failure never leaves a partial matrix.
    match run(&opts) {
        Ok(out) => {
            let mut stdout = std::io::stdout().lock();
            if stdout.write_all(out.as_bytes()).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
