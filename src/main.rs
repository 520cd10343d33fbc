use std::process::ExitCode;

use clap::Parser;
use colored::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, span, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use binpack_solver::ant_colony::{self, AcoParams};
use binpack_solver::cli::{Algorithm, Cli};
use binpack_solver::domain::instance::Instance;
use binpack_solver::domain::packing::Packing;
use binpack_solver::domain::quality::QualityOrder;
use binpack_solver::error::Error;
use binpack_solver::genetic::{self, GaParams};
use binpack_solver::initial;
use binpack_solver::io;
use binpack_solver::search::{hill_climb, tabu_search, TabuParams};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_target(false).compact())
        .init();

    let cli = Cli::parse();

    let setup_span = span!(Level::INFO, "setup", path = %cli.path.display(), dataset = cli.dataset_index);
    let instance = {
        let _guard = setup_span.enter();
        match io::load(&cli.path, cli.dataset_index) {
            Ok(instance) => instance,
            Err(err) => return report_and_exit(&err),
        }
    };

    info!(
        items = instance.items_count(),
        capacity = instance.capacity(),
        best_known = instance.best_known(),
        algorithm = ?cli.algorithm,
        seed = cli.seed,
        "loaded instance"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(cli.seed);
    let initial = initial::ff_random(&instance, &mut rng);
    print_summary("F", &instance, &initial);

    let (result, steps) = {
        let run_span = span!(Level::INFO, "search", algorithm = ?cli.algorithm);
        let _guard = run_span.enter();
        match cli.algorithm {
            Algorithm::Hill => hill_climb(&instance, initial, QualityOrder::Lexicographic),
            Algorithm::Tabu => tabu_search(&instance, initial, TabuParams::default()),
            Algorithm::Ga => genetic::run(&instance, GaParams::default(), &mut rng),
            Algorithm::Aco => ant_colony::run(&instance, AcoParams::default(), &mut rng),
        }
    };

    if let Err(err) = result.validate(&instance) {
        return report_and_exit(&err);
    }

    print_summary("R", &instance, &result);
    println!("{}: {}", "S".bold(), steps);

    ExitCode::SUCCESS
}

fn print_summary(tag: &str, instance: &Instance, packing: &Packing) {
    let mut slacks: Vec<f64> = packing.fill().iter().map(|&f| instance.capacity() - f).collect();
    slacks.sort_by(|a, b| b.partial_cmp(a).unwrap());
    let slacks: Vec<String> = slacks.iter().map(|s| format!("{s:.2}")).collect();

    let header = format!("{tag}: ({})", packing.k());
    let line = format!("{header} {}", slacks.join(" "));
    if instance.best_known() > 0 && packing.k() <= instance.best_known() {
        println!("{}", line.green());
    } else {
        println!("{line}");
    }
}

fn report_and_exit(err: &Error) -> ExitCode {
    eprintln!("{}: {err}", "error".red().bold());
    match err {
        Error::InvariantViolation(_) => ExitCode::from(2),
        Error::InstanceInvalid(_) | Error::IoFailure(_) => ExitCode::from(1),
    }
}
