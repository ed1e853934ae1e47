use std::process::ExitCode;

use niflheim::cli::args::{self, Invocation};
use niflheim::config::ColonyConfig;
use niflheim::console::Console;
use niflheim::io::StdConsole;
use niflheim::scheduler::SystemClock;
use niflheim::{logging, ColonyEngine};

fn main() -> ExitCode {
    let args = match args::parse() {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            println!("{}", args::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("Error: {}", msg);
            eprintln!("{}", args::USAGE);
            return ExitCode::from(2);
        }
    };

    let mut config = match &args.config {
        Some(path) => match ColonyConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ColonyConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    logging::init(&config.logging);

    let engine = ColonyEngine::new(config);
    tracing::info!(seed = engine.colony().seed(), "console starting");

    let mut input = StdConsole;
    let mut output = StdConsole;
    let clock = SystemClock::new();
    let mut console = Console::new(engine, &mut input, &mut output, &clock);
    match console.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "console aborted");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
