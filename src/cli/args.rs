use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub seed: Option<u64>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Args),
    Help,
}

pub const USAGE: &str = "\
Usage: niflheim [OPTIONS]

Options:
  -s, --seed <INT>     Seed for the random number generator
  -c, --config <PATH>  TOML configuration file
  -h, --help           Print help";

pub fn parse() -> Result<Invocation, String> {
    parse_from(std::env::args().skip(1))
}

pub fn parse_from<I>(argv: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = Args::default();
    let mut iter = argv.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" | "-s" => {
                let val = iter.next().ok_or("--seed requires a value")?;
                let seed = val
                    .parse::<u64>()
                    .map_err(|_| format!("seed must be a valid integer, got '{}'", val))?;
                args.seed = Some(seed);
            }
            "--config" | "-c" => {
                let val = iter.next().ok_or("--config requires a path")?;
                args.config = Some(PathBuf::from(val));
            }
            "--help" | "-h" => return Ok(Invocation::Help),
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(Invocation::Run(args))
}
