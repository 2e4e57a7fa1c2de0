/// brushgen - generate box brush maps for Radiant-family editors
///
/// Usage:
///   brushgen [SCENE.json] [--out DIR] [--name FILE]
///   brushgen inspect MAP
///
/// Log verbosity follows RUST_LOG (default: info).

use std::env;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use brushgen_cli::{run, usage_error, Command, Reporter};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    let reporter = Reporter::new(io::stdout().is_terminal());

    match Command::parse(&args) {
        Ok(command) => ExitCode::from(run(command, &reporter, &mut io::stdout(), &mut io::stderr())),
        Err(message) => {
            if let Err(e) = usage_error(&reporter, &mut io::stderr(), &message) {
                log::error!("Could not report usage error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}
