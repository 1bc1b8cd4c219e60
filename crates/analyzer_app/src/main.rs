mod platform;

use std::process::ExitCode;

use analyzer_logging::analyzer_error;
use clap::Parser;

fn main() -> ExitCode {
    let cli = platform::Cli::parse();
    analyzer_logging::initialize(cli.log_destination(), cli.log_level());

    match platform::run_app(cli) {
        Ok(code) => code,
        Err(err) => {
            analyzer_error!("{:#}", err);
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
