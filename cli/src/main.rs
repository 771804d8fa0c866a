use std::io;
use std::process::ExitCode;

use clap::Parser;
use misskey_purge::{exit_status, logging::init_logging, run, Cli, UreqTransport};

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_logging("info") {
        eprintln!("{e:#}");
    }

    let mut stdout = io::stdout().lock();
    let result = run(cli, UreqTransport::new(), &mut stdout);
    if let Err(e) = &result {
        eprintln!("error: {e:#}");
    }
    ExitCode::from(exit_status(&result))
}
