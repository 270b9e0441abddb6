use urledit_core::diag;
use urledit_core::logging;

mod cli;

fn main() {
    // Initialize logging as early as possible; if the state dir is
    // unusable, log to stderr instead of refusing to run.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli::run_from_args() {
        eprintln!("{} error: {}", diag::PROGRAM, err);
        eprintln!("{} error: Try {} -h for help", diag::PROGRAM, diag::PROGRAM);
        std::process::exit(err.exit_code());
    }
}
