use datekit::cli;
use datekit::constants::ERROR_PREFIX;
use std::process;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}: {:#}", ERROR_PREFIX, e);
        process::exit(1);
    }
}
