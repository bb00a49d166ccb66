use clap::Parser;
use metar_processor::cli::{self, Args};
use std::process;

fn main() {
    // Parse command line arguments; clap exits on -h and on bad flags
    let args = Args::parse();

    match cli::run(args) {
        Ok(_stats) => {
            // Success - stats have already been reported by the processor
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
