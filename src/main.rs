//! Reserved Filter - report the words of a text missing from a reserved list
//!
//! Main entry point for the command-line application.

use clap::Parser;
use std::io;
use std::process;

use reserved_filter::cli::Args;
use reserved_filter::error::exit_code_for;
use reserved_filter::processor::{Mode, Processor, ProcessorConfig};
use reserved_filter::progress::{print_error, print_header, print_info};

fn main() {
    // Parse command-line arguments
    let args = Args::parse();

    // Set up logging; RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    // Run the application
    if let Err(e) = run(args) {
        print_error(&format!("ERROR: {}", e));

        // Print chain of errors
        for cause in e.chain().skip(1) {
            print_error(&format!("  Caused by: {}", cause));
        }

        process::exit(exit_code_for(&e));
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    // Create processor configuration
    let config = ProcessorConfig::from_args(&args)?;

    // Show configuration
    if args.verbose {
        print_config(&config);
    }

    let processor = Processor::new(config);
    let summary = processor.run(io::stdout().lock())?;

    if args.stats && !args.quiet {
        summary.print_summary();
    }

    Ok(())
}

/// Print configuration summary
fn print_config(config: &ProcessorConfig) {
    print_header("Configuration");

    print_info(&format!("Reserved words: {:?}", config.reserved_path));
    match config.mode {
        Mode::Filter => print_info(&format!("Text:           {:?}", config.text_path)),
        Mode::Lookup(ref word) => print_info(&format!("Lookup:         {}", word)),
    }
    print_info(&format!("Overlong words: {:?}", config.overflow));
    print_info(&format!("Show list:      {}", config.show_list));
}
