#![deny(unsafe_code)]

//! Entry point for the fastqprocess command.
//!
//! Thin top-level: parse, validate, terminate. Help (or any usage error)
//! prints the flag table and returns without terminating the process.
//! Every violated validation rule is printed to both stdout and stderr
//! before a single exit(1); log scrapers may watch either stream.

use std::env;
use std::io::stdout;
use std::process;

use anyhow::Result;
use env_logger::Env;
use fqprep_lib::cli::ParseOutcome;
use fqprep_lib::fastqprocess::{self, FastqProcessConfig};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "fastqprocess".to_string());
    let args: Vec<String> = argv.collect();

    let mut config = FastqProcessConfig::default();
    let outcome = fastqprocess::parse_args_into(&program, &args, &mut config, &mut stdout())?;
    if outcome == ParseOutcome::HelpShown {
        return Ok(());
    }

    let errors = fastqprocess::validate(&config);
    for error in &errors {
        println!("ERROR: {error}");
        eprintln!("ERROR: {error}");
    }

    if config.verbose_flag {
        fastqprocess::print_verbose_file_info(&config, &mut stdout())?;
    }

    if !errors.is_empty() {
        process::exit(1);
    }

    info!("Fastqprocess configuration validated");
    info!("Sample id: {}", config.sample_id);
    info!(
        "Barcode length: {} UMI length: {}",
        config.barcode_length, config.umi_length
    );
    info!(
        "Read files: {} R1, {} R2, {} I1",
        config.r1s.len(),
        config.r2s.len(),
        config.i1s.len()
    );
    info!("Whitelist: {}", config.white_list_file);
    info!("Output format: {} ({} GB shards)", config.output_format, config.bam_size);
    Ok(())
}
