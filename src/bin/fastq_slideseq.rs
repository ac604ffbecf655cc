#![deny(unsafe_code)]

//! Entry point for the fastq_slideseq command.
//!
//! Same shape and policies as fastqprocess: help returns without
//! terminating, validation errors are duplicated to stdout and stderr,
//! and the process exits 1 only after every rule has been evaluated.

use std::env;
use std::io::stdout;
use std::process;

use anyhow::Result;
use env_logger::Env;
use fqprep_lib::cli::ParseOutcome;
use fqprep_lib::slideseq::{self, FastqReadStructureConfig};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "fastq_slideseq".to_string());
    let args: Vec<String> = argv.collect();

    let mut config = FastqReadStructureConfig::default();
    let outcome = slideseq::parse_args_into(&program, &args, &mut config, &mut stdout())?;
    if outcome == ParseOutcome::HelpShown {
        return Ok(());
    }

    let errors = slideseq::validate(&config);
    for error in &errors {
        println!("ERROR: {error}");
        eprintln!("ERROR: {error}");
    }

    if config.verbose_flag {
        slideseq::print_verbose_file_info(&config, &mut stdout())?;
    }

    if !errors.is_empty() {
        process::exit(1);
    }

    info!("Fastq_slideseq configuration validated");
    info!("Sample id: {}", config.sample_id);
    info!("Read structure: {}", config.read_structure);
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
