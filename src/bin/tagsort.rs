#![deny(unsafe_code)]

//! Entry point for the tagsort command.
//!
//! Thin top-level: parse, validate, terminate. Help (or any usage error)
//! exits 0 after printing the flag table; the first violated validation
//! rule is printed to stdout and exits 1.

use std::env;
use std::io::stdout;
use std::process;

use anyhow::Result;
use env_logger::Env;
use fqprep_lib::cli::ParseOutcome;
use fqprep_lib::tagsort::{self, TagsortConfig};
use log::info;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut argv = env::args();
    let program = argv.next().unwrap_or_else(|| "tagsort".to_string());
    let args: Vec<String> = argv.collect();

    let mut config = TagsortConfig::default();
    let outcome = tagsort::parse_args_into(&program, &args, &mut config, &mut stdout())?;
    if outcome == ParseOutcome::HelpShown {
        process::exit(0);
    }

    if let Err(error) = tagsort::validate(&config) {
        println!("ERROR: {error}");
        process::exit(1);
    }

    info!("Tagsort configuration validated");
    info!("Input BAM: {}", config.bam_input);
    info!("Temp folder: {}", config.temp_folder);
    info!(
        "Tags: barcode={} umi={} gene={}",
        config.barcode_tag, config.umi_tag, config.gene_tag
    );
    info!("Metric type: {}", config.metric_type);
    if config.compute_metric {
        info!("Metric output: {}", config.metric_output_file);
    }
    if config.output_sorted_info {
        info!("Sorted output: {}", config.sorted_output_file);
    }
    info!(
        "Threads: {} ({} alignments per thread)",
        config.nthreads, config.alignments_per_thread
    );
    Ok(())
}
