//! Configuration for the read-structure FASTQ demultiplexing command.
//!
//! `fastq_slideseq` handles assay protocols whose barcode layout cannot
//! be described by two fixed lengths; a compact read-structure string
//! (e.g. `8C18X6C9M1X`) describes the roles of the bases instead. The
//! rest of the surface matches [`crate::fastqprocess`]: same file lists,
//! same accumulate-then-report validation policy, same duplicated
//! stdout/stderr error reporting, and a help path that returns to the
//! caller without terminating the process.

use std::io::{self, Write};

use crate::cli::{self, Arity, Flag, ParseOutcome};
use crate::errors::ConfigError;
use crate::fastq;

/// Default output BAM size budget, in GB.
const DEFAULT_BAM_SIZE_GB: f64 = 1.0;

/// Populated configuration for the fastq_slideseq command.
#[derive(Debug, Clone, PartialEq)]
pub struct FastqReadStructureConfig {
    /// Output BAM size budget in GB.
    pub bam_size: f64,
    /// Read structure describing barcode/UMI base layout (required).
    pub read_structure: String,
    /// Sample id stamped into the output (required).
    pub sample_id: String,
    /// Index read files, optional; must pair with R1s when present.
    pub i1s: Vec<String>,
    /// Forward read files, at least one required.
    pub r1s: Vec<String>,
    /// Reverse read files, must pair with R1s.
    pub r2s: Vec<String>,
    /// Barcode whitelist file (required).
    pub white_list_file: String,
    /// Output format, "FASTQ" or "BAM".
    pub output_format: String,
    /// Whether to print the input file lists before validation reporting.
    pub verbose_flag: bool,
}

impl Default for FastqReadStructureConfig {
    fn default() -> Self {
        Self {
            bam_size: DEFAULT_BAM_SIZE_GB,
            read_structure: String::new(),
            sample_id: String::new(),
            i1s: Vec::new(),
            r1s: Vec::new(),
            r2s: Vec::new(),
            white_list_file: String::new(),
            output_format: String::new(),
            verbose_flag: false,
        }
    }
}

/// Fastq_slideseq option table, in help/declaration order.
static FLAGS: [Flag<FastqReadStructureConfig>; 9] = [
    Flag {
        long: "verbose",
        short: 'v',
        arity: Arity::NoArgument,
        help: "verbose messages",
        apply: |c, _| c.verbose_flag = true,
    },
    Flag {
        long: "bam-size",
        short: 'B',
        arity: Arity::RequiredArgument,
        help: "output BAM file size in GB [optional: default 1 GB]",
        apply: |c, v| c.bam_size = cli::parse_float_lenient(v),
    },
    Flag {
        long: "read-structure",
        short: 'S',
        arity: Arity::RequiredArgument,
        help: "read structure [required]",
        apply: |c, v| c.read_structure = v.to_string(),
    },
    Flag {
        long: "sample-id",
        short: 's',
        arity: Arity::RequiredArgument,
        help: "sample id [required]",
        apply: |c, v| c.sample_id = v.to_string(),
    },
    Flag {
        long: "I1",
        short: 'I',
        arity: Arity::RequiredArgument,
        help: "I1 fastq file [optional]",
        apply: |c, v| c.i1s.push(v.to_string()),
    },
    Flag {
        long: "R1",
        short: 'R',
        arity: Arity::RequiredArgument,
        help: "R1 fastq file [required]",
        apply: |c, v| c.r1s.push(v.to_string()),
    },
    Flag {
        long: "R2",
        short: 'r',
        arity: Arity::RequiredArgument,
        help: "R2 fastq file [required]",
        apply: |c, v| c.r2s.push(v.to_string()),
    },
    Flag {
        long: "white-list",
        short: 'w',
        arity: Arity::RequiredArgument,
        help: "whitelist (from cellranger) of barcodes [required]",
        apply: |c, v| c.white_list_file = v.to_string(),
    },
    Flag {
        long: "output-format",
        short: 'F',
        arity: Arity::RequiredArgument,
        help: "output-format: either FASTQ or BAM [required]",
        apply: |c, v| c.output_format = v.to_string(),
    },
];

/// The fastq_slideseq flag table.
#[must_use]
pub fn flags() -> &'static [Flag<FastqReadStructureConfig>] {
    &FLAGS
}

/// Parse `args` into `config` against the fastq_slideseq flag table,
/// writing help to `out` when requested. On [`ParseOutcome::HelpShown`]
/// the caller returns without terminating the process.
///
/// # Errors
///
/// Returns an error only if writing help text to `out` fails.
pub fn parse_args_into(
    program: &str,
    args: &[String],
    config: &mut FastqReadStructureConfig,
    out: &mut dyn Write,
) -> io::Result<ParseOutcome> {
    cli::parse_args(program, args, &FLAGS, config, out)
}

/// Evaluate every validation rule and return all violations in check
/// order. An empty vector means the configuration is valid.
#[must_use]
pub fn validate(config: &FastqReadStructureConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    fastq::collect_read_file_errors(&config.i1s, &config.r1s, &config.r2s, &mut errors);

    if config.bam_size <= 0.0 {
        errors.push(ConfigError::NonPositiveBamSize);
    }

    if config.read_structure.is_empty() {
        errors.push(ConfigError::MissingReadStructure);
    }

    if config.sample_id.is_empty() {
        errors.push(ConfigError::MissingSampleId);
    }

    if config.output_format != "FASTQ" && config.output_format != "BAM" {
        errors.push(ConfigError::InvalidOutputFormat);
    }

    errors
}

/// Print the non-empty I1/R1/R2 lists (the `--verbose` diagnostic).
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_verbose_file_info(
    config: &FastqReadStructureConfig,
    out: &mut dyn Write,
) -> io::Result<()> {
    fastq::print_file_list(out, "I1", &config.i1s)?;
    fastq::print_file_list(out, "R1", &config.r1s)?;
    fastq::print_file_list(out, "R2", &config.r2s)?;
    Ok(())
}
