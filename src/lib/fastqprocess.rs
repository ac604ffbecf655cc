//! Configuration for the FASTQ demultiplexing command (fixed-length barcodes).
//!
//! Fastqprocess splits I1/R1/R2 FASTQ inputs into per-sample FASTQ or BAM
//! shards, correcting cell barcodes against a whitelist. The barcode
//! layout is described by explicit `--barcode-length`/`--umi-length`
//! values (the slideseq variant uses a read structure instead, see
//! [`crate::slideseq`]).
//!
//! Validation accumulates every violated rule before failing so an
//! operator sees the full list in one run, and each message is written to
//! both stdout and stderr by the binary (downstream log scrapers may
//! watch either stream).

use std::io::{self, Write};

use crate::cli::{self, Arity, Flag, ParseOutcome};
use crate::errors::ConfigError;
use crate::fastq;

/// Default output BAM size budget, in GB.
const DEFAULT_BAM_SIZE_GB: f64 = 1.0;

/// Populated configuration for the fastqprocess command.
#[derive(Debug, Clone, PartialEq)]
pub struct FastqProcessConfig {
    /// Cell barcode length in bases (required, positive).
    pub barcode_length: i64,
    /// UMI length in bases (required, positive).
    pub umi_length: i64,
    /// Output BAM size budget in GB.
    pub bam_size: f64,
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

impl Default for FastqProcessConfig {
    fn default() -> Self {
        Self {
            barcode_length: 0,
            umi_length: 0,
            bam_size: DEFAULT_BAM_SIZE_GB,
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

/// Fastqprocess option table, in help/declaration order.
static FLAGS: [Flag<FastqProcessConfig>; 10] = [
    Flag {
        long: "verbose",
        short: 'v',
        arity: Arity::NoArgument,
        help: "verbose messages",
        apply: |c, _| c.verbose_flag = true,
    },
    Flag {
        long: "barcode-length",
        short: 'b',
        arity: Arity::RequiredArgument,
        help: "barcode length [required]",
        apply: |c, v| c.barcode_length = cli::parse_int_lenient(v),
    },
    Flag {
        long: "umi-length",
        short: 'u',
        arity: Arity::RequiredArgument,
        help: "UMI length [required]",
        apply: |c, v| c.umi_length = cli::parse_int_lenient(v),
    },
    Flag {
        long: "bam-size",
        short: 'B',
        arity: Arity::RequiredArgument,
        help: "output BAM file size in GB [optional: default 1 GB]",
        apply: |c, v| c.bam_size = cli::parse_float_lenient(v),
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

/// The fastqprocess flag table.
#[must_use]
pub fn flags() -> &'static [Flag<FastqProcessConfig>] {
    &FLAGS
}

/// Parse `args` into `config` against the fastqprocess flag table,
/// writing help to `out` when requested. On [`ParseOutcome::HelpShown`]
/// the caller returns without terminating the process.
///
/// # Errors
///
/// Returns an error only if writing help text to `out` fails.
pub fn parse_args_into(
    program: &str,
    args: &[String],
    config: &mut FastqProcessConfig,
    out: &mut dyn Write,
) -> io::Result<ParseOutcome> {
    cli::parse_args(program, args, &FLAGS, config, out)
}

/// Evaluate every validation rule and return all violations in check
/// order. An empty vector means the configuration is valid.
#[must_use]
pub fn validate(config: &FastqProcessConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    fastq::collect_read_file_errors(&config.i1s, &config.r1s, &config.r2s, &mut errors);

    if config.bam_size <= 0.0 {
        errors.push(ConfigError::NonPositiveBamSize);
    }

    if config.sample_id.is_empty() {
        errors.push(ConfigError::MissingSampleId);
    }

    if config.output_format != "FASTQ" && config.output_format != "BAM" {
        errors.push(ConfigError::InvalidOutputFormat);
    }

    if config.barcode_length <= 0 {
        errors.push(ConfigError::NonPositiveBarcodeLength);
    }

    if config.umi_length <= 0 {
        errors.push(ConfigError::NonPositiveUmiLength);
    }

    errors
}

/// Print the non-empty I1/R1/R2 lists (the `--verbose` diagnostic).
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_verbose_file_info(config: &FastqProcessConfig, out: &mut dyn Write) -> io::Result<()> {
    fastq::print_file_list(out, "I1", &config.i1s)?;
    fastq::print_file_list(out, "R1", &config.r1s)?;
    fastq::print_file_list(out, "R2", &config.r2s)?;
    Ok(())
}
