//! Configuration for the tag-based BAM sort/metric command.
//!
//! Tagsort reads an aligned BAM, sorts alignment info by three auxiliary
//! tags (barcode, UMI, gene) with a disk-based external sort, and can
//! compute per-cell or per-gene metrics. This module only covers the
//! front-end: the flag table, the populated [`TagsortConfig`] record, and
//! the fail-fast precondition checks run before the pipeline starts.
//!
//! Unlike the two FASTQ commands, tagsort reports only the first violated
//! rule, and its help path terminates the process (exit 0). Both policies
//! are long-standing contracts with calling scripts.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use crate::cli::{self, Arity, Flag, ParseOutcome};
use crate::errors::{ConfigError, Result};

/// Compiled-in ceiling on `--nthreads`.
pub const MAX_THREADS: i64 = 30;

/// Minimum useful in-memory sort batch, in alignments.
const MIN_ALIGNMENTS_PER_THREAD: i64 = 1000;

/// Default in-memory sort batch, in alignments.
const DEFAULT_ALIGNMENTS_PER_THREAD: i64 = 1_000_000;

/// Populated configuration for the tagsort command.
///
/// Built with [`TagsortConfig::default`], mutated field-by-field as flags
/// are consumed, and treated as frozen once [`validate`] passes.
#[derive(Debug, Clone, PartialEq)]
pub struct TagsortConfig {
    /// Input BAM file (required; must exist).
    pub bam_input: String,
    /// GTF annotation, required when `metric_type` is "cell"; must not be gzipped.
    pub gtf_file: String,
    /// Temp folder for the disk-based sort (must exist).
    pub temp_folder: String,
    /// Sorted tag-info output, required with `output_sorted_info`.
    pub sorted_output_file: String,
    /// Metric output, required with `compute_metric`.
    pub metric_output_file: String,
    /// Alignments per in-memory sort batch.
    pub alignments_per_thread: i64,
    /// Worker thread count passed downstream.
    pub nthreads: i64,
    /// Cell barcode tag (e.g. CB).
    pub barcode_tag: String,
    /// UMI tag (e.g. UB).
    pub umi_tag: String,
    /// Gene tag (e.g. GX).
    pub gene_tag: String,
    /// Metric granularity, "cell" or "gene".
    pub metric_type: String,
    /// Whether metrics are computed.
    pub compute_metric: bool,
    /// Whether the sorted tag info file is produced.
    pub output_sorted_info: bool,
    /// Tag value to sort-key position, in the order the three tag flags
    /// were supplied. Duplicate tag values collapse into one entry, so a
    /// size below 3 signals a collision.
    pub tag_order: HashMap<String, usize>,
}

impl Default for TagsortConfig {
    fn default() -> Self {
        Self {
            bam_input: String::new(),
            gtf_file: String::new(),
            temp_folder: "/tmp".to_string(),
            sorted_output_file: String::new(),
            metric_output_file: String::new(),
            alignments_per_thread: DEFAULT_ALIGNMENTS_PER_THREAD,
            nthreads: 1,
            barcode_tag: String::new(),
            umi_tag: String::new(),
            gene_tag: String::new(),
            metric_type: String::new(),
            compute_metric: false,
            output_sorted_info: false,
            tag_order: HashMap::new(),
        }
    }
}

/// Record a tag value's position in the sort order.
///
/// The position is the map size before insertion, so re-supplying an
/// already-seen value overwrites instead of growing the map.
fn push_tag(order: &mut HashMap<String, usize>, tag: &str) {
    let position = order.len();
    order.insert(tag.to_string(), position);
}

/// Tagsort option table, in help/declaration order.
static FLAGS: [Flag<TagsortConfig>; 13] = [
    Flag {
        long: "compute-metric",
        short: 'm',
        arity: Arity::NoArgument,
        help: "compute metric, metrics are computed if this option is provided [optional]",
        apply: |c, _| c.compute_metric = true,
    },
    Flag {
        long: "output-sorted-info",
        short: 'n',
        arity: Arity::NoArgument,
        help: "sorted output file is produced if this option is provided [optional]",
        apply: |c, _| c.output_sorted_info = true,
    },
    Flag {
        long: "bam-input",
        short: 'b',
        arity: Arity::RequiredArgument,
        help: "input bam file [required]",
        apply: |c, v| c.bam_input = v.to_string(),
    },
    Flag {
        long: "gtf-file",
        short: 'a',
        arity: Arity::RequiredArgument,
        help: "gtf file (unzipped), required when metric type is cell [required with metric cell]",
        apply: |c, v| c.gtf_file = v.to_string(),
    },
    Flag {
        long: "temp-folder",
        short: 't',
        arity: Arity::RequiredArgument,
        help: "temp folder for disk sorting [optional: default /tmp]",
        apply: |c, v| c.temp_folder = v.to_string(),
    },
    Flag {
        long: "sorted-output",
        short: 'o',
        arity: Arity::RequiredArgument,
        help: "sorted output file [optional]",
        apply: |c, v| c.sorted_output_file = v.to_string(),
    },
    Flag {
        long: "metric-output",
        short: 'M',
        arity: Arity::RequiredArgument,
        help: "metric file, the metrics are output in this file [optional]",
        apply: |c, v| c.metric_output_file = v.to_string(),
    },
    Flag {
        long: "alignments-per-thread",
        short: 'p',
        arity: Arity::RequiredArgument,
        help: "number of alignments per thread [optional: default 1000000], if this number is increased then more RAM is required but reduces the number of file splits",
        apply: |c, v| c.alignments_per_thread = cli::parse_int_lenient(v),
    },
    Flag {
        long: "nthreads",
        short: 'T',
        arity: Arity::RequiredArgument,
        help: "number of threads [optional: default 1]",
        apply: |c, v| c.nthreads = cli::parse_int_lenient(v),
    },
    Flag {
        long: "barcode-tag",
        short: 'C',
        arity: Arity::RequiredArgument,
        help: "the cell barcode tag [required]",
        apply: |c, v| {
            c.barcode_tag = v.to_string();
            push_tag(&mut c.tag_order, v);
        },
    },
    Flag {
        long: "umi-tag",
        short: 'U',
        arity: Arity::RequiredArgument,
        help: "the umi tag [required]: the tsv file output is sorted according to the tags in the options barcode-tag, umi-tag and gene-tag",
        apply: |c, v| {
            c.umi_tag = v.to_string();
            push_tag(&mut c.tag_order, v);
        },
    },
    Flag {
        long: "gene-tag",
        short: 'G',
        arity: Arity::RequiredArgument,
        help: "the gene tag [required]",
        apply: |c, v| {
            c.gene_tag = v.to_string();
            push_tag(&mut c.tag_order, v);
        },
    },
    Flag {
        long: "metric-type",
        short: 'K',
        arity: Arity::RequiredArgument,
        help: "metric type, either \"cell\" or \"gene\" [required]",
        apply: |c, v| c.metric_type = v.to_string(),
    },
];

/// The tagsort flag table.
#[must_use]
pub fn flags() -> &'static [Flag<TagsortConfig>] {
    &FLAGS
}

/// Parse `args` into `config` against the tagsort flag table, writing
/// help to `out` when requested.
///
/// # Errors
///
/// Returns an error only if writing help text to `out` fails.
pub fn parse_args_into(
    program: &str,
    args: &[String],
    config: &mut TagsortConfig,
    out: &mut dyn Write,
) -> io::Result<ParseOutcome> {
    cli::parse_args(program, args, &FLAGS, config, out)
}

/// Returns true if `path` ends in a compressed-archive suffix, case
/// insensitively.
fn has_gzip_suffix(path: &str) -> bool {
    path.to_ascii_lowercase().ends_with(".gz")
}

/// Run the ordered precondition checks against a populated config.
///
/// Fail-fast: only the first violated rule is reported.
///
/// # Errors
///
/// Returns the first violated rule, in check order.
pub fn validate(config: &TagsortConfig) -> Result<()> {
    // Either metric computation or the sorted tag info must be requested,
    // and each requested mode must carry its paired output file.
    if !config.output_sorted_info && !config.compute_metric {
        return Err(ConfigError::NoOutputRequested);
    }
    if (config.compute_metric && config.metric_output_file.is_empty())
        || (config.output_sorted_info && config.sorted_output_file.is_empty())
    {
        return Err(ConfigError::UnpairedOutputOption);
    }

    if config.metric_type != "cell" && config.metric_type != "gene" {
        return Err(ConfigError::InvalidMetricType);
    }

    if config.metric_type == "cell" && config.gtf_file.is_empty() {
        return Err(ConfigError::MissingGtfFile);
    }

    if has_gzip_suffix(&config.gtf_file) {
        return Err(ConfigError::GzippedGtfFile);
    }

    if config.bam_input.is_empty() {
        return Err(ConfigError::MissingBamInput);
    }
    if !Path::new(&config.bam_input).exists() {
        return Err(ConfigError::BamInputNotFound { path: config.bam_input.clone() });
    }

    if !Path::new(&config.temp_folder).exists() {
        return Err(ConfigError::TempFolderNotFound { path: config.temp_folder.clone() });
    }

    if config.tag_order.len() != 3 {
        return Err(ConfigError::DuplicateTags);
    }

    if config.alignments_per_thread < MIN_ALIGNMENTS_PER_THREAD {
        return Err(ConfigError::AlignmentsPerThreadTooSmall);
    }

    if config.nthreads < 1 || config.nthreads > MAX_THREADS {
        return Err(ConfigError::ThreadCountOutOfRange { max: MAX_THREADS });
    }

    Ok(())
}
