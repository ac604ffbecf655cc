//! Integration tests for fqprep.
//!
//! Run with: `cargo test --test integration_tests`
//!
//! These tests drive the full parse → validate flow for each of the
//! three commands, the way the binaries do, against real temp paths.

use std::io::Write;

use fqprep_lib::cli::ParseOutcome;
use fqprep_lib::errors::ConfigError;
use fqprep_lib::fastqprocess::{self, FastqProcessConfig};
use fqprep_lib::slideseq::{self, FastqReadStructureConfig};
use fqprep_lib::tagsort::{self, TagsortConfig, MAX_THREADS};
use tempfile::{NamedTempFile, TempDir};

fn argv(args: &[&str]) -> Vec<String> {
    args.iter().map(ToString::to_string).collect()
}

fn parse_tagsort(args: &[&str]) -> (TagsortConfig, ParseOutcome, String) {
    let mut config = TagsortConfig::default();
    let mut out = Vec::new();
    let outcome = tagsort::parse_args_into("tagsort", &argv(args), &mut config, &mut out).unwrap();
    (config, outcome, String::from_utf8(out).unwrap())
}

fn parse_fastqprocess(args: &[&str]) -> (FastqProcessConfig, ParseOutcome) {
    let mut config = FastqProcessConfig::default();
    let mut out = Vec::new();
    let outcome =
        fastqprocess::parse_args_into("fastqprocess", &argv(args), &mut config, &mut out).unwrap();
    (config, outcome)
}

fn parse_slideseq(args: &[&str]) -> (FastqReadStructureConfig, ParseOutcome) {
    let mut config = FastqReadStructureConfig::default();
    let mut out = Vec::new();
    let outcome =
        slideseq::parse_args_into("fastq_slideseq", &argv(args), &mut config, &mut out).unwrap();
    (config, outcome)
}

#[test]
fn test_tagsort_end_to_end_success() {
    let mut bam = NamedTempFile::with_suffix(".bam").unwrap();
    bam.write_all(b"BAM\x01").unwrap();
    let tmp = TempDir::new().unwrap();
    let bam_path = bam.path().display().to_string();
    let tmp_path = tmp.path().display().to_string();

    let (config, outcome, _) = parse_tagsort(&[
        "--bam-input",
        &bam_path,
        "--temp-folder",
        &tmp_path,
        "--barcode-tag",
        "CB",
        "--umi-tag",
        "UB",
        "--gene-tag",
        "GX",
        "--metric-type",
        "gene",
        "--compute-metric",
        "--metric-output",
        "out.tsv",
    ]);

    assert_eq!(outcome, ParseOutcome::Parsed);
    tagsort::validate(&config).unwrap();

    assert!(config.compute_metric);
    assert_eq!(config.metric_output_file, "out.tsv");
    assert_eq!(config.tag_order.len(), 3);
    assert_eq!(config.tag_order["CB"], 0);
    assert_eq!(config.tag_order["UB"], 1);
    assert_eq!(config.tag_order["GX"], 2);
    // Defaults survive parsing untouched.
    assert_eq!(config.alignments_per_thread, 1_000_000);
    assert_eq!(config.nthreads, 1);
}

#[test]
fn test_tagsort_short_flags_match_long_flags() {
    let mut bam = NamedTempFile::with_suffix(".bam").unwrap();
    bam.write_all(b"BAM\x01").unwrap();
    let tmp = TempDir::new().unwrap();
    let bam_path = bam.path().display().to_string();
    let tmp_path = tmp.path().display().to_string();

    let (config, outcome, _) = parse_tagsort(&[
        "-b", &bam_path, "-t", &tmp_path, "-C", "CB", "-U", "UB", "-G", "GX", "-K", "gene", "-m",
        "-M", "out.tsv", "-T", "4", "-p", "50000",
    ]);

    assert_eq!(outcome, ParseOutcome::Parsed);
    tagsort::validate(&config).unwrap();
    assert_eq!(config.nthreads, 4);
    assert_eq!(config.alignments_per_thread, 50_000);
}

#[test]
fn test_tagsort_duplicate_tag_fails_distinctness() {
    let mut bam = NamedTempFile::with_suffix(".bam").unwrap();
    bam.write_all(b"BAM\x01").unwrap();
    let tmp = TempDir::new().unwrap();
    let bam_path = bam.path().display().to_string();
    let tmp_path = tmp.path().display().to_string();

    let (config, _, _) = parse_tagsort(&[
        "--bam-input",
        &bam_path,
        "--temp-folder",
        &tmp_path,
        "--barcode-tag",
        "X",
        "--umi-tag",
        "X",
        "--gene-tag",
        "Y",
        "--metric-type",
        "gene",
        "--compute-metric",
        "--metric-output",
        "out.tsv",
    ]);

    assert_eq!(config.tag_order.len(), 2);
    let error = tagsort::validate(&config).unwrap_err();
    assert_eq!(error, ConfigError::DuplicateTags);
    assert!(format!("{error}").contains("three distinct tags"));
}

#[test]
fn test_tagsort_fail_fast_reports_only_first_violation() {
    // Missing output modes AND bad metric type AND missing bam; only the
    // first check fires.
    let (config, _, _) = parse_tagsort(&["--metric-type", "bogus"]);
    assert_eq!(tagsort::validate(&config), Err(ConfigError::NoOutputRequested));
}

#[test]
fn test_tagsort_nthreads_boundaries_end_to_end() {
    let mut bam = NamedTempFile::with_suffix(".bam").unwrap();
    bam.write_all(b"BAM\x01").unwrap();
    let tmp = TempDir::new().unwrap();
    let bam_path = bam.path().display().to_string();
    let tmp_path = tmp.path().display().to_string();

    for (value, ok) in [("1", true), (&MAX_THREADS.to_string(), true), ("0", false)] {
        let (config, _, _) = parse_tagsort(&[
            "-b", &bam_path, "-t", &tmp_path, "-C", "CB", "-U", "UB", "-G", "GX", "-K", "gene",
            "-m", "-M", "out.tsv", "-T", value,
        ]);
        assert_eq!(tagsort::validate(&config).is_ok(), ok, "nthreads={value}");
    }
}

#[test]
fn test_tagsort_help_path() {
    let (_, outcome, help) = parse_tagsort(&["-h"]);
    assert_eq!(outcome, ParseOutcome::HelpShown);
    assert!(help.starts_with("Usage: tagsort [options]"));
    assert!(help.contains("--bam-input"));
    assert!(help.contains("--metric-type"));
    assert!(help.contains("no argument"));
    assert!(help.contains("required argument"));

    let (_, outcome, help) = parse_tagsort(&["--definitely-not-a-flag"]);
    assert_eq!(outcome, ParseOutcome::HelpShown);
    assert!(help.contains("--compute-metric"));
}

#[test]
fn test_fastqprocess_end_to_end_success() {
    let (config, outcome) = parse_fastqprocess(&[
        "--R1",
        "a.fastq",
        "--R2",
        "b.fastq",
        "--sample-id",
        "S1",
        "--barcode-length",
        "16",
        "--umi-length",
        "10",
        "--output-format",
        "FASTQ",
        "--white-list",
        "wl.txt",
    ]);

    assert_eq!(outcome, ParseOutcome::Parsed);
    assert!(fastqprocess::validate(&config).is_empty());
    assert_eq!(config.barcode_length, 16);
    assert_eq!(config.umi_length, 10);
    assert_eq!(config.white_list_file, "wl.txt");
    // Input files are not stat'ed at this layer.
}

#[test]
fn test_fastqprocess_accumulates_count_errors() {
    let (config, _) = parse_fastqprocess(&[
        "--R1",
        "a1.fastq",
        "--R1",
        "a2.fastq",
        "--R2",
        "b1.fastq",
        "--sample-id",
        "S1",
        "--barcode-length",
        "16",
        "--umi-length",
        "10",
        "--output-format",
        "FASTQ",
        "--white-list",
        "wl.txt",
    ]);
    assert_eq!(
        fastqprocess::validate(&config),
        vec![ConfigError::UnequalR1R2 { r1: 2, r2: 1 }]
    );

    let (config, _) = parse_fastqprocess(&[
        "--R2",
        "b1.fastq",
        "--sample-id",
        "S1",
        "--barcode-length",
        "16",
        "--umi-length",
        "10",
        "--output-format",
        "FASTQ",
        "--white-list",
        "wl.txt",
    ]);
    let errors = fastqprocess::validate(&config);
    assert!(errors.contains(&ConfigError::NoR1Files));
    assert!(errors.contains(&ConfigError::UnequalR1R2 { r1: 0, r2: 1 }));
}

#[test]
fn test_fastqprocess_i1_pairing_end_to_end() {
    let base = [
        "--R1",
        "a1.fastq",
        "--R2",
        "b1.fastq",
        "--R1",
        "a2.fastq",
        "--R2",
        "b2.fastq",
        "--sample-id",
        "S1",
        "--barcode-length",
        "16",
        "--umi-length",
        "10",
        "--output-format",
        "BAM",
        "--white-list",
        "wl.txt",
    ];

    // One I1 against two R1s fails.
    let mut with_one_i1: Vec<&str> = base.to_vec();
    with_one_i1.extend(["--I1", "i1.fastq"]);
    let (config, _) = parse_fastqprocess(&with_one_i1);
    assert_eq!(fastqprocess::validate(&config), vec![ConfigError::MismatchedI1Files]);

    // No I1 at all passes.
    let (config, _) = parse_fastqprocess(&base);
    assert!(fastqprocess::validate(&config).is_empty());
}

#[test]
fn test_fastqprocess_lenient_bam_size() {
    // "abc" converts to 0.0, which then fails the range rule.
    let (config, outcome) = parse_fastqprocess(&[
        "--R1",
        "a.fastq",
        "--R2",
        "b.fastq",
        "--sample-id",
        "S1",
        "--barcode-length",
        "16",
        "--umi-length",
        "10",
        "--output-format",
        "FASTQ",
        "--white-list",
        "wl.txt",
        "--bam-size",
        "abc",
    ]);
    assert_eq!(outcome, ParseOutcome::Parsed);
    assert_eq!(fastqprocess::validate(&config), vec![ConfigError::NonPositiveBamSize]);
}

#[test]
fn test_fastqprocess_help_returns_without_validation() {
    let (config, outcome) = parse_fastqprocess(&["-h"]);
    assert_eq!(outcome, ParseOutcome::HelpShown);
    // Partially-populated record is left as defaults and never validated.
    assert_eq!(config, FastqProcessConfig::default());
}

#[test]
fn test_slideseq_end_to_end_success() {
    let (config, outcome) = parse_slideseq(&[
        "--read-structure",
        "8C18X6C9M1X",
        "--R1",
        "a.fastq",
        "--R2",
        "b.fastq",
        "--sample-id",
        "S1",
        "--output-format",
        "BAM",
        "--white-list",
        "wl.txt",
        "--bam-size",
        "2.5",
    ]);
    assert_eq!(outcome, ParseOutcome::Parsed);
    assert!(slideseq::validate(&config).is_empty());
    assert_eq!(config.read_structure, "8C18X6C9M1X");
    assert!((config.bam_size - 2.5).abs() < f64::EPSILON);
}

#[test]
fn test_slideseq_missing_read_structure_accumulates() {
    let (config, _) = parse_slideseq(&[
        "--R1",
        "a.fastq",
        "--R2",
        "b.fastq",
        "--output-format",
        "TSV",
        "--white-list",
        "wl.txt",
    ]);
    assert_eq!(
        slideseq::validate(&config),
        vec![
            ConfigError::MissingReadStructure,
            ConfigError::MissingSampleId,
            ConfigError::InvalidOutputFormat,
        ]
    );
}
