//! Pieces shared by the two FASTQ demultiplexing front-ends.
//!
//! `fastqprocess` and `fastq_slideseq` take the same I1/R1/R2 file lists
//! and share most of their validation rules; only the barcode description
//! differs (explicit lengths vs. a read structure). The list-shape rules
//! and the `--verbose` file listing live here so each command module
//! keeps only its distinct rule set.

use std::io::{self, Write};

use crate::errors::ConfigError;

/// Append the read-file list-shape violations to `errors`, in check
/// order: R1/R2 count mismatch, missing R1, I1 count mismatch.
///
/// Existence of the listed files is deliberately not checked here; the
/// downstream readers report missing files themselves.
pub fn collect_read_file_errors(
    i1s: &[String],
    r1s: &[String],
    r2s: &[String],
    errors: &mut Vec<ConfigError>,
) {
    if r1s.len() != r2s.len() {
        errors.push(ConfigError::UnequalR1R2 { r1: r1s.len(), r2: r2s.len() });
    }

    if r1s.is_empty() {
        errors.push(ConfigError::NoR1Files);
    }

    if !i1s.is_empty() && i1s.len() != r1s.len() {
        errors.push(ConfigError::MismatchedI1Files);
    }
}

/// Print a labeled enumeration of a file list (the `--verbose`
/// diagnostic). Empty lists print nothing.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn print_file_list(out: &mut dyn Write, label: &str, files: &[String]) -> io::Result<()> {
    if files.is_empty() {
        return Ok(());
    }
    writeln!(out, "{label} files:")?;
    for (index, file) in files.iter().enumerate() {
        writeln!(out, "\t{index}: {file}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_matching_lists_produce_no_errors() {
        let mut errors = Vec::new();
        collect_read_file_errors(
            &paths(&["i1.fastq"]),
            &paths(&["r1.fastq"]),
            &paths(&["r2.fastq"]),
            &mut errors,
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unequal_r1_r2_reported_with_counts() {
        let mut errors = Vec::new();
        collect_read_file_errors(
            &[],
            &paths(&["a.fastq", "b.fastq"]),
            &paths(&["c.fastq"]),
            &mut errors,
        );
        assert_eq!(errors, vec![ConfigError::UnequalR1R2 { r1: 2, r2: 1 }]);
    }

    #[test]
    fn test_empty_r1_reports_both_mismatch_and_missing() {
        let mut errors = Vec::new();
        collect_read_file_errors(&[], &[], &paths(&["c.fastq"]), &mut errors);
        assert_eq!(
            errors,
            vec![ConfigError::UnequalR1R2 { r1: 0, r2: 1 }, ConfigError::NoR1Files]
        );
    }

    #[test]
    fn test_i1_optional_but_must_match_when_present() {
        let r1 = paths(&["a.fastq", "b.fastq"]);
        let r2 = paths(&["c.fastq", "d.fastq"]);

        let mut errors = Vec::new();
        collect_read_file_errors(&[], &r1, &r2, &mut errors);
        assert!(errors.is_empty());

        let mut errors = Vec::new();
        collect_read_file_errors(&paths(&["i.fastq"]), &r1, &r2, &mut errors);
        assert_eq!(errors, vec![ConfigError::MismatchedI1Files]);
    }

    #[test]
    fn test_print_file_list_enumerates() {
        let mut out = Vec::new();
        print_file_list(&mut out, "R1", &paths(&["a.fastq", "b.fastq"])).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "R1 files:\n\t0: a.fastq\n\t1: b.fastq\n");
    }

    #[test]
    fn test_print_file_list_empty_prints_nothing() {
        let mut out = Vec::new();
        print_file_list(&mut out, "I1", &[]).unwrap();
        assert!(out.is_empty());
    }
}
