//! Error types for configuration validation.
//!
//! One variant per validation rule across the three commands. The message
//! texts are a compatibility contract: calling pipelines scrape them from
//! the output streams, so changes here are breaking.

use thiserror::Error;

/// Result type alias for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A violated validation rule in a populated configuration record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither sorted output nor metric computation was requested
    #[error("The choice of either the sorted alignment info or metric computation must be specified")]
    NoOutputRequested,

    /// A requested mode is missing its paired output file
    #[error("--compute-metric and --metric-output should be both specified together, as should --output-sorted-info and --sorted-output")]
    UnpairedOutputOption,

    /// Metric type is not one of the two recognized granularities
    #[error("Metric type must either be \"cell\" or \"gene\"")]
    InvalidMetricType,

    /// Cell metrics require a GTF annotation
    #[error("The gtf file name must be provided with metric_type \"cell\"")]
    MissingGtfFile,

    /// The GTF must be decompressed before use
    #[error("The gtf file must not be gzipped")]
    GzippedGtfFile,

    /// No input BAM was named
    #[error("Must specify a input file name")]
    MissingBamInput,

    /// The input BAM does not exist on disk
    #[error("bam_input {path} is missing!")]
    BamInputNotFound {
        /// Path that failed the existence check
        path: String,
    },

    /// The temp folder for disk sorting does not exist
    #[error("temp folder {path} is missing!")]
    TempFolderNotFound {
        /// Path that failed the existence check
        path: String,
    },

    /// Barcode, UMI and gene tags collapsed to fewer than three values
    #[error("Must have three distinct tags")]
    DuplicateTags,

    /// In-memory sort batches below the minimum useful size
    #[error("The number of alignments per thread must be at least 1000")]
    AlignmentsPerThreadTooSmall,

    /// Thread count outside the compiled-in ceiling
    #[error("The number of threads must be between 1 and {max}")]
    ThreadCountOutOfRange {
        /// The compiled-in thread ceiling
        max: i64,
    },

    /// R1 and R2 lists have different lengths
    #[error("Unequal number of R1 and R2 fastq files in input: R1 : {r1} R2 : {r2}")]
    UnequalR1R2 {
        /// Number of R1 files supplied
        r1: usize,
        /// Number of R2 files supplied
        r2: usize,
    },

    /// At least one R1 file is required
    #[error("No R1 file provided")]
    NoR1Files,

    /// I1 files, when given, must pair one-to-one with R1 files
    #[error("Either the number of I1 input files are equal to the number of R1 input files, or no I1 input files should be provided at all")]
    MismatchedI1Files,

    /// Output BAM size budget must be positive
    #[error("Size of a bam file (in GB) cannot be negative")]
    NonPositiveBamSize,

    /// A sample id is required
    #[error("Must provide a sample id or name")]
    MissingSampleId,

    /// Output format is not one of the two recognized formats
    #[error("Output-format must be either FASTQ or BAM")]
    InvalidOutputFormat,

    /// Barcode length must be positive
    #[error("Barcode length must be a positive integer")]
    NonPositiveBarcodeLength,

    /// UMI length must be positive
    #[error("UMI length must be a positive integer")]
    NonPositiveUmiLength,

    /// A read structure is required
    #[error("Must provide read structures")]
    MissingReadStructure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unequal_r1_r2_message() {
        let error = ConfigError::UnequalR1R2 { r1: 2, r2: 1 };
        let msg = format!("{error}");
        assert!(msg.contains("Unequal number of R1 and R2"));
        assert!(msg.contains("R1 : 2"));
        assert!(msg.contains("R2 : 1"));
    }

    #[test]
    fn test_thread_count_message_names_ceiling() {
        let error = ConfigError::ThreadCountOutOfRange { max: 30 };
        assert!(format!("{error}").contains("between 1 and 30"));
    }

    #[test]
    fn test_missing_path_messages() {
        let error = ConfigError::BamInputNotFound { path: "/data/in.bam".to_string() };
        assert!(format!("{error}").contains("/data/in.bam is missing!"));

        let error = ConfigError::TempFolderNotFound { path: "/scratch".to_string() };
        assert!(format!("{error}").contains("temp folder /scratch is missing!"));
    }

    #[test]
    fn test_metric_type_message() {
        let msg = format!("{}", ConfigError::InvalidMetricType);
        assert!(msg.contains("\"cell\""));
        assert!(msg.contains("\"gene\""));
    }
}
