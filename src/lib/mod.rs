#![deny(unsafe_code)]
#![allow(clippy::uninlined_format_args)]

//! # fqprep - FASTQ/BAM preprocessing configuration front-end
//!
//! This library is the argument-parsing and precondition-validation layer
//! for a genomics FASTQ/BAM preprocessing toolkit. It turns raw process
//! arguments into validated, strongly-typed configuration records for
//! three downstream pipelines:
//!
//! - **[`tagsort`]** - tag-based BAM sort and per-cell/per-gene metrics
//! - **[`fastqprocess`]** - FASTQ demultiplexing with fixed-length barcodes
//! - **[`slideseq`]** - FASTQ demultiplexing driven by a read structure
//!
//! All three commands share the generic table-driven parser in [`cli`];
//! each contributes a declarative flag table and its own rule set. The
//! rule sets differ in reporting policy: tagsort fails on the first
//! violated rule, while the two FASTQ commands evaluate every rule and
//! report the union of violations. Both policies, the exit codes, and
//! the message texts in [`errors`] are contracts with calling pipelines.
//!
//! Nothing here touches FASTQ or BAM record content. The library never
//! terminates the process; parse and validation outcomes are returned to
//! the binaries, which own the exit policy.

pub mod cli;
pub mod errors;
pub mod fastq;
pub mod fastqprocess;
pub mod slideseq;
pub mod tagsort;
