//! Schema-driven command-line parsing shared by the three front-ends.
//!
//! Each command declares its options as a static table of [`Flag`] entries
//! (long name, short alias, arity, help sentence, setter). [`parse_args`]
//! walks the raw argument vector against that table, applying setters as
//! values are consumed. `-h`, any unrecognized flag, or a required-argument
//! flag with no value all take the same path: the help table is printed and
//! [`ParseOutcome::HelpShown`] is returned. What the caller does with that
//! outcome differs per command (tagsort exits 0, the FASTQ commands return
//! to their caller).
//!
//! Numeric option values are converted with [`parse_int_lenient`] and
//! [`parse_float_lenient`], which deliberately never fail: non-numeric
//! input yields 0, and the out-of-range 0 is then caught by the
//! command's validation pass. Calling pipelines rely on this.

use std::io::{self, Write};

/// Whether a flag consumes a value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// The flag stands alone and sets a boolean.
    NoArgument,
    /// The flag consumes the next token (or `=value` / attached suffix).
    RequiredArgument,
}

impl Arity {
    /// Classification string used in the help table.
    fn label(self) -> &'static str {
        match self {
            Arity::NoArgument => "no argument",
            Arity::RequiredArgument => "required argument",
        }
    }
}

/// One declarative option-table entry for a command.
///
/// `apply` mutates the command's configuration record with the consumed
/// value (the empty string for no-argument flags). Scalar setters simply
/// overwrite, so the last occurrence wins; list setters append, so
/// repeated flags accumulate in argument order.
pub struct Flag<C> {
    /// Long option name, without the leading `--`.
    pub long: &'static str,
    /// Single-character short alias.
    pub short: char,
    /// Whether the flag takes a value.
    pub arity: Arity,
    /// One-sentence help text for the help table.
    pub help: &'static str,
    /// Setter applied to the configuration record.
    pub apply: fn(&mut C, &str),
}

/// Result of a parsing pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All arguments consumed; the configuration record is populated.
    Parsed,
    /// Help was requested (or an argument was malformed) and the help
    /// table has been written to `out`. The configuration record is
    /// partially populated and must not be validated.
    HelpShown,
}

/// Print the help table for a command: a usage line, then one row per
/// declared flag in declaration order.
pub fn print_help<C>(out: &mut dyn Write, program: &str, flags: &[Flag<C>]) -> io::Result<()> {
    writeln!(out, "Usage: {program} [options] ")?;
    for flag in flags {
        writeln!(out, "\t--{:<20}  {:<25}  {:<35}", flag.long, flag.arity.label(), flag.help)?;
    }
    Ok(())
}

/// Parse `args` (the argument vector without the program name) against
/// `flags`, populating `config` through the table's setters.
///
/// Help or any usage error writes the help table to `out` and returns
/// [`ParseOutcome::HelpShown`]; parsing stops there. Tokens that are not
/// flags are ignored, and a bare `--` ends option scanning.
///
/// # Errors
///
/// Returns an error only if writing the help table to `out` fails.
pub fn parse_args<C>(
    program: &str,
    args: &[String],
    flags: &[Flag<C>],
    config: &mut C,
    out: &mut dyn Write,
) -> io::Result<ParseOutcome> {
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "--" {
            break;
        }
        if let Some(body) = arg.strip_prefix("--") {
            let (name, inline) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let Some(flag) = flags.iter().find(|f| f.long == name) else {
                print_help(out, program, flags)?;
                return Ok(ParseOutcome::HelpShown);
            };
            match flag.arity {
                Arity::NoArgument => {
                    // `--flag=value` on a no-argument flag is a usage error.
                    if inline.is_some() {
                        print_help(out, program, flags)?;
                        return Ok(ParseOutcome::HelpShown);
                    }
                    (flag.apply)(config, "");
                }
                Arity::RequiredArgument => {
                    let value = match inline {
                        Some(value) => value.to_string(),
                        None => {
                            i += 1;
                            match args.get(i) {
                                Some(value) => value.clone(),
                                None => {
                                    print_help(out, program, flags)?;
                                    return Ok(ParseOutcome::HelpShown);
                                }
                            }
                        }
                    };
                    (flag.apply)(config, &value);
                }
            }
        } else if let Some(body) = arg.strip_prefix('-') {
            // Short options: no-argument flags may cluster (-mn); a
            // required-argument flag takes the rest of the token or the
            // next token (-T4 or -T 4).
            let mut rest = body;
            while !rest.is_empty() {
                let c = rest.chars().next().unwrap_or_default();
                rest = &rest[c.len_utf8()..];
                let Some(flag) = flags.iter().find(|f| f.short == c) else {
                    print_help(out, program, flags)?;
                    return Ok(ParseOutcome::HelpShown);
                };
                match flag.arity {
                    Arity::NoArgument => (flag.apply)(config, ""),
                    Arity::RequiredArgument => {
                        let value = if rest.is_empty() {
                            i += 1;
                            match args.get(i) {
                                Some(value) => value.clone(),
                                None => {
                                    print_help(out, program, flags)?;
                                    return Ok(ParseOutcome::HelpShown);
                                }
                            }
                        } else {
                            rest.to_string()
                        };
                        (flag.apply)(config, &value);
                        rest = "";
                    }
                }
            }
        }
        // Non-flag tokens are ignored.
        i += 1;
    }
    Ok(ParseOutcome::Parsed)
}

/// Best-effort integer conversion with C `atoi` semantics: skip leading
/// whitespace, accept an optional sign, consume the longest run of
/// digits, and return 0 if there are none. Saturates instead of
/// overflowing.
#[must_use]
pub fn parse_int_lenient(s: &str) -> i64 {
    let t = s.trim_start();
    let (negative, digits) = match t.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, t.strip_prefix('+').unwrap_or(t)),
    };
    let mut value: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }
    if negative { -value } else { value }
}

/// Best-effort float conversion with C `atof` semantics: parse the
/// longest valid floating-point prefix (optional sign, digits, optional
/// fraction, optional exponent) and return 0.0 if there is none.
#[must_use]
pub fn parse_float_lenient(s: &str) -> f64 {
    let t = s.trim_start();
    let bytes = t.as_bytes();
    let mut end = 0;
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    let mut saw_digit = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        saw_digit = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            saw_digit = true;
        }
    }
    if !saw_digit {
        return 0.0;
    }
    // Exponent is only part of the prefix if at least one digit follows.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    t[..end].parse().unwrap_or(0.0)
}
